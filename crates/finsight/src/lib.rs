//! Top-level facade crate for finsight.
//!
//! Re-exports the metric core and the HTTP gateway so users can depend on a single crate.

pub mod core {
    pub use finsight_core::*;
}

pub mod gateway {
    pub use finsight_gateway::*;
}
