//! Shared application state.
//!
//! Holds the validated config, the injected record source, and the metrics
//! registry. Handlers receive it by value (cheap `Arc` clone).

use std::sync::Arc;
use std::time::Instant;

use finsight_core::analytics::AnalyticsParams;
use finsight_core::error::Result;

use crate::config::FinsightConfig;
use crate::obs::ServiceMetrics;
use crate::store::RecordSource;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: FinsightConfig,
    params: AnalyticsParams,
    source: Arc<dyn RecordSource>,
    metrics: ServiceMetrics,
    started: Instant,
}

impl AppState {
    /// Build application state. The config is re-validated so states built
    /// outside `config::load_*` obey the same limits.
    pub fn new(cfg: FinsightConfig, source: Arc<dyn RecordSource>) -> Result<Self> {
        cfg.validate()?;
        let params = cfg.analytics.params();

        tracing::info!(
            source = source.kind(),
            top_n = params.top_n,
            volatility_window = params.volatility_window,
            heatmap_rows = params.heatmap_rows,
            "app state ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                params,
                source,
                metrics: ServiceMetrics::default(),
                started: Instant::now(),
            }),
        })
    }

    pub fn cfg(&self) -> &FinsightConfig {
        &self.inner.cfg
    }

    pub fn params(&self) -> &AnalyticsParams {
        &self.inner.params
    }

    pub fn source(&self) -> Arc<dyn RecordSource> {
        Arc::clone(&self.inner.source)
    }

    pub fn metrics(&self) -> &ServiceMetrics {
        &self.inner.metrics
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }

    pub fn set_draining(&self) {
        self.inner.metrics.set_draining();
    }

    /// Extra gauge lines appended to `/metrics`.
    pub fn metrics_extra(&self) -> Vec<(&'static str, u64)> {
        vec![("finsight_uptime_seconds", self.inner.started.elapsed().as_secs())]
    }
}
