use serde::Deserialize;
use finsight_core::analytics::AnalyticsParams;
use finsight_core::error::{Result, FinsightError};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FinsightConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    pub database: DatabaseSection,

    #[serde(default)]
    pub loader: LoaderSection,

    #[serde(default)]
    pub analytics: AnalyticsSection,

    #[serde(default)]
    pub output: OutputSection,
}

impl FinsightConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(FinsightError::UnsupportedVersion);
        }

        self.database.validate()?;
        self.analytics.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Permissive cross-origin policy for browser dashboards.
    #[serde(default = "default_true")]
    pub cors: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            cors: true,
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:5000".into()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseSection {
    #[serde(default = "default_uri")]
    pub uri: String,

    pub name: String,

    pub collection: String,

    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default = "default_timeout_ms")]
    pub connect_timeout_ms: u64,

    #[serde(default = "default_timeout_ms")]
    pub server_selection_timeout_ms: u64,
}

impl DatabaseSection {
    pub fn validate(&self) -> Result<()> {
        if self.uri.trim().is_empty() {
            return Err(FinsightError::BadRequest("database.uri must not be empty".into()));
        }
        if self.name.trim().is_empty() {
            return Err(FinsightError::BadRequest("database.name must not be empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(FinsightError::BadRequest(
                "database.collection must not be empty".into(),
            ));
        }
        if !(100..=120000).contains(&self.connect_timeout_ms) {
            return Err(FinsightError::BadRequest(
                "database.connect_timeout_ms must be between 100 and 120000".into(),
            ));
        }
        if !(100..=120000).contains(&self.server_selection_timeout_ms) {
            return Err(FinsightError::BadRequest(
                "database.server_selection_timeout_ms must be between 100 and 120000".into(),
            ));
        }
        Ok(())
    }
}

fn default_uri() -> String {
    "mongodb://localhost:27017".into()
}
fn default_app_name() -> String {
    "finsight".into()
}
fn default_timeout_ms() -> u64 {
    5000
}

/// What to do with a stored document that cannot be decoded into a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Log, count, and leave the document out of the table.
    #[default]
    Skip,
    /// Fail the whole request.
    Fail,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoaderSection {
    #[serde(default)]
    pub on_malformed: MalformedPolicy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyticsSection {
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    #[serde(default = "default_volatility_window")]
    pub volatility_window: usize,

    #[serde(default = "default_heatmap_rows")]
    pub heatmap_rows: usize,

    #[serde(default = "default_most_traded")]
    pub most_traded: usize,
}

impl Default for AnalyticsSection {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            volatility_window: default_volatility_window(),
            heatmap_rows: default_heatmap_rows(),
            most_traded: default_most_traded(),
        }
    }
}

impl AnalyticsSection {
    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("analytics.top_n", self.top_n),
            ("analytics.heatmap_rows", self.heatmap_rows),
            ("analytics.most_traded", self.most_traded),
        ] {
            if !(1..=1000).contains(&v) {
                return Err(FinsightError::BadRequest(format!(
                    "{name} must be between 1 and 1000"
                )));
            }
        }
        if !(2..=250).contains(&self.volatility_window) {
            return Err(FinsightError::BadRequest(
                "analytics.volatility_window must be between 2 and 250".into(),
            ));
        }
        Ok(())
    }

    pub fn params(&self) -> AnalyticsParams {
        AnalyticsParams {
            top_n: self.top_n,
            volatility_window: self.volatility_window,
            heatmap_rows: self.heatmap_rows,
            most_traded: self.most_traded,
        }
    }
}

fn default_top_n() -> usize {
    10
}
fn default_volatility_window() -> usize {
    5
}
fn default_heatmap_rows() -> usize {
    50
}
fn default_most_traded() -> usize {
    10
}

/// Response shape for endpoints that have a chart rendition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// JSON data.
    #[default]
    Data,
    /// PNG chart as a base64 data URI under `plot_url`.
    Chart,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    #[serde(default)]
    pub portfolio: OutputMode,

    #[serde(default)]
    pub heatmap: OutputMode,
}
