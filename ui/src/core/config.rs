//! Dashboard configuration, read from the embedded `assets/config/dashboard.toml`.

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

const EMBEDDED_CONFIG: &str = include_str!("../../assets/config/dashboard.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse dashboard config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("chart size {width}x{height} is not a positive finite size")]
    InvalidChartSize { width: f64, height: f64 },
    #[error("device scale {0} must be a positive finite number")]
    InvalidDeviceScale(f64),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Artificial latency of the mock loader.
    pub load_delay_ms: u64,
    /// Suffix for y-axis labels of the broadband chart.
    pub chart_unit: String,
    pub sparkline_salt: u64,
    pub chart: ChartConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Logical width in CSS pixels.
    pub width: f64,
    /// Logical height in CSS pixels.
    pub height: f64,
    /// Overrides the display scale factor when set.
    pub device_scale: Option<f64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            load_delay_ms: 500,
            chart_unit: "M".to_string(),
            sparkline_salt: 0,
            chart: ChartConfig::default(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 320.0,
            device_scale: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Embedded configuration, or defaults if it fails to parse.
    pub fn load() -> Self {
        Self::from_toml_str(EMBEDDED_CONFIG).unwrap_or_else(|err| {
            warn!("{err}; falling back to default dashboard config");
            Self::default()
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.chart.width, self.chart.height);
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidChartSize { width, height });
        }
        if let Some(scale) = self.chart.device_scale {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(ConfigError::InvalidDeviceScale(scale));
            }
        }
        Ok(())
    }
}
