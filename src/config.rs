use std::path::PathBuf;
use std::time::Duration;

use charming::element::Symbol;

pub const DEFAULT_TRADES_PATH: &str = "trades.json";
pub const DEFAULT_OUTPUT_PATH: &str = "trades.html";
pub const DEFAULT_REFRESH_SECS: u64 = 60;
pub const DEFAULT_RETRY_SECS: u64 = 10;
pub const DEFAULT_ERROR_PREFIX: &str = "Error refreshing chart:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    TriangleUp,
    TriangleDown,
    Cross,
}

impl MarkerShape {
    pub fn symbol(self) -> Symbol {
        match self {
            MarkerShape::TriangleUp => Symbol::Triangle,
            MarkerShape::TriangleDown => Symbol::Custom("path://M0,0L10,0L5,10Z".to_string()),
            MarkerShape::Cross => Symbol::Custom(
                "path://M2,0L5,3L8,0L10,2L7,5L10,8L8,10L5,7L2,10L0,8L3,5L0,2Z".to_string(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub shape: MarkerShape,
    pub color: String,
    pub size: f64,
    /// Legend entry, attached to the first trade only.
    pub label: Option<String>,
}

impl MarkerStyle {
    fn new(shape: MarkerShape, color: &str, size: f64, label: Option<&str>) -> Self {
        MarkerStyle {
            shape,
            color: color.to_string(),
            size,
            label: label.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
    pub buy: MarkerStyle,
    pub sell: MarkerStyle,
    pub stop_loss: MarkerStyle,
    pub take_profit: MarkerStyle,
}

impl Default for ChartStyle {
    fn default() -> Self {
        ChartStyle {
            title: "Bitcoin RSI Trading - Trade Points".to_string(),
            x_label: "Time".to_string(),
            y_label: "Price (USDC)".to_string(),
            width: 1200,
            height: 600,
            buy: MarkerStyle::new(MarkerShape::TriangleUp, "green", 14.0, None),
            sell: MarkerStyle::new(MarkerShape::TriangleDown, "red", 14.0, None),
            stop_loss: MarkerStyle::new(MarkerShape::Cross, "orange", 10.0, Some("Stop-Loss")),
            take_profit: MarkerStyle::new(MarkerShape::Cross, "blue", 10.0, Some("Take-Profit")),
        }
    }
}

/// Everything the refresher needs, fixed at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub trades_path: PathBuf,
    pub output_path: PathBuf,
    pub refresh_interval: Duration,
    pub retry_interval: Duration,
    pub error_prefix: String,
    pub style: ChartStyle,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            trades_path: PathBuf::from(DEFAULT_TRADES_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            retry_interval: Duration::from_secs(DEFAULT_RETRY_SECS),
            error_prefix: DEFAULT_ERROR_PREFIX.to_string(),
            style: ChartStyle::default(),
        }
    }
}
