use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use charming::HtmlRenderer;

use crate::chart::TradePlot;
use crate::config::ChartStyle;
use crate::error::PlotError;

/// Where a finished plot is shown.
pub trait ChartSink {
    fn show(&mut self, plot: &TradePlot, style: &ChartStyle) -> Result<(), PlotError>;
}

/// Renders the plot as an ECharts page. An open browser tab reloads itself every `reload`.
pub struct HtmlFileSink {
    path: PathBuf,
    reload: Duration,
}

impl HtmlFileSink {
    pub fn new(path: impl Into<PathBuf>, reload: Duration) -> Self {
        HtmlFileSink {
            path: path.into(),
            reload,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn render(&self, plot: &TradePlot, style: &ChartStyle) -> Result<String, PlotError> {
        let renderer = HtmlRenderer::new(
            style.title.as_str(),
            u64::from(style.width),
            u64::from(style.height),
        );
        let html = renderer
            .render(&plot.chart(style))
            .map_err(|e| PlotError::Render(format!("{:?}", e)))?;
        Ok(with_reload(html, self.reload))
    }
}

impl ChartSink for HtmlFileSink {
    fn show(&mut self, plot: &TradePlot, style: &ChartStyle) -> Result<(), PlotError> {
        let html = self.render(plot, style)?;

        // readers never see a half written page
        let mut tmp = OsString::from(self.path.as_os_str());
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, html).map_err(|e| PlotError::output(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| PlotError::output(&self.path, e))
    }
}

fn with_reload(html: String, reload: Duration) -> String {
    let meta = format!(
        "<head>\n<meta http-equiv=\"refresh\" content=\"{}\">",
        reload.as_secs().max(1)
    );
    html.replacen("<head>", &meta, 1)
}
