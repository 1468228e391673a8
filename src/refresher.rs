use std::time::Duration;

use log::{debug, info, warn};

use crate::chart::{MarkerKind, TradePlot};
use crate::config::PlotConfig;
use crate::error::PlotError;
use crate::model::trade::parse_trades;
use crate::sink::ChartSink;
use crate::source::TradeSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Normal,
    Backoff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSummary {
    pub trades: usize,
    pub buys: usize,
    pub sells: usize,
}

/// Load, parse, render, pause. Forever.
pub struct Refresher<S: TradeSource, K: ChartSink> {
    source: S,
    sink: K,
    config: PlotConfig,
    state: RefreshState,
}

impl<S: TradeSource, K: ChartSink> Refresher<S, K> {
    pub fn new(source: S, sink: K, config: PlotConfig) -> Self {
        Refresher {
            source,
            sink,
            config,
            state: RefreshState::Normal,
        }
    }

    pub fn state(&self) -> RefreshState {
        self.state
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn refresh(&mut self) -> Result<RefreshSummary, PlotError> {
        let records = self.source.load()?;
        let trades = parse_trades(records)?;
        let plot = TradePlot::from_trades(&trades, &self.config.style);
        self.sink.show(&plot, &self.config.style)?;
        Ok(RefreshSummary {
            trades: trades.len(),
            buys: plot.count(MarkerKind::Buy),
            sells: plot.count(MarkerKind::Sell),
        })
    }

    /// Runs one iteration and returns how long to wait before the next one.
    pub fn step(&mut self) -> Duration {
        match self.refresh() {
            Ok(summary) => {
                info!(
                    "plotted {} trades ({} buy, {} sell)",
                    summary.trades, summary.buys, summary.sells
                );
                self.transition(RefreshState::Normal);
                self.config.refresh_interval
            }
            Err(e) => {
                println!("{} {}", self.config.error_prefix, e);
                warn!("{} failure, retrying in {:?}", e.kind(), self.config.retry_interval);
                self.transition(RefreshState::Backoff);
                self.config.retry_interval
            }
        }
    }

    fn transition(&mut self, next: RefreshState) {
        if self.state != next {
            debug!("{:?} -> {:?}", self.state, next);
        }
        self.state = next;
    }

    /// Never returns; stop the process to stop refreshing.
    pub async fn run(mut self) {
        info!(
            "watching {} every {:?}",
            self.config.trades_path.display(),
            self.config.refresh_interval
        );
        loop {
            let pause = self.step();
            debug!("sleeping {:?}", pause);
            tokio::time::sleep(pause).await;
        }
    }
}
