use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::PlotError;
use crate::model::decimal::DecimalVec;
use crate::parse_datetime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum TradeSide {
    Buy,
    Sell,
}

// Anything that is not "buy" is drawn as a sell, including non-strings.
impl From<serde_json::Value> for TradeSide {
    fn from(value: serde_json::Value) -> Self {
        match value.as_str() {
            Some("buy") => TradeSide::Buy,
            _ => TradeSide::Sell,
        }
    }
}

impl From<String> for TradeSide {
    fn from(value: String) -> Self {
        TradeSide::from(serde_json::Value::String(value))
    }
}

/// One entry of the trade file, before its time is parsed.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeRecord {
    pub time: String,
    #[serde(rename = "type")]
    pub side: TradeSide,
    pub price: DecimalVec,
    pub stop_loss: DecimalVec,
    pub take_profit: DecimalVec,
}

#[derive(Clone, Copy, PartialEq)]
pub struct Trade {
    pub time: DateTime<Utc>,
    pub side: TradeSide,
    pub price: DecimalVec,
    pub stop_loss: DecimalVec,
    pub take_profit: DecimalVec,
}

impl Trade {
    pub fn from_record(index: usize, record: TradeRecord) -> Result<Trade, PlotError> {
        let time = parse_datetime(&record.time).ok_or(PlotError::Timestamp {
            index,
            value: record.time,
        })?;
        Ok(Trade {
            time,
            side: record.side,
            price: record.price,
            stop_loss: record.stop_loss,
            take_profit: record.take_profit,
        })
    }
}

impl fmt::Debug for Trade {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Trade")
            .field("time", &self.time.format("%Y-%m-%d %H:%M:%S").to_string())
            .field("side", &self.side)
            .field("price", &self.price)
            .field("stop_loss", &self.stop_loss)
            .field("take_profit", &self.take_profit)
            .finish()
    }
}

/// Converts every record, failing on the first bad timestamp. Order is preserved.
pub fn parse_trades(records: Vec<TradeRecord>) -> Result<Vec<Trade>, PlotError> {
    if records.is_empty() {
        return Err(PlotError::Empty);
    }
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| Trade::from_record(index, record))
        .collect()
}
