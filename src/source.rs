use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PlotError;
use crate::model::trade::TradeRecord;

pub trait TradeSource {
    /// Reads the whole trade collection. Nothing is kept between calls.
    fn load(&mut self) -> Result<Vec<TradeRecord>, PlotError>;
}

/// JSON array of trade records, re-read in full on every load.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TradeSource for JsonFileSource {
    fn load(&mut self) -> Result<Vec<TradeRecord>, PlotError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| PlotError::io(&self.path, e))?;
        Ok(serde_json::from_str(&raw)?)
    }
}
