use charming::datatype::NumericValue;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Price level as read from the trade file. Kept exact until it reaches the chart,
/// unless the number is outside the fixed-point range.
#[derive(Debug, Clone, Copy, Deserialize, PartialOrd, PartialEq)]
#[serde(untagged)]
pub enum DecimalVec {
    Exact(Decimal),
    Wide(f64),
}

impl DecimalVec {
    pub fn new(v: i32) -> Self {
        DecimalVec::Exact(Decimal::from(v))
    }

    pub fn to_f64(self) -> f64 {
        match self {
            DecimalVec::Exact(d) => d.to_f64().unwrap_or(f64::NAN),
            DecimalVec::Wide(f) => f,
        }
    }
}

impl From<DecimalVec> for NumericValue {
    fn from(n: DecimalVec) -> Self {
        NumericValue::Float(n.to_f64())
    }
}
