pub mod decimal;
pub mod trade;
