use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConversion {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub rate: f64,
    pub converted_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InflationAdjustment {
    pub amount: f64,
    pub start_year: i32,
    pub end_year: i32,
    pub adjusted_value: f64,
    /// Cumulative inflation between the two years, in percent
    pub inflation_rate: f64,
}
