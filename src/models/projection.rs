use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    #[default]
    Years,
    Months,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestInput {
    pub principal: f64,
    pub rate: f64,
    pub time: u32,
    #[serde(default)]
    pub period: PeriodUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestDataPoint {
    pub period: u32,
    pub simple_interest: f64,
    pub compound_interest: f64,
    pub total_simple: f64,
    pub total_compound: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentInput {
    pub initial_investment: f64,
    pub monthly_contribution: f64,
    pub annual_rate: f64,
    pub years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentDataPoint {
    /// Elapsed years, fractional for a trailing partial year
    pub period: f64,
    pub total_invested: f64,
    pub total_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentProjection {
    pub points: Vec<InvestmentDataPoint>,
    pub total_value: f64,
    pub total_invested: f64,
    pub total_interest: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    pub annual_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementDataPoint {
    pub age: u32,
    pub total_value: f64,
    pub total_contributed: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementProjection {
    pub points: Vec<RetirementDataPoint>,
    pub total_value: f64,
    pub total_contributed: f64,
    pub total_interest: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalPlan {
    pub annual_withdrawal: f64,
    pub monthly_withdrawal: f64,
    pub is_sustainable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoalInput {
    pub target_amount: f64,
    pub initial_amount: f64,
    pub years: f64,
    pub annual_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TvmTarget {
    Fv,
    Pmt,
    Pv,
    N,
}

/// Time-value-of-money inputs; the solved field may be left empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TvmInput {
    pub n: Option<f64>,
    /// Annual interest rate in percent
    pub i: Option<f64>,
    pub pv: Option<f64>,
    pub pmt: Option<f64>,
    pub fv: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TvmSolution {
    pub target: TvmTarget,
    pub value: f64,
    pub inputs: TvmInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockPurchase {
    pub id: String,
    pub shares: f64,
    pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockAverage {
    pub average_price: f64,
    pub total_shares: f64,
    pub total_cost: f64,
}
