use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoanSystem {
    /// Fixed installment
    #[default]
    Price,
    /// Constant amortization
    Sac,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    pub installment: u32,
    pub payment: f64,
    pub interest: f64,
    pub amortization: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AmortizationSummary {
    pub first_payment: f64,
    pub last_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationTable {
    pub system: LoanSystem,
    pub entries: Vec<AmortizationEntry>,
    pub summary: AmortizationSummary,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LoanTerms {
    pub amount: f64,
    pub annual_rate: f64,
    pub term_years: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanCost {
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanChoice {
    A,
    B,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanComparison {
    pub loan_a: LoanCost,
    pub loan_b: LoanCost,
    pub better_option: Option<LoanChoice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinanceInput {
    pub current_balance: f64,
    pub current_monthly_payment: f64,
    pub new_annual_rate: f64,
    pub new_term_years: f64,
    pub closing_costs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinanceResult {
    pub new_monthly_payment: f64,
    pub monthly_savings: f64,
    /// None when the new loan never pays back its closing costs
    pub break_even_months: Option<f64>,
}
