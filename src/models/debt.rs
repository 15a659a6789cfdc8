use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub id: String,
    pub name: String,
    pub balance: f64,
    /// Annual percentage rate
    pub rate: f64,
    pub min_payment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationStrategy {
    /// Highest rate first
    #[default]
    Avalanche,
    /// Lowest balance first
    Snowball,
}

impl SimulationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimulationStrategy::Avalanche => "avalanche",
            SimulationStrategy::Snowball => "snowball",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "avalanche" => Some(SimulationStrategy::Avalanche),
            "snowball" => Some(SimulationStrategy::Snowball),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentEntry {
    pub debt_id: String,
    pub debt_name: String,
    pub amount_paid: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub month: u32,
    pub payments: Vec<PaymentEntry>,
    pub total_paid: f64,
    pub remaining_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPayoff {
    pub debt_id: String,
    pub debt_name: String,
    pub month: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub schedule: Vec<ScheduleRow>,
    pub total_interest: f64,
    pub total_months: u32,
    pub payoff_order: Vec<DebtPayoff>,
}

impl SimulationResult {
    /// False when the run stopped at the month cap with balance left over.
    pub fn converged(&self) -> bool {
        self.schedule
            .last()
            .map(|row| row.remaining_balance <= 0.0)
            .unwrap_or(true)
    }

    pub fn final_balance(&self) -> f64 {
        self.schedule
            .last()
            .map(|row| row.remaining_balance)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffRequest {
    pub debts: Vec<Debt>,
    #[serde(default)]
    pub extra_payment: f64,
    #[serde(default)]
    pub strategy: SimulationStrategy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategySummary {
    pub strategy: SimulationStrategy,
    pub total_months: u32,
    pub total_interest: f64,
    pub converged: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub avalanche: StrategySummary,
    pub snowball: StrategySummary,
    /// Snowball interest minus avalanche interest
    pub interest_saved: f64,
    /// Snowball months minus avalanche months
    pub months_saved: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtBreakdown {
    pub debt_id: String,
    pub debt_name: String,
    pub total_paid: f64,
    pub payoff_month: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffBreakdown {
    pub strategy: SimulationStrategy,
    pub total_debt: f64,
    pub total_minimum_payments: f64,
    pub monthly_budget: f64,
    pub total_interest: f64,
    pub total_cost: f64,
    pub total_months: u32,
    pub converged: bool,
    pub debts: Vec<DebtBreakdown>,
}

/// Most recent payoff plan, kept between commands
#[derive(Debug, Default)]
pub struct PlannerCache {
    pub request: Option<PayoffRequest>,
    pub result: Option<SimulationResult>,
}
