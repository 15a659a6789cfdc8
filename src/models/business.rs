use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnOnInvestment {
    pub net_profit: f64,
    /// Percent of the cost
    pub roi: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakEvenInput {
    pub fixed_costs: f64,
    pub variable_cost_per_unit: f64,
    pub sale_price_per_unit: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakEven {
    pub contribution_margin: f64,
    /// None when each sale does not cover its own variable cost
    pub units: Option<f64>,
    pub revenue: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfitMargin {
    pub gross_profit: f64,
    pub gross_margin: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClvInput {
    pub average_purchase_value: f64,
    /// Purchases per year
    pub purchase_frequency: f64,
    /// Years
    pub customer_lifespan: f64,
    /// Percent
    pub gross_margin: f64,
    pub acquisition_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerLifetimeValue {
    pub annual_customer_value: f64,
    pub clv: f64,
    pub net_clv: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdReturn {
    pub roas: f64,
    pub roas_percentage: f64,
    pub net_profit: f64,
}
