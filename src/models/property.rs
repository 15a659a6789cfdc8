use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaseVsBuyInput {
    pub property_value: f64,
    pub down_payment: f64,
    pub loan_term_years: f64,
    pub interest_rate: f64,
    /// Percent of the property value per year
    pub property_tax_rate: f64,
    /// Per year
    pub maintenance: f64,
    pub monthly_rent: f64,
    pub investment_return_rate: f64,
    pub comparison_years: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaseVsBuy {
    pub mortgage_payment: f64,
    /// Everything paid out minus the equity built
    pub total_cost_to_buy: f64,
    /// Rent plus the forgone return on the buyer's extra outlay
    pub total_cost_to_rent: f64,
    /// Positive when buying is cheaper
    pub advantage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalPropertyInput {
    pub purchase_price: f64,
    pub closing_costs: f64,
    pub down_payment: f64,
    pub interest_rate: f64,
    pub loan_term_years: f64,
    pub monthly_rent: f64,
    /// Monthly
    pub property_taxes: f64,
    /// Monthly
    pub insurance: f64,
    pub vacancy_rate: f64,
    pub maintenance_rate: f64,
    pub management_fee: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RentalPropertyAnalysis {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub mortgage_payment: f64,
    pub monthly_noi: f64,
    pub monthly_cash_flow: f64,
    pub total_investment: f64,
    pub cap_rate: f64,
    pub cash_on_cash_return: f64,
}
