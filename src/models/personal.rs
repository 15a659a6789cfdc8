use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    pub gross_salary: f64,
    /// Social security (INSS)
    pub inss: f64,
    /// Withheld income tax (IRRF)
    pub irrf: f64,
    pub other_discounts: f64,
    pub total_discounts: f64,
    pub net_salary: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TipSplit {
    pub tip_amount: f64,
    pub total_amount: f64,
    pub per_person: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CityCost {
    pub index: f64,
    pub rent_index: f64,
    pub groceries_index: f64,
    pub restaurant_index: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostOfLivingComparison {
    pub city_a: String,
    pub city_b: String,
    pub salary_a: f64,
    pub equivalent_salary_b: f64,
    pub cost_a: CityCost,
    pub cost_b: CityCost,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCard {
    pub id: u32,
    pub name: String,
    pub issuer: String,
    pub brand: String,
    pub annuity: f64,
    /// Percent of spending returned
    pub cashback: Option<f64>,
    pub miles_per_dollar: Option<f64>,
    pub benefits: Vec<String>,
    pub min_income: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFilters {
    #[serde(default)]
    pub no_annuity: bool,
    #[serde(default)]
    pub has_cashback: bool,
    #[serde(default)]
    pub has_miles: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCard {
    pub card: CreditCard,
    pub annual_cashback: f64,
    pub annual_miles_value: f64,
    /// Yearly rewards minus the annuity
    pub total_advantage: f64,
}
