use crate::calculators::{
    budget, business, conversion, horizon_months, interest, investing, loan, personal, property, MAX_HORIZON_MONTHS,
};
use crate::models::budget::*;
use crate::models::business::*;
use crate::models::conversion::{CurrencyConversion, InflationAdjustment};
use crate::models::loan::*;
use crate::models::personal::*;
use crate::models::projection::*;
use crate::models::property::*;
use serde::{Deserialize, Serialize};

/// Amounts coming over the command boundary: anything non-finite or negative is zero.
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Reject month-by-month horizons the calculators would refuse to walk.
fn require_horizon(count: u32, months_per_unit: u32, field: &str) -> Result<(), String> {
    horizon_months(count, months_per_unit)
        .map(|_| ())
        .ok_or_else(|| format!("INVALID_INPUT: {field} exceeds {MAX_HORIZON_MONTHS} months"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationArgs {
    pub amount: f64,
    /// Percent per month
    pub monthly_rate: f64,
    pub periods: u32,
    #[serde(default)]
    pub system: LoanSystem,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanComparisonArgs {
    pub loan_a: LoanTerms,
    pub loan_b: LoanTerms,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TvmArgs {
    pub target: TvmTarget,
    #[serde(flatten)]
    pub input: TvmInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalArgs {
    pub portfolio_value: f64,
    pub withdrawal_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CagrArgs {
    pub start_value: f64,
    pub end_value: f64,
    pub years: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyArgs {
    pub amount: f64,
    pub from: String,
    /// Falls back to the configured display currency
    pub to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InflationArgs {
    pub amount: f64,
    pub start_year: i32,
    /// Falls back to the latest year with an index value
    pub end_year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentValueArgs {
    pub future_value: f64,
    pub annual_rate: f64,
    pub years: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentValue {
    pub present_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiArgs {
    pub cost: f64,
    pub gain: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitMarginArgs {
    pub revenue: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdReturnArgs {
    pub spend: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryArgs {
    pub gross_salary: f64,
    #[serde(default)]
    pub other_discounts: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipArgs {
    pub bill: f64,
    pub tip_percentage: f64,
    pub people: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostOfLivingArgs {
    pub city_a: String,
    pub city_b: String,
    pub salary_a: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCardArgs {
    pub monthly_spending: f64,
    #[serde(default)]
    pub filters: CardFilters,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub monthly_contribution: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthRate {
    pub cagr: f64,
    pub years_to_double: Option<f64>,
}

pub async fn amortize_loan(args: AmortizationArgs) -> Result<AmortizationTable, String> {
    require_horizon(args.periods, 1, "periods")?;
    Ok(loan::amortize(
        non_negative(args.amount),
        non_negative(args.monthly_rate),
        args.periods,
        args.system,
    ))
}

pub async fn compare_loans(args: LoanComparisonArgs) -> Result<LoanComparison, String> {
    Ok(loan::compare_loans(&sanitize_terms(args.loan_a), &sanitize_terms(args.loan_b)))
}

pub async fn refinance_mortgage(input: RefinanceInput) -> Result<RefinanceResult, String> {
    let input = RefinanceInput {
        current_balance: non_negative(input.current_balance),
        current_monthly_payment: non_negative(input.current_monthly_payment),
        new_annual_rate: non_negative(input.new_annual_rate),
        new_term_years: non_negative(input.new_term_years),
        closing_costs: non_negative(input.closing_costs),
    };
    Ok(loan::refinance(&input))
}

pub async fn compare_interest(input: InterestInput) -> Result<Vec<InterestDataPoint>, String> {
    let months_per_period = match input.period {
        PeriodUnit::Years => 12,
        PeriodUnit::Months => 1,
    };
    require_horizon(input.time, months_per_period, "time")?;
    let input = InterestInput {
        principal: non_negative(input.principal),
        rate: non_negative(input.rate),
        ..input
    };
    Ok(interest::compare_interest(&input))
}

pub async fn solve_tvm(args: TvmArgs) -> Result<TvmSolution, String> {
    interest::solve_tvm(args.target, &args.input)
}

pub async fn project_investment(input: InvestmentInput) -> Result<InvestmentProjection, String> {
    require_horizon(input.years, 12, "years")?;
    let input = InvestmentInput {
        initial_investment: non_negative(input.initial_investment),
        monthly_contribution: non_negative(input.monthly_contribution),
        annual_rate: non_negative(input.annual_rate),
        ..input
    };
    Ok(investing::project_investment(&input))
}

pub async fn project_retirement(input: RetirementInput) -> Result<RetirementProjection, String> {
    require_horizon(
        input.retirement_age.saturating_sub(input.current_age),
        12,
        "retirement_age",
    )?;
    let input = RetirementInput {
        current_savings: non_negative(input.current_savings),
        monthly_contribution: non_negative(input.monthly_contribution),
        annual_rate: non_negative(input.annual_rate),
        ..input
    };
    Ok(investing::project_retirement(&input))
}

pub async fn plan_withdrawal(args: WithdrawalArgs) -> Result<WithdrawalPlan, String> {
    Ok(investing::withdrawal_plan(
        non_negative(args.portfolio_value),
        non_negative(args.withdrawal_rate),
    ))
}

pub async fn savings_goal(input: SavingsGoalInput) -> Result<SavingsGoal, String> {
    let input = SavingsGoalInput {
        target_amount: non_negative(input.target_amount),
        initial_amount: non_negative(input.initial_amount),
        years: non_negative(input.years),
        annual_rate: non_negative(input.annual_rate),
    };
    Ok(SavingsGoal {
        monthly_contribution: investing::savings_goal(&input),
    })
}

/// CAGR together with its rule-of-72 doubling time.
pub async fn growth_rate(args: CagrArgs) -> Result<GrowthRate, String> {
    let cagr = investing::cagr(
        non_negative(args.start_value),
        non_negative(args.end_value),
        non_negative(args.years),
    );
    Ok(GrowthRate {
        cagr,
        years_to_double: investing::rule_of_72(cagr),
    })
}

pub async fn rule_of_72(rate: f64) -> Result<Option<f64>, String> {
    Ok(investing::rule_of_72(non_negative(rate)))
}

pub async fn stock_average(purchases: Vec<StockPurchase>) -> Result<StockAverage, String> {
    Ok(investing::stock_average(&purchases))
}

pub async fn summarize_budget(categories: Vec<BudgetCategory>) -> Result<BudgetSummary, String> {
    let categories: Vec<BudgetCategory> = categories
        .into_iter()
        .map(|c| BudgetCategory {
            budgeted: non_negative(c.budgeted),
            spent: non_negative(c.spent),
            ..c
        })
        .collect();
    Ok(budget::summarize_budget(&categories))
}

pub async fn summarize_ledger(transactions: Vec<Transaction>) -> Result<LedgerSummary, String> {
    let transactions: Vec<Transaction> = transactions
        .into_iter()
        .map(|t| Transaction {
            amount: non_negative(t.amount),
            ..t
        })
        .collect();
    Ok(budget::summarize_ledger(&transactions))
}

pub async fn emergency_fund(monthly_expenses: f64) -> Result<EmergencyFund, String> {
    Ok(budget::emergency_fund(non_negative(monthly_expenses)))
}

pub async fn convert_currency(data_dir: String, args: CurrencyArgs) -> Result<CurrencyConversion, String> {
    let to = match args.to {
        Some(code) => code,
        None => crate::commands::settings::load_effective_settings(&data_dir)?.display_currency,
    };
    conversion::convert_currency(args.amount, &args.from, &to)
}

pub async fn adjust_for_inflation(args: InflationArgs) -> Result<InflationAdjustment, String> {
    let end_year = args.end_year.unwrap_or_else(conversion::latest_cpi_year);
    Ok(conversion::adjust_for_inflation(
        non_negative(args.amount),
        args.start_year,
        end_year,
    ))
}

pub async fn present_value(args: PresentValueArgs) -> Result<PresentValue, String> {
    Ok(PresentValue {
        present_value: interest::present_value(
            non_negative(args.future_value),
            non_negative(args.annual_rate),
            non_negative(args.years),
        ),
    })
}

pub async fn return_on_investment(args: RoiArgs) -> Result<ReturnOnInvestment, String> {
    Ok(business::return_on_investment(non_negative(args.cost), non_negative(args.gain)))
}

pub async fn break_even(input: BreakEvenInput) -> Result<BreakEven, String> {
    Ok(business::break_even(&BreakEvenInput {
        fixed_costs: non_negative(input.fixed_costs),
        variable_cost_per_unit: non_negative(input.variable_cost_per_unit),
        sale_price_per_unit: non_negative(input.sale_price_per_unit),
    }))
}

pub async fn profit_margin(args: ProfitMarginArgs) -> Result<ProfitMargin, String> {
    Ok(business::profit_margin(non_negative(args.revenue), non_negative(args.cost)))
}

pub async fn customer_lifetime_value(input: ClvInput) -> Result<CustomerLifetimeValue, String> {
    Ok(business::customer_lifetime_value(&ClvInput {
        average_purchase_value: non_negative(input.average_purchase_value),
        purchase_frequency: non_negative(input.purchase_frequency),
        customer_lifespan: non_negative(input.customer_lifespan),
        gross_margin: non_negative(input.gross_margin),
        acquisition_cost: non_negative(input.acquisition_cost),
    }))
}

pub async fn ad_return(args: AdReturnArgs) -> Result<AdReturn, String> {
    Ok(business::ad_return(non_negative(args.spend), non_negative(args.revenue)))
}

pub async fn net_salary(args: SalaryArgs) -> Result<SalaryBreakdown, String> {
    Ok(personal::net_salary(
        non_negative(args.gross_salary),
        non_negative(args.other_discounts),
    ))
}

pub async fn split_tip(args: TipArgs) -> Result<TipSplit, String> {
    Ok(personal::split_tip(
        non_negative(args.bill),
        non_negative(args.tip_percentage),
        args.people,
    ))
}

pub async fn compare_cost_of_living(args: CostOfLivingArgs) -> Result<CostOfLivingComparison, String> {
    personal::compare_cost_of_living(&args.city_a, &args.city_b, non_negative(args.salary_a))
}

pub async fn rank_credit_cards(args: CreditCardArgs) -> Result<Vec<RankedCard>, String> {
    Ok(personal::rank_credit_cards(non_negative(args.monthly_spending), args.filters))
}

pub async fn lease_vs_buy(input: LeaseVsBuyInput) -> Result<LeaseVsBuy, String> {
    require_horizon(input.comparison_years, 12, "comparison_years")?;
    let input = LeaseVsBuyInput {
        property_value: non_negative(input.property_value),
        down_payment: non_negative(input.down_payment),
        loan_term_years: non_negative(input.loan_term_years),
        interest_rate: non_negative(input.interest_rate),
        property_tax_rate: non_negative(input.property_tax_rate),
        maintenance: non_negative(input.maintenance),
        monthly_rent: non_negative(input.monthly_rent),
        investment_return_rate: non_negative(input.investment_return_rate),
        ..input
    };
    Ok(property::lease_vs_buy(&input))
}

pub async fn rental_property(input: RentalPropertyInput) -> Result<RentalPropertyAnalysis, String> {
    Ok(property::rental_property(&RentalPropertyInput {
        purchase_price: non_negative(input.purchase_price),
        closing_costs: non_negative(input.closing_costs),
        down_payment: non_negative(input.down_payment),
        interest_rate: non_negative(input.interest_rate),
        loan_term_years: non_negative(input.loan_term_years),
        monthly_rent: non_negative(input.monthly_rent),
        property_taxes: non_negative(input.property_taxes),
        insurance: non_negative(input.insurance),
        vacancy_rate: non_negative(input.vacancy_rate),
        maintenance_rate: non_negative(input.maintenance_rate),
        management_fee: non_negative(input.management_fee),
    }))
}

fn sanitize_terms(terms: LoanTerms) -> LoanTerms {
    LoanTerms {
        amount: non_negative(terms.amount),
        annual_rate: non_negative(terms.annual_rate),
        term_years: non_negative(terms.term_years),
    }
}
