use crate::calculators::horizon_months;
use crate::models::projection::{
    InvestmentDataPoint, InvestmentInput, InvestmentProjection, RetirementDataPoint, RetirementInput,
    RetirementProjection, SavingsGoalInput, StockAverage, StockPurchase, WithdrawalPlan,
};

/// Withdrawal rates above this are flagged as unsustainable
const SUSTAINABLE_WITHDRAWAL_RATE: f64 = 7.0;

/// Monthly compounding with an end-of-month contribution.
/// Past the maximum horizon only the starting point is reported.
pub fn project_investment(input: &InvestmentInput) -> InvestmentProjection {
    let monthly_rate = input.annual_rate / 100.0 / 12.0;
    let total_months = horizon_months(input.years, 12).unwrap_or(0);

    let mut value = input.initial_investment;
    let mut invested = input.initial_investment;
    let mut points = vec![InvestmentDataPoint {
        period: 0.0,
        total_invested: invested,
        total_value: value,
    }];

    for month in 1..=total_months {
        value *= 1.0 + monthly_rate;
        value += input.monthly_contribution;
        invested += input.monthly_contribution;

        if month % 12 == 0 || month == total_months {
            points.push(InvestmentDataPoint {
                period: month as f64 / 12.0,
                total_invested: invested,
                total_value: value,
            });
        }
    }

    InvestmentProjection {
        points,
        total_value: value,
        total_invested: invested,
        total_interest: value - invested,
    }
}

/// Yearly balances from the current age up to retirement.
/// Empty when retirement is not ahead or is past the maximum horizon.
pub fn project_retirement(input: &RetirementInput) -> RetirementProjection {
    let working_years = input.retirement_age.saturating_sub(input.current_age);
    if working_years == 0 || horizon_months(working_years, 12).is_none() {
        return RetirementProjection {
            points: Vec::new(),
            total_value: input.current_savings,
            total_contributed: input.current_savings,
            total_interest: 0.0,
        };
    }

    let monthly_rate = input.annual_rate / 100.0 / 12.0;
    let mut value = input.current_savings;
    let mut contributed = input.current_savings;
    let mut points = vec![RetirementDataPoint {
        age: input.current_age,
        total_value: value,
        total_contributed: contributed,
    }];

    for age in (input.current_age + 1)..=input.retirement_age {
        for _ in 0..12 {
            value = value * (1.0 + monthly_rate) + input.monthly_contribution;
            contributed += input.monthly_contribution;
        }
        points.push(RetirementDataPoint {
            age,
            total_value: value,
            total_contributed: contributed,
        });
    }

    RetirementProjection {
        points,
        total_value: value,
        total_contributed: contributed,
        total_interest: value - contributed,
    }
}

pub fn withdrawal_plan(portfolio_value: f64, withdrawal_rate: f64) -> WithdrawalPlan {
    let annual_withdrawal = portfolio_value * (withdrawal_rate / 100.0);
    WithdrawalPlan {
        annual_withdrawal,
        monthly_withdrawal: annual_withdrawal / 12.0,
        is_sustainable: withdrawal_rate <= SUSTAINABLE_WITHDRAWAL_RATE,
    }
}

/// Monthly deposit needed to reach the target. None when the horizon is empty.
pub fn savings_goal(input: &SavingsGoalInput) -> Option<f64> {
    if input.target_amount <= input.initial_amount {
        return Some(0.0);
    }
    if input.years <= 0.0 {
        return None;
    }

    let monthly_rate = input.annual_rate / 100.0 / 12.0;
    let months = input.years * 12.0;
    if monthly_rate == 0.0 {
        return Some((input.target_amount - input.initial_amount) / months);
    }

    let growth = (1.0 + monthly_rate).powf(months);
    let future_initial = input.initial_amount * growth;
    let payment = (input.target_amount - future_initial) / ((growth - 1.0) / monthly_rate);
    Some(payment.max(0.0))
}

/// Compound annual growth rate, in percent
pub fn cagr(start_value: f64, end_value: f64, years: f64) -> f64 {
    if start_value <= 0.0 || end_value <= 0.0 || years <= 0.0 {
        return 0.0;
    }
    ((end_value / start_value).powf(1.0 / years) - 1.0) * 100.0
}

/// Years to double at `rate` percent. None for non-positive rates.
pub fn rule_of_72(rate: f64) -> Option<f64> {
    (rate > 0.0).then(|| 72.0 / rate)
}

pub fn stock_average(purchases: &[StockPurchase]) -> StockAverage {
    let valid: Vec<&StockPurchase> = purchases
        .iter()
        .filter(|p| p.shares > 0.0 && p.price > 0.0)
        .collect();
    if valid.is_empty() {
        return StockAverage::default();
    }

    let total_cost: f64 = valid.iter().map(|p| p.shares * p.price).sum();
    let total_shares: f64 = valid.iter().map(|p| p.shares).sum();

    StockAverage {
        average_price: total_cost / total_shares,
        total_shares,
        total_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn investment_points_are_yearly_with_initial_point() {
        let projection = project_investment(&InvestmentInput {
            initial_investment: 1000.0,
            monthly_contribution: 100.0,
            annual_rate: 0.0,
            years: 2,
        });

        assert_eq!(projection.points.len(), 3);
        assert_eq!(projection.points[0].period, 0.0);
        assert_eq!(projection.points[2].period, 2.0);
        assert_eq!(projection.total_invested, 3400.0);
        assert_eq!(projection.total_value, 3400.0);
        assert_eq!(projection.total_interest, 0.0);
    }

    #[test]
    fn investment_growth_compounds_before_contribution() {
        let projection = project_investment(&InvestmentInput {
            initial_investment: 1000.0,
            monthly_contribution: 0.0,
            annual_rate: 12.0,
            years: 1,
        });
        assert!((projection.total_value - 1126.825).abs() < 1e-3);
        assert!(projection.total_interest > 0.0);
    }

    #[test]
    fn retirement_projection_spans_working_years() {
        let projection = project_retirement(&RetirementInput {
            current_age: 30,
            retirement_age: 33,
            current_savings: 1000.0,
            monthly_contribution: 100.0,
            annual_rate: 7.0,
        });

        assert_eq!(projection.points.len(), 4);
        assert_eq!(projection.points[0].age, 30);
        assert_eq!(projection.points[3].age, 33);
        assert_eq!(projection.total_contributed, 1000.0 + 36.0 * 100.0);
        assert!(projection.total_interest > 0.0);
    }

    #[test]
    fn retirement_in_the_past_has_no_points() {
        let projection = project_retirement(&RetirementInput {
            current_age: 70,
            retirement_age: 65,
            current_savings: 5000.0,
            monthly_contribution: 100.0,
            annual_rate: 7.0,
        });
        assert!(projection.points.is_empty());
        assert_eq!(projection.total_value, 5000.0);
    }

    #[test]
    fn horizons_past_the_limit_do_not_iterate() {
        let investment = project_investment(&InvestmentInput {
            initial_investment: 1000.0,
            monthly_contribution: 100.0,
            annual_rate: 5.0,
            years: u32::MAX,
        });
        assert_eq!(investment.points.len(), 1);
        assert_eq!(investment.total_value, 1000.0);

        let retirement = project_retirement(&RetirementInput {
            current_age: 0,
            retirement_age: u32::MAX,
            current_savings: 500.0,
            monthly_contribution: 100.0,
            annual_rate: 5.0,
        });
        assert!(retirement.points.is_empty());
        assert_eq!(retirement.total_value, 500.0);
    }

    #[test]
    fn four_percent_withdrawal_is_sustainable() {
        let plan = withdrawal_plan(1_000_000.0, 4.0);
        assert!((plan.annual_withdrawal - 40_000.0).abs() < 1e-6);
        assert!((plan.monthly_withdrawal - 40_000.0 / 12.0).abs() < 1e-6);
        assert!(plan.is_sustainable);
        assert!(!withdrawal_plan(1_000_000.0, 8.0).is_sustainable);
    }

    #[test]
    fn savings_goal_edge_cases() {
        let met = SavingsGoalInput {
            target_amount: 100.0,
            initial_amount: 200.0,
            years: 5.0,
            annual_rate: 5.0,
        };
        assert_eq!(savings_goal(&met), Some(0.0));

        let no_time = SavingsGoalInput { years: 0.0, initial_amount: 0.0, ..met.clone() };
        assert_eq!(savings_goal(&no_time), None);

        let linear = SavingsGoalInput {
            target_amount: 1300.0,
            initial_amount: 100.0,
            years: 1.0,
            annual_rate: 0.0,
        };
        assert_eq!(savings_goal(&linear), Some(100.0));
    }

    #[test]
    fn savings_goal_deposit_reaches_target() {
        let input = SavingsGoalInput {
            target_amount: 100_000.0,
            initial_amount: 5000.0,
            years: 10.0,
            annual_rate: 8.0,
        };
        let deposit = savings_goal(&input).expect("deposit");

        let projection = project_investment(&InvestmentInput {
            initial_investment: 5000.0,
            monthly_contribution: deposit,
            annual_rate: 8.0,
            years: 10,
        });
        assert!((projection.total_value - 100_000.0).abs() < 1e-4);
    }

    #[test]
    fn cagr_and_rule_of_72() {
        assert!((cagr(10_000.0, 50_000.0, 5.0) - 37.97).abs() < 0.01);
        assert_eq!(cagr(0.0, 50_000.0, 5.0), 0.0);
        assert_eq!(rule_of_72(8.0), Some(9.0));
        assert_eq!(rule_of_72(0.0), None);
    }

    #[test]
    fn stock_average_ignores_empty_purchases() {
        let purchases = vec![
            StockPurchase { id: "1".into(), shares: 100.0, price: 10.5 },
            StockPurchase { id: "2".into(), shares: 50.0, price: 12.0 },
            StockPurchase { id: "3".into(), shares: 0.0, price: 99.0 },
        ];
        let average = stock_average(&purchases);

        assert_eq!(average.total_shares, 150.0);
        assert_eq!(average.total_cost, 1650.0);
        assert!((average.average_price - 11.0).abs() < 1e-9);
        assert_eq!(stock_average(&[]), StockAverage::default());
    }
}
