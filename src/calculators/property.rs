use crate::calculators::{horizon_months, loan};
use crate::models::property::{LeaseVsBuy, LeaseVsBuyInput, RentalPropertyAnalysis, RentalPropertyInput};

/// Monthly mortgage payment; zero when nothing is borrowed.
fn mortgage_payment(loan_amount: f64, annual_rate: f64, term_years: f64) -> f64 {
    let periods = term_years * 12.0;
    if loan_amount <= 0.0 || periods <= 0.0 {
        return 0.0;
    }
    let rate = annual_rate / 100.0 / 12.0;
    if rate == 0.0 {
        return loan_amount / periods;
    }
    loan::fixed_installment(loan_amount, rate, periods)
}

/// Total cost of buying versus renting over `comparison_years`, ignoring appreciation.
///
/// Horizons past [`crate::calculators::MAX_HORIZON_MONTHS`] give the zero result.
pub fn lease_vs_buy(input: &LeaseVsBuyInput) -> LeaseVsBuy {
    let Some(months) = horizon_months(input.comparison_years, 12) else {
        return LeaseVsBuy::default();
    };

    let loan_amount = input.property_value - input.down_payment;
    let monthly_rate = input.interest_rate / 100.0 / 12.0;
    let mortgage = mortgage_payment(loan_amount, input.interest_rate, input.loan_term_years);
    let owner_monthly_cost =
        mortgage + input.property_value * (input.property_tax_rate / 100.0) / 12.0 + input.maintenance / 12.0;
    let investment_growth = 1.0 + input.investment_return_rate / 100.0 / 12.0;

    let mut cost_to_buy = input.down_payment;
    let mut equity = input.down_payment;
    let mut rent_paid = 0.0;
    let mut opportunity_cost = 0.0;

    for _ in 0..months {
        cost_to_buy += owner_monthly_cost;

        if loan_amount > 0.0 {
            let outstanding = loan_amount - (equity - input.down_payment);
            equity += mortgage - outstanding * monthly_rate;
        }

        rent_paid += input.monthly_rent;
        // the renter invests the down payment (spread over the horizon) and what the owner pays beyond rent
        opportunity_cost = (opportunity_cost
            + input.down_payment / f64::from(months)
            + (owner_monthly_cost - input.monthly_rent))
            * investment_growth;
    }

    let total_cost_to_buy = cost_to_buy - equity;
    let total_cost_to_rent = rent_paid + opportunity_cost;
    LeaseVsBuy {
        mortgage_payment: mortgage,
        total_cost_to_buy,
        total_cost_to_rent,
        advantage: total_cost_to_rent - total_cost_to_buy,
    }
}

pub fn rental_property(input: &RentalPropertyInput) -> RentalPropertyAnalysis {
    let loan_amount = input.purchase_price - input.down_payment;
    let total_investment = input.down_payment + input.closing_costs;

    let gross_rent = input.monthly_rent;
    let monthly_income = gross_rent - gross_rent * (input.vacancy_rate / 100.0);

    let mortgage = mortgage_payment(loan_amount, input.interest_rate, input.loan_term_years);
    let operating_expenses = input.property_taxes
        + input.insurance
        + gross_rent * (input.maintenance_rate / 100.0)
        + gross_rent * (input.management_fee / 100.0);

    let monthly_noi = monthly_income - operating_expenses;
    let monthly_expenses = operating_expenses + mortgage;
    let monthly_cash_flow = monthly_income - monthly_expenses;

    RentalPropertyAnalysis {
        monthly_income,
        monthly_expenses,
        mortgage_payment: mortgage,
        monthly_noi,
        monthly_cash_flow,
        total_investment,
        cap_rate: finite_or_zero(monthly_noi * 12.0 / input.purchase_price * 100.0),
        cash_on_cash_return: finite_or_zero(monthly_cash_flow * 12.0 / total_investment * 100.0),
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cash_purchase() -> LeaseVsBuyInput {
        LeaseVsBuyInput {
            property_value: 100_000.0,
            down_payment: 100_000.0,
            loan_term_years: 30.0,
            interest_rate: 8.0,
            property_tax_rate: 0.0,
            maintenance: 1200.0,
            monthly_rent: 500.0,
            investment_return_rate: 0.0,
            comparison_years: 1,
        }
    }

    #[test]
    fn cash_purchase_without_returns() {
        let result = lease_vs_buy(&cash_purchase());

        assert_eq!(result.mortgage_payment, 0.0);
        assert!((result.total_cost_to_buy - 1200.0).abs() < 1e-6);
        // rent 6000 + down payment 100000 + 12 * (100 - 500)
        assert!((result.total_cost_to_rent - 101_200.0).abs() < 1e-6);
        assert!((result.advantage - 100_000.0).abs() < 1e-6);
    }

    #[test]
    fn financed_purchase_builds_equity() {
        let input = LeaseVsBuyInput {
            down_payment: 20_000.0,
            comparison_years: 5,
            ..cash_purchase()
        };
        let result = lease_vs_buy(&input);

        let expected_payment = loan::fixed_installment(80_000.0, 0.08 / 12.0, 360.0);
        assert!((result.mortgage_payment - expected_payment).abs() < 1e-9);
        // paid out minus equity is less than everything paid out
        let paid_out = 20_000.0 + 60.0 * (expected_payment + 100.0);
        assert!(result.total_cost_to_buy < paid_out - 20_000.0);
    }

    #[test]
    fn oversized_comparison_horizon_is_empty() {
        let input = LeaseVsBuyInput {
            comparison_years: u32::MAX,
            ..cash_purchase()
        };
        assert_eq!(lease_vs_buy(&input), LeaseVsBuy::default());

        let zero = LeaseVsBuyInput {
            comparison_years: 0,
            ..cash_purchase()
        };
        assert_eq!(lease_vs_buy(&zero).total_cost_to_rent, 0.0);
    }

    #[test]
    fn rental_metrics() {
        let analysis = rental_property(&RentalPropertyInput {
            purchase_price: 300_000.0,
            closing_costs: 9000.0,
            down_payment: 60_000.0,
            interest_rate: 7.5,
            loan_term_years: 30.0,
            monthly_rent: 2500.0,
            property_taxes: 300.0,
            insurance: 100.0,
            vacancy_rate: 5.0,
            maintenance_rate: 8.0,
            management_fee: 10.0,
        });

        assert!((analysis.monthly_income - 2375.0).abs() < 1e-9);
        assert!((analysis.monthly_noi - 1525.0).abs() < 1e-9);
        assert!((analysis.cap_rate - 6.1).abs() < 1e-9);
        assert_eq!(analysis.total_investment, 69_000.0);
        assert!(analysis.mortgage_payment > 1678.0 && analysis.mortgage_payment < 1679.0);
        assert!((analysis.monthly_cash_flow - (analysis.monthly_income - analysis.monthly_expenses)).abs() < 1e-9);
        assert!(analysis.cash_on_cash_return < 0.0);
    }

    #[test]
    fn rental_ratios_are_zero_without_a_price() {
        let analysis = rental_property(&RentalPropertyInput {
            purchase_price: 0.0,
            closing_costs: 0.0,
            down_payment: 0.0,
            interest_rate: 0.0,
            loan_term_years: 0.0,
            monthly_rent: 1000.0,
            property_taxes: 0.0,
            insurance: 0.0,
            vacancy_rate: 0.0,
            maintenance_rate: 0.0,
            management_fee: 0.0,
        });
        assert_eq!(analysis.cap_rate, 0.0);
        assert_eq!(analysis.cash_on_cash_return, 0.0);
        assert_eq!(analysis.monthly_cash_flow, 1000.0);
    }
}
