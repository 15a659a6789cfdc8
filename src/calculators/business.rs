use crate::models::business::{
    AdReturn, BreakEven, BreakEvenInput, ClvInput, CustomerLifetimeValue, ProfitMargin, ReturnOnInvestment,
};

pub fn return_on_investment(cost: f64, gain: f64) -> ReturnOnInvestment {
    if cost <= 0.0 {
        return ReturnOnInvestment::default();
    }
    let net_profit = gain - cost;
    ReturnOnInvestment {
        net_profit,
        roi: net_profit / cost * 100.0,
    }
}

/// Units (and revenue) needed to cover fixed costs.
pub fn break_even(input: &BreakEvenInput) -> BreakEven {
    let margin = input.sale_price_per_unit - input.variable_cost_per_unit;
    if margin <= 0.0 || input.fixed_costs <= 0.0 {
        return BreakEven::default();
    }

    let units = input.fixed_costs / margin;
    BreakEven {
        contribution_margin: margin,
        units: Some(units),
        revenue: Some(units * input.sale_price_per_unit),
    }
}

pub fn profit_margin(revenue: f64, cost: f64) -> ProfitMargin {
    if revenue <= 0.0 {
        return ProfitMargin::default();
    }
    let gross_profit = revenue - cost;
    ProfitMargin {
        gross_profit,
        gross_margin: gross_profit / revenue * 100.0,
    }
}

pub fn customer_lifetime_value(input: &ClvInput) -> CustomerLifetimeValue {
    let annual_customer_value = input.average_purchase_value * input.purchase_frequency;
    let clv = annual_customer_value * input.customer_lifespan * (input.gross_margin / 100.0);
    CustomerLifetimeValue {
        annual_customer_value,
        clv,
        net_clv: clv - input.acquisition_cost,
    }
}

/// Return on ad spend.
pub fn ad_return(spend: f64, revenue: f64) -> AdReturn {
    if spend <= 0.0 {
        return AdReturn::default();
    }
    let roas = revenue / spend;
    AdReturn {
        roas,
        roas_percentage: roas * 100.0,
        net_profit: revenue - spend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roi_is_relative_to_cost() {
        let result = return_on_investment(5000.0, 7500.0);
        assert_eq!(result.net_profit, 2500.0);
        assert_eq!(result.roi, 50.0);
        assert_eq!(return_on_investment(0.0, 7500.0), ReturnOnInvestment::default());
    }

    #[test]
    fn break_even_units_and_revenue() {
        let result = break_even(&BreakEvenInput {
            fixed_costs: 10_000.0,
            variable_cost_per_unit: 30.0,
            sale_price_per_unit: 50.0,
        });
        assert_eq!(result.contribution_margin, 20.0);
        assert_eq!(result.units, Some(500.0));
        assert_eq!(result.revenue, Some(25_000.0));
    }

    #[test]
    fn no_break_even_without_positive_margin() {
        let result = break_even(&BreakEvenInput {
            fixed_costs: 10_000.0,
            variable_cost_per_unit: 50.0,
            sale_price_per_unit: 50.0,
        });
        assert_eq!(result.units, None);
        assert_eq!(result.revenue, None);
        assert_eq!(result.contribution_margin, 0.0);
    }

    #[test]
    fn profit_margin_of_revenue() {
        let margin = profit_margin(100_000.0, 60_000.0);
        assert_eq!(margin.gross_profit, 40_000.0);
        assert_eq!(margin.gross_margin, 40.0);
        assert_eq!(profit_margin(0.0, 10.0), ProfitMargin::default());
    }

    #[test]
    fn clv_subtracts_acquisition_cost() {
        let value = customer_lifetime_value(&ClvInput {
            average_purchase_value: 150.0,
            purchase_frequency: 4.0,
            customer_lifespan: 5.0,
            gross_margin: 60.0,
            acquisition_cost: 80.0,
        });
        assert_eq!(value.annual_customer_value, 600.0);
        assert!((value.clv - 1800.0).abs() < 1e-9);
        assert!((value.net_clv - 1720.0).abs() < 1e-9);
    }

    #[test]
    fn roas_ratio_and_profit() {
        let result = ad_return(1000.0, 5000.0);
        assert_eq!(result.roas, 5.0);
        assert_eq!(result.roas_percentage, 500.0);
        assert_eq!(result.net_profit, 4000.0);
        assert_eq!(ad_return(0.0, 5000.0), AdReturn::default());
    }
}
