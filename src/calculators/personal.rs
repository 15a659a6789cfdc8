use crate::models::personal::{
    CardFilters, CityCost, CostOfLivingComparison, CreditCard, RankedCard, SalaryBreakdown, TipSplit,
};
use std::cmp::Ordering;

/// INSS: (upper bound of the gross salary, flat rate). Above the last bound the cap applies.
const INSS_BRACKETS: &[(f64, f64)] = &[(1412.0, 0.075), (2666.68, 0.09), (4000.03, 0.12), (7786.02, 0.14)];
const INSS_CAP: f64 = 908.85;

/// IRRF: (lower bound of the taxable base, rate, deduction), highest first.
const IRRF_BRACKETS: &[(f64, f64, f64)] = &[
    (4664.68, 0.275, 896.00),
    (3751.05, 0.225, 662.77),
    (2826.65, 0.15, 381.44),
    (2259.20, 0.075, 169.44),
];

const CITY_COSTS: &[(&str, CityCost)] = &[
    ("São Paulo", CityCost { index: 100.0, rent_index: 100.0, groceries_index: 100.0, restaurant_index: 100.0 }),
    ("Rio de Janeiro", CityCost { index: 95.5, rent_index: 92.3, groceries_index: 98.1, restaurant_index: 94.0 }),
    ("Belo Horizonte", CityCost { index: 80.1, rent_index: 70.5, groceries_index: 82.3, restaurant_index: 78.9 }),
    ("Curitiba", CityCost { index: 78.5, rent_index: 68.0, groceries_index: 80.5, restaurant_index: 75.6 }),
    ("Brasília", CityCost { index: 92.0, rent_index: 95.2, groceries_index: 90.1, restaurant_index: 93.4 }),
    ("Porto Alegre", CityCost { index: 82.3, rent_index: 72.1, groceries_index: 85.0, restaurant_index: 81.2 }),
];

/// BRL per USD used to turn spending into miles
const DOLLAR_RATE_BRL: f64 = 5.4;
const MILE_VALUE_BRL: f64 = 0.07;

/// Monthly net pay after INSS, IRRF and other discounts.
pub fn net_salary(gross_salary: f64, other_discounts: f64) -> SalaryBreakdown {
    let inss = INSS_BRACKETS
        .iter()
        .find(|(ceiling, _)| gross_salary <= *ceiling)
        .map(|(_, rate)| gross_salary * rate)
        .unwrap_or(INSS_CAP);

    let taxable = gross_salary - inss;
    let irrf = IRRF_BRACKETS
        .iter()
        .find(|(floor, _, _)| taxable > *floor)
        .map(|(_, rate, deduction)| taxable * rate - deduction)
        .unwrap_or(0.0)
        .max(0.0);

    let total_discounts = inss + irrf + other_discounts;
    SalaryBreakdown {
        gross_salary,
        inss,
        irrf,
        other_discounts,
        total_discounts,
        net_salary: gross_salary - total_discounts,
    }
}

pub fn split_tip(bill: f64, tip_percentage: f64, people: u32) -> TipSplit {
    if bill <= 0.0 {
        return TipSplit::default();
    }
    let tip_amount = bill * (tip_percentage / 100.0);
    let total_amount = bill + tip_amount;
    TipSplit {
        tip_amount,
        total_amount,
        per_person: if people > 0 { total_amount / f64::from(people) } else { 0.0 },
    }
}

pub fn cities() -> Vec<&'static str> {
    CITY_COSTS.iter().map(|(name, _)| *name).collect()
}

pub fn city_cost(city: &str) -> Option<CityCost> {
    CITY_COSTS
        .iter()
        .find(|(name, _)| *name == city)
        .map(|(_, cost)| *cost)
}

/// Salary in `city_b` with the same purchasing power as `salary_a` in `city_a`.
pub fn compare_cost_of_living(city_a: &str, city_b: &str, salary_a: f64) -> Result<CostOfLivingComparison, String> {
    let cost_a = city_cost(city_a).ok_or(format!("UNKNOWN_CITY: {city_a}"))?;
    let cost_b = city_cost(city_b).ok_or(format!("UNKNOWN_CITY: {city_b}"))?;

    let equivalent_salary_b = if cost_a.index > 0.0 {
        salary_a * (cost_b.index / cost_a.index)
    } else {
        0.0
    };

    Ok(CostOfLivingComparison {
        city_a: city_a.to_string(),
        city_b: city_b.to_string(),
        salary_a,
        equivalent_salary_b,
        cost_a,
        cost_b,
    })
}

pub fn credit_card_catalog() -> Vec<CreditCard> {
    let card = |id: u32,
                name: &str,
                issuer: &str,
                brand: &str,
                annuity: f64,
                cashback: Option<f64>,
                miles_per_dollar: Option<f64>,
                benefits: &[&str],
                min_income: f64| CreditCard {
        id,
        name: name.to_string(),
        issuer: issuer.to_string(),
        brand: brand.to_string(),
        annuity,
        cashback,
        miles_per_dollar,
        benefits: benefits.iter().map(|b| b.to_string()).collect(),
        min_income,
    };

    vec![
        card(1, "Platinum Card", "BankFin", "Visa", 350.0, Some(1.5), None,
            &["Seguro Viagem", "Acesso VIP Lounge"], 5000.0),
        card(2, "Digital Gold", "NeoBank", "Mastercard", 0.0, Some(1.0), None,
            &["Sem anuidade", "Conta Digital"], 1500.0),
        card(3, "Infinite Miles", "AirTravel", "Visa", 1200.0, None, Some(2.5),
            &["Milhas em Dobro", "Acesso VIP Lounge", "Concierge"], 15000.0),
        card(4, "Essencial", "CrediBank", "Elo", 120.0, None, None,
            &["Aceitação Nacional", "Programa de Pontos"], 2000.0),
        card(5, "Rewards Plus", "BankFin", "Mastercard", 0.0, None, Some(1.0),
            &["Sem anuidade", "Pontos que não expiram"], 2500.0),
        card(6, "Ultimate Black", "Prestige Cards", "Amex", 4500.0, Some(2.5), Some(3.0),
            &["Acesso Ilimitado a Lounges", "Concierge Pessoal", "Seguros Premium"], 30000.0),
    ]
}

/// Catalog cards passing `filters`, best yearly advantage first.
pub fn rank_credit_cards(monthly_spending: f64, filters: CardFilters) -> Vec<RankedCard> {
    let annual_spending = monthly_spending * 12.0;

    let mut ranked: Vec<RankedCard> = credit_card_catalog()
        .into_iter()
        .filter(|card| !(filters.no_annuity && card.annuity > 0.0))
        .filter(|card| !(filters.has_cashback && card.cashback.is_none()))
        .filter(|card| !(filters.has_miles && card.miles_per_dollar.is_none()))
        .map(|card| {
            let annual_cashback = card.cashback.map_or(0.0, |pct| annual_spending * pct / 100.0);
            let annual_miles_value = card
                .miles_per_dollar
                .map_or(0.0, |miles| annual_spending / DOLLAR_RATE_BRL * miles * MILE_VALUE_BRL);
            let total_advantage = annual_cashback + annual_miles_value - card.annuity;
            RankedCard {
                card,
                annual_cashback,
                annual_miles_value,
                total_advantage,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.total_advantage
            .partial_cmp(&a.total_advantage)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_in_the_middle_brackets() {
        let pay = net_salary(5000.0, 0.0);
        assert!((pay.inss - 700.0).abs() < 1e-9);
        assert!((pay.irrf - 304.73).abs() < 1e-6);
        assert!((pay.net_salary - 3995.27).abs() < 1e-6);
    }

    #[test]
    fn low_salary_is_exempt_from_income_tax() {
        let pay = net_salary(1000.0, 50.0);
        assert_eq!(pay.inss, 75.0);
        assert_eq!(pay.irrf, 0.0);
        assert_eq!(pay.total_discounts, 125.0);
        assert_eq!(pay.net_salary, 875.0);
    }

    #[test]
    fn high_salary_hits_the_inss_cap() {
        let pay = net_salary(10_000.0, 0.0);
        assert_eq!(pay.inss, INSS_CAP);
        assert!((pay.irrf - (9091.15 * 0.275 - 896.0)).abs() < 1e-6);
    }

    #[test]
    fn tip_split_between_people() {
        let split = split_tip(100.0, 15.0, 4);
        assert!((split.tip_amount - 15.0).abs() < 1e-9);
        assert!((split.total_amount - 115.0).abs() < 1e-9);
        assert!((split.per_person - 28.75).abs() < 1e-9);

        assert_eq!(split_tip(100.0, 10.0, 0).per_person, 0.0);
        assert_eq!(split_tip(0.0, 10.0, 2), TipSplit::default());
    }

    #[test]
    fn equivalent_salary_scales_by_index() {
        let comparison = compare_cost_of_living("São Paulo", "Rio de Janeiro", 5000.0).expect("compare");
        assert!((comparison.equivalent_salary_b - 4775.0).abs() < 1e-9);
        assert_eq!(comparison.cost_b.rent_index, 92.3);

        let err = compare_cost_of_living("Atlantis", "Curitiba", 5000.0).unwrap_err();
        assert_eq!(err, "UNKNOWN_CITY: Atlantis");
        assert_eq!(cities().len(), 6);
    }

    #[test]
    fn cards_rank_by_yearly_advantage() {
        let ranked = rank_credit_cards(4000.0, CardFilters::default());
        let ids: Vec<u32> = ranked.iter().map(|r| r.card.id).collect();
        assert_eq!(ids, vec![5, 2, 1, 3, 4, 6]);
        assert!((ranked[0].total_advantage - 48_000.0 / 5.4 * 0.07).abs() < 1e-6);
        assert_eq!(ranked[1].annual_cashback, 480.0);
    }

    #[test]
    fn card_filters_combine() {
        let ids = |filters: CardFilters| -> Vec<u32> {
            let mut ids: Vec<u32> = rank_credit_cards(4000.0, filters).iter().map(|r| r.card.id).collect();
            ids.sort();
            ids
        };

        assert_eq!(ids(CardFilters { no_annuity: true, ..CardFilters::default() }), vec![2, 5]);
        assert_eq!(ids(CardFilters { has_cashback: true, ..CardFilters::default() }), vec![1, 2, 6]);
        assert_eq!(ids(CardFilters { has_miles: true, ..CardFilters::default() }), vec![3, 5, 6]);
        assert_eq!(
            ids(CardFilters { has_cashback: true, has_miles: true, no_annuity: false }),
            vec![6]
        );
    }
}
