use crate::calculators::MAX_HORIZON_MONTHS;
use crate::models::loan::{
    AmortizationEntry, AmortizationSummary, AmortizationTable, LoanChoice, LoanComparison,
    LoanCost, LoanSystem, LoanTerms, RefinanceInput, RefinanceResult,
};

/// Build the installment table for a loan.
/// `monthly_rate` is a percentage per month; empty when any input is non-positive
/// or `periods` is past the maximum horizon.
pub fn amortize(amount: f64, monthly_rate: f64, periods: u32, system: LoanSystem) -> AmortizationTable {
    let rate = monthly_rate / 100.0;
    let mut entries = Vec::new();

    if amount <= 0.0 || rate <= 0.0 || periods == 0 || periods > MAX_HORIZON_MONTHS {
        return AmortizationTable {
            system,
            entries,
            summary: AmortizationSummary::default(),
        };
    }

    let mut balance = amount;
    match system {
        LoanSystem::Price => {
            let payment = fixed_installment(amount, rate, periods as f64);
            for installment in 1..=periods {
                let interest = balance * rate;
                let amortization = payment - interest;
                balance -= amortization;
                entries.push(AmortizationEntry {
                    installment,
                    payment,
                    interest,
                    amortization,
                    balance: balance.max(0.0),
                });
            }
        }
        LoanSystem::Sac => {
            let amortization = amount / periods as f64;
            for installment in 1..=periods {
                let interest = balance * rate;
                balance -= amortization;
                entries.push(AmortizationEntry {
                    installment,
                    payment: amortization + interest,
                    interest,
                    amortization,
                    balance: balance.max(0.0),
                });
            }
        }
    }

    let summary = summarize(&entries);
    AmortizationTable {
        system,
        entries,
        summary,
    }
}

fn summarize(entries: &[AmortizationEntry]) -> AmortizationSummary {
    AmortizationSummary {
        first_payment: entries.first().map(|e| e.payment).unwrap_or(0.0),
        last_payment: entries.last().map(|e| e.payment).unwrap_or(0.0),
        total_paid: entries.iter().map(|e| e.payment).sum(),
        total_interest: entries.iter().map(|e| e.interest).sum(),
    }
}

/// French-system installment for `principal` at periodic `rate` (fraction) over `periods`
pub fn fixed_installment(principal: f64, rate: f64, periods: f64) -> f64 {
    let growth = (1.0 + rate).powf(periods);
    principal * (rate * growth) / (growth - 1.0)
}

pub fn loan_cost(terms: &LoanTerms) -> LoanCost {
    if terms.amount <= 0.0 || terms.annual_rate <= 0.0 || terms.term_years <= 0.0 {
        return LoanCost::default();
    }

    let payments = terms.term_years * 12.0;
    let monthly_payment = fixed_installment(terms.amount, terms.annual_rate / 100.0 / 12.0, payments);
    let total_cost = monthly_payment * payments;

    LoanCost {
        monthly_payment,
        total_interest: total_cost - terms.amount,
        total_cost,
    }
}

pub fn compare_loans(loan_a: &LoanTerms, loan_b: &LoanTerms) -> LoanComparison {
    let cost_a = loan_cost(loan_a);
    let cost_b = loan_cost(loan_b);

    let better_option = if cost_a.total_cost > 0.0 && cost_b.total_cost > 0.0 {
        if cost_a.total_cost < cost_b.total_cost {
            Some(LoanChoice::A)
        } else if cost_b.total_cost < cost_a.total_cost {
            Some(LoanChoice::B)
        } else {
            None
        }
    } else {
        None
    };

    LoanComparison {
        loan_a: cost_a,
        loan_b: cost_b,
        better_option,
    }
}

pub fn refinance(input: &RefinanceInput) -> RefinanceResult {
    if input.current_balance <= 0.0 || input.new_annual_rate <= 0.0 || input.new_term_years <= 0.0 {
        return RefinanceResult {
            new_monthly_payment: 0.0,
            monthly_savings: 0.0,
            break_even_months: None,
        };
    }

    let new_monthly_payment = fixed_installment(
        input.current_balance,
        input.new_annual_rate / 100.0 / 12.0,
        input.new_term_years * 12.0,
    );
    let monthly_savings = input.current_monthly_payment - new_monthly_payment;
    let break_even_months = (monthly_savings > 0.0).then(|| input.closing_costs / monthly_savings);

    RefinanceResult {
        new_monthly_payment,
        monthly_savings,
        break_even_months,
    }
}
