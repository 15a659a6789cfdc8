use crate::models::debt::{
    Debt, DebtBreakdown, DebtPayoff, PaymentEntry, PayoffBreakdown, PayoffRequest, ScheduleRow,
    SimulationResult, SimulationStrategy, StrategyComparison, StrategySummary,
};
use std::cmp::Ordering;

/// Hard cap on simulated months (30 years)
pub const MAX_MONTHS: u32 = 360;

/// One simulated month: the surviving debts plus the extra budget carried into the next month
#[derive(Debug, Clone)]
pub struct MonthStep {
    pub debts: Vec<Debt>,
    pub extra_budget: f64,
    pub interest: f64,
    pub row: ScheduleRow,
    pub retired: Vec<DebtPayoff>,
}

/// Simulate month-by-month payoff of `debts` under `strategy`.
///
/// Returns the empty result when any debt starts with a non-positive balance.
/// Stops after [`MAX_MONTHS`] even if balance remains; callers detect that
/// through [`SimulationResult::converged`].
pub fn simulate(debts: &[Debt], extra_payment: f64, strategy: SimulationStrategy) -> SimulationResult {
    if debts.iter().any(|debt| debt.balance <= 0.0) {
        return SimulationResult::default();
    }

    let mut working = debts.to_vec();
    let mut extra_budget = extra_payment;
    let mut result = SimulationResult::default();

    while working.iter().any(|debt| debt.balance > 0.0) && result.total_months < MAX_MONTHS {
        let month = result.total_months + 1;
        let step = step_month(working, extra_budget, strategy, month);

        working = step.debts;
        extra_budget = step.extra_budget;
        result.total_interest += step.interest;
        result.schedule.push(step.row);
        result.payoff_order.extend(step.retired);
        result.total_months = month;
    }

    result
}

/// Advance the working debts by one month.
///
/// `extra_budget` is the discretionary amount available this month; the
/// returned budget includes the minimums freed by debts retired this month.
pub fn step_month(
    mut debts: Vec<Debt>,
    extra_budget: f64,
    strategy: SimulationStrategy,
    month: u32,
) -> MonthStep {
    sort_by_strategy(&mut debts, strategy);

    let mut interest = 0.0;
    for debt in debts.iter_mut() {
        let accrued = debt.balance * (debt.rate / 100.0 / 12.0);
        debt.balance += accrued;
        interest += accrued;
    }

    // payments[i] always belongs to debts[i]
    let mut payments: Vec<PaymentEntry> = Vec::with_capacity(debts.len());
    for debt in debts.iter_mut() {
        let payment = debt.balance.min(debt.min_payment);
        debt.balance -= payment;
        payments.push(PaymentEntry {
            debt_id: debt.id.clone(),
            debt_name: debt.name.clone(),
            amount_paid: payment,
        });
    }

    let mut remaining_extra = extra_budget;
    if remaining_extra > 0.0 {
        for (index, debt) in debts.iter_mut().enumerate() {
            if debt.balance <= 0.0 {
                continue;
            }
            let payment = debt.balance.min(remaining_extra);
            debt.balance -= payment;
            payments[index].amount_paid += payment;
            remaining_extra -= payment;
            if remaining_extra <= 0.0 {
                break;
            }
        }
    }

    let mut next_budget = extra_budget;
    let mut retired = Vec::new();
    debts.retain(|debt| {
        if debt.balance > 0.0 {
            return true;
        }
        next_budget += debt.min_payment;
        retired.push(DebtPayoff {
            debt_id: debt.id.clone(),
            debt_name: debt.name.clone(),
            month,
        });
        false
    });

    let total_paid = payments.iter().map(|p| p.amount_paid).sum();
    let remaining_balance = debts.iter().map(|d| d.balance).sum();

    MonthStep {
        debts,
        extra_budget: next_budget,
        interest,
        row: ScheduleRow {
            month,
            payments,
            total_paid,
            remaining_balance,
        },
        retired,
    }
}

/// Stable sort: equal keys keep their incoming order.
pub fn sort_by_strategy(debts: &mut [Debt], strategy: SimulationStrategy) {
    match strategy {
        SimulationStrategy::Avalanche => {
            debts.sort_by(|a, b| b.rate.partial_cmp(&a.rate).unwrap_or(Ordering::Equal))
        }
        SimulationStrategy::Snowball => {
            debts.sort_by(|a, b| a.balance.partial_cmp(&b.balance).unwrap_or(Ordering::Equal))
        }
    }
}

pub fn compare_strategies(debts: &[Debt], extra_payment: f64) -> StrategyComparison {
    let avalanche = summarize(
        SimulationStrategy::Avalanche,
        &simulate(debts, extra_payment, SimulationStrategy::Avalanche),
    );
    let snowball = summarize(
        SimulationStrategy::Snowball,
        &simulate(debts, extra_payment, SimulationStrategy::Snowball),
    );

    StrategyComparison {
        interest_saved: snowball.total_interest - avalanche.total_interest,
        months_saved: i64::from(snowball.total_months) - i64::from(avalanche.total_months),
        avalanche,
        snowball,
    }
}

fn summarize(strategy: SimulationStrategy, result: &SimulationResult) -> StrategySummary {
    StrategySummary {
        strategy,
        total_months: result.total_months,
        total_interest: result.total_interest,
        converged: result.converged(),
    }
}

/// Per-debt totals for a finished simulation of `request`.
pub fn breakdown(request: &PayoffRequest, result: &SimulationResult) -> PayoffBreakdown {
    let total_debt: f64 = request.debts.iter().map(|d| d.balance).sum();
    let total_minimum_payments: f64 = request.debts.iter().map(|d| d.min_payment).sum();

    let debts = request
        .debts
        .iter()
        .map(|debt| {
            let total_paid = result
                .schedule
                .iter()
                .flat_map(|row| row.payments.iter())
                .filter(|p| p.debt_id == debt.id)
                .map(|p| p.amount_paid)
                .sum();
            let payoff_month = result
                .payoff_order
                .iter()
                .find(|payoff| payoff.debt_id == debt.id)
                .map(|payoff| payoff.month);

            DebtBreakdown {
                debt_id: debt.id.clone(),
                debt_name: debt.name.clone(),
                total_paid,
                payoff_month,
            }
        })
        .collect();

    PayoffBreakdown {
        strategy: request.strategy,
        total_debt,
        total_minimum_payments,
        monthly_budget: total_minimum_payments + request.extra_payment,
        total_interest: result.total_interest,
        total_cost: total_debt + result.total_interest,
        total_months: result.total_months,
        converged: result.converged(),
        debts,
    }
}
