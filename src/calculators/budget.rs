use crate::models::budget::{
    BudgetCategory, BudgetSummary, CategoryUsage, EmergencyFund, LedgerSummary, Transaction,
    TransactionKind, UsageStatus,
};
use chrono::{DateTime, FixedOffset};

const WARNING_USAGE_PERCENT: f64 = 85.0;

pub fn summarize_budget(categories: &[BudgetCategory]) -> BudgetSummary {
    let total_budgeted: f64 = categories.iter().map(|c| c.budgeted).sum();
    let total_spent: f64 = categories.iter().map(|c| c.spent).sum();

    let categories = categories
        .iter()
        .map(|category| {
            let percentage = if category.budgeted > 0.0 {
                category.spent / category.budgeted * 100.0
            } else {
                0.0
            };
            CategoryUsage {
                id: category.id.clone(),
                name: category.name.clone(),
                remaining: category.budgeted - category.spent,
                percentage,
                status: usage_status(percentage),
            }
        })
        .collect();

    BudgetSummary {
        total_budgeted,
        total_spent,
        total_remaining: total_budgeted - total_spent,
        categories,
    }
}

fn usage_status(percentage: f64) -> UsageStatus {
    if percentage > 100.0 {
        UsageStatus::Over
    } else if percentage > WARNING_USAGE_PERCENT {
        UsageStatus::Warning
    } else {
        UsageStatus::Ok
    }
}

/// Income and expense totals; transactions are returned newest first.
pub fn summarize_ledger(transactions: &[Transaction]) -> LedgerSummary {
    let total_of = |kind: TransactionKind| -> f64 {
        transactions
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.amount)
            .sum()
    };
    let total_income = total_of(TransactionKind::Income);
    let total_expense = total_of(TransactionKind::Expense);

    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| parse_date(&b.date).cmp(&parse_date(&a.date)));

    LedgerSummary {
        total_income,
        total_expense,
        balance: total_income - total_expense,
        transactions: sorted,
    }
}

fn parse_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).ok()
}

pub fn emergency_fund(monthly_expenses: f64) -> EmergencyFund {
    EmergencyFund {
        three_months: monthly_expenses * 3.0,
        six_months: monthly_expenses * 6.0,
        nine_months: monthly_expenses * 9.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, budgeted: f64, spent: f64) -> BudgetCategory {
        BudgetCategory {
            id: name.to_lowercase(),
            name: name.to_string(),
            budgeted,
            spent,
        }
    }

    fn transaction(id: &str, amount: f64, date: &str, kind: TransactionKind) -> Transaction {
        Transaction {
            id: id.to_string(),
            description: format!("tx {id}"),
            amount,
            category: "Housing".to_string(),
            date: date.to_string(),
            kind,
        }
    }

    #[test]
    fn budget_totals_and_statuses() {
        let summary = summarize_budget(&[
            category("Housing", 1500.0, 1450.0),
            category("Food", 800.0, 650.0),
            category("Transport", 300.0, 350.0),
            category("Leisure", 400.0, 200.0),
        ]);

        assert_eq!(summary.total_budgeted, 3000.0);
        assert_eq!(summary.total_spent, 2650.0);
        assert_eq!(summary.total_remaining, 350.0);
        assert_eq!(summary.categories[0].status, UsageStatus::Warning);
        assert_eq!(summary.categories[1].status, UsageStatus::Ok);
        assert_eq!(summary.categories[2].status, UsageStatus::Over);
        assert_eq!(summary.categories[2].remaining, -50.0);
    }

    #[test]
    fn unbudgeted_category_reports_zero_usage() {
        let summary = summarize_budget(&[category("Misc", 0.0, 20.0)]);
        assert_eq!(summary.categories[0].percentage, 0.0);
        assert_eq!(summary.categories[0].status, UsageStatus::Ok);
    }

    #[test]
    fn ledger_balances_income_against_expenses() {
        let summary = summarize_ledger(&[
            transaction("rent", 1200.0, "2024-03-01T10:00:00Z", TransactionKind::Expense),
            transaction("salary", 4000.0, "2024-03-05T09:00:00Z", TransactionKind::Income),
            transaction("food", 300.0, "2024-03-03T18:30:00Z", TransactionKind::Expense),
        ]);

        assert_eq!(summary.total_income, 4000.0);
        assert_eq!(summary.total_expense, 1500.0);
        assert_eq!(summary.balance, 2500.0);
        let order: Vec<&str> = summary.transactions.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(order, vec!["salary", "food", "rent"]);
    }

    #[test]
    fn emergency_fund_multiples() {
        let fund = emergency_fund(3000.0);
        assert_eq!(fund.three_months, 9000.0);
        assert_eq!(fund.six_months, 18000.0);
        assert_eq!(fund.nine_months, 27000.0);
    }
}
