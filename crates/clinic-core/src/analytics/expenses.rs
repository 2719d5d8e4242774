//! Monthly expense report.

use serde::{Deserialize, Serialize};

use super::{month_bounds, percent_of};
use crate::db::ClinicSnapshot;
use crate::models::ExpenseCategory;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub amount: f64,
    /// Share of the month's expenses
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseBreakdown {
    pub year: i32,
    pub month: u32,
    /// Categories with spending, in category order
    pub categories: Vec<CategoryTotal>,
    pub total_expenses: f64,
    pub revenue: f64,
    pub profit: f64,
    pub profit_margin: f64,
}

/// Expenses by category for one calendar month, with the month's revenue.
pub fn expense_breakdown(snapshot: &ClinicSnapshot, year: i32, month: u32) -> ExpenseBreakdown {
    let month_expenses: Vec<_> = snapshot
        .expenses
        .iter()
        .filter(|e| e.is_in_month(year, month))
        .collect();
    let total_expenses: f64 = month_expenses.iter().map(|e| e.amount).sum();

    let categories = ExpenseCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let amount: f64 = month_expenses
                .iter()
                .filter(|e| e.category == category)
                .map(|e| e.amount)
                .sum();
            (amount > 0.0).then(|| CategoryTotal {
                category,
                amount,
                percentage: percent_of(amount, total_expenses),
            })
        })
        .collect();

    let revenue: f64 = match month_bounds(year, month) {
        Some((first, last)) => snapshot
            .bills
            .iter()
            .filter(|b| {
                let d = b.local_time().date();
                d >= first && d <= last
            })
            .map(|b| b.total)
            .sum(),
        None => 0.0,
    };
    let profit = revenue - total_expenses;

    ExpenseBreakdown {
        year,
        month,
        categories,
        total_expenses,
        revenue,
        profit,
        profit_margin: percent_of(profit, revenue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Expense;
    use chrono::NaiveDate;

    fn expense(d: u32, m: u32, category: ExpenseCategory, amount: f64) -> Expense {
        Expense::new(NaiveDate::from_ymd_opt(2026, m, d).unwrap(), category, String::new(), amount)
    }

    #[test]
    fn test_breakdown() {
        let snapshot = ClinicSnapshot {
            expenses: vec![
                expense(1, 10, ExpenseCategory::Rent, 60000.0),
                expense(5, 10, ExpenseCategory::Utilities, 15000.0),
                expense(9, 10, ExpenseCategory::Utilities, 5000.0),
                expense(30, 9, ExpenseCategory::Salaries, 90000.0),
                expense(12, 10, ExpenseCategory::Other, 0.0),
            ],
            ..Default::default()
        };

        let report = expense_breakdown(&snapshot, 2026, 10);
        assert_eq!(report.total_expenses, 80000.0);
        assert_eq!(report.categories.len(), 2);
        assert_eq!(report.categories[0].category, ExpenseCategory::Rent);
        assert_eq!(report.categories[0].percentage, 75.0);
        assert_eq!(report.categories[1].amount, 20000.0);
        assert_eq!(report.revenue, 0.0);
        assert_eq!(report.profit_margin, 0.0);
    }

    #[test]
    fn test_empty_month() {
        let report = expense_breakdown(&ClinicSnapshot::default(), 2026, 2);
        assert!(report.categories.is_empty());
        assert_eq!(report.total_expenses, 0.0);
    }
}
