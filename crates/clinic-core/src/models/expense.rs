//! Expense models.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Expense ledger category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, uniffi::Enum)]
pub enum ExpenseCategory {
    Rent,
    Utilities,
    Salaries,
    Supplies,
    Equipment,
    #[serde(rename = "Lab Fees")]
    LabFees,
    Marketing,
    Maintenance,
    Other,
}

impl ExpenseCategory {
    /// All categories in report order.
    pub const ALL: [ExpenseCategory; 9] = [
        ExpenseCategory::Rent,
        ExpenseCategory::Utilities,
        ExpenseCategory::Salaries,
        ExpenseCategory::Supplies,
        ExpenseCategory::Equipment,
        ExpenseCategory::LabFees,
        ExpenseCategory::Marketing,
        ExpenseCategory::Maintenance,
        ExpenseCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Rent => "Rent",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Salaries => "Salaries",
            ExpenseCategory::Supplies => "Supplies",
            ExpenseCategory::Equipment => "Equipment",
            ExpenseCategory::LabFees => "Lab Fees",
            ExpenseCategory::Marketing => "Marketing",
            ExpenseCategory::Maintenance => "Maintenance",
            ExpenseCategory::Other => "Other",
        }
    }
}

/// A single clinic expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
    pub payment_method: String,
    #[serde(default)]
    pub notes: String,
}

impl Expense {
    pub fn new(date: NaiveDate, category: ExpenseCategory, description: String, amount: f64) -> Self {
        Self {
            id: super::generate_id("EXP"),
            date,
            category,
            description,
            amount,
            payment_method: "Cash".into(),
            notes: String::new(),
        }
    }

    /// Whether this expense falls in the given calendar month.
    pub fn is_in_month(&self, year: i32, month: u32) -> bool {
        self.date.year() == year && self.date.month() == month
    }
}
