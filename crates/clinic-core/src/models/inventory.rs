//! Inventory models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default window, in days, for the "expiring soon" alert.
pub const DEFAULT_EXPIRY_WINDOW_DAYS: i64 = 90;

/// Categories offered on the stock form.
pub const INVENTORY_CATEGORIES: [&str; 8] = [
    "Disposables",
    "Dental Materials",
    "Instruments",
    "Medications",
    "Anesthetics",
    "Sterilization",
    "Office Supplies",
    "Lab Materials",
];

/// Local supplier directory.
pub const SUPPLIERS: [&str; 5] = [
    "Hayat Medical, Peshawar",
    "Pak Dental Suppliers, Saddar",
    "Modern Dental Supply, Hayatabad",
    "Quality Dental, University Road",
    "Metro Medical, Cantt",
];

/// A stocked supply item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    /// e.g. "boxes", "syringes"
    pub unit: String,
    /// Reorder threshold
    pub reorder_level: u32,
    pub cost_per_unit: f64,
    #[serde(default)]
    pub supplier: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "empty_date_as_none")]
    pub expiry_date: Option<NaiveDate>,
    pub last_restocked: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

impl InventoryItem {
    pub fn new(name: String, category: String, quantity: u32, unit: String, restocked: NaiveDate) -> Self {
        Self {
            id: super::generate_id("INV"),
            name,
            category,
            quantity,
            unit,
            reorder_level: 10,
            cost_per_unit: 0.0,
            supplier: String::new(),
            expiry_date: None,
            last_restocked: restocked,
            notes: String::new(),
        }
    }

    /// Case-insensitive match on name or supplier. An empty term matches.
    pub fn matches_term(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        self.name.to_lowercase().contains(&term) || self.supplier.to_lowercase().contains(&term)
    }

    /// At or below the reorder threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.reorder_level
    }

    /// Whole days until expiry; negative once expired.
    pub fn days_until_expiry(&self, today: NaiveDate) -> Option<i64> {
        self.expiry_date.map(|d| (d - today).num_days())
    }

    /// Expires within `window_days` but has not expired yet.
    pub fn is_expiring_within(&self, today: NaiveDate, window_days: i64) -> bool {
        matches!(self.days_until_expiry(today), Some(days) if (0..=window_days).contains(&days))
    }

    pub fn is_expiring_soon(&self, today: NaiveDate) -> bool {
        self.is_expiring_within(today, DEFAULT_EXPIRY_WINDOW_DAYS)
    }

    /// Stock value at cost.
    pub fn stock_value(&self) -> f64 {
        f64::from(self.quantity) * self.cost_per_unit
    }

    /// Apply a signed quantity change, never going below zero.
    pub fn adjust_quantity(&mut self, change: i64) {
        let next = i64::from(self.quantity).saturating_add(change).max(0);
        self.quantity = u32::try_from(next).unwrap_or(u32::MAX);
    }
}

/// The browser form stores a cleared date input as "".
fn empty_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Starting stock written the first time the inventory store is opened.
pub fn default_inventory() -> Vec<InventoryItem> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();

    let rows = [
        ("1", "Disposable Gloves (Box)", "Disposables", 50, "boxes", 10, 500.0, "Hayat Medical, Peshawar", None, date(2024, 12, 1)),
        ("2", "Face Masks", "Disposables", 200, "pieces", 50, 15.0, "Hayat Medical, Peshawar", None, date(2024, 12, 1)),
        ("3", "Composite Resin (A2)", "Dental Materials", 8, "syringes", 3, 2500.0, "Pak Dental Suppliers, Saddar", None, date(2024, 11, 20)),
        ("4", "Lidocaine 2% with Epi", "Anesthetics", 40, "cartridges", 15, 80.0, "Metro Medical, Cantt", Some(date(2025, 6, 30)), date(2024, 11, 15)),
        ("5", "Dental Needles 27G", "Disposables", 100, "pieces", 25, 25.0, "Quality Dental, University Road", None, date(2024, 12, 5)),
    ];

    rows.into_iter()
        .map(
            |(id, name, category, quantity, unit, reorder_level, cost_per_unit, supplier, expiry_date, last_restocked)| {
                InventoryItem {
                    id: id.into(),
                    name: name.into(),
                    category: category.into(),
                    quantity,
                    unit: unit.into(),
                    reorder_level,
                    cost_per_unit,
                    supplier: supplier.into(),
                    expiry_date,
                    last_restocked,
                    notes: String::new(),
                }
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: u32, reorder_level: u32) -> InventoryItem {
        let mut item = InventoryItem::new(
            "Gloves".into(),
            "Disposables".into(),
            quantity,
            "boxes".into(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        );
        item.reorder_level = reorder_level;
        item
    }

    #[test]
    fn test_low_stock_includes_equality() {
        assert!(item(10, 10).is_low_stock());
        assert!(item(3, 10).is_low_stock());
        assert!(!item(11, 10).is_low_stock());
    }

    #[test]
    fn test_expiring_soon_window() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let mut it = item(5, 1);

        it.expiry_date = Some(today);
        assert!(it.is_expiring_soon(today));

        it.expiry_date = Some(today + chrono::Duration::days(90));
        assert!(it.is_expiring_soon(today));

        it.expiry_date = Some(today + chrono::Duration::days(91));
        assert!(!it.is_expiring_soon(today));

        it.expiry_date = Some(today - chrono::Duration::days(1));
        assert!(!it.is_expiring_soon(today));

        it.expiry_date = None;
        assert!(!it.is_expiring_soon(today));
    }

    #[test]
    fn test_adjust_quantity_clamps_at_zero() {
        let mut it = item(3, 1);
        it.adjust_quantity(-5);
        assert_eq!(it.quantity, 0);
        it.adjust_quantity(12);
        assert_eq!(it.quantity, 12);
    }

    #[test]
    fn test_empty_expiry_string() {
        let json = r#"{
            "id": "INV-1", "name": "Masks", "category": "Disposables",
            "quantity": 4, "unit": "pieces", "reorderLevel": 5, "costPerUnit": 15,
            "supplier": "", "expiryDate": "", "lastRestocked": "2024-12-01", "notes": ""
        }"#;
        let it: InventoryItem = serde_json::from_str(json).unwrap();
        assert_eq!(it.expiry_date, None);
        assert!(it.is_low_stock());
    }

    #[test]
    fn test_default_inventory_value() {
        let total: f64 = default_inventory().iter().map(InventoryItem::stock_value).sum();
        // 25000 + 3000 + 20000 + 3200 + 2500
        assert_eq!(total, 53700.0);
    }
}
