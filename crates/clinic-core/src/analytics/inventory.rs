//! Stock value and inventory alerts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::InventoryItem;

/// Total stock value at cost.
pub fn inventory_value(items: &[InventoryItem]) -> f64 {
    items.iter().map(InventoryItem::stock_value).sum()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryAlert {
    pub item: InventoryItem,
    pub days_until_expiry: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryAlerts {
    pub low_stock: Vec<InventoryItem>,
    /// Soonest first
    pub expiring_soon: Vec<ExpiryAlert>,
    pub total_value: f64,
}

pub fn inventory_alerts(items: &[InventoryItem], today: NaiveDate, window_days: i64) -> InventoryAlerts {
    let mut expiring_soon: Vec<ExpiryAlert> = items
        .iter()
        .filter(|i| i.is_expiring_within(today, window_days))
        .filter_map(|i| {
            Some(ExpiryAlert {
                days_until_expiry: i.days_until_expiry(today)?,
                item: i.clone(),
            })
        })
        .collect();
    expiring_soon.sort_by_key(|a| a.days_until_expiry);

    InventoryAlerts {
        low_stock: items.iter().filter(|i| i.is_low_stock()).cloned().collect(),
        expiring_soon,
        total_value: inventory_value(items),
    }
}
