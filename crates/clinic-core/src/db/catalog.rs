//! Treatment price list and inventory operations.

use super::{Database, DbError, DbResult, RecordStore};
use crate::models::{
    default_inventory, default_treatments, InventoryItem, Treatment, TreatmentCategory, SUPPLIERS,
};

impl Database {
    /// Treatment price list, seeded with the defaults on first use.
    pub fn list_treatments(&self) -> DbResult<Vec<Treatment>> {
        self.load_or_seed(default_treatments)
    }

    /// Add or update a treatment.
    pub fn upsert_treatment(&self, treatment: &Treatment) -> DbResult<()> {
        self.list_treatments()?;
        self.upsert_record(treatment)
    }

    /// Treatments whose name or description contains `query`, optionally
    /// limited to one category. Price list order is kept.
    pub fn search_treatments(
        &self,
        query: &str,
        category: Option<TreatmentCategory>,
    ) -> DbResult<Vec<Treatment>> {
        Ok(self
            .list_treatments()?
            .into_iter()
            .filter(|t| category.map_or(true, |c| t.category == c))
            .filter(|t| t.matches_term(query))
            .collect())
    }

    /// Inventory, seeded with the starting stock on first use.
    pub fn list_inventory(&self) -> DbResult<Vec<InventoryItem>> {
        self.load_or_seed(default_inventory)
    }

    /// Stock items whose name or supplier contains `query`, optionally
    /// limited to one category.
    pub fn search_inventory(&self, query: &str, category: Option<&str>) -> DbResult<Vec<InventoryItem>> {
        Ok(self
            .list_inventory()?
            .into_iter()
            .filter(|i| category.map_or(true, |c| i.category == c))
            .filter(|i| i.matches_term(query))
            .collect())
    }

    /// The supplier directory followed by any other suppliers named on
    /// stock items, in stock order.
    pub fn suppliers(&self) -> DbResult<Vec<String>> {
        let mut suppliers: Vec<String> = SUPPLIERS.iter().map(|s| s.to_string()).collect();
        for item in self.list_inventory()? {
            let name = item.supplier.trim();
            if !name.is_empty() && !suppliers.iter().any(|s| s == name) {
                suppliers.push(name.to_string());
            }
        }
        Ok(suppliers)
    }

    /// Add or update an inventory item.
    pub fn upsert_inventory_item(&self, item: &InventoryItem) -> DbResult<()> {
        self.list_inventory()?;
        self.upsert_record(item)
    }

    /// Apply a signed stock change, clamped at zero. Returns the new quantity.
    pub fn adjust_inventory_quantity(&self, id: &str, change: i64) -> DbResult<u32> {
        let mut item = self
            .list_inventory()?
            .into_iter()
            .find(|i| i.id == id)
            .ok_or_else(|| DbError::NotFound(id.to_string()))?;
        item.adjust_quantity(change);
        self.update_record(&item)?;
        Ok(item.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_treatments_seeded_once() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.list_treatments().unwrap().len(), 10);

        let mut whitening = db.get_record::<Treatment>("T6").unwrap().unwrap();
        whitening.price = 22000.0;
        db.upsert_treatment(&whitening).unwrap();

        let treatments = db.list_treatments().unwrap();
        assert_eq!(treatments.len(), 10);
        assert_eq!(treatments[5].price, 22000.0);
    }

    #[test]
    fn test_adjust_inventory_quantity() {
        let db = Database::open_in_memory().unwrap();

        // Gloves start at 50
        assert_eq!(db.adjust_inventory_quantity("1", -5).unwrap(), 45);
        assert_eq!(db.adjust_inventory_quantity("1", -100).unwrap(), 0);
        assert!(matches!(
            db.adjust_inventory_quantity("missing", 1),
            Err(DbError::NotFound(_))
        ));
    }

    #[test]
    fn test_upsert_inventory_item() {
        let db = Database::open_in_memory().unwrap();
        let item = InventoryItem::new(
            "Alginate".into(),
            "Dental Materials".into(),
            6,
            "packs".into(),
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        );
        db.upsert_inventory_item(&item).unwrap();
        let items = db.list_inventory().unwrap();
        assert_eq!(items.len(), 6);
        assert_eq!(items[5].name, "Alginate");
    }

    #[test]
    fn test_upsert_keeps_unparsable_neighbours() {
        use crate::db::KeyValueStore;

        let db = Database::open_in_memory().unwrap();
        db.set_item(
            "adc_inventory",
            r#"[
                {"id": "INV-1", "name": "Gloves", "category": "Disposables", "quantity": 40, "unit": "boxes",
                 "reorderLevel": 10, "costPerUnit": 500, "lastRestocked": "2026-09-01"},
                {"id": "INV-2", "name": "Bibs", "category": "Disposables", "quantity": null, "unit": "packs",
                 "reorderLevel": 5, "costPerUnit": 300, "lastRestocked": "2026-09-01"}
            ]"#,
        )
        .unwrap();

        let items = db.list_inventory().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Gloves");

        let burs = InventoryItem::new(
            "Burs".into(),
            "Instruments".into(),
            12,
            "pieces".into(),
            NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
        );
        db.upsert_inventory_item(&burs).unwrap();
        assert_eq!(db.adjust_inventory_quantity("INV-1", -4).unwrap(), 36);

        let raw = db.get_item("adc_inventory").unwrap().unwrap();
        assert!(raw.contains("Gloves"));
        assert!(raw.contains("Bibs"));
        assert!(raw.contains("Burs"));
        assert_eq!(db.list_inventory().unwrap().len(), 2);
    }

    #[test]
    fn test_search_treatments() {
        let db = Database::open_in_memory().unwrap();

        // Only the description says "bleaching"
        let whitening = db.search_treatments("Bleaching", None).unwrap();
        assert_eq!(whitening.len(), 1);
        assert_eq!(whitening[0].id, "T6");

        let preventive = db.search_treatments("", Some(TreatmentCategory::PreventiveCare)).unwrap();
        assert!(preventive.len() >= 2);
        assert!(preventive.iter().all(|t| t.category == TreatmentCategory::PreventiveCare));

        let none = db.search_treatments("cleaning", Some(TreatmentCategory::OralSurgery)).unwrap();
        assert!(none.is_empty());
        assert_eq!(db.search_treatments("  ", None).unwrap().len(), 10);
    }

    #[test]
    fn test_search_inventory() {
        let db = Database::open_in_memory().unwrap();

        let by_supplier = db.search_inventory("hayat medical", None).unwrap();
        assert_eq!(by_supplier.len(), 2);

        let by_name = db.search_inventory("NEEDLES", Some("Disposables")).unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Dental Needles 27G");

        assert!(db.search_inventory("needles", Some("Anesthetics")).unwrap().is_empty());
        assert_eq!(db.search_inventory("", Some("Disposables")).unwrap().len(), 3);
    }

    #[test]
    fn test_supplier_directory() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.suppliers().unwrap().len(), SUPPLIERS.len());

        let mut item = InventoryItem::new(
            "Impression Trays".into(),
            "Instruments".into(),
            20,
            "pieces".into(),
            NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
        );
        item.supplier = "Khyber Surgical, Board Bazaar".into();
        db.upsert_inventory_item(&item).unwrap();

        let suppliers = db.suppliers().unwrap();
        assert_eq!(suppliers.len(), SUPPLIERS.len() + 1);
        assert_eq!(suppliers[0], "Hayat Medical, Peshawar");
        assert_eq!(suppliers.last().unwrap(), "Khyber Surgical, Board Bazaar");
    }
}
