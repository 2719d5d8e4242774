//! Lab order database operations.

use chrono::NaiveDate;

use super::{Database, DbError, DbResult, RecordStore};
use crate::lab::{self, LabError};
use crate::models::{LabStatus, LabWork};

impl Database {
    /// All lab orders with the overdue sweep applied. Orders the sweep
    /// changes are written back so the stored statuses match what is shown.
    pub fn list_lab_work(&self, today: NaiveDate) -> DbResult<Vec<LabWork>> {
        let mut orders: Vec<LabWork> = self.load_all()?;
        let before = orders.clone();
        if lab::sweep_overdue(&mut orders, today) > 0 {
            let changed: Vec<LabWork> = orders
                .iter()
                .zip(&before)
                .filter(|(now, was)| now.status != was.status)
                .map(|(now, _)| now.clone())
                .collect();
            self.update_records(&changed)?;
        }
        Ok(orders)
    }

    /// Swept lab orders in one status, or all of them for `None`.
    pub fn lab_work_with_status(&self, today: NaiveDate, status: Option<LabStatus>) -> DbResult<Vec<LabWork>> {
        Ok(self
            .list_lab_work(today)?
            .into_iter()
            .filter(|o| status.map_or(true, |s| o.status == s))
            .collect())
    }

    pub fn insert_lab_work(&self, order: &LabWork) -> DbResult<()> {
        self.insert_record(order.clone())
    }

    /// Move an order to `status`. The sweep runs first so an overdue order
    /// is judged from its delayed state.
    pub fn update_lab_status(
        &self,
        id: &str,
        status: LabStatus,
        today: NaiveDate,
    ) -> Result<LabWork, LabUpdateError> {
        let mut orders = self.list_lab_work(today)?;
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| DbError::NotFound(id.to_string()))?;
        lab::transition(order, status, today)?;
        let updated = order.clone();
        self.update_record(&updated)?;
        Ok(updated)
    }
}

/// Failure while updating a lab order's status.
#[derive(thiserror::Error, Debug)]
pub enum LabUpdateError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Lab(#[from] LabError),
}
