//! Billing export and clinic backups.

mod backup;
mod billing;

pub use backup::*;
pub use billing::*;
