//! Shipping label generation.
//!
//! [`build_labels`] projects assigned subscribers into [`LabelRecord`]s; the
//! [`layout`] module arranges those records on printable pages.

pub mod layout;

use chrono::NaiveDateTime;

use crate::citipost::warehouse::model::{AssignedSubscriber, LabelRecord, SubscriberRecord};

/// Separator placed between address components.
pub const ADDRESS_SEPARATOR: &str = ", ";

/// Builds one label per subscriber in input order. Every label carries the
/// same `created_at` stamp.
pub fn build_labels(assigned: &[AssignedSubscriber], created_at: NaiveDateTime) -> Vec<LabelRecord> {
    assigned
        .iter()
        .map(|entry| LabelRecord {
            contact_name: entry.subscriber.contact_name.clone(),
            account_name: entry.subscriber.account_name.clone(),
            full_address: format_address(&entry.subscriber),
            supplier_name: entry.assigned_supplier.clone(),
            created_at,
        })
        .collect()
}

/// Joins the non-empty address components with `", "`.
pub fn format_address(subscriber: &SubscriberRecord) -> String {
    subscriber
        .address_parts()
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(ADDRESS_SEPARATOR)
}
