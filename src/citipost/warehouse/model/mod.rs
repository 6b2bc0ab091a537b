use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp layout used whenever a date is written to a spreadsheet cell.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the subscriber roster. Every text field is empty rather than
/// missing when the source cell was blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberRecord {
    pub contact_name: String,
    pub account_name: String,
    pub address1: String,
    pub address2: String,
    pub address3: String,
    pub city: String,
    pub state_province: String,
    pub post_code: String,
    pub country: String,
}

impl SubscriberRecord {
    /// Address components in label order: the three address lines, city,
    /// state/province, postal code and country.
    pub fn address_parts(&self) -> [&str; 7] {
        [
            &self.address1,
            &self.address2,
            &self.address3,
            &self.city,
            &self.state_province,
            &self.post_code,
            &self.country,
        ]
    }
}

/// One row of the routing guide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierRecord {
    pub country: String,
    pub supplier_name: String,
}

impl SupplierRecord {
    pub fn new(country: impl Into<String>, supplier_name: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            supplier_name: supplier_name.into(),
        }
    }
}

/// A subscriber paired with the supplier chosen for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedSubscriber {
    #[serde(flatten)]
    pub subscriber: SubscriberRecord,
    pub assigned_supplier: String,
}

/// Printable unit holding one subscriber's shipping information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRecord {
    pub contact_name: String,
    pub account_name: String,
    pub full_address: String,
    pub supplier_name: String,
    pub created_at: NaiveDateTime,
}

/// Per-supplier statistics derived from the assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub supplier_name: String,
    pub total_count: usize,
    /// Distinct countries served, in the order they were first seen.
    pub countries: Vec<String>,
}
