//! Country-based routing of subscribers to suppliers.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::citipost::warehouse::model::{AssignedSubscriber, SubscriberRecord, SupplierRecord};

/// Lookup from country to supplier name built from the routing guide.
///
/// Countries compare case-insensitively. When the guide lists a country more
/// than once the first entry wins and later ones are ignored. A blank country
/// never matches, on either side.
#[derive(Debug, Clone, Default)]
pub struct RoutingTable {
    by_country: HashMap<String, String>,
}

impl RoutingTable {
    pub fn new(suppliers: &[SupplierRecord]) -> Self {
        let mut by_country = HashMap::with_capacity(suppliers.len());
        for supplier in suppliers.iter().filter(|s| !s.country.is_empty()) {
            by_country
                .entry(country_key(&supplier.country))
                .or_insert_with(|| supplier.supplier_name.clone());
        }
        debug!(
            entries = suppliers.len(),
            countries = by_country.len(),
            "routing table built"
        );
        Self { by_country }
    }

    pub fn lookup(&self, country: &str) -> Option<&str> {
        if country.is_empty() {
            return None;
        }
        self.by_country.get(&country_key(country)).map(String::as_str)
    }
}

/// Pairs every subscriber with its supplier, preserving input order.
pub fn assign_suppliers(
    subscribers: Vec<SubscriberRecord>,
    suppliers: &[SupplierRecord],
    fallback: &str,
) -> Vec<AssignedSubscriber> {
    let table = RoutingTable::new(suppliers);
    let mut unmatched = 0usize;

    let assigned: Vec<AssignedSubscriber> = subscribers
        .into_iter()
        .map(|subscriber| {
            let assigned_supplier = match table.lookup(&subscriber.country) {
                Some(name) => name.to_string(),
                None => {
                    unmatched += 1;
                    fallback.to_string()
                }
            };
            AssignedSubscriber {
                subscriber,
                assigned_supplier,
            }
        })
        .collect();

    if unmatched > 0 {
        warn!(unmatched, %fallback, "subscribers routed to the fallback supplier");
    }
    assigned
}

// Unicode lowercasing is locale-independent.
fn country_key(country: &str) -> String {
    country.to_lowercase()
}
