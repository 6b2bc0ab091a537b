//! Per-supplier grouping of assigned subscribers.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::citipost::warehouse::model::{AssignedSubscriber, SummaryRecord};

/// Groups subscribers by assigned supplier. Suppliers appear in the order they
/// are first seen; countries within a group are distinct and also kept in
/// first-seen order. A blank country is a country like any other here.
pub fn summarize(assigned: &[AssignedSubscriber]) -> Vec<SummaryRecord> {
    let mut summaries: Vec<SummaryRecord> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut seen_countries: Vec<HashSet<&str>> = Vec::new();

    for entry in assigned {
        let supplier = entry.assigned_supplier.as_str();
        let position = *positions.entry(supplier).or_insert_with(|| {
            summaries.push(SummaryRecord {
                supplier_name: supplier.to_string(),
                total_count: 0,
                countries: Vec::new(),
            });
            seen_countries.push(HashSet::new());
            summaries.len() - 1
        });

        let summary = &mut summaries[position];
        summary.total_count += 1;
        let country = entry.subscriber.country.as_str();
        if seen_countries[position].insert(country) {
            summary.countries.push(country.to_string());
        }
    }

    summaries
}

pub fn total_items(summary: &[SummaryRecord]) -> usize {
    summary.iter().map(|record| record.total_count).sum()
}

/// One line of the exported summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReportRow {
    pub supplier_name: String,
    pub total_items: usize,
    pub countries_served: String,
    /// Share of all items, in percent, rounded half-to-even at two decimals.
    pub percentage: f64,
}

/// Flattens summaries into report rows sorted by descending item count.
/// Suppliers with equal counts keep their original relative order.
pub fn report_rows(summary: &[SummaryRecord]) -> Vec<SummaryReportRow> {
    let total = total_items(summary);
    let mut rows: Vec<SummaryReportRow> = summary
        .iter()
        .map(|record| SummaryReportRow {
            supplier_name: record.supplier_name.clone(),
            total_items: record.total_count,
            countries_served: record.countries.join(", "),
            percentage: percentage_of(record.total_count, total),
        })
        .collect();
    rows.sort_by(|lhs, rhs| rhs.total_items.cmp(&lhs.total_items));
    rows
}

fn percentage_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = count as f64 / total as f64 * 100.0;
    (percent * 100.0).round_ties_even() / 100.0
}
