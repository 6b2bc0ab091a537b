use warehouse_routing::aggregate::{report_rows, summarize, total_items};
use warehouse_routing::assign::{RoutingTable, assign_suppliers};
use warehouse_routing::config::DEFAULT_FALLBACK_SUPPLIER;
use warehouse_routing::model::{SubscriberRecord, SupplierRecord};

fn subscriber(country: &str) -> SubscriberRecord {
    SubscriberRecord {
        contact_name: format!("Contact in {country}"),
        country: country.to_string(),
        ..SubscriberRecord::default()
    }
}

fn subscribers(countries: &[&str]) -> Vec<SubscriberRecord> {
    countries.iter().map(|country| subscriber(country)).collect()
}

#[test]
fn routes_case_insensitively_and_falls_back() {
    let suppliers = vec![SupplierRecord::new("FR", "Euro1")];
    let assigned = assign_suppliers(
        subscribers(&["FR", "fr", "DE"]),
        &suppliers,
        DEFAULT_FALLBACK_SUPPLIER,
    );

    let names: Vec<&str> = assigned
        .iter()
        .map(|entry| entry.assigned_supplier.as_str())
        .collect();
    assert_eq!(names, ["Euro1", "Euro1", "BP 2"]);

    let summary = summarize(&assigned);
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].supplier_name, "Euro1");
    assert_eq!(summary[0].total_count, 2);
    assert_eq!(summary[0].countries, ["FR", "fr"]);
    assert_eq!(summary[1].supplier_name, "BP 2");
    assert_eq!(summary[1].total_count, 1);
    assert_eq!(summary[1].countries, ["DE"]);
}

#[test]
fn first_routing_entry_for_a_country_wins() {
    let suppliers = vec![
        SupplierRecord::new("Spain", "Iberia Post"),
        SupplierRecord::new("spain", "Second Choice"),
        SupplierRecord::new("Italy", "Roma Express"),
    ];
    let assigned = assign_suppliers(subscribers(&["SPAIN", "Italy"]), &suppliers, "Default");

    assert_eq!(assigned[0].assigned_supplier, "Iberia Post");
    assert_eq!(assigned[1].assigned_supplier, "Roma Express");
}

#[test]
fn blank_country_uses_fallback_even_with_blank_routing_row() {
    let suppliers = vec![
        SupplierRecord::new("", "Blank Row Carrier"),
        SupplierRecord::new("Norway", "Nordic"),
    ];
    let table = RoutingTable::new(&suppliers);
    assert_eq!(table.lookup(""), None);
    assert_eq!(table.lookup("NORWAY"), Some("Nordic"));

    let assigned = assign_suppliers(subscribers(&["", "Norway"]), &suppliers, "BP 2");
    assert_eq!(assigned[0].assigned_supplier, "BP 2");
    assert_eq!(assigned[1].assigned_supplier, "Nordic");
}

#[test]
fn matching_is_exact_not_prefix() {
    let suppliers = vec![SupplierRecord::new("United", "Wrong")];
    let assigned = assign_suppliers(
        subscribers(&["United Kingdom", " united"]),
        &suppliers,
        "BP 2",
    );
    assert!(assigned.iter().all(|entry| entry.assigned_supplier == "BP 2"));
}

#[test]
fn assignment_is_idempotent_and_preserves_order() {
    let roster = subscribers(&["FR", "US", "de", "", "Japan", "fr"]);
    let suppliers = vec![
        SupplierRecord::new("de", "Berlin Freight"),
        SupplierRecord::new("fr", "Euro1"),
        SupplierRecord::new("japan", "Nippon"),
    ];

    let first = assign_suppliers(roster.clone(), &suppliers, "BP 2");
    let second = assign_suppliers(roster.clone(), &suppliers, "BP 2");
    assert_eq!(first, second);

    for (entry, original) in first.iter().zip(&roster) {
        assert_eq!(&entry.subscriber, original);
        assert!(!entry.assigned_supplier.is_empty());
    }
}

#[test]
fn summary_counts_add_up_and_countries_are_distinct() {
    let suppliers = vec![
        SupplierRecord::new("FR", "Euro1"),
        SupplierRecord::new("BE", "Euro1"),
        SupplierRecord::new("US", "Atlantic"),
    ];
    let assigned = assign_suppliers(
        subscribers(&["FR", "BE", "FR", "US", "", "", "MX", "US"]),
        &suppliers,
        "BP 2",
    );
    let summary = summarize(&assigned);

    assert_eq!(total_items(&summary), assigned.len());

    let euro = summary
        .iter()
        .find(|record| record.supplier_name == "Euro1")
        .expect("Euro1 summary");
    assert_eq!(euro.total_count, 3);
    assert_eq!(euro.countries, ["FR", "BE"]);

    let fallback = summary
        .iter()
        .find(|record| record.supplier_name == "BP 2")
        .expect("fallback summary");
    assert_eq!(fallback.total_count, 3);
    assert_eq!(fallback.countries, ["", "MX"]);
    assert!(!fallback.countries.iter().any(|country| country == "US"));
}

#[test]
fn empty_roster_yields_empty_summary() {
    let assigned = assign_suppliers(Vec::new(), &[SupplierRecord::new("FR", "Euro1")], "BP 2");
    assert!(assigned.is_empty());
    assert!(summarize(&assigned).is_empty());
    assert!(report_rows(&[]).is_empty());
}

#[test]
fn report_rows_sort_descending_and_percentages_total_100() {
    let suppliers = vec![
        SupplierRecord::new("FR", "Euro1"),
        SupplierRecord::new("US", "Atlantic"),
        SupplierRecord::new("JP", "Nippon"),
    ];
    let assigned = assign_suppliers(
        subscribers(&["FR", "US", "US", "JP", "JP", "JP", "CA"]),
        &suppliers,
        "BP 2",
    );
    let rows = report_rows(&summarize(&assigned));

    let order: Vec<(&str, usize)> = rows
        .iter()
        .map(|row| (row.supplier_name.as_str(), row.total_items))
        .collect();
    // Euro1 and BP 2 tie on 1 and keep their first-seen order.
    assert_eq!(
        order,
        [("Nippon", 3), ("Atlantic", 2), ("Euro1", 1), ("BP 2", 1)]
    );
    assert_eq!(rows[0].percentage, 42.86);
    assert_eq!(rows[2].percentage, 14.29);
    assert_eq!(rows[0].countries_served, "JP");

    let total: f64 = rows.iter().map(|row| row.percentage).sum();
    assert!((total - 100.0).abs() < 0.05, "percentages summed to {total}");
}

#[test]
fn percentages_round_half_to_even() {
    let suppliers = vec![SupplierRecord::new("FR", "Euro1")];
    let mut countries = vec!["FR"; 31];
    countries.push("MX");
    let rows = report_rows(&summarize(&assign_suppliers(
        subscribers(&countries),
        &suppliers,
        "BP 2",
    )));

    // 96.875 and 3.125 sit exactly on the tie; half-away-from-zero would sum to 100.01.
    assert_eq!(rows[0].percentage, 96.88);
    assert_eq!(rows[1].percentage, 3.12);
    let total: f64 = rows.iter().map(|row| row.percentage).sum();
    assert!((total - 100.0).abs() < 1e-9, "percentages summed to {total}");
}

#[test]
fn countries_served_are_comma_joined() {
    let suppliers = vec![
        SupplierRecord::new("FR", "Euro1"),
        SupplierRecord::new("DE", "Euro1"),
    ];
    let assigned = assign_suppliers(subscribers(&["FR", "DE", "FR"]), &suppliers, "BP 2");
    let rows = report_rows(&summarize(&assigned));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].countries_served, "FR, DE");
    assert_eq!(rows[0].percentage, 100.0);
}
