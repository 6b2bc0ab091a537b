use std::path::Path;

use chrono::NaiveDateTime;
use rust_xlsxwriter::{Format, FormatBorder, Table, Workbook, XlsxError};

use crate::citipost::warehouse::aggregate::{self, SummaryReportRow};
use crate::citipost::warehouse::error::{Result, ToolError};
use crate::citipost::warehouse::model::{
    AssignedSubscriber, LabelRecord, SummaryRecord, TIMESTAMP_FORMAT,
};

pub const PROCESSED_SHEET: &str = "Processed Data";
pub const LABELS_SHEET: &str = "Carrier Labels";
pub const SUMMARY_SHEET: &str = "Supplier Summary";

pub const SUMMARY_TITLE: &str = "Warehouse Operations Summary Report";
pub const SUMMARY_HEADERS: [&str; 4] = [
    "Supplier Name",
    "Total Items",
    "Countries Served",
    "Percentage %",
];
/// Zero-based row holding the summary table header.
const SUMMARY_TABLE_ROW: u32 = 7;

/// A record type that maps onto a single worksheet: a fixed header row and one
/// row of cells per record, in field order.
pub trait TabularRecord {
    const SHEET_NAME: &'static str;
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

impl TabularRecord for AssignedSubscriber {
    const SHEET_NAME: &'static str = PROCESSED_SHEET;
    const HEADERS: &'static [&'static str] = &[
        "Contact Name",
        "Account Name",
        "Address 1",
        "Address 2",
        "Address 3",
        "City",
        "State/Province",
        "Post Code",
        "Country",
        "Assigned Supplier",
    ];

    fn cells(&self) -> Vec<String> {
        let s = &self.subscriber;
        vec![
            s.contact_name.clone(),
            s.account_name.clone(),
            s.address1.clone(),
            s.address2.clone(),
            s.address3.clone(),
            s.city.clone(),
            s.state_province.clone(),
            s.post_code.clone(),
            s.country.clone(),
            self.assigned_supplier.clone(),
        ]
    }
}

impl TabularRecord for LabelRecord {
    const SHEET_NAME: &'static str = LABELS_SHEET;
    const HEADERS: &'static [&'static str] = &[
        "Contact Name",
        "Account Name",
        "Full Address",
        "Supplier",
        "Print Date",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.contact_name.clone(),
            self.account_name.clone(),
            self.full_address.clone(),
            self.supplier_name.clone(),
            self.created_at.format(TIMESTAMP_FORMAT).to_string(),
        ]
    }
}

/// A table that will be materialised as an Excel sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub sheet_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetTable {
    pub fn from_records<R: TabularRecord>(records: &[R]) -> Self {
        Self {
            sheet_name: R::SHEET_NAME.to_string(),
            columns: R::HEADERS.iter().map(|header| header.to_string()).collect(),
            rows: records.iter().map(TabularRecord::cells).collect(),
        }
    }
}

/// Writes a homogeneous record list to a single-sheet workbook.
pub fn write_records<R: TabularRecord>(path: &Path, records: &[R]) -> Result<()> {
    write_table(path, &SheetTable::from_records(records))
}

/// Writes the provided table to the given path.
pub fn write_table(path: &Path, table: &SheetTable) -> Result<()> {
    build_table_workbook(table)
        .and_then(|mut workbook| workbook.save(path))
        .map_err(|error| ToolError::write_failure(path, error))
}

fn build_table_workbook(table: &SheetTable) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&table.sheet_name)?;

    for (col_idx, header) in table.columns.iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, header)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            worksheet.write_string((row_idx + 1) as u32, col_idx as u16, cell)?;
        }
    }

    // Excel refuses tables without a data row.
    if !table.rows.is_empty() {
        let mut excel_table = Table::new();
        excel_table.set_autofilter(true);
        let col_end = (table.columns.len() as u16).saturating_sub(1);
        worksheet.add_table(0, 0, table.rows.len() as u32, col_end, &excel_table)?;
    }

    worksheet.autofit();
    Ok(workbook)
}

/// Writes the supplier summary report: title block, totals, then one row per
/// supplier ordered by descending item count.
pub fn write_summary_report(
    path: &Path,
    summary: &[SummaryRecord],
    generated_at: NaiveDateTime,
) -> Result<()> {
    let rows = aggregate::report_rows(summary);
    let total_items = aggregate::total_items(summary);

    build_summary_workbook(summary.len(), total_items, &rows, generated_at)
        .and_then(|mut workbook| workbook.save(path))
        .map_err(|error| ToolError::write_failure(path, error))
}

fn build_summary_workbook(
    supplier_count: usize,
    total_items: usize,
    rows: &[SummaryReportRow],
    generated_at: NaiveDateTime,
) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SUMMARY_SHEET)?;

    let title = Format::new().set_bold().set_font_size(16);
    let bold = Format::new().set_bold();
    let plain = Format::new();
    let header = Format::new().set_bold().set_border(FormatBorder::Thin);
    let cell = Format::new().set_border(FormatBorder::Thin);

    worksheet.merge_range(0, 0, 0, 3, SUMMARY_TITLE, &title)?;
    let generated = format!("Generated: {}", generated_at.format(TIMESTAMP_FORMAT));
    worksheet.merge_range(1, 0, 1, 3, &generated, &plain)?;

    worksheet.write_string_with_format(3, 0, "Summary Information:", &bold)?;
    worksheet.write_string(4, 0, &format!("Total Suppliers: {supplier_count}"))?;
    worksheet.write_string(5, 0, &format!("Total Items: {total_items}"))?;

    for (col_idx, name) in SUMMARY_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(SUMMARY_TABLE_ROW, col_idx as u16, *name, &header)?;
    }

    for (offset, row) in rows.iter().enumerate() {
        let row_idx = SUMMARY_TABLE_ROW + 1 + offset as u32;
        worksheet.write_string_with_format(row_idx, 0, &row.supplier_name, &cell)?;
        worksheet.write_number_with_format(row_idx, 1, row.total_items as f64, &cell)?;
        worksheet.write_string_with_format(row_idx, 2, &row.countries_served, &cell)?;
        worksheet.write_number_with_format(row_idx, 3, row.percentage, &cell)?;
    }

    worksheet.autofit();
    Ok(workbook)
}
