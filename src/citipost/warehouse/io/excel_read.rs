use std::path::Path;

use calamine::{DataType, Range, Reader, Xlsx, open_workbook};
use tracing::debug;

use crate::citipost::warehouse::config::{RoutingColumns, SubscriberColumns};
use crate::citipost::warehouse::error::{Result, ToolError};
use crate::citipost::warehouse::model::{SubscriberRecord, SupplierRecord, TIMESTAMP_FORMAT};

/// Reads the subscriber roster. Row 1 is the header; every following row in
/// the used range becomes one record, in sheet order.
pub fn read_subscribers(
    path: &Path,
    sheet: Option<&str>,
    columns: &SubscriberColumns,
) -> Result<Vec<SubscriberRecord>> {
    let range = read_source_range(path, sheet)?;
    let rows = data_rows(&range, path)?;

    let subscribers: Vec<SubscriberRecord> = rows
        .map(|row| SubscriberRecord {
            contact_name: cell_at(&range, row, columns.contact_name),
            account_name: cell_at(&range, row, columns.account_name),
            address1: cell_at(&range, row, columns.address1),
            address2: cell_at(&range, row, columns.address2),
            address3: cell_at(&range, row, columns.address3),
            city: cell_at(&range, row, columns.city),
            state_province: cell_at(&range, row, columns.state_province),
            post_code: cell_at(&range, row, columns.post_code),
            country: cell_at(&range, row, columns.country),
        })
        .collect();

    debug!(path = %path.display(), count = subscribers.len(), "read subscriber rows");
    Ok(subscribers)
}

/// Reads the country → supplier routing guide, keeping sheet order so the
/// first entry for a country wins during assignment.
pub fn read_suppliers(
    path: &Path,
    sheet: Option<&str>,
    columns: &RoutingColumns,
) -> Result<Vec<SupplierRecord>> {
    let range = read_source_range(path, sheet)?;
    let rows = data_rows(&range, path)?;

    let suppliers: Vec<SupplierRecord> = rows
        .map(|row| SupplierRecord {
            country: cell_at(&range, row, columns.country),
            supplier_name: cell_at(&range, row, columns.supplier),
        })
        .collect();

    debug!(path = %path.display(), count = suppliers.len(), "read routing rows");
    Ok(suppliers)
}

// The workbook is dropped before returning, so the file handle is released on
// every path out of this function.
fn read_source_range(path: &Path, sheet: Option<&str>) -> Result<Range<DataType>> {
    if !path.exists() {
        return Err(ToolError::SourceNotFound(path.to_path_buf()));
    }

    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|error: calamine::XlsxError| ToolError::MalformedSource {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?;

    match sheet {
        Some(name) => read_required_sheet(&mut workbook, path, name),
        None => {
            let range_result = workbook.worksheet_range_at(0).ok_or_else(|| {
                ToolError::MalformedSource {
                    path: path.to_path_buf(),
                    reason: "workbook contains no worksheets".into(),
                }
            })?;
            Ok(range_result?)
        }
    }
}

fn read_required_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    path: &Path,
    name: &str,
) -> Result<Range<DataType>> {
    let range_result =
        workbook
            .worksheet_range(name)
            .ok_or_else(|| ToolError::MalformedSource {
                path: path.to_path_buf(),
                reason: format!("missing sheet '{name}'"),
            })?;
    let range = range_result.map_err(ToolError::from)?;
    Ok(range)
}

/// Absolute row indices (0-based) of the data rows, i.e. everything after
/// the header row up to the last used row.
fn data_rows(range: &Range<DataType>, path: &Path) -> Result<std::ops::RangeInclusive<u32>> {
    match range.end() {
        Some((last_row, _)) if last_row >= 1 => Ok(1..=last_row),
        _ => Err(ToolError::EmptySource(path.to_path_buf())),
    }
}

fn cell_at(range: &Range<DataType>, row: u32, column: u16) -> String {
    let column = u32::from(column.saturating_sub(1));
    cell_to_string(range.get_value((row, column)))
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        // Date-formatted cells hold a serial number; render the calendar value.
        Some(cell @ (DataType::DateTime(_) | DataType::DateTimeIso(_))) => cell
            .as_datetime()
            .map(|at| at.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_else(|| cell.to_string()),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
