use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, info, instrument, warn};

use crate::citipost::warehouse::aggregate;
use crate::citipost::warehouse::assign::assign_suppliers;
use crate::citipost::warehouse::config::Settings;
use crate::citipost::warehouse::error::{Result, ToolError};
use crate::citipost::warehouse::io::{excel_read, excel_write};
use crate::citipost::warehouse::labels;
use crate::citipost::warehouse::model::{
    AssignedSubscriber, LabelRecord, SubscriberRecord, SummaryRecord, SupplierRecord,
};

pub const PROCESSED_FILE_PREFIX: &str = "ProcessedWarehouseData";
pub const LABELS_FILE_PREFIX: &str = "CarrierLabels";
pub const SUMMARY_FILE_PREFIX: &str = "SupplierSummaryReport";

const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Both source tables as loaded from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Sources {
    pub subscribers: Vec<SubscriberRecord>,
    pub suppliers: Vec<SupplierRecord>,
}

impl Sources {
    pub fn assign(self, fallback: &str) -> Vec<AssignedSubscriber> {
        assign_suppliers(self.subscribers, &self.suppliers, fallback)
    }
}

/// Paths of the artifacts written by [`run_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutputs {
    pub processed: PathBuf,
    pub labels: PathBuf,
    pub summary: PathBuf,
}

/// Loads the subscriber roster and the routing guide. Every missing input is
/// logged before the first one is reported.
#[instrument(
    level = "info",
    skip_all,
    fields(
        subscribers = %settings.sources.subscribers.display(),
        routing = %settings.sources.routing.display()
    )
)]
pub fn load_sources(settings: &Settings) -> Result<Sources> {
    let sources = &settings.sources;
    let missing: Vec<&Path> = [sources.subscribers.as_path(), sources.routing.as_path()]
        .into_iter()
        .filter(|path| !path.exists())
        .collect();
    for path in &missing {
        warn!(path = %path.display(), "required source file is missing");
    }
    if let Some(path) = missing.first() {
        return Err(ToolError::SourceNotFound(path.to_path_buf()));
    }

    let subscribers = excel_read::read_subscribers(
        &sources.subscribers,
        sources.subscriber_sheet.as_deref(),
        &settings.subscriber_columns,
    )?;
    let suppliers = excel_read::read_suppliers(
        &sources.routing,
        sources.routing_sheet.as_deref(),
        &settings.routing_columns,
    )?;
    info!(
        subscriber_count = subscribers.len(),
        supplier_count = suppliers.len(),
        "loaded source tables"
    );

    Ok(Sources {
        subscribers,
        suppliers,
    })
}

/// Loads both sources and routes every subscriber to a supplier.
pub fn load_and_assign(settings: &Settings) -> Result<Vec<AssignedSubscriber>> {
    let assigned = load_sources(settings)?.assign(&settings.fallback_supplier);
    info!(assigned = assigned.len(), "suppliers assigned");
    Ok(assigned)
}

/// Writes the processed roster into `output_dir` under a timestamped name and
/// returns the path written.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display()))]
pub fn export_processed(
    assigned: &[AssignedSubscriber],
    output_dir: &Path,
    generated_at: NaiveDateTime,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|error| ToolError::write_failure(output_dir, error))?;
    let path = output_dir.join(timestamped_file_name(PROCESSED_FILE_PREFIX, generated_at));
    excel_write::write_records(&path, assigned)?;
    info!(rows = assigned.len(), path = %path.display(), "processed data saved");
    Ok(path)
}

#[instrument(level = "info", skip_all, fields(output = %output.display()))]
pub fn export_labels(labels: &[LabelRecord], output: &Path) -> Result<()> {
    ensure_parent(output)?;
    excel_write::write_records(output, labels)?;
    info!(labels = labels.len(), "labels exported");
    Ok(())
}

#[instrument(level = "info", skip_all, fields(output = %output.display()))]
pub fn export_summary(
    summary: &[SummaryRecord],
    output: &Path,
    generated_at: NaiveDateTime,
) -> Result<()> {
    ensure_parent(output)?;
    excel_write::write_summary_report(output, summary, generated_at)?;
    info!(suppliers = summary.len(), "summary report exported");
    Ok(())
}

/// Loads, assigns, and writes all three artifacts into the output directory.
#[instrument(level = "info", skip_all, fields(output_dir = %settings.output_dir.display()))]
pub fn run_all(settings: &Settings, generated_at: NaiveDateTime) -> Result<RunOutputs> {
    let assigned = load_and_assign(settings)?;
    let processed = export_processed(&assigned, &settings.output_dir, generated_at)?;

    let label_records = labels::build_labels(&assigned, generated_at);
    let labels_path = default_output_path(&settings.output_dir, LABELS_FILE_PREFIX, generated_at);
    export_labels(&label_records, &labels_path)?;

    let summary = aggregate::summarize(&assigned);
    debug!(suppliers = summary.len(), "summary computed");
    let summary_path =
        default_output_path(&settings.output_dir, SUMMARY_FILE_PREFIX, generated_at);
    export_summary(&summary, &summary_path, generated_at)?;

    Ok(RunOutputs {
        processed,
        labels: labels_path,
        summary: summary_path,
    })
}

/// `<prefix>_YYYYMMDD_HHMMSS.xlsx`
pub fn timestamped_file_name(prefix: &str, at: NaiveDateTime) -> String {
    format!("{prefix}_{}.xlsx", at.format(FILE_STAMP_FORMAT))
}

pub fn default_output_path(output_dir: &Path, prefix: &str, at: NaiveDateTime) -> PathBuf {
    output_dir.join(timestamped_file_name(prefix, at))
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .map_err(|error| ToolError::write_failure(parent, error)),
        _ => Ok(()),
    }
}
