//! Core library for the warehouse-routing command line application.
//!
//! The pipeline loads a subscriber roster and a country routing guide, assigns
//! each subscriber to a supplier, and derives labels, a per-supplier summary,
//! and a processed export. Spreadsheet adapters live under
//! [`citipost::warehouse::io`], plain records in [`citipost::warehouse::model`],
//! and the orchestration helpers used by the CLI in
//! [`citipost::warehouse::pipeline`].

pub mod citipost;

pub use citipost::warehouse::{
    Result, ToolError, aggregate, assign, config, error, io, labels, model, pipeline,
};
