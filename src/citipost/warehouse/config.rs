//! Runtime settings for the tool.
//!
//! Every field has a default matching the layout of the production workbooks,
//! so a settings file only needs to name what differs. Column positions are
//! 1-indexed, the same way spreadsheet users count them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::citipost::warehouse::error::{Result, ToolError};

/// Carrier used whenever the routing guide has no entry for a country.
pub const DEFAULT_FALLBACK_SUPPLIER: &str = "BP 2";

pub const DEFAULT_SUBSCRIBERS_PATH: &str = "Data/HFM#526-Subscribers Report.xlsx";
pub const DEFAULT_ROUTING_PATH: &str = "Data/PAGEANT ROUTING GUIDE.xlsx";
pub const DEFAULT_OUTPUT_DIR: &str = "Reports";

pub const SUBSCRIBER_CONTACT_NAME_COLUMN: u16 = 3;
pub const SUBSCRIBER_ACCOUNT_NAME_COLUMN: u16 = 4;
pub const SUBSCRIBER_ADDRESS1_COLUMN: u16 = 5;
pub const SUBSCRIBER_ADDRESS2_COLUMN: u16 = 6;
pub const SUBSCRIBER_ADDRESS3_COLUMN: u16 = 7;
pub const SUBSCRIBER_CITY_COLUMN: u16 = 8;
pub const SUBSCRIBER_STATE_COLUMN: u16 = 9;
pub const SUBSCRIBER_POST_CODE_COLUMN: u16 = 10;
pub const SUBSCRIBER_COUNTRY_COLUMN: u16 = 11;

pub const ROUTING_COUNTRY_COLUMN: u16 = 1;
pub const ROUTING_SUPPLIER_COLUMN: u16 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sources: SourceSettings,
    pub output_dir: PathBuf,
    pub fallback_supplier: String,
    pub subscriber_columns: SubscriberColumns,
    pub routing_columns: RoutingColumns,
    pub labels: LabelSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sources: SourceSettings::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            fallback_supplier: DEFAULT_FALLBACK_SUPPLIER.to_string(),
            subscriber_columns: SubscriberColumns::default(),
            routing_columns: RoutingColumns::default(),
            labels: LabelSettings::default(),
        }
    }
}

impl Settings {
    /// Reads settings from a TOML file, filling anything unspecified with
    /// defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let settings = Self::from_toml(&text)?;
        debug!(path = %path.display(), "loaded settings file");
        Ok(settings)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let columns = self
            .subscriber_columns
            .all()
            .into_iter()
            .chain([
                ("routing country", self.routing_columns.country),
                ("routing supplier", self.routing_columns.supplier),
            ]);
        for (name, column) in columns {
            if column == 0 {
                return Err(ToolError::Config(format!(
                    "column '{name}' must be 1 or greater"
                )));
            }
        }
        if self.labels.per_row == 0 || self.labels.per_column == 0 {
            return Err(ToolError::Config(
                "label grid needs at least one row and one column".into(),
            ));
        }
        if self.fallback_supplier.trim().is_empty() {
            return Err(ToolError::Config("fallback supplier is blank".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub subscribers: PathBuf,
    pub routing: PathBuf,
    /// Worksheet to read; the first worksheet when unset.
    pub subscriber_sheet: Option<String>,
    pub routing_sheet: Option<String>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            subscribers: PathBuf::from(DEFAULT_SUBSCRIBERS_PATH),
            routing: PathBuf::from(DEFAULT_ROUTING_PATH),
            subscriber_sheet: None,
            routing_sheet: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriberColumns {
    pub contact_name: u16,
    pub account_name: u16,
    pub address1: u16,
    pub address2: u16,
    pub address3: u16,
    pub city: u16,
    pub state_province: u16,
    pub post_code: u16,
    pub country: u16,
}

impl Default for SubscriberColumns {
    fn default() -> Self {
        Self {
            contact_name: SUBSCRIBER_CONTACT_NAME_COLUMN,
            account_name: SUBSCRIBER_ACCOUNT_NAME_COLUMN,
            address1: SUBSCRIBER_ADDRESS1_COLUMN,
            address2: SUBSCRIBER_ADDRESS2_COLUMN,
            address3: SUBSCRIBER_ADDRESS3_COLUMN,
            city: SUBSCRIBER_CITY_COLUMN,
            state_province: SUBSCRIBER_STATE_COLUMN,
            post_code: SUBSCRIBER_POST_CODE_COLUMN,
            country: SUBSCRIBER_COUNTRY_COLUMN,
        }
    }
}

impl SubscriberColumns {
    fn all(&self) -> [(&'static str, u16); 9] {
        [
            ("contact_name", self.contact_name),
            ("account_name", self.account_name),
            ("address1", self.address1),
            ("address2", self.address2),
            ("address3", self.address3),
            ("city", self.city),
            ("state_province", self.state_province),
            ("post_code", self.post_code),
            ("country", self.country),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingColumns {
    pub country: u16,
    pub supplier: u16,
}

impl Default for RoutingColumns {
    fn default() -> Self {
        Self {
            country: ROUTING_COUNTRY_COLUMN,
            supplier: ROUTING_SUPPLIER_COLUMN,
        }
    }
}

/// Label sheet geometry in printer units (hundredths of an inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSettings {
    pub per_row: usize,
    pub per_column: usize,
    pub width: f32,
    pub height: f32,
    pub left_margin: f32,
    pub top_margin: f32,
    pub horizontal_spacing: f32,
    pub vertical_spacing: f32,
    pub padding: f32,
    pub line_height: f32,
    /// Average advance of one character in the body font.
    pub glyph_width: f32,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            per_row: 2,
            per_column: 5,
            width: 350.0,
            height: 150.0,
            left_margin: 50.0,
            top_margin: 50.0,
            horizontal_spacing: 20.0,
            vertical_spacing: 30.0,
            padding: 8.0,
            line_height: 13.0,
            glyph_width: 5.5,
        }
    }
}
