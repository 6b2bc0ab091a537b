//! Page layout for label printing.
//!
//! Layout is a pure function of the label list and a page index, so a print
//! backend can request pages in any order and stop when `has_more` is false.
//! Drawing is left to the backend; this module only decides which label goes
//! where and how its text breaks into lines.

use serde::Serialize;

use crate::citipost::warehouse::config::LabelSettings;
use crate::citipost::warehouse::model::LabelRecord;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Measures rendered text width in the same units as [`LabelSettings`].
pub trait TextMeasure {
    fn width(&self, text: &str) -> f32;
}

/// Approximates text width as character count times an average glyph advance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageGlyphMeasure {
    pub glyph_width: f32,
}

impl TextMeasure for AverageGlyphMeasure {
    fn width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.glyph_width
    }
}

/// Number of label slots across and down one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGrid {
    pub per_row: usize,
    pub per_column: usize,
}

impl PageGrid {
    pub fn labels_per_page(&self) -> usize {
        self.per_row * self.per_column
    }

    /// Zero-based (row, column) of the `slot`-th label on a page, or `None`
    /// when the grid has no columns.
    pub fn position(&self, slot: usize) -> Option<(usize, usize)> {
        Some((slot.checked_div(self.per_row)?, slot.checked_rem(self.per_row)?))
    }
}

impl From<&LabelSettings> for PageGrid {
    fn from(settings: &LabelSettings) -> Self {
        Self {
            per_row: settings.per_row,
            per_column: settings.per_column,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelSlot {
    /// Index of the label in the full list.
    pub index: usize,
    pub row: usize,
    pub column: usize,
    pub x: f32,
    pub y: f32,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelPage {
    pub index: usize,
    pub slots: Vec<LabelSlot>,
    pub has_more: bool,
}

/// Pages needed for `label_count` labels; zero when the grid holds no slots.
pub fn page_count(label_count: usize, grid: PageGrid) -> usize {
    match grid.labels_per_page() {
        0 => 0,
        per_page => label_count.div_ceil(per_page),
    }
}

/// Lays out page `page_index`, or returns `None` past the last page. A grid
/// without slots has no pages at all.
pub fn layout_page(
    labels: &[LabelRecord],
    page_index: usize,
    settings: &LabelSettings,
    measure: &dyn TextMeasure,
) -> Option<LabelPage> {
    let grid = PageGrid::from(settings);
    let per_page = grid.labels_per_page();
    if per_page == 0 {
        return None;
    }
    let start = page_index.checked_mul(per_page)?;
    if start >= labels.len() {
        return None;
    }
    let end = (start + per_page).min(labels.len());
    let text_width = settings.width - 2.0 * settings.padding;

    let slots = labels[start..end]
        .iter()
        .enumerate()
        .map(|(slot, label)| {
            let (row, column) = grid.position(slot)?;
            Some(LabelSlot {
                index: start + slot,
                row,
                column,
                x: settings.left_margin
                    + column as f32 * (settings.width + settings.horizontal_spacing),
                y: settings.top_margin
                    + row as f32 * (settings.height + settings.vertical_spacing),
                lines: label_lines(label, text_width, measure),
            })
        })
        .collect::<Option<Vec<_>>>()?;

    Some(LabelPage {
        index: page_index,
        slots,
        has_more: end < labels.len(),
    })
}

/// Lays out every page in order.
pub fn layout_pages(
    labels: &[LabelRecord],
    settings: &LabelSettings,
    measure: &dyn TextMeasure,
) -> Vec<LabelPage> {
    (0..)
        .map_while(|page_index| layout_page(labels, page_index, settings, measure))
        .collect()
}

/// Text block printed on one label. Only the address wraps; an empty line
/// separates it from the supplier.
pub fn label_lines(label: &LabelRecord, max_width: f32, measure: &dyn TextMeasure) -> Vec<String> {
    let mut lines = vec![
        format!("TO: {}", label.contact_name),
        format!("Account: {}", label.account_name),
    ];
    lines.extend(wrap_text(
        &format!("Address: {}", label.full_address),
        max_width,
        measure,
    ));
    lines.push(String::new());
    lines.push(format!("Supplier: {}", label.supplier_name));
    lines.push(format!("Date: {}", label.created_at.format(DATE_FORMAT)));
    lines
}

/// Greedy word wrap: words join the current line while it still fits within
/// `max_width`. A word that is wider than the limit on its own gets a line to
/// itself rather than being split.
pub fn wrap_text(text: &str, max_width: f32, measure: &dyn TextMeasure) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measure.width(&candidate) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
