// File: ./src/model/document.rs
//! Read model of a template document and the batch-edit requests applied to it.
//!
//! Offsets are the document's own indices (UTF-16 code units), so a placeholder
//! found inside a text run is located by converting its byte offset within the
//! run.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub document_id: String,
    #[serde(default)]
    pub body: Body,
    #[serde(default)]
    pub headers: BTreeMap<String, Header>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub header_id: String,
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StructuralElement {
    pub paragraph: Option<Paragraph>,
    pub table: Option<Table>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub elements: Vec<ParagraphElement>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphElement {
    #[serde(default)]
    pub start_index: usize,
    #[serde(default)]
    pub end_index: usize,
    pub text_run: Option<TextRun>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextRun {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(default)]
    pub table_rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    #[serde(default)]
    pub table_cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableCell {
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

/// Half-open span of document indices.
pub type Span = (usize, usize);

pub fn placeholder(field: &str) -> String {
    format!("<{}>", field.to_uppercase())
}

/// Locates `<FIELD>` tokens for the given vocabulary, descending into tables.
/// A field that appears more than once keeps its last position.
pub fn find_placeholders(
    content: &[StructuralElement],
    vocabulary: &[&str],
) -> BTreeMap<String, Span> {
    let mut found = BTreeMap::new();
    for element in content {
        collect_placeholders(element, vocabulary, &mut found);
    }
    found
}

fn collect_placeholders(
    element: &StructuralElement,
    vocabulary: &[&str],
    found: &mut BTreeMap<String, Span>,
) {
    if let Some(table) = &element.table {
        for cell in table.table_rows.iter().flat_map(|row| &row.table_cells) {
            for inner in &cell.content {
                collect_placeholders(inner, vocabulary, found);
            }
        }
    }
    if let Some(paragraph) = &element.paragraph {
        for run in &paragraph.elements {
            let Some(text) = &run.text_run else {
                continue;
            };
            for field in vocabulary {
                let token = placeholder(field);
                if let Some(byte_pos) = text.content.find(&token) {
                    let start = run.start_index + utf16_len(&text.content[..byte_pos]);
                    found.insert(field.to_string(), (start, start + utf16_len(&token)));
                }
            }
        }
    }
}

fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

impl Document {
    /// Text runs of top-level body paragraphs, in document order.
    pub fn body_runs(&self) -> impl Iterator<Item = (&ParagraphElement, &str)> {
        self.body
            .content
            .iter()
            .filter_map(|element| element.paragraph.as_ref())
            .flat_map(|paragraph| &paragraph.elements)
            .filter_map(|run| run.text_run.as_ref().map(|t| (run, t.content.as_str())))
    }

    /// Span of the last top-level run containing `needle`.
    pub fn find_run(&self, needle: &str) -> Option<Span> {
        self.body_runs()
            .filter(|(_, text)| text.contains(needle))
            .map(|(run, _)| (run.start_index, run.end_index))
            .last()
    }

    pub fn first_header(&self) -> Option<&Header> {
        self.headers.values().next()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    pub start_index: usize,
    pub end_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<String>,
}

impl Range {
    pub fn body((start_index, end_index): Span) -> Self {
        Self {
            start_index,
            end_index,
            segment_id: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RgbColor {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

pub const RED: RgbColor = RgbColor {
    red: 1.0,
    green: 0.0,
    blue: 0.0,
};

pub const GREEN: RgbColor = RgbColor {
    red: 0.0,
    green: 0.690_196_1,
    blue: 0.313_725_5,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub rgb_color: RgbColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptionalColor {
    pub color: Color,
}

impl From<RgbColor> for OptionalColor {
    fn from(rgb_color: RgbColor) -> Self {
        Self {
            color: Color { rgb_color },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<OptionalColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<OptionalColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub index: usize,
}

/// One entry of a batch edit, serialized in the document service's wire shape
/// (`{"createNamedRange": {...}}` and so on). A batch is applied in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EditRequest {
    CreateNamedRange {
        name: String,
        range: Range,
    },
    ReplaceNamedRangeContent {
        named_range_name: String,
        text: String,
    },
    UpdateTextStyle {
        range: Range,
        text_style: TextStyle,
        /// Comma-separated list of the style properties being set.
        fields: String,
    },
    DeleteContentRange {
        range: Range,
    },
    InsertText {
        location: Location,
        text: String,
    },
}
