// File: tests/common/mod.rs
//! In-memory stand-ins for the calendar service, the spreadsheets and the
//! document store.
#![allow(dead_code)]

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use cheat_sheet::client::{CalendarSource, DocumentStore, RowSource};
use cheat_sheet::model::{Document, EditRequest, HebrewDay, HebrewMonth};
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn cells(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[derive(Default)]
pub struct FakeCalendar {
    days: BTreeMap<NaiveDate, HebrewDay>,
    readings: BTreeMap<NaiveDate, Vec<BTreeMap<String, String>>>,
}

impl FakeCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn day(
        mut self,
        date: NaiveDate,
        year: i32,
        month: HebrewMonth,
        day: u32,
        events: &[&str],
    ) -> Self {
        self.days.insert(
            date,
            HebrewDay {
                year,
                month,
                day,
                events: cells(events),
            },
        );
        self
    }

    pub fn reading(mut self, date: NaiveDate, table: &[(&str, &str)]) -> Self {
        self.readings.entry(date).or_default().push(
            table
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        self
    }
}

impl CalendarSource for FakeCalendar {
    fn hebrew_date(&self, date: NaiveDate) -> Result<HebrewDay> {
        self.days
            .get(&date)
            .cloned()
            .ok_or_else(|| anyhow!("no fixture for {}", date))
    }

    /// Only the days that have a fixture; the rest carry no events.
    fn hebrew_dates(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<(NaiveDate, HebrewDay)>> {
        Ok(self
            .days
            .range(start..=end)
            .map(|(date, day)| (*date, day.clone()))
            .collect())
    }

    fn leyning(&self, date: NaiveDate) -> Result<Vec<BTreeMap<String, String>>> {
        Ok(self.readings.get(&date).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct FakeSheets {
    ranges: HashMap<(String, String), Vec<Vec<String>>>,
}

impl FakeSheets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn range(mut self, sheet_id: &str, range: &str, rows: Vec<Vec<String>>) -> Self {
        self.ranges
            .insert((sheet_id.to_string(), range.to_string()), rows);
        self
    }
}

impl RowSource for FakeSheets {
    fn rows(&self, sheet_id: &str, range: &str) -> Result<Vec<Vec<String>>> {
        self.ranges
            .get(&(sheet_id.to_string(), range.to_string()))
            .cloned()
            .ok_or_else(|| anyhow!("no fixture for {} {}", sheet_id, range))
    }
}

/// A document made of one text run per paragraph, laid out back to back
/// from index 1. Edits are recorded; deletions and replacements are also
/// applied to the text so later lookups see shifted indices.
pub struct FakeDocs {
    pub copies: RefCell<Vec<(String, String)>>,
    pub batches: RefCell<Vec<Vec<EditRequest>>>,
    paragraphs: RefCell<Vec<String>>,
    header: Vec<String>,
}

impl FakeDocs {
    pub fn new(paragraphs: &[&str], header: &[&str]) -> Self {
        Self {
            copies: RefCell::new(Vec::new()),
            batches: RefCell::new(Vec::new()),
            paragraphs: RefCell::new(cells(paragraphs)),
            header: cells(header),
        }
    }

    pub fn text(&self) -> String {
        self.paragraphs.borrow().concat()
    }

    pub fn requests(&self) -> Vec<EditRequest> {
        self.batches.borrow().iter().flatten().cloned().collect()
    }

    fn content(paragraphs: &[String]) -> Vec<Value> {
        let mut index = 1;
        paragraphs
            .iter()
            .map(|text| {
                let len = text.encode_utf16().count();
                let run = json!({"paragraph": {"elements": [{
                    "startIndex": index,
                    "endIndex": index + len,
                    "textRun": {"content": text},
                }]}});
                index += len;
                run
            })
            .collect()
    }

    /// Removes `[start, end)` (ASCII fixtures only) from the paragraphs.
    fn delete(&self, start: usize, end: usize) {
        assert!(start < end, "empty deletion {}..{}", start, end);
        let mut offset = 1;
        let mut kept = Vec::new();
        for paragraph in self.paragraphs.borrow().iter() {
            let p_start = offset;
            let p_end = offset + paragraph.len();
            offset = p_end;
            let cut_start = start.clamp(p_start, p_end) - p_start;
            let cut_end = end.clamp(p_start, p_end) - p_start;
            let remaining = format!("{}{}", &paragraph[..cut_start], &paragraph[cut_end..]);
            if !remaining.is_empty() {
                kept.push(remaining);
            }
        }
        *self.paragraphs.borrow_mut() = kept;
    }
}

impl DocumentStore for FakeDocs {
    fn copy_template(&self, template_id: &str, title: &str) -> Result<String> {
        self.copies
            .borrow_mut()
            .push((template_id.to_string(), title.to_string()));
        Ok("copy-1".to_string())
    }

    fn get_document(&self, document_id: &str) -> Result<Document> {
        let header = FakeDocs::content(&self.header);
        Ok(serde_json::from_value(json!({
            "documentId": document_id,
            "body": {"content": FakeDocs::content(&self.paragraphs.borrow())},
            "headers": {"kix.header": {"headerId": "kix.header", "content": header}},
        }))?)
    }

    fn batch_update(&self, _document_id: &str, requests: &[EditRequest]) -> Result<()> {
        for request in requests {
            match request {
                EditRequest::DeleteContentRange { range } => {
                    self.delete(range.start_index, range.end_index)
                }
                EditRequest::ReplaceNamedRangeContent {
                    named_range_name,
                    text,
                } => {
                    let token = format!("<{}>", named_range_name.to_uppercase());
                    for paragraph in self.paragraphs.borrow_mut().iter_mut() {
                        *paragraph = paragraph.replace(&token, text);
                    }
                }
                _ => {}
            }
        }
        self.batches.borrow_mut().push(requests.to_vec());
        Ok(())
    }
}
