// File: ./src/client/mod.rs
//! Narrow interfaces to the outside world, and their HTTP implementations.
//!
//! The classifier and the collectors only see these traits, so tests can
//! drive them from fixed fixtures.
pub mod google;
pub mod hebcal;

use crate::model::{Document, EditRequest, HebrewDay};
use anyhow::Result;
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub use google::GoogleClient;
pub use hebcal::HebcalClient;

/// Hebrew-calendar conversion and readings.
pub trait CalendarSource {
    fn hebrew_date(&self, date: NaiveDate) -> Result<HebrewDay>;

    /// Every day of `start..=end`, in date order.
    fn hebrew_dates(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<(NaiveDate, HebrewDay)>>;

    /// Reading tables (aliyah key -> "Book C:V-C:V") of every calendar item on
    /// `date` that carries one, in the service's order.
    fn leyning(&self, date: NaiveDate) -> Result<Vec<BTreeMap<String, String>>>;
}

/// Tabular rows of a spreadsheet range.
pub trait RowSource {
    fn rows(&self, sheet_id: &str, range: &str) -> Result<Vec<Vec<String>>>;
}

pub trait DocumentStore {
    /// Copies a template document and returns the id of the copy.
    fn copy_template(&self, template_id: &str, title: &str) -> Result<String>;

    fn get_document(&self, document_id: &str) -> Result<Document>;

    /// Applies `requests` atomically, in order.
    fn batch_update(&self, document_id: &str, requests: &[EditRequest]) -> Result<()>;
}
