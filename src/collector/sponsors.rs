// File: ./src/collector/sponsors.rs
//! Kiddush and scotch sponsorship. Both tables are best effort: a Shabbat
//! missing from one of them only costs its fields.
use crate::client::RowSource;
use crate::collector::padded;
use crate::config::Sheets;
use crate::model::FieldSet;
use anyhow::Result;
use chrono::NaiveDate;

pub const KIDDUSH_RANGE: &str = "Upcoming!A2:F55";
pub const SCOTCH_RANGE: &str = "2015+!A2:E55";

/// Whether `cell` mentions `needle` (a date like "1/4") as a whole token,
/// so "1/4" does not match inside "11/4".
fn mentions_date(cell: &str, needle: &str) -> bool {
    cell.match_indices(needle).any(|(pos, _)| {
        let before = cell[..pos].chars().next_back();
        let after = cell[pos + needle.len()..].chars().next();
        !before.is_some_and(|c| c.is_ascii_digit()) && !after.is_some_and(|c| c.is_ascii_digit())
    })
}

pub fn kiddush(date: NaiveDate, rows: &dyn RowSource, sheet_id: &str) -> Result<FieldSet> {
    let key = date.format("%-m/%-d").to_string();
    let mut fields = FieldSet::new();
    let all = rows.rows(sheet_id, KIDDUSH_RANGE)?;
    let Some(row) = all
        .iter()
        .find(|row| row.first().is_some_and(|cell| mentions_date(cell, &key)))
    else {
        log::warn!("could not find date {} in kiddush spreadsheet", key);
        return Ok(fields);
    };
    let row = padded(row, 5);
    fields.insert("kiddush_volunteer", row[4].as_str());
    fields.insert("thank_you_kiddush_volunteer", row[4].as_str());
    fields.insert("kiddush_sponsor", format!("{}, {}", row[1], row[3]));
    Ok(fields)
}

pub fn scotch(date: NaiveDate, rows: &dyn RowSource, sheet_id: &str) -> Result<FieldSet> {
    let key = date.format("%-m/%-d/%Y").to_string();
    let mut fields = FieldSet::new();
    let all = rows.rows(sheet_id, SCOTCH_RANGE)?;
    let Some(row) = all
        .iter()
        .find(|row| row.first().is_some_and(|cell| cell.trim() == key))
    else {
        log::warn!("could not find date {} in scotch spreadsheet", key);
        return Ok(fields);
    };
    let row = padded(row, 5);
    fields.insert("scotch_sponsor", format!("{}, {}", row[2], row[4]));
    Ok(fields)
}

pub fn collect(date: NaiveDate, rows: &dyn RowSource, sheets: &Sheets) -> Result<FieldSet> {
    Ok(FieldSet::fold([
        kiddush(date, rows, &sheets.kiddush)?,
        scotch(date, rows, &sheets.scotch)?,
    ]))
}
