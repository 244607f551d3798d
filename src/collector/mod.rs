// File: ./src/collector/mod.rs
//! Builds the placeholder values for one Shabbat.
//!
//! Each sub-collector returns a partial [`FieldSet`]; `collect` merges them
//! left to right, so a later collector overrides an earlier one on the same
//! key.
pub mod leyner;
pub mod leyning;
pub mod pages;
pub mod roster;
pub mod special;
pub mod sponsors;

use crate::client::{CalendarSource, RowSource};
use crate::collector::leyning::VerseRef;
use crate::collector::pages::PageTable;
use crate::config::Config;
use crate::model::{FieldSet, SpecialFlags};
use anyhow::Result;
use chrono::NaiveDate;

/// External data the collectors read from.
#[derive(Clone, Copy)]
pub struct Sources<'a> {
    pub calendar: &'a dyn CalendarSource,
    pub sheets: &'a dyn RowSource,
}

/// Row cut or padded with empty cells to exactly `width` cells.
pub(crate) fn padded(row: &[String], width: usize) -> Vec<String> {
    let mut row: Vec<String> = row.iter().take(width).cloned().collect();
    row.resize(width, String::new());
    row
}

pub fn date_fields(date: NaiveDate, config: &Config) -> FieldSet {
    let mut fields = FieldSet::new();
    fields.insert("date", date.format("%-m/%-d/%Y").to_string());
    fields.insert("family_programming", config.family_programming.as_str());
    fields
}

/// Parasha whose row must be used for the haftarah page numbers, when the
/// haftarah starts at the same verse as another one in the table.
pub fn haftarah_disambiguator(fields: &FieldSet, flags: &SpecialFlags) -> Option<&'static str> {
    match fields.get("parasha_title") {
        // Hanukkah's haftarah starts where Beha'alotcha's does.
        Some("Beha'alotcha") => Some("Beha'alotcha"),
        // So does Ki Teitzei's, for Noach.
        Some("Noach") => Some("Noach"),
        _ if flags.consolation_3_appended_to_5 => Some("Noach"),
        _ => None,
    }
}

pub fn collect(
    date: NaiveDate,
    flags: &SpecialFlags,
    sources: Sources<'_>,
    config: &Config,
) -> Result<FieldSet> {
    let mut fields = date_fields(date, config)
        .merge(roster::collect(date, sources.sheets, config)?)
        .merge(sponsors::collect(date, sources.sheets, &config.sheets)?)
        .merge(leyning::collect(date, sources.calendar)?);

    let torah_readers = fields.require("torah_multiline")?.to_string();
    fields = FieldSet::fold([
        fields,
        special::standing_aliyah_leyners(flags, &torah_readers),
        special::haftarah(flags)?,
        special::hanukkah(flags)?,
        special::omer(flags),
        special::birkat_hachodesh(flags),
        special::notes(flags),
    ]);

    // Maftir first: when a maftir starts where a parasha does (Shekalim and
    // Ki Tisa, Parah and Chukat), the parasha lookup must have the last word
    // on the parasha page numbers.
    let table = PageTable::load(sources.sheets, &config.sheets.page_numbers)?;
    let maftir = VerseRef::from_fields(&fields, "maftir")?;
    let parasha = VerseRef::from_fields(&fields, "parasha")?;
    let haftarah = VerseRef::from_fields(&fields, "haftarah")?;
    let disambiguator = haftarah_disambiguator(&fields, flags);
    log::debug!("Haftarah page lookup restricted to {:?}", disambiguator);

    let page_fields = FieldSet::fold([
        table.lookup(&maftir, None),
        table.lookup(&parasha, None),
        table.lookup(&haftarah, disambiguator),
    ]);
    let mi_shebeyrach = pages::mi_shebeyrach_list(sources.sheets, &config.sheets.page_numbers)?;

    Ok(FieldSet::fold([fields, page_fields, mi_shebeyrach]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded() {
        let row = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(padded(&row, 2), vec!["a", "b"]);
        assert_eq!(padded(&row, 5), vec!["a", "b", "c", "", ""]);
    }

    #[test]
    fn test_haftarah_disambiguator() {
        let mut fields = FieldSet::new();
        fields.insert("parasha_title", "Noach");
        assert_eq!(
            haftarah_disambiguator(&fields, &SpecialFlags::default()),
            Some("Noach")
        );

        fields.insert("parasha_title", "Ki Teitzei");
        assert_eq!(haftarah_disambiguator(&fields, &SpecialFlags::default()), None);
        let flags = SpecialFlags {
            consolation_3_appended_to_5: true,
            ..Default::default()
        };
        assert_eq!(haftarah_disambiguator(&fields, &flags), Some("Noach"));

        fields.insert("parasha_title", "Beha'alotcha");
        assert_eq!(
            haftarah_disambiguator(&fields, &SpecialFlags::default()),
            Some("Beha'alotcha")
        );
        // The parasha title outranks the appended-haftarah flag.
        assert_eq!(haftarah_disambiguator(&fields, &flags), Some("Beha'alotcha"));
    }
}
