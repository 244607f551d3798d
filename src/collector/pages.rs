// File: ./src/collector/pages.rs
//! Page numbers of the readings in the Etz Hayim and Hertz chumashim.
//!
//! Each row holds a parasha (columns A-F: name, Etz Hayim page, Hertz page,
//! book, chapter, verse) and its haftarah (columns G-K: Etz Hayim page,
//! Hertz page, book, chapter, verse). Rows after the first blank row list
//! special maftir readings instead of parshiyot.
use crate::client::RowSource;
use crate::collector::leyning::VerseRef;
use crate::collector::padded;
use crate::model::FieldSet;
use anyhow::Result;

pub const PAGE_NUMBERS_RANGE: &str = "A3:K72";
pub const MI_SHEBEYRACH_RANGE: &str = "Mi Shebeyrach!A1:A50";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRow {
    pub parasha: String,
    pub etz_hayim: String,
    pub hertz: String,
    pub reading: VerseRef,
    pub haftarah_etz_hayim: String,
    pub haftarah_hertz: String,
    pub haftarah: VerseRef,
    /// Listed in the maftir section.
    pub maftir: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PageTable {
    rows: Vec<PageRow>,
}

impl PageTable {
    pub fn from_rows(raw: &[Vec<String>]) -> Self {
        let mut maftir = false;
        let mut rows = Vec::new();
        for row in raw {
            if row.iter().all(|cell| cell.trim().is_empty()) {
                maftir = true;
                continue;
            }
            let row = padded(row, 11);
            rows.push(PageRow {
                parasha: row[0].clone(),
                etz_hayim: row[1].clone(),
                hertz: row[2].clone(),
                reading: VerseRef::new(&row[3], &row[4], &row[5]),
                haftarah_etz_hayim: row[6].clone(),
                haftarah_hertz: row[7].clone(),
                haftarah: VerseRef::new(&row[8], &row[9], &row[10]),
                maftir,
            });
        }
        Self { rows }
    }

    pub fn load(source: &dyn RowSource, sheet_id: &str) -> Result<Self> {
        Ok(Self::from_rows(&source.rows(sheet_id, PAGE_NUMBERS_RANGE)?))
    }

    /// Page fields for every row whose reading or haftarah starts at `start`.
    ///
    /// A reading match fills `parasha_*`, or `maftir_*` in the maftir
    /// section. A haftarah match fills `haftarah_*`, restricted to rows of
    /// `parasha` when given; haftarot shared by several parshiyot are told
    /// apart that way. Later rows win.
    pub fn lookup(&self, start: &VerseRef, parasha: Option<&str>) -> FieldSet {
        let mut fields = FieldSet::new();
        for row in &self.rows {
            if row.reading == *start {
                let (eh, hertz) = if row.maftir {
                    ("maftir_etz_hayim", "maftir_hertz")
                } else {
                    ("parasha_etz_hayim", "parasha_hertz")
                };
                fields.insert(eh, row.etz_hayim.as_str());
                fields.insert(hertz, row.hertz.as_str());
            }
            if row.haftarah == *start && parasha.is_none_or(|p| p == row.parasha) {
                fields.insert("haftarah_etz_hayim", row.haftarah_etz_hayim.as_str());
                fields.insert("haftarah_hertz", row.haftarah_hertz.as_str());
            }
        }
        fields
    }
}

pub fn mi_shebeyrach_list(source: &dyn RowSource, sheet_id: &str) -> Result<FieldSet> {
    let rows = source.rows(sheet_id, MI_SHEBEYRACH_RANGE)?;
    let names: Vec<&str> = rows
        .iter()
        .filter_map(|row| row.first())
        .map(String::as_str)
        .collect();
    let mut fields = FieldSet::new();
    fields.insert("mi_shebeyrach_list", names.join("\n"));
    Ok(fields)
}
