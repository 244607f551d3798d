// File: ./src/collector/leyning.rs
//! Where the week's readings start, from the calendar service.
use crate::client::CalendarSource;
use crate::model::FieldSet;
use crate::model::fields::transliterate_book;
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;

/// Start of a reading: canonical book name, chapter and verse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseRef {
    pub book: String,
    pub chapter: String,
    pub verse: String,
}

impl VerseRef {
    pub fn new(book: &str, chapter: &str, verse: &str) -> Self {
        Self {
            book: book.to_string(),
            chapter: chapter.to_string(),
            verse: verse.to_string(),
        }
    }

    /// Parses the start of a reading such as "I Samuel 20:18-42".
    pub fn parse_start(source: &str) -> Result<Self> {
        let start = source.split('-').next().unwrap_or_default().trim();
        let (book, position) = start
            .rsplit_once(char::is_whitespace)
            .ok_or_else(|| anyhow!("Malformed reading '{}'", source))?;
        let (chapter, verse) = position
            .split_once(':')
            .ok_or_else(|| anyhow!("Malformed reading '{}'", source))?;
        Ok(Self::new(book.trim(), chapter, verse))
    }

    /// Reads a reference back from the `<prefix>_book_english`,
    /// `<prefix>_chapter` and `<prefix>_verse` fields.
    pub fn from_fields(fields: &FieldSet, prefix: &str) -> Result<Self> {
        let get = |suffix: &str| fields.require(&format!("{}_{}", prefix, suffix));
        Ok(Self::new(get("book_english")?, get("chapter")?, get("verse")?))
    }
}

fn insert_reading(fields: &mut FieldSet, aliyah: &str, reading: &VerseRef) -> Result<()> {
    let book = transliterate_book(&reading.book)?;
    match aliyah {
        "1" => {
            fields.insert("parasha_book_english", reading.book.as_str());
            fields.insert("parasha_book", book);
            fields.insert("parasha_chapter", reading.chapter.as_str());
            fields.insert("parasha_verse", reading.verse.as_str());
        }
        "4" => {
            fields.insert("fourth_aliyah_chapter", reading.chapter.as_str());
            fields.insert("fourth_aliyah_verse", reading.verse.as_str());
        }
        "7" => {
            fields.insert("seventh_aliyah_chapter", reading.chapter.as_str());
            fields.insert("seventh_aliyah_verse", reading.verse.as_str());
        }
        "maftir" => {
            // Printed only on Hanukkah, where the maftir changes with the day.
            fields.insert("maftir_book_english", reading.book.as_str());
            fields.insert("maftir_book", book);
            fields.insert("maftir_chapter", reading.chapter.as_str());
            fields.insert("maftir_verse", reading.verse.as_str());
            fields.insert("maftir_hanukkah_note", reading.verse.as_str());
        }
        "haftarah" => {
            fields.insert("haftarah_book_english", reading.book.as_str());
            fields.insert("haftarah_book", book);
            fields.insert("haftarah_chapter", reading.chapter.as_str());
            fields.insert("haftarah_verse", reading.verse.as_str());
        }
        _ => {}
    }
    Ok(())
}

pub fn collect(date: NaiveDate, calendar: &dyn CalendarSource) -> Result<FieldSet> {
    let mut fields = FieldSet::new();
    for table in calendar.leyning(date)? {
        for (aliyah, source) in &table {
            if !matches!(aliyah.as_str(), "1" | "4" | "7" | "maftir" | "haftarah") {
                continue;
            }
            log::debug!("{}: {}", aliyah, source);
            let reading = VerseRef::parse_start(source)?;
            insert_reading(&mut fields, aliyah, &reading)
                .with_context(|| format!("Reading {} ({})", aliyah, source))?;
        }
    }
    Ok(fields)
}
