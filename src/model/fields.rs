// File: ./src/model/fields.rs
use anyhow::{Result, anyhow};
use serde::Serialize;
use std::collections::BTreeMap;

/// Placeholders every template carries, independent of the week's flags.
pub const BASE_FIELDS: &[&str] = &[
    "date",
    "parasha_title",
    "s1",
    "s2",
    "host",
    "shacharit",
    "maftir",
    "torah",
    "parasha_name",
    "parasha_book",
    "parasha_chapter",
    "parasha_verse",
    "parasha_etz_hayim",
    "parasha_hertz",
    "fourth_aliyah_chapter",
    "fourth_aliyah_verse",
    "mi_shebeyrach_s1",
    "seventh_aliyah_chapter",
    "seventh_aliyah_verse",
    "maftir_aliyah",
    "haftarah_parasha",
    "haftarah_book",
    "haftarah_chapter",
    "haftarah_verse",
    "haftarah_etz_hayim",
    "haftarah_hertz",
    "musaf",
    "dvar_torah",
    "next_meeting_date",
    "next_meeting_time",
    "thank_you_shamash",
    "thank_you_shacharit",
    "thank_you_torah",
    "thank_you_haftarah",
    "thank_you_musaf",
    "thank_you_teaching",
    "thank_you_greeter",
    "thank_you_kiddush_volunteer",
    "kiddush_sponsor",
    "scotch_sponsor",
];

/// Canonical (English) book names and the transliterations printed on the sheet.
const BOOKS: [(&str, &str); 23] = [
    ("Genesis", "B’reshit"),
    ("Exodus", "Sh’mot"),
    ("Leviticus", "Vayikra"),
    ("Numbers", "B’midbar"),
    ("Deuteronomy", "D’varim"),
    ("Joshua", "Yehoshua (Joshua)"),
    ("Judges", "Shof’tim (Judges)"),
    ("I Samuel", "Sh’muel Aleph (I Samuel)"),
    ("II Samuel", "Sh’muel Bet (II Samuel)"),
    ("I Kings", "M’lachim Aleph (I Kings)"),
    ("II Kings", "M’lachim Bet (II Kings)"),
    ("Isaiah", "Yeshayahu (Isaiah)"),
    ("Jeremiah", "Yirm’yahu (Jeremiah)"),
    ("Ezekiel", "Yechezkel (Ezekiel)"),
    ("Hosea", "Hoshea (Hosea)"),
    ("Joel", "Yoel (Joel)"),
    ("Amos", "Amos"),
    ("Obadiah", "Ovadiah"),
    ("Jonah", "Yonah (Jonah)"),
    ("Micah", "Mikhah (Micah)"),
    ("Habakkuk", "Chavakkuk"),
    ("Zechariah", "Zechariah"),
    ("Malachi", "Malachi"),
];

pub fn transliterate_book(book: &str) -> Result<&'static str> {
    BOOKS
        .iter()
        .find(|(english, _)| *english == book)
        .map(|(_, hebrew)| *hebrew)
        .ok_or_else(|| anyhow!("Unknown book name '{}' in leyning", book))
}

pub fn ordinal(n: u8) -> Option<&'static str> {
    match n {
        1 => Some("first"),
        2 => Some("second"),
        3 => Some("third"),
        4 => Some("fourth"),
        5 => Some("fifth"),
        6 => Some("sixth"),
        7 => Some("seventh"),
        8 => Some("eighth"),
        _ => None,
    }
}

/// Placeholder name -> substitution text.
///
/// Sets are combined with [`FieldSet::merge`], where the right-hand side wins
/// on conflicting keys. That ordering is how special-case values (a Hanukkah
/// haftarah, say) take precedence over calendar defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldSet(BTreeMap<&'static str, String>);

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, value: impl Into<String>) {
        self.0.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Like [`FieldSet::get`], for values a later step cannot do without.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| anyhow!("Field '{}' was not collected", key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    #[must_use]
    pub fn merge(mut self, later: FieldSet) -> FieldSet {
        self.0.extend(later.0);
        self
    }

    /// Left-to-right merge of partial sets.
    pub fn fold(parts: impl IntoIterator<Item = FieldSet>) -> FieldSet {
        parts.into_iter().fold(FieldSet::new(), FieldSet::merge)
    }
}

impl FromIterator<(&'static str, String)> for FieldSet {
    fn from_iter<I: IntoIterator<Item = (&'static str, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
