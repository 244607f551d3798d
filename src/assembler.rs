// File: ./src/assembler.rs
//! Turns a copy of a template document into the week's cheat sheet.
//!
//! Every step re-reads the document before editing it: deleting a section
//! shifts the indices of everything after it.
use crate::client::DocumentStore;
use crate::config::Templates;
use crate::model::document::{
    GREEN, Location, RED, Range, Span, TextStyle, find_placeholders, placeholder,
};
use crate::model::fields::BASE_FIELDS;
use crate::model::{EditRequest, FieldSet, FourParshiyot, SpecialFlags};
use anyhow::{Result, bail};
use chrono::NaiveDate;

pub const AV_HARACHAMIM: &str = "Av HaRachamim";
const AV_HARACHAMIM_MARK: &str = "+ ";
pub const UNFILLED: &str = "????";

pub fn document_url(document_id: &str) -> String {
    format!("https://docs.google.com/document/d/{}/edit", document_id)
}

/// Template for the week; later rules override earlier ones.
pub fn select_template<'a>(flags: &SpecialFlags, templates: &'a Templates) -> &'a str {
    let mut template = &templates.standard;
    if flags.rosh_chodesh {
        template = &templates.rosh_chodesh;
    }
    if flags.hanukkah_day.is_some() {
        template = if flags.rosh_chodesh {
            &templates.hanukkah_rosh_chodesh
        } else {
            &templates.hanukkah
        };
    }
    if flags.shuva.is_some() {
        template = &templates.shuva;
    }
    match flags.four_parshiyot {
        Some(FourParshiyot::Shekalim) if flags.rosh_chodesh => {
            template = &templates.shekalim_rosh_chodesh
        }
        Some(FourParshiyot::Shekalim) => template = &templates.shekalim,
        Some(FourParshiyot::Zachor) => template = &templates.zachor,
        Some(FourParshiyot::Parah) => template = &templates.parah,
        Some(FourParshiyot::HaChodesh) if flags.rosh_chodesh => {
            template = &templates.hachodesh_rosh_chodesh
        }
        Some(FourParshiyot::HaChodesh) => template = &templates.hachodesh,
        None => {}
    }
    template
}

pub fn document_title(date: NaiveDate, parasha_title: &str) -> String {
    format!("{} {}", date.format("%Y-%m-%d"), parasha_title)
}

/// Optional sections of the templates, each paired with whether it stays.
pub fn sections(flags: &SpecialFlags) -> [(&'static str, bool); 10] {
    [
        ("OMER", flags.omer.is_some()),
        ("PSALM_27", flags.psalm_27),
        ("ULCHAPARAT_PASHA_NOTE", flags.ulchaparat_pasha),
        ("ULCHAPARAT_PASHA", flags.ulchaparat_pasha),
        ("BIRKAT_HACHODESH", flags.mevarchim.is_some()),
        ("LAST_PARASHA", flags.last_parasha),
        ("SHIRAT_HAYAM", flags.shabbat_shira),
        ("TEN_COMMANDMENTS_YITRO", flags.yitro),
        ("TEN_COMMANDMENTS_VAETCHANAN", flags.vaetchanan),
        ("NOTES", flags.has_notes()),
    ]
}

/// Placeholders the template must carry for these flags.
pub fn vocabulary(flags: &SpecialFlags) -> Vec<&'static str> {
    let mut fields = BASE_FIELDS.to_vec();
    for field in &flags.extra_fields {
        if !fields.contains(field) {
            fields.push(*field);
        }
    }
    fields
}

/// Edits applied to one copied document.
pub struct SheetBuilder<'a> {
    store: &'a dyn DocumentStore,
    document_id: String,
}

impl<'a> SheetBuilder<'a> {
    pub fn new(store: &'a dyn DocumentStore, document_id: impl Into<String>) -> Self {
        Self {
            store,
            document_id: document_id.into(),
        }
    }

    /// Copies the week's template and returns a builder for the copy.
    pub fn from_template(
        store: &'a dyn DocumentStore,
        templates: &Templates,
        date: NaiveDate,
        flags: &SpecialFlags,
        parasha_title: &str,
    ) -> Result<Self> {
        let template = select_template(flags, templates);
        let title = document_title(date, parasha_title);
        log::debug!("Copying template {} as '{}'", template, title);
        let document_id = store.copy_template(template, &title)?;
        Ok(Self::new(store, document_id))
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    fn apply(&self, requests: Vec<EditRequest>) -> Result<()> {
        self.store.batch_update(&self.document_id, &requests)
    }

    /// Removes the text between `<BEGIN_marker>` and `<END_marker>`, markers
    /// included, or with `keep` just the two marker runs. Does nothing when
    /// either marker is missing.
    pub fn resolve_section(&self, marker: &str, keep: bool) -> Result<()> {
        let document = self.store.get_document(&self.document_id)?;
        let begin = document.find_run(&format!("<BEGIN_{}>", marker));
        let end = document.find_run(&format!("<END_{}>", marker));
        let (Some(begin), Some(end)) = (begin, end) else {
            log::debug!("No {} section in this template", marker);
            return Ok(());
        };

        let spans: Vec<Span> = if keep {
            // The end marker goes first so the begin marker's indices still hold.
            vec![end, begin]
        } else {
            vec![(begin.0, end.1)]
        };
        self.apply(
            spans
                .into_iter()
                .map(|span| EditRequest::DeleteContentRange {
                    range: Range::body(span),
                })
                .collect(),
        )
    }

    /// Strikes Av HaRachamim through in red when it is not said; marks it with
    /// a green "+ " on Shabbat Mevarchim when it is.
    pub fn update_av_harachamim(&self, flags: &SpecialFlags) -> Result<()> {
        if !flags.omit_av_harachamim && flags.mevarchim.is_none() {
            return Ok(());
        }
        let document = self.store.get_document(&self.document_id)?;
        let Some((start, end)) = document.find_run(AV_HARACHAMIM) else {
            log::warn!("Template has no {} paragraph", AV_HARACHAMIM);
            return Ok(());
        };

        let requests = if flags.omit_av_harachamim {
            vec![EditRequest::UpdateTextStyle {
                range: Range::body((start, end)),
                text_style: TextStyle {
                    foreground_color: Some(RED.into()),
                    strikethrough: Some(true),
                    ..Default::default()
                },
                fields: "foregroundColor,strikethrough".to_string(),
            }]
        } else {
            let marked = format!("{}{}", AV_HARACHAMIM_MARK, AV_HARACHAMIM);
            vec![
                EditRequest::InsertText {
                    location: Location { index: start },
                    text: AV_HARACHAMIM_MARK.to_string(),
                },
                EditRequest::UpdateTextStyle {
                    range: Range::body((start, start + marked.encode_utf16().count())),
                    text_style: TextStyle {
                        foreground_color: Some(GREEN.into()),
                        ..Default::default()
                    },
                    fields: "foregroundColor".to_string(),
                },
            ]
        };
        self.apply(requests)
    }

    /// Names every placeholder after its field. `date` is looked up in the
    /// first header, everything else in the body.
    pub fn create_named_ranges(&self, vocabulary: &[&str]) -> Result<()> {
        let document = self.store.get_document(&self.document_id)?;
        let mut ranges: Vec<(String, Range)> = find_placeholders(&document.body.content, vocabulary)
            .into_iter()
            .filter(|(name, _)| name != "date")
            .map(|(name, span)| (name, Range::body(span)))
            .collect();
        if let Some(header) = document.first_header() {
            for (name, (start_index, end_index)) in find_placeholders(&header.content, &["date"]) {
                ranges.push((
                    name,
                    Range {
                        start_index,
                        end_index,
                        segment_id: Some(header.header_id.clone()),
                    },
                ));
            }
        }

        let missing: Vec<&str> = vocabulary
            .iter()
            .copied()
            .filter(|field| !ranges.iter().any(|(name, _)| name == field))
            .collect();
        if !missing.is_empty() {
            bail!(
                "Template is missing placeholders: {}",
                missing
                    .iter()
                    .map(|field| placeholder(field))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        self.apply(
            ranges
                .into_iter()
                .map(|(name, range)| EditRequest::CreateNamedRange { name, range })
                .collect(),
        )
    }

    /// Writes the collected values into their named ranges, then flags every
    /// placeholder still in the body with a red background and "????".
    /// Returns the names of the unfilled fields.
    pub fn fill_in_fields(&self, fields: &FieldSet, vocabulary: &[&str]) -> Result<Vec<String>> {
        self.apply(
            fields
                .iter()
                .filter(|(name, value)| !value.is_empty() && vocabulary.contains(name))
                .map(|(name, value)| EditRequest::ReplaceNamedRangeContent {
                    named_range_name: name.to_string(),
                    text: value.to_string(),
                })
                .collect(),
        )?;

        let document = self.store.get_document(&self.document_id)?;
        let remaining = find_placeholders(&document.body.content, vocabulary);
        if remaining.is_empty() {
            return Ok(Vec::new());
        }
        log::warn!(
            "No value for {}",
            remaining.keys().cloned().collect::<Vec<_>>().join(", ")
        );

        let highlight = remaining.values().map(|span| EditRequest::UpdateTextStyle {
            range: Range::body(*span),
            text_style: TextStyle {
                background_color: Some(RED.into()),
                ..Default::default()
            },
            fields: "backgroundColor".to_string(),
        });
        let mark = remaining
            .keys()
            .map(|name| EditRequest::ReplaceNamedRangeContent {
                named_range_name: name.clone(),
                text: UNFILLED.to_string(),
            });
        self.apply(highlight.chain(mark).collect())?;
        Ok(remaining.into_keys().collect())
    }
}

/// Builds the cheat sheet for `date` and returns the new document's id.
pub fn assemble(
    store: &dyn DocumentStore,
    templates: &Templates,
    date: NaiveDate,
    flags: &SpecialFlags,
    fields: &FieldSet,
) -> Result<String> {
    let builder =
        SheetBuilder::from_template(store, templates, date, flags, fields.require("parasha_title")?)?;
    log::info!("Generated document: {}", document_url(builder.document_id()));

    for (marker, keep) in sections(flags) {
        builder.resolve_section(marker, keep)?;
    }
    builder.update_av_harachamim(flags)?;

    let vocabulary = vocabulary(flags);
    builder.create_named_ranges(&vocabulary)?;
    builder.fill_in_fields(fields, &vocabulary)?;
    Ok(builder.document_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Mevarchim, ShuvaParasha};

    fn templates() -> Templates {
        Templates {
            standard: "standard".to_string(),
            rosh_chodesh: "rc".to_string(),
            hanukkah: "hanukkah".to_string(),
            hanukkah_rosh_chodesh: "hanukkah-rc".to_string(),
            shuva: "shuva".to_string(),
            shekalim: "shekalim".to_string(),
            shekalim_rosh_chodesh: "shekalim-rc".to_string(),
            zachor: "zachor".to_string(),
            parah: "parah".to_string(),
            hachodesh: "hachodesh".to_string(),
            hachodesh_rosh_chodesh: "hachodesh-rc".to_string(),
        }
    }

    #[test]
    fn test_template_selection() {
        let templates = templates();
        let mut flags = SpecialFlags::default();
        assert_eq!(select_template(&flags, &templates), "standard");

        flags.rosh_chodesh = true;
        assert_eq!(select_template(&flags, &templates), "rc");

        flags.hanukkah_day = Some(6);
        assert_eq!(select_template(&flags, &templates), "hanukkah-rc");
        flags.rosh_chodesh = false;
        assert_eq!(select_template(&flags, &templates), "hanukkah");

        let flags = SpecialFlags {
            rosh_chodesh: true,
            four_parshiyot: Some(FourParshiyot::Shekalim),
            ..Default::default()
        };
        assert_eq!(select_template(&flags, &templates), "shekalim-rc");

        let flags = SpecialFlags {
            rosh_chodesh: true,
            four_parshiyot: Some(FourParshiyot::Zachor),
            ..Default::default()
        };
        assert_eq!(select_template(&flags, &templates), "zachor");

        let flags = SpecialFlags {
            shuva: Some(ShuvaParasha::Haazinu),
            ..Default::default()
        };
        assert_eq!(select_template(&flags, &templates), "shuva");
    }

    #[test]
    fn test_document_title() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(document_title(date, "Pekudei"), "2025-03-01 Pekudei");
    }

    #[test]
    fn test_sections_follow_flags() {
        let flags = SpecialFlags {
            mevarchim: Some(Mevarchim {
                month: "Nisan".to_string(),
                days: vec![],
            }),
            notes: vec!["Shabbat HaGadol".to_string()],
            ..Default::default()
        };
        let kept: Vec<&str> = sections(&flags)
            .into_iter()
            .filter(|(_, keep)| *keep)
            .map(|(marker, _)| marker)
            .collect();
        assert_eq!(kept, vec!["BIRKAT_HACHODESH", "NOTES"]);
    }

    #[test]
    fn test_vocabulary_adds_extra_fields_once() {
        let mut flags = SpecialFlags::default();
        flags.require("omer");
        flags.require("omer");
        let vocabulary = vocabulary(&flags);
        assert_eq!(vocabulary.len(), BASE_FIELDS.len() + 1);
        assert_eq!(vocabulary.last(), Some(&"omer"));
    }
}
