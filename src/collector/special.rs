// File: ./src/collector/special.rs
//! Fields that follow from the classifier's flags alone.
use crate::collector::leyner::extract_aliyah_leyner;
use crate::model::fields::{ordinal, transliterate_book};
use crate::model::{FieldSet, ShuvaParasha, SpecialFlags};
use anyhow::{Result, anyhow};

fn ordinal_of(n: u8) -> Result<&'static str> {
    ordinal(n).ok_or_else(|| anyhow!("No ordinal for {}", n))
}

/// Who reads the aliyot that the congregation stands for.
pub fn standing_aliyah_leyners(flags: &SpecialFlags, torah_readers: &str) -> FieldSet {
    let mut fields = FieldSet::new();
    let mut set = |key: &'static str, aliyah: u32| {
        if let Some(reader) = extract_aliyah_leyner(torah_readers, aliyah) {
            fields.insert(key, reader);
        }
    };
    if flags.yitro {
        set("ten_commandments_leyner", 6);
    }
    if flags.vaetchanan {
        set("ten_commandments_leyner", 4);
    }
    if flags.last_parasha {
        set("last_parasha_leyner", 7);
    }
    if flags.shabbat_shira {
        set("shirat_hayam_leyner", 4);
    }
    fields
}

/// Haftarah description; each matching rule overrides the ones before it.
pub fn haftarah(flags: &SpecialFlags) -> Result<FieldSet> {
    let mut fields = FieldSet::new();
    let mut describe = |text: String| fields.insert("haftarah_parasha", text);

    if flags.rosh_chodesh {
        describe("The haftarah for Shabbat Rosh Chodesh".to_string());
    }
    if flags.machar_chodesh {
        describe("The haftarah for Machar Chodesh".to_string());
    }

    if let Some(day) = flags.hanukkah_day {
        describe(match day {
            1 => "The haftarah for the first Shabbat Hanukkah".to_string(),
            8 => "The haftarah for the second Shabbat Hanukkah".to_string(),
            _ => "The haftarah for Shabbat Hanukkah".to_string(),
        });
    }

    if let Some(parsha) = flags.four_parshiyot {
        describe(format!("The Haftarah for {}", parsha));
    }
    if flags.shabbat_hagadol {
        describe("The Haftarah for Shabbat HaGadol".to_string());
    }

    if let Some(n) = flags.rebuke {
        describe(format!(
            "The {} haftarah of rebuke read during the weeks preceding Tisha B’av",
            ordinal_of(n)?
        ));
    }
    if flags.chazon {
        describe("The haftarah for Shabbat Chazon".to_string());
    }
    if flags.nachamu {
        describe("The haftarah for Shabbat Nachamu".to_string());
    }
    if let Some(n) = flags.consolation {
        describe(format!(
            "The {} haftarah of consolation, read during the weeks leading up to Rosh Hashanah,",
            ordinal_of(n)?
        ));
        if flags.consolation_3_appended_to_5 {
            describe(
                "We follow the tradition that, when Rosh Chodesh Elul coincides with Shabbat Parashat Re’eh, \
                 the third haftarah of consolation is appended to the fifth.  This combined haftarah is the same \
                 as the one read for Parashat Noach, which"
                    .to_string(),
            );
        }
    }

    if let Some(parasha) = flags.shuva {
        describe("The Haftarah for Shabbat Shuva".to_string());
        let (book, chapter, verse, note) = match parasha {
            ShuvaParasha::Vayeilech => ("Micah", "7", "18", "Mikhah 7:18-20"),
            ShuvaParasha::Haazinu => ("Joel", "2", "15", "Yoel 2:15-27"),
        };
        fields.insert("haftarah_book_english", book);
        fields.insert("haftarah_book", transliterate_book(book)?);
        fields.insert("haftarah_chapter", chapter);
        fields.insert("haftarah_verse", verse);
        fields.insert("haftarah_note", note);
    }

    Ok(fields)
}

pub fn hanukkah(flags: &SpecialFlags) -> Result<FieldSet> {
    let mut fields = FieldSet::new();
    if let Some(day) = flags.hanukkah_day {
        fields.insert("maftir_hanukkah_day", ordinal_of(day)?);
    }
    Ok(fields)
}

pub fn omer(flags: &SpecialFlags) -> FieldSet {
    let mut fields = FieldSet::new();
    if let Some(omer) = &flags.omer {
        fields.insert("omer", omer.as_str());
    }
    fields
}

/// "tomorrow, B'Yom Rishon", "on Monday and Tuesday, B'Yom Sheni UvYom Sh'lishi", ...
pub fn birkat_hachodesh(flags: &SpecialFlags) -> FieldSet {
    let mut fields = FieldSet::new();
    let Some(mevarchim) = &flags.mevarchim else {
        return fields;
    };
    let Some(first) = mevarchim.days.first() else {
        return fields;
    };
    let starts_sunday = first.weekday == "Sunday";
    let mut when = if starts_sunday {
        "tomorrow".to_string()
    } else {
        format!("on {}", first.weekday)
    };
    let second = mevarchim.days.get(1);
    if let Some(second) = second {
        when.push_str(&format!(
            " and {}{}",
            if starts_sunday { "on " } else { "" },
            second.weekday
        ));
    }
    when.push_str(&format!(", B'Yom {}", first.hebrew_day));
    if let Some(second) = second {
        when.push_str(&format!(" UvYom {}", second.hebrew_day));
    }
    fields.insert("birkat_hachodesh_month", mevarchim.month.as_str());
    fields.insert("birkat_hachodesh_day", when);
    fields
}

pub fn notes(flags: &SpecialFlags) -> FieldSet {
    let mut fields = FieldSet::new();
    if flags.has_notes() {
        fields.insert("notes", flags.notes.join("\n"));
    }
    fields
}
