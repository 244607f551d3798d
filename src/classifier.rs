// File: ./src/classifier.rs
//! Special-Shabbat rules.
//!
//! `classify` maps a Gregorian date to the liturgical conditions that apply
//! to it. Rules run in a fixed order and a later rule may overwrite what an
//! earlier one concluded; that order is the precedence policy:
//!
//! 1. Av HaRachamim exclusion windows (by Hebrew date).
//! 2. Shabbat Mevarchim, from the Rosh Chodesh events of the next 8 days.
//! 3. Per-event rules over the day's own events, in event order.
//! 4. Post-pass: combined readings, Shuva parasha, notes.
use crate::client::CalendarSource;
use crate::model::hebrew::{is_leap_year, weekday_names};
use crate::model::{
    FourParshiyot, HebrewDay, HebrewMonth, Mevarchim, RoshChodeshDay, ShuvaParasha, SpecialFlags,
};
use anyhow::{Context, Result, bail};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

/// Days after the Shabbat scanned for Rosh Chodesh, up to and including the
/// following Sunday.
pub const LOOKAHEAD_DAYS: i64 = 8;

static ROSH_CHODESH_EVENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Rosh Chodesh (.*)").expect("valid regex"));
static HANUKKAH_DAY_EVENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Chanukah Day (\d+)").expect("valid regex"));

/// (month, first day, last day) windows in which Av HaRachamim is not said.
const NO_AV_HARACHAMIM: &[(HebrewMonth, u32, u32)] = &[
    (HebrewMonth::Nisan, 1, 30),
    (HebrewMonth::Iyyar, 14, 14),
    (HebrewMonth::Iyyar, 18, 18),
    (HebrewMonth::Sivan, 6, 12),
    (HebrewMonth::Av, 15, 15),
    (HebrewMonth::Tishrei, 9, 30),
    (HebrewMonth::Shvat, 15, 15),
    (HebrewMonth::Adar, 14, 15),
    (HebrewMonth::AdarI, 14, 15),
    (HebrewMonth::AdarII, 14, 15),
];

const HANUKKAH_FIELDS: [&str; 7] = [
    "maftir_hanukkah_day",
    "maftir_book",
    "maftir_chapter",
    "maftir_verse",
    "maftir_etz_hayim",
    "maftir_hertz",
    "maftir_hanukkah_note",
];

const LAST_PARSHIYOT: [&str; 4] = ["Vayechi", "Pekudei", "Bechukotai", "Masei"];

/// Upcoming Saturday relative to `today`; on a Saturday, the following one.
pub fn upcoming_shabbat(today: NaiveDate) -> NaiveDate {
    let days = (4 - i64::from(today.weekday().num_days_from_monday())).rem_euclid(7) + 1;
    today + Duration::days(days)
}

pub fn classify(date: NaiveDate, calendar: &dyn CalendarSource) -> Result<SpecialFlags> {
    let today = calendar
        .hebrew_date(date)
        .with_context(|| format!("Looking up the Hebrew date of {}", date))?;
    log::debug!(
        "{} is {} {} {}, events: {:?}",
        date,
        today.day,
        today.month,
        today.year,
        today.events
    );

    let mut flags = SpecialFlags {
        // Elul through Hoshana Rabba
        psalm_27: today.month == HebrewMonth::Elul || today.within(HebrewMonth::Tishrei, 1, 21),
        omit_av_harachamim: in_exclusion_window(&today),
        ..Default::default()
    };

    let upcoming = calendar.hebrew_dates(
        date + Duration::days(1),
        date + Duration::days(LOOKAHEAD_DAYS),
    )?;
    detect_mevarchim(&mut flags, date, &upcoming)?;

    for event in &today.events {
        apply_event_rules(&mut flags, &today, event)?;
    }

    finish(&mut flags, &today);
    Ok(flags)
}

pub fn in_exclusion_window(day: &HebrewDay) -> bool {
    NO_AV_HARACHAMIM
        .iter()
        .any(|&(month, first, last)| day.within(month, first, last))
}

/// Month named by a "Rosh Chodesh <Month>" event. An unknown month name
/// falls back to `fallback`.
fn rosh_chodesh_month(event: &str, fallback: HebrewMonth) -> Option<HebrewMonth> {
    let caps = ROSH_CHODESH_EVENT.captures(event)?;
    let name = caps[1].trim();
    let month = HebrewMonth::from_str(name).unwrap_or_else(|_| {
        log::warn!(
            "Unrecognized month '{}' in event '{}', using {}",
            name,
            event,
            fallback
        );
        fallback
    });
    Some(month)
}

fn detect_mevarchim(
    flags: &mut SpecialFlags,
    date: NaiveDate,
    upcoming: &[(NaiveDate, HebrewDay)],
) -> Result<()> {
    let tomorrow = date + Duration::days(1);
    let next_sunday = date + Duration::days(LOOKAHEAD_DAYS);
    let mut month = None;
    let mut days: Vec<RoshChodeshDay> = Vec::new();

    for (day, hebrew) in upcoming {
        if *day == next_sunday && days.is_empty() {
            // Rosh Chodesh starting next Sunday is announced next week.
            break;
        }
        let Some(named) = hebrew
            .events
            .iter()
            .find_map(|event| rosh_chodesh_month(event, hebrew.month))
        else {
            continue;
        };

        let (weekday, hebrew_day) = weekday_names(day.weekday());
        days.push(RoshChodeshDay {
            weekday: weekday.to_string(),
            hebrew_day: hebrew_day.to_string(),
        });
        month = Some(named);

        if *day == tomorrow {
            if day.weekday() != Weekday::Sun {
                bail!(
                    "Rosh Chodesh on the day after {} falls on a {}, not a Sunday; is {} a Shabbat?",
                    date,
                    day.weekday(),
                    date
                );
            }
            flags.machar_chodesh = true;
        }
    }

    let Some(month) = month else {
        return Ok(());
    };
    if days.len() > 2 {
        bail!(
            "Found {} days of Rosh Chodesh in the week after {}",
            days.len(),
            date
        );
    }
    log::debug!("Shabbat Mevarchim for {} ({} day(s))", month, days.len());
    flags.omit_av_harachamim = !matches!(month, HebrewMonth::Iyyar | HebrewMonth::Sivan);
    flags.mevarchim = Some(Mevarchim {
        month: month.blessing_name(),
        days,
    });
    flags.require("birkat_hachodesh_month");
    flags.require("birkat_hachodesh_day");
    Ok(())
}

fn apply_event_rules(flags: &mut SpecialFlags, today: &HebrewDay, event: &str) -> Result<()> {
    // Hanukkah
    if let Some(caps) = HANUKKAH_DAY_EVENT.captures(event) {
        let day: u8 = caps[1]
            .parse()
            .with_context(|| format!("Bad Hanukkah day in '{}'", event))?;
        if !(1..=8).contains(&day) {
            bail!("Hanukkah day {} out of range in '{}'", day, event);
        }
        flags.hanukkah_day = Some(day);
        flags.omit_av_harachamim = true;
        for field in HANUKKAH_FIELDS {
            flags.require(field);
        }
    }

    // Rosh Chodesh
    if event.contains("Rosh Chodesh") {
        flags.rosh_chodesh = true;
        let month = rosh_chodesh_month(event, today.month).unwrap_or(today.month);
        if is_leap_year(today.year) && month.takes_ulchaparat_pasha() {
            flags.ulchaparat_pasha = true;
        }
        flags.omit_av_harachamim = true;
    }

    // Omer, e.g. "21st day of the Omer"
    if event.contains("Omer") {
        flags.omer = Some(event.to_string());
        flags.require("omer");
    }

    if event == "Shabbat Shirah" {
        flags.shabbat_shira = true;
        flags.note("Shabbat Shira");
        flags.require("shirat_hayam_leyner");
    }

    // Four parshiyot
    if let Ok(parsha) = FourParshiyot::from_str(event) {
        flags.four_parshiyot = Some(parsha);
        flags.omit_av_harachamim = true;
    }
    if event == "Shabbat HaGadol" {
        flags.shabbat_hagadol = true;
        flags.omit_av_harachamim = true;
        flags.note("Shabbat HaGadol (different haftarah, no Av HaRachamim)");
    }

    // Haftarot of rebuke
    if today.within(HebrewMonth::Tamuz, 19, 24) {
        flags.rebuke = Some(1);
    }
    if today.within(HebrewMonth::Tamuz, 26, 30) || today.within(HebrewMonth::Av, 1, 2) {
        flags.rebuke = Some(2);
    }
    if event == "Shabbat Chazon" {
        flags.chazon = true;
        flags.note("1st Aliyah: ends at 1:10. 2nd Aliyah: begins at 1:11. 1:12 in Eycha Trope");
    }

    // Haftarot of consolation
    if event == "Shabbat Nachamu" {
        flags.nachamu = true;
    }
    if event.contains("Eikev") {
        flags.consolation = Some(2);
    }
    if event.contains("Re'eh") {
        flags.consolation = Some(3);
    }
    if event.contains("Shoftim") {
        flags.consolation = Some(4);
    }
    if event.contains("Ki Teitzei") {
        flags.consolation = Some(5);
        if today.is(HebrewMonth::Av, 15) {
            flags.consolation_3_appended_to_5 = true;
        }
    }
    if event.contains("Ki Tavo") {
        flags.consolation = Some(6);
        flags.note("Aliyah 6: Tokhekhah. Aliyah to Ba’al Koreh");
    }
    if event.contains("Nitzavim") {
        flags.consolation = Some(7);
    }
    if event == "Shabbat Shuva" && today.within(HebrewMonth::Tishrei, 1, 10) {
        // Which parasha it is gets settled once every event has been seen.
        flags.shuva = Some(ShuvaParasha::Haazinu);
        flags.require("haftarah_note");
    }

    // Aseret HaDibrot
    if event.contains("Vaetchanan") {
        flags.vaetchanan = true;
        flags.note("4th Aliyah: ends at 5:18, and contains Aseret HaDibrot");
        flags.note("5th Aliyah: begins at 5:19");
        flags.require("ten_commandments_leyner");
    }
    if event.contains("Yitro") {
        flags.yitro = true;
        flags.note("6th Aliyah contains Aseret HaDibrot");
        flags.require("ten_commandments_leyner");
    }

    // Last parasha of a book
    if LAST_PARSHIYOT.iter().any(|p| event.contains(p)) {
        flags.last_parasha = true;
        flags.require("last_parasha_leyner");
    }

    // Aliyot that start or stop somewhere unusual
    if event.contains("Bereshit") {
        flags.note("6th Aliyah begins with 5:1, not 4:23");
    }
    if event.contains("Bechukotai") {
        let aliyah = if event.contains("Behar") { 5 } else { 3 };
        flags.note(format!("Aliyah {}: Tokhekhah. Aliyah to Ba’al Koreh", aliyah));
    }
    if event.contains("Terumah") {
        flags.note("3rd Aliyah begins with 26:1, not 25:31");
    }

    Ok(())
}

fn finish(flags: &mut SpecialFlags, today: &HebrewDay) {
    if flags.rosh_chodesh && (flags.four_parshiyot.is_some() || flags.hanukkah_day.is_some()) {
        flags.combined_reading = true;
        flags.require("parasha_sixth_and_seventh");
    }
    if flags.shuva.is_some() && today.events.iter().any(|e| e.contains("Vayeilech")) {
        flags.shuva = Some(ShuvaParasha::Vayeilech);
    }
    if flags.has_notes() {
        flags.require("notes");
    }
}
