// File: ./src/collector/roster.rs
//! The davening calendar: one row per Shabbat with who does what.
use crate::client::RowSource;
use crate::collector::{leyner, padded};
use crate::config::Config;
use crate::model::FieldSet;
use anyhow::{Result, bail};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub const ROSTER_RANGE: &str = "Calendar!A2:L55";
const ROSTER_WIDTH: usize = 12;

const EARLY_MEETING_TIME: &str = "9:00";
const LATE_MEETING_TIME: &str = "9:30";

/// Whether a Shabbat falls inside daylight saving time: after the second
/// Sunday of March and before the first Sunday of November.
pub fn is_dst_shabbat(date: NaiveDate) -> bool {
    let year = date.year();
    match (
        NaiveDate::from_weekday_of_month_opt(year, 3, Weekday::Sun, 2),
        NaiveDate::from_weekday_of_month_opt(year, 11, Weekday::Sun, 1),
    ) {
        (Some(start), Some(end)) => date > start && date < end,
        _ => false,
    }
}

pub fn next_meeting_time(next_meeting: NaiveDate) -> &'static str {
    if is_dst_shabbat(next_meeting) {
        LATE_MEETING_TIME
    } else {
        EARLY_MEETING_TIME
    }
}

pub fn collect(date: NaiveDate, rows: &dyn RowSource, config: &Config) -> Result<FieldSet> {
    let key = date.format("%-m/%-d/%Y").to_string();
    let all = rows.rows(&config.sheets.calendar, ROSTER_RANGE)?;
    let matching: Vec<&Vec<String>> = all
        .iter()
        .filter(|row| row.first().is_some_and(|cell| cell.trim() == key))
        .collect();
    let row = match matching.as_slice() {
        [row] => padded(row, ROSTER_WIDTH),
        [] => bail!("Could not find this Shabbat's row ({}) in the davening calendar", key),
        many => bail!(
            "Found {} rows for {} in the davening calendar, expected one",
            many.len(),
            key
        ),
    };

    let title = row[1].clone();
    let shacharit = row[3].clone();
    let torah = row[4].clone();
    let maftir = row[5].clone();
    let musaf = row[6].clone();
    let dvar_torah = row[7].clone();
    let greeter = row[8].clone();
    let s1 = row[9].clone();
    let s2 = row[10].clone();
    let host = row[11].clone();

    let mut fields = FieldSet::new();
    fields.insert("parasha_title", title.as_str());
    fields.insert("parasha_name", title.as_str());
    // for Shabbatot with a third scroll
    fields.insert("parasha_sixth_and_seventh", title.as_str());
    fields.insert(
        "haftarah_parasha",
        format!("The haftarah for Parashat {}", title),
    );
    fields.insert("shacharit", shacharit.as_str());
    fields.insert("thank_you_shacharit", shacharit);
    fields.insert("torah", torah.lines().collect::<Vec<_>>().join("; "));
    fields.insert("thank_you_torah", leyner::extract_torah_readers(&torah));
    fields.insert("torah_multiline", torah);
    fields.insert("maftir", maftir.as_str());
    fields.insert("maftir_aliyah", maftir.as_str());
    fields.insert("thank_you_haftarah", maftir);
    fields.insert("musaf", musaf.as_str());
    fields.insert("thank_you_musaf", musaf);
    fields.insert("dvar_torah", dvar_torah.as_str());
    fields.insert("thank_you_teaching", dvar_torah);
    fields.insert("greeter", greeter.as_str());
    fields.insert("thank_you_greeter", greeter);

    let next_meeting = date + Duration::days(7);
    fields.insert("next_meeting_date", next_meeting.format("%B %-d").to_string());
    fields.insert("next_meeting_time", next_meeting_time(next_meeting));

    // The host is thanked separately, not as a shamash.
    fields.insert("thank_you_host", config.shamash_name(&host));
    let shamashim: Vec<&str> = [&s1, &s2]
        .into_iter()
        .filter(|s| !s.is_empty() && (host.is_empty() || !s.contains(host.as_str())))
        .map(|s| config.shamash_name(s))
        .collect();
    fields.insert("thank_you_shamash", shamashim.join(", "));

    fields.insert("mi_shebeyrach_s1", s1.as_str());
    fields.insert("s1", s1);
    fields.insert("s2", s2);
    fields.insert("host", host);

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_meeting_time_follows_dst_window() {
        assert_eq!(next_meeting_time(ymd(2025, 7, 12)), "9:30");
        assert_eq!(next_meeting_time(ymd(2025, 1, 11)), "9:00");
        // 2025: DST from Sunday March 9 to Sunday November 2.
        assert_eq!(next_meeting_time(ymd(2025, 3, 8)), "9:00");
        assert_eq!(next_meeting_time(ymd(2025, 3, 15)), "9:30");
        assert_eq!(next_meeting_time(ymd(2025, 11, 1)), "9:30");
        assert_eq!(next_meeting_time(ymd(2025, 11, 8)), "9:00");
        // 2026: DST from Sunday March 8 to Sunday November 1.
        assert_eq!(next_meeting_time(ymd(2026, 3, 14)), "9:30");
        assert_eq!(next_meeting_time(ymd(2026, 10, 31)), "9:30");
        assert_eq!(next_meeting_time(ymd(2026, 11, 7)), "9:00");
    }
}
