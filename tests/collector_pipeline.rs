// File: tests/collector_pipeline.rs
mod common;

use cheat_sheet::classifier::classify;
use cheat_sheet::collector::leyning::VerseRef;
use cheat_sheet::collector::pages::{MI_SHEBEYRACH_RANGE, PAGE_NUMBERS_RANGE, PageTable};
use cheat_sheet::collector::roster::ROSTER_RANGE;
use cheat_sheet::collector::sponsors::{KIDDUSH_RANGE, SCOTCH_RANGE};
use cheat_sheet::collector::{Sources, collect, roster, sponsors};
use cheat_sheet::config::{Config, Shamash, Sheets};
use cheat_sheet::model::HebrewMonth;
use common::{FakeCalendar, FakeSheets, cells, ymd};

fn config() -> Config {
    let mut config = Config {
        sheets: Sheets {
            calendar: "calendar-sheet".to_string(),
            kiddush: "kiddush-sheet".to_string(),
            scotch: "scotch-sheet".to_string(),
            page_numbers: "pages-sheet".to_string(),
        },
        ..Default::default()
    };
    config.shamashim.insert(
        "Sam".to_string(),
        Shamash {
            name: "Samuel Adler".to_string(),
        },
    );
    config
}

fn hanukkah_calendar() -> FakeCalendar {
    FakeCalendar::new()
        .day(
            ymd(2024, 12, 28),
            5785,
            HebrewMonth::Kislev,
            27,
            &["Parashat Miketz", "Chanukah Day 3"],
        )
        .day(
            ymd(2024, 12, 31),
            5785,
            HebrewMonth::Kislev,
            30,
            &["Rosh Chodesh Tevet", "Chanukah Day 6"],
        )
        .day(
            ymd(2025, 1, 1),
            5785,
            HebrewMonth::Tevet,
            1,
            &["Rosh Chodesh Tevet", "Chanukah Day 7"],
        )
        .reading(
            ymd(2024, 12, 28),
            &[
                ("1", "Genesis 41:1-41:14"),
                ("4", "Genesis 41:39-41:52"),
                ("7", "Genesis 44:11-44:17"),
                ("maftir", "Numbers 7:24-7:35"),
                ("haftarah", "Zechariah 2:14-4:7"),
                ("8", "Numbers 7:24-7:29"),
            ],
        )
}

fn sheets(roster_date: &str) -> FakeSheets {
    FakeSheets::new()
        .range(
            "calendar-sheet",
            ROSTER_RANGE,
            vec![
                cells(&["12/21/2024", "Vayeshev", "", "Avi"]),
                cells(&[
                    roster_date,
                    "Miketz",
                    "",
                    "Avi Katz",
                    "1-3: Dana Cohen\n4-7: Levi Strauss",
                    "Miriam Gold",
                    "Yoni",
                    "Rabbi Ruth",
                    "Greta",
                    "Sam",
                    "Tal",
                    "Tal",
                ]),
            ],
        )
        .range(
            "kiddush-sheet",
            KIDDUSH_RANGE,
            vec![
                cells(&["Sat 12/21", "Nobody"]),
                cells(&["Sat 12/28", "The Cohens", "", "in honor of Dana", "Kim"]),
            ],
        )
        .range(
            "scotch-sheet",
            SCOTCH_RANGE,
            vec![cells(&["12/28/2024", "", "The Levis", "", "for a birthday"])],
        )
        .range(
            "pages-sheet",
            PAGE_NUMBERS_RANGE,
            vec![
                cells(&["Miketz", "254", "155", "Genesis", "41", "1", "987", "160", "I Kings", "3", "15"]),
                cells(&[
                    "Beha'alotcha", "817", "612", "Numbers", "8", "1", "1241", "625", "Zechariah", "2", "14",
                ]),
                vec![],
                cells(&[
                    "Hanukkah", "795", "597", "Numbers", "7", "24", "1242", "988", "Zechariah", "2", "14",
                ]),
            ],
        )
        .range(
            "pages-sheet",
            MI_SHEBEYRACH_RANGE,
            vec![cells(&["Ruth Levi"]), vec![], cells(&["Boaz Cohen"])],
        )
}

#[test]
fn test_collects_a_hanukkah_shabbat() {
    let calendar = hanukkah_calendar();
    let sheets = sheets("12/28/2024");
    let config = config();
    let date = ymd(2024, 12, 28);

    let flags = classify(date, &calendar).unwrap();
    let sources = Sources {
        calendar: &calendar,
        sheets: &sheets,
    };
    let fields = collect(date, &flags, sources, &config).unwrap();

    let expect = [
        ("date", "12/28/2024"),
        ("parasha_title", "Miketz"),
        ("shacharit", "Avi Katz"),
        ("torah", "1-3: Dana Cohen; 4-7: Levi Strauss"),
        ("thank_you_torah", "Dana Cohen, Levi Strauss"),
        ("maftir", "Miriam Gold"),
        ("thank_you_haftarah", "Miriam Gold"),
        ("thank_you_teaching", "Rabbi Ruth"),
        ("thank_you_greeter", "Greta"),
        ("thank_you_shamash", "Samuel Adler"),
        ("thank_you_host", "Tal"),
        ("next_meeting_date", "January 4"),
        ("next_meeting_time", "9:00"),
        ("kiddush_sponsor", "The Cohens, in honor of Dana"),
        ("thank_you_kiddush_volunteer", "Kim"),
        ("scotch_sponsor", "The Levis, for a birthday"),
        ("parasha_book", "B’reshit"),
        ("parasha_chapter", "41"),
        ("parasha_verse", "1"),
        ("fourth_aliyah_verse", "39"),
        ("seventh_aliyah_chapter", "44"),
        ("haftarah_parasha", "The haftarah for Shabbat Hanukkah"),
        ("haftarah_book", "Zechariah"),
        ("maftir_hanukkah_day", "third"),
        ("maftir_book", "B’midbar"),
        ("maftir_hanukkah_note", "24"),
        ("birkat_hachodesh_month", "Tevet"),
        ("birkat_hachodesh_day", "on Tuesday and Wednesday, B'Yom Sh'lishi UvYom Revi'i"),
        ("parasha_etz_hayim", "254"),
        ("parasha_hertz", "155"),
        ("maftir_etz_hayim", "795"),
        ("maftir_hertz", "597"),
        // The maftir section comes last in the table.
        ("haftarah_etz_hayim", "1242"),
        ("haftarah_hertz", "988"),
        ("mi_shebeyrach_list", "Ruth Levi\nBoaz Cohen"),
    ];
    for (key, value) in expect {
        assert_eq!(fields.get(key), Some(value), "field {}", key);
    }
    assert!(!fields.contains("omer"));
    assert!(!fields.contains("notes"));
}

#[test]
fn test_missing_roster_row_is_fatal() {
    let calendar = hanukkah_calendar();
    let sheets = sheets("12/29/2024");
    let date = ymd(2024, 12, 28);
    let flags = classify(date, &calendar).unwrap();
    let sources = Sources {
        calendar: &calendar,
        sheets: &sheets,
    };
    let err = collect(date, &flags, sources, &config()).unwrap_err();
    assert!(err.to_string().contains("12/28/2024"), "{}", err);
}

#[test]
fn test_duplicate_roster_rows_are_fatal() {
    let sheets = FakeSheets::new().range(
        "calendar-sheet",
        ROSTER_RANGE,
        vec![
            cells(&["1/4/2025", "Vayigash", "", "Avi"]),
            cells(&["1/11/2025", "Vayechi", "", "Yoni"]),
            cells(&["1/4/2025", "Vayigash", "", "Dana"]),
        ],
    );
    let err = roster::collect(ymd(2025, 1, 4), &sheets, &config()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Found 2 rows for 1/4/2025 in the davening calendar, expected one"
    );
}

#[test]
fn test_sponsor_tables_are_best_effort_and_independent() {
    let sheets = FakeSheets::new()
        .range(
            "kiddush-sheet",
            KIDDUSH_RANGE,
            vec![cells(&["Sat 11/4", "The Cohens", "", "in honor of Dana", "Kim"])],
        )
        .range(
            "scotch-sheet",
            SCOTCH_RANGE,
            vec![cells(&["1/4/2025", "", "X", "", "Y"])],
        );
    let fields = sponsors::collect(ymd(2025, 1, 4), &sheets, &config().sheets).unwrap();
    assert_eq!(fields.get("scotch_sponsor"), Some("X, Y"));
    assert!(!fields.contains("kiddush_sponsor"));
    assert!(!fields.contains("kiddush_volunteer"));
    assert!(!fields.contains("thank_you_kiddush_volunteer"));

    // And the other way round.
    let sheets = FakeSheets::new()
        .range(
            "kiddush-sheet",
            KIDDUSH_RANGE,
            vec![cells(&["Sat 1/4", "The Cohens", "", "in honor of Dana", "Kim"])],
        )
        .range("scotch-sheet", SCOTCH_RANGE, vec![cells(&["1/11/2025"])]);
    let fields = sponsors::collect(ymd(2025, 1, 4), &sheets, &config().sheets).unwrap();
    assert_eq!(fields.get("kiddush_sponsor"), Some("The Cohens, in honor of Dana"));
    assert!(!fields.contains("scotch_sponsor"));
}

#[test]
fn test_shared_haftarah_is_resolved_by_parasha() {
    // Ki Teitzei and Noach both start their haftarah at Isaiah 54:1.
    let table = PageTable::from_rows(&[
        cells(&["Noach", "41", "26", "Genesis", "6", "9", "1240", "944", "Isaiah", "54", "1"]),
        cells(&[
            "Ki Teitzei", "1114", "840", "Deuteronomy", "21", "10", "1133", "858", "Isaiah", "54", "1",
        ]),
    ]);
    let start = VerseRef::new("Isaiah", "54", "1");
    assert_eq!(table.lookup(&start, None).get("haftarah_etz_hayim"), Some("1133"));
    let noach = table.lookup(&start, Some("Noach"));
    assert_eq!(noach.get("haftarah_etz_hayim"), Some("1240"));
    assert_eq!(noach.get("haftarah_hertz"), Some("944"));
    assert!(table.lookup(&start, Some("Bereshit")).is_empty());
}
