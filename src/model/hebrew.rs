// File: ./src/model/hebrew.rs
use chrono::Weekday;
use strum::{Display, EnumIter, EnumString};

/// Hebrew month names, spelled the way the calendar service spells them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum HebrewMonth {
    Nisan,
    Iyyar,
    Sivan,
    Tamuz,
    Av,
    Elul,
    Tishrei,
    Cheshvan,
    Kislev,
    Tevet,
    #[strum(serialize = "Sh'vat")]
    Shvat,
    Adar,
    #[strum(serialize = "Adar I")]
    AdarI,
    #[strum(serialize = "Adar II")]
    AdarII,
}

impl HebrewMonth {
    pub fn is_adar(self) -> bool {
        matches!(self, HebrewMonth::Adar | HebrewMonth::AdarI | HebrewMonth::AdarII)
    }

    /// Name used when the month is announced at Birkat HaChodesh.
    pub fn blessing_name(self) -> String {
        match self {
            HebrewMonth::AdarI => "Adar Rishon".to_string(),
            HebrewMonth::AdarII => "Adar Sheni".to_string(),
            other => other.to_string(),
        }
    }

    /// Months whose Rosh Chodesh Musaf adds "ulchaparat pasha" in a leap year.
    pub fn takes_ulchaparat_pasha(self) -> bool {
        matches!(
            self,
            HebrewMonth::Cheshvan
                | HebrewMonth::Kislev
                | HebrewMonth::Tevet
                | HebrewMonth::Shvat
                | HebrewMonth::AdarI
                | HebrewMonth::AdarII
        )
    }
}

/// A Gregorian day as seen by the Hebrew calendar: its Hebrew date and the
/// named events attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HebrewDay {
    pub year: i32,
    pub month: HebrewMonth,
    pub day: u32,
    pub events: Vec<String>,
}

impl HebrewDay {
    pub fn is(&self, month: HebrewMonth, day: u32) -> bool {
        self.month == month && self.day == day
    }

    pub fn within(&self, month: HebrewMonth, first: u32, last: u32) -> bool {
        self.month == month && (first..=last).contains(&self.day)
    }
}

/// Leap years fall on these positions of the 19-year Metonic cycle.
const LEAP_YEAR_RESIDUES: [i32; 7] = [0, 3, 6, 8, 11, 14, 17];

pub fn is_leap_year(hebrew_year: i32) -> bool {
    LEAP_YEAR_RESIDUES.contains(&hebrew_year.rem_euclid(19))
}

/// English and Hebrew names of a weekday, as read out at Birkat HaChodesh.
pub fn weekday_names(weekday: Weekday) -> (&'static str, &'static str) {
    match weekday {
        Weekday::Mon => ("Monday", "Sheni"),
        Weekday::Tue => ("Tuesday", "Sh'lishi"),
        Weekday::Wed => ("Wednesday", "Revi'i"),
        Weekday::Thu => ("Thursday", "Chamishi"),
        Weekday::Fri => ("Friday", "Shishi"),
        Weekday::Sat => ("Saturday", "Shabbat Kodesh"),
        Weekday::Sun => ("Sunday", "Rishon"),
    }
}
