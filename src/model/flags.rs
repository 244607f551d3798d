// File: ./src/model/flags.rs
//! Liturgical conditions that apply to one Shabbat.
use serde::Serialize;
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
pub enum FourParshiyot {
    #[strum(serialize = "Shabbat Shekalim")]
    Shekalim,
    #[strum(serialize = "Shabbat Zachor")]
    Zachor,
    #[strum(serialize = "Shabbat Parah")]
    Parah,
    #[strum(serialize = "Shabbat HaChodesh")]
    HaChodesh,
}

/// Parasha read on Shabbat Shuva; it decides how the haftarah ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShuvaParasha {
    Vayeilech,
    Haazinu,
}

/// One day of the coming Rosh Chodesh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoshChodeshDay {
    /// English weekday, e.g. "Sunday".
    pub weekday: String,
    /// Hebrew weekday, e.g. "Rishon".
    pub hebrew_day: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mevarchim {
    /// Month as announced, with Adar I/II already renamed.
    pub month: String,
    /// One or two days, in calendar order.
    pub days: Vec<RoshChodeshDay>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpecialFlags {
    pub psalm_27: bool,
    pub hanukkah_day: Option<u8>,
    pub mevarchim: Option<Mevarchim>,
    pub rosh_chodesh: bool,
    pub ulchaparat_pasha: bool,
    pub machar_chodesh: bool,
    pub omer: Option<String>,
    pub shabbat_shira: bool,
    pub four_parshiyot: Option<FourParshiyot>,
    pub shabbat_hagadol: bool,
    pub omit_av_harachamim: bool,
    pub rebuke: Option<u8>,
    pub chazon: bool,
    pub nachamu: bool,
    pub consolation: Option<u8>,
    pub consolation_3_appended_to_5: bool,
    pub shuva: Option<ShuvaParasha>,
    pub vaetchanan: bool,
    pub yitro: bool,
    pub last_parasha: bool,
    /// Rosh Chodesh read together with a Four-Parshiyot or Hanukkah maftir.
    pub combined_reading: bool,
    pub notes: Vec<String>,
    /// Placeholders the template must carry on top of the base vocabulary.
    pub extra_fields: Vec<&'static str>,
}

impl SpecialFlags {
    pub fn has_notes(&self) -> bool {
        !self.notes.is_empty()
    }

    pub(crate) fn require(&mut self, field: &'static str) {
        if !self.extra_fields.contains(&field) {
            self.extra_fields.push(field);
        }
    }

    pub(crate) fn note(&mut self, text: impl Into<String>) {
        self.notes.push(text.into());
    }
}
