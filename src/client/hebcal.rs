// File: ./src/client/hebcal.rs
//! Blocking client for the Hebcal date converter and holiday/leyning API.
use crate::client::CalendarSource;
use crate::model::{HebrewDay, HebrewMonth};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::str::FromStr;

pub const DEFAULT_BASE_URL: &str = "https://www.hebcal.com";

#[derive(Deserialize)]
struct ConvertedDate {
    hy: i32,
    hm: String,
    hd: u32,
    #[serde(default)]
    events: Vec<String>,
}

impl TryFrom<ConvertedDate> for HebrewDay {
    type Error = anyhow::Error;

    fn try_from(raw: ConvertedDate) -> Result<Self> {
        let month = HebrewMonth::from_str(&raw.hm)
            .map_err(|_| anyhow!("Unrecognized Hebrew month '{}'", raw.hm))?;
        Ok(HebrewDay {
            year: raw.hy,
            month,
            day: raw.hd,
            events: raw.events,
        })
    }
}

#[derive(Deserialize)]
struct ConvertedRange {
    #[serde(default)]
    hdates: BTreeMap<String, ConvertedDate>,
}

#[derive(Deserialize)]
struct CalendarItems {
    #[serde(default)]
    items: Vec<CalendarItem>,
}

#[derive(Deserialize)]
struct CalendarItem {
    // Values are mostly strings; the triennial cycle nests an object.
    leyning: Option<BTreeMap<String, serde_json::Value>>,
}

#[derive(Clone, Debug)]
pub struct HebcalClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl HebcalClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::blocking::Client::new(),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        log::debug!("GET {} {:?}", url, query);
        self.http
            .get(&url)
            .query(query)
            .send()
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()
            .with_context(|| format!("{} returned an error status", url))?
            .json::<T>()
            .with_context(|| format!("Failed to decode response from {}", url))
    }
}

impl Default for HebcalClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl CalendarSource for HebcalClient {
    fn hebrew_date(&self, date: NaiveDate) -> Result<HebrewDay> {
        let raw: ConvertedDate = self.get_json(
            "converter",
            &[
                ("cfg", "json".to_string()),
                ("gy", date.format("%Y").to_string()),
                ("gm", date.format("%-m").to_string()),
                ("gd", date.format("%-d").to_string()),
                ("g2h", "1".to_string()),
            ],
        )?;
        HebrewDay::try_from(raw).with_context(|| format!("Converting {}", date))
    }

    fn hebrew_dates(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<(NaiveDate, HebrewDay)>> {
        let raw: ConvertedRange = self.get_json(
            "converter",
            &[
                ("cfg", "json".to_string()),
                ("start", iso(start)),
                ("end", iso(end)),
                ("g2h", "1".to_string()),
            ],
        )?;
        let mut days = raw
            .hdates
            .into_iter()
            .map(|(key, value)| {
                let date = NaiveDate::from_str(&key)
                    .with_context(|| format!("Bad date key '{}' in converter range", key))?;
                Ok((date, HebrewDay::try_from(value)?))
            })
            .collect::<Result<Vec<_>>>()?;
        days.sort_by_key(|(date, _)| *date);
        Ok(days)
    }

    fn leyning(&self, date: NaiveDate) -> Result<Vec<BTreeMap<String, String>>> {
        let raw: CalendarItems = self.get_json(
            "hebcal",
            &[
                ("v", "1".to_string()),
                ("cfg", "json".to_string()),
                ("start", iso(date)),
                ("end", iso(date)),
                ("s", "on".to_string()),
            ],
        )?;
        Ok(raw
            .items
            .into_iter()
            .filter_map(|item| item.leyning)
            .map(|table| {
                table
                    .into_iter()
                    .filter_map(|(key, value)| match value {
                        serde_json::Value::String(s) => Some((key, s)),
                        _ => None,
                    })
                    .collect()
            })
            .collect())
    }
}
