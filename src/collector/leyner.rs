// File: ./src/collector/leyner.rs
//! Reading the free-text "torah" cell of the roster.
//!
//! The cell names either a single reader ("Dana"), or readers per aliyah,
//! one line each, with ranges ("1-4: Levi") and/or single numbers
//! ("6: Cohen" or "3, 5: Avi").
use regex::Regex;
use std::sync::LazyLock;

static ALIYAH_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)-(\d+)").expect("valid regex"));
static ALIYAH_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));
static READER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+ [A-Za-z\-]*").expect("valid regex"));

/// Every "First Last" name in the cell, comma separated.
pub fn extract_torah_readers(raw: &str) -> String {
    READER_NAME
        .find_iter(raw)
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// First word after the colon that follows position `after` in `line`.
fn name_after(line: &str, after: usize) -> Option<String> {
    let rest = &line[after..];
    let rest = rest.find(':').map_or(rest, |colon| &rest[colon + 1..]);
    rest.split_whitespace().next().map(str::to_string)
}

/// Reader of aliyah `aliyah`, or `None` if the cell assigns it to nobody.
///
/// Ranges are matched before single numbers, so a number that is the end of
/// a range never shadows the range's reader. Only a cell with no numbers at
/// all is treated as naming one reader for everything.
pub fn extract_aliyah_leyner(raw: &str, aliyah: u32) -> Option<String> {
    for line in raw.lines() {
        for caps in ALIYAH_RANGE.captures_iter(line) {
            let (Ok(first), Ok(last)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) else {
                continue;
            };
            if (first..=last).contains(&aliyah) {
                return name_after(line, caps.get(0).map_or(0, |m| m.end()));
            }
        }
    }

    let mut numbered = false;
    for line in raw.lines() {
        for m in ALIYAH_NUMBER.find_iter(line) {
            numbered = true;
            if m.as_str().parse::<u32>() == Ok(aliyah) {
                return name_after(line, m.end());
            }
        }
    }

    if numbered {
        None
    } else {
        raw.split_whitespace().next().map(str::to_string)
    }
}
