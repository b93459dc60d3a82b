use anyhow::Context;
use chrono::{Datelike, NaiveDate, Weekday};
use regex::Regex;

use crate::text_manipulators::collapse_whitespace;

const DAY_NAMES: [(&str, Weekday); 7] = [
    ("maandag", Weekday::Mon),
    ("dinsdag", Weekday::Tue),
    ("woensdag", Weekday::Wed),
    ("donderdag", Weekday::Thu),
    ("vrijdag", Weekday::Fri),
    ("zaterdag", Weekday::Sat),
    ("zondag", Weekday::Sun),
];

// The booking site abbreviates March as "maa" rather than the usual "mrt".
const MONTH_ABBREVIATIONS: [(&str, u32); 13] = [
    ("jan", 1),
    ("feb", 2),
    ("maa", 3),
    ("mrt", 3),
    ("apr", 4),
    ("mei", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("okt", 10),
    ("nov", 11),
    ("dec", 12),
];

pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    let name = name.to_lowercase();
    DAY_NAMES
        .iter()
        .find(|(day_name, _)| *day_name == name)
        .map(|(_, weekday)| *weekday)
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    DAY_NAMES
        .iter()
        .find(|(_, day)| *day == weekday)
        .map(|(name, _)| *name)
        .unwrap_or_default()
}

pub fn month_from_abbreviation(abbreviation: &str) -> Option<u32> {
    let abbreviation = abbreviation.to_lowercase();
    MONTH_ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| *abbr == abbreviation)
        .map(|(_, month)| *month)
}

/// Parses day headers such as `maandag (20 okt)` or `maandag (20 okt.)`.
///
/// Headers carry no year, so it is picked relative to `today`: the current
/// year, then the next, then the previous, whichever puts the date on the
/// weekday the header names.
pub struct DayHeaderParser {
    header_regex: Regex,
    today: NaiveDate,
}

impl DayHeaderParser {
    pub fn new(today: NaiveDate) -> anyhow::Result<Self> {
        let header_regex = Regex::new(r"^(\p{L}+) \((\d{1,2}) (\p{L}+)\.?\)$")?;
        Ok(Self {
            header_regex,
            today,
        })
    }

    pub fn parse(&self, header: &str) -> anyhow::Result<NaiveDate> {
        let header = collapse_whitespace(header);
        let Some(caps) = self.header_regex.captures(&header) else {
            return Err(anyhow::anyhow!("unrecognised day header: {header:?}"));
        };

        let weekday = weekday_from_name(&caps[1])
            .with_context(|| format!("unknown day name in header {header:?}"))?;
        let day = caps[2]
            .parse::<u32>()
            .with_context(|| format!("bad day number in header {header:?}"))?;
        let month = month_from_abbreviation(&caps[3])
            .with_context(|| format!("unknown month in header {header:?}"))?;

        let year = self.today.year();
        [year, year + 1, year - 1]
            .into_iter()
            .filter_map(|year| NaiveDate::from_ymd_opt(year, month, day))
            .find(|date| date.weekday() == weekday)
            .with_context(|| format!("no year around {} fits header {header:?}", self.today))
    }
}
