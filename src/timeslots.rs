use std::{collections::BTreeMap, fmt};

use anyhow::Context;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use log::{debug, warn};
use scraper::Html;

use crate::{
    dutch_calendar::{DayHeaderParser, weekday_name},
    text_manipulators::{child_elements, extract_collapsed_text, extract_text, selector},
};

/// The weekday and time a caller wants to book, e.g. `maandag 18:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeslotRequest {
    pub weekday: Weekday,
    pub time: NaiveTime,
}

impl fmt::Display for TimeslotRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:02}:{:02}",
            weekday_name(self.weekday),
            self.time.hour(),
            self.time.minute()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeslot {
    pub starts_at: NaiveDateTime,
    pub url: String,
}

impl Timeslot {
    pub fn matches(&self, request: &TimeslotRequest) -> bool {
        self.starts_at.weekday() == request.weekday && self.starts_at.time() == request.time
    }
}

impl fmt::Display for Timeslot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({})",
            weekday_name(self.starts_at.weekday()),
            self.starts_at.format("%Y-%m-%d %H:%M"),
            self.url
        )
    }
}

/// Bookable slots keyed by start time, earliest first.
#[derive(Debug, Default, Clone)]
pub struct Timeslots(BTreeMap<NaiveDateTime, String>);

impl Timeslots {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Timeslot> + '_ {
        self.0.iter().map(|(starts_at, url)| Timeslot {
            starts_at: *starts_at,
            url: url.clone(),
        })
    }

    /// Earliest slot on the requested weekday at the requested time.
    pub fn find(&self, request: &TimeslotRequest) -> Option<Timeslot> {
        self.iter().find(|slot| slot.matches(request))
    }

    fn insert(&mut self, starts_at: NaiveDateTime, url: String) -> anyhow::Result<()> {
        if self.0.contains_key(&starts_at) {
            return Err(anyhow::anyhow!("timeslot {starts_at} is listed twice"));
        }
        self.0.insert(starts_at, url);
        Ok(())
    }
}

pub struct TimeslotScraper {
    day_header_parser: DayHeaderParser,
}

impl TimeslotScraper {
    pub fn new(today: NaiveDate) -> anyhow::Result<Self> {
        Ok(Self {
            day_header_parser: DayHeaderParser::new(today)?,
        })
    }

    pub fn scrape(&self, html: &str) -> anyhow::Result<Timeslots> {
        let document = Html::parse_document(html);
        let wrapper_selector = selector("div.timeslot-day-wrapper")?;

        let mut timeslots = Timeslots::default();
        for wrapper in document.select(&wrapper_selector) {
            let header = child_elements(wrapper)
                .find(|el| el.value().name() == "h3")
                .context("day wrapper without h3 header")?;
            let date = self.day_header_parser.parse(&extract_text(header))?;

            let anchors = child_elements(wrapper).filter(|el| {
                el.value().name() == "a"
                    && el
                        .value()
                        .attr("class")
                        .is_some_and(|class| class.contains("timeslot-selector"))
            });
            for anchor in anchors {
                let label = extract_collapsed_text(anchor);
                let time = parse_slot_label(&label)?;
                let url = anchor
                    .value()
                    .attr("href")
                    .with_context(|| format!("timeslot {label} on {date} has no link"))?;

                let starts_at = date.and_time(time);
                debug!("Found timeslot {starts_at} -> {url}");
                timeslots.insert(starts_at, url.to_string())?;
            }
        }

        if timeslots.is_empty() {
            warn!("No timeslots found on the timeslot page");
        }
        Ok(timeslots)
    }
}

/// Slot labels look like `18:00`, with a trailing `*` for waitlist-only slots.
fn parse_slot_label(label: &str) -> anyhow::Result<NaiveTime> {
    let trimmed = label.trim().trim_end_matches('*').trim_end();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .with_context(|| format!("unparsable timeslot label {label:?}"))
}
