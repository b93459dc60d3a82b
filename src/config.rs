use anyhow::Context;
use chrono::NaiveTime;
use regex::Regex;
use reqwest::Url;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    dutch_calendar::weekday_from_name,
    error::{ReservationError, ReservationResult},
    timeslots::TimeslotRequest,
};

const DEFAULT_BASE_URL: &str = "http://bouldertour.nl";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// The env vars (or `.env` entries) the reserver reads.
#[derive(Debug, Deserialize)]
pub struct ReservationEnv {
    #[serde(default = "default_base_url")]
    boulder_base_url: String,
    boulder_username: Option<String>,
    boulder_password: Option<String>,
}

pub struct ReservationConfig {
    pub base_url: Url,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ReservationConfig {
    pub fn new() -> anyhow::Result<Self> {
        let reservation_env = ReservationEnv::load_from_env()?;
        Self::from_env(reservation_env)
    }

    fn from_env(reservation_env: ReservationEnv) -> anyhow::Result<Self> {
        let base_url = Url::parse(&reservation_env.boulder_base_url).with_context(|| {
            format!(
                "BOULDER_BASE_URL is not a valid url: {}",
                reservation_env.boulder_base_url
            )
        })?;
        Ok(Self {
            base_url,
            username: reservation_env.boulder_username,
            password: reservation_env.boulder_password,
        })
    }
}

pub struct TimeslotRequestParser {
    // Matches `<day name> HH:MM`, e.g. `maandag 18:00`.
    timeslot_regex: Regex,
}

impl TimeslotRequestParser {
    pub fn new() -> anyhow::Result<Self> {
        let timeslot_regex = Regex::new(r"^(\S+) (\d{2}):(\d{2})$")?;
        Ok(Self { timeslot_regex })
    }

    pub fn parse(&self, timeslot: &str) -> ReservationResult<TimeslotRequest> {
        let invalid = || {
            ReservationError::InvalidArguments(format!(
                "<timeslot> was not in the correct format: {timeslot:?}"
            ))
        };

        let Some(caps) = self.timeslot_regex.captures(timeslot.trim()) else {
            return Err(invalid());
        };
        let weekday = weekday_from_name(&caps[1]).ok_or_else(|| {
            ReservationError::InvalidArguments(format!("unknown day name: {}", &caps[1]))
        })?;
        let hour = caps[2].parse::<u32>().map_err(|_| invalid())?;
        let minute = caps[3].parse::<u32>().map_err(|_| invalid())?;
        let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)?;

        Ok(TimeslotRequest { weekday, time })
    }
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config =
            envy::from_env::<Self>().context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}
