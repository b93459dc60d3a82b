use chrono::{Local, NaiveDate};
use log::{debug, info};
use reqwest::Url;
use scraper::Html;

use crate::{
    error::{ReservationError, ReservationResult},
    group_size::GroupSizeOptions,
    requests::RequestClient,
    reservation_form::ReservationForm,
    text_manipulators::find_error_marker,
    timeslots::{Timeslot, TimeslotRequest, TimeslotScraper, Timeslots},
};

const ACTIVITY_FIELD: (&str, &str) = ("select_area_1", "Boulderen");

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Walks the booking site's reservation flow for one gym with one session.
pub struct ReservationClient {
    request_client: RequestClient,
    gym: u32,
    credentials: Credentials,
    today: NaiveDate,
}

impl ReservationClient {
    pub fn new(base_url: Url, gym: u32, credentials: Credentials) -> anyhow::Result<Self> {
        Ok(Self {
            request_client: RequestClient::new(base_url)?,
            gym,
            credentials,
            today: Local::now().date_naive(),
        })
    }

    /// Day headers carry no year; it is inferred relative to this date.
    pub fn with_reference_date(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn gym(&self) -> u32 {
        self.gym
    }

    fn login_url(&self) -> String {
        format!("/nl/klimmen/reservations/gym-{}/", self.gym)
    }

    fn timeslot_url(&self) -> String {
        format!("/nl/klimmen/reservations/gym-{}/reserve", self.gym)
    }

    pub async fn login(&self) -> ReservationResult<()> {
        info!(
            "Logging in to gym {} at {} as {}",
            self.gym,
            self.request_client.base_url(),
            self.credentials.username
        );
        let form = [
            ("login_email", self.credentials.username.as_str()),
            ("login_password", self.credentials.password.as_str()),
            ("login_with_pass", "Log in"),
        ];
        let html = self.request_client.post_form(&self.login_url(), &form).await?;
        ensure_logged_in(&html)
    }

    /// Selects bouldering and the group size, then lists the bookable slots.
    pub async fn get_timeslots(&self, group_amount: u32) -> ReservationResult<Timeslots> {
        let activity_page = self.select_activity().await?;
        let timeslot_page = self.select_group_amount(group_amount, &activity_page).await?;

        let timeslots = TimeslotScraper::new(self.today)?.scrape(&timeslot_page)?;
        info!("Found {} timeslots", timeslots.len());
        Ok(timeslots)
    }

    async fn select_activity(&self) -> ReservationResult<String> {
        info!("Selecting activity {}", ACTIVITY_FIELD.1);
        let html = self
            .request_client
            .post_form(&self.timeslot_url(), &[ACTIVITY_FIELD])
            .await?;
        Ok(html)
    }

    async fn select_group_amount(&self, amount: u32, activity_page: &str) -> ReservationResult<String> {
        let options = GroupSizeOptions::extract(activity_page)?;
        debug!("Offered group sizes: {:?}", options.sizes());
        let option = options.get(amount)?;

        info!("Selecting group size {amount}");
        let html = self
            .request_client
            .post_form(&self.timeslot_url(), &option.as_form())
            .await?;
        Ok(html)
    }

    /// Submits the pre-filled reservation form found at the slot's page.
    pub async fn reserve_timeslot(&self, timeslot: &Timeslot) -> ReservationResult<()> {
        info!("Reserving {timeslot}");
        let slot_page = self.request_client.fetch_url_body(&timeslot.url).await?;
        let form = ReservationForm::extract(&slot_page)?;
        debug!("Submitting reservation form {:?}", form.fields());

        let confirmation = self
            .request_client
            .post_form(&timeslot.url, form.fields())
            .await?;
        let document = Html::parse_document(&confirmation);
        match find_error_marker(&document)? {
            Some(message) => Err(ReservationError::ReservationRejected(message)),
            None => Ok(()),
        }
    }

    /// The whole flow: log in, find the requested slot and book it.
    pub async fn reserve(
        &self,
        request: &TimeslotRequest,
        group_amount: u32,
    ) -> ReservationResult<Timeslot> {
        self.login().await?;
        let timeslot = self.find_timeslot(request, group_amount).await?;
        self.reserve_timeslot(&timeslot).await?;
        info!("Timeslot reserved: {timeslot}");
        Ok(timeslot)
    }

    /// Lists the slots and picks the requested one without booking it.
    pub async fn find_timeslot(
        &self,
        request: &TimeslotRequest,
        group_amount: u32,
    ) -> ReservationResult<Timeslot> {
        let timeslots = self.get_timeslots(group_amount).await?;
        timeslots
            .find(request)
            .ok_or_else(|| ReservationError::TimeslotUnavailable(request.to_string()))
    }
}

fn ensure_logged_in(html: &str) -> ReservationResult<()> {
    let document = Html::parse_document(html);
    match find_error_marker(&document)? {
        Some(message) => Err(ReservationError::InvalidLogin(message)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_error_marker() {
        let page = r#"<ul class="messages"><li class="error">Onjuist wachtwoord</li></ul>"#;
        match ensure_logged_in(page) {
            Err(ReservationError::InvalidLogin(message)) => {
                assert_eq!(message, "Onjuist wachtwoord")
            }
            other => panic!("expected InvalidLogin, got {other:?}"),
        }
    }

    #[test]
    fn test_login_without_marker() {
        let page = r#"<ul class="messages"><li class="success">Ingelogd</li></ul>"#;
        assert!(ensure_logged_in(page).is_ok());
    }

    #[test]
    fn test_endpoint_paths() {
        let client = ReservationClient::new(
            Url::parse("http://bouldertour.nl").unwrap(),
            12,
            Credentials {
                username: "alice".into(),
                password: "secret".into(),
            },
        )
        .unwrap();
        assert_eq!(client.login_url(), "/nl/klimmen/reservations/gym-12/");
        assert_eq!(client.timeslot_url(), "/nl/klimmen/reservations/gym-12/reserve");
    }
}
