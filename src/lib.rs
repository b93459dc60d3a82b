mod client;
mod config;
mod dutch_calendar;
mod error;
mod group_size;
mod requests;
mod reservation_context;
mod reservation_form;
mod text_manipulators;
mod timeslots;

pub use client::{Credentials, ReservationClient};
pub use config::{LoadFromEnv, ReservationConfig, TimeslotRequestParser};
pub use dutch_calendar::{DayHeaderParser, weekday_from_name, weekday_name};
pub use error::{Outcome, ReservationError, ReservationResult};
pub use group_size::{GroupSizeOption, GroupSizeOptions};
pub use requests::RequestClient;
pub use reservation_context::ReservationContext;
pub use reservation_form::ReservationForm;
pub use timeslots::{Timeslot, TimeslotRequest, TimeslotScraper, Timeslots};
