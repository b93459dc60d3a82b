use crate::config::{ReservationConfig, TimeslotRequestParser};

pub struct ReservationContext {
    pub reservation_config: ReservationConfig,
    pub timeslot_request_parser: TimeslotRequestParser,
}

impl ReservationContext {
    pub fn new() -> anyhow::Result<Self> {
        let reservation_config = ReservationConfig::new()?;
        let timeslot_request_parser = TimeslotRequestParser::new()?;
        Ok(ReservationContext {
            reservation_config,
            timeslot_request_parser,
        })
    }
}
