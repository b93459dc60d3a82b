use std::process::ExitCode;

use boulder_reserver::{
    Credentials, Outcome, ReservationClient, ReservationContext, ReservationError,
    ReservationResult,
};
use clap::{Parser, error::ErrorKind};
use dotenv::dotenv;
use log::{LevelFilter, error, info};

/// Reserve a bouldering timeslot at a bouldertour.nl gym.
#[derive(Debug, Parser)]
#[command(name = "boulder-reserver", version)]
struct Args {
    /// Gym number on the booking site
    #[arg(short, long)]
    gym: u32,

    /// Login e-mail address, falls back to BOULDER_USERNAME
    #[arg(short, long)]
    username: Option<String>,

    /// Password, falls back to BOULDER_PASSWORD
    #[arg(short, long)]
    password: Option<String>,

    /// Timeslot to book, e.g. "maandag 18:00"
    #[arg(short, long)]
    timeslot: String,

    /// Number of people in the group
    #[arg(short, long)]
    amount: u32,

    /// Find the timeslot but don't reserve it
    #[arg(long)]
    dry_run: bool,
}

async fn run(args: Args, context: ReservationContext) -> ReservationResult<()> {
    let request = context.timeslot_request_parser.parse(&args.timeslot)?;
    let config = context.reservation_config;

    let username = args.username.or(config.username).ok_or_else(|| {
        ReservationError::InvalidArguments("no username given (--username or BOULDER_USERNAME)".into())
    })?;
    let password = args.password.or(config.password).ok_or_else(|| {
        ReservationError::InvalidArguments("no password given (--password or BOULDER_PASSWORD)".into())
    })?;

    let client = ReservationClient::new(
        config.base_url,
        args.gym,
        Credentials { username, password },
    )?;

    if args.dry_run {
        client.login().await?;
        let timeslot = client.find_timeslot(&request, args.amount).await?;
        info!("Dry run, not reserving {timeslot}");
        println!("Timeslot available: {timeslot}");
    } else {
        client.reserve(&request, args.amount).await?;
        println!("Timeslot reserved.");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Outcome::Success.into(),
                _ => Outcome::InvalidArguments.into(),
            };
        }
    };

    let context = match ReservationContext::new() {
        Ok(context) => context,
        Err(e) => {
            error!("Could not load configuration: {e:#}");
            return Outcome::InvalidArguments.into();
        }
    };

    match run(args, context).await {
        Ok(()) => Outcome::Success.into(),
        Err(e) => {
            match &e {
                ReservationError::Unknown(inner) => error!("{inner:?}"),
                other => error!("{other}"),
            }
            e.outcome().into()
        }
    }
}
