//! `slots` CLI — browse a staff member's availability and pick a booking interval.
//!
//! ## Usage
//!
//! ```sh
//! # Dates with no slots in a calendar month (one per line)
//! slots disabled -a availability.json --month 2017-03
//!
//! # Dates with no slots in an explicit range
//! slots disabled -a availability.json --from 2017-03-01 --to 2017-03-31
//!
//! # Start-time slots offered on a date
//! slots list -a availability.json --date 2017-03-31
//!
//! # Pick the first start slot and the second end slot of a 60 minute booking
//! slots book -a availability.json --date 2017-03-31 --duration 60 --start 0 --end 1
//!
//! # Same flow through the route/store driver, with debug logging
//! RUST_LOG=debug slots book -a availability.json --date 2017-03-31 \
//!   --duration 60 --start 0 --end 1 --driver store
//! ```
//!
//! The availability file is a JSON object of `YYYY-MM-DD` keys to slot lists.
//! It is read from stdin when `-a` is omitted or `-`.

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use slot_engine::availability::{disabled_dates, disabled_dates_in_month};
use slot_engine::driver::{SelectionDriver, StackDriver, StoreDriver};
use slot_engine::engine::{display, BookingRequest, SelectionState, SlotDisplay};
use slot_engine::navigation::{RouteHistory, ViewStack};
use slot_engine::AvailabilityMap;
use std::collections::BTreeSet;
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Staff availability and booking slot picker"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log engine decisions to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dates that have no available slots
    Disabled {
        /// Availability JSON file (reads from stdin if omitted or "-")
        #[arg(short, long)]
        availability: Option<String>,
        /// Calendar month to inspect, as YYYY-MM
        #[arg(long, value_parser = parse_month, conflicts_with_all = ["from", "to"])]
        month: Option<Month>,
        /// First date of the range (inclusive)
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,
        /// Last date of the range (inclusive)
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
    },
    /// Show the start-time slots offered on a date
    List {
        /// Availability JSON file (reads from stdin if omitted or "-")
        #[arg(short, long)]
        availability: Option<String>,
        /// Date to inspect, as YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
    },
    /// Pick a start and an end slot and print the resulting booking as JSON
    Book {
        /// Availability JSON file (reads from stdin if omitted or "-")
        #[arg(short, long)]
        availability: Option<String>,
        /// Appointment date, as YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        /// Appointment length in minutes
        #[arg(long)]
        duration: u32,
        /// Index of the start slot in the date's slot list
        #[arg(long)]
        start: usize,
        /// Index of the end slot in the derived end-time list
        #[arg(long)]
        end: usize,
        /// Navigation style driving the flow
        #[arg(long, value_enum, default_value_t = DriverKind::Stack)]
        driver: DriverKind,
    },
}

/// A calendar month given as `YYYY-MM`.
#[derive(Clone, Copy, Debug)]
struct Month {
    year: i32,
    month: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DriverKind {
    /// Push one view per step onto a view stack
    Stack,
    /// Dispatch store actions and move between routes
    Store,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Disabled {
            availability,
            month,
            from,
            to,
        } => {
            let availability = load_availability(availability.as_deref())?;
            let disabled = match (month, from, to) {
                (Some(Month { year, month }), _, _) => {
                    disabled_dates_in_month(&availability, year, month)
                        .context("Failed to compute disabled dates")?
                }
                (None, Some(from), Some(to)) => disabled_dates(&availability, from, to),
                _ => bail!("Either --month or both --from and --to are required"),
            };
            print_dates(&disabled);
        }
        Commands::List { availability, date } => {
            let availability = load_availability(availability.as_deref())?;
            let state = SelectionState::start(date, availability.slots_for_date(date));
            print_display(&display(&state));
            if state.slots.is_empty() {
                if let Some(next) = date
                    .succ_opt()
                    .and_then(|d| availability.first_available_on_or_after(d))
                {
                    println!("Next available: {}", next);
                }
            }
        }
        Commands::Book {
            availability,
            date,
            duration,
            start,
            end,
            driver,
        } => {
            let availability = load_availability(availability.as_deref())?;
            let booking = match driver {
                DriverKind::Stack => {
                    let mut driver = StackDriver::new(ViewStack::new(), availability, duration);
                    run_flow(&mut driver, date, start, end)?
                }
                DriverKind::Store => {
                    let mut driver =
                        StoreDriver::for_staff(availability, duration, RouteHistory::new());
                    run_flow(&mut driver, date, start, end)?
                }
            };
            let json = serde_json::to_string_pretty(&booking)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .without_time()
        .init();
}

/// Drive one date → start → end flow and return the booking it produces.
fn run_flow(
    driver: &mut dyn SelectionDriver,
    date: NaiveDate,
    start: usize,
    end: usize,
) -> Result<BookingRequest> {
    driver.select_date(date);
    debug!(%date, start, end, "running booking flow");

    if let Some(booking) = driver
        .select_slot(start)
        .with_context(|| format!("Failed to select start slot {}", start))?
    {
        return Ok(booking);
    }
    match driver
        .select_slot(end)
        .with_context(|| format!("Failed to select end slot {}", end))?
    {
        Some(booking) => Ok(booking),
        None => bail!("Booking flow did not complete after choosing an end time"),
    }
}

fn parse_month(raw: &str) -> std::result::Result<Month, String> {
    let first = format!("{}-01", raw.trim());
    NaiveDate::parse_from_str(&first, "%Y-%m-%d")
        .map(|d| Month {
            year: d.year(),
            month: d.month(),
        })
        .map_err(|_| format!("expected YYYY-MM, got '{}'", raw))
}

fn print_dates(dates: &BTreeSet<NaiveDate>) {
    for date in dates {
        println!("{}", date);
    }
}

fn print_display(shown: &SlotDisplay) {
    match shown {
        SlotDisplay::NoSlots { heading, message } => {
            println!("{}", heading);
            println!("{}", message);
        }
        SlotDisplay::Choose {
            heading,
            label,
            entries,
        } => {
            println!("{}", heading);
            println!("{}", label);
            for entry in entries {
                println!("  [{}] {}", entry.index, entry.slot);
            }
        }
    }
}

fn load_availability(path: Option<&str>) -> Result<AvailabilityMap> {
    let json = read_input(path)?;
    AvailabilityMap::from_json(&json).context("Failed to parse availability JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) if path != "-" => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
