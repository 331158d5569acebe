//! `slots` CLI — compute court availability from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Parse, format and round times of day
//! slots parse-time 9:05
//! slots format -- -30
//! slots round 60
//!
//! # Cut a window into 30-minute slots
//! slots generate --start 08:00 --end 12:00 --slot 30
//!
//! # Truncate start times into chip labels
//! slots chips 06:00 07:00 08:00 09:00
//!
//! # Schedule of one date, or a week, from a JSON array of rule records
//! slots day -i rules.json --date 2026-03-16
//! slots week -i rules.json --from 2026-03-16 --days 7
//!
//! # Soonest bookable date (defaults to today's local date)
//! slots nearest -i rules.json --today 2026-03-11
//!
//! # Filter and sort a court listing by an overnight window
//! slots courts -i courts.json --from 22:00 --to 02:00 --sort price-asc
//! ```
//!
//! Set `RUST_LOG` or pass `-v` for engine diagnostics on stderr.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Read};

use slot_engine::records::{parse_courts_json, parse_rules_json};
use slot_engine::{
    build_day_schedule, build_schedule, filter_courts, find_nearest_available_date,
    generate_slot_intervals, minutes_to_hhmm, parse_time_of_day, round_up_to_quarter,
    to_chip_labels, CourtQuery, CourtSort, TimeWindowFilter,
};

#[derive(Parser)]
#[command(name = "slots", version, about = "Court availability slot engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log engine decisions at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse HH:MM text into a minute of day
    ParseTime {
        /// Time of day, e.g. "9:05"
        raw: String,
    },
    /// Format a minute count as HH:MM (wraps around midnight)
    Format {
        #[arg(allow_hyphen_values = true)]
        minutes: i64,
    },
    /// Round a minute of day up to the next quarter hour
    Round { minutes: u32 },
    /// Cut a time window into consecutive slots
    Generate {
        /// Window start (HH:MM)
        #[arg(long)]
        start: String,
        /// Window end (HH:MM)
        #[arg(long)]
        end: String,
        /// Slot length in minutes
        #[arg(long)]
        slot: u32,
        /// Maximum number of slots
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Truncate start times into at most three chips plus an overflow marker
    Chips { times: Vec<String> },
    /// Schedule of one date
    Day {
        /// Rules JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Schedules of consecutive dates
    Week {
        /// Rules JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        #[arg(long)]
        from: NaiveDate,
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// Soonest date with bookable slots
    Nearest {
        /// Rules JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Reference date (defaults to today's local date)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Filter and sort a court listing
    Courts {
        /// Courts JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Window start (HH:MM); malformed values are ignored
        #[arg(long)]
        from: Option<String>,
        /// Window end (HH:MM); malformed values are ignored
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        sport: Option<String>,
        #[arg(long)]
        venue: Option<String>,
        #[arg(long)]
        indoor: Option<bool>,
        #[arg(long)]
        heated: Option<bool>,
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    PriceAsc,
    PriceDesc,
    Earliest,
}

impl From<SortArg> for CourtSort {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::PriceAsc => CourtSort::PriceAsc,
            SortArg::PriceDesc => CourtSort::PriceDesc,
            SortArg::Earliest => CourtSort::Earliest,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::ParseTime { raw } => {
            let minutes = parse_time_of_day(&raw)
                .with_context(|| format!("Invalid time of day: '{}'", raw))?;
            println!("{}", minutes);
        }
        Commands::Format { minutes } => {
            println!("{}", minutes_to_hhmm(minutes));
        }
        Commands::Round { minutes } => {
            let rounded = round_up_to_quarter(minutes);
            println!("{} ({})", rounded, minutes_to_hhmm(rounded as i64));
        }
        Commands::Generate {
            start,
            end,
            slot,
            limit,
        } => {
            let start = parse_time_arg(&start)?;
            let end = parse_time_arg(&end)?;
            let slots = generate_slot_intervals(start, end, slot, limit);
            println!("{}", serde_json::to_string_pretty(&slots)?);
        }
        Commands::Chips { times } => {
            println!("{}", to_chip_labels(&times).join(" "));
        }
        Commands::Day {
            input,
            output,
            date,
        } => {
            let rules = read_rules(input.as_deref())?;
            let schedule = build_day_schedule(&rules, date);
            write_output(output.as_deref(), &serde_json::to_string_pretty(&schedule)?)?;
        }
        Commands::Week {
            input,
            output,
            from,
            days,
        } => {
            let rules = read_rules(input.as_deref())?;
            let schedule = build_schedule(&rules, from, days);
            write_output(output.as_deref(), &serde_json::to_string_pretty(&schedule)?)?;
        }
        Commands::Nearest {
            input,
            output,
            today,
        } => {
            let rules = read_rules(input.as_deref())?;
            let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
            let nearest = find_nearest_available_date(&rules, today);
            if nearest.is_none() {
                log::info!("No rule yields a bookable date on or after {}", today);
            }
            write_output(output.as_deref(), &serde_json::to_string_pretty(&nearest)?)?;
        }
        Commands::Courts {
            input,
            output,
            from,
            to,
            sport,
            venue,
            indoor,
            heated,
            sort,
        } => {
            let json = read_input(input.as_deref())?;
            let courts = parse_courts_json(&json).context("Failed to parse courts JSON")?;
            let query = CourtQuery {
                sport,
                venue,
                indoor,
                heated,
                window: TimeWindowFilter::from_text(from.as_deref(), to.as_deref()),
                sort: sort.map(CourtSort::from),
            };
            let matched = filter_courts(&courts, &query);
            write_output(output.as_deref(), &serde_json::to_string_pretty(&matched)?)?;
        }
    }

    Ok(())
}

fn parse_time_arg(raw: &str) -> Result<u32> {
    parse_time_of_day(raw).with_context(|| format!("Invalid time of day: '{}'", raw))
}

fn read_rules(path: Option<&str>) -> Result<Vec<slot_engine::AvailabilityRule>> {
    let json = read_input(path)?;
    parse_rules_json(&json).context("Failed to parse rules JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
