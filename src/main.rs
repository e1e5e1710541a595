use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use kidcard::api::KidsClient;
use kidcard::card::{KidCard, sort_by_upcoming};
use kidcard::clock::{Clock, FixedClock, SystemClock};
use kidcard::config::{Config, LOG_DIRECTIVE};
use kidcard::delete::{Confirm, DeleteOutcome, Notify, delete_with_confirmation};
use kidcard::kid::Kid;
use kidcard::svg::{self, Theme};
use kidcard::{BirthDate, BirthdayCalculator, LeapDayPolicy, Moment, format_short_date};

#[derive(Parser)]
#[command(version, about = "Kids birthday tracker")]
struct Cli {
    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Where 29 February birthdays fall in non-leap years
    #[arg(long, global = true, value_enum, default_value_t = LeapDay::Feb28)]
    leap_day: LeapDay,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show age and countdown for a birth date, offline
    Info { birthday: BirthDate },
    /// List kids, soonest birthday first
    List,
    /// Write all kid cards to an SVG file
    Render {
        #[arg(long, value_enum, default_value_t = ThemeArg::Light)]
        theme: ThemeArg,
        #[arg(long, default_value = "kids.svg")]
        out: PathBuf,
    },
    /// Delete a kid by id
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LeapDay {
    Feb28,
    Mar1,
}

impl From<LeapDay> for LeapDayPolicy {
    fn from(value: LeapDay) -> Self {
        match value {
            LeapDay::Feb28 => LeapDayPolicy::February28,
            LeapDay::Mar1 => LeapDayPolicy::March1,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for Theme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Light => Theme::Light,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    initialize_logging();

    let cli = Cli::parse();
    let clock: Box<dyn Clock> = match cli.today {
        Some(date) => Box::new(FixedClock::new(date)),
        None => Box::new(SystemClock),
    };
    let now = clock.now();
    let calc = BirthdayCalculator::new(cli.leap_day.into());

    match cli.command {
        Command::Info { birthday } => print_info(&birthday, &calc, now)?,
        Command::List => {
            let client = KidsClient::new(&Config::from_env()?)?;
            let kids = client.list_kids().await?;
            for card in build_cards(&kids, &calc, now) {
                println!("{}", card.summary_line());
            }
        }
        Command::Render { theme, out } => {
            let client = KidsClient::new(&Config::from_env()?)?;
            let kids = client.list_kids().await?;
            let cards = build_cards(&kids, &calc, now);

            std::fs::write(&out, svg::generate_svg(&cards, theme.into()))
                .with_context(|| format!("Failed to write {}", out.display()))?;
            info!(cards = cards.len(), path = %out.display(), "rendered kid cards");
        }
        Command::Delete { id, yes } => {
            let client = KidsClient::new(&Config::from_env()?)?;
            let kids = client.list_kids().await?;
            let kid = kids
                .iter()
                .find(|k| k.id == id)
                .with_context(|| format!("No kid with id {id}"))?;

            let mut confirm = StdinConfirm { assume_yes: yes };
            let outcome =
                delete_with_confirmation(&client, kid, &mut confirm, &mut ConsoleNotify).await;
            if outcome == DeleteOutcome::Failed {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Initialize the logging system
fn initialize_logging() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(LOG_DIRECTIVE.parse().expect("valid log directive")),
        )
        .init();
}

fn print_info(birthday: &BirthDate, calc: &BirthdayCalculator, now: Moment) -> Result<()> {
    let age = calc.age(birthday, now)?;
    let days = calc.days_until(birthday, now);

    println!("Birthday: {}", format_short_date(birthday));
    println!("Age:      {age}");
    match (days, calc.next_birthday(birthday, now)) {
        (0, _) => println!("Next:     today!"),
        (1, Some(next)) => println!("Next:     tomorrow ({next})"),
        (n, Some(next)) => println!("Next:     in {n} days ({next})"),
        (_, None) => println!("Next:     beyond the supported calendar range"),
    }

    Ok(())
}

fn build_cards(kids: &[Kid], calc: &BirthdayCalculator, now: Moment) -> Vec<KidCard> {
    let mut cards: Vec<KidCard> = kids
        .iter()
        .filter_map(|kid| match KidCard::new(kid, calc, now) {
            Ok(card) => Some(card),
            Err(e) => {
                warn!(kid_id = %kid.id, "skipping kid: {e}");
                None
            }
        })
        .collect();
    sort_by_upcoming(&mut cards);
    cards
}

struct StdinConfirm {
    assume_yes: bool,
}

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

struct ConsoleNotify;

impl Notify for ConsoleNotify {
    fn success(&mut self, msg: &str) {
        println!("✔ {msg}");
    }

    fn failure(&mut self, msg: &str) {
        eprintln!("✖ {msg}");
    }
}
