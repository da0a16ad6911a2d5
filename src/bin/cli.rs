//! Treasure Manager CLI
//!
//! Command-line interface for managing treasure hunts.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::{ArgGroup, Parser};
use tracing_subscriber::{fmt, EnvFilter};

use treasure_manager::manager::Operation;
use treasure_manager::prompt::{self, TreasureDraft};
use treasure_manager::{report, Config, TextPolicy, TreasureError, TreasureManager};

/// Treasure Manager
#[derive(Parser, Debug)]
#[command(name = "treasure_manager")]
#[command(about = "Manage treasure hunts stored as fixed-width binary records")]
#[command(version)]
#[command(group(
    ArgGroup::new("operation")
        .required(true)
        .args(["add", "list", "view", "remove_treasure", "remove_hunt"])
))]
struct Args {
    /// Add a treasure, prompting for any field not given as a flag
    #[arg(long, value_name = "HUNT_ID")]
    add: Option<String>,

    /// List every treasure in a hunt
    #[arg(long, value_name = "HUNT_ID")]
    list: Option<String>,

    /// Show one treasure
    #[arg(long, num_args = 2, value_names = ["HUNT_ID", "TREASURE_ID"], allow_negative_numbers = true)]
    view: Option<Vec<String>>,

    /// Delete one treasure
    #[arg(long = "remove_treasure", num_args = 2, value_names = ["HUNT_ID", "TREASURE_ID"], allow_negative_numbers = true)]
    remove_treasure: Option<Vec<String>>,

    /// Delete a hunt with its records, log and log link
    #[arg(long = "remove_hunt", value_name = "HUNT_ID")]
    remove_hunt: Option<String>,

    /// Directory holding the hunts
    #[arg(short, long, env = "TREASURE_BASE_DIR", default_value = ".")]
    base_dir: PathBuf,

    /// Fail instead of truncating text that does not fit its field
    #[arg(long)]
    reject_long_text: bool,

    // -------------------------------------------------------------------------
    // Treasure fields for --add
    // -------------------------------------------------------------------------
    /// Treasure identifier
    #[arg(long, requires = "add", allow_negative_numbers = true)]
    id: Option<i32>,

    /// Owner name
    #[arg(long, requires = "add")]
    user: Option<String>,

    /// Latitude
    #[arg(long, requires = "add", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude
    #[arg(long, requires = "add", allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Clue text
    #[arg(long, requires = "add")]
    clue: Option<String>,

    /// Treasure value
    #[arg(long, requires = "add", allow_negative_numbers = true)]
    value: Option<i32>,
}

fn main() {
    // Initialize tracing/logging (stderr, so stdout only carries results)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => usage_error(e),
        },
    };

    let config = Config::builder()
        .base_dir(&args.base_dir)
        .text_policy(if args.reject_long_text {
            TextPolicy::Reject
        } else {
            TextPolicy::Truncate
        })
        .build();

    if let Err(e) = config.validate() {
        fail(e);
    }

    tracing::debug!("Treasure Manager v{}", treasure_manager::VERSION);
    tracing::debug!("Base directory: {}", config.base_dir.display());

    let operation = match operation(args) {
        Ok(op) => op,
        Err(e) => fail(e),
    };

    let manager = TreasureManager::new(config);
    match manager.execute(operation) {
        Ok(outcome) => {
            print!("{}", report::render(&outcome));
            let _ = io::stdout().flush();
        }
        Err(e) => fail(e),
    }
}

/// Build the operation selected on the command line
fn operation(args: Args) -> treasure_manager::Result<Operation> {
    if let Some(hunt) = args.add {
        let draft = TreasureDraft {
            id: args.id,
            owner: args.user,
            latitude: args.lat,
            longitude: args.lon,
            clue: args.clue,
            value: args.value,
        };
        let treasure = if draft.is_complete() {
            prompt::read_treasure(&mut io::empty(), &mut io::sink(), draft)?
        } else {
            prompt::read_treasure(&mut io::stdin().lock(), &mut io::stdout(), draft)?
        };
        return Ok(Operation::Add { hunt, treasure });
    }

    if let Some(hunt) = args.list {
        return Ok(Operation::List { hunt });
    }

    if let Some(values) = args.view {
        let (hunt, id) = hunt_and_id(values);
        return Ok(Operation::View { hunt, id });
    }

    if let Some(values) = args.remove_treasure {
        let (hunt, id) = hunt_and_id(values);
        return Ok(Operation::RemoveTreasure { hunt, id });
    }

    match args.remove_hunt {
        Some(hunt) => Ok(Operation::RemoveHunt { hunt }),
        None => Err(TreasureError::InvalidInput("no operation given".to_string())),
    }
}

/// Split `<hunt_id> <treasure_id>`, exiting on a non-integer id
fn hunt_and_id(values: Vec<String>) -> (String, i32) {
    let mut values = values.into_iter();
    let hunt = values.next().unwrap_or_default();
    let raw = values.next().unwrap_or_default();

    match raw.trim().parse() {
        Ok(id) => (hunt, id),
        Err(_) => {
            println!("Invalid treasure id: {}", raw);
            println!("Usage: treasure_manager --operation [hunt_id] [treasure_id]");
            process::exit(1);
        }
    }
}

fn usage_error(e: clap::Error) -> ! {
    let _ = e.print();
    process::exit(1);
}

fn fail(e: TreasureError) -> ! {
    tracing::error!("Operation failed: {}", e);
    eprintln!("{}", e);
    process::exit(1);
}
