use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use maps::BlobLayout;
use pusher_tools::{decode_entries, format_summary, load_blob, MapEntry, MapReport, RULE};
use tracing::{info, level_filters::LevelFilter};

#[derive(Parser)]
#[command(
    name = "pusher-tools",
    version,
    about = "Decode and inspect the maps packed into pusher.exe"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode maps and print them.
    Decode {
        /// Path to pusher.exe.
        image: PathBuf,
        /// Only decode this maze (1-based).
        #[arg(long)]
        maze: Option<usize>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Text)]
        format: DecodeFormat,
        /// Report rejected maps and continue instead of aborting.
        #[arg(long)]
        keep_going: bool,
    },
    /// Print a one-line summary per map.
    Inspect {
        /// Path to pusher.exe.
        image: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let layout = BlobLayout::default();
    match cli.command {
        Command::Decode {
            image,
            maze,
            format,
            keep_going,
        } => {
            let bytes = load_blob(&image, &layout)?;
            let entries = match maze {
                Some(number) => vec![decode_one(&bytes, &layout, number)?],
                None => decode_entries(&bytes, &layout, keep_going)?,
            };
            info!(maps = entries.len(), "decoded image");
            match format {
                DecodeFormat::Text => print_text(&entries),
                DecodeFormat::Json => {
                    let json = serde_json::to_string_pretty(&entries).context("serialize json")?;
                    println!("{json}");
                }
            }
        }
        Command::Inspect { image } => {
            let bytes = load_blob(&image, &layout)?;
            for entry in decode_entries(&bytes, &layout, true)? {
                println!("{}", format_summary(&entry));
            }
        }
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn decode_one(bytes: &[u8], layout: &BlobLayout, number: usize) -> Result<MapEntry> {
    if number == 0 || number > layout.map_count {
        bail!("maze {number} out of range 1..={}", layout.map_count);
    }
    let map = maps::decode_map(bytes, layout, number - 1)
        .with_context(|| format!("decode maze {number}"))?;
    Ok(MapEntry::Decoded(MapReport::new(&map, layout)))
}

fn print_text(entries: &[MapEntry]) {
    for entry in entries {
        println!("{RULE}");
        match entry {
            MapEntry::Decoded(report) => println!("{report}"),
            MapEntry::Rejected(_) => println!("{}\n", format_summary(entry)),
        }
    }
    println!("{RULE}");
}
