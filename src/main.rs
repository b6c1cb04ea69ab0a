use std::{error::Error, fs};

use clap::Parser;
use log::LevelFilter;
use oudia_parser::{Oudia, SourceEncoding, merge_file};
use simple_logger::SimpleLogger;

/// Copies the departures of an OuDia timetable into a train scheduler configuration.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// OuDia timetable to read.
    #[clap(long)]
    input: String,
    /// Scheduler configuration to update in place.
    #[clap(long)]
    config: String,
    /// LineID of the line to update in the configuration.
    #[clap(long)]
    line_id: String,
    #[clap(long, default_value = "shift_jis")]
    encoding: SourceEncoding,
    /// Also write the station pair table as JSON.
    #[clap(long)]
    json_output: Option<String>,
    /// Build the table without touching the configuration.
    #[clap(long)]
    dry_run: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()?;
    let args = Args::parse();

    let oudia = Oudia::from_path(&args.input, args.encoding)?;
    let table = oudia.station_pair_table()?;

    if let Some(path) = &args.json_output {
        fs::write(path, serde_json::to_string_pretty(&table)?)?;
        log::info!("Station pair table written to {path}");
    }

    if args.dry_run {
        for (pair, times) in table.iter() {
            log::info!(
                "{} -> {}: {} departures",
                pair.origin(),
                pair.destination(),
                times.len()
            );
        }
        return Ok(());
    }

    let report = merge_file(&args.config, &table, &args.line_id)?;
    if !report.unmatched().is_empty() {
        log::warn!(
            "{} stops of line {} kept their departures",
            report.unmatched().len(),
            args.line_id
        );
    }
    Ok(())
}
