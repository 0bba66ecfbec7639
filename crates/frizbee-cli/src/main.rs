mod args;
mod logging;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use clap::Parser;
use serde_json::Value;
use tracing::{debug, info};

use args::{Args, Command};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init_with_filter(&args.log_level);

    let config = args.overrides.resolve()?;
    debug!(?config, "resolved config");

    let output = match args.command {
        Command::Rank {
            needle,
            file,
            threads,
            indices,
        } => {
            let haystacks = read_lines(file.as_deref())?;
            info!(haystacks = haystacks.len(), "ranking");
            if indices {
                serde_json::to_value(frizbee_core::rank_indices(&needle, &haystacks, &config)?)?
            } else if let Some(threads) = threads {
                serde_json::to_value(frizbee_core::rank_parallel(
                    &needle, &haystacks, &config, threads,
                )?)?
            } else {
                serde_json::to_value(frizbee_core::rank(&needle, &haystacks, &config)?)?
            }
        }
        Command::Indices { needle, haystack } => {
            serde_json::to_value(frizbee_core::match_indices(&needle, &haystack, &config)?)?
        }
        Command::Compare { file, min_score } => {
            let items = read_lines(file.as_deref())?;
            info!(items = items.len(), min_score, "comparing");
            serde_json::to_value(frizbee_core::compare_all(&items, &config, min_score)?)?
        }
        Command::Config => serde_json::to_value(&config)?,
    };

    print_json(&output)
}

/// Lines of `path`, or of stdin when no path is given
fn read_lines(path: Option<&Path>) -> io::Result<Vec<String>> {
    match path {
        Some(path) => BufReader::new(File::open(path)?).lines().collect(),
        None => io::stdin().lock().lines().collect(),
    }
}

fn print_json(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
