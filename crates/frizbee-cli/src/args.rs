//! Command line arguments and config resolution

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use frizbee_core::config::typo_budget;
use frizbee_core::Config;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "frizbee")]
#[command(about = "Typo resistant fuzzy matching over lines of text")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub overrides: Overrides,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rank haystack lines against a needle
    Rank {
        needle: String,

        /// Read haystacks from this file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Match on a dedicated pool with this many threads
        #[arg(long)]
        threads: Option<usize>,

        /// Include the matched positions of every result
        #[arg(long)]
        indices: bool,
    },

    /// Explain one match with the haystack positions it used
    Indices { needle: String, haystack: String },

    /// Score every ordered pair of lines against each other
    Compare {
        /// Read items from this file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Drop pairs scoring below this value
        #[arg(long, default_value_t = 0)]
        min_score: u16,
    },

    /// Print the effective configuration
    Config,
}

/// Flags layered over the config file
#[derive(ClapArgs, Debug, Default, Clone)]
pub struct Overrides {
    /// JSON config file, partial objects allowed
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Maximum number of typos per match
    #[arg(long, global = true, allow_negative_numbers = true, conflicts_with = "unlimited_typos")]
    pub max_typos: Option<i64>,

    /// Allow any number of typos
    #[arg(long, global = true)]
    pub unlimited_typos: bool,

    /// Align every haystack, even ones the prefilter would reject
    #[arg(long, global = true)]
    pub no_prefilter: bool,

    /// Keep results in input order
    #[arg(long, global = true)]
    pub no_sort: bool,

    /// Compare characters exactly instead of case-folded
    #[arg(long, global = true)]
    pub case_sensitive: bool,
}

impl Overrides {
    /// Load the config file (or the defaults) and apply the flags on top
    pub fn resolve(&self) -> Result<Config, Box<dyn Error>> {
        let base = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .map_err(|e| format!("failed to read config '{}': {}", path.display(), e))?;
                debug!(path = %path.display(), "loaded config file");
                serde_json::from_str(&raw)
                    .map_err(|e| format!("invalid config '{}': {}", path.display(), e))?
            }
            None => Config::default(),
        };
        let config = self.apply(base)?;
        config.validate()?;
        Ok(config)
    }

    fn apply(&self, mut config: Config) -> Result<Config, Box<dyn Error>> {
        if let Some(value) = self.max_typos {
            config.max_typos = Some(typo_budget(value)?);
        }
        if self.unlimited_typos {
            config.max_typos = None;
        }
        if self.no_prefilter {
            config.prefilter = false;
        }
        if self.no_sort {
            config.sort = false;
        }
        if self.case_sensitive {
            config.case_sensitive = true;
        }
        Ok(config)
    }
}
