//! Command line interface.

use std::fmt;
use std::str::FromStr;

use clap::{Parser, Subcommand};

/// Rental checkout driver: prints the checkout view as JSON.
#[derive(Debug, Parser)]
#[command(name = "checkout", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the opening checkout view.
    Summary,

    /// Apply quantity changes in order, optionally submitting afterwards.
    Order {
        /// A quantity change such as `hewitt=+1` or `harper=-2` (repeatable).
        #[arg(short, long = "change", value_name = "KEY=DELTA")]
        changes: Vec<QuantityChange>,

        /// Submit the resulting cart.
        #[arg(long)]
        submit: bool,
    },
}

/// One `KEY=DELTA` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityChange {
    pub key: String,
    pub delta: i64,
}

impl FromStr for QuantityChange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, delta) = s
            .split_once('=')
            .ok_or_else(|| format!("expected KEY=DELTA, got '{s}'"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("missing item key in '{s}'"));
        }
        let delta = delta
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("delta in '{s}' must be a whole number like +1 or -2"))?;

        Ok(QuantityChange {
            key: key.to_string(),
            delta,
        })
    }
}

impl fmt::Display for QuantityChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:+}", self.key, self.delta)
    }
}
