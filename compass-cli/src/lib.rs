//! Command-line interface for ranking places by authenticity.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod io;
mod rank;

pub use error::CliError;

use rank::RankArgs;

pub(crate) const ARG_RANK_PAYLOADS: &str = "payloads";
pub(crate) const ARG_RANK_PROVIDER: &str = "provider";
pub(crate) const ARG_RANK_MODE: &str = "mode";
pub(crate) const ARG_RANK_LIMIT: &str = "limit";
pub(crate) const ARG_RANK_REFERENCE_YEAR: &str = "reference-year";
pub(crate) const ARG_RANK_WEIGHTS: &str = "weights";
pub(crate) const ARG_RANK_SUMMARIES: &str = "summaries";
pub(crate) const ARG_RANK_OUTPUT: &str = "output";
pub(crate) const ENV_RANK_PAYLOADS: &str = "COMPASS_CMDS_RANK_PAYLOADS";

/// Run the Compass CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, inputs
/// cannot be read, or the response cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Rank(args) => rank::run_rank(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "compass",
    about = "Score and rank places by how local and independent they are",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank saved provider results and print the response JSON.
    Rank(RankArgs),
}

#[cfg(test)]
mod tests;
