//! Rank command implementation for the Compass CLI.
//!
//! Each payload file holds one query's provider results. The command runs
//! them through normalisation, scoring and aggregation, then writes the
//! caller-facing response JSON.

use std::io::{Read, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use compass_core::{
    DEFAULT_DISCOVERY_CAP, DEFAULT_SEARCH_CAP, Normalizer, PlacesResponse, ProviderKind,
    RankingMode, RankingPipeline, RawPlace, ReferenceYear,
};
use compass_scorer::{AuthenticityScorer, AuthenticityWeights, summarize};
use log::{debug, info};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::io::{create_utf8_file, file_is_file, open_utf8_file};
use crate::{
    ARG_RANK_LIMIT, ARG_RANK_MODE, ARG_RANK_OUTPUT, ARG_RANK_PAYLOADS, ARG_RANK_PROVIDER,
    ARG_RANK_REFERENCE_YEAR, ARG_RANK_SUMMARIES, ARG_RANK_WEIGHTS, CliError, ENV_RANK_PAYLOADS,
};

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score and rank saved place-search results. Each payload \
                 file holds one query's records, either as a bare JSON \
                 array or as an object with a `results` array. Several \
                 files are merged as a multi-interest discovery. Options \
                 can come from CLI flags, configuration files, or \
                 environment variables.",
    about = "Rank saved place-search results by authenticity"
)]
#[ortho_config(prefix = "COMPASS")]
pub(crate) struct RankArgs {
    /// Provider payload files, one per query.
    #[arg(value_name = "path", num_args = 1..)]
    #[serde(default)]
    pub(crate) payloads: Option<Vec<Utf8PathBuf>>,
    /// Record shape of the payloads: `legacy` or `places`.
    #[arg(long = ARG_RANK_PROVIDER, value_name = "kind")]
    #[serde(default)]
    pub(crate) provider: Option<String>,
    /// Ordering: `authenticity` or `proximity`.
    #[arg(long = ARG_RANK_MODE, value_name = "mode")]
    #[serde(default)]
    pub(crate) mode: Option<String>,
    /// Maximum number of places returned.
    #[arg(long = ARG_RANK_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Calendar year used to compute business ages.
    #[arg(long = ARG_RANK_REFERENCE_YEAR, value_name = "year")]
    #[serde(default)]
    pub(crate) reference_year: Option<i32>,
    /// JSON file overriding the default scoring weights.
    #[arg(long = ARG_RANK_WEIGHTS, value_name = "path")]
    #[serde(default)]
    pub(crate) weights: Option<Utf8PathBuf>,
    /// Attach a generated summary to every place.
    #[arg(
        long = ARG_RANK_SUMMARIES,
        value_name = "bool",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) summaries: Option<bool>,
    /// Write the response here instead of stdout.
    #[arg(long = ARG_RANK_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankConfig {
    /// Payload files in query order.
    pub(crate) payloads: Vec<Utf8PathBuf>,
    /// Record shape shared by every payload.
    pub(crate) provider: ProviderKind,
    /// Ordering applied to the merged places.
    pub(crate) mode: RankingMode,
    /// Result cap.
    pub(crate) limit: usize,
    /// Year against which creation dates are measured.
    pub(crate) reference_year: ReferenceYear,
    /// Optional weights override.
    pub(crate) weights: Option<Utf8PathBuf>,
    /// Whether summaries are attached.
    pub(crate) summaries: bool,
    /// Optional output file; stdout otherwise.
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RankConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        for payload in &self.payloads {
            Self::require_existing(payload, ARG_RANK_PAYLOADS)?;
        }
        if let Some(weights) = &self.weights {
            Self::require_existing(weights, ARG_RANK_WEIGHTS)?;
        }
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn scorer(&self) -> Result<AuthenticityScorer, CliError> {
        let weights = match &self.weights {
            Some(path) => AuthenticityWeights::from_json_file(path)?,
            None => AuthenticityWeights::default(),
        };
        Ok(AuthenticityScorer::new(weights)?)
    }
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let payloads = args
            .payloads
            .filter(|paths| !paths.is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_RANK_PAYLOADS,
                env: ENV_RANK_PAYLOADS,
            })?;
        let provider = parse_option(args.provider.as_deref(), ARG_RANK_PROVIDER)?;
        let mode = parse_option(args.mode.as_deref(), ARG_RANK_MODE)?;
        let limit = match args.limit {
            Some(0) => {
                return Err(CliError::InvalidOption {
                    field: ARG_RANK_LIMIT,
                    reason: "must be at least 1".to_owned(),
                });
            }
            Some(limit) => limit,
            None if payloads.len() == 1 => DEFAULT_SEARCH_CAP,
            None => DEFAULT_DISCOVERY_CAP,
        };
        let reference_year = args
            .reference_year
            .map_or_else(ReferenceYear::current, ReferenceYear::new);

        Ok(Self {
            payloads,
            provider,
            mode,
            limit,
            reference_year,
            weights: args.weights,
            summaries: args.summaries.unwrap_or(false),
            output: args.output,
        })
    }
}

fn parse_option<T>(value: Option<&str>, field: &'static str) -> Result<T, CliError>
where
    T: std::str::FromStr<Err = String> + Default,
{
    value.map_or_else(
        || Ok(T::default()),
        |text| text.parse().map_err(|reason| CliError::InvalidOption { field, reason }),
    )
}

pub(super) fn run_rank(args: RankArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_rank_with(args, &mut stdout)
}

pub(super) fn run_rank_with(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = resolve_rank_config(args)?;
    let response = execute_rank(&config)?;
    match &config.output {
        Some(path) => {
            let mut file = create_utf8_file(path).map_err(|source| CliError::CreateOutput {
                path: path.clone(),
                source,
            })?;
            write_response(&mut file, &response)?;
            info!("wrote {} places to {path}", response.count);
            Ok(())
        }
        None => write_response(writer, &response),
    }
}

fn resolve_rank_config(args: RankArgs) -> Result<RankConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn execute_rank(config: &RankConfig) -> Result<PlacesResponse, CliError> {
    let pipeline = RankingPipeline::new(
        Normalizer::new(config.reference_year),
        config.scorer()?,
        config.mode,
        config.limit,
    );
    let batches = config
        .payloads
        .iter()
        .map(|path| load_payload(path, config.provider))
        .collect::<Result<Vec<_>, _>>()?;
    let outcome = pipeline.rank(batches);
    Ok(PlacesResponse::from_outcome(outcome, |place| {
        config.summaries.then(|| summarize(place))
    }))
}

/// Loads one query's raw records from a payload file.
pub(super) fn load_payload(path: &Utf8Path, kind: ProviderKind) -> Result<Vec<RawPlace>, CliError> {
    let mut body = String::new();
    open_utf8_file(path)
        .and_then(|mut file| file.read_to_string(&mut body))
        .map_err(|source| CliError::ReadPayload {
            path: path.to_path_buf(),
            source,
        })?;
    let records = RawPlace::parse_payload(kind, &body).map_err(|source| {
        CliError::ParsePayload {
            path: path.to_path_buf(),
            source,
        }
    })?;
    debug!("loaded {} {kind} records from {path}", records.len());
    Ok(records)
}

fn write_response(writer: &mut dyn Write, response: &PlacesResponse) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(response).map_err(CliError::SerialiseResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RankConfig, CliError> {
    let merged = RankArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RankConfig::try_from(merged)
}
