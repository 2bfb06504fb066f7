//! [`Args`] definitions.

use std::path::PathBuf;

use clap::Parser;
use rust_decimal::Decimal;
use service::domain::{
    contract::{self, Candidate, Kind},
    employee,
};

/// Console for managing employment contracts and their amendments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// [`Action`] to perform.
    #[command(subcommand)]
    pub action: Action,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Action performed by the console.
#[derive(Debug, clap::Subcommand)]
pub enum Action {
    /// Prints contracts of an employee.
    Contracts {
        /// ID of the employee.
        #[arg(long)]
        employee: employee::Id,
    },

    /// Prints positions open for hiring.
    Positions,

    /// Creates a new contract or an amendment.
    Create {
        /// ID of the employee.
        #[arg(long)]
        employee: employee::Id,

        /// ID of the root contract to be amended.
        #[arg(long)]
        parent: Option<contract::Id>,

        /// Name of the contract, fixed once created.
        #[arg(long)]
        name: Option<String>,

        /// Terms of the new contract.
        #[command(flatten)]
        terms: Terms,
    },

    /// Updates terms of an existing contract.
    Update {
        /// ID of the employee.
        #[arg(long)]
        employee: employee::Id,

        /// ID of the contract to be updated.
        #[arg(long)]
        contract: contract::Id,

        /// Terms to be changed.
        #[command(flatten)]
        terms: Terms,
    },

    /// Deletes a contract.
    Delete {
        /// ID of the employee.
        #[arg(long)]
        employee: employee::Id,

        /// ID of the contract to be deleted.
        #[arg(long)]
        contract: contract::Id,
    },

    /// Downloads a generated contract document.
    Document {
        /// ID of the contract.
        #[arg(long)]
        contract: contract::Id,

        /// Directory to write the document into.
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },
}

/// Contract terms provided on the command line.
///
/// Every omitted term is left as it is.
#[derive(Clone, Debug, Default, clap::Args)]
pub struct Terms {
    /// Kind of the contract (`Umowa o pracę` or `Umowa zlecenie`).
    #[arg(long)]
    pub kind: Option<Kind>,

    /// Signing date (`YYYY-MM-DD`).
    #[arg(long)]
    pub signed_at: Option<String>,

    /// Date of coming into force (`YYYY-MM-DD`).
    #[arg(long)]
    pub valid_from: Option<String>,

    /// Expiration date (`YYYY-MM-DD`), empty to clear.
    #[arg(long)]
    pub valid_to: Option<String>,

    /// Title of the position.
    #[arg(long)]
    pub position: Option<String>,

    /// Hourly rate.
    #[arg(long)]
    pub hourly_rate: Option<Decimal>,

    /// Grants (`true`) or revokes (`false`) the bonus.
    #[arg(long)]
    pub bonus_enabled: Option<bool>,

    /// Amount of the bonus.
    #[arg(long)]
    pub bonus: Option<Decimal>,

    /// Threshold of days to be worked to be granted the bonus.
    #[arg(long)]
    pub bonus_threshold: Option<Decimal>,
}

impl Terms {
    /// Applies these [`Terms`] on top of the provided [`Candidate`].
    #[must_use]
    pub fn apply(self, mut candidate: Candidate) -> Candidate {
        let Self {
            kind,
            signed_at,
            valid_from,
            valid_to,
            position,
            hourly_rate,
            bonus_enabled,
            bonus,
            bonus_threshold,
        } = self;

        if kind.is_some() {
            candidate.kind = kind;
        }
        if let Some(signed_at) = signed_at {
            candidate.signed_at = signed_at;
        }
        if let Some(valid_from) = valid_from {
            candidate.valid_from = valid_from;
        }
        if let Some(valid_to) = valid_to {
            candidate.valid_to = Some(valid_to).filter(|d| !d.is_empty());
        }
        if position.is_some() {
            candidate.position = position;
        }
        if hourly_rate.is_some() {
            candidate.hourly_rate = hourly_rate;
        }
        if let Some(enabled) = bonus_enabled {
            candidate.bonus_enabled = enabled;
        }
        if bonus.is_some() {
            candidate.bonus = bonus;
        }
        if bonus_threshold.is_some() {
            candidate.bonus_threshold = bonus_threshold;
        }
        candidate
    }
}
