//! [`Candidate`] and [`Draft`] definitions.

use rust_decimal::Decimal;
use tracing as log;

use crate::{
    domain::position,
    validation::{self, Field, FieldErrors},
};

use super::{
    Contract, Depth, EarningConditions, EndDate, Kind, SigningDate, StartDate,
};
#[cfg(doc)]
use crate::domain::Position;

/// Unvalidated [`Contract`] terms, as entered by a user.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Candidate {
    /// Name of a new [`Contract`], if it is to be set.
    ///
    /// Only taken on creation, as names of existing [`Contract`]s are fixed.
    pub name: Option<String>,

    /// [`Kind`] of the [`Contract`], if known.
    pub kind: Option<Kind>,

    /// Date of signing, as entered.
    pub signed_at: String,

    /// Date of coming into force, as entered.
    pub valid_from: String,

    /// Date of expiration, as entered.
    pub valid_to: Option<String>,

    /// Title of the [`Position`].
    pub position: Option<String>,

    /// Hourly rate.
    pub hourly_rate: Option<Decimal>,

    /// Indicator whether a bonus is granted.
    pub bonus_enabled: bool,

    /// Amount of the bonus.
    pub bonus: Option<Decimal>,

    /// Threshold of days to be worked to be granted the bonus.
    pub bonus_threshold: Option<Decimal>,
}

impl From<&Contract> for Candidate {
    fn from(contract: &Contract) -> Self {
        let EarningConditions {
            hourly_rate,
            bonus_enabled,
            bonus,
            bonus_threshold,
        } = contract.earning_conditions;

        Self {
            name: Some(contract.name.to_string()),
            kind: contract.kind,
            signed_at: contract.signed_at.to_string(),
            valid_from: contract.valid_from.to_string(),
            valid_to: contract.valid_to.map(|d| d.to_string()),
            position: contract.position.as_ref().map(|p| p.title.to_string()),
            hourly_rate: Some(hourly_rate),
            bonus_enabled,
            bonus,
            bonus_threshold,
        }
    }
}

/// Validated [`Contract`] terms, ready to be sent to a backend.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Draft {
    /// [`Kind`] of the [`Contract`], if known.
    pub kind: Option<Kind>,

    /// Date when the [`Contract`] is signed.
    pub signed_at: SigningDate,

    /// Date since which the [`Contract`] is in force.
    pub valid_from: StartDate,

    /// Date until which the [`Contract`] is in force.
    pub valid_to: Option<EndDate>,

    /// [`Position`] the [`Contract`] employs for.
    pub position: Option<position::Position>,

    /// [`EarningConditions`] of the [`Contract`].
    pub earning_conditions: EarningConditions,
}

impl Draft {
    /// Validates the provided [`Candidate`] placed at the provided [`Depth`]
    /// and builds a [`Draft`] out of it, resolving its [`Position`] against
    /// the provided [`position::Catalog`].
    ///
    /// Root-only terms (end date and [`Position`]) are dropped for
    /// amendments.
    ///
    /// # Errors
    ///
    /// With [`FieldErrors`] if the [`Candidate`] is invalid.
    pub fn new(
        candidate: &Candidate,
        depth: Depth,
        catalog: &position::Catalog,
    ) -> Result<Self, FieldErrors> {
        use Field as F;

        let errors = validation::validate(candidate, depth);
        if !errors.is_empty() {
            return Err(errors);
        }

        let invalid_date = |f| FieldErrors::single(f, validation::INVALID_DATE);
        let signed_at = SigningDate::parse(&candidate.signed_at)
            .map_err(|_| invalid_date(F::SignedAt))?;
        let valid_from = StartDate::parse(&candidate.valid_from)
            .map_err(|_| invalid_date(F::ValidFrom))?;

        let (valid_to, position) = match depth {
            Depth::Root => (
                validation::non_blank(candidate.valid_to.as_deref())
                    .map(EndDate::parse)
                    .transpose()
                    .map_err(|_| invalid_date(F::ValidTo))?,
                validation::non_blank(candidate.position.as_deref()).and_then(
                    |title| {
                        let resolved = catalog.resolve(title).cloned();
                        if resolved.is_none() {
                            log::debug!("unknown `Position(title: {title})`");
                        }
                        resolved
                    },
                ),
            ),
            Depth::Amendment => (None, None),
        };

        let hourly_rate = candidate.hourly_rate.ok_or_else(|| {
            FieldErrors::single(
                F::HourlyRate,
                validation::HOURLY_RATE_NOT_POSITIVE,
            )
        })?;
        let bonus_enabled = candidate.bonus_enabled;

        Ok(Self {
            kind: candidate.kind,
            signed_at,
            valid_from,
            valid_to,
            position,
            earning_conditions: EarningConditions {
                hourly_rate,
                bonus_enabled,
                bonus: candidate.bonus.filter(|_| bonus_enabled),
                bonus_threshold: candidate
                    .bonus_threshold
                    .filter(|_| bonus_enabled),
            },
        })
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use crate::{
        domain::{
            contract::{Candidate, Depth},
            position::{self, Position},
        },
        fixture::{candidate, contract, positions},
        validation::Field,
    };

    use super::Draft;

    #[test]
    fn builds_root_draft() {
        let draft =
            Draft::new(&candidate(), Depth::Root, &positions()).unwrap();

        assert_eq!(draft.signed_at.to_string(), "2024-01-01");
        assert_eq!(draft.valid_to.map(|d| d.to_string()), Some("2024-12-31".into()));
        assert_eq!(
            draft.position.map(|p| p.title.to_string()),
            Some("Magazynier".into()),
        );
        assert_eq!(draft.earning_conditions.hourly_rate, Decimal::from(30));
    }

    #[test]
    fn drops_root_only_terms_of_amendments() {
        let draft =
            Draft::new(&candidate(), Depth::Amendment, &positions()).unwrap();

        assert!(draft.valid_to.is_none());
        assert!(draft.position.is_none());
    }

    #[test]
    fn leaves_unknown_position_unresolved() {
        let unknown = Candidate {
            position: Some("Astronauta".into()),
            ..candidate()
        };

        let draft =
            Draft::new(&unknown, Depth::Root, &position::Catalog::default())
                .unwrap();

        assert!(draft.position.is_none());
    }

    #[test]
    fn ignores_bonus_terms_when_disabled() {
        let disabled = Candidate {
            bonus_enabled: false,
            bonus: Some(Decimal::from(100)),
            bonus_threshold: Some(Decimal::from(50)),
            ..candidate()
        };

        let draft = Draft::new(&disabled, Depth::Root, &positions()).unwrap();

        assert_eq!(draft.earning_conditions.bonus, None);
        assert_eq!(draft.earning_conditions.bonus_threshold, None);
    }

    #[test]
    fn fails_with_field_errors() {
        let invalid = Candidate {
            hourly_rate: Some(Decimal::ZERO),
            ..candidate()
        };

        let errors = Draft::new(&invalid, Depth::Root, &positions()).unwrap_err();

        assert!(errors.has(Field::HourlyRate));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn prefills_candidate_from_contract() {
        let mut existing = contract(1, None);
        existing.position = Some(Position {
            id: None,
            title: "Kierowca".parse().unwrap(),
        });

        let candidate = Candidate::from(&existing);

        assert_eq!(candidate.valid_from, existing.valid_from.to_string());
        assert_eq!(candidate.position.as_deref(), Some("Kierowca"));
        assert_eq!(
            candidate.hourly_rate,
            Some(existing.earning_conditions.hourly_rate),
        );
    }
}
