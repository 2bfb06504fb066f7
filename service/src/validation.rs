//! Field validation of [`Candidate`] [`Contract`]s.
//!
//! [`Contract`]: crate::domain::Contract

use std::{collections::BTreeMap, fmt};

use rust_decimal::Decimal;

use crate::domain::contract::{
    Candidate, Depth, EndDate, SigningDate, StartDate,
};

/// Message of an unparseable date.
pub const INVALID_DATE: &str = "Niepoprawna data";

/// Message of a signing date being after the start date.
pub const SIGNED_AFTER_START: &str =
    "Data zawarcia nie może być po dacie rozpoczęcia";

/// Message of an end date being before the start date.
pub const ENDS_BEFORE_START: &str =
    "Data zakończenia nie może być przed datą rozpoczęcia";

/// Message of a missing end date of a fixed-term contract.
pub const END_REQUIRED: &str = "Data do jest wymagana dla Umowy Zlecenie";

/// Message of a missing position of a fixed-term contract.
pub const POSITION_REQUIRED: &str =
    "Stanowisko jest wymagane dla Umowy Zlecenie";

/// Message of a missing or non-positive hourly rate.
pub const HOURLY_RATE_NOT_POSITIVE: &str =
    "Stawka godzinowa musi być większa niż 0";

/// Message of a missing or non-positive bonus.
pub const BONUS_NOT_POSITIVE: &str = "Premia musi być większa niż 0";

/// Message of a missing or non-positive bonus threshold.
pub const BONUS_THRESHOLD_NOT_POSITIVE: &str =
    "Próg premii musi być większy niż 0";

/// Message of a bonus threshold exceeding [`MAX_BONUS_THRESHOLD`].
pub const BONUS_THRESHOLD_TOO_HIGH: &str =
    "Próg premii nie może przekraczać 10";

/// Maximum allowed bonus threshold (inclusive).
pub const MAX_BONUS_THRESHOLD: Decimal = Decimal::TEN;

/// Validated field of a [`Candidate`].
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    strum::AsRefStr,
    strum::Display,
)]
#[strum(serialize_all = "camelCase")]
pub enum Field {
    /// [`Candidate::signed_at`].
    SignedAt,

    /// [`Candidate::valid_from`].
    ValidFrom,

    /// [`Candidate::valid_to`].
    ValidTo,

    /// [`Candidate::position`].
    Position,

    /// [`Candidate::hourly_rate`].
    HourlyRate,

    /// [`Candidate::bonus`].
    Bonus,

    /// [`Candidate::bonus_threshold`].
    BonusThreshold,
}

/// Mapping of invalid [`Field`]s to their error messages.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    /// Creates new [`FieldErrors`] with a single error.
    #[must_use]
    pub fn single(field: Field, message: &'static str) -> Self {
        Self(BTreeMap::from([(field, message)]))
    }

    /// Returns the error message of the provided [`Field`].
    ///
    /// An empty string means that the [`Field`] is valid.
    #[must_use]
    pub fn message(&self, field: Field) -> &'static str {
        self.0.get(&field).copied().unwrap_or_default()
    }

    /// Indicates whether the provided [`Field`] is invalid.
    #[must_use]
    pub fn has(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Indicates whether there are no errors at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of invalid [`Field`]s.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns an iterator over the invalid [`Field`]s and their messages.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(f, m)| (*f, *m))
    }

    /// Records an error of the provided [`Field`].
    fn insert(&mut self, field: Field, message: &'static str) {
        _ = self.0.insert(field, message);
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Validates the provided [`Candidate`] placed at the provided [`Depth`].
///
/// Every [`Field`] is checked independently of the others. End date and
/// position are root-only, so they are not checked for amendments.
#[must_use]
pub fn validate(candidate: &Candidate, depth: Depth) -> FieldErrors {
    use Field as F;

    let mut errors = FieldErrors::default();

    let valid_from = StartDate::parse(&candidate.valid_from).ok();
    if valid_from.is_none() {
        errors.insert(F::ValidFrom, INVALID_DATE);
    }

    match (SigningDate::parse(&candidate.signed_at).ok(), valid_from) {
        (None, _) => errors.insert(F::SignedAt, SIGNED_AFTER_START),
        (Some(signed), Some(from))
            if signed.coerce::<()>() > from.coerce() =>
        {
            errors.insert(F::SignedAt, SIGNED_AFTER_START);
        }
        (Some(_), _) => {}
    }

    if depth == Depth::Root {
        let fixed_term = candidate.kind.is_some_and(|k| k.is_fixed_term());

        match non_blank(candidate.valid_to.as_deref()) {
            Some(raw) => match EndDate::parse(raw) {
                Ok(to) => {
                    let to = to.coerce::<()>();
                    if valid_from.is_some_and(|from| to < from.coerce()) {
                        errors.insert(F::ValidTo, ENDS_BEFORE_START);
                    }
                }
                Err(_) => errors.insert(F::ValidTo, INVALID_DATE),
            },
            None if fixed_term => errors.insert(F::ValidTo, END_REQUIRED),
            None => {}
        }

        if fixed_term && non_blank(candidate.position.as_deref()).is_none() {
            errors.insert(F::Position, POSITION_REQUIRED);
        }
    }

    if !is_positive(candidate.hourly_rate) {
        errors.insert(F::HourlyRate, HOURLY_RATE_NOT_POSITIVE);
    }

    if candidate.bonus_enabled {
        if !is_positive(candidate.bonus) {
            errors.insert(F::Bonus, BONUS_NOT_POSITIVE);
        }

        match candidate.bonus_threshold {
            Some(t) if t > MAX_BONUS_THRESHOLD => {
                errors.insert(F::BonusThreshold, BONUS_THRESHOLD_TOO_HIGH);
            }
            t if is_positive(t) => {}
            _ => {
                errors.insert(F::BonusThreshold, BONUS_THRESHOLD_NOT_POSITIVE);
            }
        }
    }

    errors
}

/// Returns the provided string unless it's absent or blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Indicates whether the provided number is present and greater than zero.
fn is_positive(value: Option<Decimal>) -> bool {
    value.is_some_and(|v| v > Decimal::ZERO)
}
