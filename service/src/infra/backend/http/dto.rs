//! Wire representation of [`domain`] entities.

use std::mem;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing as log;

use crate::{
    domain::{
        self,
        contract::{self, EarningConditions, Level, Name},
        employee, position,
    },
    infra::backend::Rejection,
};

use super::Error;

/// Envelope every successful response payload is wrapped into.
#[derive(Debug, Deserialize)]
pub(super) struct Envelope<T> {
    /// Payload of the response.
    pub(super) data: T,
}

/// Body of a failed response.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    /// Human-readable reason of the failure.
    #[serde(default)]
    message: Option<String>,

    /// Server-side trace of the failure.
    #[serde(default)]
    trace: Option<String>,
}

/// Builds a [`Rejection`] out of a failed response `status` and `body`.
pub(super) fn rejection(status: u16, body: &str) -> Rejection {
    let parsed = serde_json::from_str::<ErrorBody>(body).unwrap_or_default();
    if parsed
        .trace
        .as_deref()
        .is_some_and(|t| t.contains("TokenExpiredException"))
    {
        return Rejection::session_expired();
    }
    let message = parsed
        .message
        .filter(|m| !m.trim().is_empty())
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_owned()))
        .unwrap_or_else(|| "Request failed".to_owned());
    Rejection::new(Some(status), message)
}

/// Wire [`domain::Contract`].
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Contract {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<contract::Id>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_contract_id: Option<contract::Id>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    employee_id: Option<employee::Id>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    type_of_contract: Option<String>,

    #[serde(default)]
    signed_at: Option<contract::SigningDate>,

    #[serde(default)]
    valid_from: Option<contract::StartDate>,

    #[serde(default)]
    valid_to: Option<contract::EndDate>,

    #[serde(default)]
    position_dto: Option<Position>,

    #[serde(default)]
    earning_conditions_dto: Earnings,

    #[serde(default, skip_serializing)]
    sub_rows: Vec<Contract>,
}

impl Contract {
    /// Creates a new wire [`Contract`] to be created.
    pub(super) fn from_new(new: contract::New) -> Self {
        let contract::New {
            employee_id,
            parent_id,
            name,
            draft,
        } = new;
        Self {
            employee_id: Some(employee_id),
            name: name.map(|n| n.to_string()),
            ..Self::from_draft(None, parent_id, draft)
        }
    }

    /// Creates a new wire [`Contract`] to be updated.
    ///
    /// The name is never sent, so the stored one stays intact.
    pub(super) fn from_revision(revision: contract::Revision) -> Self {
        let contract::Revision { id, level, draft } = revision;
        Self::from_draft(Some(id), level.parent_id(), draft)
    }

    fn from_draft(
        id: Option<contract::Id>,
        parent_contract_id: Option<contract::Id>,
        draft: contract::Draft,
    ) -> Self {
        Self {
            id,
            parent_contract_id,
            employee_id: None,
            name: None,
            type_of_contract: draft.kind.map(|k| k.as_str().to_owned()),
            signed_at: Some(draft.signed_at),
            valid_from: Some(draft.valid_from),
            valid_to: draft.valid_to,
            position_dto: draft.position.map(|p| Position {
                pid: p.id,
                title: p.title.to_string(),
            }),
            earning_conditions_dto: draft.earning_conditions.into(),
            sub_rows: Vec::new(),
        }
    }

    /// Converts this wire [`Contract`] into a [`domain::Contract`],
    /// attaching it to the `fallback_parent` if it doesn't tell its own.
    ///
    /// Nested sub-rows are discarded.
    pub(super) fn into_domain(
        self,
        fallback_parent: Option<contract::Id>,
    ) -> Result<domain::Contract, Error> {
        let id = self.id.ok_or(Error::IncompleteContract("id"))?;
        let signed_at =
            self.signed_at.ok_or(Error::IncompleteContract("signedAt"))?;
        let valid_from =
            self.valid_from.ok_or(Error::IncompleteContract("validFrom"))?;
        let name = self
            .name
            .and_then(Name::new)
            .unwrap_or_else(|| Name::placeholder(id));
        let kind = self.type_of_contract.and_then(|k| {
            k.parse()
                .inspect_err(|_| {
                    log::debug!("unknown kind `{k}` of `Contract(id: {id})`");
                })
                .ok()
        });
        Ok(domain::Contract {
            id,
            level: Level::from_parent(
                self.parent_contract_id.or(fallback_parent),
            ),
            name,
            kind,
            signed_at,
            valid_from,
            valid_to: self.valid_to,
            position: self.position_dto.and_then(Position::into_domain),
            earning_conditions: self.earning_conditions_dto.into(),
        })
    }
}

/// Flattens the provided nested wire [`Contract`]s into [`domain::Contract`]s.
///
/// Nested rows not telling their parent are attached to the row they're
/// nested into. Incomplete rows are skipped, while their nested rows are kept.
pub(super) fn flatten(rows: Vec<Contract>) -> Vec<domain::Contract> {
    let mut flat = Vec::with_capacity(rows.len());
    let mut pending = rows
        .into_iter()
        .rev()
        .map(|row| (None, row))
        .collect::<Vec<_>>();
    while let Some((parent, mut row)) = pending.pop() {
        let children = mem::take(&mut row.sub_rows);
        let id = row.id;
        match row.into_domain(parent) {
            Ok(contract) => flat.push(contract),
            Err(e) => log::warn!("skipping `Contract` row: {e}"),
        }
        pending.extend(children.into_iter().rev().map(|c| (id, c)));
    }
    flat
}

/// Wire [`EarningConditions`].
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct Earnings {
    #[serde(default)]
    hourly_rate: Option<Decimal>,

    #[serde(default)]
    bonus_enabled: Option<bool>,

    #[serde(default)]
    bonus: Option<Decimal>,

    #[serde(default)]
    bonus_threshold: Option<Decimal>,
}

impl From<EarningConditions> for Earnings {
    fn from(e: EarningConditions) -> Self {
        Self {
            hourly_rate: Some(e.hourly_rate),
            bonus_enabled: Some(e.bonus_enabled),
            bonus: e.bonus,
            bonus_threshold: e.bonus_threshold,
        }
    }
}

impl From<Earnings> for EarningConditions {
    fn from(e: Earnings) -> Self {
        Self {
            hourly_rate: e.hourly_rate.unwrap_or_default(),
            bonus_enabled: e.bonus_enabled.unwrap_or_default(),
            bonus: e.bonus,
            bonus_threshold: e.bonus_threshold,
        }
    }
}

/// Wire [`position::Position`].
#[derive(Debug, Deserialize, Serialize)]
pub(super) struct Position {
    #[serde(default)]
    pid: Option<position::Id>,

    #[serde(default)]
    title: String,
}

impl Position {
    /// Converts this wire [`Position`] into a [`position::Position`], if it
    /// has a valid title.
    pub(super) fn into_domain(self) -> Option<position::Position> {
        Some(position::Position {
            id: self.pid,
            title: position::Title::new(self.title)?,
        })
    }
}
