//! Text rendering of [`Forest`]s.

use std::fmt::Write as _;

use service::{
    domain::{
        contract::{Depth, Forest},
        position, Contract,
    },
    validation::FieldErrors,
};

/// Renders the provided [`Forest`] as an indented tree, one [`Contract`] per
/// line.
#[must_use]
pub fn forest(forest: &Forest) -> String {
    if forest.is_empty() {
        return "no contracts\n".to_owned();
    }
    let mut out = String::new();
    for (depth, c) in forest.iter() {
        let indent = match depth {
            Depth::Root => "",
            Depth::Amendment => "  - ",
        };
        _ = writeln!(out, "{indent}{}", contract(c));
    }
    out
}

/// Renders the provided [`Contract`] as a single line.
#[must_use]
pub fn contract(c: &Contract) -> String {
    let mut line = format!("#{} {}", c.id, c.name);
    if let Some(kind) = c.kind {
        _ = write!(line, " ({kind})");
    }
    _ = write!(line, ", signed {}, valid {}..", c.signed_at, c.valid_from);
    if let Some(to) = c.valid_to {
        _ = write!(line, "{to}");
    }
    if let Some(p) = &c.position {
        _ = write!(line, ", {}", p.title);
    }
    let earnings = &c.earning_conditions;
    _ = write!(line, ", {}/h", earnings.hourly_rate);
    if earnings.bonus_enabled {
        _ = write!(line, ", bonus");
        if let Some(bonus) = earnings.bonus {
            _ = write!(line, " {bonus}");
        }
        if let Some(threshold) = earnings.bonus_threshold {
            _ = write!(line, " after {threshold} days");
        }
    }
    line
}

/// Renders the provided [`position::Catalog`], one title per line.
#[must_use]
pub fn positions(catalog: &position::Catalog) -> String {
    catalog.iter().fold(String::new(), |mut out, p| {
        _ = writeln!(out, "{}", p.title);
        out
    })
}

/// Renders the provided [`FieldErrors`], one field per line.
#[must_use]
pub fn field_errors(errors: &FieldErrors) -> String {
    errors.iter().fold(String::new(), |mut out, (field, msg)| {
        _ = writeln!(out, "{field}: {msg}");
        out
    })
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;
    use service::domain::contract::{
        Contract, EarningConditions, Forest, Kind, Level,
    };

    fn contract(id: i64, parent: Option<i64>) -> Contract {
        Contract {
            id: id.into(),
            level: Level::from_parent(parent.map(Into::into)),
            name: format!("Umowa {id}").parse().unwrap(),
            kind: None,
            signed_at: "2024-01-01".parse().unwrap(),
            valid_from: "2024-01-02".parse().unwrap(),
            valid_to: None,
            position: None,
            earning_conditions: EarningConditions {
                hourly_rate: Decimal::from(30),
                ..EarningConditions::default()
            },
        }
    }

    #[test]
    fn renders_tree() {
        let mut root = contract(1, None);
        root.kind = Some(Kind::Commission);
        root.valid_to = Some("2024-12-31".parse().unwrap());
        root.earning_conditions.bonus_enabled = true;
        root.earning_conditions.bonus = Some(Decimal::from(100));
        root.earning_conditions.bonus_threshold = Some(Decimal::from(5));
        let forest =
            Forest::from_contracts([root, contract(2, Some(1)), contract(3, None)]);

        assert_eq!(
            super::forest(&forest),
            "#1 Umowa 1 (Umowa zlecenie), signed 2024-01-01, \
             valid 2024-01-02..2024-12-31, 30/h, bonus 100 after 5 days\n\
             \x20 - #2 Umowa 2, signed 2024-01-01, valid 2024-01-02.., 30/h\n\
             #3 Umowa 3, signed 2024-01-01, valid 2024-01-02.., 30/h\n",
        );
    }

    #[test]
    fn renders_empty_forest() {
        assert_eq!(super::forest(&Forest::new()), "no contracts\n");
    }
}
