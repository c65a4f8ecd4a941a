//! The two fixture repairs and the [`Fixer`] seam the batch driver runs them through.

mod afm;
mod summary;

pub use afm::{AfmNormalizer, E3_RETAIL_CATEGORY, E3_RETAIL_TYPE, RETAIL_INVOICE_TYPE};
pub use summary::{DEFAULT_AMOUNT, SUMMARY_DEFAULT_FIELDS, SummaryFiller};

use serde::Serialize;
use std::fmt;

use crate::xml::{Document, Element, NodePath};

/// When a processed file is written back to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WritePolicy {
    /// Only if the fixer reported at least one change.
    OnChange,
    /// After every successful parse, changed or not.
    Always,
}

/// A repair applied to an in-memory document.
pub trait Fixer {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn write_policy(&self) -> WritePolicy;

    /// Apply the repair, returning the changes in document order.
    fn fix(&self, doc: &mut Document) -> Vec<Change>;
}

/// Party role that carries a `vatNumber`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    Issuer,
    Counterpart,
}

impl Party {
    pub fn element(self) -> &'static str {
        match self {
            Party::Issuer => "issuer",
            Party::Counterpart => "counterpart",
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element())
    }
}

/// One applied change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Change {
    /// A Greek party's `vatNumber` was replaced.
    Afm {
        party: Party,
        old: Option<String>,
        new: &'static str,
    },
    /// An E3 `incomeClassification` was added to a retail invoice summary.
    RetailClassification { amount: Option<String> },
    /// A missing `invoiceSummary` field was inserted with its default.
    SummaryField { field: &'static str, value: String },
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Afm { party, old, new } => write!(
                f,
                "Fixed {party} AFM: {} → {new}",
                old.as_deref().unwrap_or("(empty)")
            ),
            Change::RetailClassification { .. } => {
                f.write_str("Added E3 classification for retail invoice")
            }
            Change::SummaryField { field, .. } => write!(f, "Added {field}"),
        }
    }
}

/// Run `f` on the element at each path, last path first, so that edits never
/// shift a path still to be visited. Changes come back in document order.
fn apply_in_reverse<F, I>(root: &mut Element, paths: &[NodePath], mut f: F) -> Vec<Change>
where
    F: FnMut(&mut Element) -> I,
    I: IntoIterator<Item = Change>,
{
    let mut per_path: Vec<Vec<Change>> = paths
        .iter()
        .rev()
        .map(|path| {
            root.get_mut(path)
                .map(&mut f)
                .into_iter()
                .flatten()
                .collect()
        })
        .collect();
    per_path.reverse();
    per_path.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_display() {
        let c = Change::Afm {
            party: Party::Issuer,
            old: Some("123456789".into()),
            new: "090000045",
        };
        assert_eq!(c.to_string(), "Fixed issuer AFM: 123456789 → 090000045");

        let c = Change::Afm {
            party: Party::Counterpart,
            old: None,
            new: "094014201",
        };
        assert_eq!(c.to_string(), "Fixed counterpart AFM: (empty) → 094014201");

        let c = Change::SummaryField {
            field: "totalFeesAmount",
            value: "0.00".into(),
        };
        assert_eq!(c.to_string(), "Added totalFeesAmount");
    }
}
