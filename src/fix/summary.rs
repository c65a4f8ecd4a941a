//! Default monetary fields for `invoiceSummary`.

use tracing::debug;

use super::{Change, Fixer, WritePolicy, apply_in_reverse};
use crate::xml::{Document, Element};

/// Fields every `invoiceSummary` must carry, in schema order.
pub const SUMMARY_DEFAULT_FIELDS: [&str; 4] = [
    "totalWithheldAmount",
    "totalFeesAmount",
    "totalStampDutyAmount",
    "totalDeductionsAmount",
];

/// Text of every inserted field.
pub const DEFAULT_AMOUNT: &str = "0.00";

const TOTAL_VAT_AMOUNT: &str = "totalVatAmount";

/// Inserts missing [`SUMMARY_DEFAULT_FIELDS`] with a zero amount after
/// `totalVatAmount`.
///
/// Every successfully parsed file is written back, changed or not.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryFiller;

impl Fixer for SummaryFiller {
    fn name(&self) -> &'static str {
        "summary-filler"
    }

    fn write_policy(&self) -> WritePolicy {
        WritePolicy::Always
    }

    fn fix(&self, doc: &mut Document) -> Vec<Change> {
        let paths = doc.root.descendant_paths("invoiceSummary");
        apply_in_reverse(&mut doc.root, &paths, fill_summary)
    }
}

fn fill_summary(summary: &mut Element) -> Vec<Change> {
    // Without totalVatAmount there is no anchor and the summary is left as is.
    let Some(vat) = summary.position(TOTAL_VAT_AMOUNT) else {
        return Vec::new();
    };
    let missing: Vec<&'static str> = SUMMARY_DEFAULT_FIELDS
        .into_iter()
        .filter(|field| summary.find(field).is_none())
        .collect();

    // Each field goes directly after totalVatAmount; inserting the last one
    // first leaves the new block in schema order.
    for &field in missing.iter().rev() {
        let el = Element::with_text(summary.qualify(field), DEFAULT_AMOUNT);
        summary.insert_after(vat, el);
        debug!(field = %field, "added summary field");
    }

    missing
        .into_iter()
        .map(|field| Change::SummaryField {
            field,
            value: DEFAULT_AMOUNT.to_string(),
        })
        .collect()
}
