//! AFM normalization for Greek parties and E3 classification for retail invoices.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{debug, warn};

use super::{Change, Fixer, Party, WritePolicy, apply_in_reverse};
use crate::core::afm::{GREECE, VALID_COUNTERPART_AFM, VALID_ISSUER_AFM, is_valid_afm};
use crate::xml::{Document, Element, Node, NodePath};

/// `invoiceType` of a retail sales receipt.
pub const RETAIL_INVOICE_TYPE: &str = "3.1";

/// E3 classification type added to retail invoices.
pub const E3_RETAIL_TYPE: &str = "E3_561_001";

/// Income classification category for retail sales.
pub const E3_RETAIL_CATEGORY: &str = "category1_3";

/// Rewrites the `vatNumber` of every Greek `issuer`/`counterpart` to a known
/// valid test AFM and gives retail invoices an E3 classification.
///
/// Files are only written when something changed.
#[derive(Debug, Clone, Copy, Default)]
pub struct AfmNormalizer;

impl Fixer for AfmNormalizer {
    fn name(&self) -> &'static str {
        "afm-normalizer"
    }

    fn write_policy(&self) -> WritePolicy {
        WritePolicy::OnChange
    }

    fn fix(&self, doc: &mut Document) -> Vec<Change> {
        let mut changes = Vec::new();
        normalize_parties(&mut doc.root, Party::Issuer, VALID_ISSUER_AFM, &mut changes);
        normalize_parties(
            &mut doc.root,
            Party::Counterpart,
            VALID_COUNTERPART_AFM,
            &mut changes,
        );
        add_retail_classifications(&mut doc.root, &mut changes);
        changes
    }
}

fn normalize_parties(
    root: &mut Element,
    party: Party,
    canonical: &'static str,
    changes: &mut Vec<Change>,
) {
    let paths = root.descendant_paths(party.element());
    changes.extend(apply_in_reverse(root, &paths, |el| {
        normalize_party(el, party, canonical)
    }));
}

fn normalize_party(el: &mut Element, party: Party, canonical: &'static str) -> Option<Change> {
    if el.find("country")?.text().as_deref() != Some(GREECE) {
        return None;
    }
    let vat = el.find_mut("vatNumber")?;
    let old = vat.text();
    if old.as_deref() == Some(canonical) {
        return None;
    }

    debug!(
        %party,
        old = old.as_deref().unwrap_or_default(),
        old_valid = old.as_deref().is_some_and(is_valid_afm),
        "replacing AFM"
    );
    vat.set_text(canonical);
    Some(Change::Afm {
        party,
        old,
        new: canonical,
    })
}

fn add_retail_classifications(root: &mut Element, changes: &mut Vec<Change>) {
    let mut targets: Vec<NodePath> = root
        .descendant_paths("invoiceHeader")
        .into_iter()
        .filter(|path| {
            root.get(path)
                .and_then(|header| header.child_text("invoiceType"))
                .as_deref()
                == Some(RETAIL_INVOICE_TYPE)
        })
        .filter_map(|path| summary_for_header(root, &path))
        .collect();
    // Several headers can share a summary; it is classified once.
    targets.sort();
    targets.dedup();

    changes.extend(apply_in_reverse(root, &targets, classify_summary));
}

fn classify_summary(summary: &mut Element) -> Option<Change> {
    if summary.find("incomeClassification").is_some() {
        return None;
    }
    let amount = summary.find("totalNetValue")?.text();
    if let Some(a) = &amount {
        if Decimal::from_str(a.trim()).is_err() {
            warn!(amount = %a, "totalNetValue is not a decimal; copying it as is");
        }
    }

    summary.append(retail_classification(summary, amount.as_deref()));
    debug!(amount = amount.as_deref().unwrap_or_default(), "added E3 classification");
    Some(Change::RetailClassification { amount })
}

/// The header's sibling `invoiceSummary`, falling back to the first summary
/// in the document when the header's parent has none.
fn summary_for_header(root: &Element, header: &[usize]) -> Option<NodePath> {
    let (_, parent_path) = header.split_last()?;
    let parent = root.get(parent_path)?;
    match parent.position("invoiceSummary") {
        Some(i) => {
            let mut path = parent_path.to_vec();
            path.push(i);
            Some(path)
        }
        None => root.descendant_paths("invoiceSummary").into_iter().next(),
    }
}

fn retail_classification(summary: &Element, amount: Option<&str>) -> Element {
    let mut block = summary.new_child("incomeClassification");
    let children = [
        Element::with_text(block.qualify("classificationType"), E3_RETAIL_TYPE),
        Element::with_text(block.qualify("classificationCategory"), E3_RETAIL_CATEGORY),
        match amount {
            Some(a) => Element::with_text(block.qualify("amount"), a),
            None => block.new_child("amount"),
        },
    ];
    block.children.extend(children.map(Node::Element));
    block
}
