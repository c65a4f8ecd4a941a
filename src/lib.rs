//! # mydata-fixtures
//!
//! Repair tools for Greek myDATA invoice test fixtures.
//!
//! Two fixers work on an editable XML tree that keeps the source layout:
//!
//! - [`fix::AfmNormalizer`] rewrites the `vatNumber` of Greek `issuer` and
//!   `counterpart` parties to known valid test AFMs and adds an E3 income
//!   classification to retail (`3.1`) invoices that lack one.
//! - [`fix::SummaryFiller`] inserts `totalWithheldAmount`, `totalFeesAmount`,
//!   `totalStampDutyAmount` and `totalDeductionsAmount` (default `0.00`) into
//!   every `invoiceSummary`, after `totalVatAmount`.
//!
//! [`batch`] runs a fixer over every `*.xml` file of a directory.
//!
//! ## Quick Start
//!
//! ```rust
//! use mydata_fixtures::fix::{Fixer, SummaryFiller};
//! use mydata_fixtures::xml::Document;
//!
//! let mut doc = Document::parse(
//!     "<invoice><invoiceSummary><totalVatAmount>24.00</totalVatAmount></invoiceSummary></invoice>",
//! )
//! .unwrap();
//! let changes = SummaryFiller.fix(&mut doc);
//!
//! assert_eq!(changes.len(), 4);
//! let summary = doc.root.find("invoiceSummary").unwrap();
//! assert_eq!(summary.child_text("totalFeesAmount").as_deref(), Some("0.00"));
//! ```
//!
//! ## Binaries
//!
//! | Binary | Description |
//! |--------|-------------|
//! | `fix-afm-numbers` | AFM normalization, writes only changed files |
//! | `fix-summary-fields` | Summary defaults, rewrites every parsed file |
//!
//! Both need the `cli` feature (on by default).

pub mod batch;
#[cfg(feature = "cli")]
pub mod cli;
pub mod core;
pub mod fix;
pub mod xml;

pub use crate::core::*;
