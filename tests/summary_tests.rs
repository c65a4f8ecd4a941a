//! Summary field defaults over fixture files on disk.

use std::fs;

use mydata_fixtures::batch::{self, BatchOptions, Outcome};
use mydata_fixtures::fix::{SUMMARY_DEFAULT_FIELDS, SummaryFiller};
use mydata_fixtures::xml::Document;

const SUMMARY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<InvoicesDoc xmlns="http://www.aade.gr/myDATA/invoice/v1.0">
  <invoice>
    <invoiceSummary>
      <totalNetValue>100.00</totalNetValue>
      <totalVatAmount>24.00</totalVatAmount>
      <totalGrossValue>124.00</totalGrossValue>
    </invoiceSummary>
  </invoice>
</InvoicesDoc>
"#;

fn fixture_dir(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, content) in files {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

#[test]
fn inserts_missing_fields_after_vat_amount() {
    let dir = fixture_dir(&[("invoice.xml", SUMMARY)]);
    let report = batch::run(dir.path(), &SummaryFiller, BatchOptions::default()).unwrap();
    assert_eq!(report.rewritten, 1);
    assert_eq!(report.files[0].changes.len(), 4);

    let written = fs::read_to_string(dir.path().join("invoice.xml")).unwrap();
    insta::assert_snapshot!(written, @r#"
<?xml version="1.0" encoding="UTF-8"?>
<InvoicesDoc xmlns="http://www.aade.gr/myDATA/invoice/v1.0">
  <invoice>
    <invoiceSummary>
      <totalNetValue>100.00</totalNetValue>
      <totalVatAmount>24.00</totalVatAmount>
      <totalWithheldAmount>0.00</totalWithheldAmount>
      <totalFeesAmount>0.00</totalFeesAmount>
      <totalStampDutyAmount>0.00</totalStampDutyAmount>
      <totalDeductionsAmount>0.00</totalDeductionsAmount>
      <totalGrossValue>124.00</totalGrossValue>
    </invoiceSummary>
  </invoice>
</InvoicesDoc>
"#);
}

#[test]
fn complete_file_is_still_rewritten() {
    let src = "<InvoicesDoc><invoice><invoiceSummary>\
               <totalVatAmount>1.00</totalVatAmount>\
               <totalWithheldAmount>0.50</totalWithheldAmount>\
               <totalFeesAmount>0.00</totalFeesAmount>\
               <totalStampDutyAmount>0.00</totalStampDutyAmount>\
               <totalDeductionsAmount>0.00</totalDeductionsAmount>\
               </invoiceSummary></invoice></InvoicesDoc>";
    let dir = fixture_dir(&[("complete.xml", src)]);
    let report = batch::run(dir.path(), &SummaryFiller, BatchOptions::default()).unwrap();

    assert_eq!(report.files[0].outcome, Outcome::Rewritten);
    assert!(report.files[0].changes.is_empty());
    let written = fs::read_to_string(dir.path().join("complete.xml")).unwrap();
    assert_eq!(
        written,
        format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{src}\n")
    );
}

#[test]
fn existing_values_are_not_overwritten() {
    let src = "<InvoicesDoc><invoice><invoiceSummary>\
               <totalVatAmount>1.00</totalVatAmount>\
               <totalStampDutyAmount>2.40</totalStampDutyAmount>\
               </invoiceSummary></invoice></InvoicesDoc>";
    let dir = fixture_dir(&[("partial.xml", src)]);
    batch::run(dir.path(), &SummaryFiller, BatchOptions::default()).unwrap();

    let doc = Document::from_bytes(&fs::read(dir.path().join("partial.xml")).unwrap()).unwrap();
    let summary = doc.root.find("invoice").unwrap().find("invoiceSummary").unwrap();
    assert_eq!(summary.child_text("totalStampDutyAmount").as_deref(), Some("2.40"));
    for field in SUMMARY_DEFAULT_FIELDS {
        assert_eq!(summary.find_all(field).count(), 1, "{field}");
    }
    let names: Vec<_> = summary.elements().map(|e| e.local_name()).collect();
    assert_eq!(
        names,
        [
            "totalVatAmount",
            "totalWithheldAmount",
            "totalFeesAmount",
            "totalDeductionsAmount",
            "totalStampDutyAmount",
        ]
    );
}

#[test]
fn defaults_are_placed_before_unrelated_siblings() {
    let src = "<InvoicesDoc><invoice><invoiceSummary>\
               <totalVatAmount>1.00</totalVatAmount>\
               <totalGrossValue>1.00</totalGrossValue>\
               <totalFeesAmount>3.00</totalFeesAmount>\
               </invoiceSummary></invoice></InvoicesDoc>";
    let dir = fixture_dir(&[("late.xml", src)]);
    batch::run(dir.path(), &SummaryFiller, BatchOptions::default()).unwrap();

    let doc = Document::from_bytes(&fs::read(dir.path().join("late.xml")).unwrap()).unwrap();
    let summary = doc.root.find("invoice").unwrap().find("invoiceSummary").unwrap();
    let vat = summary.position("totalVatAmount").unwrap();
    let gross = summary.position("totalGrossValue").unwrap();
    for field in ["totalWithheldAmount", "totalStampDutyAmount", "totalDeductionsAmount"] {
        let at = summary.position(field).unwrap();
        assert!(vat < at && at < gross, "{field} at {at}, vat {vat}, gross {gross}");
    }
    assert_eq!(summary.child_text("totalFeesAmount").as_deref(), Some("3.00"));
}

#[test]
fn malformed_and_valid_files_in_one_batch() {
    let broken = "<InvoicesDoc><invoiceSummary></InvoicesDoc>";
    let dir = fixture_dir(&[("1.xml", SUMMARY), ("2.xml", broken), ("3.xml", SUMMARY)]);
    let report = batch::run(dir.path(), &SummaryFiller, BatchOptions::default()).unwrap();

    let files: Vec<_> = report.files.iter().map(|f| f.file.as_str()).collect();
    assert_eq!(files, ["1.xml", "2.xml", "3.xml"]);
    assert_eq!(report.rewritten, 2);
    assert_eq!(report.failed, 1);
    assert!(matches!(report.files[1].outcome, Outcome::ParseError { .. }));
    assert_eq!(fs::read_to_string(dir.path().join("2.xml")).unwrap(), broken);
}

#[test]
fn dry_run_leaves_files_untouched() {
    let dir = fixture_dir(&[("invoice.xml", SUMMARY)]);
    let report = batch::run(dir.path(), &SummaryFiller, BatchOptions { dry_run: true }).unwrap();
    assert_eq!(report.files[0].changes.len(), 4);
    assert_eq!(fs::read_to_string(dir.path().join("invoice.xml")).unwrap(), SUMMARY);
}
