//! Column resolution, header normalization and purchase filtering.

use jpk_vat::core::*;
use rust_decimal_macros::dec;

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

const HEADERS: [&str; 7] = [
    "Type",
    "VAT Registration No.",
    "External Document No.",
    "Document Date",
    "Document Receipt/Sales Date",
    "VAT Base",
    "VAT Amount",
];

fn row(kind: &str, id: &str, base: CellValue, amount: CellValue) -> Row {
    vec![
        kind.into(),
        id.into(),
        "FV/1".into(),
        "01/03/2024".into(),
        "02/03/2024".into(),
        base,
        amount,
    ]
}

// ── Column resolution ───────────────────────────────────────────────────────

#[test]
fn exact_match_wins_over_substring() {
    let h = strings(&["Type", "Document Type", "VAT Amount"]);
    assert_eq!(find_column(&h, "Type").unwrap(), "Type");
}

#[test]
fn substring_match_when_no_exact() {
    let h = strings(&["VAT Registration Number", "External Doc"]);
    assert_eq!(find_column(&h, "VAT Registration").unwrap(), "VAT Registration Number");
}

#[test]
fn unresolvable_pattern_fails() {
    let h = strings(&["Col1", "Col2"]);
    assert!(matches!(
        find_column(&h, "Type"),
        Err(JpkError::ColumnNotFound { pattern }) if pattern == "Type"
    ));
}

#[test]
fn exact_match_ignores_case_and_padding() {
    let h = strings(&["Document Type", "  TYPE  "]);
    assert_eq!(find_column(&h, "type").unwrap(), "  TYPE  ");
}

#[test]
fn resolves_all_fields_from_typical_export() {
    let h = normalize_headers(&HEADERS);
    let cols = resolve_columns(&h).unwrap();
    assert_eq!(cols.type_.index, 0);
    assert_eq!(cols.get(LogicalField::VatRegistration).header, "VAT Registration No.");
    assert_eq!(cols.receipt_date.header, "Document Receipt/Sales Date");
    assert_eq!(cols.vat_base.index, 5);
    assert_eq!(cols.vat_amount.index, 6);
}

#[test]
fn header_order_decides_ambiguous_matches() {
    let h = strings(&["Posting Document Date", "Document Date Original"]);
    assert_eq!(find_column(&h, "Document Date").unwrap(), "Posting Document Date");
}

#[test]
fn normalized_headers_resolve() {
    let h = normalize_headers(&[" VAT Base,", " Document Date ", "Type"]);
    assert_eq!(h, ["VAT Base", "Document Date", "Type"]);
    assert_eq!(find_column(&h, "VAT Base").unwrap(), "VAT Base");
}

// ── Filtering and coercion ──────────────────────────────────────────────────

#[test]
fn keeps_purchase_rows_in_order() {
    let h = normalize_headers(&HEADERS);
    let cols = resolve_columns(&h).unwrap();
    let rows = vec![
        row("Purchase ", "A", 10.0.into(), 2.3.into()),
        row("Sale", "B", 10.0.into(), 2.3.into()),
        row(" PURCHASE", "C", "bad".into(), CellValue::Empty),
        row("purchases", "D", 1.0.into(), 1.0.into()),
        row("purchase", "E", CellValue::Int(5), "1.15".into()),
    ];

    let records = filter_purchases(&rows, &cols);
    let ids: Vec<String> = records.iter().map(|r| r.vat_registration.to_string()).collect();
    assert_eq!(ids, ["A", "C", "E"]);
    assert_eq!(records.iter().map(|r| r.source_row).collect::<Vec<_>>(), [2, 4, 6]);

    assert_eq!(records[0].net, dec!(10));
    assert_eq!(records[1].net, dec!(0));
    assert_eq!(records[1].vat, dec!(0));
    assert_eq!(records[2].net, dec!(5));
    assert_eq!(records[2].vat, dec!(1.15));
}

#[test]
fn non_amount_columns_are_untouched() {
    let h = normalize_headers(&HEADERS);
    let cols = resolve_columns(&h).unwrap();
    let rows = vec![row("Purchase", "0012345678", "x".into(), "y".into())];
    let records = filter_purchases(&rows, &cols);
    assert_eq!(records[0].vat_registration, CellValue::Text("0012345678".into()));
    assert_eq!(records[0].external_document, CellValue::Text("FV/1".into()));
    assert_eq!(records[0].document_date, CellValue::Text("01/03/2024".into()));
}

#[test]
fn short_rows_read_as_empty() {
    let h = normalize_headers(&HEADERS);
    let cols = resolve_columns(&h).unwrap();
    let rows = vec![vec![CellValue::from("Purchase"), CellValue::from("PL1")]];
    let records = filter_purchases(&rows, &cols);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].document_date, CellValue::Empty);
    assert_eq!(records[0].vat, dec!(0));
}

#[test]
fn no_purchases_yields_empty_set() {
    let h = normalize_headers(&HEADERS);
    let cols = resolve_columns(&h).unwrap();
    let rows = vec![row("Sale", "A", 1.0.into(), 1.0.into())];
    assert!(filter_purchases(&rows, &cols).is_empty());
}

// ── Filename sanitizing ─────────────────────────────────────────────────────

#[test]
fn sanitizes_sheet_names() {
    assert_eq!(sanitize_filename("Test/Doc:2024|Name.xlsx"), "Test_Doc_2024_Name.xlsx");
    assert_eq!(sanitize_filename("Zakupy 2024.03"), "Zakupy 2024.03");
}
