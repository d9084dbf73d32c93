//! JPK_V7M document assembly.

use std::io::Write;
use std::path::Path;

use chrono::{Datelike, Local, NaiveDateTime};
use rust_decimal::Decimal;

use super::config::JpkConfig;
use super::xml_utils::{XmlResult, XmlWriter, format_amount};
use super::{DECLARATION_FORM, DECLARATION_SYSTEM_CODE, ETD_NS, FORM_CODE, FORM_SYSTEM_CODE, JPK_NS};
use super::{DECLARATION_VARIANT, FORM_VARIANT, SCHEMA_VERSION};
use crate::core::{CellValue, JpkError, LogicalField, PurchaseRecord, parse_day_first};

/// Per-run values that are not configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentContext {
    /// `DataWytworzeniaJPK`; also supplies `Rok` and `Miesiac`.
    pub generated_at: NaiveDateTime,
}

impl DocumentContext {
    /// Context stamped with the local clock.
    pub fn now() -> Self {
        Self {
            generated_at: Local::now().naive_local(),
        }
    }
}

/// A purchase row with every field already rendered as element text.
struct PurchaseLine {
    row: usize,
    nr_dostawcy: String,
    dowod_zakupu: String,
    data_zakupu: String,
    data_wplywu: String,
    net: Decimal,
    vat: Decimal,
}

/// Generate a JPK_V7M document for the given purchase records.
///
/// All rows are rendered and totalled before any XML is written, so a bad
/// date, an empty identity cell or an overflowing tax total fails the whole
/// document.
pub fn to_jpk_xml(
    records: &[PurchaseRecord],
    config: &JpkConfig,
    context: &DocumentContext,
) -> XmlResult {
    let lines = records
        .iter()
        .map(render_line)
        .collect::<Result<Vec<_>, _>>()?;
    let vat_total = vat_total(&lines)?;

    let mut w = XmlWriter::new()?;
    w.start_element_with_attrs("JPK", &[("xmlns", JPK_NS), ("xmlns:etd", ETD_NS)])?;

    write_header(&mut w, config, context)?;
    write_taxpayer(&mut w, config)?;
    write_declaration(&mut w)?;
    write_register(&mut w, &lines, vat_total)?;

    w.end_element("JPK")?;
    w.into_string()
}

/// Write a rendered document to `path` atomically.
///
/// The content goes to a temporary file in the target directory which is then
/// renamed over `path`; on failure nothing is left at `path`.
pub fn write_jpk_file(path: &Path, xml: &str) -> Result<(), JpkError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| JpkError::io(dir, e))?;
    tmp.write_all(xml.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| JpkError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| JpkError::io(path, e.error))?;
    Ok(())
}

fn render_line(record: &PurchaseRecord) -> Result<PurchaseLine, JpkError> {
    let row = record.source_row;
    Ok(PurchaseLine {
        row,
        nr_dostawcy: identity_text(&record.vat_registration, LogicalField::VatRegistration, row)?,
        dowod_zakupu: identity_text(&record.external_document, LogicalField::ExternalDocument, row)?,
        data_zakupu: date_text(&record.document_date, LogicalField::DocumentDate, row)?,
        data_wplywu: date_text(&record.receipt_date, LogicalField::ReceiptDate, row)?,
        net: record.net,
        vat: record.vat,
    })
}

fn vat_total(lines: &[PurchaseLine]) -> Result<Decimal, JpkError> {
    lines.iter().try_fold(Decimal::ZERO, |total, line| {
        total
            .checked_add(line.vat)
            .ok_or(JpkError::AmountOverflow { row: line.row })
    })
}

fn identity_text(cell: &CellValue, field: LogicalField, row: usize) -> Result<String, JpkError> {
    match cell {
        CellValue::Empty | CellValue::Error(_) => Err(JpkError::InvalidCell {
            field: field.label(),
            row,
            value: if cell.is_empty() {
                "empty cell".into()
            } else {
                cell.to_string()
            },
        }),
        _ => Ok(cell.to_string()),
    }
}

fn date_text(cell: &CellValue, field: LogicalField, row: usize) -> Result<String, JpkError> {
    parse_day_first(cell)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .ok_or_else(|| JpkError::InvalidDate {
            field: field.label(),
            row,
            value: cell.to_string(),
        })
}

fn write_header(
    w: &mut XmlWriter,
    config: &JpkConfig,
    context: &DocumentContext,
) -> Result<(), JpkError> {
    let at = context.generated_at;
    w.start_element("Naglowek")?;
    w.text_element_with_attrs(
        "KodFormularza",
        FORM_CODE,
        &[("kodSystemowy", FORM_SYSTEM_CODE), ("wersjaSchemy", SCHEMA_VERSION)],
    )?;
    w.text_element("WariantFormularza", FORM_VARIANT)?;
    w.text_element(
        "DataWytworzeniaJPK",
        &at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
    )?;
    w.text_element("NazwaSystemu", &config.system_name)?;
    w.text_element_with_attrs("CelZlozenia", &config.purpose, &[("poz", "P_7")])?;
    w.text_element("KodUrzedu", &config.office_code)?;
    w.text_element("Rok", &at.year().to_string())?;
    w.text_element("Miesiac", &at.month().to_string())?;
    w.end_element("Naglowek")?;
    Ok(())
}

fn write_taxpayer(w: &mut XmlWriter, config: &JpkConfig) -> Result<(), JpkError> {
    let t = &config.taxpayer;
    w.start_element_with_attrs("Podmiot1", &[("rola", "Podatnik")])?;
    w.start_element("OsobaFizyczna")?;
    w.text_element("etd:NIP", &t.nip)?;
    w.text_element("etd:ImiePierwsze", &t.first_name)?;
    w.text_element("etd:Nazwisko", &t.last_name)?;
    w.text_element("etd:DataUrodzenia", &t.birth_date.format("%Y-%m-%d").to_string())?;
    w.end_element("OsobaFizyczna")?;
    w.end_element("Podmiot1")?;
    Ok(())
}

fn write_declaration(w: &mut XmlWriter) -> Result<(), JpkError> {
    w.start_element("Deklaracja")?;
    w.start_element("Naglowek")?;
    w.text_element_with_attrs(
        "KodFormularzaDekl",
        DECLARATION_FORM,
        &[
            ("kodSystemowy", DECLARATION_SYSTEM_CODE),
            ("kodPodatku", "VAT"),
            ("rodzajZobowiazania", "Z"),
            ("wersjaSchemy", SCHEMA_VERSION),
        ],
    )?;
    w.text_element("WariantFormularzaDekl", DECLARATION_VARIANT)?;
    w.end_element("Naglowek")?;
    w.text_element("Pouczenia", "1")?;
    w.end_element("Deklaracja")?;
    Ok(())
}

fn write_register(
    w: &mut XmlWriter,
    lines: &[PurchaseLine],
    vat_total: Decimal,
) -> Result<(), JpkError> {
    w.start_element("Ewidencja")?;

    // Sales are never converted
    w.start_element("SprzedazCtrl")?;
    w.text_element("LiczbaWierszySprzedazy", "0")?;
    w.text_element("PodatekNalezny", "0")?;
    w.end_element("SprzedazCtrl")?;

    for (i, line) in lines.iter().enumerate() {
        w.start_element("ZakupWiersz")?;
        w.text_element("LpZakupu", &(i + 1).to_string())?;
        w.text_element("NrDostawcy", &line.nr_dostawcy)?;
        w.text_element("NazwaDostawcy", "")?;
        w.text_element("DowodZakupu", &line.dowod_zakupu)?;
        w.text_element("DataZakupu", &line.data_zakupu)?;
        w.text_element("DataWplywu", &line.data_wplywu)?;
        w.amount_element("K_42", line.net)?;
        w.amount_element("K_43", line.vat)?;
        w.end_element("ZakupWiersz")?;
    }

    w.start_element("ZakupCtrl")?;
    w.text_element("LiczbaWierszyZakupow", &lines.len().to_string())?;
    w.text_element("PodatekNaliczony", &format_amount(vat_total))?;
    w.end_element("ZakupCtrl")?;

    w.end_element("Ewidencja")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn context() -> DocumentContext {
        DocumentContext {
            generated_at: NaiveDate::from_ymd_opt(2024, 4, 5)
                .unwrap()
                .and_hms_micro_opt(9, 30, 15, 123456)
                .unwrap(),
        }
    }

    fn record(row: usize, vat_id: CellValue, doc_date: &str) -> PurchaseRecord {
        PurchaseRecord {
            source_row: row,
            vat_registration: vat_id,
            external_document: "FV/01/2024".into(),
            document_date: doc_date.into(),
            receipt_date: "02/03/2024".into(),
            net: dec!(100),
            vat: dec!(23),
        }
    }

    #[test]
    fn header_uses_context_timestamp() {
        let xml = to_jpk_xml(&[], &JpkConfig::default(), &context()).unwrap();
        assert!(xml.contains("<DataWytworzeniaJPK>2024-04-05T09:30:15.123456</DataWytworzeniaJPK>"));
        assert!(xml.contains("<Rok>2024</Rok>"));
        assert!(xml.contains("<Miesiac>4</Miesiac>"));
        assert!(xml.contains(r#"<JPK xmlns="http://crd.gov.pl/wzor/2021/12/27/11148/""#));
    }

    #[test]
    fn integral_float_ids_lose_fraction() {
        let xml = to_jpk_xml(
            &[record(2, CellValue::Number(1234567890.0), "01/03/2024")],
            &JpkConfig::default(),
            &context(),
        )
        .unwrap();
        assert!(xml.contains("<NrDostawcy>1234567890</NrDostawcy>"));
        assert!(xml.contains("<NazwaDostawcy></NazwaDostawcy>"));
    }

    #[test]
    fn bad_date_fails_with_row() {
        let records = [
            record(2, "111".into(), "01/03/2024"),
            record(5, "222".into(), "yesterday"),
        ];
        let err = to_jpk_xml(&records, &JpkConfig::default(), &context()).unwrap_err();
        match err {
            JpkError::InvalidDate { field, row, value } => {
                assert_eq!(field, "Document Date");
                assert_eq!(row, 5);
                assert_eq!(value, "yesterday");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_identity_fails() {
        let err = to_jpk_xml(
            &[record(3, CellValue::Empty, "01/03/2024")],
            &JpkConfig::default(),
            &context(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            JpkError::InvalidCell { field: "VAT Registration", row: 3, .. }
        ));
    }

    #[test]
    fn atomic_write_replaces_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xml");
        std::fs::write(&path, "old").unwrap();
        write_jpk_file(&path, "<JPK/>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<JPK/>");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
