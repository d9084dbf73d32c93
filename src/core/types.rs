use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// A single spreadsheet cell, detached from any reader library.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Blank cell.
    #[default]
    Empty,
    /// Text cell.
    Text(String),
    /// Floating point number.
    Number(f64),
    /// Integer number.
    Int(i64),
    /// Boolean.
    Bool(bool),
    /// A cell formatted as a date or date-time.
    DateTime(NaiveDateTime),
    /// Spreadsheet error value such as `#N/A`.
    Error(String),
}

impl CellValue {
    /// Whether the cell holds no value at all.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Int(n) => write!(f, "{n}"),
            CellValue::Bool(true) => f.write_str("True"),
            CellValue::Bool(false) => f.write_str("False"),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Error(code) => f.write_str(code),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

/// One data row, positionally aligned with [`Worksheet::headers`].
pub type Row = Vec<CellValue>;

/// A named worksheet: header row plus data rows, in spreadsheet order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Worksheet {
    /// Sheet (tab) name.
    pub name: String,
    /// Header texts taken from the first row.
    pub headers: Vec<String>,
    /// Data rows below the header.
    pub rows: Vec<Row>,
}

impl Worksheet {
    /// Create a worksheet from its parts.
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }
}

/// The required semantic columns of a purchase worksheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalField {
    /// Record type; only "purchase" rows are converted.
    Type,
    /// Counterparty tax id (NrDostawcy).
    VatRegistration,
    /// Invoice number (DowodZakupu).
    ExternalDocument,
    /// Invoice date (DataZakupu).
    DocumentDate,
    /// Receipt date (DataWplywu).
    ReceiptDate,
    /// Net amount (K_42).
    VatBase,
    /// Tax amount (K_43).
    VatAmount,
}

impl LogicalField {
    /// All fields in resolution order.
    pub const ALL: [LogicalField; 7] = [
        LogicalField::Type,
        LogicalField::VatRegistration,
        LogicalField::ExternalDocument,
        LogicalField::DocumentDate,
        LogicalField::ReceiptDate,
        LogicalField::VatBase,
        LogicalField::VatAmount,
    ];

    /// Text searched for among the worksheet headers.
    pub fn pattern(&self) -> &'static str {
        match self {
            LogicalField::Type => "Type",
            LogicalField::VatRegistration => "VAT Registration",
            LogicalField::ExternalDocument => "External Document",
            LogicalField::DocumentDate => "Document Date",
            LogicalField::ReceiptDate => "Receipt",
            LogicalField::VatBase => "VAT Base",
            LogicalField::VatAmount => "VAT Amount",
        }
    }

    /// Human-readable name used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            LogicalField::Type => "Type",
            LogicalField::VatRegistration => "VAT Registration",
            LogicalField::ExternalDocument => "External Document",
            LogicalField::DocumentDate => "Document Date",
            LogicalField::ReceiptDate => "Receipt Date",
            LogicalField::VatBase => "VAT Base",
            LogicalField::VatAmount => "VAT Amount",
        }
    }
}

impl fmt::Display for LogicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A header chosen for a logical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Header text as it appears after normalization.
    pub header: String,
    /// Position of the header within the row.
    pub index: usize,
}

/// The header resolved for each of the seven logical fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumns {
    /// Record type column.
    pub type_: Column,
    /// Counterparty tax id column.
    pub vat_registration: Column,
    /// Invoice number column.
    pub external_document: Column,
    /// Invoice date column.
    pub document_date: Column,
    /// Receipt date column.
    pub receipt_date: Column,
    /// Net amount column.
    pub vat_base: Column,
    /// Tax amount column.
    pub vat_amount: Column,
}

impl ResolvedColumns {
    /// Look up the column for a logical field.
    pub fn get(&self, field: LogicalField) -> &Column {
        match field {
            LogicalField::Type => &self.type_,
            LogicalField::VatRegistration => &self.vat_registration,
            LogicalField::ExternalDocument => &self.external_document,
            LogicalField::DocumentDate => &self.document_date,
            LogicalField::ReceiptDate => &self.receipt_date,
            LogicalField::VatBase => &self.vat_base,
            LogicalField::VatAmount => &self.vat_amount,
        }
    }
}

/// A purchase row projected onto the logical fields, amounts already coerced.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseRecord {
    /// Spreadsheet row number (the header is row 1).
    pub source_row: usize,
    /// Counterparty tax id cell.
    pub vat_registration: CellValue,
    /// Invoice number cell.
    pub external_document: CellValue,
    /// Invoice date cell.
    pub document_date: CellValue,
    /// Receipt date cell.
    pub receipt_date: CellValue,
    /// Net amount; zero when the cell was not numeric.
    pub net: Decimal,
    /// Tax amount; zero when the cell was not numeric.
    pub vat: Decimal,
}
