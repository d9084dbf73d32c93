//! Header normalization and logical-field column resolution.

use super::error::JpkError;
use super::types::{Column, LogicalField, ResolvedColumns};

/// Normalize one header: trim it and drop trailing commas along with any
/// whitespace around them.
pub fn normalize_header(header: &str) -> String {
    header
        .trim()
        .trim_end_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string()
}

/// Normalize every header, preserving order and duplicates.
pub fn normalize_headers<S: AsRef<str>>(headers: &[S]) -> Vec<String> {
    headers
        .iter()
        .map(|h| normalize_header(h.as_ref()))
        .collect()
}

/// Position of the header that best matches `pattern`.
///
/// A case-insensitive exact match (header trimmed) wins over a
/// case-insensitive substring match. Within each step the first header in
/// sheet order wins; headers are never reordered.
pub fn find_column_index<S: AsRef<str>>(headers: &[S], pattern: &str) -> Result<usize, JpkError> {
    let needle = pattern.to_lowercase();

    if let Some(idx) = headers
        .iter()
        .position(|h| h.as_ref().trim().to_lowercase() == needle)
    {
        return Ok(idx);
    }

    headers
        .iter()
        .position(|h| h.as_ref().to_lowercase().contains(&needle))
        .ok_or_else(|| JpkError::ColumnNotFound {
            pattern: pattern.to_string(),
        })
}

/// Header text that best matches `pattern`; see [`find_column_index`].
pub fn find_column<'a>(headers: &'a [String], pattern: &str) -> Result<&'a str, JpkError> {
    find_column_index(headers, pattern).map(|idx| headers[idx].as_str())
}

/// Resolve all seven logical fields against normalized headers.
///
/// Fields are tried in [`LogicalField::ALL`] order and the first one that
/// does not resolve is reported.
pub fn resolve_columns(headers: &[String]) -> Result<ResolvedColumns, JpkError> {
    let column = |field: LogicalField| -> Result<Column, JpkError> {
        let index = find_column_index(headers, field.pattern())?;
        Ok(Column {
            header: headers[index].clone(),
            index,
        })
    };

    Ok(ResolvedColumns {
        type_: column(LogicalField::Type)?,
        vat_registration: column(LogicalField::VatRegistration)?,
        external_document: column(LogicalField::ExternalDocument)?,
        document_date: column(LogicalField::DocumentDate)?,
        receipt_date: column(LogicalField::ReceiptDate)?,
        vat_base: column(LogicalField::VatBase)?,
        vat_amount: column(LogicalField::VatAmount)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn normalize_strips_whitespace_and_commas() {
        assert_eq!(
            normalize_headers(&[" VAT Base,", " Document Date ", "Type"]),
            ["VAT Base", "Document Date", "Type"]
        );
        assert_eq!(normalize_header("VAT Amount ,"), "VAT Amount");
        assert_eq!(normalize_header("Amount,,"), "Amount");
        assert_eq!(normalize_header(",Lead"), ",Lead");
        assert_eq!(normalize_header("   "), "");
    }

    #[test]
    fn normalize_keeps_duplicates_and_order() {
        assert_eq!(normalize_headers(&["B,", "A", "B"]), ["B", "A", "B"]);
    }

    #[test]
    fn exact_match_beats_earlier_substring() {
        let h = headers(&["Document Type", "Type", "VAT Amount"]);
        assert_eq!(find_column(&h, "Type").unwrap(), "Type");
        assert_eq!(find_column_index(&h, "type").unwrap(), 1);
    }

    #[test]
    fn substring_match_first_in_order() {
        let h = headers(&["Receipt/Sales Date", "Document Receipt Date"]);
        assert_eq!(find_column(&h, "Receipt").unwrap(), "Receipt/Sales Date");
    }

    #[test]
    fn missing_column_carries_pattern() {
        let err = find_column(&headers(&["Col1", "Col2"]), "Type").unwrap_err();
        match err {
            JpkError::ColumnNotFound { pattern } => assert_eq!(pattern, "Type"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn resolve_reports_first_failing_field() {
        let h = headers(&["Type", "VAT Registration No", "External Document No"]);
        let err = resolve_columns(&h).unwrap_err();
        assert!(matches!(err, JpkError::ColumnNotFound { ref pattern } if pattern == "Document Date"));
    }
}
