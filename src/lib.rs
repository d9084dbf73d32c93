//! # jpk-vat
//!
//! Converts purchase-invoice worksheets into Polish JPK_V7M (JPK_VAT)
//! XML documents, one document per worksheet.
//!
//! Worksheet headers are free-form: each of the seven required fields (Type,
//! VAT Registration, External Document, Document Date, Receipt, VAT Base,
//! VAT Amount) is located by exact, then substring, case-insensitive match.
//! Rows whose Type is `purchase` become `ZakupWiersz` entries.
//!
//! All amounts use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use jpk_vat::core::*;
//! use jpk_vat::convert::{Conversion, convert_worksheet};
//! use jpk_vat::jpk::{DocumentContext, JpkConfig};
//!
//! let headers = ["Type", "VAT Registration No", "External Document No", "Document Date",
//!     "Document Receipt Date", "VAT Base", "VAT Amount"];
//! let sheet = Worksheet::new(
//!     "March",
//!     headers.iter().map(|h| h.to_string()).collect(),
//!     vec![vec!["Purchase".into(), "1234567890".into(), "FV/01/2024".into(),
//!         "01/03/2024".into(), "02/03/2024".into(), 1000.0.into(), 230.0.into()]],
//! );
//!
//! let conv = convert_worksheet(&sheet, &JpkConfig::default(), &DocumentContext::now()).unwrap();
//! let Conversion::Document { xml, rows } = conv else { panic!() };
//! assert_eq!(rows, 1);
//! assert!(xml.contains("<K_43>230.00</K_43>"));
//! assert!(xml.contains("<DataZakupu>2024-03-01</DataZakupu>"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Data model, column resolution, purchase filtering |
//! | `jpk` | JPK_V7M XML generation |
//! | `xlsx` | Workbook reading (calamine) and per-sheet orchestration |
//! | `cli` (default) | The `jpk-vat` binary |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "jpk")]
pub mod jpk;

#[cfg(feature = "jpk")]
pub mod convert;

#[cfg(feature = "xlsx")]
pub mod workbook;
