//! JPK_V7M (JPK_VAT with declaration) XML generation.
//!
//! Only the purchase register is populated: the sales control block always
//! reports zero rows and zero tax.
//!
//! # Example
//!
//! ```
//! use jpk_vat::jpk::{DocumentContext, JpkConfig, to_jpk_xml};
//!
//! let xml = to_jpk_xml(&[], &JpkConfig::default(), &DocumentContext::now()).unwrap();
//! assert!(xml.contains("<LiczbaWierszyZakupow>0</LiczbaWierszyZakupow>"));
//! assert!(xml.contains("<PodatekNaliczony>0.00</PodatekNaliczony>"));
//! ```

mod config;
mod document;
pub(crate) mod xml_utils;

pub use config::{JpkConfig, JpkConfigBuilder, Taxpayer};
pub use document::{DocumentContext, to_jpk_xml, write_jpk_file};
pub use xml_utils::format_amount;

/// Default namespace of the JPK_V7M(2) schema.
pub const JPK_NS: &str = "http://crd.gov.pl/wzor/2021/12/27/11148/";

/// Namespace of the shared MF type definitions (`etd:` prefix).
pub const ETD_NS: &str = "http://crd.gov.pl/xml/schematy/dziedzinowe/mf/2021/06/08/eD/DefinicjeTypy/";

pub const FORM_CODE: &str = "JPK_VAT";
pub const FORM_SYSTEM_CODE: &str = "JPK_V7M (2)";
pub const FORM_VARIANT: &str = "2";
pub const SCHEMA_VERSION: &str = "1-0E";

pub const DECLARATION_FORM: &str = "VAT-7";
pub const DECLARATION_SYSTEM_CODE: &str = "VAT-7 (22)";
pub const DECLARATION_VARIANT: &str = "22";
