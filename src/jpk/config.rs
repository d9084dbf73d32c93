//! Document settings that are policy rather than schema.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Taxpayer identity written into `Podmiot1/OsobaFizyczna`.
///
/// The spreadsheet carries no identity columns, so the defaults are fixed
/// placeholders that the operator completes before submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Taxpayer {
    /// Tax identification number (NIP).
    pub nip: String,
    /// First name.
    pub first_name: String,
    /// Surname.
    pub last_name: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
}

impl Default for Taxpayer {
    fn default() -> Self {
        Self {
            nip: "0000000000".into(),
            first_name: "Imie".into(),
            last_name: "Nazwisko".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or_default(),
        }
    }
}

/// Configuration for JPK_V7M generation.
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JpkConfig {
    /// `Naglowek/NazwaSystemu`.
    pub system_name: String,
    /// `Naglowek/KodUrzedu`, the tax office code.
    pub office_code: String,
    /// `Naglowek/CelZlozenia`: 1 for a first submission, 2 for a correction.
    pub purpose: String,
    /// Identity block.
    pub taxpayer: Taxpayer,
}

impl Default for JpkConfig {
    fn default() -> Self {
        Self {
            system_name: concat!("jpk-vat ", env!("CARGO_PKG_VERSION")).into(),
            office_code: "0000".into(),
            purpose: "1".into(),
            taxpayer: Taxpayer::default(),
        }
    }
}

/// Builder for [`JpkConfig`].
///
/// # Example
///
/// ```
/// use jpk_vat::jpk::JpkConfigBuilder;
///
/// let config = JpkConfigBuilder::new()
///     .office_code("1471")
///     .system_name("Księgowość 2.0")
///     .build();
/// assert_eq!(config.office_code, "1471");
/// assert_eq!(config.taxpayer.nip, "0000000000");
/// ```
#[derive(Debug, Default)]
pub struct JpkConfigBuilder {
    config: JpkConfig,
}

impl JpkConfigBuilder {
    /// Start from the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reporting system name.
    pub fn system_name(mut self, name: impl Into<String>) -> Self {
        self.config.system_name = name.into();
        self
    }

    /// Set the tax office code.
    pub fn office_code(mut self, code: impl Into<String>) -> Self {
        self.config.office_code = code.into();
        self
    }

    /// Set the submission purpose code.
    pub fn purpose(mut self, purpose: impl Into<String>) -> Self {
        self.config.purpose = purpose.into();
        self
    }

    /// Replace the taxpayer identity.
    pub fn taxpayer(mut self, taxpayer: Taxpayer) -> Self {
        self.config.taxpayer = taxpayer;
        self
    }

    /// Finish building.
    pub fn build(self) -> JpkConfig {
        self.config
    }
}
