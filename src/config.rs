use crate::error::{GatewayError, Result};
use std::fmt;

pub const TEST_URL: &str = "https://epayment-test.bbs.no/";
pub const LIVE_URL: &str = "https://epayment.bbs.no/";
pub const DEFAULT_CURRENCY: &str = "NOK";

pub const DISPLAY_NAME: &str = "BBS Netaxept";
pub const HOMEPAGE_URL: &str = "http://www.betalingsterminal.no/Netthandel-forside/";
/// ISO 3166-1 alpha-2 codes of the countries merchants may be based in.
pub const SUPPORTED_COUNTRIES: &[&str] = &["NO", "DK", "SE", "FI"];
pub const SUPPORTED_CARD_TYPES: &[&str] = &[
    "visa",
    "master",
    "american_express",
    "diners_club",
    "maestro",
    "bank_axess",
];

/// Merchant credentials issued by the processor.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    merchant_id: String,
    token: String,
}

impl Credentials {
    /// Both the merchant id and the token must be non-blank.
    pub fn new(merchant_id: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let merchant_id = merchant_id.into();
        let token = token.into();
        if merchant_id.trim().is_empty() {
            return Err(GatewayError::MissingField("login"));
        }
        if token.trim().is_empty() {
            return Err(GatewayError::MissingField("password"));
        }
        Ok(Self { merchant_id, token })
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("merchant_id", &self.merchant_id)
            .field("token", &"***")
            .finish()
    }
}

/// Immutable gateway configuration, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub credentials: Credentials,
    /// Selects the test environment for every request, including terminal URLs.
    pub test: bool,
    pub default_currency: String,
}

impl GatewayConfig {
    pub fn new(credentials: Credentials, test: bool) -> Self {
        Self {
            credentials,
            test,
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = currency.into();
        self
    }

    pub fn base_url(&self) -> &'static str {
        if self.test { TEST_URL } else { LIVE_URL }
    }
}
