use crate::error::{GatewayError, Result};
use rand::Rng;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

pub const REGISTER_PATH: &str = "Netaxept/Register.aspx";
pub const PROCESS_PATH: &str = "Netaxept/Process.aspx";
pub const QUERY_PATH: &str = "Netaxept/Query.aspx";
pub const TERMINAL_PATH: &str = "terminal/default.aspx";

/// A payment lifecycle action understood by the processor.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    Register,
    Sale,
    Auth,
    Capture,
    Credit,
    Annul,
    Query,
}

impl Operation {
    /// The verb sent as the `operation` parameter.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Register => "REGISTER",
            Self::Sale => "SALE",
            Self::Auth => "AUTH",
            Self::Capture => "CAPTURE",
            Self::Credit => "CREDIT",
            Self::Annul => "ANNUL",
            Self::Query => "QUERY",
        }
    }

    /// Endpoint path relative to the environment base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Register => REGISTER_PATH,
            Self::Sale | Self::Auth | Self::Capture | Self::Credit | Self::Annul => PROCESS_PATH,
            Self::Query => QUERY_PATH,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

impl FromStr for Operation {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "REGISTER" => Ok(Self::Register),
            "SALE" => Ok(Self::Sale),
            "AUTH" => Ok(Self::Auth),
            "CAPTURE" => Ok(Self::Capture),
            "CREDIT" => Ok(Self::Credit),
            "ANNUL" => Ok(Self::Annul),
            "QUERY" => Ok(Self::Query),
            other => Err(GatewayError::Validation(format!(
                "Unsupported operation: {other}"
            ))),
        }
    }
}

/// Caller-supplied options for a gateway call.
///
/// Which fields are required depends on the operation; the facade checks
/// them before anything is sent.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PaymentOptions {
    pub order_id: Option<String>,
    pub transaction_id: Option<String>,
    pub currency: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub redirect_url: Option<String>,
}

impl PaymentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_redirect_url(mut self, redirect_url: impl Into<String>) -> Self {
        self.redirect_url = Some(redirect_url.into());
        self
    }

    /// Returns the order id, failing if it is absent or blank.
    pub fn require_order_id(&self) -> Result<&str> {
        require(self.order_id.as_deref(), "order_id")
    }

    /// Returns the transaction id, failing if it is absent or blank.
    pub fn require_transaction_id(&self) -> Result<&str> {
        require(self.transaction_id.as_deref(), "transaction_id")
    }
}

fn require<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(GatewayError::MissingField(field)),
    }
}

/// Derives a fresh 32-hex-character transaction id for a registration.
///
/// The digest mixes the option set with the current time and a random value,
/// so identical options still produce distinct ids.
pub fn generate_transaction_id(options: &PaymentOptions) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let salt: u64 = rand::thread_rng().r#gen();
    let seed = format!("{options:?}+{nanos}+{salt}");
    format!("{:x}", md5::compute(seed.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_operation_paths() {
        assert_eq!(Operation::Register.path(), "Netaxept/Register.aspx");
        for op in [
            Operation::Sale,
            Operation::Auth,
            Operation::Capture,
            Operation::Credit,
            Operation::Annul,
        ] {
            assert_eq!(op.path(), "Netaxept/Process.aspx");
        }
        assert_eq!(Operation::Query.path(), "Netaxept/Query.aspx");
    }

    #[test]
    fn test_operation_from_str_is_case_insensitive() {
        assert_eq!("annul".parse::<Operation>().unwrap(), Operation::Annul);
        assert_eq!("Capture".parse::<Operation>().unwrap(), Operation::Capture);
        assert!(matches!(
            "refund".parse::<Operation>(),
            Err(GatewayError::Validation(_))
        ));
    }

    #[test]
    fn test_require_rejects_blank_values() {
        let options = PaymentOptions::new().with_transaction_id("   ");
        assert!(matches!(
            options.require_transaction_id(),
            Err(GatewayError::MissingField("transaction_id"))
        ));
        assert!(matches!(
            options.require_order_id(),
            Err(GatewayError::MissingField("order_id"))
        ));
    }

    #[test]
    fn test_generated_id_shape() {
        let id = generate_transaction_id(&PaymentOptions::new().with_order_id("1"));
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generated_ids_do_not_repeat_for_identical_options() {
        let options = PaymentOptions::new().with_order_id("1");
        let ids: HashSet<String> = (0..1000)
            .map(|_| generate_transaction_id(&options))
            .collect();
        assert_eq!(ids.len(), 1000);
    }
}
