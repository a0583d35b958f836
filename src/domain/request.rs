use super::money::Amount;
use super::params::Params;
use super::transaction::{Operation, PaymentOptions, TERMINAL_PATH, generate_transaction_id};
use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};

const SERVICE_TYPE: &str = "B";
const DEFAULT_LANGUAGE: &str = "nb_NO";
const DEFAULT_REDIRECT_URL: &str = "http://example.com";
const REDACTED: &str = "***";

/// A fully assembled request for one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRequest {
    pub operation: Operation,
    pub params: Params,
}

impl OperationRequest {
    /// Assembles the parameters for `operation`, checking required inputs first.
    ///
    /// Registration needs an order id and an amount; capture and credit need a
    /// transaction id and an amount; every other operation needs a transaction id.
    pub fn build(
        config: &GatewayConfig,
        operation: Operation,
        amount: Option<Amount>,
        options: &PaymentOptions,
    ) -> Result<Self> {
        let mut params = Params::new();
        add_credentials(&mut params, config);

        match operation {
            Operation::Register => {
                let order_id = options.require_order_id()?;
                let amount = amount.ok_or(GatewayError::MissingField("amount"))?;
                add_new_transaction(&mut params, options);
                add_terminal(&mut params, options);
                add_order(&mut params, config, order_id, amount, options);
            }
            Operation::Capture | Operation::Credit => {
                let transaction_id = options.require_transaction_id()?;
                let amount = amount.ok_or(GatewayError::MissingField("amount"))?;
                params.insert("transactionId", transaction_id);
                params.insert("transactionAmount", amount);
            }
            Operation::Sale | Operation::Auth | Operation::Annul | Operation::Query => {
                params.insert("transactionId", options.require_transaction_id()?);
            }
        }

        params.insert("operation", operation.verb());
        Ok(Self { operation, params })
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.params.get("transactionId")
    }

    pub fn url(&self, base_url: &str) -> String {
        build_url(base_url, self.operation.path(), &self.params)
    }

    /// Same as [`url`](Self::url) with the merchant token masked, for logs.
    pub fn redacted_url(&self, base_url: &str) -> String {
        let mut params = self.params.clone();
        if params.get("token").is_some() {
            params.insert("token", REDACTED);
        }
        build_url(base_url, self.operation.path(), &params)
    }
}

/// Joins base URL, path and encoded query.
pub fn build_url(base_url: &str, path: &str, params: &Params) -> String {
    let mut url = format!("{base_url}{path}");
    if !params.is_empty() {
        url.push('?');
        url.push_str(&params.encode());
    }
    url
}

/// Hosted payment page the payer is sent to after registration.
pub fn terminal_url(base_url: &str, merchant_id: &str, transaction_id: &str) -> String {
    let params: Params = [("MerchantID", merchant_id), ("TransactionID", transaction_id)]
        .into_iter()
        .collect();
    build_url(base_url, TERMINAL_PATH, &params)
}

fn add_credentials(params: &mut Params, config: &GatewayConfig) {
    params.insert("merchantId", config.credentials.merchant_id());
    params.insert("token", config.credentials.token());
}

fn add_new_transaction(params: &mut Params, options: &PaymentOptions) {
    params.insert("transactionId", generate_transaction_id(options));
}

fn add_terminal(params: &mut Params, options: &PaymentOptions) {
    params.insert("serviceType", SERVICE_TYPE);
    params.insert_opt("orderDescription", options.description.as_deref());
    params.insert(
        "language",
        options.language.as_deref().unwrap_or(DEFAULT_LANGUAGE),
    );
    params.insert(
        "redirectUrl",
        options
            .redirect_url
            .as_deref()
            .unwrap_or(DEFAULT_REDIRECT_URL),
    );
}

fn add_order(
    params: &mut Params,
    config: &GatewayConfig,
    order_id: &str,
    amount: Amount,
    options: &PaymentOptions,
) {
    params.insert("orderNumber", order_id);
    params.insert(
        "currencyCode",
        options
            .currency
            .as_deref()
            .unwrap_or(config.default_currency.as_str()),
    );
    params.insert("amount", amount);
}
