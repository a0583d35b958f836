use crate::config::GatewayConfig;
use crate::domain::money::Amount;
use crate::domain::ports::TransportBox;
use crate::domain::request::{OperationRequest, terminal_url};
use crate::domain::response::{GatewayResponse, Outcome};
use crate::domain::transaction::{Operation, PaymentOptions};
use crate::domain::tree;
use crate::error::Result;
use tracing::{debug, info, instrument, warn};

/// Client for the processor's hosted-payment API.
///
/// Each call builds its own request and shares nothing mutable with other
/// calls, so one gateway can serve concurrent callers.
pub struct NetaxeptGateway {
    config: GatewayConfig,
    transport: TransportBox,
}

impl NetaxeptGateway {
    /// Creates a new `NetaxeptGateway`.
    ///
    /// # Arguments
    ///
    /// * `config` - Credentials, environment and default currency.
    /// * `transport` - Performs the outbound GET requests.
    pub fn new(config: GatewayConfig, transport: TransportBox) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn is_test(&self) -> bool {
        self.config.test
    }

    /// Registers a new payment and returns the hosted terminal URL to send the payer to.
    ///
    /// Requires `order_id`. A fresh transaction id is generated; the one the
    /// processor echoes back becomes the response's authorization.
    pub async fn register(
        &self,
        amount: Amount,
        options: &PaymentOptions,
    ) -> Result<GatewayResponse> {
        self.commit(Operation::Register, Some(amount), options).await
    }

    /// Authorizes and captures a registered transaction in one step.
    pub async fn purchase(&self, options: &PaymentOptions) -> Result<GatewayResponse> {
        self.commit(Operation::Sale, None, options).await
    }

    pub async fn authorize(&self, options: &PaymentOptions) -> Result<GatewayResponse> {
        self.commit(Operation::Auth, None, options).await
    }

    pub async fn capture(
        &self,
        amount: Amount,
        options: &PaymentOptions,
    ) -> Result<GatewayResponse> {
        self.commit(Operation::Capture, Some(amount), options).await
    }

    pub async fn credit(
        &self,
        amount: Amount,
        options: &PaymentOptions,
    ) -> Result<GatewayResponse> {
        self.commit(Operation::Credit, Some(amount), options).await
    }

    /// Annuls an authorized transaction.
    pub async fn void(&self, options: &PaymentOptions) -> Result<GatewayResponse> {
        self.commit(Operation::Annul, None, options).await
    }

    pub async fn query(&self, options: &PaymentOptions) -> Result<GatewayResponse> {
        self.commit(Operation::Query, None, options).await
    }

    /// Builds the request for `operation` without sending it.
    ///
    /// Fails with a contract violation when a required input is missing.
    pub fn prepare(
        &self,
        operation: Operation,
        amount: Option<Amount>,
        options: &PaymentOptions,
    ) -> Result<OperationRequest> {
        OperationRequest::build(&self.config, operation, amount, options)
    }

    async fn commit(
        &self,
        operation: Operation,
        amount: Option<Amount>,
        options: &PaymentOptions,
    ) -> Result<GatewayResponse> {
        let request = self.prepare(operation, amount, options)?;
        self.execute(request).await
    }

    /// Sends a prepared request and classifies the answer.
    ///
    /// Declines and remote exceptions come back as unsuccessful responses;
    /// only transport failures and unparsable bodies are errors.
    #[instrument(skip_all, fields(operation = %request.operation, test = self.config.test))]
    pub async fn execute(&self, request: OperationRequest) -> Result<GatewayResponse> {
        let base_url = self.config.base_url();
        debug!(url = %request.redacted_url(base_url), "sending request");

        let body = self.transport.get(&request.url(base_url)).await?;
        let raw = tree::parse_bytes(&body)?;
        let mut response = GatewayResponse::new(request.operation, raw, self.config.test);

        if request.operation == Operation::Register
            && response.outcome() != Outcome::Exception
            && let Some(transaction_id) = response.authorization().map(str::to_string)
        {
            let url = terminal_url(
                base_url,
                self.config.credentials.merchant_id(),
                &transaction_id,
            );
            response = response.with_terminal_url(url);
        }

        match response.outcome() {
            Outcome::Success => info!(
                authorization = response.authorization().unwrap_or_default(),
                "operation succeeded"
            ),
            outcome => warn!(
                ?outcome,
                container = %response.raw().container,
                message = response.message().unwrap_or_default(),
                "operation not successful"
            ),
        }

        Ok(response)
    }
}
