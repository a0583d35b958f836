use clap::builder::BoolishValueParser;
use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use netaxept::application::gateway::NetaxeptGateway;
use netaxept::config::{Credentials, DEFAULT_CURRENCY, GatewayConfig};
use netaxept::domain::money::Amount;
use netaxept::domain::ports::TransportBox;
use netaxept::domain::request::OperationRequest;
use netaxept::domain::transaction::{Operation, PaymentOptions};
use netaxept::infrastructure::http::HttpTransport;
use netaxept::interfaces::json::response_writer::ResponseWriter;
use rust_decimal::Decimal;
use std::io;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Merchant id issued by the processor
    #[arg(long, env = "NETAXEPT_LOGIN")]
    login: String,

    /// Merchant token issued by the processor
    #[arg(long, env = "NETAXEPT_PASSWORD", hide_env_values = true)]
    password: String,

    /// Send requests to the test environment
    #[arg(long, env = "NETAXEPT_TEST", value_parser = BoolishValueParser::new())]
    test: bool,

    /// Currency used when a registration does not name one
    #[arg(long, env = "NETAXEPT_CURRENCY", default_value = DEFAULT_CURRENCY)]
    currency: String,

    /// Print the request URL (token masked) instead of sending it
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register a payment and get the hosted terminal URL
    Register {
        #[arg(long)]
        order_id: String,
        /// Amount in major units, e.g. 100.50
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        currency: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        redirect_url: Option<String>,
    },
    /// Authorize and capture in one step
    Sale(Existing),
    /// Authorize a registered transaction
    Auth(Existing),
    /// Capture an authorized amount
    Capture(WithAmount),
    /// Refund a captured amount
    Credit(WithAmount),
    /// Annul an authorization
    Void(Existing),
    /// Fetch the current state of a transaction
    Query(Existing),
}

#[derive(Args)]
struct Existing {
    #[arg(long)]
    transaction_id: String,
}

#[derive(Args)]
struct WithAmount {
    #[arg(long)]
    transaction_id: String,
    /// Amount in major units, e.g. 100.50
    #[arg(long)]
    amount: Decimal,
}

impl Command {
    fn into_request(self) -> Result<(Operation, Option<Amount>, PaymentOptions)> {
        let request = match self {
            Self::Register {
                order_id,
                amount,
                currency,
                description,
                language,
                redirect_url,
            } => {
                let options = PaymentOptions {
                    order_id: Some(order_id),
                    currency,
                    description,
                    language,
                    redirect_url,
                    ..PaymentOptions::default()
                };
                (Operation::Register, Some(to_amount(amount)?), options)
            }
            Self::Sale(args) => (Operation::Sale, None, existing(args.transaction_id)),
            Self::Auth(args) => (Operation::Auth, None, existing(args.transaction_id)),
            Self::Capture(args) => (
                Operation::Capture,
                Some(to_amount(args.amount)?),
                existing(args.transaction_id),
            ),
            Self::Credit(args) => (
                Operation::Credit,
                Some(to_amount(args.amount)?),
                existing(args.transaction_id),
            ),
            Self::Void(args) => (Operation::Annul, None, existing(args.transaction_id)),
            Self::Query(args) => (Operation::Query, None, existing(args.transaction_id)),
        };
        Ok(request)
    }
}

fn existing(transaction_id: String) -> PaymentOptions {
    PaymentOptions::new().with_transaction_id(transaction_id)
}

fn to_amount(value: Decimal) -> Result<Amount> {
    Amount::from_major(value).into_diagnostic()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let credentials = Credentials::new(cli.login, cli.password).into_diagnostic()?;
    let config = GatewayConfig::new(credentials, cli.test).with_default_currency(cli.currency);
    let (operation, amount, options) = cli.command.into_request()?;

    let stdout = io::stdout();
    let mut writer = ResponseWriter::new(stdout.lock());

    if cli.dry_run {
        let request =
            OperationRequest::build(&config, operation, amount, &options).into_diagnostic()?;
        writer
            .write_dry_run(&request, config.base_url())
            .into_diagnostic()?;
        return Ok(());
    }

    let transport: TransportBox = Box::new(HttpTransport::new().into_diagnostic()?);
    let gateway = NetaxeptGateway::new(config, transport);
    let request = gateway
        .prepare(operation, amount, &options)
        .into_diagnostic()?;
    let response = gateway.execute(request).await.into_diagnostic()?;

    writer.write_response(&response).into_diagnostic()?;

    Ok(())
}
