#![allow(dead_code)]

use netaxept::application::gateway::NetaxeptGateway;
use netaxept::config::{Credentials, GatewayConfig};
use netaxept::domain::transaction::PaymentOptions;
use netaxept::infrastructure::in_memory::CannedTransport;
use std::path::Path;

pub const TRANSACTION_ID: &str = "b127f98b77f741fca6bb49981ee6e846";

pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read fixture {}: {e}", path.display()))
}

pub fn test_gateway(transport: CannedTransport) -> NetaxeptGateway {
    let credentials = Credentials::new("login", "password").unwrap();
    NetaxeptGateway::new(GatewayConfig::new(credentials, true), Box::new(transport))
}

/// Gateway answering its first call with the named fixture.
pub fn gateway_replying(name: &str) -> (NetaxeptGateway, CannedTransport) {
    let transport = CannedTransport::replying(fixture(name));
    (test_gateway(transport.clone()), transport)
}

pub fn existing_transaction() -> PaymentOptions {
    PaymentOptions::new().with_transaction_id(TRANSACTION_ID)
}
