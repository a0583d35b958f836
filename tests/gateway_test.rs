mod common;

use common::{TRANSACTION_ID, existing_transaction, gateway_replying};
use netaxept::domain::money::Amount;
use netaxept::domain::response::{ERROR_AUTHORIZATION, Outcome};
use netaxept::domain::transaction::{Operation, PaymentOptions};
use rust_decimal_macros::dec;

fn money() -> Amount {
    dec!(1.00).try_into().unwrap()
}

#[tokio::test]
async fn test_successful_register() {
    let (gateway, transport) = gateway_replying("register_success.xml");

    let response = gateway
        .register(money(), &PaymentOptions::new().with_order_id("1"))
        .await
        .unwrap();

    assert!(response.is_success());
    assert!(response.is_test());
    assert_eq!(response.operation(), Operation::Register);
    assert_eq!(response.authorization(), Some(TRANSACTION_ID));
    let terminal_url = response.terminal_url().expect("terminal url should exist");
    assert!(terminal_url.starts_with("https://epayment-test.bbs.no/terminal/default.aspx?"));
    assert!(terminal_url.contains("MerchantID=login"));
    assert!(terminal_url.contains(&format!("TransactionID={TRANSACTION_ID}")));

    let requests = transport.requests().await;
    let sent = &requests[0];
    assert!(sent.contains("orderNumber=1"));
    assert!(sent.contains("amount=100"));
    assert!(sent.contains("currencyCode=NOK"));
    assert!(sent.ends_with("operation=REGISTER"));
}

#[tokio::test]
async fn test_successful_auth() {
    let (gateway, _) = gateway_replying("auth_success.xml");
    let response = gateway.authorize(&existing_transaction()).await.unwrap();
    assert!(response.is_success());
    assert_eq!(response.authorization(), Some(TRANSACTION_ID));
    assert_eq!(response.raw().child_text("AuthorizationId"), Some("064392"));
}

#[tokio::test]
async fn test_failed_auth() {
    let (gateway, _) = gateway_replying("error.xml");
    let response = gateway.authorize(&existing_transaction()).await.unwrap();
    assert!(!response.is_success());
    assert_eq!(response.outcome(), Outcome::Exception);
    assert_eq!(response.message(), Some("Authentication failed (TEST)"));
    assert_eq!(response.authorization(), Some(ERROR_AUTHORIZATION));
}

#[tokio::test]
async fn test_successful_capture() {
    let (gateway, transport) = gateway_replying("capture_success.xml");
    let response = gateway
        .capture(money(), &existing_transaction())
        .await
        .unwrap();
    assert!(response.is_success());
    assert_eq!(response.authorization(), Some(TRANSACTION_ID));
    assert!(transport.requests().await[0].contains("transactionAmount=100"));
}

#[tokio::test]
async fn test_failed_capture() {
    let (gateway, _) = gateway_replying("error.xml");
    let response = gateway
        .capture(money(), &existing_transaction())
        .await
        .unwrap();
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_successful_purchase() {
    let (gateway, transport) = gateway_replying("capture_success.xml");
    let response = gateway.purchase(&existing_transaction()).await.unwrap();
    assert!(response.is_success());
    assert_eq!(response.authorization(), Some(TRANSACTION_ID));
    assert!(transport.requests().await[0].ends_with("operation=SALE"));
}

#[tokio::test]
async fn test_failed_purchase() {
    let (gateway, _) = gateway_replying("error.xml");
    let response = gateway.purchase(&existing_transaction()).await.unwrap();
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_successful_credit() {
    let (gateway, transport) = gateway_replying("credit_success.xml");
    let response = gateway
        .credit(money(), &existing_transaction())
        .await
        .unwrap();
    assert!(response.is_success());
    assert_eq!(response.authorization(), Some(TRANSACTION_ID));

    let requests = transport.requests().await;
    let sent = &requests[0];
    assert!(sent.contains("merchantId=login"));
    assert!(sent.contains(&format!("transactionId={TRANSACTION_ID}")));
    assert!(sent.ends_with("operation=CREDIT"));
}

#[tokio::test]
async fn test_failed_credit() {
    let (gateway, _) = gateway_replying("credit_failed.xml");
    let response = gateway
        .credit(money(), &existing_transaction())
        .await
        .unwrap();
    assert!(!response.is_success());
    assert_eq!(response.outcome(), Outcome::Declined);
    assert_eq!(response.authorization(), Some(TRANSACTION_ID));
}

#[tokio::test]
async fn test_successful_void() {
    let (gateway, transport) = gateway_replying("void_success.xml");
    let response = gateway.void(&existing_transaction()).await.unwrap();
    assert!(response.is_success());
    assert_eq!(response.authorization(), Some(TRANSACTION_ID));
    assert!(transport.requests().await[0].ends_with("operation=ANNUL"));
}

#[tokio::test]
async fn test_failed_void() {
    let (gateway, _) = gateway_replying("error.xml");
    let response = gateway.void(&existing_transaction()).await.unwrap();
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_query_payment_info() {
    let (gateway, transport) = gateway_replying("query_payment_info.xml");
    let response = gateway.query(&existing_transaction()).await.unwrap();

    assert!(response.is_success());
    assert_eq!(response.authorization(), Some(TRANSACTION_ID));
    assert_eq!(response.raw().container, "PaymentInfo");
    let summary = response.raw().get("Summary").unwrap();
    assert_eq!(summary.child_text("AmountCaptured"), Some("100"));
    assert!(transport.requests().await[0].contains("/Netaxept/Query.aspx?"));
}
