//! Client adapter for the Netaxept hosted-payment API.
//!
//! Requests are plain HTTPS GETs with query parameters; responses are XML
//! documents whose shape depends on the operation and its outcome.
//! [`NetaxeptGateway`](application::gateway::NetaxeptGateway) turns each of
//! them into a single [`GatewayResponse`](domain::response::GatewayResponse).

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
