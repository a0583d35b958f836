//! Application layer orchestrating gateway calls.
//!
//! `NetaxeptGateway` is the entry point: one method per payment lifecycle
//! action, each running build → send → parse → classify.

pub mod gateway;
