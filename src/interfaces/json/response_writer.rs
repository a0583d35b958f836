use crate::domain::request::OperationRequest;
use crate::domain::response::GatewayResponse;
use crate::error::{GatewayError, Result};
use serde_json::json;
use std::io::Write;

/// Renders gateway results as pretty-printed JSON.
pub struct ResponseWriter<W: Write> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_response(&mut self, response: &GatewayResponse) -> Result<()> {
        self.write_json(&serde_json::to_value(response).map_err(to_io)?)
    }

    /// Writes a request that was built but not sent, with the token masked.
    pub fn write_dry_run(&mut self, request: &OperationRequest, base_url: &str) -> Result<()> {
        self.write_json(&json!({
            "operation": request.operation,
            "url": request.redacted_url(base_url),
        }))
    }

    fn write_json(&mut self, value: &serde_json::Value) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, value).map_err(to_io)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

fn to_io(err: serde_json::Error) -> GatewayError {
    GatewayError::Io(err.into())
}
