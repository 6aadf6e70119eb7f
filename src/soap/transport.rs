use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::soap::envelope::RequestEnvelope;
use crate::soap::response::{parse_body, XmlNode};

const SOAP_ACTION: &str = "SOAPAction";

/// Posts GSX envelopes to one endpoint.
#[derive(Clone)]
pub struct SoapTransport {
    endpoint: String,
    http_client: Client,
}

impl SoapTransport {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint,
            http_client,
        })
    }

    /// Sends the envelope and returns the first element of the response Body.
    pub async fn call(&self, envelope: &RequestEnvelope) -> Result<XmlNode> {
        let action = envelope.operation.name();
        let soap_request = envelope.to_xml();

        tracing::trace!(
            "Sending {} to {}: {}",
            action,
            self.endpoint,
            envelope.to_redacted_xml()
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header(SOAP_ACTION, action)
            .body(soap_request)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        tracing::trace!("Received {} response ({}): {}", action, status, response_text);

        if !status.is_success() {
            tracing::warn!("GSX returned error status {} for {}", status, action);
        }

        // Faults arrive with a 500 status, so parse before judging the status.
        // Anything that is neither a result nor a fault is reported with the
        // HTTP status and raw body.
        match parse_body(&response_text) {
            Ok(content) if status.is_success() => Ok(content),
            Err(Error::Transport { code, message }) if code != "XML" => {
                Err(Error::Transport { code, message })
            }
            _ => Err(Error::Transport {
                code: status.as_u16().to_string(),
                message: response_text,
            }),
        }
    }
}
