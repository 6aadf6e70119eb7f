use serde_json::{Map, Value};

use crate::config::{ClientConfig, Settings};
use crate::endpoint;
use crate::error::{Error, Result};
use crate::normalize::into_list;
use crate::operations::parts::enrich_part_images;
use crate::operations::product::product_model_payload;
use crate::operations::repair::repair_lookup_payload;
use crate::operations::{Operation, PartsQuery, WarrantyQuery};
use crate::output::Output;
use crate::soap::{RequestEnvelope, SoapTransport};

/// GSX client façade.
///
/// Holds one session at a time. Calls take `&mut self`, so one instance
/// serves one logical session; wrap it in a mutex to share it.
pub struct GsxClient {
    settings: Settings,
    transport: Option<SoapTransport>,
    session_id: Option<String>,
}

impl GsxClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let settings = config.validate()?;
        Ok(Self::with_settings(settings))
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            transport: None,
            session_id: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn endpoint_url(&self) -> String {
        endpoint::endpoint_url(
            self.settings.mode,
            self.settings.region,
            self.settings.wsdl.as_deref(),
        )
    }

    pub fn wsdl_url(&self) -> String {
        endpoint::wsdl_url(self.settings.mode, self.settings.region)
    }

    /// Logs in with the configured credentials and keeps the session id.
    pub async fn authenticate(&mut self) -> Result<String> {
        let credentials = &self.settings.credentials;
        let mut body = Map::new();
        body.insert("userId".to_string(), credentials.user_id.clone().into());
        body.insert("password".to_string(), credentials.password.clone().into());
        body.insert(
            "serviceAccountNo".to_string(),
            credentials.service_account_no.clone().into(),
        );
        body.insert("languageCode".to_string(), credentials.language_code.clone().into());
        body.insert("userTimeZone".to_string(), credentials.user_time_zone.clone().into());

        let result = self.dispatch(Operation::Authenticate, Some(body)).await?;
        let session_id = result
            .as_str()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::UnexpectedResponse("userSessionId".to_string()))?
            .to_string();

        tracing::info!(
            "Authenticated with GSX as {} ({})",
            self.settings.credentials.user_id,
            self.settings.region
        );
        self.session_id = Some(session_id.clone());
        Ok(session_id)
    }

    /// Ends the current session. Returns whether GSX reported `OK`.
    pub async fn logout(&mut self) -> Result<bool> {
        if self.session_id.is_none() {
            return Err(Error::NoSession { cause: None });
        }

        let outcome = self.dispatch(Operation::Logout, None).await?;
        let success = outcome.as_str() == Some("OK");
        if success {
            tracing::info!("Logged out of GSX");
            self.session_id = None;
        } else {
            tracing::warn!("GSX logout returned {}", outcome);
        }
        Ok(success)
    }

    pub async fn warranty_status(&mut self, query: &WarrantyQuery) -> Result<Output> {
        let payload = query.to_payload()?;
        let result = self.dispatch(Operation::WarrantyStatus, Some(payload)).await?;
        self.settings.return_format.format(result)
    }

    pub async fn product_model(&mut self, serial_number: &str) -> Result<Output> {
        let payload = product_model_payload(serial_number)?;
        let result = self.dispatch(Operation::FetchProductModel, Some(payload)).await?;
        self.settings.return_format.format(result)
    }

    /// Looks up parts by a serial number, part number or EEE code token, or
    /// by a map of search fields.
    pub async fn parts_lookup(&mut self, query: impl Into<PartsQuery>) -> Result<Output> {
        let payload = query.into().into_payload()?;
        let result = self.dispatch(Operation::PartsLookup, Some(payload)).await?;

        let mut parts = into_list(result);
        enrich_part_images(&mut parts, &self.settings.part_image_base);
        tracing::debug!("PartsLookup returned {} parts", parts.len());

        self.settings.return_format.format(Value::Array(parts))
    }

    pub async fn repair_lookup(&mut self, params: &Map<String, Value>) -> Result<Output> {
        let payload = repair_lookup_payload(params)?;
        let result = self.dispatch(Operation::RepairLookup, Some(payload)).await?;
        self.settings.return_format.format(Value::Array(into_list(result)))
    }

    /// Authenticates if no session is held.
    async fn ensure_session(&mut self) -> Result<String> {
        if let Some(session_id) = &self.session_id {
            return Ok(session_id.clone());
        }

        tracing::debug!("No GSX session, authenticating");
        Box::pin(self.authenticate())
            .await
            .map_err(|cause| Error::NoSession {
                cause: Some(Box::new(cause)),
            })
    }

    /// Builds the envelope for `operation`, sends it and unwraps the result.
    async fn dispatch(
        &mut self,
        operation: Operation,
        payload: Option<Map<String, Value>>,
    ) -> Result<Value> {
        let envelope = if operation.requires_session() {
            let session_id = self.ensure_session().await?;
            RequestEnvelope::with_session(operation, &session_id, payload)
        } else {
            RequestEnvelope::new(operation, payload.unwrap_or_default())
        };

        tracing::debug!("Calling GSX {}", operation.name());
        let content = self.transport()?.call(&envelope).await?;
        operation.extract(&content)
    }

    fn transport(&mut self) -> Result<&SoapTransport> {
        let transport = match self.transport.take() {
            Some(transport) => transport,
            None => SoapTransport::new(self.endpoint_url(), self.settings.timeout)?,
        };
        Ok(self.transport.insert(transport))
    }
}
