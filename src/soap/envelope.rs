use quick_xml::escape::escape;
use serde_json::{Map, Value};

use crate::operations::Operation;

pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const GSX_GLOBAL_NS: &str = "http://gsxws.apple.com/elements/global";

const REDACTED_FIELDS: &[&str] = &["password"];

/// One outbound GSX request: the operation plus its nested request body.
#[derive(Debug, Clone)]
pub struct RequestEnvelope {
    pub operation: Operation,
    pub body: Map<String, Value>,
}

impl RequestEnvelope {
    pub fn new(operation: Operation, body: Map<String, Value>) -> Self {
        Self { operation, body }
    }

    /// Body with the session block followed by the operation payload.
    pub fn with_session(
        operation: Operation,
        session_id: &str,
        payload: Option<Map<String, Value>>,
    ) -> Self {
        let mut session = Map::new();
        session.insert("userSessionId".to_string(), Value::String(session_id.to_string()));

        let mut body = Map::new();
        body.insert("userSession".to_string(), Value::Object(session));
        if let (Some(key), Some(payload)) = (operation.payload_key(), payload) {
            body.insert(key.to_string(), Value::Object(payload));
        }

        Self { operation, body }
    }

    pub fn session_id(&self) -> Option<&str> {
        self.body
            .get("userSession")
            .and_then(|s| s.get("userSessionId"))
            .and_then(Value::as_str)
    }

    /// Operation payload sub-map, if this operation carries one.
    pub fn payload(&self) -> Option<&Map<String, Value>> {
        self.operation
            .payload_key()
            .and_then(|key| self.body.get(key))
            .and_then(Value::as_object)
    }

    pub fn to_xml(&self) -> String {
        self.render(&self.body)
    }

    /// Same document with credential values masked, for logging.
    pub fn to_redacted_xml(&self) -> String {
        let mut body = self.body.clone();
        redact(&mut body);
        self.render(&body)
    }

    fn render(&self, body: &Map<String, Value>) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push_str(&format!(
            r#"<soapenv:Envelope xmlns:soapenv="{}" xmlns:glob="{}">"#,
            SOAP_ENV_NS, GSX_GLOBAL_NS
        ));
        xml.push_str("<soapenv:Header/>");
        xml.push_str("<soapenv:Body>");

        let name = self.operation.name();
        xml.push_str(&format!("<glob:{}>", name));
        write_value(
            &mut xml,
            self.operation.request_element(),
            &Value::Object(body.clone()),
        );
        xml.push_str(&format!("</glob:{}>", name));

        xml.push_str("</soapenv:Body>");
        xml.push_str("</soapenv:Envelope>");
        xml
    }
}

fn redact(map: &mut Map<String, Value>) {
    for (key, value) in map.iter_mut() {
        if REDACTED_FIELDS.contains(&key.as_str()) {
            *value = Value::String("***".to_string());
        } else if let Value::Object(child) = value {
            redact(child);
        }
    }
}

/// Maps become child elements and lists repeat the element name.
fn write_value(xml: &mut String, name: &str, value: &Value) {
    match value {
        Value::Array(items) => {
            for item in items {
                write_value(xml, name, item);
            }
        }
        Value::Object(map) => {
            xml.push_str(&format!("<{}>", name));
            for (key, child) in map {
                write_value(xml, key, child);
            }
            xml.push_str(&format!("</{}>", name));
        }
        Value::Null => xml.push_str(&format!("<{}/>", name)),
        Value::String(text) => {
            xml.push_str(&format!("<{}>{}</{}>", name, escape(text.as_str()), name));
        }
        other => xml.push_str(&format!("<{}>{}</{}>", name, other, name)),
    }
}
