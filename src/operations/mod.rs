pub mod parts;
pub mod product;
pub mod repair;
pub mod warranty;

pub use parts::PartsQuery;
pub use warranty::WarrantyQuery;

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::normalize::Normalize;
use crate::soap::XmlNode;
use crate::validation::tables;

/// Remote GSX operations this client calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Authenticate,
    Logout,
    WarrantyStatus,
    FetchProductModel,
    PartsLookup,
    RepairLookup,
}

/// Element names that frame one operation's request and response.
#[derive(Debug)]
pub struct OperationFrame {
    pub name: &'static str,
    pub request_element: &'static str,
    pub payload_key: Option<&'static str>,
    pub response_element: &'static str,
    pub result_key: &'static str,
    pub returns_list: bool,
}

const OPERATIONS: [OperationFrame; 6] = [
    OperationFrame {
        name: "Authenticate",
        request_element: "AuthenticateRequest",
        payload_key: None,
        response_element: "AuthenticateResponse",
        result_key: "userSessionId",
        returns_list: false,
    },
    OperationFrame {
        name: "Logout",
        request_element: "LogoutRequest",
        payload_key: None,
        response_element: "LogoutResponse",
        result_key: "outCome",
        returns_list: false,
    },
    OperationFrame {
        name: "WarrantyStatus",
        request_element: "WarrantyStatusRequest",
        payload_key: Some("unitDetail"),
        response_element: "WarrantyStatusResponse",
        result_key: "warrantyDetailInfo",
        returns_list: false,
    },
    OperationFrame {
        name: "FetchProductModel",
        request_element: "FetchProductModelRequest",
        payload_key: Some("productModelRequest"),
        response_element: "FetchProductModelResponse",
        result_key: "productModelResponse",
        returns_list: false,
    },
    OperationFrame {
        name: "PartsLookup",
        request_element: "PartsLookupRequest",
        payload_key: Some("lookupRequestData"),
        response_element: "PartsLookupResponse",
        result_key: "parts",
        returns_list: true,
    },
    OperationFrame {
        name: "RepairLookup",
        request_element: "RepairLookupRequest",
        payload_key: Some("lookupRequestData"),
        response_element: "RepairLookupResponse",
        result_key: "lookupResponseData",
        returns_list: true,
    },
];

impl Operation {
    pub fn frame(self) -> &'static OperationFrame {
        &OPERATIONS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.frame().name
    }

    pub fn request_element(self) -> &'static str {
        self.frame().request_element
    }

    pub fn payload_key(self) -> Option<&'static str> {
        self.frame().payload_key
    }

    pub fn requires_session(self) -> bool {
        self != Operation::Authenticate
    }

    /// Pulls the caller-relevant sub-tree out of the Body content.
    ///
    /// GSX wraps results twice (`ns:XResponse/XResponse/result`); a response
    /// with only the outer wrapper is accepted too.
    pub fn extract(self, content: &XmlNode) -> Result<Value> {
        let frame = self.frame();
        let response = content.child(frame.response_element).unwrap_or(content);

        match response.normalize() {
            Value::Object(mut map) => match map.remove(frame.result_key) {
                Some(value) => Ok(value),
                None if frame.returns_list => Ok(Value::Array(Vec::new())),
                None => Err(Error::UnexpectedResponse(format!(
                    "{}/{}",
                    frame.response_element, frame.result_key
                ))),
            },
            _ if frame.returns_list => Ok(Value::Array(Vec::new())),
            _ => Err(Error::UnexpectedResponse(frame.response_element.to_string())),
        }
    }
}

/// Scalar parameter as trimmed text.
pub(crate) fn text(field: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        _ => Err(Error::invalid(field, "expected a text value")),
    }
}

pub(crate) fn parse_gsx_date(field: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, tables::GSX_DATE_FORMAT)
        .map_err(|_| Error::invalid(field, format!("`{}` is not a MM/DD/YY date", raw)))
}
