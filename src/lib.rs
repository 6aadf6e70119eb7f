//! Client for Apple's GSX (Global Service Exchange) SOAP web service.
//!
//! [`GsxClient`] validates lookups locally, keeps the GSX session, posts SOAP
//! envelopes and hands back the response as plain `serde_json` values or
//! JSON text.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod normalize;
pub mod operations;
pub mod output;
pub mod soap;
pub mod validation;

pub use client::GsxClient;
pub use config::{ApiMode, ClientConfig, Region, Settings};
pub use error::{Error, Result};
pub use normalize::Normalize;
pub use operations::{Operation, PartsQuery, WarrantyQuery};
pub use output::{format_output, Output, ReturnFormat};
