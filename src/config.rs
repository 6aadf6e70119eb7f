use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::output::ReturnFormat;
use crate::validation::tables;

/// Raw client configuration, as read from YAML or the environment.
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct ClientConfig {
    #[serde(alias = "apiMode", alias = "apimode", default = "default_api_mode")]
    pub api_mode: String,
    #[serde(alias = "regionCode", alias = "regioncode", default)]
    pub region_code: String,
    #[serde(alias = "userId", alias = "userid", default)]
    pub user_id: String,
    #[serde(default)]
    pub password: String,
    #[serde(alias = "serviceAccountNo", alias = "serviceaccountno", default)]
    pub service_account_no: String,
    #[serde(alias = "languageCode", alias = "languagecode", default)]
    pub language_code: Option<String>,
    #[serde(alias = "userTimeZone", alias = "usertimezone", default)]
    pub user_time_zone: Option<String>,
    #[serde(default)]
    pub wsdl: Option<String>,
    #[serde(alias = "returnFormat", alias = "returnformat", default)]
    pub return_format: Option<String>,
    #[serde(alias = "timeoutSecs", alias = "timeoutsecs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(alias = "partImageBase", alias = "partimagebase", default)]
    pub part_image_base: Option<String>,
}

fn default_api_mode() -> String {
    "production".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

pub const DEFAULT_PART_IMAGE_BASE: &str = "https://km.support.apple.com/kb/imageService.jsp";

impl ClientConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::config("file", format!("failed to read configuration file: {}", e))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            Error::config("file", format!("failed to parse YAML configuration: {}", e))
        })
    }

    /// Loads an optional file and layers `GSX_*` environment variables on top.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(true));
        }

        builder
            .add_source(::config::Environment::with_prefix("GSX"))
            .build()
            .and_then(|settings| settings.try_deserialize::<ClientConfig>())
            .map_err(|e| Error::config("file", e.to_string()))
    }

    /// Checks every field in order and stops at the first bad one.
    pub fn validate(&self) -> Result<Settings> {
        let mode = self.api_mode.parse::<ApiMode>()?;
        let region = self.region_code.parse::<Region>()?;

        let user_id = require("userId", &self.user_id)?;
        let password = require("password", &self.password)?;
        let service_account_no = require("serviceAccountNo", &self.service_account_no)?;

        let language_code = match non_empty(&self.language_code) {
            None => tables::DEFAULT_LANGUAGE.to_string(),
            Some(code) => {
                let code = code.to_lowercase();
                if !tables::contains(tables::LANGUAGE_CODES, &code) {
                    return Err(Error::config(
                        "languageCode",
                        format!("`{}` is not a GSX language code", code),
                    ));
                }
                code
            }
        };

        let user_time_zone = match non_empty(&self.user_time_zone) {
            None => tables::DEFAULT_TIME_ZONE.to_string(),
            Some(zone) => {
                let zone = zone.to_uppercase();
                if !tables::contains(tables::TIME_ZONES, &zone) {
                    return Err(Error::config(
                        "userTimeZone",
                        format!("`{}` is not a GSX time zone", zone),
                    ));
                }
                zone
            }
        };

        let return_format = match non_empty(&self.return_format) {
            None => ReturnFormat::Native,
            Some(selector) => selector.parse()?,
        };

        if self.timeout_secs == 0 {
            return Err(Error::config("timeoutSecs", "must be greater than zero"));
        }

        Ok(Settings {
            mode,
            region,
            credentials: Credentials {
                user_id,
                password,
                service_account_no,
                language_code,
                user_time_zone,
            },
            wsdl: non_empty(&self.wsdl).map(str::to_string),
            return_format,
            timeout: Duration::from_secs(self.timeout_secs),
            part_image_base: non_empty(&self.part_image_base)
                .unwrap_or(DEFAULT_PART_IMAGE_BASE)
                .to_string(),
        })
    }
}

fn require(field: &'static str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::config(field, "must not be empty"));
    }
    Ok(value.to_string())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// GSX environment the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMode {
    It,
    Ut,
    Production,
}

impl ApiMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ApiMode::It => "it",
            ApiMode::Ut => "ut",
            ApiMode::Production => "production",
        }
    }
}

impl std::str::FromStr for ApiMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "it" => Ok(ApiMode::It),
            "ut" => Ok(ApiMode::Ut),
            "production" => Ok(ApiMode::Production),
            other => Err(Error::config(
                "apiMode",
                format!("`{}` is not one of {:?}", other, tables::API_MODES),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Am,
    Emea,
    Apac,
    La,
}

impl Region {
    pub fn as_str(self) -> &'static str {
        match self {
            Region::Am => "am",
            Region::Emea => "emea",
            Region::Apac => "apac",
            Region::La => "la",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "am" => Ok(Region::Am),
            "emea" => Ok(Region::Emea),
            "apac" => Ok(Region::Apac),
            "la" => Ok(Region::La),
            "" => Err(Error::config("regionCode", "must not be empty")),
            other => Err(Error::config(
                "regionCode",
                format!("`{}` is not one of {:?}", other, tables::REGION_CODES),
            )),
        }
    }
}

/// Values sent with the Authenticate call.
#[derive(Clone)]
pub struct Credentials {
    pub user_id: String,
    pub password: String,
    pub service_account_no: String,
    pub language_code: String,
    pub user_time_zone: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("password", &"***")
            .field("service_account_no", &self.service_account_no)
            .field("language_code", &self.language_code)
            .field("user_time_zone", &self.user_time_zone)
            .finish()
    }
}

/// A fully validated configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub mode: ApiMode,
    pub region: Region,
    pub credentials: Credentials,
    pub wsdl: Option<String>,
    pub return_format: ReturnFormat,
    pub timeout: Duration,
    pub part_image_base: String,
}
