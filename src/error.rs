use thiserror::Error;

/// Everything that can go wrong talking to GSX.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration field is missing or outside its allowed values.
    #[error("invalid configuration for `{field}`: {reason}")]
    Configuration { field: &'static str, reason: String },

    /// A required call parameter is missing or empty.
    #[error("missing required parameter `{0}`")]
    Validation(String),

    /// A parameter is present but fails its pattern or whitelist check.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidParameter { field: String, reason: String },

    /// An operation needed a session and none could be established.
    #[error("no active GSX session")]
    NoSession {
        #[source]
        cause: Option<Box<Error>>,
    },

    /// The remote call failed. `code` and `message` are the remote fault verbatim.
    #[error("GSX transport error {code}: {message}")]
    Transport { code: String, message: String },

    #[error("unsupported output format `{0}`")]
    UnsupportedFormat(String),

    /// The response parsed but did not contain the expected element.
    #[error("unexpected GSX response: missing {0}")]
    UnexpectedResponse(String),
}

impl Error {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Configuration {
            field,
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let code = err
            .status()
            .map(|status| status.as_u16().to_string())
            .unwrap_or_else(|| "HTTP".to_string());
        Error::Transport {
            code,
            message: err.to_string(),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Transport {
            code: "XML".to_string(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
