use std::env;
use std::fmt::{self, Display};
use std::num::ParseFloatError;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        decode_error(err)
    }
}

impl From<ParseFloatError> for Error {
    fn from(_: ParseFloatError) -> Self {
        config_error()
    }
}

impl Error {
    /// Domain errors are 100 and up, everything below is infrastructure.
    pub fn is_domain_error(&self) -> bool {
        self.code >= 100
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 101,
        message: "invalid input".into(),
    }
}

pub fn provider_error(status: &str) -> Error {
    Error {
        code: 102,
        message: format!("directions request failed due to {}", status),
    }
}

pub fn geolocation_unavailable_error() -> Error {
    Error {
        code: 103,
        message: "geolocation unavailable".into(),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn config_error() -> Error {
    Error {
        code: 2,
        message: "configuration error".into(),
    }
}

pub fn reqwest_error(_: reqwest::Error) -> Error {
    Error {
        code: 3,
        message: "reqwest error".into(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 4,
        message: "upstream error".into(),
    }
}

pub fn decode_error(_: serde_json::Error) -> Error {
    Error {
        code: 5,
        message: "decode error".into(),
    }
}

pub fn timeout_error() -> Error {
    Error {
        code: 6,
        message: "request timed out".into(),
    }
}

#[test]
fn provider_error_carries_status() {
    let err = provider_error("ZERO_RESULTS");

    assert!(err.is_domain_error());
    assert_eq!(err.message, "directions request failed due to ZERO_RESULTS");
}

#[test]
fn infrastructure_errors_are_not_domain_errors() {
    assert!(!upstream_error().is_domain_error());
    assert!(!timeout_error().is_domain_error());
    assert!(!env_var_error(env::VarError::NotPresent).is_domain_error());
}
