//! Network URL constants and environment selection.

use std::str::FromStr;
use std::time::Duration;

use crate::error::SdkError;

/// Sandbox REST API base URL.
pub const SANDBOX_API_URL: &str = "https://api-sandbox.enclave.market";

/// Production REST API base URL.
pub const PROD_API_URL: &str = "https://api.enclave.market";

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = SANDBOX_API_URL;

/// Delay between connectivity probe attempts.
pub const PROBE_INTERVAL: Duration = Duration::from_secs(2);

/// Deployment the client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    #[default]
    Sandbox,
    Prod,
}

impl Environment {
    pub fn api_url(&self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_API_URL,
            Self::Prod => PROD_API_URL,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Prod => "prod",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Environment {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "prod" => Ok(Self::Prod),
            _ => Err(SdkError::Validation(format!("unknown env: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_str() {
        assert_eq!("sandbox".parse::<Environment>().unwrap(), Environment::Sandbox);
        assert_eq!("PROD".parse::<Environment>().unwrap(), Environment::Prod);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_environment_urls() {
        assert_eq!(Environment::Sandbox.api_url(), "https://api-sandbox.enclave.market");
        assert_eq!(Environment::Prod.api_url(), "https://api.enclave.market");
        assert_eq!(Environment::default().api_url(), DEFAULT_API_URL);
    }
}
