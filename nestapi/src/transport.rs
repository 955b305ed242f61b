use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{NestError, Result};

pub const DEFAULT_LOGIN_URL: &str = "https://home.nest.com/user/login";

/// User agent of the Nest iOS app.
pub const DEFAULT_CLIENT_IDENTITY: &str = "Nest/2.1.3 CFNetwork/548.0.4";

/// Minimum TLS protocol version accepted for connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsVersion {
    Tls1_0,
    Tls1_1,
    Tls1_2,
    Tls1_3,
}

impl From<TlsVersion> for reqwest::tls::Version {
    fn from(version: TlsVersion) -> Self {
        match version {
            TlsVersion::Tls1_0 => reqwest::tls::Version::TLS_1_0,
            TlsVersion::Tls1_1 => reqwest::tls::Version::TLS_1_1,
            TlsVersion::Tls1_2 => reqwest::tls::Version::TLS_1_2,
            TlsVersion::Tls1_3 => reqwest::tls::Version::TLS_1_3,
        }
    }
}

impl std::str::FromStr for TlsVersion {
    type Err = NestError;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        match input.to_lowercase().trim_start_matches("tls").trim_start_matches('v') {
            "1.0" | "1" => Ok(TlsVersion::Tls1_0),
            "1.1" => Ok(TlsVersion::Tls1_1),
            "1.2" => Ok(TlsVersion::Tls1_2),
            "1.3" => Ok(TlsVersion::Tls1_3),
            _ => Err(NestError::InvalidTlsVersion(input.to_string())),
        }
    }
}

/// How to reach the Nest service.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Endpoint of the credential exchange.
    pub login_url: String,
    /// User agent sent with every request. The service only answers requests
    /// from user agents it knows, currently the ones of the official apps. If
    /// requests start failing with 403 this probably needs an update.
    pub client_identity: String,
    /// Request timeout. `None` keeps the default of the http client.
    pub timeout: Option<Duration>,
    pub tls_min_version: Option<TlsVersion>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            login_url: DEFAULT_LOGIN_URL.to_string(),
            client_identity: DEFAULT_CLIENT_IDENTITY.to_string(),
            timeout: None,
            tls_min_version: None,
        }
    }
}

impl TransportConfig {
    pub fn build_client(&self) -> Result<Client> {
        let mut builder = Client::builder().user_agent(self.client_identity.as_str());
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(version) = self.tls_min_version {
            builder = builder.min_tls_version(version.into());
        }
        Ok(builder.build()?)
    }
}
