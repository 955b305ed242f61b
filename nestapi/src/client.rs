use std::collections::BTreeMap;

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use crate::api;
use crate::devices::{DeviceSelector, FanMode, TemperatureMode};
use crate::error::{NestError, Result};
use crate::status::StatusSnapshot;
use crate::transport::TransportConfig;

/// Nest account username and password.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl ToString, password: impl ToString) -> Self {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// What a successful login returns. There is no expiry handling, to get a new
/// session log in again.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub transport_url: String,
    pub access_token: String,
    pub user_id: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("transport_url", &self.transport_url)
            .field("access_token", &"<redacted>")
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// The main interface to read and control one thermostat.
///
/// Call [`NestClient::login`] and [`NestClient::refresh_status`] before using
/// the getters. Setters only need a session and a known serial.
pub struct NestClient {
    credentials: Credentials,
    selector: DeviceSelector,
    http: Client,
    login_url: String,
    session: Option<Session>,
    serial: Option<String>,
    status: Option<StatusSnapshot>,
}

impl NestClient {
    /// Client for the first thermostat of an account with a single home.
    pub fn new(user: impl ToString, password: impl ToString) -> Result<Self> {
        Self::with_config(
            Credentials::new(user, password),
            DeviceSelector::default(),
            TransportConfig::default(),
        )
    }

    pub fn with_config(
        credentials: Credentials,
        selector: DeviceSelector,
        config: TransportConfig,
    ) -> Result<Self> {
        let serial = match &selector {
            DeviceSelector::Serial(serial) => Some(serial.clone()),
            DeviceSelector::Index { .. } => None,
        };
        Ok(NestClient {
            credentials,
            selector,
            http: config.build_client()?,
            login_url: config.login_url,
            session: None,
            serial,
            status: None,
        })
    }

    pub fn login(&mut self) -> Result<&Session> {
        let session = api::login(&self.http, &self.login_url, &self.credentials)?;
        debug!("[nest] logged in, transport {}", session.transport_url);
        Ok(self.session.insert(session))
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Serial of the selected device. Known after construction if selected by
    /// serial, otherwise after the first [`NestClient::refresh_status`].
    pub fn serial(&self) -> Option<&str> {
        self.serial.as_deref()
    }

    /// Fetches the current status and resolves the selected device if that
    /// hasn't happened yet.
    pub fn refresh_status(&mut self) -> Result<&StatusSnapshot> {
        let session = self.session.as_ref().ok_or(NestError::NotLoggedIn)?;
        let status = api::fetch_status(&self.http, session)?;

        if self.serial.is_none() {
            if let DeviceSelector::Index { structure, index } = &self.selector {
                let serial = status.resolve_serial(structure.as_deref(), *index)?;
                debug!("[nest] device {} resolved to serial {}", index, serial);
                self.serial = Some(serial);
            }
        }

        Ok(self.status.insert(status))
    }

    pub fn status(&self) -> Option<&StatusSnapshot> {
        self.status.as_ref()
    }

    pub fn current_temperature(&self) -> Result<f64> {
        let (status, serial) = self.status_and_serial()?;
        status.current_temperature(serial)
    }

    pub fn humidity(&self) -> Result<f64> {
        let (status, serial) = self.status_and_serial()?;
        status.humidity(serial)
    }

    pub fn temperature_mode(&self) -> Result<TemperatureMode> {
        let (status, serial) = self.status_and_serial()?;
        status.temperature_mode(serial)
    }

    pub fn device_fields(&self) -> Result<BTreeMap<String, Value>> {
        let (status, serial) = self.status_and_serial()?;
        status.device_fields(serial)
    }

    /// Sets the target temperature, always in celsius.
    pub fn set_temperature(&self, celsius: f64) -> Result<()> {
        if !celsius.is_finite() {
            return Err(NestError::InvalidTemperature(celsius));
        }
        self.send(api::Command::SetTemperature(celsius))
    }

    pub fn set_temperature_mode(&self, mode: TemperatureMode) -> Result<()> {
        if !mode.is_settable() {
            return Err(NestError::InvalidMode(mode.to_string()));
        }
        self.send(api::Command::SetTemperatureMode(mode))
    }

    pub fn set_fan(&self, mode: FanMode) -> Result<()> {
        self.send(api::Command::SetFan(mode))
    }

    // -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-

    fn status_and_serial(&self) -> Result<(&StatusSnapshot, &str)> {
        let status = self.status.as_ref().ok_or(NestError::NoStatus)?;
        let serial = self.serial.as_deref().ok_or(NestError::NoStatus)?;
        Ok((status, serial))
    }

    fn send(&self, cmd: api::Command) -> Result<()> {
        let session = self.session.as_ref().ok_or(NestError::NotLoggedIn)?;
        let serial = self.serial.as_deref().ok_or_else(|| {
            NestError::DeviceResolution("device not resolved yet, call refresh_status first".to_string())
        })?;
        api::send_command(&self.http, session, serial, &cmd)
    }
}
