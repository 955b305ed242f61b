use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::client::{Credentials, Session};
use crate::devices::{FanMode, TemperatureMode};
use crate::error::{NestError, Result};
use crate::status::StatusSnapshot;

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-

// response of /user/login

#[derive(Debug, Deserialize)]
struct LoginResponse {
    urls: Option<LoginUrls>,
    access_token: Option<String>,
    userid: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginUrls {
    transport_url: Option<String>,
}

impl LoginResponse {
    fn into_session(self) -> Result<Session> {
        let transport_url = self
            .urls
            .and_then(|urls| urls.transport_url)
            .ok_or_else(|| missing_login_field("urls.transport_url"))?;
        let access_token = self
            .access_token
            .ok_or_else(|| missing_login_field("access_token"))?;
        let user_id = self.userid.ok_or_else(|| missing_login_field("userid"))?;
        Ok(Session {
            transport_url,
            access_token,
            user_id,
        })
    }
}

fn missing_login_field(field: &str) -> NestError {
    NestError::MalformedLogin(format!("missing {}", field))
}

/// Exchanges username and password for a [`Session`].
pub(crate) fn login(http: &Client, login_url: &str, credentials: &Credentials) -> Result<Session> {
    let response = http
        .post(login_url)
        .form(&[
            ("username", credentials.username()),
            ("password", credentials.password()),
        ])
        .send()?;
    let status = response.status();
    debug!("[nest api] login status: {:?}", status);
    if !status.is_success() {
        return Err(NestError::LoginRejected(status));
    }

    let body = response.text()?;
    let login: LoginResponse =
        serde_json::from_str(&body).map_err(|err| NestError::MalformedLogin(err.to_string()))?;
    login.into_session()
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-

/// Joins an endpoint path onto the transport url of the session.
fn endpoint(session: &Session, path: &str) -> String {
    format!("{}/{}", session.transport_url.trim_end_matches('/'), path)
}

/// Headers the mobile API expects on every call after login. The token is
/// sent with the "Basic" scheme even though it is not a user:password pair.
fn authorized(request: RequestBuilder, session: &Session) -> RequestBuilder {
    request
        .header("Authorization", format!("Basic {}", session.access_token))
        .header("X-nl-user-id", session.user_id.as_str())
        .header("X-nl-protocol-version", "1")
}

/// Fetches the state of all structures and devices of the account.
pub(crate) fn fetch_status(http: &Client, session: &Session) -> Result<StatusSnapshot> {
    let url = endpoint(session, &format!("v2/mobile/user.{}", session.user_id));
    let response = authorized(http.get(url), session).send()?;
    let status = response.status();
    debug!("[nest api] status request: {:?}", status);
    if !status.is_success() {
        return Err(NestError::StatusRequest(status));
    }
    StatusSnapshot::from_json(&response.text()?)
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Command {
    SetTemperature(f64),
    SetTemperatureMode(TemperatureMode),
    SetFan(FanMode),
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::SetTemperature(_) => "set temperature",
            Command::SetTemperatureMode(_) => "set temperature mode",
            Command::SetFan(_) => "set fan",
        }
    }

    /// Which part of the device state the command changes.
    fn bucket(&self) -> &'static str {
        match self {
            Command::SetTemperature(_) | Command::SetTemperatureMode(_) => "shared",
            Command::SetFan(_) => "device",
        }
    }

    fn payload(&self) -> Value {
        match self {
            Command::SetTemperature(celsius) => json!({
                "target_change_pending": true,
                "target_temperature": celsius,
            }),
            Command::SetTemperatureMode(mode) => json!({
                "target_temperature_type": mode.as_str(),
            }),
            Command::SetFan(state) => json!({
                "fan_mode": state.to_string(),
            }),
        }
    }
}

/// Sends a change to `/v2/put/<bucket>.<serial>`. The response is not read.
pub(crate) fn send_command(
    http: &Client,
    session: &Session,
    serial: &str,
    cmd: &Command,
) -> Result<()> {
    let url = endpoint(session, &format!("v2/put/{}.{}", cmd.bucket(), serial));
    let response = authorized(http.post(url), session)
        .json(&cmd.payload())
        .send()?;
    let status = response.status();
    debug!(
        "[nest api] {} status: {:?} {:?}",
        cmd.name(),
        status,
        status.canonical_reason().unwrap_or_default()
    );
    if !status.is_success() {
        return Err(NestError::CommandRejected {
            call: cmd.name(),
            status,
        });
    }
    Ok(())
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-
