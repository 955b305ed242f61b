use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum NestError {
    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Login rejected with status `{0}`. Are username and password correct?")]
    LoginRejected(StatusCode),

    #[error("malformed login response: `{0}`")]
    MalformedLogin(String),

    #[error("Not logged in. Call login first.")]
    NotLoggedIn,

    #[error("status request failed with status `{0}`")]
    StatusRequest(StatusCode),

    #[error("malformed status response: `{0}`")]
    MalformedStatus(String),

    #[error("cannot resolve device: `{0}`")]
    DeviceResolution(String),

    #[error("no status available, call refresh_status first")]
    NoStatus,

    #[error("no `{field}` for device {serial:?} in status")]
    MissingData { serial: String, field: String },

    #[error("{call} failed with status `{status}`")]
    CommandRejected {
        call: &'static str,
        status: StatusCode,
    },

    #[error("invalid temperature mode {0:?}, expected one of heat, cool, off")]
    InvalidMode(String),

    #[error("invalid target temperature {0}, must be a finite number")]
    InvalidTemperature(f64),

    #[error("invalid fan mode {0:?}, expected one of auto, on")]
    InvalidFanMode(String),

    #[error("invalid TLS version {0:?}, expected one of 1.0, 1.1, 1.2, 1.3")]
    InvalidTlsVersion(String),
}

/// Coarse category of a [`NestError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Credentials rejected or the login response was not understood.
    Auth,
    /// Status fetch failed or the status did not have the expected layout.
    Session,
    /// The status does not contain the requested device or field.
    Data,
    /// A set operation was rejected by the server.
    Command,
    /// Invalid input that was rejected before anything was sent.
    Input,
    /// Connection level failures.
    Transport,
}

impl NestError {
    pub fn kind(&self) -> ErrorKind {
        use NestError::*;
        match self {
            LoginRejected(_) | MalformedLogin(_) => ErrorKind::Auth,
            NotLoggedIn | StatusRequest(_) | MalformedStatus(_) | DeviceResolution(_) | NoStatus => {
                ErrorKind::Session
            }
            MissingData { .. } => ErrorKind::Data,
            CommandRejected { .. } => ErrorKind::Command,
            InvalidMode(_) | InvalidTemperature(_) | InvalidFanMode(_) | InvalidTlsVersion(_) => {
                ErrorKind::Input
            }
            Transport(_) => ErrorKind::Transport,
        }
    }
}

pub type Result<T> = std::result::Result<T, NestError>;
