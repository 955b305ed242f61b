//! Library for talking to Nest thermostats through the unofficial API that
//! the Nest mobile app uses (`home.nest.com`).
//!
//! The API is undocumented. Requests have to look like they come from the
//! mobile app, see [`TransportConfig::client_identity`].
//!
//! It is used by the `nestctrl` utility.
//!
//! ## Example
//!
//! ### Read the temperature and set a new target
//!
//! ```ignore
//! let mut client = nestapi::NestClient::new(&user, &password)?;
//!
//! // Get a session (transport url + access token)
//! client.login()?;
//!
//! // Fetch the state of the first thermostat
//! client.refresh_status()?;
//! println!("{:.1}°C", client.current_temperature()?);
//!
//! client.set_temperature(20.5)?;
//! ```

pub(crate) mod api;
pub(crate) mod client;
pub mod devices;
pub mod error;
pub mod status;
pub mod transport;

pub use client::{Credentials, NestClient, Session};
pub use devices::{DeviceSelector, FanMode, TemperatureMode};
pub use error::{ErrorKind, NestError, Result};
pub use status::{StatusSnapshot, Structure};
pub use transport::{TlsVersion, TransportConfig};
