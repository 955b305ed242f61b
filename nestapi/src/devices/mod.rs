use crate::error::{NestError, Result};

mod modes;
pub use modes::{FanMode, TemperatureMode};

/// Which thermostat of the account to talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceSelector {
    /// A known serial number.
    Serial(String),
    /// Position of the device in the device list of a structure. If
    /// `structure` is `None` the account must have exactly one structure.
    Index {
        structure: Option<String>,
        index: usize,
    },
}

impl Default for DeviceSelector {
    fn default() -> Self {
        DeviceSelector::Index {
            structure: None,
            index: 0,
        }
    }
}

impl DeviceSelector {
    pub fn serial(serial: impl ToString) -> Self {
        DeviceSelector::Serial(serial.to_string())
    }

    pub fn index(index: usize) -> Self {
        DeviceSelector::Index {
            structure: None,
            index,
        }
    }

    pub fn index_in(structure: impl ToString, index: usize) -> Self {
        DeviceSelector::Index {
            structure: Some(structure.to_string()),
            index,
        }
    }
}

/// Device ids in a structure look like `device.<serial>`.
pub(crate) fn serial_from_device_id(device_id: &str) -> Result<String> {
    match device_id.split('.').nth(1) {
        Some(serial) if !serial.is_empty() => Ok(serial.to_string()),
        _ => Err(NestError::DeviceResolution(format!(
            "device id {:?} does not contain a serial",
            device_id
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_is_second_segment() {
        assert_eq!(serial_from_device_id("device.09AA01AC1234").unwrap(), "09AA01AC1234");
        assert_eq!(serial_from_device_id("device.ABC.extra").unwrap(), "ABC");
    }

    #[test]
    fn device_id_without_serial() {
        assert!(serial_from_device_id("device").is_err());
        assert!(serial_from_device_id("device.").is_err());
    }
}
