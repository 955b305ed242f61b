use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::devices::{serial_from_device_id, TemperatureMode};
use crate::error::{NestError, Result};

type Fields = Map<String, Value>;

// response of /v2/mobile/user.<userid>

/// Everything the status endpoint reports for an account, at the time of the
/// request.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusSnapshot {
    /// serial -> setpoint, current temperature, mode, ...
    shared: BTreeMap<String, Fields>,
    /// serial -> humidity, fan mode, ...
    device: BTreeMap<String, Fields>,
    /// structure id -> structure
    structure: BTreeMap<String, Structure>,
}

/// A home, with the ids (`device.<serial>`) of its thermostats.
#[derive(Debug, Clone, Deserialize)]
pub struct Structure {
    #[serde(default)]
    pub devices: Vec<String>,
}

impl StatusSnapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| NestError::MalformedStatus(err.to_string()))
    }

    pub fn structure_ids(&self) -> impl Iterator<Item = &str> {
        self.structure.keys().map(String::as_str)
    }

    pub fn structure(&self, id: &str) -> Option<&Structure> {
        self.structure.get(id)
    }

    /// Finds the serial of the `index`th device of a structure. Without an
    /// explicit structure id the account must have exactly one structure.
    pub fn resolve_serial(&self, structure: Option<&str>, index: usize) -> Result<String> {
        let (id, found) = match structure {
            Some(id) => match self.structure(id) {
                Some(found) => (id, found),
                None => {
                    return Err(NestError::DeviceResolution(format!(
                        "no structure {:?} in account",
                        id
                    )))
                }
            },
            None => {
                let mut all = self.structure.iter();
                match (all.next(), all.next()) {
                    (Some((id, found)), None) => (id.as_str(), found),
                    (None, _) => {
                        return Err(NestError::DeviceResolution(
                            "account has no structures".to_string(),
                        ))
                    }
                    (Some(_), Some(_)) => {
                        return Err(NestError::DeviceResolution(format!(
                            "account has {} structures, select one of {}",
                            self.structure.len(),
                            self.structure_ids().collect::<Vec<_>>().join(", ")
                        )))
                    }
                }
            }
        };

        let device_id = found.devices.get(index).ok_or_else(|| {
            NestError::DeviceResolution(format!(
                "structure {:?} has {} devices, no index {}",
                id,
                found.devices.len(),
                index
            ))
        })?;
        serial_from_device_id(device_id)
    }

    pub fn shared(&self, serial: &str) -> Result<&Fields> {
        self.shared.get(serial).ok_or_else(|| missing(serial, "shared"))
    }

    pub fn device(&self, serial: &str) -> Result<&Fields> {
        self.device.get(serial).ok_or_else(|| missing(serial, "device"))
    }

    pub fn current_temperature(&self, serial: &str) -> Result<f64> {
        number(self.shared(serial)?, serial, "current_temperature")
    }

    pub fn target_temperature(&self, serial: &str) -> Result<f64> {
        number(self.shared(serial)?, serial, "target_temperature")
    }

    pub fn humidity(&self, serial: &str) -> Result<f64> {
        number(self.device(serial)?, serial, "current_humidity")
    }

    pub fn temperature_mode(&self, serial: &str) -> Result<TemperatureMode> {
        self.shared(serial)?
            .get("target_temperature_type")
            .and_then(Value::as_str)
            .map(TemperatureMode::from_wire)
            .ok_or_else(|| missing(serial, "target_temperature_type"))
    }

    /// All `shared` and `device` fields of a device, sorted by key. Where both
    /// have the same key the `device` value wins.
    pub fn device_fields(&self, serial: &str) -> Result<BTreeMap<String, Value>> {
        let mut fields: BTreeMap<String, Value> = self
            .shared(serial)?
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        fields.extend(
            self.device(serial)?
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        Ok(fields)
    }
}

fn missing(serial: &str, field: &str) -> NestError {
    NestError::MissingData {
        serial: serial.to_string(),
        field: field.to_string(),
    }
}

fn number(fields: &Fields, serial: &str, field: &str) -> Result<f64> {
    fields
        .get(field)
        .and_then(Value::as_f64)
        .ok_or_else(|| missing(serial, field))
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn snapshot(value: Value) -> StatusSnapshot {
        StatusSnapshot::from_json(&value.to_string()).unwrap()
    }

    fn example() -> StatusSnapshot {
        snapshot(json!({
            "shared": {
                "123ABC": {
                    "current_temperature": 21.5,
                    "target_temperature": 20.0,
                    "target_temperature_type": "heat",
                    "hvac_heater_state": false
                }
            },
            "device": {
                "123ABC": {
                    "current_humidity": 45,
                    "fan_mode": "auto"
                }
            },
            "structure": {
                "S1": { "devices": ["device.123ABC", "device.456DEF"] }
            },
            "user": {}
        }))
    }

    #[test]
    fn reads_values() {
        let status = example();
        assert_eq!(status.current_temperature("123ABC").unwrap(), 21.5);
        assert_eq!(status.target_temperature("123ABC").unwrap(), 20.0);
        assert_eq!(status.humidity("123ABC").unwrap(), 45.0);
        assert_eq!(
            status.temperature_mode("123ABC").unwrap(),
            TemperatureMode::Heat
        );
    }

    #[test]
    fn unknown_serial() {
        let status = example();
        let err = status.current_temperature("456DEF").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Data);
        assert_eq!(status.humidity("nope").unwrap_err().kind(), ErrorKind::Data);
    }

    #[test]
    fn resolve_by_index() {
        let status = example();
        assert_eq!(status.resolve_serial(None, 0).unwrap(), "123ABC");
        assert_eq!(status.resolve_serial(None, 1).unwrap(), "456DEF");
        assert_eq!(status.resolve_serial(Some("S1"), 1).unwrap(), "456DEF");
        assert!(status.resolve_serial(None, 2).is_err());
        assert!(status.resolve_serial(Some("S2"), 0).is_err());
    }

    #[test]
    fn multiple_structures_need_a_selection() {
        let status = snapshot(json!({
            "shared": {},
            "device": {},
            "structure": {
                "S1": { "devices": ["device.AAA"] },
                "S2": { "devices": ["device.BBB"] }
            }
        }));
        assert_eq!(status.structure_ids().collect::<Vec<_>>(), vec!["S1", "S2"]);
        assert_eq!(status.structure("S2").unwrap().devices, vec!["device.BBB"]);
        assert!(status.structure("S3").is_none());

        let err = status.resolve_serial(None, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Session);
        assert_eq!(
            err.to_string(),
            "cannot resolve device: `account has 2 structures, select one of S1, S2`"
        );
        assert_eq!(status.resolve_serial(Some("S2"), 0).unwrap(), "BBB");
    }

    #[test]
    fn missing_sections_are_malformed() {
        let err = StatusSnapshot::from_json(r#"{"shared": {}, "device": {}}"#).unwrap_err();
        assert!(matches!(err, NestError::MalformedStatus(_)));
        assert!(StatusSnapshot::from_json("not json").is_err());
    }

    #[test]
    fn merged_fields_are_sorted() {
        let status = example();
        let fields = status.device_fields("123ABC").unwrap();
        let keys: Vec<_> = fields.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "current_humidity",
                "current_temperature",
                "fan_mode",
                "hvac_heater_state",
                "target_temperature",
                "target_temperature_type"
            ]
        );
    }
}
