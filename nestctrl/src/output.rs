use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use nestapi::TemperatureMode;
use serde_json::Value;

use crate::units::Unit;

const DUMP_KEY_WIDTH: usize = 37;

/// What `--all` and `--csv` print.
#[derive(Debug, Clone)]
pub(crate) struct Reading {
    pub(crate) celsius: f64,
    pub(crate) humidity: f64,
    pub(crate) mode: TemperatureMode,
}

pub(crate) fn temperature(celsius: f64, unit: Unit) -> String {
    format!("{:.1}° {}", unit.from_celsius(celsius), unit)
}

pub(crate) fn humidity(humidity: f64) -> String {
    format!("{}% humidity", humidity.trunc() as i64)
}

fn mode_label(mode: &TemperatureMode) -> &str {
    match mode {
        TemperatureMode::Heat => "heating",
        TemperatureMode::Cool => "cooling",
        other => other.as_str(),
    }
}

pub(crate) fn summary(reading: &Reading, unit: Unit) -> String {
    format!(
        "{} @ {} ({})",
        temperature(reading.celsius, unit),
        humidity(reading.humidity),
        mode_label(&reading.mode)
    )
}

/// One line for appending to a log file: timestamp, temperature, humidity.
pub(crate) fn csv(reading: &Reading, unit: Unit, now: DateTime<Local>) -> String {
    format!(
        "{},{:.1},{} ({})",
        now.format("%x %X"),
        unit.from_celsius(reading.celsius),
        reading.humidity.trunc() as i64,
        mode_label(&reading.mode)
    )
}

pub(crate) fn dump(fields: &BTreeMap<String, Value>) -> Vec<String> {
    fields
        .iter()
        .map(|(key, value)| {
            let dots = ".".repeat(DUMP_KEY_WIDTH.saturating_sub(key.len()));
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            format!("{}{}: {}", key, dots, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn reading() -> Reading {
        Reading {
            celsius: 20.0,
            humidity: 45.7,
            mode: TemperatureMode::Heat,
        }
    }

    #[test]
    fn temperatures() {
        assert_eq!(temperature(21.54, Unit::Celsius), "21.5° C");
        assert_eq!(temperature(20.0, Unit::Fahrenheit), "68.0° F");
    }

    #[test]
    fn summary_line() {
        assert_eq!(summary(&reading(), Unit::Celsius), "20.0° C @ 45% humidity (heating)");
        let off = Reading {
            mode: TemperatureMode::Off,
            ..reading()
        };
        assert_eq!(summary(&off, Unit::Fahrenheit), "68.0° F @ 45% humidity (off)");
    }

    #[test]
    fn csv_line() {
        let now = Local.with_ymd_and_hms(2026, 10, 19, 14, 3, 5).unwrap();
        let cool = Reading {
            mode: TemperatureMode::Cool,
            ..reading()
        };
        assert_eq!(
            csv(&cool, Unit::Celsius, now),
            "10/19/26 14:03:05,20.0,45 (cooling)"
        );
    }

    #[test]
    fn dump_lines() {
        let mut fields = BTreeMap::new();
        fields.insert("fan_mode".to_string(), json!("auto"));
        fields.insert("current_temperature".to_string(), json!(21.5));
        fields.insert("can_heat".to_string(), json!(true));

        let lines = dump(&fields);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], format!("can_heat{}: true", ".".repeat(29)));
        assert_eq!(lines[1], format!("current_temperature{}: 21.5", ".".repeat(18)));
        assert_eq!(lines[2], format!("fan_mode{}: auto", ".".repeat(29)));
        assert!(lines.iter().all(|line| line.find(':') == Some(DUMP_KEY_WIDTH)));
    }
}
