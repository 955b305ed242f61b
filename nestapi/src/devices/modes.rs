use crate::error::NestError;

/// Value of `target_temperature_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemperatureMode {
    Heat,
    Cool,
    Off,
    /// Heat-cool mode. Reported by the device but not settable here.
    Range,
    Other(String),
}

impl TemperatureMode {
    /// Interprets a mode as reported in the status. Unknown values are kept.
    pub fn from_wire(mode: &str) -> Self {
        match mode {
            "heat" => TemperatureMode::Heat,
            "cool" => TemperatureMode::Cool,
            "off" => TemperatureMode::Off,
            "range" => TemperatureMode::Range,
            other => TemperatureMode::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TemperatureMode::Heat => "heat",
            TemperatureMode::Cool => "cool",
            TemperatureMode::Off => "off",
            TemperatureMode::Range => "range",
            TemperatureMode::Other(other) => other,
        }
    }

    /// Only heat, cool and off may be sent to the device.
    pub fn is_settable(&self) -> bool {
        matches!(
            self,
            TemperatureMode::Heat | TemperatureMode::Cool | TemperatureMode::Off
        )
    }
}

impl std::fmt::Display for TemperatureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parses a mode that is meant to be set, so anything but heat, cool and off
/// is rejected.
impl std::str::FromStr for TemperatureMode {
    type Err = NestError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match TemperatureMode::from_wire(&input.to_lowercase()) {
            mode if mode.is_settable() => Ok(mode),
            _ => Err(NestError::InvalidMode(input.to_string())),
        }
    }
}

/// Value of `fan_mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanMode {
    Auto,
    On,
}

impl std::fmt::Display for FanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FanMode::Auto => write!(f, "auto"),
            FanMode::On => write!(f, "on"),
        }
    }
}

impl std::str::FromStr for FanMode {
    type Err = NestError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_lowercase().as_str() {
            "auto" => Ok(FanMode::Auto),
            "on" => Ok(FanMode::On),
            _ => Err(NestError::InvalidFanMode(input.to_string())),
        }
    }
}
