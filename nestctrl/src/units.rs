/// Unit temperatures are shown and entered in. The API always uses celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Unit {
    Celsius,
    Fahrenheit,
}

impl Unit {
    pub(crate) fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            Unit::Celsius => celsius,
            Unit::Fahrenheit => celsius_to_fahrenheit(celsius),
        }
    }

    pub(crate) fn to_celsius(self, value: f64) -> f64 {
        match self {
            Unit::Celsius => value,
            Unit::Fahrenheit => fahrenheit_to_celsius(value),
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Celsius => write!(f, "C"),
            Unit::Fahrenheit => write!(f, "F"),
        }
    }
}

pub(crate) fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    9.0 * celsius / 5.0 + 32.0
}

pub(crate) fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) / 1.8
}
