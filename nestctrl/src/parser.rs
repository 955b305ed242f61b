use nestapi::TemperatureMode;

/// `--temperature` without a value or with "show" prints, a number sets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum TemperatureArg {
    Show,
    Set(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ModeArg {
    Show,
    Set(TemperatureMode),
}

pub(crate) const SHOW: &str = "show";

pub(crate) fn parse_temperature(arg: &str) -> Option<TemperatureArg> {
    if arg == SHOW {
        return Some(TemperatureArg::Show);
    }
    arg.trim()
        .parse::<f64>()
        .ok()
        .filter(|val| val.is_finite())
        .map(TemperatureArg::Set)
}

pub(crate) fn parse_mode(arg: &str) -> Result<ModeArg, String> {
    if arg == SHOW {
        return Ok(ModeArg::Show);
    }
    arg.parse()
        .map(ModeArg::Set)
        .map_err(|_| format!("{:?} is not one of heat, cool, off, show", arg))
}

pub(crate) fn parse_seconds(arg: &str) -> Result<std::time::Duration, String> {
    arg.parse::<u64>()
        .map(std::time::Duration::from_secs)
        .map_err(|_| "Not a valid number of seconds".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperatures() {
        assert_eq!(parse_temperature("show"), Some(TemperatureArg::Show));
        assert_eq!(parse_temperature("20.5"), Some(TemperatureArg::Set(20.5)));
        assert_eq!(parse_temperature("-3"), Some(TemperatureArg::Set(-3.0)));
        assert_eq!(parse_temperature("warm"), None);
        assert_eq!(parse_temperature("NaN"), None);
    }

    #[test]
    fn modes() {
        assert_eq!(parse_mode("show"), Ok(ModeArg::Show));
        assert_eq!(parse_mode("heat"), Ok(ModeArg::Set(TemperatureMode::Heat)));
        assert!(parse_mode("range").is_err());
    }

    #[test]
    fn seconds() {
        assert_eq!(parse_seconds("10").unwrap().as_secs(), 10);
        assert!(parse_seconds("ten").is_err());
    }
}
