use std::process::exit;
use std::time::Duration;

use clap::Parser;
use nestapi::transport::{DEFAULT_CLIENT_IDENTITY, DEFAULT_LOGIN_URL};
use nestapi::{FanMode, TlsVersion};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

mod output;
mod parser;
mod prompt;
mod thermostat;
mod units;

use parser::{ModeArg, TemperatureArg};

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub(crate) struct Args {
    #[clap(short, long, env = "NEST_USER", help = "username for nest.com")]
    user: Option<String>,

    #[clap(
        short,
        long,
        env = "NEST_PASSWORD",
        hide_env_values = true,
        help = "password for nest.com, asked for if missing"
    )]
    password: Option<String>,

    #[clap(short, long, help = "serial number of the thermostat to talk to")]
    serial: Option<String>,

    #[clap(
        short,
        long,
        default_value_t = 0,
        help = "index of the thermostat to talk to, if no serial is given"
    )]
    index: usize,

    #[clap(long, help = "structure (home) id, needed with --index if the account has several")]
    structure: Option<String>,

    #[clap(short = 'y', long, help = "print the humidity")]
    humidity: bool,

    #[clap(
        short,
        long,
        num_args = 0..=1,
        default_missing_value = parser::SHOW,
        allow_negative_numbers = true,
        help = "print or set the temperature"
    )]
    temperature: Option<String>,

    #[clap(
        short,
        long,
        num_args = 0..=1,
        default_missing_value = parser::SHOW,
        value_parser = parser::parse_mode,
        help = "print or set the mode: heat, cool, off, show"
    )]
    mode: Option<ModeArg>,

    #[clap(long, help = "set the fan mode: auto, on")]
    fan: Option<FanMode>,

    #[clap(short, long, help = "temperatures in fahrenheit (default is celsius)")]
    fahrenheit: bool,

    #[clap(short, long, help = "print temperature, humidity and mode")]
    all: bool,

    #[clap(
        short,
        long,
        requires = "all",
        help = "with --all, print as one CSV line for appending to a log file"
    )]
    csv: bool,

    #[clap(short, long, help = "dump all device info")]
    dump: bool,

    #[clap(long, value_parser = parser::parse_seconds, help = "request timeout in seconds")]
    timeout: Option<Duration>,

    #[clap(long, help = "minimum TLS version: 1.0, 1.1, 1.2, 1.3")]
    tls_min_version: Option<TlsVersion>,

    #[clap(
        long,
        env = "NEST_CLIENT_IDENTITY",
        default_value = DEFAULT_CLIENT_IDENTITY,
        help = "user agent to send, must be one the service accepts"
    )]
    client_identity: String,

    #[clap(long, env = "NEST_LOGIN_URL", default_value = DEFAULT_LOGIN_URL, hide = true)]
    login_url: String,

    #[clap(short, long, action)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let log_level = if verbose {
        "info,nestapi=debug,reqwest=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::builder().parse_lossy(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn temperature_arg(args: &Args) -> Result<Option<TemperatureArg>, &'static str> {
    args.temperature
        .as_deref()
        .map(|arg| parser::parse_temperature(arg).ok_or("temperature must be a number or \"show\""))
        .transpose()
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-

fn main() {
    dotenv::dotenv().ok();

    let args = Args::parse();
    init_logging(args.verbose);

    // checked before anything is sent
    let temperature = match temperature_arg(&args) {
        Ok(temperature) => temperature,
        Err(err) => {
            println!("Error: {}", err);
            exit(1);
        }
    };

    if let Err(err) = thermostat::run(&args, temperature) {
        eprintln!("Error: {:#}", err);
        exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nestapi::{DeviceSelector, TemperatureMode};

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("nestctrl").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_without_values_show() {
        let args = parse(&["-u", "alice", "-p", "secret", "-t", "-m"]);
        assert_eq!(args.temperature.as_deref(), Some("show"));
        assert_eq!(args.mode, Some(ModeArg::Show));
        assert!(!args.fahrenheit);
    }

    #[test]
    fn set_values() {
        let args = parse(&["-t", "-2.5", "-m", "cool", "--fan", "on", "-f"]);
        assert_eq!(args.temperature.as_deref(), Some("-2.5"));
        assert_eq!(args.mode, Some(ModeArg::Set(TemperatureMode::Cool)));
        assert_eq!(args.fan, Some(FanMode::On));
        assert!(args.fahrenheit);
    }

    #[test]
    fn invalid_mode_is_a_usage_error() {
        assert!(Args::try_parse_from(["nestctrl", "-m", "range"]).is_err());
        assert!(Args::try_parse_from(["nestctrl", "--fan", "high"]).is_err());
    }

    #[test]
    fn temperature_values() {
        assert_eq!(temperature_arg(&parse(&[])), Ok(None));
        assert_eq!(
            temperature_arg(&parse(&["-t"])),
            Ok(Some(TemperatureArg::Show))
        );
        assert_eq!(
            temperature_arg(&parse(&["-t", "68"])),
            Ok(Some(TemperatureArg::Set(68.0)))
        );
        assert!(temperature_arg(&parse(&["-t", "warm"])).is_err());
        assert!(temperature_arg(&parse(&["-t", "inf"])).is_err());
    }

    #[test]
    fn csv_needs_all() {
        assert!(Args::try_parse_from(["nestctrl", "-c"]).is_err());
        let args = parse(&["-a", "-c"]);
        assert!(args.all && args.csv);
    }

    #[test]
    fn device_selection() {
        assert_eq!(parse(&[]).selector(), DeviceSelector::index(0));
        assert_eq!(
            parse(&["-s", "09AA01AC", "-i", "2"]).selector(),
            DeviceSelector::serial("09AA01AC")
        );
        assert_eq!(
            parse(&["-i", "1", "--structure", "S2"]).selector(),
            DeviceSelector::index_in("S2", 1)
        );
    }

    #[test]
    fn transport_options() {
        let transport = parse(&["--timeout", "5", "--tls-min-version", "1.2"]).transport();
        assert_eq!(transport.timeout, Some(Duration::from_secs(5)));
        assert_eq!(transport.tls_min_version, Some(TlsVersion::Tls1_2));
    }
}
