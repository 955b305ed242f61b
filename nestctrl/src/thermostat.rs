use anyhow::Context;
use nestapi::{DeviceSelector, NestClient, TransportConfig};
use tracing::info;

use crate::output::{self, Reading};
use crate::parser::{ModeArg, TemperatureArg};
use crate::units::Unit;
use crate::Args;

impl Args {
    fn unit(&self) -> Unit {
        if self.fahrenheit {
            Unit::Fahrenheit
        } else {
            Unit::Celsius
        }
    }

    pub(crate) fn selector(&self) -> DeviceSelector {
        match &self.serial {
            Some(serial) => DeviceSelector::serial(serial),
            None => DeviceSelector::Index {
                structure: self.structure.clone(),
                index: self.index,
            },
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            login_url: self.login_url.clone(),
            client_identity: self.client_identity.clone(),
            timeout: self.timeout,
            tls_min_version: self.tls_min_version,
        }
    }
}

/// Logs in, fetches the status and then prints or changes what `args` asks
/// for.
pub(crate) fn run(args: &Args, temperature: Option<TemperatureArg>) -> anyhow::Result<()> {
    let unit = args.unit();
    let credentials = crate::prompt::credentials(args.user.clone(), args.password.clone())
        .context("cannot read credentials")?;

    let mut client = NestClient::with_config(credentials, args.selector(), args.transport())?;
    client.login().context("login to nest.com failed")?;
    client
        .refresh_status()
        .context("cannot fetch thermostat status")?;
    info!("using thermostat {}", client.serial().unwrap_or_default());

    if args.dump {
        for line in output::dump(&client.device_fields()?) {
            println!("{}", line);
        }
        return Ok(());
    }

    if args.all {
        let reading = Reading {
            celsius: client.current_temperature()?,
            humidity: client.humidity()?,
            mode: client.temperature_mode()?,
        };
        if args.csv {
            println!("{}", output::csv(&reading, unit, chrono::Local::now()));
        } else {
            println!("{}", output::summary(&reading, unit));
        }
        return Ok(());
    }

    match &args.mode {
        Some(ModeArg::Show) => println!("{}", client.temperature_mode()?),
        Some(ModeArg::Set(mode)) => {
            client.set_temperature_mode(mode.clone())?;
            info!("mode set to {}", mode);
        }
        None => {}
    }

    match temperature {
        Some(TemperatureArg::Show) => {
            println!(
                "{}",
                output::temperature(client.current_temperature()?, unit)
            );
        }
        Some(TemperatureArg::Set(value)) => {
            let celsius = unit.to_celsius(value);
            client.set_temperature(celsius)?;
            info!("target temperature set to {:.1}°C", celsius);
        }
        None => {}
    }

    if let Some(fan) = args.fan {
        client.set_fan(fan)?;
        info!("fan set to {}", fan);
    }

    if args.humidity {
        println!("{}", output::humidity(client.humidity()?));
    }

    Ok(())
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-
