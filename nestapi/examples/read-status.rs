//! Shows how to read the thermostat state and change the target temperature.

fn main() -> nestapi::Result<()> {
    let user = "";
    let password = "";
    let mut client = nestapi::NestClient::new(user, password)?;

    client.login()?;
    client.refresh_status()?;

    let current = client.current_temperature()?;
    println!(
        "{:.1}°C, {}% humidity, mode {}",
        current,
        client.humidity()?,
        client.temperature_mode()?
    );

    // If it is colder than 19°C, heat up a bit
    if current < 19.0 {
        client.set_temperature(current + 1.0)?;
    }
    Ok(())
}
