use std::io::{self, Write};

use nestapi::Credentials;

/// Uses the given user and password, asks for the missing ones. The password
/// is read without echo.
pub(crate) fn credentials(
    user: Option<String>,
    password: Option<String>,
) -> io::Result<Credentials> {
    let user = match user {
        Some(user) => user,
        None => read_line("Username: ")?,
    };
    let password = match password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ")?,
    };
    Ok(Credentials::new(user, password))
}

fn read_line(prompt: &str) -> io::Result<String> {
    let mut stdout = io::stdout();
    stdout.write_all(prompt.as_bytes())?;
    stdout.flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
