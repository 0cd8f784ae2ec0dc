//! Subcommand handlers

pub mod auth;
pub mod navigation;

use gatehouse_core::App;

use crate::Command;

pub async fn run(app: &App, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Register {
            name,
            email,
            password,
            password_confirmation,
        } => {
            let confirmation = password_confirmation.unwrap_or_else(|| password.clone());
            auth::register(app, &name, &email, &password, &confirmation).await
        }
        Command::Login { email, password } => auth::login(app, &email, &password).await,
        Command::Logout => auth::logout(app).await,
        Command::Whoami => auth::whoami(app).await,
        Command::Navigate { path } => navigation::navigate(app, &path).await,
    }
}

pub(crate) fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
