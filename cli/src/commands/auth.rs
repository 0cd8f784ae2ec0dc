use gatehouse_core::{App, FetchUserOutcome, LogoutOutcome};
use serde_json::json;

use super::print_json;

pub async fn register(
    app: &App,
    name: &str,
    email: &str,
    password: &str,
    password_confirmation: &str,
) -> anyhow::Result<()> {
    let result = app
        .session()
        .register(name, email, password, password_confirmation)
        .await?;
    print_json(&result)
}

pub async fn login(app: &App, email: &str, password: &str) -> anyhow::Result<()> {
    let (response, navigation) = app.sign_in(email, password).await?;
    print_json(&json!({
        "user": response.user,
        "location": navigation.location.path,
    }))
}

pub async fn logout(app: &App) -> anyhow::Result<()> {
    let (outcome, navigation) = app.sign_out().await?;
    let backend = match &outcome {
        LogoutOutcome::Acknowledged => "acknowledged".to_string(),
        LogoutOutcome::BackendFailed(e) => format!("failed: {e}"),
    };
    print_json(&json!({
        "backend": backend,
        "location": navigation.location.path,
    }))
}

pub async fn whoami(app: &App) -> anyhow::Result<()> {
    match app.session().refresh_user().await {
        FetchUserOutcome::Fetched(user) => print_json(user.as_json()),
        FetchUserOutcome::NoSession => anyhow::bail!("not logged in"),
        FetchUserOutcome::Invalidated(e) => anyhow::bail!("session expired ({e}); log in again"),
        FetchUserOutcome::Retryable(e) => anyhow::bail!("could not reach the API: {e}"),
        FetchUserOutcome::Superseded => anyhow::bail!("session changed while fetching the user"),
    }
}
