use gatehouse_core::App;

use super::print_json;

/// Validate the stored session first, the way a page load would, then
/// navigate through the guard.
pub async fn navigate(app: &App, path: &str) -> anyhow::Result<()> {
    app.initialize().await;
    let navigation = app.navigate(path)?;
    print_json(&serde_json::to_value(&navigation)?)
}
