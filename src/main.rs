mod domain;
mod clients;
mod config;
mod controller;
mod forms;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod user_actor;

use tracing::{info, warn, Instrument};
use crate::app_system::{setup_tracing, UserSystem};
use crate::config::SystemConfig;
use crate::controller::ActionResult;
use crate::forms::UserForm;

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = SystemConfig::from_env();
    info!(?config, "Starting user directory");

    let system = UserSystem::new(&config);
    let controller = &system.controller;

    let span = tracing::info_span!("seed_users");
    async {
        for form in [
            UserForm::new(Some(1), "Alice", "alice@x.com"),
            UserForm::new(Some(2), "Bob", "bob@y.com"),
            UserForm::new(Some(3), "", "nobody@z.org"),
        ] {
            match controller.create(form).await.map_err(|e| e.to_string())? {
                ActionResult::RedirectToIndex => info!("Form accepted"),
                ActionResult::Invalid { model_state, .. } => {
                    warn!(errors = ?model_state.errors(), "Form rejected")
                }
                other => warn!(?other, "Unexpected create outcome"),
            }
        }
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    if let ActionResult::View(users) = controller.search(Some("B")).await.map_err(|e| e.to_string())? {
        info!(matches = users.len(), "Search for \"B\"");
    }
    if let ActionResult::View(users) = controller.index(Some("a")).await.map_err(|e| e.to_string())? {
        info!(matches = users.len(), "Index filtered by \"a\"");
    }

    if let ActionResult::View(users) = controller.find_by_name(Some("bo")).await.map_err(|e| e.to_string())? {
        info!(matches = users.len(), "Find by name \"bo\"");
    }

    let blank = controller.create_form();
    info!(?blank, "Create form");
    if let ActionResult::View(mut form) = controller.edit_form(2).await.map_err(|e| e.to_string())? {
        form.name = "Robert".to_string();
        let edited = controller.edit(2, form).await.map_err(|e| e.to_string())?;
        info!(?edited, "Edited user 2");
    }

    let confirm = controller.delete_confirm(1).await.map_err(|e| e.to_string())?;
    info!(?confirm, "Delete confirmation for user 1");
    let deleted = controller.delete(1).await.map_err(|e| e.to_string())?;
    info!(?deleted, "Deleted user 1");
    let details = controller.details(1).await.map_err(|e| e.to_string())?;
    info!(?details, "Details for user 1 after delete");

    let remaining = system.user_client.count_users().await.map_err(|e| e.to_string())?;
    info!(remaining, "Users remaining");

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
