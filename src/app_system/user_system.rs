use std::time::Duration;
use tracing::{info, error, warn};
use crate::actor_framework::ResourceActor;
use crate::clients::UserClient;
use crate::config::SystemConfig;
use crate::controller::UserController;
use crate::domain::User;

/// Owns the user actor for the lifetime of the process.
///
/// Constructed once at startup; hands out the client and controller to
/// request-handling code and joins the actor on shutdown.
pub struct UserSystem {
    pub user_client: UserClient,
    pub controller: UserController,
    handle: tokio::task::JoinHandle<()>,
    shutdown_timeout: Duration,
}

impl UserSystem {
    pub fn new(config: &SystemConfig) -> Self {
        info!(mailbox_capacity = config.mailbox_capacity, "Starting user system");
        let (user_actor, user_resource_client) = ResourceActor::<User>::new(config.mailbox_capacity);
        let user_client = UserClient::new(user_resource_client);
        let controller = UserController::new(user_client.clone());
        let handle = tokio::spawn(user_actor.run());

        Self {
            user_client,
            controller,
            handle,
            shutdown_timeout: config.shutdown_timeout,
        }
    }

    /// Drops this system's clients and waits for the actor to drain.
    ///
    /// Clones handed out elsewhere keep the actor alive. If the actor has not
    /// stopped within the configured timeout it is aborted and an error returned.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.controller);
        drop(self.user_client);

        let mut handle = self.handle;
        match tokio::time::timeout(self.shutdown_timeout, &mut handle).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.shutdown_timeout.as_millis(),
                    "Actor still referenced by live clients - aborting"
                );
                handle.abort();
                return Err("Shutdown timed out: actor still had live clients".to_string());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
