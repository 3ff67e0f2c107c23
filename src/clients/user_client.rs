use tracing::{debug, info, instrument};
use crate::domain::{User, UserChanges, UserFilter};
use crate::user_actor::UserError;
use crate::actor_framework::ResourceClient;

/// Client for interacting with the User actor.
///
/// Cheap to clone; every clone talks to the same collection.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_basic_client!(UserClient, User, i64, UserError, user);

/// Treats an absent or empty query string as "no query".
fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}

impl UserClient {
    /// Looks a user up by id, failing with `NotFound` when absent.
    #[instrument(skip(self))]
    pub async fn find_user(&self, id: i64) -> Result<User, UserError> {
        self.get_user(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    /// All users in insertion order, or those whose name contains `filter`.
    #[instrument(skip(self))]
    pub async fn list_users(&self, filter: Option<&str>) -> Result<Vec<User>, UserError> {
        debug!("Sending request");
        let filter = non_empty(filter).map(|f| UserFilter::NameContains(f.to_string()));
        Ok(self.inner.list(filter).await?)
    }

    /// Users whose name or email contains `query`. Empty query yields nothing.
    #[instrument(skip(self))]
    pub async fn search_users(&self, query: Option<&str>) -> Result<Vec<User>, UserError> {
        let Some(query) = non_empty(query) else {
            return Ok(Vec::new());
        };
        debug!("Sending request");
        Ok(self
            .inner
            .list(Some(UserFilter::NameOrEmailContains(query.to_string())))
            .await?)
    }

    /// Users whose name contains `name`. Empty name yields nothing.
    #[instrument(skip(self))]
    pub async fn find_users_by_name(&self, name: Option<&str>) -> Result<Vec<User>, UserError> {
        let Some(name) = non_empty(name) else {
            return Ok(Vec::new());
        };
        debug!("Sending request");
        Ok(self
            .inner
            .list(Some(UserFilter::NameContains(name.to_string())))
            .await?)
    }

    #[instrument(fields(user_id = user.id, user_name = %user.name), skip(self, user))]
    pub async fn create_user(&self, user: User) -> Result<i64, UserError> {
        debug!("Sending request");
        let id = self.inner.create(user).await?;
        info!("User created");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: i64, changes: UserChanges) -> Result<User, UserError> {
        debug!("Sending request");
        let user = self.inner.update(id, changes).await?;
        info!("User updated");
        Ok(user)
    }
}
