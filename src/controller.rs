//! Request handlers for the user pages.
//!
//! Each handler delegates to [`UserClient`] and returns an [`ActionResult`]
//! for the host framework to render. `NotFound` from the directory becomes
//! [`ActionResult::NotFound`]; only communication failures surface as `Err`.

use tracing::{info, instrument, warn};
use crate::clients::UserClient;
use crate::domain::User;
use crate::forms::{ModelState, UserForm};
use crate::user_actor::UserError;

/// What a handler asks the host to do.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult<M> {
    /// Render the handler's view with this model.
    View(M),
    /// Re-display the submitted form together with its field errors.
    Invalid { form: UserForm, model_state: ModelState },
    RedirectToIndex,
    NotFound,
}

pub type HandlerResult<M> = Result<ActionResult<M>, UserError>;

fn view_or_not_found<M>(result: Result<M, UserError>) -> HandlerResult<M> {
    match result {
        Ok(model) => Ok(ActionResult::View(model)),
        Err(UserError::NotFound(_)) => Ok(ActionResult::NotFound),
        Err(e) => Err(e),
    }
}

fn redirect_or_not_found<T>(result: Result<T, UserError>) -> HandlerResult<()> {
    match result {
        Ok(_) => Ok(ActionResult::RedirectToIndex),
        Err(UserError::NotFound(_)) => Ok(ActionResult::NotFound),
        Err(e) => Err(e),
    }
}

#[derive(Clone)]
pub struct UserController {
    users: UserClient,
}

impl UserController {
    pub fn new(users: UserClient) -> Self {
        Self { users }
    }

    /// GET /User?searchString=
    #[instrument(skip(self))]
    pub async fn index(&self, search_string: Option<&str>) -> HandlerResult<Vec<User>> {
        let users = self.users.list_users(search_string).await?;
        Ok(ActionResult::View(users))
    }

    /// GET /User/Details/{id}
    #[instrument(skip(self))]
    pub async fn details(&self, id: i64) -> HandlerResult<User> {
        view_or_not_found(self.users.find_user(id).await)
    }

    /// GET /User/Create
    pub fn create_form(&self) -> ActionResult<UserForm> {
        ActionResult::View(UserForm::default())
    }

    /// POST /User/Create
    #[instrument(skip(self, form), fields(user_id = ?form.id))]
    pub async fn create(&self, form: UserForm) -> HandlerResult<()> {
        let mut model_state = form.validate_for_create();
        let Some(user) = form.to_user().filter(|_| model_state.is_valid()) else {
            warn!(errors = model_state.errors().len(), "Create form rejected");
            return Ok(ActionResult::Invalid { form, model_state });
        };

        match self.users.create_user(user).await {
            Ok(id) => {
                info!(user_id = id, "Created user from form");
                Ok(ActionResult::RedirectToIndex)
            }
            Err(UserError::AlreadyExists(id)) => {
                warn!("Create form used an existing id");
                model_state.add_error("id", format!("A user with id {id} already exists."));
                Ok(ActionResult::Invalid { form, model_state })
            }
            Err(e) => Err(e),
        }
    }

    /// GET /User/Edit/{id}
    #[instrument(skip(self))]
    pub async fn edit_form(&self, id: i64) -> HandlerResult<UserForm> {
        view_or_not_found(self.users.find_user(id).await.map(|user| UserForm::from(&user)))
    }

    /// POST /User/Edit/{id}
    ///
    /// A missing user wins over an invalid form.
    #[instrument(skip(self, form))]
    pub async fn edit(&self, id: i64, form: UserForm) -> HandlerResult<()> {
        if self.users.get_user(id).await?.is_none() {
            return Ok(ActionResult::NotFound);
        }

        let model_state = form.validate();
        if !model_state.is_valid() {
            warn!(errors = model_state.errors().len(), "Edit form rejected");
            return Ok(ActionResult::Invalid { form, model_state });
        }

        redirect_or_not_found(self.users.update_user(id, form.to_changes()).await)
    }

    /// GET /User/Delete/{id}
    #[instrument(skip(self))]
    pub async fn delete_confirm(&self, id: i64) -> HandlerResult<User> {
        view_or_not_found(self.users.find_user(id).await)
    }

    /// POST /User/Delete/{id}
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> HandlerResult<()> {
        redirect_or_not_found(self.users.delete_user(id).await)
    }

    /// GET /User/Search?query=
    #[instrument(skip(self))]
    pub async fn search(&self, query: Option<&str>) -> HandlerResult<Vec<User>> {
        Ok(ActionResult::View(self.users.search_users(query).await?))
    }

    /// GET /User/FindByName?name=
    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: Option<&str>) -> HandlerResult<Vec<User>> {
        Ok(ActionResult::View(self.users.find_users_by_name(name).await?))
    }
}
