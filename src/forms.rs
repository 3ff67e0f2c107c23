//! Bound form input and the required-field checks applied to it.

use crate::domain::{User, UserChanges};

/// User fields as submitted by a create or edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Outcome of validating a form. Valid when no field errors were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelState {
    errors: Vec<FieldError>,
}

impl ModelState {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError { field, message: message.into() });
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    #[cfg(test)]
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl From<&User> for UserForm {
    fn from(user: &User) -> Self {
        Self {
            id: Some(user.id),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

impl UserForm {
    pub fn new(id: Option<i64>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { id, name: name.into(), email: email.into() }
    }

    /// Checks the fields an edit needs: a non-blank name and email.
    pub fn validate(&self) -> ModelState {
        let mut state = ModelState::default();
        if self.name.trim().is_empty() {
            state.add_error("name", "The Name field is required.");
        }
        if self.email.trim().is_empty() {
            state.add_error("email", "The Email field is required.");
        }
        state
    }

    /// Like [`UserForm::validate`], additionally requiring an id.
    pub fn validate_for_create(&self) -> ModelState {
        let mut state = self.validate();
        if self.id.is_none() {
            state.add_error("id", "The Id field is required.");
        }
        state
    }

    /// Converts a form that passed [`UserForm::validate_for_create`].
    ///
    /// Returns `None` when the id is missing.
    pub fn to_user(&self) -> Option<User> {
        self.id.map(|id| User::new(id, self.name.clone(), self.email.clone()))
    }

    pub fn to_changes(&self) -> UserChanges {
        UserChanges { name: self.name.clone(), email: self.email.clone() }
    }
}
