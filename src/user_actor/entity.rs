use crate::actor_framework::Entity;
use crate::domain::{User, UserChanges, UserFilter};

// None of the User hooks reject, so `FrameworkError::Rejected` never reaches a
// UserClient caller. The `UserError::ValidationError` mapping stays for
// entities whose hooks do.
impl Entity for User {
    type Id = i64;
    type Changes = UserChanges;
    type Filter = UserFilter;

    fn id(&self) -> &i64 { &self.id }

    fn matches(&self, filter: &UserFilter) -> bool {
        filter.matches(self)
    }

    /// Overwrites the user's name and email.
    ///
    /// The id is left untouched.
    fn on_update(&mut self, changes: UserChanges) -> Result<(), String> {
        self.name = changes.name;
        self.email = changes.email;
        Ok(())
    }
}
