/// Represents a registered user in the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Replacement values applied by an edit. Both fields overwrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub name: String,
    pub email: String,
}

/// Query predicates evaluated against the stored users.
///
/// Matching is a case-insensitive substring check with no locale collation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    NameContains(String),
    NameOrEmailContains(String),
}

impl User {
    /// Creates a new User instance.
    ///
    /// # Arguments
    /// * `id` - Caller-assigned identifier, unique within the directory
    /// * `name` - User's display name
    /// * `email` - User's email address
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        match self {
            UserFilter::NameContains(needle) => contains_ignore_case(&user.name, needle),
            UserFilter::NameOrEmailContains(needle) => {
                contains_ignore_case(&user.name, needle) || contains_ignore_case(&user.email, needle)
            }
        }
    }
}

/// Maps a char to its uppercase form when that form is a single char.
/// Chars whose uppercase expands (e.g. `ß` to `SS`) compare as themselves.
fn fold(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Ordinal substring check, comparing folded chars one to one.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle: Vec<char> = needle.chars().map(fold).collect();
    if needle.is_empty() {
        return true;
    }
    let haystack: Vec<char> = haystack.chars().map(fold).collect();
    haystack.windows(needle.len()).any(|window| window == needle.as_slice())
}
