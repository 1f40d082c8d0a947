use crate::domain_model::UserId;
use serde::Serialize;

/// A console account as seen by callers. The credential never appears here;
/// it stays behind the identity store port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    pub role: String,
    pub blocked: bool,
}

/// The identity carried by a successfully logged-in caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub user_id: UserId,
    pub name: String,
    pub role: String,
}

impl From<User> for Session {
    fn from(user: User) -> Self {
        Session {
            user_id: user.user_id,
            name: user.name,
            role: user.role,
        }
    }
}
