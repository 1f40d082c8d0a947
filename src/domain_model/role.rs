use crate::domain_model::RoleId;
use serde::Serialize;
use std::collections::BTreeSet;

/// Grants the read-everything listings (users, accesses, events, alerts, audit).
pub const CAP_VIEW_ALL: &str = "view_all";
/// Grants the mutating console commands.
pub const CAP_MODIFY: &str = "modify";

/// Flat set of capability tokens granted by a role. No hierarchy, no
/// inheritance: a token is either in the set or it is not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<String>);

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        PermissionSet(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    pub role_id: RoleId,
    pub name: String,
    pub permissions: PermissionSet,
}
