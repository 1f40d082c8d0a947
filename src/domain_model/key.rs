use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a surrogate integer key. Values are assigned by the storage
/// adapters as `max(existing) + 1`, so they start at 1 and only grow.
macro_rules! surrogate_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            Ord,
            PartialOrd,
            Eq,
            PartialEq,
            Hash,
            Serialize,
            Deserialize,
            sqlx::Type,
        )]
        #[sqlx(transparent)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub const FIRST: $name = $name(1);

            pub fn next(self) -> $name {
                $name(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map($name)
            }
        }
    };
}

surrogate_id!(UserId);
surrogate_id!(RoleId);
surrogate_id!(AuditId);
surrogate_id!(SystemId);
surrogate_id!(AccessId);
surrogate_id!(EventId);
surrogate_id!(AlertId);
