use serde::Deserialize;

/// Upper bound on the number of rows a listing returns.
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Deserialize)]
#[serde(transparent)]
pub struct RowLimit(pub u32);

impl RowLimit {
    pub const AUDIT: RowLimit = RowLimit(50);
    pub const ACCESSES: RowLimit = RowLimit(100);
    pub const USER_ACCESSES: RowLimit = RowLimit(50);
    pub const EVENTS: RowLimit = RowLimit(100);
    pub const ALERTS: RowLimit = RowLimit(100);

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}
