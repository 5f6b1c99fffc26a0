//! Credential matching against the store.

use crate::core::store::UserStore;
use crate::core::types::{UserId, UserRecord};

/// Find the first record whose email and password both equal the inputs.
///
/// Comparison is exact and case-sensitive. Returns `None` when nothing
/// matches; with duplicate emails the earliest registration wins.
pub fn authenticate<'a>(
    store: &'a UserStore,
    email: &str,
    password: &str,
) -> Option<(UserId, &'a UserRecord)> {
    store
        .iter_with_ids()
        .find(|(_, record)| record.email == email && record.password == password)
}
