//! Derived, filtered view over the store.

use crate::core::types::{FilterSpec, UserRecord};

/// Records satisfying every populated field of `spec`, in store order.
///
/// Each populated field is an exact string match against the record's
/// `registration_date`, `country` or gender name. An empty result is a valid
/// answer, not an error.
pub fn apply_filter<'a>(records: &'a [UserRecord], spec: &FilterSpec) -> Vec<&'a UserRecord> {
    records
        .iter()
        .filter(|record| matches(record, spec))
        .collect()
}

/// Number of populated fields in `spec` (drives the filter badge).
pub fn active_filter_count(spec: &FilterSpec) -> usize {
    [spec.date(), spec.country(), spec.gender()]
        .iter()
        .filter(|field| field.is_some())
        .count()
}

fn matches(record: &UserRecord, spec: &FilterSpec) -> bool {
    spec.date()
        .is_none_or(|date| record.registration_date == date)
        && spec.country().is_none_or(|country| record.country == country)
        && spec
            .gender()
            .is_none_or(|gender| record.gender.as_str() == gender)
}
