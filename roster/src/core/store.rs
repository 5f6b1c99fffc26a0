//! Append-only, insertion-ordered user store.

use chrono::NaiveDate;

use crate::core::types::{UserId, UserRecord, UserRecordInput};

/// Wire format of `UserRecord::registration_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserStore {
    records: Vec<UserRecord>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record stamped with `today` and return a copy of it.
    ///
    /// Never fails; duplicate emails are the caller's policy to reject.
    pub fn append(&mut self, input: UserRecordInput, today: NaiveDate) -> UserRecord {
        let registration_date = today.format(DATE_FORMAT).to_string();
        let record = UserRecord::from_input(input, registration_date);
        self.records.push(record.clone());
        record
    }

    pub fn get(&self, id: UserId) -> Option<&UserRecord> {
        self.records.get(id.0)
    }

    pub fn all(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.records.iter().any(|record| record.email == email)
    }

    pub(crate) fn iter_with_ids(&self) -> impl Iterator<Item = (UserId, &UserRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| (UserId(index), record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, input};

    #[test]
    fn append_preserves_insertion_order_and_stamps_date() {
        let mut store = UserStore::new();
        let first = store.append(input("a@x.com", "USA"), date(2024, 3, 9));
        let second = store.append(input("b@x.com", "India"), date(2024, 3, 10));

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(UserId(0)), Some(&first));
        assert_eq!(store.get(UserId(1)), Some(&second));
        let emails: Vec<&str> = store.all().iter().map(|r| r.email.as_str()).collect();
        assert_eq!(emails, vec!["a@x.com", "b@x.com"]);
        assert_eq!(store.all()[0].registration_date, "2024-03-09");
        assert_eq!(store.all()[1].registration_date, "2024-03-10");
    }

    #[test]
    fn same_day_appends_share_the_date() {
        let mut store = UserStore::new();
        for n in 0..5 {
            store.append(input(&format!("u{n}@x.com"), "UK"), date(2024, 1, 1));
        }
        assert_eq!(store.len(), 5);
        assert!(
            store
                .all()
                .iter()
                .all(|record| record.registration_date == "2024-01-01")
        );
    }

    #[test]
    fn duplicate_emails_are_accepted() {
        let mut store = UserStore::new();
        store.append(input("dup@x.com", "USA"), date(2024, 1, 1));
        store.append(input("dup@x.com", "UK"), date(2024, 1, 1));
        assert_eq!(store.len(), 2);
        assert!(store.contains_email("dup@x.com"));
        assert!(!store.contains_email("DUP@x.com"));
    }

    #[test]
    fn get_out_of_range_is_none() {
        let store = UserStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get(UserId(0)), None);
    }
}
