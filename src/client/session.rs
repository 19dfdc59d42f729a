//! Client-persisted session record.

use crate::client::storage::{SessionStorage, StorageError};
use crate::domain::entities::Role;

/// Storage key for the issued token.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the role the user signed in with.
pub const USER_ROLE_KEY: &str = "userRole";
/// Storage key for the remembered email (remember-me).
pub const REMEMBERED_EMAIL_KEY: &str = "rememberedEmail";

const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, USER_ROLE_KEY, REMEMBERED_EMAIL_KEY];

/// What a successful login leaves behind in client storage.
///
/// There is no expiry: the record lives as long as the storage backend
/// keeps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub token: String,
    pub user_role: Role,
    pub remembered_email: Option<String>,
}

impl SessionRecord {
    /// Writes the record to storage.
    ///
    /// `rememberedEmail` is removed when `remembered_email` is `None`, so an
    /// unchecked remember-me box never leaves a stale email behind.
    ///
    /// The write is all or nothing: if any key fails, the keys already
    /// written are put back to their previous values before the error is
    /// returned.
    pub fn persist(&self, storage: &mut dyn SessionStorage) -> Result<(), StorageError> {
        let previous: Vec<(&str, Option<String>)> = SESSION_KEYS
            .iter()
            .map(|key| (*key, storage.get(key)))
            .collect();

        let result = self.write(storage);
        if result.is_err() {
            restore(storage, &previous);
        }
        result
    }

    fn write(&self, storage: &mut dyn SessionStorage) -> Result<(), StorageError> {
        storage.set(TOKEN_KEY, &self.token)?;
        storage.set(USER_ROLE_KEY, self.user_role.as_str())?;

        match &self.remembered_email {
            Some(email) => storage.set(REMEMBERED_EMAIL_KEY, email),
            None => storage.remove(REMEMBERED_EMAIL_KEY),
        }
    }

    /// Reads a record back, or `None` if no complete session is stored.
    pub fn load(storage: &dyn SessionStorage) -> Option<Self> {
        let token = storage.get(TOKEN_KEY)?;
        let user_role = Role::parse(&storage.get(USER_ROLE_KEY)?)?;

        Some(Self {
            token,
            user_role,
            remembered_email: storage.get(REMEMBERED_EMAIL_KEY),
        })
    }
}

fn restore(storage: &mut dyn SessionStorage, previous: &[(&str, Option<String>)]) {
    for (key, value) in previous {
        let restored = match value {
            Some(value) => storage.set(key, value),
            None => storage.remove(key),
        };

        if let Err(e) = restored {
            tracing::warn!(key = *key, error = %e, "Failed to roll back session key");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::storage::{FailingStorage, MemoryStorage};

    fn record(remembered_email: Option<&str>) -> SessionRecord {
        SessionRecord {
            token: "T".to_string(),
            user_role: Role::Admin,
            remembered_email: remembered_email.map(str::to_string),
        }
    }

    #[test]
    fn test_persist_and_load() {
        let mut storage = MemoryStorage::new();
        let record = SessionRecord {
            token: "T".to_string(),
            user_role: Role::Admin,
            remembered_email: Some("a@b.com".to_string()),
        };

        record.persist(&mut storage).unwrap();

        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("T"));
        assert_eq!(storage.get(USER_ROLE_KEY).as_deref(), Some("admin"));
        assert_eq!(SessionRecord::load(&storage), Some(record));
    }

    #[test]
    fn test_persist_without_email_clears_previous_one() {
        let mut storage = MemoryStorage::new();
        storage.set(REMEMBERED_EMAIL_KEY, "old@b.com").unwrap();

        SessionRecord {
            token: "T".to_string(),
            user_role: Role::Employee,
            remembered_email: None,
        }
        .persist(&mut storage)
        .unwrap();

        assert_eq!(storage.get(REMEMBERED_EMAIL_KEY), None);
    }

    #[test]
    fn test_load_rejects_unknown_role() {
        let mut storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "T").unwrap();
        storage.set(USER_ROLE_KEY, "root").unwrap();

        assert_eq!(SessionRecord::load(&storage), None);
    }

    #[test]
    fn test_failed_second_write_leaves_nothing_behind() {
        let mut storage = FailingStorage::failing_on_set(2);

        assert!(record(Some("a@b.com")).persist(&mut storage).is_err());

        assert_eq!(storage.get(TOKEN_KEY), None);
        assert_eq!(storage.get(USER_ROLE_KEY), None);
        assert_eq!(storage.get(REMEMBERED_EMAIL_KEY), None);
    }

    #[test]
    fn test_failed_email_write_rolls_back_token_and_role() {
        let mut storage = FailingStorage::failing_on_set(3);

        assert!(record(Some("a@b.com")).persist(&mut storage).is_err());

        assert_eq!(SessionRecord::load(&storage), None);
        assert_eq!(storage.get(TOKEN_KEY), None);
    }

    #[test]
    fn test_failed_write_restores_previous_session() {
        let mut storage = FailingStorage::failing_on_set(5);
        storage.set(TOKEN_KEY, "OLD").unwrap();
        storage.set(USER_ROLE_KEY, "employee").unwrap();

        // sets 3 and 4 succeed, the remembered email (set 5) fails
        assert!(record(Some("a@b.com")).persist(&mut storage).is_err());

        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("OLD"));
        assert_eq!(storage.get(USER_ROLE_KEY).as_deref(), Some("employee"));
        assert_eq!(storage.get(REMEMBERED_EMAIL_KEY), None);
    }

    #[test]
    fn test_load_empty_storage() {
        assert_eq!(SessionRecord::load(&MemoryStorage::new()), None);
    }
}
