//! The logged-in identity.
//!
//! The session is read from storage once when the app boots, written on
//! login and removed on logout. Components receive it from the root rather
//! than reading storage themselves.

use derive_more::Display;
use serde::{Deserialize, Serialize};

pub const SESSION_STORAGE_KEY: &str = "realStateLoggedUser";

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LoginType {
    #[default]
    #[display("admin")]
    Admin,
    #[display("subordinate")]
    Subordinate,
}

impl LoginType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Subordinate => "Subordinate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub phone: String,
    #[serde(rename = "type")]
    pub login_type: LoginType,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.login_type == LoginType::Admin
    }
}

/// String key-value storage the session lives in; `localStorage` in the
/// browser.
pub trait SessionStorage {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Restore the session saved by a previous login. Unreadable entries are
/// treated as logged out.
pub fn load(storage: &impl SessionStorage) -> Option<Session> {
    let raw = storage.read(SESSION_STORAGE_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!("Ignoring unreadable stored session: {e}");
            None
        }
    }
}

pub fn save(
    storage: &impl SessionStorage,
    session: &Session,
) -> Result<(), serde_json::Error> {
    let raw = serde_json::to_string(session)?;
    storage.write(SESSION_STORAGE_KEY, &raw);
    Ok(())
}

pub fn clear(storage: &impl SessionStorage) {
    storage.remove(SESSION_STORAGE_KEY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStorage(RefCell<HashMap<String, String>>);

    impl SessionStorage for MemoryStorage {
        fn read(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key).cloned()
        }

        fn write(&self, key: &str, value: &str) {
            self.0.borrow_mut().insert(key.into(), value.into());
        }

        fn remove(&self, key: &str) {
            self.0.borrow_mut().remove(key);
        }
    }

    #[test]
    fn save_load_clear() {
        let storage = MemoryStorage::default();
        assert_eq!(load(&storage), None);

        let session = Session {
            phone: "9000000000".into(),
            login_type: LoginType::Subordinate,
        };
        save(&storage, &session).unwrap();
        assert_eq!(
            storage.read(SESSION_STORAGE_KEY).as_deref(),
            Some(r#"{"phone":"9000000000","type":"subordinate"}"#)
        );
        assert_eq!(load(&storage), Some(session));

        clear(&storage);
        assert_eq!(load(&storage), None);
    }

    #[test]
    fn garbage_is_logged_out() {
        let storage = MemoryStorage::default();
        storage.write(SESSION_STORAGE_KEY, "true");
        assert_eq!(load(&storage), None);
    }
}
