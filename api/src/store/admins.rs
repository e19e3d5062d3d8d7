//! The admin account and the subordinate accounts it manages.
//!
//! Subordinate management is authorized per request: every call carries the
//! admin's phone and password, which are checked against the configured
//! admin account.

use payloads::SubordinateId;
use payloads::requests::{
    AdminCredentials, CreateSubordinate, LoginCredentials, UpdateSubordinate,
};
use payloads::responses::Subordinate;

use super::{Dataset, Store, StoreError, SubordinateAccount, new_id};

#[derive(Debug, Clone, Default)]
pub struct AdminAccount {
    pub phone: String,
    pub password: String,
}

impl AdminAccount {
    fn matches(&self, phone: &str, password: &str) -> bool {
        !self.phone.is_empty()
            && self.phone == phone
            && self.password == password
    }
}

impl SubordinateAccount {
    fn public(&self) -> Subordinate {
        Subordinate {
            id: self.id.clone(),
            phone: self.phone.clone(),
            user_type: "subordinate".to_string(),
        }
    }
}

impl Dataset {
    fn authorize(&self, admin: &AdminCredentials) -> Result<(), StoreError> {
        if self.admin.matches(&admin.admin_phone, &admin.admin_password) {
            Ok(())
        } else {
            Err(StoreError::InvalidAdminCredentials)
        }
    }

    fn phone_in_use(
        &self,
        phone: &str,
        except: Option<&SubordinateId>,
    ) -> bool {
        self.admin.phone == phone
            || self
                .subordinates
                .iter()
                .any(|s| Some(&s.id) != except && s.phone == phone)
    }
}

impl Store {
    pub fn admin_login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<(), StoreError> {
        let data = self.lock();
        if data.admin.matches(&credentials.phone, &credentials.password) {
            Ok(())
        } else {
            Err(StoreError::InvalidCredentials)
        }
    }

    pub fn subordinate_login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<(), StoreError> {
        let data = self.lock();
        data.subordinates
            .iter()
            .find(|s| {
                s.phone == credentials.phone
                    && s.password == credentials.password
            })
            .map(|_| ())
            .ok_or(StoreError::InvalidCredentials)
    }

    pub fn list_subordinates(
        &self,
        admin: &AdminCredentials,
    ) -> Result<Vec<Subordinate>, StoreError> {
        let data = self.lock();
        data.authorize(admin)?;
        Ok(data.subordinates.iter().rev().map(|s| s.public()).collect())
    }

    pub fn create_subordinate(
        &self,
        details: &CreateSubordinate,
    ) -> Result<Subordinate, StoreError> {
        let mut data = self.lock();
        data.authorize(&details.admin)?;
        if data.phone_in_use(&details.phone, None) {
            return Err(StoreError::SubordinateNotUnique);
        }
        let account = SubordinateAccount {
            id: SubordinateId(new_id()),
            phone: details.phone.clone(),
            password: details.password.clone(),
        };
        data.subordinates.push(account.clone());
        Ok(account.public())
    }

    /// Change the phone and/or password of a subordinate.
    pub fn update_subordinate(
        &self,
        subordinate_id: &SubordinateId,
        details: &UpdateSubordinate,
    ) -> Result<Subordinate, StoreError> {
        let mut data = self.lock();
        data.authorize(&details.admin)?;
        let new_phone = details.phone.as_deref();
        if new_phone.is_some_and(|p| data.phone_in_use(p, Some(subordinate_id)))
        {
            return Err(StoreError::SubordinateNotUnique);
        }
        let account = data
            .subordinates
            .iter_mut()
            .find(|s| &s.id == subordinate_id)
            .ok_or(StoreError::SubordinateNotFound)?;
        if let Some(phone) = &details.phone {
            account.phone = phone.clone();
        }
        if let Some(password) = &details.password {
            account.password = password.clone();
        }
        Ok(account.public())
    }

    pub fn delete_subordinate(
        &self,
        subordinate_id: &SubordinateId,
        admin: &AdminCredentials,
    ) -> Result<(), StoreError> {
        let mut data = self.lock();
        data.authorize(admin)?;
        let before = data.subordinates.len();
        data.subordinates.retain(|s| &s.id != subordinate_id);
        if data.subordinates.len() == before {
            return Err(StoreError::SubordinateNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (Store, AdminCredentials) {
        let store = Store::new(AdminAccount {
            phone: "9999999999".into(),
            password: "admin".into(),
        });
        let admin = AdminCredentials {
            admin_phone: "9999999999".into(),
            admin_password: "admin".into(),
        };
        (store, admin)
    }

    #[test]
    fn wrong_admin_password_is_refused() {
        let (store, mut admin) = store();
        admin.admin_password = "guess".into();
        assert!(matches!(
            store.list_subordinates(&admin),
            Err(StoreError::InvalidAdminCredentials)
        ));
    }

    #[test]
    fn subordinate_can_log_in_after_password_change() {
        let (store, admin) = store();
        let sub = store
            .create_subordinate(&CreateSubordinate {
                admin: admin.clone(),
                phone: "9000000001".into(),
                password: "first".into(),
            })
            .unwrap();
        store
            .update_subordinate(
                &sub.id,
                &UpdateSubordinate {
                    admin,
                    phone: None,
                    password: Some("second".into()),
                },
            )
            .unwrap();

        let login = |password: &str| {
            store.subordinate_login(&LoginCredentials {
                phone: "9000000001".into(),
                password: password.into(),
            })
        };
        assert!(login("first").is_err());
        assert!(login("second").is_ok());
    }

    #[test]
    fn empty_admin_account_never_matches() {
        let store = Store::default();
        let result = store.admin_login(&LoginCredentials {
            phone: String::new(),
            password: String::new(),
        });
        assert!(matches!(result, Err(StoreError::InvalidCredentials)));
    }
}
