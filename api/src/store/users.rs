use std::collections::HashSet;

use jiff::Timestamp;
use payloads::requests::{self, validate_demo_phone};
use payloads::responses::{
    LuckySpin, Purchase, Recharge, TeamEntry, User, Withdrawal,
};
use payloads::{TeamLevel, UserId};
use rust_decimal::Decimal;

use super::{Dataset, Store, StoreError, new_id, newest_first};

/// A user created directly in the store, bypassing registration. Used to
/// seed test and development data.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub phone: String,
    pub referred_by: Option<UserId>,
    pub total_buy: Decimal,
    pub balance: Decimal,
    pub withdraw_limit: Decimal,
    pub spins_today: u32,
    pub is_demo: bool,
}

impl Dataset {
    fn user_mut(&mut self, user_id: &UserId) -> Result<&mut User, StoreError> {
        self.users
            .iter_mut()
            .find(|u| &u.id == user_id)
            .ok_or(StoreError::UserNotFound)
    }

    fn user_by_phone_mut(
        &mut self,
        phone: &str,
    ) -> Result<&mut User, StoreError> {
        self.users
            .iter_mut()
            .find(|u| u.phone == phone)
            .ok_or(StoreError::UserNotFound)
    }

    fn require_user(&self, user_id: &UserId) -> Result<(), StoreError> {
        if self.users.iter().any(|u| &u.id == user_id) {
            Ok(())
        } else {
            Err(StoreError::UserNotFound)
        }
    }

    fn push_user(&mut self, user: NewUser) -> User {
        let user = User {
            id: UserId(new_id()),
            phone: user.phone,
            referred_by: user.referred_by.map(|id| id.0),
            total_buy: user.total_buy,
            balance: user.balance,
            withdraw_limit: user.withdraw_limit,
            lucky_spin: LuckySpin {
                spins_today: user.spins_today,
            },
            bank_details: None,
            is_demo: user.is_demo,
            created_at: Some(Timestamp::now()),
        };
        self.users.push(user.clone());
        user
    }

    /// Members exactly `depth` referral hops below `root`.
    fn team_members(&self, root: &UserId, depth: usize) -> Vec<&User> {
        let mut frontier: HashSet<&str> = HashSet::from([root.0.as_str()]);
        let mut members = Vec::new();
        for _ in 0..depth {
            members = self
                .users
                .iter()
                .filter(|u| {
                    u.referred_by
                        .as_deref()
                        .is_some_and(|referrer| frontier.contains(referrer))
                })
                .collect();
            frontier = members.iter().map(|u| u.id.0.as_str()).collect();
        }
        members
    }

    fn total_recharged(&self, user_id: &UserId) -> Decimal {
        self.recharges
            .iter()
            .filter(|(owner, _)| owner == user_id)
            .map(|(_, r)| r.amount)
            .sum()
    }
}

fn depth(level: TeamLevel) -> usize {
    match level {
        TeamLevel::Team1 => 1,
        TeamLevel::Team2 => 2,
        TeamLevel::Team3 => 3,
    }
}

fn history<T: Clone>(rows: &[(UserId, T)], user_id: &UserId) -> Vec<T> {
    rows.iter()
        .rev()
        .filter(|(owner, _)| owner == user_id)
        .map(|(_, row)| row.clone())
        .collect()
}

impl Store {
    pub fn insert_user(&self, user: NewUser) -> User {
        self.lock().push_user(user)
    }

    /// All users, newest first, optionally restricted to demo accounts (or
    /// to real ones).
    pub fn list_users(&self, is_demo: Option<bool>) -> Vec<User> {
        let data = self.lock();
        let users = newest_first(&data.users);
        match is_demo {
            Some(is_demo) => {
                users.into_iter().filter(|u| u.is_demo == is_demo).collect()
            }
            None => users,
        }
    }

    /// Users whose phone contains `query`, or whose id is exactly `query`.
    pub fn search_users(&self, query: &str) -> Vec<User> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let data = self.lock();
        data.users
            .iter()
            .rev()
            .filter(|u| u.phone.contains(query) || u.id.0 == query)
            .cloned()
            .collect()
    }

    pub fn get_user(&self, user_id: &UserId) -> Result<User, StoreError> {
        let data = self.lock();
        data.users
            .iter()
            .find(|u| &u.id == user_id)
            .cloned()
            .ok_or(StoreError::UserNotFound)
    }

    /// One row per team member at the given depth, with what they
    /// recharged and what that earned the root user at the current
    /// commission rate.
    pub fn team(
        &self,
        user_id: &UserId,
        level: TeamLevel,
    ) -> Result<Vec<TeamEntry>, StoreError> {
        let data = self.lock();
        data.require_user(user_id)?;
        let rate = match level {
            TeamLevel::Team1 => data.commission.level1,
            TeamLevel::Team2 => data.commission.level2,
            TeamLevel::Team3 => data.commission.level3,
        };
        let entries = data
            .team_members(user_id, depth(level))
            .into_iter()
            .rev()
            .map(|member| {
                let total_recharge = data.total_recharged(&member.id);
                TeamEntry {
                    ids: vec![member.id.clone()],
                    total_recharge,
                    total_commission: total_recharge * rate
                        / Decimal::ONE_HUNDRED,
                }
            })
            .collect();
        Ok(entries)
    }

    pub fn purchases(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Purchase>, StoreError> {
        let data = self.lock();
        data.require_user(user_id)?;
        Ok(history(&data.purchases, user_id))
    }

    pub fn withdrawals(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Withdrawal>, StoreError> {
        let data = self.lock();
        data.require_user(user_id)?;
        Ok(history(&data.withdrawals, user_id))
    }

    pub fn recharges(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Recharge>, StoreError> {
        let data = self.lock();
        data.require_user(user_id)?;
        Ok(history(&data.recharges, user_id))
    }

    /// Record a product purchase, adding to the user's lifetime total.
    pub fn record_purchase(
        &self,
        user_id: &UserId,
        product_name: &str,
        amount: Decimal,
    ) -> Result<Purchase, StoreError> {
        let mut data = self.lock();
        let user = data.user_mut(user_id)?;
        user.total_buy += amount;
        let purchase = Purchase {
            id: new_id(),
            product_name: product_name.to_string(),
            amount,
            created_at: Some(Timestamp::now()),
        };
        data.purchases.push((user_id.clone(), purchase.clone()));
        Ok(purchase)
    }

    pub fn record_withdrawal(
        &self,
        user_id: &UserId,
        amount: Decimal,
        status: &str,
    ) -> Result<Withdrawal, StoreError> {
        let mut data = self.lock();
        data.require_user(user_id)?;
        let withdrawal = Withdrawal {
            id: new_id(),
            amount,
            status: status.to_string(),
            created_at: Some(Timestamp::now()),
        };
        data.withdrawals.push((user_id.clone(), withdrawal.clone()));
        Ok(withdrawal)
    }

    pub fn set_withdraw_limit(
        &self,
        user_id: &UserId,
        limit: Decimal,
    ) -> Result<Decimal, StoreError> {
        if limit < Decimal::ZERO {
            return Err(StoreError::InvalidAmount);
        }
        let mut data = self.lock();
        let user = data.user_mut(user_id)?;
        user.withdraw_limit = limit;
        Ok(limit)
    }

    pub fn set_spins(
        &self,
        user_id: &UserId,
        spins_today: u32,
    ) -> Result<u32, StoreError> {
        let mut data = self.lock();
        let user = data.user_mut(user_id)?;
        user.lucky_spin.spins_today = spins_today;
        Ok(spins_today)
    }

    /// Remove a user together with their histories.
    pub fn delete_user(&self, user_id: &UserId) -> Result<(), StoreError> {
        let mut data = self.lock();
        data.require_user(user_id)?;
        data.users.retain(|u| &u.id != user_id);
        data.purchases.retain(|(owner, _)| owner != user_id);
        data.withdrawals.retain(|(owner, _)| owner != user_id);
        data.recharges.retain(|(owner, _)| owner != user_id);
        Ok(())
    }

    /// Register an account. Numbers in the demo range become demo
    /// accounts. A referral code is the referrer's id or phone.
    pub fn register_user(
        &self,
        details: &requests::RegisterUser,
    ) -> Result<User, StoreError> {
        let mut data = self.lock();
        if data.users.iter().any(|u| u.phone == details.phone) {
            return Err(StoreError::PhoneTaken);
        }
        let code = details.ref_code.trim();
        let referred_by = if code.is_empty() {
            None
        } else {
            let referrer = data
                .users
                .iter()
                .find(|u| u.id.0 == code || u.phone == code)
                .ok_or(StoreError::InvalidReferralCode)?;
            Some(referrer.id.clone())
        };
        Ok(data.push_user(NewUser {
            phone: details.phone.clone(),
            referred_by,
            is_demo: validate_demo_phone(&details.phone).is_valid(),
            ..Default::default()
        }))
    }

    pub(crate) fn credit_user(
        &self,
        phone: &str,
        amount: Decimal,
        utr: &str,
    ) -> Result<Decimal, StoreError> {
        let mut data = self.lock();
        let user = data.user_by_phone_mut(phone)?;
        user.balance += amount;
        let (user_id, balance) = (user.id.clone(), user.balance);
        data.recharges.push((
            user_id,
            Recharge {
                id: new_id(),
                amount,
                utr: Some(utr.to_string()),
                status: "success".to_string(),
                created_at: Some(Timestamp::now()),
            },
        ));
        Ok(balance)
    }

    pub(crate) fn debit_user(
        &self,
        phone: &str,
        amount: Decimal,
    ) -> Result<Decimal, StoreError> {
        let mut data = self.lock();
        let user = data.user_by_phone_mut(phone)?;
        if amount > user.balance {
            return Err(StoreError::InsufficientBalance);
        }
        user.balance -= amount;
        Ok(user.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn user(store: &Store, phone: &str, referrer: Option<&User>) -> User {
        store.insert_user(NewUser {
            phone: phone.into(),
            referred_by: referrer.map(|r| r.id.clone()),
            ..Default::default()
        })
    }

    #[test]
    fn team_levels_follow_referral_hops() {
        let store = Store::default();
        let root = user(&store, "9000000000", None);
        let a = user(&store, "9000000001", Some(&root));
        let b = user(&store, "9000000002", Some(&a));
        let c = user(&store, "9000000003", Some(&b));
        user(&store, "9000000004", Some(&c));

        let ids = |level| -> Vec<UserId> {
            store
                .team(&root.id, level)
                .unwrap()
                .into_iter()
                .flat_map(|e| e.ids)
                .collect()
        };
        assert_eq!(ids(TeamLevel::Team1), vec![a.id.clone()]);
        assert_eq!(ids(TeamLevel::Team2), vec![b.id.clone()]);
        assert_eq!(ids(TeamLevel::Team3), vec![c.id.clone()]);
    }

    #[test]
    fn team_commission_uses_level_rate() {
        let store = Store::default();
        let root = user(&store, "9000000000", None);
        user(&store, "9000000001", Some(&root));
        store.lock().commission.level1 = dec!(10);
        store.credit_user("9000000001", dec!(250), "UTR1").unwrap();

        let team = store.team(&root.id, TeamLevel::Team1).unwrap();
        assert_eq!(team[0].total_recharge, dec!(250));
        assert_eq!(team[0].total_commission, dec!(25));
    }

    #[test]
    fn debit_refuses_overdraft() {
        let store = Store::default();
        let u = user(&store, "9000000000", None);
        store.credit_user(&u.phone, dec!(100), "UTR").unwrap();
        assert!(matches!(
            store.debit_user(&u.phone, dec!(100.01)),
            Err(StoreError::InsufficientBalance)
        ));
        assert_eq!(store.debit_user(&u.phone, dec!(40)).unwrap(), dec!(60));
    }

    #[test]
    fn registration_resolves_referrals_and_demo_range() {
        let store = Store::default();
        let referrer = user(&store, "9000000000", None);
        let demo = store
            .register_user(&requests::RegisterUser {
                phone: "5011111111".into(),
                password: "pw".into(),
                trade_password: "tpw".into(),
                ref_code: referrer.phone.clone(),
            })
            .unwrap();
        assert!(demo.is_demo);
        assert_eq!(demo.referred_by, Some(referrer.id.0.clone()));

        let taken = store.register_user(&requests::RegisterUser {
            phone: "5011111111".into(),
            password: "pw".into(),
            trade_password: "tpw".into(),
            ref_code: String::new(),
        });
        assert!(matches!(taken, Err(StoreError::PhoneTaken)));
        assert_eq!(store.list_users(Some(true)).len(), 1);
        assert_eq!(store.list_users(Some(false)).len(), 1);
    }

    #[test]
    fn delete_drops_histories() {
        let store = Store::default();
        let u = user(&store, "9000000000", None);
        store.record_purchase(&u.id, "Starter", dec!(100)).unwrap();
        assert_eq!(store.get_user(&u.id).unwrap().total_buy, dec!(100));
        store.delete_user(&u.id).unwrap();
        assert!(matches!(
            store.purchases(&u.id),
            Err(StoreError::UserNotFound)
        ));
        assert!(store.lock().purchases.is_empty());
    }
}
