//! In-memory store for the admin API.
//!
//! All collections live behind one mutex. Every operation takes the lock,
//! does its work synchronously and releases it before the handler answers,
//! so handlers never hold the lock across an await point.
//!
//! Rows are kept in insertion order; listings return the newest first, the
//! way the admin panel expects to see them.

pub mod admins;
pub mod content;
pub mod payments;
pub mod products;
pub mod users;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use payloads::responses::{
    CommissionRates, Giftcode, Product, Purchase, QrCode, Recharge,
    SocialLinks, UpiRecord, User, Withdrawal,
};
use payloads::{SubordinateId, UserId};
use rust_decimal::Decimal;

pub use admins::AdminAccount;
pub use users::NewUser;

#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<Mutex<Dataset>>,
}

#[derive(Debug, Default)]
struct Dataset {
    admin: AdminAccount,
    users: Vec<User>,
    purchases: Vec<(UserId, Purchase)>,
    withdrawals: Vec<(UserId, Withdrawal)>,
    recharges: Vec<(UserId, Recharge)>,
    products: Vec<Product>,
    commission: CommissionRates,
    upis: Vec<UpiRecord>,
    qr_codes: Vec<QrCode>,
    social_links: Vec<SocialLinks>,
    giftcodes: Vec<Giftcode>,
    subordinates: Vec<SubordinateAccount>,
}

#[derive(Debug, Clone)]
struct SubordinateAccount {
    id: SubordinateId,
    phone: String,
    password: String,
}

impl Store {
    pub fn new(admin: AdminAccount) -> Self {
        let dataset = Dataset {
            admin,
            ..Default::default()
        };
        Self {
            inner: Arc::new(Mutex::new(dataset)),
        }
    }

    // A panic while holding the lock cannot leave a collection half
    // written, so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Dataset> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

/// Server-assigned identifier in the style of a document id.
fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

fn newest_first<T: Clone>(rows: &[T]) -> Vec<T> {
    rows.iter().rev().cloned().collect()
}

fn require_positive(amount: Decimal) -> Result<Decimal, StoreError> {
    if amount <= Decimal::ZERO {
        return Err(StoreError::InvalidAmount);
    }
    Ok(amount)
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid phone or password")]
    InvalidCredentials,
    #[error("Invalid admin credentials")]
    InvalidAdminCredentials,
    #[error("User not found")]
    UserNotFound,
    #[error("User already exists")]
    PhoneTaken,
    #[error("Invalid referral code")]
    InvalidReferralCode,
    #[error("Insufficient balance")]
    InsufficientBalance,
    #[error("Amount must be greater than zero")]
    InvalidAmount,
    #[error("Product not found")]
    ProductNotFound,
    #[error("UPI not found")]
    UpiNotFound,
    #[error("UPI ID already exists")]
    UpiNotUnique,
    #[error("QR not found")]
    QrCodeNotFound,
    #[error("Social links not found")]
    SocialLinksNotFound,
    #[error("Gift code not found")]
    GiftcodeNotFound,
    #[error("Gift code '{code}' already exists")]
    GiftcodeNotUnique { code: String },
    #[error("Subordinate not found")]
    SubordinateNotFound,
    #[error("Subordinate phone already registered")]
    SubordinateNotUnique,
    #[error("Unexpected error")]
    UnexpectedError(#[from] anyhow::Error),
}
