pub mod commission;
pub mod demo_accounts;
pub mod giftcodes;
pub mod login;
pub mod not_found;
pub mod products;
pub mod qr_codes;
pub mod social_media;
pub mod subordinates;
pub mod upi;
pub mod user_detail;
pub mod users;

pub use commission::CommissionPage;
pub use demo_accounts::DemoAccountsPage;
pub use giftcodes::GiftcodesPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use products::ProductsPage;
pub use qr_codes::QrCodesPage;
pub use social_media::SocialMediaPage;
pub use subordinates::SubordinatesPage;
pub use upi::UpiPage;
pub use user_detail::UserDetail;
pub use users::UsersPage;
