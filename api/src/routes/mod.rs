pub mod admins;
pub mod content;
pub mod payments;
pub mod products;
pub mod users;

use std::fmt::Display;

use actix_web::{
    HttpResponse, Responder, ResponseError, body::BoxBody,
    dev::HttpServiceFactory, get, web,
};
use payloads::{DEFAULT_PAGE_SIZE, PageRequest, PagedResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::store::StoreError;

pub fn api_services() -> impl HttpServiceFactory {
    web::scope("/api")
        .service(health_check)
        .service(admins::admin_login)
        .service(admins::subordinate_login)
        .service(admins::list_subordinates)
        .service(admins::create_subordinate)
        .service(admins::update_subordinate)
        .service(admins::delete_subordinate)
        .service(users::list_users)
        .service(users::search_users)
        .service(users::user_details)
        .service(users::register_user)
        .service(users::user_team)
        .service(users::user_purchases)
        .service(users::user_withdrawals)
        .service(users::user_recharges)
        .service(users::update_withdraw_limit)
        .service(users::update_spins)
        .service(users::delete_user)
        .service(products::list_products)
        .service(products::create_product)
        .service(products::get_product)
        .service(products::update_product)
        .service(products::delete_product)
        .service(payments::get_commission)
        .service(payments::update_commission)
        .service(payments::create_upi)
        .service(payments::list_upis)
        .service(payments::get_upi)
        .service(payments::update_upi)
        .service(payments::delete_upi)
        .service(content::list_social_links)
        .service(content::create_social_links)
        .service(content::update_social_links)
        .service(content::delete_social_links)
        .service(content::list_giftcodes)
        .service(content::create_giftcode)
        .service(content::get_giftcode)
        .service(content::update_giftcode)
        .service(content::delete_giftcode)
}

/// Payment routes live under their own prefix.
pub fn qr_services() -> impl HttpServiceFactory {
    web::scope("/QR/api")
        .service(payments::upload_qr_codes)
        .service(payments::list_qr_codes)
        .service(payments::replace_qr_code)
        .service(payments::delete_qr_code)
        .service(payments::add_recharge)
        .service(payments::minus_recharge)
}

#[get("/health_check")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("healthy")
}

#[derive(Debug, thiserror::Error)]
pub enum APIError {
    #[error("Authentication failed")]
    AuthError(#[source] anyhow::Error),
    #[error("Bad request")]
    BadRequest(#[source] anyhow::Error),
    #[error("Not found")]
    NotFound(#[source] anyhow::Error),
    /// Understood but refused; answered with a 200 and `success: false`.
    #[error("Rejected")]
    Rejected(#[source] anyhow::Error),
    #[error("Something went wrong")]
    UnexpectedError(#[from] anyhow::Error),
}

fn failure(message: impl Display) -> Value {
    json!({ "success": false, "message": message.to_string() })
}

impl ResponseError for APIError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            Self::AuthError(e) => HttpResponse::Unauthorized().json(failure(e)),
            Self::BadRequest(e) => HttpResponse::BadRequest().json(failure(e)),
            Self::NotFound(e) => HttpResponse::NotFound().json(failure(e)),
            Self::Rejected(e) => HttpResponse::Ok().json(failure(e)),
            Self::UnexpectedError(_) => {
                HttpResponse::InternalServerError().json(failure(self))
            }
        }
    }
}

impl From<StoreError> for APIError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UnexpectedError(_) => {
                APIError::UnexpectedError(e.into())
            }
            StoreError::InvalidCredentials => APIError::AuthError(e.into()),
            StoreError::InvalidAdminCredentials => {
                APIError::AuthError(e.into())
            }
            StoreError::UserNotFound => APIError::NotFound(e.into()),
            StoreError::ProductNotFound => APIError::NotFound(e.into()),
            StoreError::UpiNotFound => APIError::NotFound(e.into()),
            StoreError::QrCodeNotFound => APIError::NotFound(e.into()),
            StoreError::SocialLinksNotFound => APIError::NotFound(e.into()),
            StoreError::GiftcodeNotFound => APIError::NotFound(e.into()),
            StoreError::SubordinateNotFound => APIError::NotFound(e.into()),
            StoreError::UpiNotUnique => APIError::Rejected(e.into()),
            _ => APIError::BadRequest(e.into()),
        }
    }
}

/// `?page=&limit=` as sent by the paginated tables.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<u32>,
    limit: Option<u32>,
}

impl PageQuery {
    fn request(&self) -> PageRequest {
        page_request(self.page, self.limit)
    }
}

fn page_request(page: Option<u32>, limit: Option<u32>) -> PageRequest {
    PageRequest::new(page.unwrap_or(1), limit.unwrap_or(DEFAULT_PAGE_SIZE))
}

/// `?limit=` on the unpaginated collections; zero or absent means all rows.
#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    #[serde(default)]
    limit: usize,
}

/// The paginated envelope: rows under `rows_key`, the row count under
/// `count_key` and `totalPages`. A page past the end has no rows but the
/// same counts.
fn page_response<T: Serialize>(
    rows_key: &str,
    count_key: &str,
    page: PagedResult<T>,
) -> Result<HttpResponse, APIError> {
    let mut body = Map::new();
    body.insert("success".into(), Value::Bool(true));
    body.insert(
        rows_key.into(),
        serde_json::to_value(page.items).map_err(anyhow::Error::from)?,
    );
    body.insert(count_key.into(), page.total.into());
    body.insert("totalPages".into(), page.total_pages.into());
    Ok(HttpResponse::Ok().json(body))
}
