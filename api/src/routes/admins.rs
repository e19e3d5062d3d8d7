use actix_web::{HttpResponse, delete, post, put, web};
use payloads::SubordinateId;
use payloads::requests::{
    AdminCredentials, CreateSubordinate, LoginCredentials, UpdateSubordinate,
};
use serde_json::json;

use crate::store::Store;

use super::APIError;

#[tracing::instrument(
    skip(credentials, store),
    fields(phone = %credentials.phone),
    ret
)]
#[post("/admin/login")]
pub async fn admin_login(
    credentials: web::Json<LoginCredentials>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    store.admin_login(&credentials)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Login successful",
    })))
}

#[tracing::instrument(
    skip(credentials, store),
    fields(phone = %credentials.phone),
    ret
)]
#[post("/admin/subordinate/login")]
pub async fn subordinate_login(
    credentials: web::Json<LoginCredentials>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    store.subordinate_login(&credentials)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Login successful",
    })))
}

#[tracing::instrument(skip_all, ret)]
#[post("/admin/subordinates/list")]
pub async fn list_subordinates(
    admin: web::Json<AdminCredentials>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let subordinates = store.list_subordinates(&admin)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "subordinates": subordinates,
    })))
}

#[tracing::instrument(skip_all, fields(phone = %details.phone), ret)]
#[post("/admin/subordinates")]
pub async fn create_subordinate(
    details: web::Json<CreateSubordinate>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let subordinate = store.create_subordinate(&details)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Subordinate created",
        "subordinate": subordinate,
    })))
}

#[tracing::instrument(skip(details, store), ret)]
#[put("/admin/subordinates/{subordinate_id}")]
pub async fn update_subordinate(
    subordinate_id: web::Path<SubordinateId>,
    details: web::Json<UpdateSubordinate>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let subordinate = store.update_subordinate(&subordinate_id, &details)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Subordinate updated",
        "subordinate": subordinate,
    })))
}

#[tracing::instrument(skip(admin, store), ret)]
#[delete("/admin/subordinates/{subordinate_id}")]
pub async fn delete_subordinate(
    subordinate_id: web::Path<SubordinateId>,
    admin: web::Json<AdminCredentials>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    store.delete_subordinate(&subordinate_id, &admin)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Subordinate deleted",
    })))
}
