use actix_web::{HttpResponse, delete, get, post, put, web};
use anyhow::anyhow;
use payloads::requests;
use payloads::{GiftcodeId, SocialLinkId};
use serde_json::json;

use crate::store::Store;

use super::{APIError, LimitQuery};

#[tracing::instrument(skip(store), ret)]
#[get("/SocialMedia")]
pub async fn list_social_links(
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let links = store.list_social_links();
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": links })))
}

#[tracing::instrument(skip(store), ret)]
#[post("/SocialMedia")]
pub async fn create_social_links(
    details: web::Json<requests::SocialLinksDetails>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let links = store.create_social_links(&details);
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Links saved",
        "data": links,
    })))
}

#[tracing::instrument(skip(store), ret)]
#[put("/SocialMedia/{link_id}")]
pub async fn update_social_links(
    link_id: web::Path<SocialLinkId>,
    details: web::Json<requests::SocialLinksDetails>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let links = store.update_social_links(&link_id, &details)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Links updated",
        "data": links,
    })))
}

#[tracing::instrument(skip(store), ret)]
#[delete("/SocialMedia/{link_id}")]
pub async fn delete_social_links(
    link_id: web::Path<SocialLinkId>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    store.delete_social_links(&link_id)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Links deleted",
    })))
}

#[tracing::instrument(skip(store), ret)]
#[get("/giftcodes")]
pub async fn list_giftcodes(
    query: web::Query<LimitQuery>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let giftcodes = store.list_giftcodes(query.limit);
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "giftcodes": giftcodes,
    })))
}

#[tracing::instrument(skip(store), ret)]
#[post("/giftcodes/add")]
pub async fn create_giftcode(
    details: web::Json<requests::GiftcodeDetails>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    if details.code.trim().is_empty() {
        return Err(APIError::BadRequest(anyhow!("Code is required")));
    }
    let giftcode = store.create_giftcode(&details)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Gift code created",
        "giftcode": giftcode,
    })))
}

#[tracing::instrument(skip(store), ret)]
#[get("/giftcodes/{giftcode_id}")]
pub async fn get_giftcode(
    giftcode_id: web::Path<GiftcodeId>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let giftcode = store.get_giftcode(&giftcode_id)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "giftcode": giftcode,
    })))
}

#[tracing::instrument(skip(store), ret)]
#[put("/giftcodes/{giftcode_id}")]
pub async fn update_giftcode(
    giftcode_id: web::Path<GiftcodeId>,
    details: web::Json<requests::GiftcodeDetails>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let giftcode = store.update_giftcode(&giftcode_id, &details)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Gift code updated",
        "giftcode": giftcode,
    })))
}

#[tracing::instrument(skip(store), ret)]
#[delete("/giftcodes/{giftcode_id}")]
pub async fn delete_giftcode(
    giftcode_id: web::Path<GiftcodeId>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    store.delete_giftcode(&giftcode_id)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Gift code deleted",
    })))
}
