use actix_web::{HttpResponse, delete, get, post, put, web};
use payloads::responses::shapes;
use payloads::{PagedResult, TeamLevel, UserId, requests};
use serde::Deserialize;
use serde_json::json;

use crate::store::Store;

use super::{APIError, PageQuery, page_request, page_response};

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    page: Option<u32>,
    limit: Option<u32>,
    #[serde(rename = "isDemo")]
    is_demo: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct TeamQuery {
    page: Option<u32>,
    limit: Option<u32>,
    #[serde(rename = "type")]
    level: TeamLevel,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    query: String,
}

#[tracing::instrument(skip(store), ret)]
#[get("/users/all")]
pub async fn list_users(
    query: web::Query<UserListQuery>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let users = store.list_users(query.is_demo);
    let request = page_request(query.page, query.limit);
    let page = PagedResult::paginate_locally(users, &request);
    page_response(shapes::USERS.items_key, "total", page)
}

#[tracing::instrument(skip(store), ret)]
#[get("/users/search")]
pub async fn search_users(
    query: web::Query<SearchQuery>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let users = store.search_users(&query.query);
    Ok(HttpResponse::Ok().json(json!({ "success": true, "users": users })))
}

#[tracing::instrument(skip(store), ret)]
#[get("/users/details/{user_id}")]
pub async fn user_details(
    user_id: web::Path<UserId>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let user = store.get_user(&user_id)?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "user": user })))
}

#[tracing::instrument(skip(store, details), ret)]
#[post("/users/register")]
pub async fn register_user(
    details: web::Json<requests::RegisterUser>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let user = store.register_user(&details)?;
    tracing::info!(user_id = %user.id, is_demo = user.is_demo, "registered");
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Registration successful!",
        "token": uuid::Uuid::new_v4().to_string(),
    })))
}

#[tracing::instrument(skip(store), ret)]
#[get("/users/{user_id}/team")]
pub async fn user_team(
    user_id: web::Path<UserId>,
    query: web::Query<TeamQuery>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let team = store.team(&user_id, query.level)?;
    let request = page_request(query.page, query.limit);
    let page = PagedResult::paginate_locally(team, &request);
    page_response(shapes::TEAM.items_key, "totalItems", page)
}

#[tracing::instrument(skip(store), ret)]
#[get("/users/{user_id}/purchases")]
pub async fn user_purchases(
    user_id: web::Path<UserId>,
    query: web::Query<PageQuery>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let rows = store.purchases(&user_id)?;
    let page = PagedResult::paginate_locally(rows, &query.request());
    page_response(shapes::PURCHASES.items_key, "totalItems", page)
}

#[tracing::instrument(skip(store), ret)]
#[get("/users/{user_id}/withdraws")]
pub async fn user_withdrawals(
    user_id: web::Path<UserId>,
    query: web::Query<PageQuery>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let rows = store.withdrawals(&user_id)?;
    let page = PagedResult::paginate_locally(rows, &query.request());
    page_response(shapes::WITHDRAWALS.items_key, "totalItems", page)
}

#[tracing::instrument(skip(store), ret)]
#[get("/users/{user_id}/recharge")]
pub async fn user_recharges(
    user_id: web::Path<UserId>,
    query: web::Query<PageQuery>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let rows = store.recharges(&user_id)?;
    let page = PagedResult::paginate_locally(rows, &query.request());
    page_response(shapes::RECHARGES.items_key, "totalItems", page)
}

#[tracing::instrument(skip(store), ret)]
#[put("/users/{user_id}/withdraw-limit")]
pub async fn update_withdraw_limit(
    user_id: web::Path<UserId>,
    details: web::Json<requests::WithdrawLimitUpdate>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let limit = store.set_withdraw_limit(&user_id, details.limit)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "withdrawLimit": limit,
    })))
}

#[tracing::instrument(skip(store), ret)]
#[put("/users/{user_id}/spins")]
pub async fn update_spins(
    user_id: web::Path<UserId>,
    details: web::Json<requests::SpinsUpdate>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let spins = store.set_spins(&user_id, details.spins_today)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "spinsToday": spins,
    })))
}

#[tracing::instrument(skip(store), ret)]
#[delete("/users/{user_id}")]
pub async fn delete_user(
    user_id: web::Path<UserId>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    store.delete_user(&user_id)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "User deleted successfully",
    })))
}
