use actix_multipart::form::{MultipartForm, bytes::Bytes};
use actix_web::{HttpResponse, delete, get, post, put, web};
use anyhow::anyhow;
use payloads::requests::{self, QR_MAX_FILES};
use payloads::responses::CommissionRates;
use payloads::{QrCodeId, UpiRecordId};
use serde_json::json;

use crate::store::Store;

use super::APIError;

#[tracing::instrument(skip(store), ret)]
#[get("/commission")]
pub async fn get_commission(
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let rates = store.commission();
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": rates })))
}

#[tracing::instrument(skip(store), ret)]
#[put("/commission/update")]
pub async fn update_commission(
    rates: web::Json<CommissionRates>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let rates = store.set_commission(&rates)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Commission Updated Successfully!",
        "data": rates,
    })))
}

#[tracing::instrument(skip(store), ret)]
#[post("/Admin/recharge")]
pub async fn add_recharge(
    details: web::Json<requests::AddRecharge>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    if details.utr.trim().is_empty() {
        return Err(APIError::BadRequest(anyhow!("UTR is required")));
    }
    let balance = store.add_recharge(&details)?;
    tracing::info!(phone = %details.phone, %balance, "balance credited");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Amount added successfully",
        "balance": balance,
    })))
}

#[tracing::instrument(skip(store), ret)]
#[post("/Admin/recharge/minus")]
pub async fn minus_recharge(
    details: web::Json<requests::MinusRecharge>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let balance = store.minus_recharge(&details)?;
    tracing::info!(phone = %details.phone, %balance, "balance debited");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Amount deducted successfully",
        "balance": balance,
    })))
}

#[tracing::instrument(skip(store), ret)]
#[post("/upi/save")]
pub async fn create_upi(
    details: web::Json<requests::UpiDetails>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    if details.upi_id.trim().is_empty() || details.payee_name.trim().is_empty()
    {
        return Err(APIError::BadRequest(anyhow!("All fields are required")));
    }
    let record = store.create_upi(&details)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "UPI saved successfully",
        "data": record,
    })))
}

#[tracing::instrument(skip(store), ret)]
#[get("/upi/list")]
pub async fn list_upis(
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let records = store.list_upis();
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": records })))
}

#[tracing::instrument(skip(store), ret)]
#[get("/upi/get/{upi_id}")]
pub async fn get_upi(
    upi_id: web::Path<UpiRecordId>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let record = store.get_upi(&upi_id)?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": record })))
}

#[tracing::instrument(skip(store), ret)]
#[put("/upi/edit/{upi_id}")]
pub async fn update_upi(
    upi_id: web::Path<UpiRecordId>,
    details: web::Json<requests::UpiDetails>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let record = store.update_upi(&upi_id, &details)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "UPI updated successfully",
        "data": record,
    })))
}

#[tracing::instrument(skip(store), ret)]
#[delete("/upi/delete/{upi_id}")]
pub async fn delete_upi(
    upi_id: web::Path<UpiRecordId>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    store.delete_upi(&upi_id)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "UPI deleted successfully",
    })))
}

/// One or more payment QR images, each under the field name `qr`.
#[derive(MultipartForm)]
pub struct QrUpload {
    #[multipart(limit = "5MB")]
    qr: Vec<Bytes>,
}

fn image_name(file: &Bytes) -> Result<String, APIError> {
    let is_image = file
        .content_type
        .as_ref()
        .is_some_and(|mime| mime.essence_str().starts_with("image/"));
    if !is_image {
        return Err(APIError::BadRequest(anyhow!(
            "Only image files are allowed"
        )));
    }
    Ok(file.file_name.clone().unwrap_or_else(|| "qr".into()))
}

#[tracing::instrument(skip(form, store), ret)]
#[post("/upload")]
pub async fn upload_qr_codes(
    form: MultipartForm<QrUpload>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let files = form.into_inner().qr;
    if files.is_empty() {
        return Err(APIError::BadRequest(anyhow!("No files uploaded")));
    }
    if files.len() > QR_MAX_FILES {
        return Err(APIError::BadRequest(anyhow!(
            "At most {QR_MAX_FILES} files per upload"
        )));
    }
    let names = files.iter().map(image_name).collect::<Result<Vec<_>, _>>()?;
    let uploaded: Vec<_> =
        names.iter().map(|name| store.add_qr_code(name)).collect();
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": format!("Successfully uploaded {} files!", uploaded.len()),
        "data": uploaded,
    })))
}

/// Answers with a bare array.
#[tracing::instrument(skip(store), ret)]
#[get("/qrs")]
pub async fn list_qr_codes(
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    Ok(HttpResponse::Ok().json(store.list_qr_codes()))
}

#[tracing::instrument(skip(form, store), ret)]
#[put("/qrs/{qr_id}")]
pub async fn replace_qr_code(
    qr_id: web::Path<QrCodeId>,
    form: MultipartForm<QrUpload>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let files = form.into_inner().qr;
    let [file] = files.as_slice() else {
        return Err(APIError::BadRequest(anyhow!(
            "Exactly one file is required"
        )));
    };
    let qr = store.replace_qr_code(&qr_id, &image_name(file)?)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "QR updated successfully.",
        "data": qr,
    })))
}

#[tracing::instrument(skip(store), ret)]
#[delete("/qrs/{qr_id}")]
pub async fn delete_qr_code(
    qr_id: web::Path<QrCodeId>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    store.delete_qr_code(&qr_id)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "QR deleted successfully.",
    })))
}
