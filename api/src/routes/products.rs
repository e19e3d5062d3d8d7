use actix_multipart::form::{MultipartForm, bytes::Bytes, text::Text};
use actix_web::{HttpResponse, delete, get, post, put, web};
use anyhow::anyhow;
use payloads::ProductId;
use payloads::requests::{DEFAULT_PURCHASE_TYPE, ImageUpload, ProductDetails};
use payloads::responses::{Badge, CycleType};
use rust_decimal::Decimal;
use serde_json::json;

use crate::store::Store;

use super::{APIError, LimitQuery};

/// Product create/update body. Every value arrives as text; the
/// explanation lines are a JSON array.
#[derive(MultipartForm)]
pub struct ProductUpload {
    #[multipart(rename = "categoryName")]
    category_name: Option<Text<String>>,
    #[multipart(rename = "isdailyClaim")]
    is_daily_claim: Option<Text<String>>,
    #[multipart(rename = "productName")]
    product_name: Option<Text<String>>,
    price: Option<Text<String>>,
    #[multipart(rename = "cycleType")]
    cycle_type: Option<Text<String>>,
    #[multipart(rename = "cycleValue")]
    cycle_value: Option<Text<String>>,
    daily: Option<Text<String>>,
    hour: Option<Text<String>>,
    badge: Option<Text<String>>,
    #[multipart(rename = "purchaseType")]
    purchase_type: Option<Text<String>>,
    #[multipart(rename = "productExplanation")]
    product_explanation: Option<Text<String>>,
    #[multipart(limit = "5MB")]
    image: Option<Bytes>,
}

fn text(field: Option<Text<String>>) -> String {
    field.map(|t| t.0.trim().to_string()).unwrap_or_default()
}

fn decimal(
    name: &'static str,
    field: Option<Text<String>>,
) -> Result<Decimal, APIError> {
    let value = text(field);
    if value.is_empty() {
        return Ok(Decimal::ZERO);
    }
    value
        .parse()
        .map_err(|_| APIError::BadRequest(anyhow!("Invalid {name}")))
}

impl ProductUpload {
    fn into_details(self) -> Result<ProductDetails, APIError> {
        let product_name = text(self.product_name);
        let price = decimal("price", self.price)?;
        if product_name.is_empty() || price <= Decimal::ZERO {
            return Err(APIError::BadRequest(anyhow!(
                "Please fill all required fields!"
            )));
        }
        let explanation = text(self.product_explanation);
        let product_explanation = if explanation.is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&explanation).map_err(|e| {
                let e = anyhow::Error::from(e);
                APIError::BadRequest(e.context("Invalid productExplanation"))
            })?
        };
        let image = self.image.map(|file| ImageUpload {
            file_name: file.file_name.unwrap_or_else(|| "image".into()),
            mime_type: file
                .content_type
                .map(|mime| mime.to_string())
                .unwrap_or_default(),
            bytes: file.data.to_vec(),
        });
        if image.as_ref().is_some_and(|image| !image.is_image()) {
            return Err(APIError::BadRequest(anyhow!(
                "Only image files are allowed"
            )));
        }
        let purchase_type = Some(text(self.purchase_type))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_PURCHASE_TYPE.to_string());
        Ok(ProductDetails {
            category_name: text(self.category_name),
            is_daily_claim: text(self.is_daily_claim) == "true",
            product_name,
            price,
            cycle_type: CycleType::parse(&text(self.cycle_type))
                .unwrap_or_default(),
            cycle_value: text(self.cycle_value).parse().unwrap_or(0),
            daily: decimal("daily", self.daily)?,
            hour: decimal("hour", self.hour)?,
            badge: Badge::parse(&text(self.badge)).unwrap_or_default(),
            purchase_type,
            product_explanation,
            image,
        })
    }
}

#[tracing::instrument(skip(store), ret)]
#[get("/products")]
pub async fn list_products(
    query: web::Query<LimitQuery>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let products = store.list_products(query.limit);
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "products": products,
    })))
}

#[tracing::instrument(skip(form, store), ret)]
#[post("/products/add")]
pub async fn create_product(
    form: MultipartForm<ProductUpload>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let details = form.into_inner().into_details()?;
    let product = store.create_product(&details)?;
    tracing::info!(product_id = %product.id, "product created");
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Product created successfully",
        "product": product,
    })))
}

#[tracing::instrument(skip(store), ret)]
#[get("/products/{product_id}")]
pub async fn get_product(
    product_id: web::Path<ProductId>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let product = store.get_product(&product_id)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "product": product,
    })))
}

#[tracing::instrument(skip(form, store), ret)]
#[put("/products/{product_id}")]
pub async fn update_product(
    product_id: web::Path<ProductId>,
    form: MultipartForm<ProductUpload>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    let details = form.into_inner().into_details()?;
    let product = store.update_product(&product_id, &details)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Product updated successfully",
        "product": product,
    })))
}

#[tracing::instrument(skip(store), ret)]
#[delete("/products/{product_id}")]
pub async fn delete_product(
    product_id: web::Path<ProductId>,
    store: web::Data<Store>,
) -> Result<HttpResponse, APIError> {
    store.delete_product(&product_id)?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Product deleted successfully",
    })))
}
