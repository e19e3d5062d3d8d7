use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::paging::{PageRequest, PageShape, PagedResult};
use crate::responses::{self, shapes};
use crate::session::LoginType;
use crate::{
    GiftcodeId, HistoryKind, ProductId, QrCodeId, SocialLinkId, SubordinateId,
    TeamLevel, UpiRecordId, UserId, requests,
};
use rust_decimal::Decimal;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// Shown when a failed response carries no message of its own.
pub const FALLBACK_ERROR: &str = "Something went wrong";

/// An API client for interfacing with the admin backend.
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    fn format_url(&self, path: &str) -> String {
        format!("{}/{path}", self.address.trim_end_matches('/'))
    }

    async fn get(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> ReqwestResult {
        let request =
            self.inner_client.get(self.format_url(path)).query(query);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        self.get(path, &[]).await
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.post(self.format_url(path)).json(body);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn put(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.put(self.format_url(path)).json(body);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn delete(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.delete(self.format_url(path));

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn delete_with(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> ReqwestResult {
        let request =
            self.inner_client.delete(self.format_url(path)).json(body);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn post_multipart(&self, path: &str, form: Form) -> ReqwestResult {
        let request =
            self.inner_client.post(self.format_url(path)).multipart(form);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn put_multipart(&self, path: &str, form: Form) -> ReqwestResult {
        let request =
            self.inner_client.put(self.format_url(path)).multipart(form);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn paged<T: DeserializeOwned>(
        &self,
        path: &str,
        shape: PageShape,
        page: &PageRequest,
    ) -> Result<PagedResult<T>, ClientError> {
        let response = self.get(path, &page.query_pairs()).await?;
        let body = ok_envelope(response).await?;
        shape.decode(body, page)
    }
}

/// Authentication
impl APIClient {
    /// The health endpoint answers with plain text, not an envelope.
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let response = self.empty_get("api/health_check").await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(ClientError::APIError(status, response.text().await?))
    }

    pub async fn login(
        &self,
        login_type: LoginType,
        details: &requests::LoginCredentials,
    ) -> Result<String, ClientError> {
        let path = match login_type {
            LoginType::Admin => "api/admin/login",
            LoginType::Subordinate => "api/admin/subordinate/login",
        };
        let response = self.post(path, details).await?;
        ok_message(response, "Logged in").await
    }
}

/// Users and their per-user collections
impl APIClient {
    pub async fn list_users(
        &self,
        page: &PageRequest,
    ) -> Result<PagedResult<responses::User>, ClientError> {
        self.paged("api/users/all", shapes::USERS, page).await
    }

    pub async fn search_users(
        &self,
        query: &str,
    ) -> Result<Vec<responses::User>, ClientError> {
        let query = [("query".to_string(), query.to_string())];
        let response = self.get("api/users/search", &query).await?;
        ok_field(response, "users").await
    }

    pub async fn user_details(
        &self,
        user_id: &UserId,
    ) -> Result<responses::User, ClientError> {
        let response =
            self.empty_get(&format!("api/users/details/{user_id}")).await?;
        ok_field(response, "user").await
    }

    pub async fn user_team(
        &self,
        user_id: &UserId,
        level: TeamLevel,
        page: &PageRequest,
    ) -> Result<PagedResult<responses::TeamEntry>, ClientError> {
        let page = page.clone().with_filter("type", level.to_string());
        self.paged(&format!("api/users/{user_id}/team"), shapes::TEAM, &page)
            .await
    }

    pub async fn user_purchases(
        &self,
        user_id: &UserId,
        page: &PageRequest,
    ) -> Result<PagedResult<responses::Purchase>, ClientError> {
        self.user_history(user_id, HistoryKind::Purchases, page).await
    }

    pub async fn user_withdrawals(
        &self,
        user_id: &UserId,
        page: &PageRequest,
    ) -> Result<PagedResult<responses::Withdrawal>, ClientError> {
        self.user_history(user_id, HistoryKind::Withdrawals, page).await
    }

    pub async fn user_recharges(
        &self,
        user_id: &UserId,
        page: &PageRequest,
    ) -> Result<PagedResult<responses::Recharge>, ClientError> {
        self.user_history(user_id, HistoryKind::Recharges, page).await
    }

    async fn user_history<T: DeserializeOwned>(
        &self,
        user_id: &UserId,
        kind: HistoryKind,
        page: &PageRequest,
    ) -> Result<PagedResult<T>, ClientError> {
        let shape = match kind {
            HistoryKind::Purchases => shapes::PURCHASES,
            HistoryKind::Withdrawals => shapes::WITHDRAWALS,
            HistoryKind::Recharges => shapes::RECHARGES,
        };
        self.paged(&format!("api/users/{user_id}/{kind}"), shape, page)
            .await
    }

    /// Returns the limit the server stored.
    pub async fn update_withdraw_limit(
        &self,
        user_id: &UserId,
        details: &requests::WithdrawLimitUpdate,
    ) -> Result<Decimal, ClientError> {
        let response = self
            .put(&format!("api/users/{user_id}/withdraw-limit"), details)
            .await?;
        ok_field(response, "withdrawLimit").await
    }

    /// Returns the spin count the server stored.
    pub async fn update_spins(
        &self,
        user_id: &UserId,
        details: &requests::SpinsUpdate,
    ) -> Result<u32, ClientError> {
        let response =
            self.put(&format!("api/users/{user_id}/spins"), details).await?;
        ok_field(response, "spinsToday").await
    }

    pub async fn delete_user(
        &self,
        user_id: &UserId,
    ) -> Result<String, ClientError> {
        let response = self.delete(&format!("api/users/{user_id}")).await?;
        ok_message(response, "User deleted").await
    }

    /// Register a demo account.
    pub async fn register_user(
        &self,
        details: &requests::RegisterUser,
    ) -> Result<String, ClientError> {
        let response = self.post("api/users/register", details).await?;
        ok_message(response, "Registration successful!").await
    }
}

/// Products
impl APIClient {
    pub async fn list_products(
        &self,
    ) -> Result<Vec<responses::Product>, ClientError> {
        let query = [("limit".to_string(), "0".to_string())];
        let response = self.get("api/products", &query).await?;
        ok_field(response, "products").await
    }

    pub async fn get_product(
        &self,
        product_id: &ProductId,
    ) -> Result<responses::Product, ClientError> {
        let response =
            self.empty_get(&format!("api/products/{product_id}")).await?;
        ok_field(response, "product").await
    }

    pub async fn create_product(
        &self,
        details: &requests::ProductDetails,
    ) -> Result<responses::Product, ClientError> {
        let form = product_form(details)?;
        let response = self.post_multipart("api/products/add", form).await?;
        ok_field(response, "product").await
    }

    pub async fn update_product(
        &self,
        product_id: &ProductId,
        details: &requests::ProductDetails,
    ) -> Result<responses::Product, ClientError> {
        let form = product_form(details)?;
        let response = self
            .put_multipart(&format!("api/products/{product_id}"), form)
            .await?;
        ok_field(response, "product").await
    }

    pub async fn delete_product(
        &self,
        product_id: &ProductId,
    ) -> Result<String, ClientError> {
        let response =
            self.delete(&format!("api/products/{product_id}")).await?;
        ok_message(response, "Product deleted successfully").await
    }
}

/// Commission rates and manual balance adjustments
impl APIClient {
    pub async fn get_commission(
        &self,
    ) -> Result<responses::CommissionRates, ClientError> {
        let response = self.empty_get("api/commission").await?;
        ok_field(response, "data").await
    }

    pub async fn update_commission(
        &self,
        rates: &responses::CommissionRates,
    ) -> Result<String, ClientError> {
        let response = self.put("api/commission/update", rates).await?;
        ok_message(response, "Commission Updated Successfully!").await
    }

    pub async fn add_recharge(
        &self,
        details: &requests::AddRecharge,
    ) -> Result<responses::BalanceAdjustment, ClientError> {
        let response = self.post("QR/api/Admin/recharge", details).await?;
        ok_adjustment(response, "Amount added successfully").await
    }

    pub async fn minus_recharge(
        &self,
        details: &requests::MinusRecharge,
    ) -> Result<responses::BalanceAdjustment, ClientError> {
        let response =
            self.post("QR/api/Admin/recharge/minus", details).await?;
        ok_adjustment(response, "Amount deducted successfully").await
    }
}

/// UPI payee records
impl APIClient {
    pub async fn create_upi(
        &self,
        details: &requests::UpiDetails,
    ) -> Result<responses::UpiRecord, ClientError> {
        let response = self.post("api/upi/save", details).await?;
        ok_field(response, "data").await
    }

    pub async fn list_upis(
        &self,
    ) -> Result<Vec<responses::UpiRecord>, ClientError> {
        let response = self.empty_get("api/upi/list").await?;
        ok_field(response, "data").await
    }

    pub async fn get_upi(
        &self,
        upi_id: &UpiRecordId,
    ) -> Result<responses::UpiRecord, ClientError> {
        let response = self.empty_get(&format!("api/upi/get/{upi_id}")).await?;
        ok_field(response, "data").await
    }

    pub async fn update_upi(
        &self,
        upi_id: &UpiRecordId,
        details: &requests::UpiDetails,
    ) -> Result<String, ClientError> {
        let response =
            self.put(&format!("api/upi/edit/{upi_id}"), details).await?;
        ok_message(response, "UPI updated successfully").await
    }

    pub async fn delete_upi(
        &self,
        upi_id: &UpiRecordId,
    ) -> Result<String, ClientError> {
        let response =
            self.delete(&format!("api/upi/delete/{upi_id}")).await?;
        ok_message(response, "UPI deleted successfully").await
    }
}

/// QR payment images
impl APIClient {
    pub async fn upload_qrs(
        &self,
        files: &[requests::ImageUpload],
    ) -> Result<String, ClientError> {
        let mut form = Form::new();
        for file in files {
            form = form.part("qr", image_part(file)?);
        }
        let response = self.post_multipart("QR/api/upload", form).await?;
        ok_message(
            response,
            &format!("Successfully uploaded {} files!", files.len()),
        )
        .await
    }

    /// The server answers with either a bare array or `{data: [...]}`.
    pub async fn list_qrs(
        &self,
    ) -> Result<Vec<responses::QrCode>, ClientError> {
        let response = self.empty_get("QR/api/qrs").await?;
        match ok_envelope(response).await? {
            rows @ Value::Array(_) => Ok(serde_json::from_value(rows)?),
            body => take_field(body, "data"),
        }
    }

    pub async fn replace_qr(
        &self,
        qr_id: &QrCodeId,
        file: &requests::ImageUpload,
    ) -> Result<String, ClientError> {
        let form = Form::new().part("qr", image_part(file)?);
        let response =
            self.put_multipart(&format!("QR/api/qrs/{qr_id}"), form).await?;
        ok_message(response, "QR updated successfully.").await
    }

    pub async fn delete_qr(
        &self,
        qr_id: &QrCodeId,
    ) -> Result<String, ClientError> {
        let response = self.delete(&format!("QR/api/qrs/{qr_id}")).await?;
        ok_message(response, "QR deleted successfully.").await
    }
}

/// Social media links
impl APIClient {
    pub async fn list_social_links(
        &self,
    ) -> Result<Vec<responses::SocialLinks>, ClientError> {
        let response = self.empty_get("api/SocialMedia").await?;
        ok_field(response, "data").await
    }

    pub async fn create_social_links(
        &self,
        details: &requests::SocialLinksDetails,
    ) -> Result<String, ClientError> {
        let response = self.post("api/SocialMedia", details).await?;
        ok_message(response, "Links saved").await
    }

    pub async fn update_social_links(
        &self,
        link_id: &SocialLinkId,
        details: &requests::SocialLinksDetails,
    ) -> Result<String, ClientError> {
        let response =
            self.put(&format!("api/SocialMedia/{link_id}"), details).await?;
        ok_message(response, "Links updated").await
    }

    pub async fn delete_social_links(
        &self,
        link_id: &SocialLinkId,
    ) -> Result<String, ClientError> {
        let response =
            self.delete(&format!("api/SocialMedia/{link_id}")).await?;
        ok_message(response, "Links deleted").await
    }
}

/// Gift codes
impl APIClient {
    pub async fn list_giftcodes(
        &self,
    ) -> Result<Vec<responses::Giftcode>, ClientError> {
        let query = [("limit".to_string(), "0".to_string())];
        let response = self.get("api/giftcodes", &query).await?;
        ok_field(response, "giftcodes").await
    }

    pub async fn get_giftcode(
        &self,
        giftcode_id: &GiftcodeId,
    ) -> Result<responses::Giftcode, ClientError> {
        let response =
            self.empty_get(&format!("api/giftcodes/{giftcode_id}")).await?;
        ok_field(response, "giftcode").await
    }

    pub async fn create_giftcode(
        &self,
        details: &requests::GiftcodeDetails,
    ) -> Result<responses::Giftcode, ClientError> {
        let response = self.post("api/giftcodes/add", details).await?;
        ok_field(response, "giftcode").await
    }

    pub async fn update_giftcode(
        &self,
        giftcode_id: &GiftcodeId,
        details: &requests::GiftcodeDetails,
    ) -> Result<responses::Giftcode, ClientError> {
        let response = self
            .put(&format!("api/giftcodes/{giftcode_id}"), details)
            .await?;
        ok_field(response, "giftcode").await
    }

    pub async fn delete_giftcode(
        &self,
        giftcode_id: &GiftcodeId,
    ) -> Result<String, ClientError> {
        let response =
            self.delete(&format!("api/giftcodes/{giftcode_id}")).await?;
        ok_message(response, "Gift code deleted").await
    }
}

/// Subordinate admin accounts. Every call carries the managing admin's
/// credentials.
impl APIClient {
    pub async fn list_subordinates(
        &self,
        admin: &requests::AdminCredentials,
    ) -> Result<Vec<responses::Subordinate>, ClientError> {
        let response = self.post("api/admin/subordinates/list", admin).await?;
        ok_field(response, "subordinates").await
    }

    pub async fn create_subordinate(
        &self,
        details: &requests::CreateSubordinate,
    ) -> Result<String, ClientError> {
        let response = self.post("api/admin/subordinates", details).await?;
        ok_message(response, "Subordinate created").await
    }

    pub async fn update_subordinate(
        &self,
        subordinate_id: &SubordinateId,
        details: &requests::UpdateSubordinate,
    ) -> Result<String, ClientError> {
        let response = self
            .put(&format!("api/admin/subordinates/{subordinate_id}"), details)
            .await?;
        ok_message(response, "Subordinate updated").await
    }

    pub async fn delete_subordinate(
        &self,
        subordinate_id: &SubordinateId,
        admin: &requests::AdminCredentials,
    ) -> Result<String, ClientError> {
        let response = self
            .delete_with(
                &format!("api/admin/subordinates/{subordinate_id}"),
                admin,
            )
            .await?;
        ok_message(response, "Subordinate deleted").await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A non-2xx response, containing the server's message or raw text.
    #[error("{1}")]
    APIError(StatusCode, String),
    /// A 2xx response whose envelope reported `success: false`.
    #[error("{0}")]
    Rejected(String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
    #[error("Unexpected response from server")]
    Decode(#[from] serde_json::Error),
    #[error("Unexpected response from server (missing `{0}`)")]
    MissingField(&'static str),
}

/// The human-readable message in an envelope, from `message` or `error`.
pub fn envelope_message(body: &Value) -> Option<String> {
    ["message", "error"].iter().find_map(|key| {
        body.get(*key)
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
    })
}

/// Apply the success-envelope rules to a decoded body. A missing `success`
/// counts as success.
pub fn check_envelope(body: Value) -> Result<Value, ClientError> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        let message =
            envelope_message(&body).unwrap_or_else(|| FALLBACK_ERROR.into());
        return Err(ClientError::Rejected(message));
    }
    Ok(body)
}

/// Check the HTTP status and envelope of a response, returning its body.
pub async fn ok_envelope(
    response: reqwest::Response,
) -> Result<Value, ClientError> {
    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|body| envelope_message(&body))
            .or_else(|| {
                Some(text.trim().to_string()).filter(|t| !t.is_empty())
            })
            .unwrap_or_else(|| {
                status.canonical_reason().unwrap_or(FALLBACK_ERROR).to_string()
            });
        tracing::warn!(%status, "request failed: {message}");
        return Err(ClientError::APIError(status, message));
    }
    if text.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    check_envelope(serde_json::from_str(&text)?)
}

fn take_field<T: DeserializeOwned>(
    body: Value,
    key: &'static str,
) -> Result<T, ClientError> {
    let Value::Object(mut envelope) = body else {
        return Err(ClientError::MissingField(key));
    };
    match envelope.remove(key) {
        Some(Value::Null) | None => Err(ClientError::MissingField(key)),
        Some(value) => Ok(serde_json::from_value(value)?),
    }
}

/// Deserialize one named field of a successful envelope.
pub async fn ok_field<T: DeserializeOwned>(
    response: reqwest::Response,
    key: &'static str,
) -> Result<T, ClientError> {
    take_field(ok_envelope(response).await?, key)
}

/// The server's message for a successful mutation, or `fallback`.
pub async fn ok_message(
    response: reqwest::Response,
    fallback: &str,
) -> Result<String, ClientError> {
    let body = ok_envelope(response).await?;
    Ok(envelope_message(&body).unwrap_or_else(|| fallback.to_string()))
}

async fn ok_adjustment(
    response: reqwest::Response,
    fallback: &str,
) -> Result<responses::BalanceAdjustment, ClientError> {
    let body = ok_envelope(response).await?;
    let balance = match body.get("balance") {
        Some(Value::Null) | None => None,
        Some(value) => Some(serde_json::from_value(value.clone())?),
    };
    Ok(responses::BalanceAdjustment {
        message: envelope_message(&body).unwrap_or_else(|| fallback.into()),
        balance,
    })
}

fn image_part(file: &requests::ImageUpload) -> Result<Part, ClientError> {
    Ok(Part::bytes(file.bytes.clone())
        .file_name(file.file_name.clone())
        .mime_str(&file.mime_type)?)
}

fn product_form(
    details: &requests::ProductDetails,
) -> Result<Form, ClientError> {
    let mut form = Form::new();
    for (name, value) in details.text_fields() {
        form = form.text(name, value);
    }
    if let Some(image) = &details.image {
        form = form.part("image", image_part(image)?);
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_success_counts_as_success() {
        let body = check_envelope(json!({"message": "ok"})).unwrap();
        assert_eq!(envelope_message(&body).as_deref(), Some("ok"));
    }

    #[test]
    fn rejected_envelope_prefers_server_message() {
        let err = check_envelope(
            json!({"success": false, "message": "UPI exists"}),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "UPI exists");

        let err =
            check_envelope(json!({"success": false, "error": "Low balance"}))
                .unwrap_err();
        assert_eq!(err.to_string(), "Low balance");

        let err = check_envelope(json!({"success": false})).unwrap_err();
        assert_eq!(err.to_string(), FALLBACK_ERROR);
    }

    #[test]
    fn take_field_reports_the_missing_key() {
        let err = take_field::<Vec<u32>>(json!({"success": true}), "data")
            .unwrap_err();
        assert!(matches!(err, ClientError::MissingField("data")));
        let rows: Vec<u32> =
            take_field(json!({"data": [1, 2]}), "data").unwrap();
        assert_eq!(rows, vec![1, 2]);
    }

    #[test]
    fn url_joins_without_double_slash() {
        let client = APIClient {
            address: "https://example.com/".into(),
            inner_client: reqwest::Client::new(),
        };
        assert_eq!(
            client.format_url("api/upi/list"),
            "https://example.com/api/upi/list"
        );
    }
}
