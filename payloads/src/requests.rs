use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::responses::{Badge, CycleType};

pub const PHONE_LEN: usize = 10;
pub const DEMO_PHONE_PREFIX: &str = "50";
pub const QR_MAX_FILES: usize = 8;
pub const QR_MAX_BYTES: usize = 5 * 1024 * 1024;
pub const DEFAULT_PURCHASE_TYPE: &str = "One time buy";
pub const DEFAULT_CATEGORIES: [&str; 4] = ["Primary", "New", "Sessions", "Vip"];

/// Validation result for demo account phone numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoPhoneValidation {
    Valid,
    WrongLength,
    NotDigits,
    WrongPrefix,
}

impl DemoPhoneValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Validate a demo account phone number.
///
/// Rules:
/// - exactly 10 ASCII digits
/// - must start with "50"
pub fn validate_demo_phone(phone: &str) -> DemoPhoneValidation {
    if !phone.chars().all(|c| c.is_ascii_digit()) {
        return DemoPhoneValidation::NotDigits;
    }
    if phone.len() != PHONE_LEN {
        return DemoPhoneValidation::WrongLength;
    }
    if !phone.starts_with(DEMO_PHONE_PREFIX) {
        return DemoPhoneValidation::WrongPrefix;
    }
    DemoPhoneValidation::Valid
}

/// Whether a partially typed phone is still acceptable input: digits only,
/// at most ten of them.
pub fn accepts_phone_input(input: &str) -> bool {
    input.len() <= PHONE_LEN && input.chars().all(|c| c.is_ascii_digit())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUser {
    pub phone: String,
    pub password: String,
    pub trade_password: String,
    pub ref_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawLimitUpdate {
    pub limit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinsUpdate {
    pub spins_today: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpiDetails {
    pub upi_id: String,
    pub payee_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinksDetails {
    pub telegram_username_link: String,
    pub telegram_group_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddRecharge {
    pub utr: String,
    pub amount: Decimal,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinusRecharge {
    pub amount: Decimal,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftcodeDetails {
    pub code: String,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
}

/// Credentials of the admin on whose behalf subordinates are managed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCredentials {
    pub admin_phone: String,
    pub admin_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubordinate {
    #[serde(flatten)]
    pub admin: AdminCredentials,
    pub phone: String,
    pub password: String,
}

/// Only the fields that are present are changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubordinate {
    #[serde(flatten)]
    pub admin: AdminCredentials,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// An image read from a file input, ready to go into a multipart body.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// Two selections are the same file if name and size match.
    pub fn same_file(&self, other: &ImageUpload) -> bool {
        self.file_name == other.file_name && self.size() == other.size()
    }
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.size())
            .finish()
    }
}

/// Product fields, sent as a multipart form together with an optional
/// image.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
    pub category_name: String,
    pub is_daily_claim: bool,
    pub product_name: String,
    pub price: Decimal,
    pub cycle_type: CycleType,
    pub cycle_value: u32,
    pub daily: Decimal,
    pub hour: Decimal,
    pub badge: Badge,
    pub purchase_type: String,
    pub product_explanation: Vec<String>,
    pub image: Option<ImageUpload>,
}

impl ProductDetails {
    /// Text fields of the multipart body, in wire names.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("categoryName", self.category_name.clone()),
            ("isdailyClaim", self.is_daily_claim.to_string()),
            ("productName", self.product_name.clone()),
            ("price", self.price.to_string()),
            ("cycleType", self.cycle_type.to_string()),
            ("cycleValue", self.cycle_value.to_string()),
            ("daily", self.daily.to_string()),
            ("hour", self.hour.to_string()),
            ("badge", self.badge.to_string()),
            ("purchaseType", self.purchase_type.clone()),
            (
                "productExplanation",
                // a Vec<String> always serializes
                serde_json::to_string(&self.product_explanation)
                    .unwrap_or_else(|_| "[]".to_string()),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    #[test]
    fn demo_phone_rules() {
        assert!(validate_demo_phone("5012345678").is_valid());
        assert_eq!(
            validate_demo_phone("501234567"),
            DemoPhoneValidation::WrongLength
        );
        assert_eq!(
            validate_demo_phone("9012345678"),
            DemoPhoneValidation::WrongPrefix
        );
        assert_eq!(
            validate_demo_phone("50123abc78"),
            DemoPhoneValidation::NotDigits
        );
    }

    #[test]
    fn phone_input_filter() {
        assert!(accepts_phone_input(""));
        assert!(accepts_phone_input("5012345678"));
        assert!(!accepts_phone_input("50123456789"));
        assert!(!accepts_phone_input("50-1"));
    }

    #[test]
    fn subordinate_update_omits_unset_fields() {
        let update = UpdateSubordinate {
            admin: AdminCredentials {
                admin_phone: "9000000000".into(),
                admin_password: "secret".into(),
            },
            phone: None,
            password: Some("new".into()),
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "adminPhone": "9000000000",
                "adminPassword": "secret",
                "password": "new",
            })
        );
    }

    #[test]
    fn product_fields_use_wire_names() {
        let details = ProductDetails {
            category_name: "Vip".into(),
            is_daily_claim: true,
            product_name: "Gold plan".into(),
            price: dec!(499),
            cycle_type: CycleType::Day,
            cycle_value: 30,
            daily: dec!(25),
            hour: Decimal::ZERO,
            badge: Badge::Limited,
            purchase_type: DEFAULT_PURCHASE_TYPE.into(),
            product_explanation: vec!["Daily payout".into()],
            image: None,
        };
        let fields = details.text_fields();
        let get = |name: &str| {
            fields
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("isdailyClaim"), Some("true"));
        assert_eq!(get("cycleType"), Some("day"));
        assert_eq!(get("badge"), Some("limited"));
        assert_eq!(get("productExplanation"), Some(r#"["Daily payout"]"#));
    }
}
