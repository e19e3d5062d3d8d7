//! Raw form inputs and their validation.
//!
//! Every form keeps exactly what the user typed. `validate` turns it into a
//! typed request or a [`FormError`]; nothing reaches the network until it
//! succeeds, and a failed submission leaves the raw input untouched.

use derive_more::Display;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::requests::{
    self, AddRecharge, AdminCredentials, CreateSubordinate,
    DemoPhoneValidation, GiftcodeDetails, ImageUpload, LoginCredentials,
    MinusRecharge, ProductDetails, QR_MAX_BYTES, QR_MAX_FILES, RegisterUser,
    SocialLinksDetails, UpdateSubordinate, UpiDetails,
};
use crate::responses::{
    Badge, CommissionRates, CycleType, Giftcode, Product, SocialLinks,
    UpiRecord,
};
use crate::session::LoginType;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("All fields are required")]
    AllFieldsRequired,
    #[error("Enter phone and password")]
    MissingLogin,
    #[error("Enter admin credentials first")]
    MissingAdminCredentials,
    #[error("Enter subordinate phone & password")]
    MissingSubordinate,
    #[error("Enter phone or password to update")]
    NothingToUpdate,
    #[error("Please fill all required fields!")]
    IncompleteProduct,
    #[error("Enter a valid amount")]
    InvalidAmount,
    #[error("Enter valid minus amount")]
    InvalidMinusAmount,
    #[error("Amount must be less than the current balance ({0})")]
    ExceedsBalance(Decimal),
    #[error("{0} must be a whole number")]
    NotACount(&'static str),
    #[error("{0} must be a non-negative number")]
    NotAnAmount(&'static str),
    #[error("Enter a valid 10-digit phone number")]
    InvalidPhone,
    #[error("Phone number must start with 50")]
    DemoPhonePrefix,
}

fn required(field: &'static str, value: &str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FormError::Required(field))
    } else {
        Ok(value.to_string())
    }
}

/// Parse a non-negative whole number such as a spin count.
pub fn parse_count(field: &'static str, input: &str) -> Result<u32, FormError> {
    input
        .trim()
        .parse::<u32>()
        .map_err(|_| FormError::NotACount(field))
}

/// Parse a non-negative decimal such as a price or a limit.
pub fn parse_amount(
    field: &'static str,
    input: &str,
) -> Result<Decimal, FormError> {
    match Decimal::from_str(input.trim()) {
        Ok(value) if !value.is_sign_negative() => Ok(value),
        _ => Err(FormError::NotAnAmount(field)),
    }
}

/// A strictly positive amount, or `None`.
fn positive_amount(input: &str) -> Option<Decimal> {
    Decimal::from_str(input.trim())
        .ok()
        .filter(|v| *v > Decimal::ZERO)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub phone: String,
    pub password: String,
    pub login_type: LoginType,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginCredentials, FormError> {
        let phone = self.phone.trim();
        if phone.is_empty() || self.password.is_empty() {
            return Err(FormError::MissingLogin);
        }
        Ok(LoginCredentials {
            phone: phone.to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpiForm {
    pub upi_id: String,
    pub payee_name: String,
}

impl UpiForm {
    pub fn from_record(record: &UpiRecord) -> Self {
        Self {
            upi_id: record.upi_id.clone(),
            payee_name: record.payee_name.clone(),
        }
    }

    pub fn validate(&self) -> Result<UpiDetails, FormError> {
        Ok(UpiDetails {
            upi_id: required("UPI ID", &self.upi_id)?,
            payee_name: required("Payee name", &self.payee_name)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialLinksForm {
    pub telegram_username_link: String,
    pub telegram_group_link: String,
}

impl SocialLinksForm {
    pub fn from_links(links: &SocialLinks) -> Self {
        Self {
            telegram_username_link: links.telegram_username_link.clone(),
            telegram_group_link: links.telegram_group_link.clone(),
        }
    }

    pub fn validate(&self) -> Result<SocialLinksDetails, FormError> {
        Ok(SocialLinksDetails {
            telegram_username_link: required(
                "Telegram username link",
                &self.telegram_username_link,
            )?,
            telegram_group_link: required(
                "Telegram group link",
                &self.telegram_group_link,
            )?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommissionForm {
    pub level1: String,
    pub level2: String,
    pub level3: String,
}

impl CommissionForm {
    pub fn from_rates(rates: &CommissionRates) -> Self {
        Self {
            level1: rates.level1.to_string(),
            level2: rates.level2.to_string(),
            level3: rates.level3.to_string(),
        }
    }

    pub fn validate(&self) -> Result<CommissionRates, FormError> {
        Ok(CommissionRates {
            level1: parse_amount("Level 1", &self.level1)?,
            level2: parse_amount("Level 2", &self.level2)?,
            level3: parse_amount("Level 3", &self.level3)?,
        })
    }
}

/// Credit a user's balance against a bank transfer reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RechargeForm {
    pub utr: String,
    pub amount: String,
    pub phone: String,
}

impl RechargeForm {
    pub fn validate(&self) -> Result<AddRecharge, FormError> {
        let utr = required("UTR", &self.utr)?;
        let phone = self.phone.trim();
        let amount = positive_amount(&self.amount)
            .filter(|_| !phone.is_empty())
            .ok_or(FormError::InvalidAmount)?;
        Ok(AddRecharge {
            utr,
            amount,
            phone: phone.to_string(),
        })
    }
}

/// Debit a user's balance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MinusForm {
    pub amount: String,
    pub phone: String,
}

impl MinusForm {
    /// `known_balance` is only available when the form is opened from a
    /// user's detail view; the standalone phone-keyed panel passes `None`
    /// and skips the balance check.
    pub fn validate(
        &self,
        known_balance: Option<Decimal>,
    ) -> Result<MinusRecharge, FormError> {
        let phone = self.phone.trim();
        let amount = positive_amount(&self.amount)
            .filter(|_| !phone.is_empty())
            .ok_or(FormError::InvalidMinusAmount)?;
        match known_balance {
            Some(balance) if amount >= balance => {
                Err(FormError::ExceedsBalance(balance))
            }
            _ => Ok(MinusRecharge {
                amount,
                phone: phone.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoAccountForm {
    pub phone: String,
    pub password: String,
    pub trade_password: String,
    pub ref_code: String,
}

impl DemoAccountForm {
    /// Apply a keystroke to the phone field, ignoring anything that is not
    /// a digit or would exceed ten of them.
    pub fn set_phone(&mut self, input: &str) {
        if requests::accepts_phone_input(input) {
            self.phone = input.to_string();
        }
    }

    pub fn validate(&self) -> Result<RegisterUser, FormError> {
        if self.phone.is_empty()
            || self.password.is_empty()
            || self.trade_password.is_empty()
        {
            return Err(FormError::AllFieldsRequired);
        }
        match requests::validate_demo_phone(&self.phone) {
            DemoPhoneValidation::Valid => {}
            DemoPhoneValidation::WrongPrefix => {
                return Err(FormError::DemoPhonePrefix);
            }
            DemoPhoneValidation::WrongLength
            | DemoPhoneValidation::NotDigits => {
                return Err(FormError::InvalidPhone);
            }
        }
        Ok(RegisterUser {
            phone: self.phone.clone(),
            password: self.password.clone(),
            trade_password: self.trade_password.clone(),
            ref_code: self.ref_code.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminCredentialsForm {
    pub phone: String,
    pub password: String,
}

impl AdminCredentialsForm {
    pub fn validate(&self) -> Result<AdminCredentials, FormError> {
        let phone = self.phone.trim();
        if phone.is_empty() || self.password.is_empty() {
            return Err(FormError::MissingAdminCredentials);
        }
        Ok(AdminCredentials {
            admin_phone: phone.to_string(),
            admin_password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubordinateForm {
    pub phone: String,
    pub password: String,
}

impl SubordinateForm {
    pub fn validate_create(
        &self,
        admin: &AdminCredentials,
    ) -> Result<CreateSubordinate, FormError> {
        let phone = self.phone.trim();
        if phone.is_empty() || self.password.is_empty() {
            return Err(FormError::MissingSubordinate);
        }
        Ok(CreateSubordinate {
            admin: admin.clone(),
            phone: phone.to_string(),
            password: self.password.clone(),
        })
    }

    pub fn validate_update(
        &self,
        admin: &AdminCredentials,
    ) -> Result<UpdateSubordinate, FormError> {
        let phone =
            Some(self.phone.trim().to_string()).filter(|p| !p.is_empty());
        let password = Some(self.password.clone()).filter(|p| !p.is_empty());
        if phone.is_none() && password.is_none() {
            return Err(FormError::NothingToUpdate);
        }
        Ok(UpdateSubordinate {
            admin: admin.clone(),
            phone,
            password,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GiftcodeForm {
    pub code: String,
    pub amount: String,
    pub usage_limit: String,
}

impl GiftcodeForm {
    pub fn from_giftcode(giftcode: &Giftcode) -> Self {
        Self {
            code: giftcode.code.clone(),
            amount: giftcode.amount.to_string(),
            usage_limit: giftcode
                .usage_limit
                .map(|n| n.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<GiftcodeDetails, FormError> {
        let code = required("Code", &self.code)?;
        let amount =
            positive_amount(&self.amount).ok_or(FormError::InvalidAmount)?;
        let usage_limit = match self.usage_limit.trim() {
            "" => None,
            limit => Some(parse_count("Usage limit", limit)?),
        };
        Ok(GiftcodeDetails {
            code,
            amount,
            usage_limit,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub category_name: String,
    pub is_daily_claim: bool,
    pub name: String,
    pub price: String,
    pub cycle_type: CycleType,
    pub cycle_value: String,
    pub daily: String,
    pub hour: String,
    pub badge: Badge,
    pub purchase_type: String,
    /// One entry per explanation line; blank lines are dropped on submit.
    pub explanation: Vec<String>,
    pub image: Option<ImageUpload>,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            category_name: requests::DEFAULT_CATEGORIES[0].to_string(),
            is_daily_claim: false,
            name: String::new(),
            price: String::new(),
            cycle_type: CycleType::Day,
            cycle_value: String::new(),
            daily: String::new(),
            hour: String::new(),
            badge: Badge::Non,
            purchase_type: requests::DEFAULT_PURCHASE_TYPE.to_string(),
            explanation: vec![String::new()],
            image: None,
        }
    }
}

impl ProductForm {
    /// Pre-fill from an existing product. The image is never pre-filled;
    /// leaving it empty keeps the current one.
    pub fn from_product(product: &Product) -> Self {
        let purchase_type = if product.purchase_type.is_empty() {
            requests::DEFAULT_PURCHASE_TYPE.to_string()
        } else {
            product.purchase_type.clone()
        };
        let explanation = if product.product_explanation.is_empty() {
            vec![String::new()]
        } else {
            product.product_explanation.clone()
        };
        Self {
            category_name: product.category_name.clone(),
            is_daily_claim: product.is_daily_claim,
            name: product.product_name.clone(),
            price: product.price.to_string(),
            cycle_type: product.cycle_type,
            cycle_value: product.cycle_value.to_string(),
            daily: product.daily.to_string(),
            hour: product.hour.to_string(),
            badge: product.badge,
            purchase_type,
            explanation,
            image: None,
        }
    }

    pub fn add_explanation_line(&mut self) {
        self.explanation.push(String::new());
    }

    pub fn remove_explanation_line(&mut self, index: usize) {
        if index < self.explanation.len() {
            self.explanation.remove(index);
        }
    }

    pub fn validate(&self) -> Result<ProductDetails, FormError> {
        let rate_missing = match self.cycle_type {
            CycleType::Day => self.daily.trim().is_empty(),
            CycleType::Hour => self.hour.trim().is_empty(),
        };
        if self.name.trim().is_empty()
            || self.price.trim().is_empty()
            || self.cycle_value.trim().is_empty()
            || rate_missing
        {
            return Err(FormError::IncompleteProduct);
        }
        // the unused rate is sent as zero
        let rate = |field, input: &str| match input.trim() {
            "" => Ok(Decimal::ZERO),
            value => parse_amount(field, value),
        };
        Ok(ProductDetails {
            category_name: self.category_name.trim().to_string(),
            is_daily_claim: self.is_daily_claim,
            product_name: self.name.trim().to_string(),
            price: parse_amount("Price", &self.price)?,
            cycle_type: self.cycle_type,
            cycle_value: parse_count("Cycle value", &self.cycle_value)?,
            daily: rate("Daily income", self.daily.as_str())?,
            hour: rate("Hourly income", self.hour.as_str())?,
            badge: self.badge,
            purchase_type: self.purchase_type.clone(),
            product_explanation: self
                .explanation
                .iter()
                .map(|line| line.trim())
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            image: self.image.clone(),
        })
    }
}

/// Why a picked file was not added to the QR upload selection.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SelectionNotice {
    #[display("Skipped: {_0} not an image.")]
    NotAnImage(String),
    #[display("Skipped: {_0} too large.")]
    TooLarge(String),
    #[display("Skipped: {_0} already selected.")]
    Duplicate(String),
    #[display("Maximum {} files allowed.", QR_MAX_FILES)]
    LimitReached,
}

/// Files queued for a QR upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QrSelection {
    files: Vec<ImageUpload>,
}

impl QrSelection {
    pub fn files(&self) -> &[ImageUpload] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.files.len() >= QR_MAX_FILES
    }

    /// Add picked files, skipping non-images, oversized files, and files
    /// already selected, and stopping at the file limit.
    pub fn add(
        &mut self,
        candidates: impl IntoIterator<Item = ImageUpload>,
    ) -> Vec<SelectionNotice> {
        let mut notices = Vec::new();
        let mut accepted: Vec<ImageUpload> = Vec::new();
        for file in candidates {
            if !file.is_image() {
                notices.push(SelectionNotice::NotAnImage(file.file_name));
            } else if file.size() > QR_MAX_BYTES {
                notices.push(SelectionNotice::TooLarge(file.file_name));
            } else if self.files.iter().any(|f| f.same_file(&file)) {
                notices.push(SelectionNotice::Duplicate(file.file_name));
            } else {
                accepted.push(file);
            }
        }
        let slots = QR_MAX_FILES.saturating_sub(self.files.len());
        if accepted.len() > slots {
            accepted.truncate(slots);
            notices.push(SelectionNotice::LimitReached);
        }
        self.files.extend(accepted);
        notices
    }

    pub fn remove(&mut self, index: usize) {
        if index < self.files.len() {
            self.files.remove(index);
        }
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn image(name: &str, size: usize) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            mime_type: "image/png".to_string(),
            bytes: vec![0; size],
        }
    }

    #[test]
    fn upi_requires_both_fields() {
        let form = UpiForm {
            upi_id: " a@bank ".into(),
            payee_name: "".into(),
        };
        assert_eq!(form.validate(), Err(FormError::Required("Payee name")));

        let form = UpiForm {
            upi_id: " a@bank ".into(),
            payee_name: "Alice".into(),
        };
        let details = form.validate().unwrap();
        assert_eq!(details.upi_id, "a@bank");
    }

    #[test]
    fn recharge_checks_utr_before_amount() {
        let form = RechargeForm {
            utr: " ".into(),
            amount: "abc".into(),
            phone: "5011111111".into(),
        };
        assert_eq!(form.validate(), Err(FormError::Required("UTR")));

        for amount in ["", "abc", "0", "-5"] {
            let form = RechargeForm {
                utr: "UTR1".into(),
                amount: amount.into(),
                phone: "5011111111".into(),
            };
            assert_eq!(form.validate(), Err(FormError::InvalidAmount));
        }

        let form = RechargeForm {
            utr: "UTR1".into(),
            amount: "250".into(),
            phone: "".into(),
        };
        assert_eq!(form.validate(), Err(FormError::InvalidAmount));
    }

    #[test]
    fn minus_blocked_at_or_above_known_balance() {
        let form = MinusForm {
            amount: "100".into(),
            phone: "5011111111".into(),
        };
        assert_eq!(
            form.validate(Some(dec!(100))),
            Err(FormError::ExceedsBalance(dec!(100)))
        );
        assert_eq!(
            form.validate(Some(dec!(50))),
            Err(FormError::ExceedsBalance(dec!(50)))
        );
        let request = form.validate(Some(dec!(100.01))).unwrap();
        assert_eq!(request.amount, dec!(100));
    }

    #[test]
    fn minus_without_known_balance_is_unchecked() {
        let form = MinusForm {
            amount: "1000000".into(),
            phone: "5011111111".into(),
        };
        assert!(form.validate(None).is_ok());

        let form = MinusForm {
            amount: "0".into(),
            phone: "5011111111".into(),
        };
        assert_eq!(form.validate(None), Err(FormError::InvalidMinusAmount));
    }

    #[test]
    fn demo_account_rules() {
        let mut form = DemoAccountForm {
            password: "pw".into(),
            trade_password: "tpw".into(),
            ..Default::default()
        };
        assert_eq!(form.validate(), Err(FormError::AllFieldsRequired));

        form.set_phone("50123");
        assert_eq!(form.validate(), Err(FormError::InvalidPhone));

        form.set_phone("501234567890");
        assert_eq!(form.phone, "50123", "overlong input is ignored");

        form.set_phone("9012345678");
        assert_eq!(form.validate(), Err(FormError::DemoPhonePrefix));

        form.set_phone("5012345678");
        let request = form.validate().unwrap();
        assert_eq!(request.phone, "5012345678");
        assert_eq!(request.ref_code, "");
    }

    #[test]
    fn subordinate_update_needs_something() {
        let admin = AdminCredentialsForm {
            phone: "9000000000".into(),
            password: "admin".into(),
        }
        .validate()
        .unwrap();
        let form = SubordinateForm::default();
        assert_eq!(
            form.validate_update(&admin),
            Err(FormError::NothingToUpdate)
        );
        assert_eq!(
            form.validate_create(&admin),
            Err(FormError::MissingSubordinate)
        );

        let form = SubordinateForm {
            phone: "".into(),
            password: "newpass".into(),
        };
        let update = form.validate_update(&admin).unwrap();
        assert_eq!(update.phone, None);
        assert_eq!(update.password.as_deref(), Some("newpass"));
    }

    #[test]
    fn admin_credentials_required() {
        assert_eq!(
            AdminCredentialsForm::default().validate(),
            Err(FormError::MissingAdminCredentials)
        );
    }

    #[test]
    fn product_requires_rate_for_cycle() {
        let mut form = ProductForm {
            name: "Gold".into(),
            price: "500".into(),
            cycle_value: "30".into(),
            hour: "2".into(),
            ..Default::default()
        };
        assert_eq!(form.validate(), Err(FormError::IncompleteProduct));

        form.cycle_type = CycleType::Hour;
        let details = form.validate().unwrap();
        assert_eq!(details.hour, dec!(2));
        assert_eq!(details.daily, Decimal::ZERO);
        assert!(details.product_explanation.is_empty());

        form.price = "five".into();
        assert_eq!(form.validate(), Err(FormError::NotAnAmount("Price")));
    }

    #[test]
    fn product_explanation_lines() {
        let mut form = ProductForm::default();
        form.explanation[0] = "First".into();
        form.add_explanation_line();
        form.add_explanation_line();
        form.explanation[2] = " Third ".into();
        form.remove_explanation_line(7);
        form.name = "P".into();
        form.price = "1".into();
        form.cycle_value = "1".into();
        form.daily = "1".into();
        let details = form.validate().unwrap();
        assert_eq!(details.product_explanation, vec!["First", "Third"]);
    }

    #[test]
    fn commission_rates_parse() {
        let form = CommissionForm {
            level1: "10".into(),
            level2: "5.5".into(),
            level3: "-1".into(),
        };
        assert_eq!(form.validate(), Err(FormError::NotAnAmount("Level 3")));
    }

    #[test]
    fn giftcode_usage_limit_is_optional() {
        let form = GiftcodeForm {
            code: "WELCOME".into(),
            amount: "50".into(),
            usage_limit: "".into(),
        };
        assert_eq!(form.validate().unwrap().usage_limit, None);

        let form = GiftcodeForm {
            usage_limit: "ten".into(),
            ..form
        };
        assert_eq!(form.validate(), Err(FormError::NotACount("Usage limit")));
    }

    #[test]
    fn qr_selection_rules() {
        let mut selection = QrSelection::default();
        let notices = selection.add(vec![
            image("a.png", 10),
            ImageUpload {
                mime_type: "application/pdf".into(),
                ..image("doc.pdf", 10)
            },
            image("huge.png", QR_MAX_BYTES + 1),
        ]);
        assert_eq!(selection.len(), 1);
        assert_eq!(
            notices,
            vec![
                SelectionNotice::NotAnImage("doc.pdf".into()),
                SelectionNotice::TooLarge("huge.png".into()),
            ]
        );

        let notices = selection.add(vec![image("a.png", 10)]);
        assert_eq!(notices[0].to_string(), "Skipped: a.png already selected.");

        // same name, different size is a different file
        assert!(selection.add(vec![image("a.png", 11)]).is_empty());

        let more = (0..10).map(|i| image(&format!("q{i}.png"), 1));
        let notices = selection.add(more);
        assert_eq!(selection.len(), QR_MAX_FILES);
        assert!(selection.is_full());
        assert_eq!(notices, vec![SelectionNotice::LimitReached]);
        assert_eq!(notices[0].to_string(), "Maximum 8 files allowed.");

        selection.remove(0);
        assert_eq!(selection.len(), QR_MAX_FILES - 1);
    }

    #[test]
    fn login_requires_both() {
        let form = LoginForm {
            phone: "9000000000".into(),
            ..Default::default()
        };
        assert_eq!(form.validate(), Err(FormError::MissingLogin));
    }
}
