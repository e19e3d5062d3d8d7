use derive_more::Display;
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::paging::PageShape;
use crate::{
    GiftcodeId, ProductId, QrCodeId, SocialLinkId, SubordinateId, UpiRecordId,
    UserId,
};

/// Row keys of the paginated user endpoints.
pub mod shapes {
    use super::PageShape;

    pub const USERS: PageShape = PageShape::named("users");
    pub const TEAM: PageShape = PageShape::named("items");
    pub const PURCHASES: PageShape = PageShape::named("purchases");
    pub const WITHDRAWALS: PageShape = PageShape::named("withdrawHistory");
    pub const RECHARGES: PageShape = PageShape::named("rechargeHistory");
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub phone: String,
    #[serde(default)]
    pub referred_by: Option<String>,
    #[serde(default)]
    pub total_buy: Decimal,
    #[serde(default)]
    pub balance: Decimal,
    #[serde(default)]
    pub withdraw_limit: Decimal,
    #[serde(default)]
    pub lucky_spin: LuckySpin,
    #[serde(default)]
    pub bank_details: Option<BankDetails>,
    #[serde(default)]
    pub is_demo: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl User {
    pub fn vip_level(&self) -> VipLevel {
        VipLevel::for_total_buy(self.total_buy)
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct LuckySpin {
    #[serde(default)]
    pub spins_today: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BankDetails {
    pub holder_name: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub bank_name: String,
    pub upi_id: String,
}

/// VIP tier, one step per 1000 of lifetime purchases, capped at 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
#[display("VIP{_0}")]
pub struct VipLevel(pub u8);

impl VipLevel {
    const STEP: Decimal = Decimal::ONE_THOUSAND;
    const MAX: u8 = 6;

    pub fn for_total_buy(total_buy: Decimal) -> Self {
        let mut level = 0;
        while level < Self::MAX
            && total_buy >= Self::STEP * Decimal::from(level + 1)
        {
            level += 1;
        }
        Self(level)
    }
}

/// One aggregated row of a user's referral team at a given depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamEntry {
    #[serde(default)]
    pub ids: Vec<UserId>,
    #[serde(default)]
    pub total_recharge: Decimal,
    #[serde(default)]
    pub total_commission: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recharge {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default)]
    pub utr: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CycleType {
    #[default]
    #[display("day")]
    Day,
    #[display("hour")]
    Hour,
}

impl CycleType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "day" => Some(Self::Day),
            "hour" => Some(Self::Hour),
            _ => None,
        }
    }
}

/// Product badge. `non` and `popular` both present as "Basic".
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    #[default]
    #[display("non")]
    Non,
    #[display("popular")]
    Popular,
    #[display("new")]
    New,
    #[display("limited")]
    Limited,
}

impl Badge {
    pub const SELECTABLE: [Badge; 3] =
        [Self::Popular, Self::New, Self::Limited];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Non | Self::Popular => "Basic",
            Self::New => "Normal",
            Self::Limited => "VIP Popular",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "non" => Some(Self::Non),
            "popular" => Some(Self::Popular),
            "new" => Some(Self::New),
            "limited" => Some(Self::Limited),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    #[serde(default)]
    pub category_name: String,
    #[serde(default, rename = "isdailyClaim")]
    pub is_daily_claim: bool,
    pub product_name: String,
    pub price: Decimal,
    #[serde(default)]
    pub cycle_type: CycleType,
    #[serde(default)]
    pub cycle_value: u32,
    #[serde(default)]
    pub daily: Decimal,
    #[serde(default)]
    pub hour: Decimal,
    #[serde(default)]
    pub badge: Badge,
    #[serde(default)]
    pub purchase_type: String,
    #[serde(default)]
    pub product_explanation: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpiRecord {
    #[serde(rename = "_id")]
    pub id: UpiRecordId,
    pub upi_id: String,
    pub payee_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    #[serde(rename = "_id")]
    pub id: QrCodeId,
    pub filename: String,
    pub url: String,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    #[serde(rename = "_id")]
    pub id: SocialLinkId,
    #[serde(default)]
    pub telegram_username_link: String,
    #[serde(default)]
    pub telegram_group_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Giftcode {
    #[serde(rename = "_id")]
    pub id: GiftcodeId,
    pub code: String,
    pub amount: Decimal,
    #[serde(default)]
    pub usage_limit: Option<u32>,
    #[serde(default)]
    pub used_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subordinate {
    #[serde(rename = "_id")]
    pub id: SubordinateId,
    pub phone: String,
    #[serde(default)]
    pub user_type: String,
}

/// Referral commission percentages per team depth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommissionRates {
    pub level1: Decimal,
    pub level2: Decimal,
    pub level3: Decimal,
}

/// Result of crediting or debiting a user's balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceAdjustment {
    pub message: String,
    #[serde(default)]
    pub balance: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;
    use serde_json::json;

    #[test]
    fn vip_thresholds() {
        let level = |n| VipLevel::for_total_buy(n).to_string();
        assert_eq!(level(dec!(0)), "VIP0");
        assert_eq!(level(dec!(999.99)), "VIP0");
        assert_eq!(level(dec!(1000)), "VIP1");
        assert_eq!(level(dec!(5999)), "VIP5");
        assert_eq!(level(dec!(6000)), "VIP6");
        assert_eq!(level(dec!(250000)), "VIP6");
    }

    #[test]
    fn user_tolerates_sparse_records() {
        let user: User = serde_json::from_value(json!({
            "_id": "u1",
            "phone": "5011111111",
            "totalBuy": 2500,
            "balance": "10.50",
            "luckySpin": {"spinsToday": 2},
        }))
        .unwrap();
        assert_eq!(user.id, UserId("u1".into()));
        assert_eq!(user.balance, dec!(10.50));
        assert_eq!(user.lucky_spin.spins_today, 2);
        assert_eq!(user.withdraw_limit, Decimal::ZERO);
        assert_eq!(user.vip_level(), VipLevel(2));
        assert!(user.bank_details.is_none());
    }

    #[test]
    fn product_wire_names() {
        let product: Product = serde_json::from_value(json!({
            "_id": "p1",
            "productName": "Starter",
            "price": 100,
            "isdailyClaim": true,
            "cycleType": "hour",
            "cycleValue": 12,
            "badge": "limited",
            "productExplanation": ["a", "b"],
        }))
        .unwrap();
        assert!(product.is_daily_claim);
        assert_eq!(product.cycle_type, CycleType::Hour);
        assert_eq!(product.badge.label(), "VIP Popular");
        assert_eq!(product.product_explanation.len(), 2);
    }
}
