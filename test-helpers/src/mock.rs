//! A populated store for developing the admin panel against.

use anyhow::Result;
use api::store::NewUser;
use payloads::requests::{
    AddRecharge, CreateSubordinate, GiftcodeDetails, ProductDetails,
    RegisterUser, SocialLinksDetails, UpiDetails,
};
use payloads::responses::{
    Badge, CommissionRates, CycleType, Giftcode, Product, UpiRecord, User,
};
use rust_decimal::{Decimal, dec};

use crate::{TestApp, admin_credentials, png};

pub struct DevDataset {
    /// The user with the deepest team and the longest histories.
    pub top_referrer: User,
    pub users: Vec<User>,
    pub products: Vec<Product>,
    pub upis: Vec<UpiRecord>,
    pub giftcodes: Vec<Giftcode>,
}

impl DevDataset {
    /// Build the dataset through the api where an endpoint exists, and
    /// directly in the store for what only end users can create.
    pub async fn create(app: &TestApp) -> Result<Self> {
        let users = seed_users(app);
        let top_referrer = users[0].clone();

        app.client
            .update_commission(&CommissionRates {
                level1: dec!(10),
                level2: dec!(5),
                level3: dec!(2),
            })
            .await?;

        // team members recharge so the team tables show commission
        for (i, member) in users.iter().enumerate().skip(1).take(12) {
            app.client
                .add_recharge(&AddRecharge {
                    utr: format!("UTR{:010}", 4_000_000 + i),
                    amount: Decimal::from(500 + 250 * i as u64),
                    phone: member.phone.clone(),
                })
                .await?;
        }
        for month in 1..=14 {
            app.store.record_purchase(
                &top_referrer.id,
                if month % 2 == 0 { "Gold plan" } else { "Starter" },
                Decimal::from(100 * month),
            )?;
        }
        let withdrawals = [
            (dec!(250), "success"),
            (dec!(400), "pending"),
            (dec!(90), "failed"),
        ];
        for (amount, status) in withdrawals {
            app.store
                .record_withdrawal(&top_referrer.id, amount, status)?;
        }

        let mut products = Vec::new();
        for details in products_catalog() {
            products.push(app.client.create_product(&details).await?);
        }

        let mut upis = Vec::new();
        for (upi_id, payee_name) in
            [("payments@okaxis", "Realstate Pay"), ("deposit@ybl", "Deposits")]
        {
            upis.push(
                app.client
                    .create_upi(&UpiDetails {
                        upi_id: upi_id.to_string(),
                        payee_name: payee_name.to_string(),
                    })
                    .await?,
            );
        }

        app.client
            .upload_qrs(&[png("qr-main.png"), png("qr-backup.png")])
            .await?;

        app.client
            .create_social_links(&SocialLinksDetails {
                telegram_username_link: "https://t.me/realstate_support"
                    .to_string(),
                telegram_group_link: "https://t.me/realstate_group".to_string(),
            })
            .await?;

        let mut giftcodes = Vec::new();
        for (code, amount, usage_limit) in
            [("WELCOME50", dec!(50), Some(100)), ("DIWALI", dec!(201), None)]
        {
            giftcodes.push(
                app.client
                    .create_giftcode(&GiftcodeDetails {
                        code: code.to_string(),
                        amount,
                        usage_limit,
                    })
                    .await?,
            );
        }

        app.client
            .create_subordinate(&CreateSubordinate {
                admin: admin_credentials(),
                phone: "9888888888".to_string(),
                password: "subordinate".to_string(),
            })
            .await?;

        for phone in ["5000000001", "5000000002"] {
            app.client
                .register_user(&RegisterUser {
                    phone: phone.to_string(),
                    password: "demo1234".to_string(),
                    trade_password: "demo1234".to_string(),
                    ref_code: top_referrer.phone.clone(),
                })
                .await?;
        }

        Ok(Self {
            top_referrer,
            users,
            products,
            upis,
            giftcodes,
        })
    }

    pub fn print_summary(&self) {
        tracing::info!("📋 Development Dataset Summary:");
        tracing::info!(
            "   👥 {} users (+2 demo accounts), 3 pages at the default size",
            self.users.len()
        );
        tracing::info!(
            "   🌳 Top referrer {} ({}): 3 team levels, 14 purchases, \
             3 withdrawals",
            self.top_referrer.phone,
            self.top_referrer.id
        );
        tracing::info!("   📦 {} products", self.products.len());
        for upi in &self.upis {
            tracing::info!("   💳 UPI {} ({})", upi.upi_id, upi.payee_name);
        }
        for giftcode in &self.giftcodes {
            tracing::info!("   🎁 Gift code {}", giftcode.code);
        }
        tracing::info!("   🔑 Subordinate login: 9888888888 / subordinate");
    }
}

/// Twenty-five users. The first refers five, the second three of those
/// refer further, and one more level below that.
fn seed_users(app: &TestApp) -> Vec<User> {
    let mut users: Vec<User> = Vec::new();
    for i in 0..25u64 {
        let referred_by = match i {
            1..=5 => Some(0),
            6..=8 => Some(1),
            9..=10 => Some(6),
            _ => None,
        }
        .map(|index: usize| users[index].id.clone());
        users.push(app.store.insert_user(NewUser {
            phone: format!("98{:08}", 76_543_210 - i * 1_111),
            referred_by,
            total_buy: Decimal::from(i * 450),
            balance: Decimal::from(1_000 + i * 37),
            withdraw_limit: dec!(5000),
            spins_today: (i % 4) as u32,
            is_demo: false,
        }));
    }
    users
}

fn products_catalog() -> Vec<ProductDetails> {
    let product = |name: &str, category: &str, price: Decimal| ProductDetails {
        category_name: category.to_string(),
        is_daily_claim: true,
        product_name: name.to_string(),
        price,
        cycle_type: CycleType::Day,
        cycle_value: 30,
        daily: price / dec!(20),
        hour: Decimal::ZERO,
        badge: Badge::Popular,
        purchase_type: "One time buy".to_string(),
        product_explanation: vec![
            format!("Daily income for {name}"),
            "Withdraw any time".to_string(),
        ],
        image: Some(png(&format!("{}.png", name.to_lowercase()))),
    };
    vec![
        product("Starter", "Primary", dec!(500)),
        ProductDetails {
            badge: Badge::New,
            ..product("Gold plan", "Vip", dec!(2000))
        },
        ProductDetails {
            cycle_type: CycleType::Hour,
            cycle_value: 48,
            hour: dec!(4),
            badge: Badge::Limited,
            ..product("Weekend sprint", "Sessions", dec!(750))
        },
    ]
}
