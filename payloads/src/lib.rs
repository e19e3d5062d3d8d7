pub mod api_client;
pub mod draft;
pub mod fetch;
pub mod forms;
pub mod paging;
pub mod requests;
pub mod responses;
pub mod session;

pub use api_client::{APIClient, ClientError};
pub use paging::{DEFAULT_PAGE_SIZE, PageRequest, PagedResult};

use derive_more::Display;
use serde::{Deserialize, Serialize};

// Every entity id is assigned by the remote server. The client only ever
// echoes them back in paths.

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub String);

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct ProductId(pub String);

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct UpiRecordId(pub String);

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct QrCodeId(pub String);

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct SocialLinkId(pub String);

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct GiftcodeId(pub String);

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct SubordinateId(pub String);

/// Which referral depth a team listing covers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TeamLevel {
    #[display("team1")]
    Team1,
    #[display("team2")]
    Team2,
    #[display("team3")]
    Team3,
}

impl TeamLevel {
    pub const ALL: [TeamLevel; 3] = [Self::Team1, Self::Team2, Self::Team3];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Team1 => "Team Level 1",
            Self::Team2 => "Team Level 2",
            Self::Team3 => "Team Level 3",
        }
    }
}

/// Per-user history collections shown on the user detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum HistoryKind {
    #[display("purchases")]
    Purchases,
    #[display("withdraws")]
    Withdrawals,
    #[display("recharge")]
    Recharges,
}
