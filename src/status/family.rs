use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity families sharing one status catalog each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityFamily {
    PurchaseRequest,
    Bidding,
    BiddingContract,
    Supplier,
    Invoice,
    Payment,
}

impl EntityFamily {
    /// Stable uppercase code used as the parent code of the family's
    /// statuses and as the external pub/sub channel key.
    pub fn code(&self) -> &'static str {
        match self {
            Self::PurchaseRequest => "PURCHASE_REQUEST",
            Self::Bidding => "BIDDING",
            Self::BiddingContract => "BIDDING_CONTRACT",
            Self::Supplier => "SUPPLIER",
            Self::Invoice => "INVOICE",
            Self::Payment => "PAYMENT",
        }
    }

    pub fn all() -> [EntityFamily; 6] {
        [
            Self::PurchaseRequest,
            Self::Bidding,
            Self::BiddingContract,
            Self::Supplier,
            Self::Invoice,
            Self::Payment,
        ]
    }
}

impl fmt::Display for EntityFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for EntityFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PURCHASE_REQUEST" => Ok(Self::PurchaseRequest),
            "BIDDING" => Ok(Self::Bidding),
            "BIDDING_CONTRACT" => Ok(Self::BiddingContract),
            "SUPPLIER" => Ok(Self::Supplier),
            "INVOICE" => Ok(Self::Invoice),
            "PAYMENT" => Ok(Self::Payment),
            _ => Err(format!("Invalid entity family: {s}")),
        }
    }
}
