//! Canonical event types emitted by the launchpad contract.
//!
//! These mirror the topics published in `contracts/launchpad/src/events.rs`.
//! Sale-scoped events carry the sale id as their second topic; registry
//! events have a single topic.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the launchpad contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A new sale was created (`created` topic).
    SaleCreated,
    NameUpdated,
    /// The allowlist root was published or replaced (`root_set` topic).
    RootUpdated,
    DatesUpdated,
    PriceUpdated,
    ReleaseDelayUpdated,
    VestingDurationUpdated,
    MinTokenBuyUpdated,
    OperatorTransferred,
    /// The operator locked the configuration (`validated` topic).
    SaleValidated,
    /// Sale tokens were deposited (`cap_inc` topic).
    CapIncreased,
    /// A buyer purchased tokens (`purchase` topic).
    TokensPurchased,
    /// A buyer claimed vested tokens (`claim` topic).
    TokensClaimed,
    /// Proceeds were paid to the operator and fee recipient (`wd_funds` topic).
    FundsWithdrawn,
    /// Unsold tokens were returned to the operator (`wd_tokens` topic).
    TokensWithdrawn,
    TrustedSet,
    ProtocolFeeUpdated,
    FeeRecipientUpdated,
    OwnershipTransferred,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "created" => Self::SaleCreated,
            "name_set" => Self::NameUpdated,
            "root_set" => Self::RootUpdated,
            "dates_set" => Self::DatesUpdated,
            "price_set" => Self::PriceUpdated,
            "delay_set" => Self::ReleaseDelayUpdated,
            "vest_set" => Self::VestingDurationUpdated,
            "min_set" => Self::MinTokenBuyUpdated,
            "op_set" => Self::OperatorTransferred,
            "validated" => Self::SaleValidated,
            "cap_inc" => Self::CapIncreased,
            "purchase" => Self::TokensPurchased,
            "claim" => Self::TokensClaimed,
            "wd_funds" => Self::FundsWithdrawn,
            "wd_tokens" => Self::TokensWithdrawn,
            "trusted" => Self::TrustedSet,
            "fee_set" => Self::ProtocolFeeUpdated,
            "feerc_set" => Self::FeeRecipientUpdated,
            "own_set" => Self::OwnershipTransferred,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SaleCreated => "sale_created",
            Self::NameUpdated => "name_updated",
            Self::RootUpdated => "root_updated",
            Self::DatesUpdated => "dates_updated",
            Self::PriceUpdated => "price_updated",
            Self::ReleaseDelayUpdated => "release_delay_updated",
            Self::VestingDurationUpdated => "vesting_duration_updated",
            Self::MinTokenBuyUpdated => "min_token_buy_updated",
            Self::OperatorTransferred => "operator_transferred",
            Self::SaleValidated => "sale_validated",
            Self::CapIncreased => "cap_increased",
            Self::TokensPurchased => "tokens_purchased",
            Self::TokensClaimed => "tokens_claimed",
            Self::FundsWithdrawn => "funds_withdrawn",
            Self::TokensWithdrawn => "tokens_withdrawn",
            Self::TrustedSet => "trusted_set",
            Self::ProtocolFeeUpdated => "protocol_fee_updated",
            Self::FeeRecipientUpdated => "fee_recipient_updated",
            Self::OwnershipTransferred => "ownership_transferred",
            Self::Unknown => "unknown",
        }
    }

    /// Registry events are not tied to a sale.
    pub fn is_sale_scoped(&self) -> bool {
        !matches!(
            self,
            Self::ProtocolFeeUpdated
                | Self::FeeRecipientUpdated
                | Self::OwnershipTransferred
                | Self::Unknown
        )
    }
}

/// A fully decoded launchpad event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchpadEvent {
    /// RPC event id; unique per contract event and used for deduplication.
    pub event_id: String,
    pub event_type: String,
    pub sale_id: Option<String>,
    /// Operator, beneficiary or new admin address, depending on the kind.
    pub actor: Option<String>,
    /// Token amount, price or fee, kept as a string to preserve `i128`.
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_id: String,
    pub event_type: String,
    pub sale_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
