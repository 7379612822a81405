//! Marketplace integration DTOs.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Selling channel an integration connects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketplaceType {
    #[serde(rename = "mercadolivre")]
    MercadoLivre,
    Shopee,
    Amazon,
    MagazineLuiza,
    B2w,
}

impl MarketplaceType {
    pub const ALL: [MarketplaceType; 5] = [
        MarketplaceType::MercadoLivre,
        MarketplaceType::Shopee,
        MarketplaceType::Amazon,
        MarketplaceType::MagazineLuiza,
        MarketplaceType::B2w,
    ];

    /// Wire value, as sent in `marketplaceType`.
    pub fn as_str(self) -> &'static str {
        match self {
            MarketplaceType::MercadoLivre => "mercadolivre",
            MarketplaceType::Shopee => "shopee",
            MarketplaceType::Amazon => "amazon",
            MarketplaceType::MagazineLuiza => "magazine_luiza",
            MarketplaceType::B2w => "b2w",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            MarketplaceType::MercadoLivre => "Mercado Livre",
            MarketplaceType::Shopee => "Shopee",
            MarketplaceType::Amazon => "Amazon",
            MarketplaceType::MagazineLuiza => "Magazine Luiza",
            MarketplaceType::B2w => "B2W",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            MarketplaceType::MercadoLivre => "🛒",
            MarketplaceType::Shopee => "🛍️",
            MarketplaceType::Amazon => "📦",
            MarketplaceType::MagazineLuiza => "🏪",
            MarketplaceType::B2w => "🏬",
        }
    }

    /// `(value, label)` pairs for a select input, in display order.
    pub fn options() -> Vec<(&'static str, &'static str)> {
        Self::ALL
            .iter()
            .map(|kind| (kind.as_str(), kind.display_name()))
            .collect()
    }
}

impl fmt::Display for MarketplaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known marketplace values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown marketplace type: {0}")]
pub struct UnknownMarketplace(pub String);

impl FromStr for MarketplaceType {
    type Err = UnknownMarketplace;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownMarketplace(s.to_string()))
    }
}

/// Status label reported by the backend. The client never transitions it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationStatus {
    Active,
    Inactive,
    Pending,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    pub id: String,
    pub user_id: String,
    pub marketplace_type: MarketplaceType,
    pub access_token: String,
    pub refresh_token: String,
    pub seller_id: String,
    pub store_name: String,
    pub status: IntegrationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for `POST /marketplace-integrations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntegrationRequest {
    pub user_id: String,
    pub marketplace_type: MarketplaceType,
    pub access_token: String,
    pub refresh_token: String,
    pub seller_id: String,
    pub store_name: String,
}

/// Partial update; fields left as `None` are not sent and stay unchanged on
/// the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIntegrationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketplace_type: Option<MarketplaceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
}

/// Result of `POST /marketplace-integrations/{id}/test`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionTestResult {
    pub success: bool,
    pub message: String,
}

/// Result of `GET /marketplace-integrations/stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationStats {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
    pub error: u64,
    pub pending: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marketplace_wire_values() {
        for kind in MarketplaceType::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.as_str());
            assert_eq!(kind.as_str().parse::<MarketplaceType>().unwrap(), kind);
        }
        assert_eq!(
            serde_json::to_value(MarketplaceType::MagazineLuiza).unwrap(),
            "magazine_luiza"
        );
        assert!("mercado_livre".parse::<MarketplaceType>().is_err());
    }

    #[test]
    fn options_follow_display_order() {
        let options = MarketplaceType::options();
        assert_eq!(options.len(), 5);
        assert_eq!(options[0], ("mercadolivre", "Mercado Livre"));
        assert_eq!(options[4], ("b2w", "B2W"));
    }

    #[test]
    fn integration_parses_camel_case_payload() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000001",
            "userId": "00000000-0000-0000-0000-0000000000aa",
            "marketplaceType": "shopee",
            "accessToken": "at",
            "refreshToken": "rt",
            "sellerId": "seller-1",
            "storeName": "Loja",
            "status": "pending",
            "createdAt": "2024-05-01T12:00:00Z",
            "updatedAt": "2024-05-01T12:00:00Z"
        }"#;
        let integration: Integration = serde_json::from_str(json).unwrap();
        assert_eq!(integration.marketplace_type, MarketplaceType::Shopee);
        assert_eq!(integration.status, IntegrationStatus::Pending);
        assert_eq!(integration.last_sync_at, None);
        assert_eq!(integration.error_message, None);
    }

    #[test]
    fn update_request_only_sends_present_fields() {
        let update = UpdateIntegrationRequest {
            store_name: Some("Nova Loja".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"storeName": "Nova Loja"}));
    }
}
