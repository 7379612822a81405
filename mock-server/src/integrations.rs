use axum::extract::State;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::extract::{Body, Id, Params};
use crate::{created, fail, ok, ok_message, paginate, Db, PageParams, Reply};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    pub id: Uuid,
    pub user_id: Uuid,
    pub marketplace_type: String,
    pub access_token: String,
    pub refresh_token: String,
    pub seller_id: String,
    pub store_name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sync_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const MARKETPLACES: [&str; 5] = ["mercadolivre", "shopee", "amazon", "magazine_luiza", "b2w"];

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntegration {
    pub user_id: Uuid,
    pub marketplace_type: String,
    pub access_token: String,
    pub refresh_token: String,
    pub seller_id: String,
    pub store_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIntegration {
    pub user_id: Option<Uuid>,
    pub marketplace_type: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub seller_id: Option<String>,
    pub store_name: Option<String>,
}

const NOT_FOUND: &str = "Integration not found";

pub async fn list(State(db): State<Db>, Params(params): Params<PageParams>) -> Reply {
    let store = db.read().await;
    paginate(&store.integrations, &params)
}

pub async fn create(State(db): State<Db>, Body(input): Body<CreateIntegration>) -> Reply {
    if !MARKETPLACES.contains(&input.marketplace_type.as_str()) {
        return fail(StatusCode::BAD_REQUEST, "unsupported marketplace type");
    }
    let mut store = db.write().await;
    let duplicate = store.integrations.iter().any(|i| {
        i.marketplace_type == input.marketplace_type && i.seller_id == input.seller_id
    });
    if duplicate {
        return fail(StatusCode::OK, "duplicate seller");
    }

    let now = Utc::now();
    let integration = Integration {
        id: Uuid::new_v4(),
        user_id: input.user_id,
        marketplace_type: input.marketplace_type,
        access_token: input.access_token,
        refresh_token: input.refresh_token,
        seller_id: input.seller_id,
        store_name: input.store_name,
        status: "pending".to_string(),
        last_sync_at: None,
        error_message: None,
        created_at: now,
        updated_at: now,
    };
    store.integrations.push(integration.clone());
    created(integration)
}

pub async fn fetch(State(db): State<Db>, Id(id): Id<Uuid>) -> Reply {
    let store = db.read().await;
    match store.integrations.iter().find(|i| i.id == id) {
        Some(integration) => ok(integration),
        None => fail(StatusCode::NOT_FOUND, NOT_FOUND),
    }
}

pub async fn update(
    State(db): State<Db>,
    Id(id): Id<Uuid>,
    Body(input): Body<UpdateIntegration>,
) -> Reply {
    if let Some(kind) = &input.marketplace_type {
        if !MARKETPLACES.contains(&kind.as_str()) {
            return fail(StatusCode::BAD_REQUEST, "unsupported marketplace type");
        }
    }
    let mut store = db.write().await;
    let Some(integration) = store.integrations.iter_mut().find(|i| i.id == id) else {
        return fail(StatusCode::NOT_FOUND, NOT_FOUND);
    };
    if let Some(user_id) = input.user_id {
        integration.user_id = user_id;
    }
    if let Some(kind) = input.marketplace_type {
        integration.marketplace_type = kind;
    }
    if let Some(token) = input.access_token {
        integration.access_token = token;
    }
    if let Some(token) = input.refresh_token {
        integration.refresh_token = token;
    }
    if let Some(seller_id) = input.seller_id {
        integration.seller_id = seller_id;
    }
    if let Some(store_name) = input.store_name {
        integration.store_name = store_name;
    }
    integration.updated_at = Utc::now();
    ok(integration.clone())
}

pub async fn remove(State(db): State<Db>, Id(id): Id<Uuid>) -> Reply {
    let mut store = db.write().await;
    let before = store.integrations.len();
    store.integrations.retain(|i| i.id != id);
    if store.integrations.len() == before {
        return fail(StatusCode::NOT_FOUND, NOT_FOUND);
    }
    ok_message("Integration deleted")
}

pub async fn sync(State(db): State<Db>, Id(id): Id<Uuid>) -> Reply {
    let mut store = db.write().await;
    let Some(integration) = store.integrations.iter_mut().find(|i| i.id == id) else {
        return fail(StatusCode::NOT_FOUND, NOT_FOUND);
    };
    let now = Utc::now();
    integration.status = "active".to_string();
    integration.last_sync_at = Some(now);
    integration.error_message = None;
    integration.updated_at = now;
    ok(integration.clone())
}

pub async fn test_connection(State(db): State<Db>, Id(id): Id<Uuid>) -> Reply {
    let store = db.read().await;
    let Some(integration) = store.integrations.iter().find(|i| i.id == id) else {
        return fail(StatusCode::NOT_FOUND, NOT_FOUND);
    };
    if integration.access_token.is_empty() {
        ok(json!({ "success": false, "message": "Missing access token" }))
    } else {
        ok(json!({ "success": true, "message": "Connection OK" }))
    }
}

pub async fn stats(State(db): State<Db>) -> Reply {
    let store = db.read().await;
    let count = |status: &str| {
        store
            .integrations
            .iter()
            .filter(|i| i.status == status)
            .count()
    };
    ok(json!({
        "total": store.integrations.len(),
        "active": count("active"),
        "inactive": count("inactive"),
        "error": count("error"),
        "pending": count("pending"),
    }))
}
