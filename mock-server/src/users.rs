use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::extract::{Body, Id, Params};
use crate::{created, fail, ok, ok_message, paginate, Db, PageParams, Reply, Store};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const ROLES: [&str; 3] = ["admin", "manager", "user"];

#[derive(Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    pub role: String,
    pub password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct Login {
    pub email: String,
    pub password: String,
}

const NOT_FOUND: &str = "User not found";

impl Store {
    /// Validate and store a new user, or explain why not.
    fn insert_user(&mut self, input: CreateUser) -> Result<User, Reply> {
        if !ROLES.contains(&input.role.as_str()) {
            return Err(fail(StatusCode::BAD_REQUEST, "unsupported role"));
        }
        if self
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&input.email))
        {
            return Err(fail(StatusCode::OK, "email already registered"));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: input.email,
            name: input.name,
            role: input.role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.passwords.insert(user.id, input.password);
        self.users.push(user.clone());
        Ok(user)
    }

    /// Issue a token for `user_id`. Tokens live until the user is deleted;
    /// there is no logout or expiry.
    fn open_session(&mut self, user_id: Uuid) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.sessions.insert(token.clone(), user_id);
        token
    }
}

pub async fn list(State(db): State<Db>, Params(params): Params<PageParams>) -> Reply {
    let store = db.read().await;
    paginate(&store.users, &params)
}

pub async fn create(State(db): State<Db>, Body(input): Body<CreateUser>) -> Reply {
    match db.write().await.insert_user(input) {
        Ok(user) => created(user),
        Err(reply) => reply,
    }
}

pub async fn fetch(State(db): State<Db>, Id(id): Id<Uuid>) -> Reply {
    let store = db.read().await;
    match store.users.iter().find(|u| u.id == id) {
        Some(user) => ok(user),
        None => fail(StatusCode::NOT_FOUND, NOT_FOUND),
    }
}

pub async fn update(
    State(db): State<Db>,
    Id(id): Id<Uuid>,
    Body(input): Body<UpdateUser>,
) -> Reply {
    if let Some(role) = &input.role {
        if !ROLES.contains(&role.as_str()) {
            return fail(StatusCode::BAD_REQUEST, "unsupported role");
        }
    }
    let mut store = db.write().await;
    let Some(user) = store.users.iter_mut().find(|u| u.id == id) else {
        return fail(StatusCode::NOT_FOUND, NOT_FOUND);
    };
    if let Some(name) = input.name {
        user.name = name;
    }
    if let Some(role) = input.role {
        user.role = role;
    }
    if let Some(is_active) = input.is_active {
        user.is_active = is_active;
    }
    user.updated_at = Utc::now();
    ok(user.clone())
}

pub async fn remove(State(db): State<Db>, Id(id): Id<Uuid>) -> Reply {
    let mut store = db.write().await;
    let before = store.users.len();
    store.users.retain(|u| u.id != id);
    if store.users.len() == before {
        return fail(StatusCode::NOT_FOUND, NOT_FOUND);
    }
    store.passwords.remove(&id);
    store.sessions.retain(|_, user_id| *user_id != id);
    ok_message("User deleted")
}

pub async fn register(State(db): State<Db>, Body(input): Body<CreateUser>) -> Reply {
    let mut store = db.write().await;
    match store.insert_user(input) {
        Ok(user) => {
            let token = store.open_session(user.id);
            created(json!({ "user": user, "token": token }))
        }
        Err(reply) => reply,
    }
}

pub async fn login(State(db): State<Db>, Body(input): Body<Login>) -> Reply {
    let mut store = db.write().await;
    let found = store
        .users
        .iter()
        .find(|u| u.email.eq_ignore_ascii_case(&input.email) && u.is_active)
        .filter(|u| store.passwords.get(&u.id) == Some(&input.password))
        .cloned();
    let Some(user) = found else {
        return fail(StatusCode::UNAUTHORIZED, "Invalid credentials");
    };
    let token = store.open_session(user.id);
    ok(json!({ "user": user, "token": token }))
}

pub async fn profile(State(db): State<Db>, headers: HeaderMap) -> Reply {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    let store = db.read().await;
    let user = token
        .and_then(|t| store.sessions.get(t))
        .and_then(|id| store.users.iter().find(|u| u.id == *id));
    match user {
        Some(user) => ok(user),
        None => fail(StatusCode::UNAUTHORIZED, "Unauthorized"),
    }
}

#[cfg(test)]
mod tests {
    use axum::Json;

    use super::*;

    fn new_user(email: &str, role: &str) -> CreateUser {
        CreateUser {
            email: email.to_string(),
            name: "Ana".to_string(),
            role: role.to_string(),
            password: "pw".to_string(),
        }
    }

    #[test]
    fn insert_user_rejects_duplicate_email_with_200() {
        let mut store = Store::default();
        store.insert_user(new_user("ana@example.com", "admin")).unwrap();
        let (status, Json(body)) = store
            .insert_user(new_user("ANA@example.com", "user"))
            .unwrap_err();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], "email already registered");
        assert_eq!(store.users.len(), 1);
    }

    #[test]
    fn insert_user_rejects_unknown_role() {
        let mut store = Store::default();
        let (status, _) = store
            .insert_user(new_user("ana@example.com", "root"))
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn sessions_map_tokens_to_users() {
        let mut store = Store::default();
        let user = store.insert_user(new_user("ana@example.com", "admin")).unwrap();
        let token = store.open_session(user.id);
        assert_eq!(store.sessions.get(&token), Some(&user.id));
        assert_eq!(token.len(), 32);
    }

    #[test]
    fn each_login_adds_a_session() {
        let mut store = Store::default();
        let user = store.insert_user(new_user("ana@example.com", "admin")).unwrap();
        let first = store.open_session(user.id);
        let second = store.open_session(user.id);
        assert_ne!(first, second);
        assert_eq!(store.sessions.len(), 2);
    }
}
