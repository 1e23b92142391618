//! Seeded mock backend
//!
//! A router preloaded with a handful of endpoints per service, the session
//! endpoints and a health endpoint for every service. Payloads are small
//! fixed samples.

use sando_domain::constants::HEALTH_PATH_PREFIX;
use sando_domain::{ApiError, ApiResult, HttpMethod, Params, ServiceName};
use sando_infrastructure::AuthTokenStore;
use sando_infrastructure::config::MockServerConfig;
use sando_infrastructure::routing::{Endpoint, MockRouter, RouterBuilder};
use serde_json::{Value, json};
use std::str::FromStr;

const TEMPLES: [(&str, &str, &str); 4] = [
    ("1", "Kinkaku-ji", "Kyoto"),
    ("2", "Senso-ji", "Tokyo"),
    ("3", "Fushimi Inari-taisha", "Kyoto"),
    ("4", "Itsukushima Shrine", "Hatsukaichi"),
];

const ARTICLES: [(&str, &str); 2] = [
    ("visiting-kyoto-temples", "Visiting Kyoto's Temples"),
    ("shrine-etiquette", "Shrine Etiquette for First-Time Visitors"),
];

const GROUPS: [(&str, &str); 2] = [
    ("zen-gardens", "Zen Garden Enthusiasts"),
    ("pilgrims", "Shikoku Pilgrims"),
];

/// Build the seeded router with a token store of its own
pub fn mock_router(config: MockServerConfig) -> MockRouter {
    let store = AuthTokenStore::with_tokens(config.dev_tokens.iter().cloned());
    register_catalog(RouterBuilder::new(config), &store)
        .with_token_store(store)
        .build()
}

/// Append the seeded endpoints to a builder
///
/// Endpoints registered before this call take precedence over the catalog,
/// which lets callers shadow individual routes.
pub fn register_catalog(builder: RouterBuilder, store: &AuthTokenStore) -> RouterBuilder {
    let builder = register_content(builder);
    let builder = register_community(builder, store);
    let builder = register_analytics(builder);
    let builder = register_admin(builder, store);
    let builder = register_search(builder);
    register_health(builder)
}

fn temple_json(id: &str) -> Value {
    match TEMPLES.iter().find(|(tid, _, _)| *tid == id) {
        Some((id, name, location)) => json!({ "id": id, "name": name, "location": location }),
        None => json!({ "id": id, "name": format!("Temple {id}") }),
    }
}

fn param(params: &Params, name: &str) -> ApiResult<String> {
    params
        .get(name)
        .cloned()
        .ok_or_else(|| ApiError::validation(format!("Missing parameter: {name}")))
}

fn body_field(body: Option<&Value>, field: &str) -> Option<String> {
    body?
        .get(field)?
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn register_content(builder: RouterBuilder) -> RouterBuilder {
    builder
        .get("/temples", |_, _| async {
            Ok(Value::Array(
                TEMPLES.iter().map(|(id, _, _)| temple_json(id)).collect(),
            ))
        })
        .get("/temples/:id", |params, _| async move {
            Ok(temple_json(&param(&params, "id")?))
        })
        .get("/articles", |_, _| async {
            Ok(Value::Array(
                ARTICLES
                    .iter()
                    .map(|(slug, title)| json!({ "slug": slug, "title": title }))
                    .collect(),
            ))
        })
        .get("/articles/:slug", |params, _| async move {
            let slug = param(&params, "slug")?;
            ARTICLES
                .iter()
                .find(|(s, _)| *s == slug)
                .map(|(slug, title)| json!({ "slug": slug, "title": title, "body": "" }))
                .ok_or_else(|| ApiError::not_found(format!("Article {slug} not found")))
        })
}

/// Groups, members and session endpoints
///
/// `/auth/login` issues its token inside the handler, before failure
/// injection runs. An injected failure therefore leaves that token valid in
/// the store, and a client retry issues another one.
fn register_community(builder: RouterBuilder, store: &AuthTokenStore) -> RouterBuilder {
    let login_store = store.clone();
    let logout_store = store.clone();
    builder
        .get("/groups", |_, _| async {
            Ok(Value::Array(
                GROUPS
                    .iter()
                    .map(|(id, name)| json!({ "id": id, "name": name }))
                    .collect(),
            ))
        })
        .get("/groups/:groupId", |params, _| async move {
            let id = param(&params, "groupId")?;
            GROUPS
                .iter()
                .find(|(gid, _)| *gid == id)
                .map(|(id, name)| json!({ "id": id, "name": name, "members": 12 }))
                .ok_or_else(|| ApiError::not_found(format!("Group {id} not found")))
        })
        .endpoint(
            Endpoint::new(HttpMethod::Post, "/groups/:groupId/join", |params, _| async move {
                Ok(json!({ "groupId": param(&params, "groupId")?, "joined": true }))
            })
            .with_auth(),
        )
        .get("/members/:id", |params, _| async move {
            let id = param(&params, "id")?;
            Ok(json!({ "id": id, "displayName": format!("Member {id}") }))
        })
        .post("/auth/login", move |_, body| {
            let store = login_store.clone();
            async move {
                let username = body_field(body.as_ref(), "username");
                let password = body_field(body.as_ref(), "password");
                let (Some(username), Some(_)) = (username, password) else {
                    return Err(ApiError::validation("Username and password are required"));
                };
                let token = store.issue();
                Ok(json!({ "token": token, "user": { "username": username } }))
            }
        })
        .endpoint(
            Endpoint::new(HttpMethod::Post, "/auth/logout", move |_, body| {
                let store = logout_store.clone();
                async move {
                    let token = body_field(body.as_ref(), "token")
                        .ok_or_else(|| ApiError::validation("Token is required"))?;
                    Ok(json!({ "loggedOut": store.revoke(&token) }))
                }
            })
            .with_auth(),
        )
}

fn register_analytics(builder: RouterBuilder) -> RouterBuilder {
    builder
        .endpoint(
            Endpoint::new(HttpMethod::Get, "/analytics/overview", |_, _| async {
                Ok(json!({ "visitors": 1280, "pageViews": 5342, "topTemple": "1" }))
            })
            .with_auth(),
        )
        .post("/analytics/events", |_, body| async move {
            match body {
                Some(event) if event.is_object() => Ok(json!({ "accepted": true })),
                _ => Err(ApiError::validation("Event body must be a JSON object")),
            }
        })
}

fn register_admin(builder: RouterBuilder, store: &AuthTokenStore) -> RouterBuilder {
    let stats_store = store.clone();
    let revoke_store = store.clone();
    builder
        .endpoint(
            Endpoint::new(HttpMethod::Get, "/admin/stats", move |_, _| {
                let active = stats_store.len();
                async move {
                    Ok(json!({
                        "activeTokens": active,
                        "temples": TEMPLES.len(),
                        "groups": GROUPS.len(),
                    }))
                }
            })
            .with_auth(),
        )
        .endpoint(
            Endpoint::new(HttpMethod::Post, "/admin/tokens/revoke", move |_, body| {
                let store = revoke_store.clone();
                async move {
                    let token = body_field(body.as_ref(), "token")
                        .ok_or_else(|| ApiError::validation("Token is required"))?;
                    Ok(json!({ "revoked": store.revoke(&token) }))
                }
            })
            .with_auth(),
        )
}

fn register_search(builder: RouterBuilder) -> RouterBuilder {
    builder.get("/search", |params, _| async move {
        let query = params
            .get("q")
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty())
            .ok_or_else(|| ApiError::validation("Query parameter q is required"))?;
        let results: Vec<Value> = TEMPLES
            .iter()
            .filter(|(_, name, location)| {
                name.to_lowercase().contains(&query) || location.to_lowercase().contains(&query)
            })
            .map(|(id, _, _)| temple_json(id))
            .collect();
        Ok(json!({ "query": query, "total": results.len(), "results": results }))
    })
}

fn register_health(builder: RouterBuilder) -> RouterBuilder {
    builder.get(
        &format!("{HEALTH_PATH_PREFIX}/:service"),
        |params, _| async move {
            let service = ServiceName::from_str(&param(&params, "service")?)?;
            Ok(json!({ "service": service, "status": "ok" }))
        },
    )
}
