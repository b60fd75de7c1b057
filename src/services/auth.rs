//! Auth Service
//!
//! Boundary to the OAuth identity provider (GoTrue-style REST API) plus the
//! session gate hooks used by pages. The provider handles the actual OAuth
//! dance; this module only initiates sign-in, exchanges the callback code for
//! a session, and keeps the session in localStorage so page loads can read
//! the current identity synchronously.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use crate::services::canvas_store::now_ms;

// ============================================================================
// Configuration
// ============================================================================

/// localStorage key holding the current session
pub const SESSION_KEY: &str = "vessel:session";

/// Base URL of the identity provider's auth API. Baked in at build time;
/// defaults to a local supabase dev stack.
pub fn auth_base_url() -> &'static str {
    option_env!("VESSEL_AUTH_URL").unwrap_or("http://localhost:54321/auth/v1")
}

/// Publishable API key sent with provider requests. Empty means none.
pub fn auth_api_key() -> &'static str {
    option_env!("VESSEL_AUTH_KEY").unwrap_or("")
}

// ============================================================================
// Session Types
// ============================================================================

/// Identity as reported by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Provider session, persisted verbatim in localStorage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Expiry as unix seconds; absent means the provider set no expiry
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(at) => at * 1000 <= now_ms(),
            None => false,
        }
    }
}

// ============================================================================
// Sign-in / Sign-out
// ============================================================================

/// Authorization URL for `provider`, sending the user back to
/// `{origin}/auth/callback` once the provider is done.
pub fn build_authorize_url(base: &str, provider: &str, origin: &str) -> String {
    let redirect: String =
        js_sys::encode_uri_component(&format!("{}/auth/callback", origin)).into();
    format!("{}/authorize?provider={}&redirect_to={}", base, provider, redirect)
}

/// Initiate OAuth sign-in by navigating the whole page to the provider's
/// authorization endpoint. The provider redirects back to /auth/callback.
pub fn sign_in_with_oauth(provider: &str) -> Result<(), String> {
    let location = web_sys::window().ok_or("no window")?.location();
    let origin = location.origin().map_err(|_| "no origin".to_string())?;
    let url = build_authorize_url(auth_base_url(), provider, &origin);
    location
        .set_href(&url)
        .map_err(|_| "failed to navigate to provider".to_string())
}

/// Drop the persisted session. The provider-side session is left to expire
/// on its own.
pub fn sign_out() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(SESSION_KEY);
    }
}

// ============================================================================
// Callback Handling
// ============================================================================

/// What the callback page should do for a given `code` query parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    /// Exchange the authorization code for a session, then go to the dashboard
    Exchange(String),
    /// No usable code; return to login without touching the provider
    BackToLogin,
}

pub fn plan_callback(code: Option<String>) -> CallbackAction {
    match code {
        Some(code) if !code.is_empty() => CallbackAction::Exchange(code),
        _ => CallbackAction::BackToLogin,
    }
}

/// Exchange an authorization code for a session and persist it.
pub async fn exchange_code_for_session(code: &str) -> Result<Session, String> {
    #[derive(Serialize)]
    struct ExchangeRequest<'a> {
        code: &'a str,
    }

    let url = format!("{}/token?grant_type=authorization_code", auth_base_url());
    let session: Session = post_json(&url, &ExchangeRequest { code }).await?;
    persist_session(&session)?;
    Ok(session)
}

// ============================================================================
// Current Identity
// ============================================================================

/// The persisted session, if present, parseable, and not expired.
/// A malformed or expired session reads as signed out.
pub fn current_session() -> Option<Session> {
    let raw = local_storage()?.get_item(SESSION_KEY).ok()??;
    let session: Session = match serde_json::from_str(&raw) {
        Ok(session) => session,
        Err(e) => {
            log::warn!("Dropping malformed session record: {}", e);
            return None;
        }
    };
    if session.is_expired() {
        return None;
    }
    Some(session)
}

pub fn current_user() -> Option<AuthUser> {
    current_session().map(|s| s.user)
}

pub fn persist_session(session: &Session) -> Result<(), String> {
    let raw = serde_json::to_string(session)
        .map_err(|e| format!("failed to serialize session: {}", e))?;
    local_storage()
        .ok_or("localStorage unavailable")?
        .set_item(SESSION_KEY, &raw)
        .map_err(|_| "failed to persist session".to_string())
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

// ============================================================================
// Session Gate Hooks
// ============================================================================

/// Protected-page policy: absent identity redirects to /login.
pub fn use_require_session() {
    let navigate = use_navigate();
    Effect::new(move |_| {
        if current_user().is_none() {
            navigate("/login", NavigateOptions { replace: true, ..Default::default() });
        }
    });
}

/// Public-page policy: present identity redirects to /dashboard.
pub fn use_redirect_authenticated() {
    let navigate = use_navigate();
    Effect::new(move |_| {
        if current_user().is_some() {
            navigate("/dashboard", NavigateOptions { replace: true, ..Default::default() });
        }
    });
}

// ============================================================================
// Fetch Plumbing
// ============================================================================

/// POST a JSON body and decode a JSON response via the browser fetch API.
async fn post_json<B, R>(url: &str, body: &B) -> Result<R, String>
where
    B: Serialize,
    R: for<'de> Deserialize<'de>,
{
    let headers = Headers::new().map_err(|_| "failed to build headers".to_string())?;
    headers
        .set("Content-Type", "application/json")
        .map_err(|_| "failed to set headers".to_string())?;
    if !auth_api_key().is_empty() {
        headers
            .set("apikey", auth_api_key())
            .map_err(|_| "failed to set headers".to_string())?;
    }

    let payload =
        serde_json::to_string(body).map_err(|e| format!("failed to serialize request: {}", e))?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&payload.into());

    let request = Request::new_with_str_and_init(url, &init)
        .map_err(|_| format!("invalid request: {}", url))?;

    let window = web_sys::window().ok_or("no window")?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| "identity provider unreachable".to_string())?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| "unexpected fetch result".to_string())?;

    if !response.ok() {
        return Err(format!("identity provider returned {}", response.status()));
    }

    let json = JsFuture::from(
        response
            .json()
            .map_err(|_| "response is not JSON".to_string())?,
    )
    .await
    .map_err(|_| "failed to read response body".to_string())?;

    serde_wasm_bindgen::from_value(json).map_err(|e| format!("failed to decode response: {}", e))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_callback_with_code() {
        assert_eq!(
            plan_callback(Some("abc123".to_string())),
            CallbackAction::Exchange("abc123".to_string())
        );
    }

    #[test]
    fn test_plan_callback_without_code() {
        assert_eq!(plan_callback(None), CallbackAction::BackToLogin);
        assert_eq!(plan_callback(Some(String::new())), CallbackAction::BackToLogin);
    }

    #[test]
    fn test_session_expiry() {
        let user = AuthUser { id: "u1".to_string(), email: None };
        let live = Session {
            access_token: "t".to_string(),
            refresh_token: None,
            expires_at: Some(now_ms() / 1000 + 3600),
            user: user.clone(),
        };
        assert!(!live.is_expired());

        let expired = Session { expires_at: Some(now_ms() / 1000 - 1), ..live.clone() };
        assert!(expired.is_expired());

        let no_expiry = Session { expires_at: None, ..live };
        assert!(!no_expiry.is_expired());
    }

    #[test]
    fn test_session_parses_provider_response_shape() {
        let raw = r#"{
            "access_token": "tok",
            "token_type": "bearer",
            "expires_in": 3600,
            "expires_at": 1700003600,
            "refresh_token": "ref",
            "user": { "id": "u1", "email": "a@b.c", "role": "authenticated" }
        }"#;
        let session: Session = serde_json::from_str(raw).unwrap();
        assert_eq!(session.access_token, "tok");
        assert_eq!(session.expires_at, Some(1_700_003_600));
        assert_eq!(session.user.email.as_deref(), Some("a@b.c"));
    }
}
