use serde_json::Value;

use crate::error::ApiError;
use crate::models::auth::{LoginRequest, LogoutResponse, TokenResponse};
use crate::services::api_client::{ApiClient, HttpTransport, Method, RequestBody};
use crate::utils::constants::{STORAGE_KEY_MODELS_LOADED, STORAGE_KEY_MODEL_STATUS};
use crate::utils::storage::{save_to_storage, KeyValueStore};

/// Perform login with username and password. Nothing is stored unless the
/// backend issues a token.
pub async fn login<T: HttpTransport>(api: &ApiClient<T>, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
    if request.username.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::Validation("Please enter both username and password".to_string()));
    }

    log::info!("🔐 Logging in as {}", request.username.trim());
    let response = api
        .send_anonymous(Method::Post, "/api/auth/token", RequestBody::Form(request.form_fields()))
        .await?;

    if !response.ok() {
        let error = ApiError::from_response(response.status, &response.body);
        log::warn!("❌ Login rejected: {}", error);
        return Err(error);
    }

    let token: TokenResponse = response.json()?;
    api.session().begin(&token).map_err(ApiError::Storage)?;
    Ok(token)
}

/// Tells the backend, then runs the local logout sequence. A failing
/// backend call never keeps the user logged in. Without a usable token
/// there is nothing to revoke, so only the local sequence runs.
pub async fn logout<T: HttpTransport>(api: &ApiClient<T>) {
    if api.session().is_valid() {
        match api.post_empty::<LogoutResponse>("/api/auth/logout").await {
            Ok(_) => {}
            // 401 already ran the logout sequence
            Err(ApiError::Unauthorized) => return,
            Err(e) => log::warn!("⚠️ Logout endpoint failed, clearing session anyway: {}", e),
        }
    }
    api.session().logout();
}

/// Asks the backend to preload the ML models for this doctor's specialty
pub async fn load_models<T: HttpTransport>(api: &ApiClient<T>) -> Result<Value, ApiError> {
    log::info!("🧠 Requesting model preload");
    let status: Value = api.get("/api/auth/load-models").await?;

    let store = api.session().store();
    save_to_storage(store, STORAGE_KEY_MODEL_STATUS, &status).map_err(ApiError::Storage)?;
    store.set(STORAGE_KEY_MODELS_LOADED, "true").map_err(ApiError::Storage)?;
    Ok(status)
}

pub fn models_loaded<T: HttpTransport>(api: &ApiClient<T>) -> bool {
    api.session().store().get(STORAGE_KEY_MODELS_LOADED).as_deref() == Some("true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{block_on, expired_jwt, logged_in_client, test_client, valid_jwt, MockTransport};
    use crate::utils::constants::{STORAGE_KEY_TOKEN, STORAGE_KEY_USERNAME};
    use crate::utils::storage::KeyValueStore;

    fn credentials(password: &str) -> LoginRequest {
        LoginRequest { username: "dr.haddad".into(), password: password.into() }
    }

    #[test]
    fn successful_login_stores_token_and_validates_session() {
        let (client, store, _) = test_client(MockTransport::new());
        let token = valid_jwt("dr.haddad");
        client
            .transport()
            .respond(200, &format!(r#"{{"access_token":"{}","token_type":"bearer","username":"dr.haddad"}}"#, token));

        let response = block_on(login(&client, &credentials("s3cret"))).unwrap();

        assert_eq!(response.username.as_deref(), Some("dr.haddad"));
        assert_eq!(store.get(STORAGE_KEY_TOKEN), Some(token));
        assert_eq!(store.get(STORAGE_KEY_USERNAME).as_deref(), Some("dr.haddad"));
        assert!(client.session().is_valid());
        assert_eq!(client.session().current_subject().as_deref(), Some("dr.haddad"));

        let sent = &client.transport().requests()[0];
        assert_eq!(sent.url, "http://clinic.test/api/auth/token");
        assert_eq!(sent.header("Content-Type"), Some("application/x-www-form-urlencoded"));
    }

    #[test]
    fn invalid_credentials_store_nothing_and_do_not_redirect() {
        let (client, store, navigator) = test_client(MockTransport::new());
        client.transport().respond(401, r#"{"detail":"Incorrect username or password"}"#);

        let error = block_on(login(&client, &credentials("wrong"))).unwrap_err();

        assert_eq!(error.user_message(), "Incorrect username or password");
        assert!(store.is_empty());
        assert_eq!(navigator.redirects(), 0);
    }

    #[test]
    fn blank_credentials_never_reach_the_network() {
        let (client, _, _) = test_client(MockTransport::new());
        let error = block_on(login(&client, &credentials(""))).unwrap_err();
        assert!(matches!(error, ApiError::Validation(_)));
        assert!(client.transport().requests().is_empty());
    }

    #[test]
    fn logout_clears_session_even_if_backend_fails() {
        let (client, store, navigator) = logged_in_client();
        client.transport().fail("offline");

        block_on(logout(&client));

        assert_eq!(store.get(STORAGE_KEY_TOKEN), None);
        assert_eq!(navigator.redirects(), 1);
    }

    #[test]
    fn logout_redirects_once_when_backend_answers_401() {
        let (client, _, navigator) = logged_in_client();
        client.transport().respond(401, "");

        block_on(logout(&client));

        assert_eq!(navigator.redirects(), 1);
    }

    #[test]
    fn expired_session_logs_out_once_without_calling_backend() {
        let (client, store, navigator) = test_client(MockTransport::new());
        store.set(STORAGE_KEY_TOKEN, &expired_jwt("dr.haddad")).unwrap();
        client.transport().respond(200, r#"{"status":"success"}"#);

        block_on(logout(&client));

        assert_eq!(navigator.redirects(), 1);
        assert_eq!(store.get(STORAGE_KEY_TOKEN), None);
        assert!(client.transport().requests().is_empty());
    }

    #[test]
    fn successful_logout_redirects_once() {
        let (client, store, navigator) = logged_in_client();
        client.transport().respond(200, r#"{"status":"success","message":"Logged out"}"#);

        block_on(logout(&client));

        assert_eq!(navigator.redirects(), 1);
        assert_eq!(store.get(STORAGE_KEY_TOKEN), None);
        assert_eq!(client.transport().requests()[0].url, "http://clinic.test/api/auth/logout");
    }

    #[test]
    fn model_status_is_persisted() {
        let (client, store, _) = logged_in_client();
        client.transport().respond(200, r#"{"status":"success","loaded_models":["ecg"]}"#);

        let status = block_on(load_models(&client)).unwrap();

        assert_eq!(status["loaded_models"][0], "ecg");
        assert!(models_loaded(&client));
        assert!(store.get(STORAGE_KEY_MODEL_STATUS).unwrap().contains("ecg"));
    }
}
