// ============================================================================
// API CLIENT - Authenticated request dispatch
// ============================================================================
// Every screen goes through here: the bearer token is attached before the
// request leaves and a 401 ends the session in one place. No retries.
// ============================================================================

use serde::{de::DeserializeOwned, Serialize};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::services::multipart::MultipartForm;
use crate::state::Session;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum RequestBody {
    Empty,
    Json(String),
    Form(Vec<(String, String)>),
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Multipart gets its boundary from the transport
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            RequestBody::Json(_) => Some("application/json"),
            RequestBody::Form(_) => Some("application/x-www-form-urlencoded"),
            RequestBody::Empty | RequestBody::Multipart(_) => None,
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    pub timeout_ms: u32,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(ApiError::from)
    }
}

/// Sends one request and hands back whatever the server answered. Only
/// transport failures (unreachable host, timeout) are errors at this level.
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

pub fn encode_form(fields: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish()
}

/// Percent-encodes one path segment, so an id can never add segments or a query
pub fn path_segment(raw: &str) -> String {
    // byte_serialize writes a space as '+'; a literal '+' comes out as %2B
    url::form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Appends an encoded query string to `path`
pub fn with_query(path: &str, params: &[(String, String)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{}{}{}", path, separator, encode_form(params))
}

pub struct ApiClient<T> {
    base_url: String,
    timeout_ms: u32,
    transport: T,
    session: Session,
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(base_url: impl Into<String>, timeout_ms: u32, transport: T, session: Session) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_ms,
            transport,
            session,
        }
    }

    pub fn from_config(config: &AppConfig, shell_override: Option<&str>, transport: T, session: Session) -> Self {
        Self::new(config.resolve_base_url(shell_override), config.timeout_ms(), transport, session)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn build(&self, method: Method, path: &str, body: RequestBody) -> HttpRequest {
        let mut headers = Vec::new();
        if let Some(content_type) = body.content_type() {
            headers.push(("Content-Type".to_string(), content_type.to_string()));
        }
        HttpRequest {
            method,
            url: self.url(path),
            headers,
            body,
            timeout_ms: self.timeout_ms,
        }
    }

    /// Outgoing interceptor: give the session a chance to notice expiry,
    /// then attach whatever token is left. A token that was present but
    /// could not be kept has already run the logout, so the request stops
    /// here instead of earning a second one from the backend's 401.
    fn authorize(&self, request: &mut HttpRequest) -> Result<(), ApiError> {
        if self.session.token().is_some() && !self.session.is_valid() && !self.session.refresh_if_needed() {
            return Err(ApiError::Unauthorized);
        }
        if let Some(token) = self.session.token() {
            request
                .headers
                .push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        Ok(())
    }

    async fn dispatch(&self, mut request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        if let Err(e) = self.authorize(&mut request) {
            log::warn!("🔒 {} {} not sent, session expired", method.as_str(), url);
            return Err(e);
        }

        let response = self.transport.send(request).await.map_err(|e| {
            log::error!("❌ {} {} failed: {}", method.as_str(), url, e);
            e
        })?;

        // Response interceptor
        if response.status == 401 {
            log::warn!("🔒 {} {} answered 401, ending session", method.as_str(), url);
            self.session.logout();
            return Err(ApiError::Unauthorized);
        }
        if !response.ok() {
            let error = ApiError::from_response(response.status, &response.body);
            log::error!("❌ {} {} -> HTTP {}: {}", method.as_str(), url, response.status, error);
            return Err(error);
        }
        Ok(response)
    }

    /// Request without token or global 401 handling, for the login call
    pub async fn send_anonymous(&self, method: Method, path: &str, body: RequestBody) -> Result<HttpResponse, ApiError> {
        let request = self.build(method, path, body);
        self.transport.send(request).await
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let request = self.build(Method::Get, path, RequestBody::Empty);
        self.dispatch(request).await?.json()
    }

    pub async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        let request = self.build(Method::Post, path, RequestBody::Json(serde_json::to_string(body)?));
        self.dispatch(request).await?.json()
    }

    pub async fn put<B: Serialize + ?Sized, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        let request = self.build(Method::Put, path, RequestBody::Json(serde_json::to_string(body)?));
        self.dispatch(request).await?.json()
    }

    /// Bodiless POST, parameters travel in the query string
    pub async fn post_empty<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let request = self.build(Method::Post, path, RequestBody::Empty);
        self.dispatch(request).await?.json()
    }

    pub async fn put_empty<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let request = self.build(Method::Put, path, RequestBody::Empty);
        self.dispatch(request).await?.json()
    }

    /// DELETE; the body (often empty with 204) is ignored
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self.build(Method::Delete, path, RequestBody::Empty);
        self.dispatch(request).await.map(|_| ())
    }

    /// File upload with the same token and 401 handling as every other call
    pub async fn upload<R: DeserializeOwned>(&self, path: &str, form: MultipartForm) -> Result<R, ApiError> {
        log::info!("📤 Uploading {} file(s), {} bytes to {}", form.files.len(), form.total_bytes(), path);
        let request = self.build(Method::Post, path, RequestBody::Multipart(form));
        self.dispatch(request).await?.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::upload::FilePart;
    use crate::test_support::{block_on, expired_jwt, test_client, valid_jwt, MockTransport};
    use crate::utils::constants::{AUTH_STORAGE_KEYS, STORAGE_KEY_TOKEN, STORAGE_KEY_USERNAME};
    use crate::utils::storage::KeyValueStore;

    #[test]
    fn bearer_token_is_attached_when_session_is_valid() {
        let (client, store, _) = test_client(MockTransport::new());
        let token = valid_jwt("dr.haddad");
        store.set(STORAGE_KEY_TOKEN, &token).unwrap();
        client.transport().respond(200, "[]");

        let patients: Vec<serde_json::Value> = block_on(client.get("/api/patients/")).unwrap();

        assert!(patients.is_empty());
        let sent = client.transport().requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, "http://clinic.test/api/patients/");
        assert_eq!(sent[0].header("authorization"), Some(format!("Bearer {}", token).as_str()));
    }

    #[test]
    fn no_header_without_token() {
        let (client, _, navigator) = test_client(MockTransport::new());
        client.transport().respond(200, "{}");

        let _: serde_json::Value = block_on(client.get("/api/settings/")).unwrap();

        assert_eq!(client.transport().requests()[0].header("Authorization"), None);
        assert_eq!(navigator.redirects(), 0);
    }

    #[test]
    fn expired_token_ends_the_session_before_the_request() {
        let (client, store, navigator) = test_client(MockTransport::new());
        store.set(STORAGE_KEY_TOKEN, &expired_jwt("u")).unwrap();
        client.transport().respond(200, "{}");

        let result: Result<serde_json::Value, _> = block_on(client.get("/api/settings/"));

        assert_eq!(result, Err(ApiError::Unauthorized));
        assert_eq!(navigator.redirects(), 1);
        assert_eq!(store.get(STORAGE_KEY_TOKEN), None);
        assert!(client.transport().requests().is_empty());
    }

    #[test]
    fn expired_token_with_unauthorized_backend_logs_out_once() {
        let (client, store, navigator) = test_client(MockTransport::new());
        store.set(STORAGE_KEY_TOKEN, &expired_jwt("u")).unwrap();
        client.transport().respond(401, r#"{"detail":"Token expired"}"#);

        let result: Result<serde_json::Value, _> = block_on(client.get("/api/patients/"));

        assert_eq!(result, Err(ApiError::Unauthorized));
        assert_eq!(navigator.redirects(), 1);
        for key in AUTH_STORAGE_KEYS {
            assert_eq!(store.get(key), None);
        }
    }

    #[test]
    fn malformed_token_is_treated_like_an_expired_one() {
        let (client, store, navigator) = test_client(MockTransport::new());
        store.set(STORAGE_KEY_TOKEN, "not-a-jwt").unwrap();

        let result: Result<serde_json::Value, _> = block_on(client.get("/api/patients/"));

        assert_eq!(result, Err(ApiError::Unauthorized));
        assert_eq!(navigator.redirects(), 1);
        assert!(client.transport().requests().is_empty());
    }

    #[test]
    fn unauthorized_response_runs_logout_exactly_once() {
        let (client, store, navigator) = test_client(MockTransport::new());
        store.set(STORAGE_KEY_TOKEN, &valid_jwt("u")).unwrap();
        store.set(STORAGE_KEY_USERNAME, "u").unwrap();
        client.transport().respond(401, r#"{"detail":"Could not validate credentials"}"#);

        let result: Result<serde_json::Value, _> = block_on(client.get("/api/patients/"));

        assert_eq!(result, Err(ApiError::Unauthorized));
        assert_eq!(navigator.redirects(), 1);
        for key in AUTH_STORAGE_KEYS {
            assert_eq!(store.get(key), None);
        }
    }

    #[test]
    fn backend_errors_surface_without_logout() {
        let (client, store, navigator) = test_client(MockTransport::new());
        store.set(STORAGE_KEY_TOKEN, &valid_jwt("u")).unwrap();
        client.transport().respond(404, r#"{"detail":"Appointment not found"}"#);

        let result = block_on(client.delete("/api/appointments/a1"));

        assert_eq!(
            result,
            Err(ApiError::Backend { status: 404, message: "Appointment not found".into() })
        );
        assert_eq!(navigator.redirects(), 0);
        assert!(store.get(STORAGE_KEY_TOKEN).is_some());
    }

    #[test]
    fn transport_failures_are_not_retried() {
        let (client, _, navigator) = test_client(MockTransport::new());
        client.transport().fail("connection refused");

        let result: Result<serde_json::Value, _> = block_on(client.get("/api/patients/"));

        assert!(matches!(result, Err(ApiError::Network(_))));
        assert_eq!(client.transport().requests().len(), 1);
        assert_eq!(navigator.redirects(), 0);
    }

    #[test]
    fn json_bodies_carry_content_type_and_timeout() {
        let (client, _, _) = test_client(MockTransport::new());
        client.transport().respond(200, r#"{"ok":true}"#);

        let _: serde_json::Value = block_on(client.post("/api/schedule/", &serde_json::json!({"day": "Monday"}))).unwrap();

        let sent = &client.transport().requests()[0];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.header("Content-Type"), Some("application/json"));
        assert_eq!(sent.body, RequestBody::Json(r#"{"day":"Monday"}"#.into()));
        assert_eq!(sent.timeout_ms, 5_000);
    }

    #[test]
    fn upload_shares_the_unauthorized_path() {
        let (client, store, navigator) = test_client(MockTransport::new());
        store.set(STORAGE_KEY_TOKEN, &valid_jwt("u")).unwrap();
        client.transport().respond(401, "");
        let form = MultipartForm::new()
            .text("patient_id", "p1")
            .file("file", FilePart::new("x.png", "image/png", vec![1, 2, 3]));

        let result: Result<serde_json::Value, _> = block_on(client.upload("/api/medical-reports/upload", form));

        assert_eq!(result, Err(ApiError::Unauthorized));
        assert_eq!(navigator.redirects(), 1);
        let sent = &client.transport().requests()[0];
        assert!(sent.header("Authorization").is_some());
        assert_eq!(sent.header("Content-Type"), None);
    }

    #[test]
    fn anonymous_requests_skip_auth_handling() {
        let (client, store, navigator) = test_client(MockTransport::new());
        store.set(STORAGE_KEY_TOKEN, &valid_jwt("u")).unwrap();
        client.transport().respond(401, "");

        let response = block_on(client.send_anonymous(Method::Post, "/api/auth/token", RequestBody::Empty)).unwrap();

        assert_eq!(response.status, 401);
        assert_eq!(navigator.redirects(), 0);
        assert_eq!(client.transport().requests()[0].header("Authorization"), None);
    }

    #[test]
    fn path_segments_are_encoded() {
        assert_eq!(path_segment("665f1c2ab3"), "665f1c2ab3");
        assert_eq!(path_segment("a/b?c"), "a%2Fb%3Fc");
        assert_eq!(path_segment("x y+z"), "x%20y%2Bz");
    }

    #[test]
    fn query_strings_are_encoded() {
        let params = vec![("status".to_string(), "Cancelled".to_string()), ("reason".to_string(), "chest pain & cough".to_string())];
        assert_eq!(
            with_query("/api/appointments/a1", &params),
            "/api/appointments/a1?status=Cancelled&reason=chest+pain+%26+cough"
        );
        assert_eq!(with_query("/x?a=1", &params[..1]), "/x?a=1&status=Cancelled");
        assert_eq!(with_query("/x", &[]), "/x");
    }
}
