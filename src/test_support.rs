// Shared fakes for the in-module tests

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

use crate::error::ApiError;
use crate::services::api_client::{ApiClient, HttpRequest, HttpResponse, HttpTransport};
use crate::state::Session;
use crate::utils::navigation::Navigator;
use crate::utils::storage::MemoryStorage;

pub use futures::executor::block_on;

pub fn jwt_with_payload(payload: &str) -> String {
    format!(
        "{}.{}.{}",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(payload),
        URL_SAFE_NO_PAD.encode("signature")
    )
}

pub fn jwt(sub: &str, exp: i64) -> String {
    jwt_with_payload(&format!(r#"{{"sub":"{}","exp":{},"user_type":"doctor"}}"#, sub, exp))
}

pub fn valid_jwt(sub: &str) -> String {
    jwt(sub, chrono::Utc::now().timestamp() + 3600)
}

pub fn expired_jwt(sub: &str) -> String {
    jwt(sub, chrono::Utc::now().timestamp() - 3600)
}

#[derive(Default)]
pub struct RecordingNavigator {
    redirects: Cell<usize>,
}

impl RecordingNavigator {
    pub fn redirects(&self) -> usize {
        self.redirects.get()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect_to_login(&self) {
        self.redirects.set(self.redirects.get() + 1);
    }
}

/// Replays scripted answers in order and records what was sent
#[derive(Default)]
pub struct MockTransport {
    script: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
    sent: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.script.borrow_mut().push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn fail(&self, reason: &str) {
        self.script
            .borrow_mut()
            .push_back(Err(ApiError::Network(reason.to_string())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }
}

impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.sent.borrow_mut().push(request);
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted response".to_string())))
    }
}

pub fn test_session() -> (Session, Rc<MemoryStorage>, Rc<RecordingNavigator>) {
    let store = Rc::new(MemoryStorage::new());
    let navigator = Rc::new(RecordingNavigator::default());
    (Session::new(store.clone(), navigator.clone()), store, navigator)
}

pub fn test_client<T: HttpTransport>(transport: T) -> (ApiClient<T>, Rc<MemoryStorage>, Rc<RecordingNavigator>) {
    let (session, store, navigator) = test_session();
    (ApiClient::new("http://clinic.test/", 5_000, transport, session), store, navigator)
}

/// Client with a valid doctor token already stored
pub fn logged_in_client() -> (ApiClient<MockTransport>, Rc<MemoryStorage>, Rc<RecordingNavigator>) {
    use crate::utils::constants::STORAGE_KEY_TOKEN;
    use crate::utils::storage::KeyValueStore;

    let (client, store, navigator) = test_client(MockTransport::new());
    store
        .set(STORAGE_KEY_TOKEN, &valid_jwt("dr.haddad"))
        .expect("memory store never fails");
    (client, store, navigator)
}
