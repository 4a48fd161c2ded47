use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

/// Answer of `POST /api/auth/token`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Clone, PartialEq, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    /// Form fields expected by the OAuth2 password flow
    pub fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            ("username".to_string(), self.username.clone()),
            ("password".to_string(), self.password.clone()),
        ]
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Doctor,
    Patient,
}

/// Claims carried in the bearer token payload
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub user_type: UserType,
}

impl TokenClaims {
    /// Reads the payload segment of a JWT without verifying the signature;
    /// the backend stays the source of truth for authorization.
    pub fn decode(token: &str) -> Option<Self> {
        let mut segments = token.split('.');
        let (_header, payload, _signature) = (segments.next()?, segments.next()?, segments.next()?);
        if segments.next().is_some() {
            return None;
        }
        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Expired when the expiry is at or before `now`
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LogoutResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::jwt_with_payload;

    #[test]
    fn decodes_subject_and_expiry() {
        let token = jwt_with_payload(r#"{"sub":"dr.haddad","exp":1700000000,"user_type":"doctor"}"#);
        let claims = TokenClaims::decode(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("dr.haddad"));
        assert_eq!(claims.exp, 1_700_000_000);
        assert_eq!(claims.user_type, UserType::Doctor);
    }

    #[test]
    fn missing_user_type_defaults_to_doctor() {
        let token = jwt_with_payload(r#"{"sub":"x","exp":1}"#);
        assert_eq!(TokenClaims::decode(&token).unwrap().user_type, UserType::Doctor);
    }

    #[test]
    fn padded_payload_is_accepted() {
        let token = jwt_with_payload(r#"{"sub":"x","exp":1}"#);
        let segments: Vec<&str> = token.split('.').collect();
        // 19 payload bytes, so standard padding adds two '='
        let padded = format!("{}.{}==.{}", segments[0], segments[1], segments[2]);

        let claims = TokenClaims::decode(&padded).unwrap();

        assert_eq!(claims.sub.as_deref(), Some("x"));
        assert_eq!(claims.exp, 1);
    }

    #[test]
    fn malformed_tokens_decode_to_none() {
        assert_eq!(TokenClaims::decode("not-a-jwt"), None);
        assert_eq!(TokenClaims::decode("a.b"), None);
        assert_eq!(TokenClaims::decode("a.!!!.c"), None);
        assert_eq!(TokenClaims::decode("a.b.c.d"), None);
        // payload without expiry
        assert_eq!(TokenClaims::decode(&jwt_with_payload(r#"{"sub":"x"}"#)), None);
    }

    #[test]
    fn expiry_boundary_counts_as_expired() {
        let claims = TokenClaims { sub: None, exp: 100, user_type: UserType::Doctor };
        assert!(claims.is_expired_at(100));
        assert!(claims.is_expired_at(101));
        assert!(!claims.is_expired_at(99));
    }

    #[test]
    fn login_form_fields_follow_password_flow() {
        let request = LoginRequest { username: "u".into(), password: "p w".into() };
        assert_eq!(
            request.form_fields(),
            vec![("username".to_string(), "u".to_string()), ("password".to_string(), "p w".to_string())]
        );
    }
}
