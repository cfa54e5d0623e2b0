use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::users::repo::Account;

/// Request body for registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after register or login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub account: PublicAccount,
}

/// The account as clients see it. The password hash has no field here,
/// so it cannot cross the API boundary.
#[derive(Debug, Serialize)]
pub struct PublicAccount {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Account> for PublicAccount {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            username: a.username,
            email: a.email,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn account() -> Account {
        Account {
            id: 1,
            username: "alice".into(),
            email: "alice@x.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn auth_response_never_contains_the_hash() {
        let response = AuthResponse {
            access_token: "tok".into(),
            account: account().into(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("alice@x.com"));
        assert!(json.contains("access_token"));
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
    }
}
