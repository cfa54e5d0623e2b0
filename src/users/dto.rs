use serde::Deserialize;

/// PATCH body: only supplied fields are changed.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// PUT body for the password change.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub password: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_deserialize_to_none() {
        let req: UpdateProfileRequest = serde_json::from_str("{}").unwrap();
        assert!(req.username.is_none());
        assert!(req.email.is_none());

        let req: UpdateProfileRequest =
            serde_json::from_str(r#"{"email":"new@x.com"}"#).unwrap();
        assert!(req.username.is_none());
        assert_eq!(req.email.as_deref(), Some("new@x.com"));
    }
}
