//! Temporary security credentials for an assumed role.

use secrecy::ExposeSecret;

#[derive(Debug)]
pub struct Credentials {
    access_key_id: String,
    secret_access_key: secrecy::SecretString,
    session_token: secrecy::SecretString,
    expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Credentials {
    /// Fails unless all three values are non-empty.
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: impl Into<String>,
        expires_at: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<Self, crate::error::Error> {
        let access_key_id = access_key_id.into();
        let secret_access_key = secret_access_key.into();
        let session_token = session_token.into();

        for (name, value) in [
            ("access key id", &access_key_id),
            ("secret access key", &secret_access_key),
            ("session token", &session_token),
        ] {
            if value.is_empty() {
                return Err(crate::error::Error::AssumeRole(format!(
                    "returned credentials are missing {name}"
                )));
            }
        }

        Ok(Self {
            access_key_id,
            secret_access_key: secrecy::SecretString::new(secret_access_key),
            session_token: secrecy::SecretString::new(session_token),
            expires_at,
        })
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn secret_access_key(&self) -> &str {
        self.secret_access_key.expose_secret()
    }

    pub fn session_token(&self) -> &str {
        self.session_token.expose_secret()
    }

    pub fn expires_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.expires_at
    }

    /// True when the credentials expire before `now + window`. Credentials without expiry never do.
    pub fn expires_within(
        &self,
        now: chrono::DateTime<chrono::Utc>,
        window: chrono::Duration,
    ) -> bool {
        match self.expires_at {
            Some(at) => at <= now + window,
            None => false,
        }
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            access_key_id: self.access_key_id.clone(),
            secret_access_key: secrecy::SecretString::new(
                self.secret_access_key.expose_secret().clone(),
            ),
            session_token: secrecy::SecretString::new(self.session_token.expose_secret().clone()),
            expires_at: self.expires_at,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_new() {
        let c = Credentials::new("AKIAEXAMPLE", "secret", "token", None).unwrap();
        assert_eq!(c.access_key_id(), "AKIAEXAMPLE");
        assert_eq!(c.secret_access_key(), "secret");
        assert_eq!(c.session_token(), "token");
        assert!(c.expires_at().is_none());
    }

    #[test]
    fn test_new_rejects_partial() {
        assert!(matches!(
            Credentials::new("", "secret", "token", None),
            Err(crate::error::Error::AssumeRole(_))
        ));
        assert!(Credentials::new("id", "", "token", None).is_err());
        assert!(Credentials::new("id", "secret", "", None).is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let c = Credentials::new("AKIAEXAMPLE", "supersecret", "supertoken", None).unwrap();
        let dbg = format!("{c:?}");
        assert!(dbg.contains("AKIAEXAMPLE"));
        assert!(!dbg.contains("supersecret"));
        assert!(!dbg.contains("supertoken"));
    }

    #[test]
    fn test_expires_within() {
        let now = chrono::Utc::now();
        let window = chrono::Duration::seconds(10);

        let fresh =
            Credentials::new("id", "s", "t", Some(now + chrono::Duration::hours(1))).unwrap();
        assert!(!fresh.expires_within(now, window));

        let near = Credentials::new("id", "s", "t", Some(now + chrono::Duration::seconds(5))).unwrap();
        assert!(near.expires_within(now, window));

        let past = Credentials::new("id", "s", "t", Some(now - chrono::Duration::seconds(1))).unwrap();
        assert!(past.expires_within(now, window));

        let forever = Credentials::new("id", "s", "t", None).unwrap();
        assert!(!forever.expires_within(now, window));
    }
}
