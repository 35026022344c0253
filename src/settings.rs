//! Per-run connection settings.
//!
//! `Settings` carries the credentials and API base address supplied by the
//! caller, and receives the session token once `ApiClient::login` succeeds.

use md5::{Digest, Md5};
use url::Url;

#[derive(Clone)]
pub struct Settings {
    username: String,
    password: String,
    api: Url,
    token: Option<String>,
}

impl Settings {
    pub fn new(api: Url) -> Settings {
        Settings {
            username: String::new(),
            password: String::new(),
            api,
            token: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Lowercase hex MD5 digest of the password, as the login route expects it.
    ///
    /// MD5 is kept only because the server compares against this digest. It
    /// offers no protection for the credential and must not be reused for
    /// anything else. An empty password stays empty.
    pub fn hashed_password(&self) -> String {
        if self.password.is_empty() {
            return String::new();
        }
        format!("{:x}", Md5::digest(self.password.as_bytes()))
    }

    pub fn api(&self) -> &Url {
        &self.api
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("api", &self.api.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
