use crate::error::{SnowError, SnowResult};
use base64::{Engine, engine::general_purpose};
use std::{env, fmt};

/// Environment variable holding the API user name
pub const USERNAME_VAR: &str = "SN_USERNAME";
/// Environment variable holding the API password
pub const PASSWORD_VAR: &str = "SN_PASSWORD";
/// Environment variable holding the instance URL
pub const INSTANCE_URL_VAR: &str = "SN_INSTANCE_URL";

/// Authentication trait for the Table API
#[async_trait::async_trait]
pub trait Authentication: Send + Sync {
    /// Apply authentication to the request headers
    async fn apply_auth(&self, headers: &mut reqwest::header::HeaderMap) -> SnowResult<()>;
}

/// Basic authentication credentials plus the instance they belong to.
///
/// The instance URL is not validated here; a malformed value is reported
/// when the client first resolves a path against it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
    instance_url: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        instance_url: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            instance_url: instance_url.into(),
        }
    }

    /// Load credentials from `SN_USERNAME`, `SN_PASSWORD` and `SN_INSTANCE_URL`.
    ///
    /// Nothing in the crate calls this implicitly; callers that keep their
    /// settings in a `.env` file should load it first (e.g. with `dotenvy`).
    pub fn from_env() -> SnowResult<Self> {
        let instance_url = required_var(INSTANCE_URL_VAR)?;
        Self::from_env_with_instance(instance_url)
    }

    /// Load user name and password from the environment, with an explicit instance URL
    pub fn from_env_with_instance(instance_url: impl Into<String>) -> SnowResult<Self> {
        let username = required_var(USERNAME_VAR)?;
        let password = required_var(PASSWORD_VAR)?;
        Ok(Self::new(username, password, instance_url))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    /// Base64 of `username:password`
    pub fn to_base64(&self) -> String {
        let credentials = format!("{}:{}", self.username, self.password);
        general_purpose::STANDARD.encode(credentials.as_bytes())
    }

    /// Value for the `Authorization` header
    pub fn basic_auth_header(&self) -> String {
        format!("Basic {}", self.to_base64())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("instance_url", &self.instance_url)
            .finish()
    }
}

#[async_trait::async_trait]
impl Authentication for Credentials {
    async fn apply_auth(&self, headers: &mut reqwest::header::HeaderMap) -> SnowResult<()> {
        headers.insert(
            reqwest::header::AUTHORIZATION,
            self.basic_auth_header()
                .parse()
                .map_err(|e| SnowError::auth_error(format!("Invalid auth header: {}", e)))?,
        );

        Ok(())
    }
}

fn required_var(name: &str) -> SnowResult<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(SnowError::config_error(format!(
            "environment variable {} is not set",
            name
        ))),
    }
}
