use reqwest::{IntoUrl, Url};
use secrecy::SecretString;
use tracing::debug;

use super::{Client, Error, Result};

// -------------------------------------------------------------------------------------------------
// Auth
// -------------------------------------------------------------------------------------------------
/// Supported forms of authentication
pub enum Auth {
    /// No authentication
    Unauthenticated,

    /// Authenticate with a GitHub personal access token
    PersonalAccessToken(SecretString),
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::Unauthenticated => write!(f, "Unauthenticated"),
            Auth::PersonalAccessToken(_) => write!(f, "PersonalAccessToken(<redacted>)"),
        }
    }
}

// -------------------------------------------------------------------------------------------------
// ClientBuilder
// -------------------------------------------------------------------------------------------------
pub struct ClientBuilder {
    base_url: reqwest::Url,
    auth: Auth,
    ignore_certs: bool,
}

impl ClientBuilder {
    /// The user agent string sent when accessing the GitHub REST API
    const USER_AGENT: &'static str = concat!("ghactivity/", env!("CARGO_PKG_VERSION"));

    /// The environment variable an optional personal access token is read from
    pub const TOKEN_ENV_VAR: &'static str = "GITHUB_TOKEN";

    /// Create a new `ClientBuilder` that uses unauthenticated access to <https://api.github.com>.
    pub fn new() -> Self {
        ClientBuilder {
            base_url: Url::parse("https://api.github.com").expect("default base URL should parse"),
            auth: Auth::Unauthenticated,
            ignore_certs: false,
        }
    }

    /// Use the specified base URL.
    ///
    /// For GitHub Enterprise Server this includes the `api/v3` portion.
    pub fn base_url<T: IntoUrl>(mut self, url: T) -> Result<Self> {
        self.base_url = url.into_url()?;
        Ok(self)
    }

    /// Use the given authentication mechanism.
    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = auth;
        self
    }

    /// Authenticate with the given personal access token.
    pub fn personal_access_token<S: Into<String>>(self, token: S) -> Self {
        self.auth(Auth::PersonalAccessToken(SecretString::new(token.into())))
    }

    /// Ignore validation of TLS certs.
    pub fn ignore_certs(mut self, ignore_certs: bool) -> Self {
        self.ignore_certs = ignore_certs;
        self
    }

    /// Load an optional personal access token from the `GITHUB_TOKEN` environment variable.
    /// If that variable is not set or is empty, unauthenticated access is used.
    pub fn personal_access_token_from_env(self) -> Result<Self> {
        self.personal_access_token_from_env_var(Self::TOKEN_ENV_VAR)
    }

    fn personal_access_token_from_env_var(self, env_var_name: &str) -> Result<Self> {
        match std::env::var(env_var_name) {
            Err(std::env::VarError::NotPresent) => {
                debug!("No GitHub access token provided; using unauthenticated API access.");
                Ok(self)
            }
            Err(std::env::VarError::NotUnicode(_s)) => {
                Err(Error::InvalidTokenEnvVar(env_var_name.to_string()))
            }
            Ok(val) if val.is_empty() => {
                debug!("{env_var_name} is empty; using unauthenticated API access.");
                Ok(self)
            }
            Ok(val) => {
                debug!(
                    "Using GitHub personal access token from {env_var_name} environment variable"
                );
                Ok(self.personal_access_token(val))
            }
        }
    }

    /// Build a `Client` from this `ClientBuilder`.
    pub fn build(self) -> Result<Client> {
        let inner = reqwest::ClientBuilder::new()
            .user_agent(Self::USER_AGENT)
            .danger_accept_invalid_certs(self.ignore_certs)
            .build()?;
        Ok(Client {
            base_url: self.base_url,
            auth: self.auth,
            inner,
        })
    }
}

impl Default for ClientBuilder {
    /// Equivalent to `ClientBuilder::new()`.
    fn default() -> Self {
        Self::new()
    }
}
