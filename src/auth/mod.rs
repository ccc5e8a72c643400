//! Access tokens for the GA4 Data API
//!
//! A service account key is turned into a short-lived OAuth2 access token by
//! signing an RS256 assertion and exchanging it at the key's token endpoint.
//! A ready-made token can be supplied instead.

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fs;

use crate::config::Config;
use crate::core::constants::{api, env_vars};
use crate::core::error::{Ga4Error, Result};

#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Obtain a bearer token for one dashboard run.
    async fn access_token(&self, client: &Client) -> Result<String>;

    /// Short description for logs; never contains secrets.
    fn describe(&self) -> String;
}

/// Google service account key fields needed for the JWT bearer flow.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountCredentials {
    pub client_email: String,
    /// PEM encoded RSA private key
    pub private_key: String,
    #[serde(default)]
    pub token_uri: Option<String>,
}

impl ServiceAccountCredentials {
    /// Parse credentials from JSON text or, failing that, read them from a file path.
    pub fn load(source: &str) -> Result<Self> {
        if source.trim_start().starts_with('{') {
            Self::from_json(source)
        } else {
            let content = fs::read_to_string(source.trim()).map_err(|e| {
                Ga4Error::Authentication(format!(
                    "Failed to read credentials file '{}': {e}",
                    source.trim()
                ))
            })?;
            Self::from_json(&content)
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let credentials: Self = serde_json::from_str(json).map_err(|e| {
            Ga4Error::Authentication(format!("Invalid service account JSON: {e}"))
        })?;
        if credentials.client_email.trim().is_empty() {
            return Err(Ga4Error::Authentication(
                "Service account JSON has an empty client_email".to_string(),
            ));
        }
        Ok(credentials)
    }

    pub fn token_uri(&self) -> &str {
        self.token_uri.as_deref().unwrap_or(api::DEFAULT_TOKEN_URI)
    }
}

/// JWT claims for Google OAuth2 service account authentication.
#[derive(Debug, Serialize)]
struct JwtClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

/// Google OAuth2 token response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Exchanges a signed service account assertion for an access token.
#[derive(Debug, Clone)]
pub struct ServiceAccountAuth {
    credentials: ServiceAccountCredentials,
}

impl ServiceAccountAuth {
    pub fn new(credentials: ServiceAccountCredentials) -> Self {
        Self { credentials }
    }

    /// Sign the RS256 assertion sent to the token endpoint.
    fn signed_assertion(&self) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = JwtClaims {
            iss: &self.credentials.client_email,
            scope: api::ANALYTICS_READONLY_SCOPE,
            aud: self.credentials.token_uri(),
            iat: now,
            exp: now + api::ASSERTION_LIFETIME_SECONDS,
        };

        let header = jsonwebtoken::Header::new(jsonwebtoken::Algorithm::RS256);
        let key = jsonwebtoken::EncodingKey::from_rsa_pem(self.credentials.private_key.as_bytes())
            .map_err(|e| Ga4Error::Authentication(format!("Invalid private key: {e}")))?;

        Ok(jsonwebtoken::encode(&header, &claims, &key)?)
    }
}

#[async_trait]
impl TokenProvider for ServiceAccountAuth {
    async fn access_token(&self, client: &Client) -> Result<String> {
        let assertion = self.signed_assertion()?;
        let token_uri = self.credentials.token_uri();
        debug!("Exchanging service account assertion at {token_uri}");

        let response = client
            .post(token_uri)
            .form(&[
                ("grant_type", api::JWT_BEARER_GRANT),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Ga4Error::Authentication(format!("Token exchange request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Ga4Error::Authentication(format!(
                "Token exchange failed ({status}): {body}"
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            Ga4Error::Authentication(format!("Unexpected token response: {e}"))
        })?;
        if let Some(expires_in) = token.expires_in {
            debug!("Access token valid for {expires_in}s");
        }
        Ok(token.access_token)
    }

    fn describe(&self) -> String {
        format!("service account {}", self.credentials.client_email)
    }
}

/// A bearer token supplied from outside, e.g. `gcloud auth print-access-token`.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn access_token(&self, _client: &Client) -> Result<String> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "static access token".to_string()
    }
}

/// Pick a token provider from the environment and configuration.
///
/// Order: `GA4_ACCESS_TOKEN`, `GA4_CREDENTIALS_JSON`, `credentials_file`,
/// `GOOGLE_APPLICATION_CREDENTIALS`.
pub fn resolve_token_provider(config: &Config) -> Result<Box<dyn TokenProvider>> {
    resolve_token_provider_with(config, |name| std::env::var(name).ok())
}

/// Same as [`resolve_token_provider`] with an injectable environment lookup.
pub fn resolve_token_provider_with<F>(config: &Config, env: F) -> Result<Box<dyn TokenProvider>>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| env(name).filter(|v| !v.trim().is_empty());

    if let Some(token) = non_empty(env_vars::ACCESS_TOKEN) {
        return Ok(Box::new(StaticToken::new(token.trim())));
    }

    if let Some(json) = non_empty(env_vars::CREDENTIALS_JSON) {
        let credentials = ServiceAccountCredentials::from_json(&json)?;
        return Ok(Box::new(ServiceAccountAuth::new(credentials)));
    }

    let path = config
        .credentials_file
        .clone()
        .or_else(|| non_empty(env_vars::GOOGLE_APPLICATION_CREDENTIALS));

    match path {
        Some(path) => {
            let credentials = ServiceAccountCredentials::load(&path)?;
            Ok(Box::new(ServiceAccountAuth::new(credentials)))
        }
        None => Err(Ga4Error::Authentication(format!(
            "No credentials found. Set {}, {}, credentials_file or {}.",
            env_vars::ACCESS_TOKEN,
            env_vars::CREDENTIALS_JSON,
            env_vars::GOOGLE_APPLICATION_CREDENTIALS
        ))),
    }
}
