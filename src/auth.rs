use anyhow::{anyhow, Result};
use std::fmt;
use std::str::FromStr;

pub const SYNCRO_DOMAIN: &str = "syncromsp.com";

/// Tenant part of the Syncro host name: `{subdomain}.syncromsp.com`.
#[derive(Debug, Clone, PartialEq)]
pub struct Subdomain(String);

impl Subdomain {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Subdomain {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // people paste the whole host from the browser
        let s = s
            .strip_suffix(&format!(".{}", SYNCRO_DOMAIN))
            .unwrap_or(s);

        if s.is_empty() {
            return Err(anyhow!("Subdomain cannot be empty"));
        }
        if s.starts_with('-') || s.ends_with('-') {
            return Err(anyhow!("Subdomain cannot start or end with '-': {}", s));
        }
        if let Some(c) = s.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '-')) {
            return Err(anyhow!("Invalid character '{}' in subdomain: {}", c, s));
        }
        Ok(Subdomain(s.to_ascii_lowercase()))
    }
}

impl fmt::Display for Subdomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// API key created in the Syncro admin page. Sent verbatim as `Authorization`.
#[derive(Clone, PartialEq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn expose(&self) -> &str {
        &self.0
    }

    fn masked(&self) -> String {
        let value = &self.0;
        if value.len() > 20 && value.is_ascii() {
            format!("{}...{}", &value[..6], &value[value.len() - 4..])
        } else {
            "****".to_string()
        }
    }
}

impl FromStr for ApiKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow!("API key cannot be empty"));
        }
        if s.chars().any(|c| c.is_control()) {
            return Err(anyhow!("API key contains control characters"));
        }
        Ok(ApiKey(s.to_string()))
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.masked()).finish()
    }
}

/// Who we are and where we talk to. Fixed for the life of the process.
#[derive(Debug, Clone)]
pub struct Credentials {
    subdomain: Subdomain,
    api_key: ApiKey,
    base_url: Option<String>,
}

impl Credentials {
    pub fn new(subdomain: Subdomain, api_key: ApiKey) -> Self {
        Self {
            subdomain,
            api_key,
            base_url: None,
        }
    }

    /// Send requests somewhere other than `https://{subdomain}.syncromsp.com/api/v1`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let url: String = base_url.into();
        self.base_url = Some(url.trim_end_matches('/').to_string());
        self
    }

    pub fn subdomain(&self) -> &Subdomain {
        &self.subdomain
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.clone(),
            None => format!("https://{}.{}/api/v1", self.subdomain, SYNCRO_DOMAIN),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
