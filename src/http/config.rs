// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Default descriptor and per-call configuration overrides
//!
//! Precedence, lowest to highest:
//! 1. [`ClientDefaults`] (process-wide default descriptor)
//! 2. [`RequestConfig`] supplied by the caller
//! 3. fields computed by the client: method, body and the forced `cors`
//!    mode for cross-origin URLs
//!
//! Merging is shallow except for headers, which are merged per key with
//! caller values replacing defaults of the same (case-insensitive) name.

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Deserializer};
use tracing::warn;

use super::request::{CachePolicy, CredentialsMode, RequestMode};
use super::{DEFAULT_CONTENT_TYPE, DEFAULT_REQUESTED_WITH};
use crate::error::{Error, Result};

/// Option names owned by typed descriptor fields
const RESERVED_OPTIONS: &[&str] = &["method", "body", "headers", "mode", "credentials", "cache"];

/// Default descriptor every request starts from
#[derive(Debug, Clone)]
pub struct ClientDefaults {
    /// Default headers
    pub headers: HeaderMap,
    /// Default request mode
    pub mode: RequestMode,
    /// Default credentials mode
    pub credentials: CredentialsMode,
    /// Default cache policy
    pub cache: CachePolicy,
}

impl Default for ClientDefaults {
    fn default() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
        headers.insert(
            super::headers::X_REQUESTED_WITH,
            HeaderValue::from_static(DEFAULT_REQUESTED_WITH),
        );

        Self {
            headers,
            mode: RequestMode::SameOrigin,
            credentials: CredentialsMode::SameOrigin,
            cache: CachePolicy::NoCache,
        }
    }
}

impl ClientDefaults {
    /// Create the stock defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the `X-Requested-With` marker value
    pub fn requested_with(self, marker: impl AsRef<str>) -> Result<Self> {
        self.header(super::headers::X_REQUESTED_WITH, marker)
    }

    /// Set a default header
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let (name, value) = parse_header(name.as_ref(), value.as_ref())?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Remove a default header
    pub fn without_header(mut self, name: impl AsRef<str>) -> Self {
        self.headers.remove(name.as_ref());
        self
    }

    /// Set default mode
    pub fn mode(mut self, mode: RequestMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set default credentials mode
    pub fn credentials(mut self, credentials: CredentialsMode) -> Self {
        self.credentials = credentials;
        self
    }

    /// Set default cache policy
    pub fn cache(mut self, cache: CachePolicy) -> Self {
        self.cache = cache;
        self
    }

    /// Overlay caller configuration on the defaults
    pub fn merge(&self, config: &RequestConfig) -> Result<MergedConfig> {
        let mut headers = self.headers.clone();
        for (name, value) in &config.headers {
            let (name, value) = parse_header(name, value)?;
            headers.insert(name, value);
        }

        let mut options = config.options.clone();
        for reserved in RESERVED_OPTIONS {
            if options.remove(*reserved).is_some() {
                warn!(option = *reserved, "ignoring extra option that shadows a descriptor field");
            }
        }

        Ok(MergedConfig {
            headers,
            mode: config.mode.unwrap_or(self.mode),
            credentials: config.credentials.unwrap_or(self.credentials),
            cache: config.cache.unwrap_or(self.cache),
            options,
        })
    }
}

/// Per-call overrides; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    /// Headers in the order given; a later entry replaces an earlier one
    #[serde(deserialize_with = "header_pairs")]
    pub headers: Vec<(String, String)>,
    pub mode: Option<RequestMode>,
    pub credentials: Option<CredentialsMode>,
    pub cache: Option<CachePolicy>,
    /// Any other platform option, passed through after merge
    #[serde(flatten)]
    pub options: BTreeMap<String, serde_json::Value>,
}

impl RequestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a fetch-style options object
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Set a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set request mode
    pub fn mode(mut self, mode: RequestMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set credentials mode
    pub fn credentials(mut self, credentials: CredentialsMode) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set cache policy
    pub fn cache(mut self, cache: CachePolicy) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Set an extra platform option
    pub fn option(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.options.insert(name.into(), value);
        self
    }
}

/// Defaults overlaid by caller configuration, before computed fields
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub headers: HeaderMap,
    pub mode: RequestMode,
    pub credentials: CredentialsMode,
    pub cache: CachePolicy,
    pub options: BTreeMap<String, serde_json::Value>,
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name =
        HeaderName::try_from(name).map_err(|e| Error::invalid_header(name, e))?;
    let header_value =
        HeaderValue::try_from(value).map_err(|e| Error::invalid_header(name, e))?;
    Ok((header_name, header_value))
}

fn header_pairs<'de, D>(deserializer: D) -> std::result::Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    let map = BTreeMap::<String, String>::deserialize(deserializer)?;
    Ok(map.into_iter().collect())
}
