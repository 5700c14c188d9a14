// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request descriptor and the option enums it carries

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::payload::RequestBody;
use crate::error::{Error, Result};

/// The verbs the client exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl RequestMethod {
    /// GET and DELETE never carry a body
    pub fn allows_body(self) -> bool {
        !matches!(self, RequestMethod::Get | RequestMethod::Delete)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Put => "PUT",
            RequestMethod::Patch => "PATCH",
            RequestMethod::Delete => "DELETE",
        }
    }
}

impl From<RequestMethod> for Method {
    fn from(method: RequestMethod) -> Self {
        match method {
            RequestMethod::Get => Method::GET,
            RequestMethod::Post => Method::POST,
            RequestMethod::Put => Method::PUT,
            RequestMethod::Patch => Method::PATCH,
            RequestMethod::Delete => Method::DELETE,
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generates `as_str`, `Display` and `FromStr` from the platform strings
macro_rules! platform_enum {
    ($name:ident, $option:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(Error::invalid_option($option, other)),
                }
            }
        }
    };
}

/// Request mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestMode {
    #[default]
    SameOrigin,
    Cors,
    NoCors,
    Navigate,
}

platform_enum!(RequestMode, "mode", {
    SameOrigin => "same-origin",
    Cors => "cors",
    NoCors => "no-cors",
    Navigate => "navigate",
});

/// Credentials mode for requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CredentialsMode {
    /// Send credentials only to same-origin requests
    #[default]
    SameOrigin,
    /// Always send credentials
    Include,
    /// Never send credentials
    Omit,
}

platform_enum!(CredentialsMode, "credentials", {
    SameOrigin => "same-origin",
    Include => "include",
    Omit => "omit",
});

/// Cache policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CachePolicy {
    Default,
    NoStore,
    Reload,
    #[default]
    NoCache,
    ForceCache,
    OnlyIfCached,
}

platform_enum!(CachePolicy, "cache", {
    Default => "default",
    NoStore => "no-store",
    Reload => "reload",
    NoCache => "no-cache",
    ForceCache => "force-cache",
    OnlyIfCached => "only-if-cached",
});

impl CachePolicy {
    /// Policies that must bypass any intermediate cache
    pub fn bypasses_cache(self) -> bool {
        matches!(
            self,
            CachePolicy::NoStore | CachePolicy::Reload | CachePolicy::NoCache
        )
    }
}

/// Fully assembled options handed to a transport. Built per call.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
    pub mode: RequestMode,
    pub credentials: CredentialsMode,
    pub cache: CachePolicy,
    /// Extra platform options, passed through untouched
    pub options: BTreeMap<String, serde_json::Value>,
}

impl RequestDescriptor {
    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Body as text, for JSON and text bodies
    pub fn body_text(&self) -> Option<&str> {
        self.body.as_ref().and_then(RequestBody::as_text)
    }

    /// Get an extra option
    pub fn option(&self, name: &str) -> Option<&serde_json::Value> {
        self.options.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_methods() {
        assert!(!RequestMethod::Get.allows_body());
        assert!(!RequestMethod::Delete.allows_body());
        assert!(RequestMethod::Post.allows_body());
        assert!(RequestMethod::Put.allows_body());
        assert!(RequestMethod::Patch.allows_body());
        assert_eq!(Method::from(RequestMethod::Patch), Method::PATCH);
    }

    #[test]
    fn test_mode_strings() {
        assert_eq!("cors".parse::<RequestMode>().unwrap(), RequestMode::Cors);
        assert_eq!(RequestMode::SameOrigin.to_string(), "same-origin");
        assert_eq!(
            serde_json::to_string(&RequestMode::NoCors).unwrap(),
            "\"no-cors\""
        );
    }

    #[test]
    fn test_unknown_option_value() {
        let err = "sometimes".parse::<CredentialsMode>().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidOption { ref option, ref value } if option == "credentials" && value == "sometimes"
        ));
    }

    #[test]
    fn test_cache_defaults() {
        assert_eq!(CachePolicy::default(), CachePolicy::NoCache);
        assert!(CachePolicy::NoStore.bypasses_cache());
        assert!(!CachePolicy::ForceCache.bypasses_cache());
        assert_eq!(
            "only-if-cached".parse::<CachePolicy>().unwrap(),
            CachePolicy::OnlyIfCached
        );
    }
}
