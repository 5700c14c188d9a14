// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Page origin used for same-origin decisions
//!
//! An [`Origin`] is built once from the page location and handed to the
//! client. Request URLs are resolved against it and compared by protocol
//! and host (host includes a non-default port).

use std::fmt;

use url::Url;

use crate::error::Result;

/// Location components of a page, in the shape the browser exposes them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    href: Url,
    /// Scheme without the trailing `:`
    pub protocol: String,
    /// Hostname plus `:port` when the port is not the scheme default
    pub host: String,
    pub hostname: String,
    /// Explicit port, empty when default
    pub port: String,
    /// Always starts with `/`
    pub pathname: String,
    /// Query without the leading `?`
    pub search: String,
    /// Fragment without the leading `#`
    pub hash: String,
}

impl Origin {
    /// Parse the page location
    pub fn parse(location: impl AsRef<str>) -> Result<Self> {
        Ok(Self::from_url(Url::parse(location.as_ref())?))
    }

    /// Break an already parsed URL into location components
    pub fn from_url(url: Url) -> Self {
        let hostname = url.host_str().unwrap_or("").to_string();
        let port = url.port().map(|p| p.to_string()).unwrap_or_default();
        let host = if port.is_empty() {
            hostname.clone()
        } else {
            format!("{}:{}", hostname, port)
        };
        let pathname = if url.path().starts_with('/') {
            url.path().to_string()
        } else {
            format!("/{}", url.path())
        };

        Self {
            protocol: url.scheme().to_string(),
            host,
            hostname,
            port,
            pathname,
            search: url.query().unwrap_or("").to_string(),
            hash: url.fragment().unwrap_or("").to_string(),
            href: url,
        }
    }

    /// Full page URL
    pub fn href(&self) -> &Url {
        &self.href
    }

    /// Resolve a possibly relative request URL against the page location
    pub fn resolve(&self, url: &str) -> Result<Url> {
        Ok(self.href.join(url)?)
    }

    /// Same protocol and host as the page
    pub fn is_same_origin(&self, url: &Url) -> bool {
        let target = Origin::from_url(url.clone());
        target.protocol == self.protocol && target.host == self.host
    }

    /// Serialized origin, as sent in an `Origin` request header
    pub fn header_value(&self) -> String {
        self.href.origin().ascii_serialization()
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.protocol, self.host)
    }
}
