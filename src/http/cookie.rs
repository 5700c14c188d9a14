// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Cookie storage backing the `credentials` request option

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use reqwest::header::HeaderMap;
use url::Url;

use super::headers::SET_COOKIE;
use super::request::CredentialsMode;

/// A single HTTP cookie
#[derive(Debug, Clone, PartialEq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    /// Domain the cookie belongs to
    pub domain: String,
    pub path: String,
    /// Expiration time (None = session cookie)
    pub expires: Option<DateTime<Utc>>,
    /// HTTPS only
    pub secure: bool,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: String::new(),
            path: "/".to_string(),
            expires: None,
            secure: false,
        }
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.expires.map_or(false, |exp| exp < Utc::now())
    }

    /// Check if the cookie should be sent to the given URL
    pub fn matches(&self, url: &Url) -> bool {
        let host = url.host_str().unwrap_or("");
        let domain = self.domain.trim_start_matches('.');
        let domain_ok =
            domain.is_empty() || host == domain || host.ends_with(&format!(".{}", domain));

        domain_ok
            && url.path().starts_with(&self.path)
            && (!self.secure || url.scheme() == "https")
            && !self.is_expired()
    }

    /// Parse a Set-Cookie header value received from `url`
    pub fn parse(header: &str, url: &Url) -> Option<Self> {
        let mut parts = header.split(';');
        let (name, value) = parts.next()?.trim().split_once('=')?;
        let host = url.host_str().unwrap_or("");
        let mut cookie = Cookie::new(name.trim(), value.trim()).domain(host);

        for part in parts.map(str::trim) {
            match part.split_once('=') {
                Some((attr, val)) => {
                    let val = val.trim();
                    match attr.trim().to_ascii_lowercase().as_str() {
                        "domain" => {
                            let domain = val.trim_start_matches('.').to_ascii_lowercase();
                            // A host may only set cookies for itself or a parent domain
                            if host != domain && !host.ends_with(&format!(".{}", domain)) {
                                return None;
                            }
                            cookie.domain = domain;
                        }
                        "path" => cookie.path = val.to_string(),
                        "expires" => {
                            if let Ok(dt) = DateTime::parse_from_rfc2822(val) {
                                cookie.expires = Some(dt.with_timezone(&Utc));
                            }
                        }
                        "max-age" => {
                            if let Ok(secs) = val.parse::<i64>() {
                                cookie.expires = if secs <= 0 {
                                    Some(DateTime::<Utc>::MIN_UTC)
                                } else {
                                    // Out of range means it outlives us: keep as session cookie
                                    TimeDelta::try_seconds(secs)
                                        .and_then(|delta| Utc::now().checked_add_signed(delta))
                                };
                            }
                        }
                        _ => {}
                    }
                }
                None if part.eq_ignore_ascii_case("secure") => cookie.secure = true,
                None => {}
            }
        }

        Some(cookie)
    }
}

/// Thread-safe cookie storage, keyed by domain
#[derive(Debug, Clone, Default)]
pub struct CookieJar {
    cookies: Arc<DashMap<String, Vec<Cookie>>>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cookie, replacing one with the same name and path
    pub fn add(&self, cookie: Cookie) {
        let mut entry = self.cookies.entry(cookie.domain.clone()).or_default();
        entry.retain(|c| c.name != cookie.name || c.path != cookie.path);
        if !cookie.is_expired() {
            entry.push(cookie);
        }
    }

    /// Record every Set-Cookie header of a response, unless credentials
    /// are omitted for the request
    pub fn store_response(&self, headers: &HeaderMap, url: &Url, credentials: CredentialsMode) {
        if credentials == CredentialsMode::Omit {
            return;
        }
        for value in headers.get_all(SET_COOKIE) {
            if let Some(cookie) = value.to_str().ok().and_then(|v| Cookie::parse(v, url)) {
                self.add(cookie);
            }
        }
    }

    /// `Cookie` header to attach under the given credentials mode
    pub fn header_for(
        &self,
        url: &Url,
        credentials: CredentialsMode,
        same_origin: bool,
    ) -> Option<String> {
        let send = match credentials {
            CredentialsMode::Include => true,
            CredentialsMode::SameOrigin => same_origin,
            CredentialsMode::Omit => false,
        };
        if !send {
            return None;
        }

        let pairs: Vec<String> = self
            .cookies
            .iter()
            .flat_map(|entry| {
                entry
                    .value()
                    .iter()
                    .filter(|c| c.matches(url))
                    .map(|c| format!("{}={}", c.name, c.value))
                    .collect::<Vec<_>>()
            })
            .collect();

        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }

    pub fn clear(&self) {
        self.cookies.clear();
    }

    /// Get total cookie count
    pub fn len(&self) -> usize {
        self.cookies.iter().map(|e| e.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_cookie_parsing() {
        let url = Url::parse("https://app.example/path").unwrap();
        let cookie = Cookie::parse("session=abc123; Domain=.app.example; Path=/api; Secure", &url).unwrap();

        assert_eq!(cookie.name, "session");
        assert_eq!(cookie.value, "abc123");
        assert_eq!(cookie.domain, "app.example");
        assert_eq!(cookie.path, "/api");
        assert!(cookie.secure);
    }

    #[test]
    fn test_huge_max_age() {
        let url = Url::parse("https://app.example/").unwrap();

        let cookie = Cookie::parse("a=1; Max-Age=99999999999999", &url).unwrap();
        assert!(!cookie.is_expired());

        let cookie = Cookie::parse("a=1; Max-Age=-99999999999999", &url).unwrap();
        assert!(cookie.is_expired());
    }

    #[test]
    fn test_foreign_domain_rejected() {
        let jar = CookieJar::new();
        let evil = Url::parse("https://evil.example/").unwrap();
        let mut headers = HeaderMap::new();
        headers.append(
            "set-cookie",
            HeaderValue::from_static("sid=attacker; Domain=app.example"),
        );

        jar.store_response(&headers, &evil, CredentialsMode::Include);
        assert!(jar.is_empty());

        let app = Url::parse("https://app.example/api").unwrap();
        assert_eq!(jar.header_for(&app, CredentialsMode::SameOrigin, true), None);
    }

    #[test]
    fn test_parent_domain_accepted() {
        let url = Url::parse("https://api.app.example/").unwrap();
        let cookie = Cookie::parse("sid=1; Domain=.App.Example", &url).unwrap();
        assert_eq!(cookie.domain, "app.example");
        assert!(cookie.matches(&Url::parse("https://www.app.example/").unwrap()));
    }

    #[test]
    fn test_credentials_policy() {
        let jar = CookieJar::new();
        let url = Url::parse("https://app.example/api").unwrap();
        jar.add(Cookie::new("sid", "1").domain("app.example"));

        assert_eq!(
            jar.header_for(&url, CredentialsMode::Include, false).as_deref(),
            Some("sid=1")
        );
        assert_eq!(
            jar.header_for(&url, CredentialsMode::SameOrigin, true).as_deref(),
            Some("sid=1")
        );
        assert_eq!(jar.header_for(&url, CredentialsMode::SameOrigin, false), None);
        assert_eq!(jar.header_for(&url, CredentialsMode::Omit, true), None);
    }

    #[test]
    fn test_store_response_respects_omit() {
        let jar = CookieJar::new();
        let url = Url::parse("https://app.example/login").unwrap();
        let mut headers = HeaderMap::new();
        headers.append("set-cookie", HeaderValue::from_static("a=1"));
        headers.append("set-cookie", HeaderValue::from_static("b=2; Max-Age=60"));

        jar.store_response(&headers, &url, CredentialsMode::Omit);
        assert!(jar.is_empty());

        jar.store_response(&headers, &url, CredentialsMode::SameOrigin);
        assert_eq!(jar.len(), 2);
    }

    #[test]
    fn test_expired_cookie_removes_existing() {
        let jar = CookieJar::new();
        let url = Url::parse("https://app.example/").unwrap();
        jar.add(Cookie::parse("sid=1", &url).unwrap());
        jar.add(Cookie::parse("sid=; Max-Age=-1", &url).unwrap());
        assert!(jar.is_empty());
    }
}
