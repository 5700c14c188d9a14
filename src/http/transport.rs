// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request primitive the client dispatches through

use std::time::Instant;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::{debug, trace};
use url::Url;

use super::cookie::CookieJar;
use super::headers::{CACHE_CONTROL, CONTENT_TYPE, COOKIE, ORIGIN, PRAGMA};
use super::origin::Origin;
use super::payload::{FormPart, MultipartForm, RequestBody};
use super::request::{CachePolicy, RequestDescriptor, RequestMode};
use super::response::Response;
use super::DEFAULT_CONTENT_TYPE;
use crate::error::{Error, Result};

/// Something that can send a descriptor to a URL and return the response.
///
/// Failures are returned as-is; the client never retries or reclassifies
/// them.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: &Url, descriptor: &RequestDescriptor) -> Result<Response>;
}

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("fetch-request/", env!("CARGO_PKG_VERSION"));

/// reqwest transport configuration
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// User agent string
    pub user_agent: String,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Keep a cookie jar and honour the credentials option
    pub handle_cookies: bool,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: 10,
            accept_invalid_certs: false,
            handle_cookies: true,
            proxy: None,
        }
    }
}

impl TransportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn handle_cookies(mut self, handle: bool) -> Self {
        self.handle_cookies = handle;
        self
    }

    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }
}

/// Transport backed by a reqwest client
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    config: TransportConfig,
    cookie_jar: CookieJar,
    origin: Option<Origin>,
}

impl ReqwestTransport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(TransportConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: TransportConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .redirect(Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(config.accept_invalid_certs);

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        Ok(Self {
            client: builder.build()?,
            config,
            cookie_jar: CookieJar::new(),
            origin: None,
        })
    }

    /// Page origin used for the `Origin` header and same-origin credentials
    pub fn for_origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Get the cookie jar
    pub fn cookie_jar(&self) -> &CookieJar {
        &self.cookie_jar
    }

    /// Get transport configuration
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Headers actually put on the wire for a descriptor
    fn outgoing_headers(&self, url: &Url, descriptor: &RequestDescriptor) -> Result<HeaderMap> {
        let mut headers = descriptor.headers.clone();
        // Without a page origin there is nothing to be cross-origin from.
        let same_origin = self.origin.as_ref().map_or(true, |o| o.is_same_origin(url));

        if let Some(RequestBody::Form(_)) = descriptor.body {
            // reqwest appends its own boundary content type for multipart bodies
            headers.remove(CONTENT_TYPE);
        } else if let Some(body) = descriptor.body.as_ref().filter(|b| b.is_opaque()) {
            let untouched_default = headers
                .get(CONTENT_TYPE)
                .map_or(false, |v| v == DEFAULT_CONTENT_TYPE);
            if untouched_default {
                headers.remove(CONTENT_TYPE);
                if let Some(ct) = body.content_type() {
                    let value = HeaderValue::try_from(ct)
                        .map_err(|e| Error::invalid_header(CONTENT_TYPE, e))?;
                    headers.insert(CONTENT_TYPE, value);
                }
            }
        }

        if descriptor.mode == RequestMode::Cors && !same_origin && !headers.contains_key(ORIGIN) {
            if let Some(origin) = &self.origin {
                let value = HeaderValue::try_from(origin.header_value())
                    .map_err(|e| Error::invalid_header(ORIGIN, e))?;
                headers.insert(ORIGIN, value);
            }
        }

        if descriptor.cache.bypasses_cache() && !headers.contains_key(CACHE_CONTROL) {
            let directive = if descriptor.cache == CachePolicy::NoStore {
                "no-store"
            } else {
                "no-cache"
            };
            headers.insert(CACHE_CONTROL, HeaderValue::from_static(directive));
            if !headers.contains_key(PRAGMA) {
                headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
            }
        }

        if self.config.handle_cookies && !headers.contains_key(COOKIE) {
            if let Some(cookie) = self.cookie_jar.header_for(url, descriptor.credentials, same_origin) {
                let value =
                    HeaderValue::try_from(cookie).map_err(|e| Error::invalid_header(COOKIE, e))?;
                headers.insert(COOKIE, value);
            }
        }

        Ok(headers)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn fetch(&self, url: &Url, descriptor: &RequestDescriptor) -> Result<Response> {
        let start = Instant::now();

        let mut builder = self
            .client
            .request(descriptor.method.clone(), url.clone())
            .headers(self.outgoing_headers(url, descriptor)?);

        builder = match &descriptor.body {
            None => builder,
            Some(RequestBody::Json(text)) | Some(RequestBody::Text(text)) => builder.body(text.clone()),
            Some(RequestBody::File(file)) => builder.body(file.data.clone()),
            Some(RequestBody::Blob(blob)) => builder.body(blob.data.clone()),
            Some(RequestBody::Form(form)) => builder.multipart(multipart_form(form)?),
        };

        for name in descriptor.options.keys() {
            trace!(option = %name, "option has no reqwest counterpart, not applied");
        }

        let response = builder.send().await?;
        let response_time = start.elapsed().as_millis() as u64;

        let redirected = response.url() != url;
        let final_url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();

        if self.config.handle_cookies {
            self.cookie_jar
                .store_response(&headers, &final_url, descriptor.credentials);
        }

        let body = response.bytes().await?;
        debug!(
            method = %descriptor.method,
            url = %final_url,
            status = status.as_u16(),
            elapsed_ms = response_time,
            "response received"
        );

        Ok(Response::new(status, headers, body, final_url, redirected, response_time))
    }
}

fn multipart_form(form: &MultipartForm) -> Result<Form> {
    let mut out = Form::new();
    for part in form.parts() {
        out = match part {
            FormPart::Text { name, value } => out.text(name.clone(), value.clone()),
            FormPart::File { name, file } => out.part(
                name.clone(),
                bytes_part(&file.data, file.name.clone(), file.content_type.as_deref())?,
            ),
            FormPart::Blob { name, blob } => out.part(
                name.clone(),
                bytes_part(&blob.data, "blob".to_string(), blob.content_type.as_deref())?,
            ),
        };
    }
    Ok(out)
}

fn bytes_part(data: &Bytes, file_name: String, content_type: Option<&str>) -> Result<Part> {
    let part = Part::bytes(data.to_vec()).file_name(file_name);
    match content_type {
        Some(ct) => Ok(part.mime_str(ct)?),
        None => Ok(part),
    }
}
