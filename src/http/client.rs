// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Verb-based request client

use std::sync::Arc;

use tracing::debug;
use url::Url;

use super::config::{ClientDefaults, RequestConfig};
use super::origin::Origin;
use super::payload::{transform_request, Payload};
use super::request::{RequestDescriptor, RequestMethod, RequestMode};
use super::response::{transform_response, ResponseBody};
use super::transport::{ReqwestTransport, Transport};
use crate::error::Result;

/// Fetch-style client bound to a page origin.
///
/// Every verb goes through [`FetchClient::send`]:
/// 1. resolve the URL against the origin; cross-origin URLs force `cors`
/// 2. merge caller headers over the default headers
/// 3. serialize structured payloads (never for GET/DELETE)
/// 4. dispatch through the transport
/// 5. parse JSON responses, return anything else raw
///
/// Transport errors and JSON parse errors are returned unchanged. Status
/// codes are not inspected.
#[derive(Clone)]
pub struct FetchClient {
    origin: Arc<Origin>,
    defaults: Arc<ClientDefaults>,
    transport: Arc<dyn Transport>,
}

impl FetchClient {
    /// Create a client that dispatches through reqwest
    pub fn new(origin: Origin) -> Result<Self> {
        let transport = ReqwestTransport::new()?.for_origin(origin.clone());
        Ok(Self::with_transport(origin, transport))
    }

    /// Create a client with a custom transport
    pub fn with_transport(origin: Origin, transport: impl Transport + 'static) -> Self {
        Self {
            origin: Arc::new(origin),
            defaults: Arc::new(ClientDefaults::default()),
            transport: Arc::new(transport),
        }
    }

    /// Replace the default descriptor
    pub fn with_defaults(mut self, defaults: ClientDefaults) -> Self {
        self.defaults = Arc::new(defaults);
        self
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn defaults(&self) -> &ClientDefaults {
        &self.defaults
    }

    /// GET; never carries a body
    pub async fn get(&self, url: &str, config: Option<&RequestConfig>) -> Result<ResponseBody> {
        self.send(url, RequestMethod::Get, None, config).await
    }

    /// POST
    pub async fn post(
        &self,
        url: &str,
        payload: Option<Payload>,
        config: Option<&RequestConfig>,
    ) -> Result<ResponseBody> {
        self.send(url, RequestMethod::Post, payload, config).await
    }

    /// PUT
    pub async fn put(
        &self,
        url: &str,
        payload: Option<Payload>,
        config: Option<&RequestConfig>,
    ) -> Result<ResponseBody> {
        self.send(url, RequestMethod::Put, payload, config).await
    }

    /// PATCH
    pub async fn patch(
        &self,
        url: &str,
        payload: Option<Payload>,
        config: Option<&RequestConfig>,
    ) -> Result<ResponseBody> {
        self.send(url, RequestMethod::Patch, payload, config).await
    }

    /// DELETE; never carries a body
    pub async fn delete(&self, url: &str, config: Option<&RequestConfig>) -> Result<ResponseBody> {
        self.send(url, RequestMethod::Delete, None, config).await
    }

    /// Build the request descriptor without dispatching it
    pub fn prepare(
        &self,
        url: &str,
        method: RequestMethod,
        payload: Option<Payload>,
        config: Option<&RequestConfig>,
    ) -> Result<(Url, RequestDescriptor)> {
        let url = self.origin.resolve(url)?;
        let same_origin = self.origin.is_same_origin(&url);

        let merged = match config {
            Some(config) => self.defaults.merge(config)?,
            None => self.defaults.merge(&RequestConfig::default())?,
        };

        let mode = if same_origin {
            merged.mode
        } else {
            RequestMode::Cors
        };
        let body = if method.allows_body() {
            transform_request(payload)?
        } else {
            None
        };

        let descriptor = RequestDescriptor {
            method: method.into(),
            headers: merged.headers,
            body,
            mode,
            credentials: merged.credentials,
            cache: merged.cache,
            options: merged.options,
        };

        Ok((url, descriptor))
    }

    /// Shared dispatch behind every verb
    pub async fn send(
        &self,
        url: &str,
        method: RequestMethod,
        payload: Option<Payload>,
        config: Option<&RequestConfig>,
    ) -> Result<ResponseBody> {
        let (url, descriptor) = self.prepare(url, method, payload, config)?;
        debug!(
            method = %method,
            url = %url,
            mode = %descriptor.mode,
            has_body = descriptor.body.is_some(),
            "dispatching request"
        );

        let response = self.transport.fetch(&url, &descriptor).await?;
        transform_response(response)
    }
}
