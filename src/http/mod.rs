// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Fetch-style request layer
//!
//! Normalizes a call (URL, verb, payload, overrides) into a request
//! descriptor, dispatches it through a [`Transport`] and turns JSON
//! responses into parsed values.

mod client;
mod config;
mod cookie;
mod origin;
mod payload;
mod request;
mod response;
mod transport;

pub use client::FetchClient;
pub use config::{ClientDefaults, MergedConfig, RequestConfig};
pub use cookie::{Cookie, CookieJar};
pub use origin::Origin;
pub use payload::{
    transform_request, Blob, FileHandle, FormPart, MultipartForm, Payload, PayloadKind,
    RequestBody,
};
pub use request::{CachePolicy, CredentialsMode, RequestDescriptor, RequestMethod, RequestMode};
pub use response::{transform_response, Response, ResponseBody};
pub use transport::{ReqwestTransport, Transport, TransportConfig};

/// JSON media type; responses whose content type starts with it are parsed
pub const APPLICATION_JSON: &str = "application/json";

/// Default request content type
pub const DEFAULT_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// Default value of the `X-Requested-With` marker header
pub const DEFAULT_REQUESTED_WITH: &str = "fetch-request";

/// Common HTTP headers
pub mod headers {
    pub const CACHE_CONTROL: &str = "cache-control";
    pub const CONTENT_TYPE: &str = "content-type";
    pub const COOKIE: &str = "cookie";
    pub const SET_COOKIE: &str = "set-cookie";
    pub const ORIGIN: &str = "origin";
    pub const PRAGMA: &str = "pragma";
    pub const X_REQUESTED_WITH: &str = "x-requested-with";
}
