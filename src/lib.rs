// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # fetch-request - thin fetch-style request client
//!
//! A small convenience layer over a request primitive, in the manner of a
//! browser `fetch` wrapper:
//!
//! - Default headers (`Content-Type: application/json;charset=utf-8` and an
//!   `X-Requested-With` marker), overridable per call
//! - Same-origin/CORS mode selection against a page [`Origin`]
//! - JSON serialization of structured payloads; files, blobs and multipart
//!   forms pass through untouched
//! - JSON parsing of responses whose content type is `application/json`
//! - `get`, `post`, `put`, `patch` and `delete` verbs
//!
//! No retries, timeouts or caching. Non-2xx statuses are not errors.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fetch_request::{FetchClient, Origin, Payload, RequestConfig};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> fetch_request::Result<()> {
//!     let client = FetchClient::new(Origin::parse("https://app.example/")?)?;
//!
//!     let items = client.get("/api/items", None).await?;
//!     println!("{:?}", items.as_json());
//!
//!     let config = RequestConfig::new().header("Authorization", "Bearer token");
//!     client
//!         .post("https://other.example/api", Some(Payload::from(json!({"a": 1}))), Some(&config))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod http;

// Re-exports for convenience

// Client
pub use http::{FetchClient, Origin};

// Descriptor
pub use http::{
    CachePolicy, ClientDefaults, CredentialsMode, RequestConfig, RequestDescriptor,
    RequestMethod, RequestMode,
};

// Payloads
pub use http::{Blob, FileHandle, FormPart, MultipartForm, Payload, PayloadKind, RequestBody};

// Responses
pub use http::{Response, ResponseBody};

// Transport
pub use http::{CookieJar, ReqwestTransport, Transport, TransportConfig};

// Errors
pub use error::{Error, Result};

/// fetch-request version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
