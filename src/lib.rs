//! # quickapi - a minimal configurable HTTP API client
//!
//! quickapi turns a [`ClientConfig`] (base URL, default headers, default
//! request init, pagination conventions, default query parameters) into a
//! [`Client`] exposing `get`, `put`, `post`, `del`, and `get_paginated`
//! operations against a remote JSON API, plus two pure URL-construction
//! helpers: [`build_query_params`] and [`build_request_url`].
//!
//! Responses are opaque JSON, decoded into whatever type the caller asks
//! for; the client performs no schema validation, no retries, and no
//! authentication. Networking goes through an injectable [`Transport`]
//! (backed by `reqwest` by default), so the core itself never touches the
//! wire.
//!
//! ## Quick Start
//!
//! ```no_run
//! use quickapi::{Client, ClientConfig, QueryParams, RequestOptions};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Item {
//!     id: u64,
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), quickapi::Error> {
//!     let config = ClientConfig::new()
//!         .base_url("https://api.example.com/v2")
//!         .header("Authorization", "Bearer token")?;
//!     let client = Client::new(config)?;
//!
//!     // GET with query parameters
//!     let items: Vec<Item> = client
//!         .get(RequestOptions::new("items").params(QueryParams::new().set("limit", 10)))
//!         .await?;
//!     println!("fetched {} items", items.len());
//!
//!     // POST a JSON body
//!     let created: Item = client
//!         .post(RequestOptions::new("items").json(&serde_json::json!({"name": "new"}))?)
//!         .await?;
//!     println!("created item {}", created.id);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pagination
//!
//! [`Client::get_paginated`] drives a paged endpoint to exhaustion, feeding
//! each page to a consumer callback in ascending page order:
//!
//! ```no_run
//! use quickapi::{Client, ClientConfig, PaginationOptions, RequestOptions};
//! use serde_json::Value;
//!
//! # async fn example() -> Result<(), quickapi::Error> {
//! let config = ClientConfig::new()
//!     .base_url("https://api.example.com")
//!     .pagination(
//!         PaginationOptions::new()
//!             .result_key("results")
//!             .last_page(|page| page.as_array().is_some_and(|a| a.len() < 100)),
//!     );
//! let client = Client::new(config)?;
//!
//! client
//!     .get_paginated::<Vec<Value>, _, _>(
//!         RequestOptions::new("search"),
//!         |page, _raw| async move {
//!             for item in &page {
//!                 println!("{item}");
//!             }
//!         },
//!         None,
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Query strings and URLs
//!
//! The two pure helpers are exposed directly. Default and request parameters
//! merge with whole-value override semantics, keys containing `[]` serialize
//! as repeated pairs, and endpoints may carry their own query string:
//!
//! ```
//! use quickapi::{build_request_url, ClientConfig, QueryParams};
//!
//! let config = ClientConfig::new().base_url("https://example.com/api");
//! let url = build_request_url(
//!     &config,
//!     "items?sort=asc",
//!     Some(&QueryParams::new().set("tags[]", vec!["a", "b"])),
//! )
//! .unwrap();
//! assert_eq!(url, "https://example.com/api/items?sort=asc&tags%5B%5D=a&tags%5B%5D=b");
//! ```

mod client;
mod config;
mod error;
mod query;
mod request;
mod transport;
mod urls;

pub use client::Client;
pub use config::{ClientConfig, LastPageFn, PaginationOptions, RequestInit};
pub use error::{Error, Result};
pub use query::{build_query_params, QueryParams, QueryValue};
pub use request::RequestOptions;
pub use transport::{HttpTransport, Transport, TransportRequest, TransportResponse};
pub use urls::build_request_url;
