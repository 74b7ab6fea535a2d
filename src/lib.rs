//! graphql client over http
//!
//! this crate provides a small client for sending graphql queries and
//! mutations to a single backend. start with [`Client`] and [`ClientConfig`],
//! bind variables with [`variable`], and decode `data` straight into your own
//! types with `execute`. `raw_request` sends a prebuilt json payload.
//!
//! ## quick start
//!
//! ```no_run
//! use graphql_lite::{variable, Client, ClientConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new(
//!     ClientConfig::new("http://localhost:8080").with_header("Authorization", "Bearer token"),
//! )?;
//!
//! let mut data = serde_json::Value::Null;
//! client
//!     .execute(
//!         "query($id: ID!) { city(id: $id) { name } }",
//!         &mut data,
//!         [variable("id", "0x01")],
//!     )
//!     .await?;
//! println!("{data}");
//! # Ok(())
//! # }
//! ```
//!
//! ## errors
//!
//! transport, status, decoding, and server-reported graphql errors all come
//! back as [`Error`]. when the server reports several graphql errors only the
//! first message ends up in the error text; the full list is kept on
//! [`Error::GraphQl`].

mod client;
mod config;
mod error;
mod graphql;
mod operation;
mod variables;

pub use client::{Client, DEFAULT_ENDPOINT};
pub use config::{ClientConfig, LogSink};
pub use error::{Error, Result};
pub use graphql::{GraphQlError, GraphQlLocation, GraphQlRequest, GraphQlResponse};
pub use operation::Operation;
pub use variables::{variable, Variable, Variables};
