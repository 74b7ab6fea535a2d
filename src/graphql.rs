//! graphql types
//!
//! request envelope plus wrappers for graphql responses and errors.

use crate::variables::Variables;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// graphql request envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlRequest {
    /// query or mutation text, sent as-is
    pub query: String,
    /// variable bindings, serialized as `null` when absent
    pub variables: Option<Variables>,
}

impl GraphQlRequest {
    /// serialize the envelope into the exact bytes sent on the wire
    pub(crate) fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

/// graphql response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlResponse<T> {
    /// response data or null if errors
    pub data: Option<T>,
    /// graphql errors array
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<GraphQlError>,
}

impl<T> GraphQlResponse<T> {
    /// true if the response contains graphql errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// graphql error entry
///
/// only `message` matters to the client; missing or `null` fields decode to
/// their empty value so any error entry still reaches [`crate::Error::GraphQl`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlError {
    /// error message
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// error locations in the query
    #[serde(default, deserialize_with = "null_as_default")]
    pub locations: Vec<GraphQlLocation>,
    /// response path
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: Vec<serde_json::Value>,
    /// optional extensions payload
    #[serde(default)]
    pub extensions: Option<serde_json::Value>,
}

/// graphql error location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlLocation {
    /// line number (1-based)
    #[serde(default)]
    pub line: Option<i64>,
    /// column number (1-based)
    #[serde(default)]
    pub column: Option<i64>,
}

impl fmt::Display for GraphQlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
