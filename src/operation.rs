//! typed operations
//!
//! bind a query string, endpoint, and response type together once.

use serde::de::DeserializeOwned;

/// graphql operation contract for typed queries and mutations
///
/// ```
/// use graphql_lite::Operation;
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize)]
/// struct CityData {
///     city: Option<City>,
/// }
///
/// #[derive(Debug, Deserialize)]
/// struct City {
///     name: String,
/// }
///
/// struct GetCity;
///
/// impl Operation for GetCity {
///     const QUERY: &'static str = "query($id: ID!) { city(id: $id) { name } }";
///     type Response = CityData;
/// }
/// ```
pub trait Operation {
    /// graphql query or mutation string
    const QUERY: &'static str;
    /// endpoint name appended to the base url
    const ENDPOINT: &'static str = crate::client::DEFAULT_ENDPOINT;
    /// response payload type
    type Response: DeserializeOwned;
}
