use graphql_lite::{variable, Client, ClientConfig};
use serde::Deserialize;
use std::env;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Deserialize)]
#[allow(dead_code)]
struct Data {
    #[serde(rename = "getCity")]
    city: Option<City>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct City {
    id: String,
    name: String,
    lat: f64,
    lng: f64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let base_url = env::var("GRAPHQL_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let city_id = env::var("CITY_ID").unwrap_or_else(|_| "0x01".to_string());

    let mut config = ClientConfig::new(base_url).with_log_sink(|line| eprintln!("{line}"));
    if let Ok(token) = env::var("GRAPHQL_TOKEN") {
        config = config.with_header("Authorization", format!("Bearer {token}"));
    }
    let client = Client::new(config)?;

    let mut data = Data::default();
    client
        .execute(
            "query($id: ID!) { getCity(id: $id) { id name lat lng } }",
            &mut data,
            [variable("id", city_id)],
        )
        .await?;

    println!("response: {data:?}");
    Ok(())
}
