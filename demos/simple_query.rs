use graphql_lite::{Client, ClientConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = env::var("GRAPHQL_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());

    let client = Client::new(ClientConfig::new(base_url))?;

    let mut data = serde_json::Value::Null;
    client
        .execute("{ __schema { queryType { name } } }", &mut data, [])
        .await?;

    println!("data: {data}");

    Ok(())
}
