//! Examples for using the formcheck Server API

use reqwest::Client;
use serde_json::json;

const SERVER_URL: &str = "http://localhost:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = Client::new();

    // Example 1: Health check
    println!("1. Health Check:");
    let resp = client.get(format!("{SERVER_URL}/health")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 2: Seed the built-in mock templates
    println!("2. Seed Mock Templates:");
    let resp = client
        .post(format!("{SERVER_URL}/api/v1/templates/seed"))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 3: List templates in catalog order
    println!("3. List Templates:");
    let resp = client
        .get(format!("{SERVER_URL}/api/v1/templates"))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 4: Classify a JSON record (matches EmailForm)
    println!("4. Classify JSON Record:");
    let resp = client
        .post(format!("{SERVER_URL}/api/v1/classify"))
        .json(&json!({
            "email": "python@python.ru"
        }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 5: Classify a form-encoded record (matches PhoneForm)
    println!("5. Classify Form Record:");
    let resp = client
        .post(format!("{SERVER_URL}/api/v1/classify"))
        .form(&[("phone", "+7 456 789 32 12")])
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 6: Classify via query parameters (matches DateForm)
    println!("6. Classify Query Record:");
    let resp = client
        .post(format!("{SERVER_URL}/api/v1/classify"))
        .query(&[("current_date", "21.05.2024")])
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 7: A record no template accepts (returns inferred labels)
    println!("7. Classify Unmatched Record:");
    let resp = client
        .post(format!("{SERVER_URL}/api/v1/classify"))
        .json(&json!({
            "some_field": "hello world",
            "count": 42
        }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("All examples completed!");
    Ok(())
}
