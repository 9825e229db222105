//! The smoke scenario: health, create, list, and a rejected create.

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use super::error::{IntegrationError, Result};

/// Request body for the product created by the scenario.
pub fn smoke_product(sku: &str) -> Value {
    json!({ "name": "Gamer Mouse", "sku": sku, "price": 29.99 })
}

/// Returns true if the listing holds `expected` (name, sku and price) with an id.
pub fn listing_contains(products: &Value, expected: &Value) -> bool {
    products
        .as_array()
        .map(|products| {
            products.iter().any(|p| {
                p["id"].is_string()
                    && p["name"] == expected["name"]
                    && p["sku"] == expected["sku"]
                    && p["price"] == expected["price"]
            })
        })
        .unwrap_or(false)
}

fn expect_status(step: &str, actual: StatusCode, expected: StatusCode) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(IntegrationError::CheckFailed(format!(
            "{step}: expected {expected}, got {actual}"
        )))
    }
}

/// Runs every check against a live server, stopping at the first failure.
pub async fn run_scenario(client: &Client, base_url: &str, sku: &str) -> Result<()> {
    let response = client.get(format!("{base_url}/health")).send().await?;
    expect_status("GET /health", response.status(), StatusCode::OK)?;

    let product = smoke_product(sku);
    let response = client
        .post(format!("{base_url}/products"))
        .json(&product)
        .send()
        .await?;
    expect_status("POST /products", response.status(), StatusCode::CREATED)?;
    let created: Value = response.json().await?;
    if created["sku"] != sku || created["name"] != product["name"] {
        return Err(IntegrationError::CheckFailed(format!(
            "POST /products: unexpected body {created}"
        )));
    }

    let response = client.get(format!("{base_url}/products")).send().await?;
    expect_status("GET /products", response.status(), StatusCode::OK)?;
    let products: Value = response.json().await?;
    if !listing_contains(&products, &product) {
        return Err(IntegrationError::CheckFailed(format!(
            "GET /products: {product} missing from listing"
        )));
    }

    let response = client
        .post(format!("{base_url}/products"))
        .json(&json!({ "name": "No SKU", "price": 1.0 }))
        .send()
        .await?;
    expect_status(
        "POST /products without sku",
        response.status(),
        StatusCode::BAD_REQUEST,
    )?;

    Ok(())
}
