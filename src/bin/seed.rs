// src/bin/seed.rs
// Demo-data loader: drives the HTTP API to build a small browsable catalog.
// Usage: cargo run --bin seed (API_BASE_URL overrides the default)

use anyhow::{bail, Context, Result};
use dotenv::dotenv;
use reqwest::Client;
use serde_json::{json, Value};
use std::env;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";

struct Seeder {
    base_url: String,
    client: Client,
}

impl Seeder {
    fn new(base_url: String) -> Self {
        Seeder {
            base_url,
            client: Client::new(),
        }
    }

    /// POST a payload and return the created resource
    async fn post(&self, path: &str, body: Value) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("POST {} failed to send", path))?;

        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .with_context(|| format!("POST {} returned a non-JSON body", path))?;

        if !status.is_success() {
            bail!("POST {} returned {}: {}", path, status, payload);
        }

        Ok(payload)
    }

    /// POST and pull out the new resource id
    async fn create(&self, path: &str, body: Value) -> Result<String> {
        let created = self.post(path, body).await?;
        let id = created["id"]
            .as_str()
            .with_context(|| format!("POST {} response has no id", path))?
            .to_string();

        println!("  {}created{} {} {}", GREEN, RESET, path, id);
        Ok(id)
    }

    async fn check_health(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            bail!("Service is not healthy at {}", self.base_url);
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let base_url =
        env::var("API_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8004".to_string());

    println!("{}{}Seeding stayfolio-content at {}{}", BOLD, CYAN, base_url, RESET);

    let seeder = Seeder::new(base_url);
    seeder
        .check_health()
        .await
        .context("Start the server before seeding")?;

    // --- Geography ---
    println!("{}Geography{}", BOLD, RESET);

    let spain = seeder
        .create("/api/country", json!({ "name": "Spain", "code": "ES" }))
        .await?;

    let barcelona = seeder
        .create(
            "/api/city",
            json!({ "country_id": spain, "name": "Barcelona", "popularity": 92 }),
        )
        .await?;
    let madrid = seeder
        .create(
            "/api/city",
            json!({ "country_id": spain, "name": "Madrid", "popularity": 88 }),
        )
        .await?;

    let gothic_quarter = seeder
        .create(
            "/api/neighborhood",
            json!({ "city_id": barcelona, "name": "Gothic Quarter", "sort_order": 1 }),
        )
        .await?;

    seeder
        .create(
            "/api/landmark",
            json!({
                "city_id": barcelona,
                "name": "Sagrada Familia",
                "category": "monument",
                "latitude": 41.4036,
                "longitude": 2.1744
            }),
        )
        .await?;
    seeder
        .create(
            "/api/landmark",
            json!({
                "city_id": barcelona,
                "name": "Barceloneta Beach",
                "category": "beach",
                "latitude": 41.3784,
                "longitude": 2.1925
            }),
        )
        .await?;

    let mediterranean = seeder
        .create(
            "/api/destination",
            json!({ "name": "Mediterranean Escapes", "slug": "mediterranean-escapes" }),
        )
        .await?;

    seeder
        .post(
            &format!("/api/destination/{}/city", mediterranean),
            json!({ "city_id": barcelona, "display_order": 1 }),
        )
        .await?;
    seeder
        .post(
            &format!("/api/destination/{}/city", mediterranean),
            json!({ "city_id": madrid, "display_order": 2 }),
        )
        .await?;

    // --- Catalog ---
    println!("{}Catalog{}", BOLD, RESET);

    let hotel_type = seeder
        .create(
            "/api/accommodation-type",
            json!({ "name": "Hotel", "code": "HOTEL", "sort_order": 1 }),
        )
        .await?;

    let group = seeder
        .create(
            "/api/hotel-group",
            json!({ "name": "Costa Collection", "website": "https://example.com" }),
        )
        .await?;

    let wifi = seeder
        .create(
            "/api/hotel-amenity",
            json!({ "name": "Free WiFi", "category": "connectivity", "icon": "wifi" }),
        )
        .await?;
    let pool_amenity = seeder
        .create(
            "/api/hotel-amenity",
            json!({ "name": "Rooftop pool", "category": "wellness", "icon": "pool" }),
        )
        .await?;
    let step_free = seeder
        .create(
            "/api/hotel-amenity",
            json!({ "name": "Step-free access", "category": "accessibility" }),
        )
        .await?;

    let eco_label = seeder
        .create(
            "/api/label",
            json!({ "name": "Eco-friendly", "code": "ECO", "color": "#2E8B57" }),
        )
        .await?;

    // --- Hotel (composite create) ---
    println!("{}Hotel{}", BOLD, RESET);

    let full = seeder
        .post(
            "/api/hotel-card/full",
            json!({
                "address": {
                    "city_id": barcelona,
                    "neighborhood_id": gothic_quarter,
                    "street": "Carrer del Bisbe 12",
                    "postal_code": "08002",
                    "latitude": 41.3834,
                    "longitude": 2.1761
                },
                "card": {
                    "name": "Hotel Mirador del Gotic",
                    "accommodation_type_id": hotel_type,
                    "destination_id": mediterranean,
                    "hotel_group_id": group,
                    "star_rating": 4,
                    "popularity": 75,
                    "priority": 5
                },
                "details": {
                    "description": "Boutique rooms above the old town, a short walk from the cathedral.",
                    "check_in_time": "15:00",
                    "check_out_time": "11:00"
                }
            }),
        )
        .await?;

    let card_id = full["card"]["id"]
        .as_str()
        .context("composite create response has no card id")?
        .to_string();
    println!("  {}created{} hotel card {}", GREEN, RESET, card_id);

    seeder
        .post(
            &format!("/api/hotel-card/{}/amenity", card_id),
            json!({ "target_id": wifi, "sort_order": 1 }),
        )
        .await?;
    seeder
        .post(
            &format!("/api/hotel-card/{}/amenity", card_id),
            json!({ "target_id": pool_amenity, "sort_order": 2 }),
        )
        .await?;
    seeder
        .post(
            &format!("/api/hotel-card/{}/amenity", card_id),
            json!({ "target_id": step_free, "sort_order": 3 }),
        )
        .await?;
    seeder
        .post(
            &format!("/api/hotel-card/{}/label", card_id),
            json!({ "target_id": eco_label, "sort_order": 1 }),
        )
        .await?;

    seeder
        .create(
            "/api/hotel-room",
            json!({
                "hotel_card_id": card_id,
                "name": "Double room",
                "capacity": 2,
                "price_per_night": 145.0,
                "sort_order": 1
            }),
        )
        .await?;
    seeder
        .create(
            "/api/hotel-room",
            json!({
                "hotel_card_id": card_id,
                "name": "Family suite",
                "capacity": 4,
                "price_per_night": 260.0,
                "sort_order": 2
            }),
        )
        .await?;

    seeder
        .create(
            "/api/hotel-image",
            json!({
                "hotel_card_id": card_id,
                "url": "https://images.example.com/mirador/facade.jpg",
                "alt_text": "Hotel facade at dusk",
                "is_primary": true,
                "sort_order": 1
            }),
        )
        .await?;

    seeder
        .create(
            "/api/hotel-faq",
            json!({
                "hotel_card_id": card_id,
                "question": "Is breakfast included?",
                "answer": "Breakfast is included with all direct bookings.",
                "sort_order": 1
            }),
        )
        .await?;

    seeder
        .create(
            "/api/hotel-policy",
            json!({
                "hotel_card_id": card_id,
                "check_in_time": "15:00",
                "check_out_time": "11:00",
                "cancellation_policy": "Free cancellation up to 48 hours before arrival.",
                "pets_allowed": false,
                "smoking_allowed": false
            }),
        )
        .await?;

    seeder
        .create(
            "/api/hotel-highlight",
            json!({
                "hotel_card_id": card_id,
                "title": "Rooftop views over the cathedral",
                "sort_order": 1
            }),
        )
        .await?;

    // --- Users ---
    println!("{}Users{}", BOLD, RESET);

    seeder
        .create(
            "/api/user",
            json!({
                "email": "editor@example.com",
                "display_name": "Content Editor",
                "role": "manager"
            }),
        )
        .await?;

    println!(
        "{}{}Done.{} Try GET /api/public/hotels/{}?include=all",
        BOLD, GREEN, RESET, card_id
    );

    Ok(())
}
