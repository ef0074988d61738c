use std::sync::Arc;

use common::domain::{
    entities::{document::Document, weight::WeightSample},
    metric::WeightMetric,
};
use serde_json::Value as JsonValue;

use crate::helpers::{
    date, days_after, spawn_app, spawn_app_with_store, weight_sample, UnavailableStore,
};

#[tokio::test]
async fn get_document_by_date_returns_the_stored_document() {
    // Arranges
    let app = spawn_app().await;
    let day = date(2024, 1, 2);
    let inserted = app.insert::<WeightMetric>(day, weight_sample(day)).await;

    // Acts
    let response = app.get("/weight/2024-01-02").await;

    // Asserts
    assert_eq!(response.status().as_u16(), 200);

    let body: JsonValue = response.json().await.unwrap();
    assert_eq!(body["date"], "2024-01-02");
    assert_eq!(body["documentType"], "Weight");

    let document: Document<WeightSample> = serde_json::from_value(body).unwrap();
    assert_eq!(document, inserted);
}

#[tokio::test]
async fn get_document_by_date_returns_a_404_when_nothing_was_ingested_that_day() {
    let app = spawn_app().await;
    let day = date(2024, 1, 2);
    app.insert::<WeightMetric>(day, weight_sample(day)).await;

    let response = app.get("/weight/2024-01-03").await;

    assert_eq!(response.status().as_u16(), 404);
    let body: JsonValue = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn get_document_by_date_only_reads_the_partition_of_its_domain() {
    // Arranges
    let app = spawn_app().await;
    let day = date(2024, 4, 20);
    app.insert::<WeightMetric>(day, weight_sample(day)).await;

    // Acts
    let activity = app.get("/activity/2024-04-20").await;
    let sleep = app.get("/sleep/2024-04-20").await;

    // Asserts
    assert_eq!(activity.status().as_u16(), 404);
    assert_eq!(sleep.status().as_u16(), 404);
}

#[tokio::test]
async fn get_document_by_date_returns_the_first_document_when_a_day_was_ingested_twice() {
    let app = spawn_app().await;
    let day = date(2024, 1, 2);
    let first = app.insert::<WeightMetric>(day, weight_sample(day)).await;
    app.insert::<WeightMetric>(day, weight_sample(day)).await;

    let response = app.get("/weight/2024-01-02").await;

    assert_eq!(response.status().as_u16(), 200);
    let document: Document<WeightSample> = response.json().await.unwrap();
    assert_eq!(document.id, first.id);
}

#[tokio::test]
async fn get_document_by_date_returns_a_400_when_the_date_is_invalid() {
    // Arranges
    let app = spawn_app().await;
    let test_cases = vec![
        ("2024-13-01", "month out of range"),
        ("2024-02-30", "day out of range"),
        ("02-01-2024", "day first"),
        ("yesterday", "not a date"),
    ];

    for (invalid_date, description) in test_cases {
        // Acts
        let response = app.get(&format!("/sleep/{}", invalid_date)).await;

        // Asserts
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the date was {}.",
            description
        );
    }
}

#[tokio::test]
async fn get_document_by_date_returns_a_500_when_the_store_fails() {
    let app = spawn_app_with_store(Arc::new(UnavailableStore)).await;

    let response = app.get("/activity/2024-01-02").await;

    assert_eq!(response.status().as_u16(), 500);
    let body: JsonValue = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn every_domain_exposes_its_documents_by_date() {
    let app = spawn_app().await;

    for path in ["/activity", "/sleep", "/weight", "/food"] {
        let response = app.get(&format!("{}/2024-01-02", path)).await;

        // Unknown routes answer 404 with an empty body, the handler with an error message
        assert_eq!(response.status().as_u16(), 404);
        let body: JsonValue = serde_json::from_str(&response.text().await.unwrap())
            .unwrap_or_else(|_| panic!("{} is not routed to a read handler", path));
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn get_document_by_date_returns_float_measurements_unchanged() {
    // Arranges
    let app = spawn_app().await;
    let start = date(2023, 1, 1);
    let mut inserted = vec![];
    for offset in 0..200 {
        let day = days_after(start, offset);
        inserted.push(app.insert::<WeightMetric>(day, weight_sample(day)).await);
    }

    for document in inserted {
        // Acts
        let response = app.get(&format!("/weight/{}", document.date)).await;

        // Asserts
        let read: Document<WeightSample> = response.json().await.unwrap();
        assert_eq!(read, document);
    }
}
