use std::sync::Arc;

use common::domain::{
    entities::{document::Document, weight::WeightSample},
    metric::{SleepMetric, WeightMetric},
    pagination::PaginationResponse,
};
use serde_json::Value as JsonValue;

use crate::helpers::{
    date, days_after, spawn_app, spawn_app_with_store, weight_sample, TestApp, UnavailableStore,
};

async fn insert_weight_documents(app: &TestApp, count: u64) -> Vec<Document<WeightSample>> {
    let start = date(2024, 1, 1);
    let mut documents = vec![];
    for offset in 0..count {
        let day = days_after(start, offset);
        documents.push(app.insert::<WeightMetric>(day, weight_sample(day)).await);
    }
    documents
}

#[tokio::test]
async fn get_documents_paged_on_an_empty_partition_returns_an_empty_page() {
    // Arranges
    let app = spawn_app().await;

    // Acts
    let response = app.get("/food").await;

    // Asserts
    assert_eq!(response.status().as_u16(), 200);

    let body: JsonValue = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "items": [],
            "totalCount": 0,
            "pageNumber": 1,
            "pageSize": 20,
            "totalPages": 0,
            "hasPreviousPage": false,
            "hasNextPage": false,
        })
    );
}

#[tokio::test]
async fn get_documents_paged_splits_the_partition_into_pages() {
    // Arranges
    let app = spawn_app().await;
    let documents = insert_weight_documents(&app, 45).await;

    // Acts
    let first: PaginationResponse<Document<WeightSample>> =
        app.get("/weight").await.json().await.unwrap();
    let last: PaginationResponse<Document<WeightSample>> = app
        .get("/weight?pageNumber=3&pageSize=20")
        .await
        .json()
        .await
        .unwrap();

    // Asserts
    assert_eq!(first.total_count, 45);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.items, documents[..20].to_vec());
    assert!(!first.has_previous_page);
    assert!(first.has_next_page);

    assert_eq!(last.page_number, 3);
    assert_eq!(last.items, documents[40..].to_vec());
    assert!(last.has_previous_page);
    assert!(!last.has_next_page);
}

#[tokio::test]
async fn get_documents_paged_past_the_last_page_returns_no_items() {
    let app = spawn_app().await;
    insert_weight_documents(&app, 5).await;

    let page: PaginationResponse<Document<WeightSample>> = app
        .get("/weight?pageNumber=4&pageSize=2")
        .await
        .json()
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.total_count, 5);
    assert_eq!(page.total_pages, 3);
    assert!(page.has_previous_page);
    assert!(!page.has_next_page);
}

#[tokio::test]
async fn get_documents_paged_normalizes_out_of_range_parameters() {
    // Arranges
    let app = spawn_app().await;
    insert_weight_documents(&app, 3).await;
    let test_cases = vec![
        ("pageNumber=-2&pageSize=500", 1, 100, "negative page and oversized page"),
        ("pageNumber=0&pageSize=0", 1, 20, "zero values"),
        ("pageNumber=two&pageSize=ten", 1, 20, "values that are not numbers"),
        ("pageSize=2", 1, 2, "missing page number"),
        ("pageNumber=2", 2, 20, "missing page size"),
    ];

    for (query, page_number, page_size, description) in test_cases {
        // Acts
        let response = app.get(&format!("/weight?{}", query)).await;

        // Asserts
        assert_eq!(
            200,
            response.status().as_u16(),
            "The API did not answer 200 OK for {}.",
            description
        );
        let body: JsonValue = response.json().await.unwrap();
        assert_eq!(body["pageNumber"], page_number, "Wrong page number for {}", description);
        assert_eq!(body["pageSize"], page_size, "Wrong page size for {}", description);
        assert_eq!(body["totalCount"], 3);
    }
}

#[tokio::test]
async fn get_documents_paged_only_lists_the_partition_of_its_domain() {
    // Arranges
    let app = spawn_app().await;
    insert_weight_documents(&app, 4).await;
    let night = date(2024, 1, 1);
    app.insert::<SleepMetric>(night, serde_json::from_value(sleep_payload()).unwrap())
        .await;

    // Acts
    let body: JsonValue = app.get("/sleep").await.json().await.unwrap();

    // Asserts
    assert_eq!(body["totalCount"], 1);
    assert_eq!(body["items"][0]["documentType"], "Sleep");
    assert_eq!(body["items"][0]["date"], "2024-01-01");
}

#[tokio::test]
async fn get_documents_paged_returns_a_500_when_the_store_fails() {
    let app = spawn_app_with_store(Arc::new(UnavailableStore)).await;

    let response = app.get("/weight?pageNumber=1").await;

    assert_eq!(response.status().as_u16(), 500);
    let body: JsonValue = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

fn sleep_payload() -> JsonValue {
    serde_json::json!({
        "sleep": [{
            "logId": 26589710670u64,
            "dateOfSleep": "2024-01-01",
            "duration": 28_440_000,
            "efficiency": 93,
            "isMainSleep": true,
            "minutesAsleep": 441,
            "minutesAwake": 33,
            "timeInBed": 474,
            "startTime": "2023-12-31T23:02:30.000",
            "endTime": "2024-01-01T06:56:30.000"
        }],
        "summary": {
            "totalMinutesAsleep": 441,
            "totalSleepRecords": 1,
            "totalTimeInBed": 474
        }
    })
}
