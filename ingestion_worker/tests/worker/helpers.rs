use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use common::{
    domain::{
        entities::document::{DocumentType, StoredDocument},
        metric::FetchWindow,
    },
    ports::document_store::{DocumentStore, DocumentStoreError},
    repositories::document_in_memory_repository::DocumentInMemoryRepository,
    telemetry::{get_tracing_subscriber, init_tracing_subscriber},
};
use fake::Fake;
use ingestion_worker::ports::metric_source::{FetchError, MetricSource};
use once_cell::sync::Lazy;
use serde_json::{json, Value as JsonValue};
use tokio_util::sync::CancellationToken;

// Ensures that the `tracing` stack is only initialized once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    // The sink is part of the subscriber type, hence the two branches
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber =
            get_tracing_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_tracing_subscriber(subscriber).expect("Failed to set up tracing");
    } else {
        let subscriber =
            get_tracing_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_tracing_subscriber(subscriber).expect("Failed to set up tracing");
    };
});

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Metric source answering every fetch with the same scripted result
pub struct ScriptedMetricSource {
    response: Mutex<Option<Result<JsonValue, FetchError>>>,
    calls: Mutex<Vec<(DocumentType, FetchWindow)>>,
}

impl ScriptedMetricSource {
    pub fn responding(body: JsonValue) -> Self {
        Self {
            response: Mutex::new(Some(Ok(body))),
            calls: Mutex::new(vec![]),
        }
    }

    pub fn failing(error: FetchError) -> Self {
        Self {
            response: Mutex::new(Some(Err(error))),
            calls: Mutex::new(vec![]),
        }
    }

    pub fn calls(&self) -> Vec<(DocumentType, FetchWindow)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetricSource for ScriptedMetricSource {
    async fn fetch(
        &self,
        document_type: DocumentType,
        window: FetchWindow,
        _cancel_token: &CancellationToken,
    ) -> Result<JsonValue, FetchError> {
        self.calls.lock().unwrap().push((document_type, window));
        self.response
            .lock()
            .unwrap()
            .take()
            .expect("The scripted source only answers one fetch")
    }
}

/// In-memory store recording every create call, optionally failing from the n-th one
pub struct RecordingStore {
    inner: DocumentInMemoryRepository,
    creates: Mutex<Vec<(NaiveDate, DocumentType)>>,
    fail_from_call: Option<usize>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self {
            inner: DocumentInMemoryRepository::new(),
            creates: Mutex::new(vec![]),
            fail_from_call: None,
        }
    }

    /// Calls numbered from 1: `failing_from_call(2)` lets the first create succeed
    pub fn failing_from_call(call: usize) -> Self {
        Self {
            fail_from_call: Some(call),
            ..Self::new()
        }
    }

    pub fn creates(&self) -> Vec<(NaiveDate, DocumentType)> {
        self.creates.lock().unwrap().clone()
    }

    pub async fn documents(&self) -> Vec<StoredDocument> {
        self.inner.documents().await
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn create_document(
        &self,
        document: &StoredDocument,
        partition_key: DocumentType,
    ) -> Result<(), DocumentStoreError> {
        let call = {
            let mut creates = self.creates.lock().unwrap();
            creates.push((document.date, partition_key));
            creates.len()
        };

        if matches!(self.fail_from_call, Some(from) if call >= from) {
            return Err(DocumentStoreError::Unavailable("store is down".into()));
        }

        self.inner.create_document(document, partition_key).await
    }

    async fn query_by_date(
        &self,
        partition_key: DocumentType,
        date: NaiveDate,
    ) -> Result<Option<StoredDocument>, DocumentStoreError> {
        self.inner.query_by_date(partition_key, date).await
    }

    async fn query_paged(
        &self,
        partition_key: DocumentType,
        skip: u64,
        take: u64,
    ) -> Result<(Vec<StoredDocument>, u64), DocumentStoreError> {
        self.inner.query_paged(partition_key, skip, take).await
    }
}

pub struct TestWorld {
    pub source: Arc<ScriptedMetricSource>,
    pub store: Arc<RecordingStore>,
}

/// Wires a scripted source and a recording store, with tracing initialized
pub fn set_up(source: ScriptedMetricSource, store: RecordingStore) -> TestWorld {
    Lazy::force(&TRACING);

    TestWorld {
        source: Arc::new(source),
        store: Arc::new(store),
    }
}

pub fn activity_body() -> JsonValue {
    json!({
        "activities": [],
        "goals": { "steps": 10000, "caloriesOut": 2500, "activeMinutes": 30, "distance": 8.05 },
        "summary": {
            "steps": (1000..20000).fake::<u32>(),
            "caloriesOut": (1500..3500).fake::<u32>(),
            "sedentaryMinutes": (300..900).fake::<u32>(),
            "distances": [{ "activity": "total", "distance": (1.0..15.0).fake::<f64>() }]
        }
    })
}

pub fn sleep_body(night: NaiveDate) -> JsonValue {
    json!({
        "sleep": [{
            "logId": (1..u32::MAX).fake::<u32>(),
            "dateOfSleep": night.to_string(),
            "duration": 27_600_000,
            "efficiency": (70..99).fake::<u32>(),
            "isMainSleep": true,
            "minutesAsleep": 430,
            "minutesAwake": 30,
            "timeInBed": 460,
            "startTime": format!("{}T23:10:00.000", night),
            "endTime": format!("{}T06:50:00.000", night)
        }],
        "summary": { "totalMinutesAsleep": 430, "totalSleepRecords": 1, "totalTimeInBed": 460 }
    })
}

pub fn weight_body(dates: &[NaiveDate]) -> JsonValue {
    let samples: Vec<JsonValue> = dates
        .iter()
        .enumerate()
        .map(|(i, date)| {
            json!({
                "logId": i as u64 + 1,
                "date": date.to_string(),
                "time": "07:30:00",
                "weight": (60.0..90.0).fake::<f64>(),
                "bmi": (19.0..27.0).fake::<f64>(),
                "source": "Aria"
            })
        })
        .collect();

    json!({ "weight": samples })
}

pub fn food_body(day: NaiveDate) -> JsonValue {
    json!({
        "foods": [{
            "logId": 77,
            "logDate": day.to_string(),
            "isFavorite": false,
            "loggedFood": { "name": "Oatmeal", "amount": 1.0, "calories": 150, "mealTypeId": 1 }
        }],
        "goals": { "calories": 2200 },
        "summary": { "calories": 150, "carbs": 27.0, "fat": 2.5, "protein": 5.0, "water": 0.0 }
    })
}
