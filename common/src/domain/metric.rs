use chrono::{Days, NaiveDate};
use serde::{de::DeserializeOwned, Serialize};

use crate::domain::entities::{
    activity::ActivitySummary,
    document::DocumentType,
    food::FoodLog,
    sleep::SleepSummary,
    weight::{WeightLog, WeightSample},
};

/// Number of days before today covered by a weight ingestion run
pub const WEIGHT_LOOKBACK_DAYS: u64 = 7;

/// Dates requested from the metric provider by one ingestion run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchWindow {
    Day(NaiveDate),
    /// Both bounds are inclusive
    Range { start: NaiveDate, end: NaiveDate },
}

impl FetchWindow {
    /// First day covered by the window
    pub fn start(&self) -> NaiveDate {
        match self {
            FetchWindow::Day(date) => *date,
            FetchWindow::Range { start, .. } => *start,
        }
    }

    /// The date a run considers "current", also the last day covered
    pub fn as_of(&self) -> NaiveDate {
        match self {
            FetchWindow::Day(date) => *date,
            FetchWindow::Range { end, .. } => *end,
        }
    }
}

impl std::fmt::Display for FetchWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchWindow::Day(date) => write!(f, "{}", date),
            FetchWindow::Range { start, end } => write!(f, "{}..={}", start, end),
        }
    }
}

/// Identity of a metric domain.
///
/// Everything that differs between domains lives here: the partition the
/// documents are written to, the payload persisted in each document, the
/// shape returned by the provider and how that shape is split into dated
/// observations. The ingestion and read paths are written once against this
/// trait.
pub trait Metric: Send + Sync + 'static {
    const DOCUMENT_TYPE: DocumentType;

    /// Body of a persisted document
    type Payload: Serialize
        + DeserializeOwned
        + Clone
        + PartialEq
        + std::fmt::Debug
        + Send
        + Sync
        + 'static;

    /// Response body of the provider
    type Raw: DeserializeOwned + Send;

    /// Dates to fetch for a run happening on `today`
    fn fetch_window(today: NaiveDate) -> FetchWindow;

    /// Splits a provider response into `(date, payload)` observations, one per document
    fn observations(raw: Self::Raw, window: &FetchWindow) -> Vec<(NaiveDate, Self::Payload)>;
}

fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

pub struct ActivityMetric;

impl Metric for ActivityMetric {
    const DOCUMENT_TYPE: DocumentType = DocumentType::Activity;
    type Payload = ActivitySummary;
    type Raw = ActivitySummary;

    fn fetch_window(today: NaiveDate) -> FetchWindow {
        FetchWindow::Day(today)
    }

    fn observations(raw: Self::Raw, window: &FetchWindow) -> Vec<(NaiveDate, Self::Payload)> {
        vec![(window.as_of(), raw)]
    }
}

pub struct SleepMetric;

impl Metric for SleepMetric {
    const DOCUMENT_TYPE: DocumentType = DocumentType::Sleep;
    type Payload = SleepSummary;
    type Raw = SleepSummary;

    /// Last night's sleep is attached to yesterday
    fn fetch_window(today: NaiveDate) -> FetchWindow {
        FetchWindow::Day(days_before(today, 1))
    }

    fn observations(raw: Self::Raw, window: &FetchWindow) -> Vec<(NaiveDate, Self::Payload)> {
        vec![(window.as_of(), raw)]
    }
}

pub struct WeightMetric;

impl Metric for WeightMetric {
    const DOCUMENT_TYPE: DocumentType = DocumentType::Weight;
    type Payload = WeightSample;
    type Raw = WeightLog;

    fn fetch_window(today: NaiveDate) -> FetchWindow {
        FetchWindow::Range {
            start: days_before(today, WEIGHT_LOOKBACK_DAYS),
            end: today,
        }
    }

    /// One observation per sample, dated with the sample's own date
    fn observations(raw: Self::Raw, _window: &FetchWindow) -> Vec<(NaiveDate, Self::Payload)> {
        raw.weight
            .into_iter()
            .map(|sample| (sample.date, sample))
            .collect()
    }
}

pub struct FoodMetric;

impl Metric for FoodMetric {
    const DOCUMENT_TYPE: DocumentType = DocumentType::Food;
    type Payload = FoodLog;
    type Raw = FoodLog;

    fn fetch_window(today: NaiveDate) -> FetchWindow {
        FetchWindow::Day(today)
    }

    fn observations(raw: Self::Raw, window: &FetchWindow) -> Vec<(NaiveDate, Self::Payload)> {
        vec![(window.as_of(), raw)]
    }
}
