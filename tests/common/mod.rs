//! Fakes shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use lnkr::aggregate::{CapacityChart, CreationChart, UsageChart};
use lnkr::api::{LinkApi, StatsApi};
use lnkr::controllers::{ChartView, FormView};
use lnkr::error::RemoteError;
use lnkr::models::{CreateRequest, CreateResponse, DataTable, Dataset, ShortLink};
use lnkr::validate::ErrorKind;

// ── Link API ───────────────────────────────────────────────────────────────

/// Replays scripted replies and records every request it receives.
#[derive(Default)]
pub struct ScriptedLinkApi {
    replies: Mutex<VecDeque<Result<CreateResponse, RemoteError>>>,
    pub requests: Mutex<Vec<CreateRequest>>,
}

impl ScriptedLinkApi {
    pub fn replying(replies: Vec<Result<CreateResponse, RemoteError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CreateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LinkApi for ScriptedLinkApi {
    async fn create(&self, request: &CreateRequest) -> Result<CreateResponse, RemoteError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RemoteError::Transport("no scripted reply".into())))
    }
}

pub fn created(code: &str, target: &str, created_date: i64) -> Result<CreateResponse, RemoteError> {
    Ok(CreateResponse {
        status: 0,
        short_link: Some(code.into()),
        target_link: Some(target.into()),
        created_date: Some(created_date),
        msg: None,
    })
}

pub fn refused(msg: &str) -> Result<CreateResponse, RemoteError> {
    Ok(CreateResponse {
        status: 1,
        short_link: None,
        target_link: None,
        created_date: None,
        msg: Some(msg.into()),
    })
}

// ── Stats API ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FixedStatsApi {
    tables: HashMap<Dataset, Result<DataTable, RemoteError>>,
}

impl FixedStatsApi {
    pub fn with(mut self, dataset: Dataset, data: serde_json::Value) -> Self {
        let table: DataTable = serde_json::from_value(data).unwrap();
        self.tables.insert(dataset, Ok(table));
        self
    }

    pub fn failing(mut self, dataset: Dataset) -> Self {
        self.tables
            .insert(dataset, Err(RemoteError::Transport("503 Service Unavailable".into())));
        self
    }
}

#[async_trait]
impl StatsApi for FixedStatsApi {
    async fn fetch(&self, dataset: Dataset) -> Result<DataTable, RemoteError> {
        self.tables
            .get(&dataset)
            .cloned()
            .unwrap_or_else(|| Ok(DataTable::default()))
    }
}

// ── Views ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Busy(bool),
    Errors(Vec<ErrorKind>),
    Failure(String),
    Created(ShortLink, String),
    Notice(String),
    Reset,
    Creation(CreationChart),
    Usage(UsageChart),
    Capacity(CapacityChart),
    Unavailable(Dataset),
}

#[derive(Default)]
pub struct RecordingView {
    events: Mutex<Vec<Event>>,
}

impl RecordingView {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl FormView for RecordingView {
    fn set_busy(&self, busy: bool) {
        self.push(Event::Busy(busy));
    }

    fn show_errors(&self, errors: &[ErrorKind]) {
        self.push(Event::Errors(errors.to_vec()));
    }

    fn show_failure(&self, message: &str) {
        self.push(Event::Failure(message.into()));
    }

    fn show_created(&self, link: &ShortLink, short_url: &str) {
        self.push(Event::Created(link.clone(), short_url.into()));
    }

    fn show_notice(&self, message: &str) {
        self.push(Event::Notice(message.into()));
    }

    fn reset(&self) {
        self.push(Event::Reset);
    }
}

impl ChartView for RecordingView {
    fn draw_creation(&self, chart: &CreationChart) {
        self.push(Event::Creation(chart.clone()));
    }

    fn draw_usage(&self, chart: &UsageChart) {
        self.push(Event::Usage(chart.clone()));
    }

    fn draw_capacity(&self, chart: &CapacityChart) {
        self.push(Event::Capacity(chart.clone()));
    }

    fn unavailable(&self, dataset: Dataset) {
        self.push(Event::Unavailable(dataset));
    }
}
