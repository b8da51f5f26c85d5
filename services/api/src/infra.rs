use benefits_screener::config::ScreeningConfig;
use benefits_screener::results::{
    LegalStatus, ReferenceMonth, RepositoryError, ScreenId, ScreenRecord, ScreenRepository,
};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) screening: ScreeningConfig,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryScreenRepository {
    records: Arc<Mutex<HashMap<ScreenId, ScreenRecord>>>,
}

impl ScreenRepository for InMemoryScreenRepository {
    fn save(&self, record: ScreenRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.screen_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &ScreenId) -> Result<Option<ScreenRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

impl InMemoryScreenRepository {
    pub(crate) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

/// Accepts `YYYY-MM` or a full `YYYY-MM-DD` date.
pub(crate) fn parse_reference_month(raw: &str) -> Result<ReferenceMonth, String> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(ReferenceMonth::from(date));
    }
    trimmed
        .parse::<ReferenceMonth>()
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM ({err})"))
}

pub(crate) fn parse_legal_status(raw: &str) -> Result<LegalStatus, String> {
    raw.parse::<LegalStatus>().map_err(|err| {
        let known: Vec<&str> = LegalStatus::ALL.iter().map(|status| status.label()).collect();
        format!("{err}; expected one of {}", known.join(", "))
    })
}
