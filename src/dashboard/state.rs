use crate::config::DashboardConfig;
use crate::dashboard::data::DashboardData;
use crate::dashboard::view::AppState;
use crate::errors::ServerError;
use std::sync::{Arc, RwLock};
use std::thread::{self, JoinHandle};

/// Lifecycle of the served dashboard. `Error` is terminal.
#[derive(Debug, Clone)]
pub enum DashboardState {
    Loading,
    Ready(AppState),
    Error(String),
}

pub type SharedDashboard = Arc<RwLock<DashboardState>>;

impl DashboardState {
    /// Loads synchronously; used by `render` and by the background loader.
    pub fn load(cfg: &DashboardConfig) -> DashboardState {
        match DashboardData::load(&cfg.data, &cfg.summary) {
            Ok(data) => DashboardState::Ready(AppState::new(Arc::new(data), cfg.top_n)),
            Err(e) => {
                tracing::error!("{e}");
                DashboardState::Error(e.to_string())
            }
        }
    }
}

pub fn shared_loading() -> SharedDashboard {
    Arc::new(RwLock::new(DashboardState::Loading))
}

/// Loads the artifact off the request path and swaps the result in once.
pub fn spawn_loader(cfg: DashboardConfig, shared: SharedDashboard) -> JoinHandle<()> {
    thread::spawn(move || {
        let next = DashboardState::load(&cfg);
        match shared.write() {
            Ok(mut state) => {
                if matches!(*state, DashboardState::Loading) {
                    *state = next;
                }
            }
            Err(_) => tracing::error!("dashboard state lock poisoned, load result dropped"),
        }
    })
}

/// Clones the current state out so rendering never holds the lock.
pub fn snapshot(shared: &SharedDashboard) -> Result<DashboardState, ServerError> {
    shared
        .read()
        .map(|state| state.clone())
        .map_err(|_| ServerError::InternalError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_artifact_ends_in_error() {
        let cfg = DashboardConfig {
            data: PathBuf::from("/nonexistent/classified.json"),
            ..DashboardConfig::default()
        };
        let shared = shared_loading();
        spawn_loader(cfg, Arc::clone(&shared)).join().unwrap();

        match snapshot(&shared).unwrap() {
            DashboardState::Error(msg) => assert!(msg.contains("classified.json")),
            other => panic!("expected error state, got {other:?}"),
        }
    }

    #[test]
    fn error_state_is_not_overwritten() {
        let shared: SharedDashboard = Arc::new(RwLock::new(DashboardState::Error("boom".into())));
        spawn_loader(DashboardConfig::default(), Arc::clone(&shared)).join().unwrap();
        assert!(matches!(snapshot(&shared).unwrap(), DashboardState::Error(m) if m == "boom"));
    }
}
