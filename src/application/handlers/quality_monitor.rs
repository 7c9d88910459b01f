//! Brief quality monitor.
//!
//! Holds the latest external assessment of a brief together with loading
//! and error flags, the way a view would observe them. Failures are stored,
//! never raised.

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::warn;

use crate::domain::brief::Brief;
use crate::domain::evaluation::QualityAssessment;
use crate::ports::QualityAssessor;

/// Observable monitor state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityState {
    pub brief_quality: Option<QualityAssessment>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct QualityMonitor {
    assessor: Arc<dyn QualityAssessor>,
    state: Arc<Mutex<QualityState>>,
}

impl QualityMonitor {
    pub fn new(assessor: Arc<dyn QualityAssessor>) -> Self {
        Self {
            assessor,
            state: Arc::new(Mutex::new(QualityState::default())),
        }
    }

    pub fn state(&self) -> QualityState {
        self.lock().clone()
    }

    /// Re-assesses `brief` and stores the outcome.
    pub async fn refresh(&self, brief: &Brief) {
        {
            let mut state = self.lock();
            state.loading = true;
            state.error = None;
        }

        let outcome = self.assessor.assess(brief).await;

        let mut state = self.lock();
        state.loading = false;
        match outcome {
            Ok(assessment) => {
                state.brief_quality = Some(assessment);
                state.error = None;
            }
            Err(err) => {
                warn!(error = %err, "brief quality assessment failed");
                state.brief_quality = None;
                state.error = Some(format!("No se pudo evaluar la calidad del brief: {}", err));
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, QualityState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
