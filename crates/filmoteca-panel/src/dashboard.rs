//! Visits dashboard service.
//!
//! One full load fetches the complete payload; the background poller then
//! refreshes on an interval but merges only the active-visitors counter into
//! the held state, so the rest of the dashboard never flickers from partial
//! refreshes. Poll failures are logged and the previous state stays up.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use filmoteca_core::models::VisitsDashboard;
use filmoteca_core::AppResult;
use filmoteca_db::VisitsRepository;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Source of dashboard payloads.
#[async_trait]
pub trait VisitsSource: Send + Sync {
    async fn fetch(&self) -> AppResult<VisitsDashboard>;
}

#[async_trait]
impl VisitsSource for VisitsRepository {
    async fn fetch(&self) -> AppResult<VisitsDashboard> {
        VisitsRepository::fetch(self).await
    }
}

pub struct DashboardService {
    source: Arc<dyn VisitsSource>,
    current: RwLock<VisitsDashboard>,
}

impl DashboardService {
    pub fn new(source: Arc<dyn VisitsSource>) -> Self {
        Self {
            source,
            current: RwLock::new(VisitsDashboard {
                resumen: None,
                diario: Vec::new(),
            }),
        }
    }

    /// Full load: replace the held state with a fresh payload.
    pub async fn load(&self) -> AppResult<VisitsDashboard> {
        let dashboard = self.source.fetch().await?;
        *self.current.write().await = dashboard.clone();
        Ok(dashboard)
    }

    /// Refresh only the active-visitors counter. The daily series and the
    /// other counters keep their last fully-loaded values.
    pub async fn refresh_active(&self) -> AppResult<()> {
        let fresh = self.source.fetch().await?;
        let fresh_active = fresh.resumen.map(|r| r.visitas_activas);
        let mut current = self.current.write().await;
        if let (Some(summary), Some(active)) = (current.resumen.as_mut(), fresh_active) {
            summary.visitas_activas = active;
        }
        Ok(())
    }

    pub async fn snapshot(&self) -> VisitsDashboard {
        self.current.read().await.clone()
    }

    /// Spawn the active-visitors poller. Errors are logged and tolerated;
    /// the task runs until aborted.
    pub fn spawn_active_poller(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // The first tick fires immediately; skip it, load() already ran.
            interval.tick().await;
            loop {
                interval.tick().await;
                if let Err(err) = service.refresh_active().await {
                    tracing::warn!(error = %err, "active visits refresh failed");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filmoteca_core::models::{DailyVisits, VisitsSummary};
    use filmoteca_core::AppError;
    use std::sync::atomic::{AtomicI64, Ordering};

    struct FakeSource {
        active: AtomicI64,
        fail: bool,
    }

    impl FakeSource {
        fn new(active: i64) -> Self {
            Self {
                active: AtomicI64::new(active),
                fail: false,
            }
        }

        fn dashboard(&self) -> VisitsDashboard {
            VisitsDashboard {
                resumen: Some(VisitsSummary {
                    visitas_activas: self.active.load(Ordering::SeqCst),
                    visitas_diarias: 120,
                    visitas_7_dias: 900,
                    visitas_mes: 3000,
                    visitas_3_meses: 9000,
                    visitas_totales: 50000,
                }),
                diario: vec![DailyVisits {
                    date: "2024-05-01".to_string(),
                    mobile: 70,
                    desktop: 50,
                }],
            }
        }
    }

    #[async_trait]
    impl VisitsSource for FakeSource {
        async fn fetch(&self) -> AppResult<VisitsDashboard> {
            if self.fail {
                return Err(AppError::Remote("procedure timed out".to_string()));
            }
            Ok(self.dashboard())
        }
    }

    #[tokio::test]
    async fn refresh_merges_only_the_active_counter() {
        let source = Arc::new(FakeSource::new(4));
        let service = DashboardService::new(source.clone());
        service.load().await.unwrap();

        source.active.store(9, Ordering::SeqCst);
        service.refresh_active().await.unwrap();

        let snapshot = service.snapshot().await;
        let summary = snapshot.resumen.unwrap();
        assert_eq!(summary.visitas_activas, 9);
        // Everything else is still the fully-loaded state.
        assert_eq!(summary.visitas_totales, 50000);
        assert_eq!(snapshot.diario.len(), 1);
    }

    #[tokio::test]
    async fn refresh_failure_keeps_previous_state() {
        let source = Arc::new(FakeSource::new(4));
        let service = DashboardService::new(source.clone());
        service.load().await.unwrap();

        let failing = Arc::new(FakeSource {
            active: AtomicI64::new(0),
            fail: true,
        });
        let broken = DashboardService {
            source: failing,
            current: RwLock::new(service.snapshot().await),
        };
        assert!(broken.refresh_active().await.is_err());
        assert_eq!(
            broken.snapshot().await.resumen.unwrap().visitas_activas,
            4
        );
    }

    #[tokio::test]
    async fn refresh_before_any_load_is_a_no_op() {
        let service = DashboardService::new(Arc::new(FakeSource::new(4)));
        service.refresh_active().await.unwrap();
        assert!(service.snapshot().await.resumen.is_none());
    }
}
