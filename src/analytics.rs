// Analytics Event Log
//
// Append-only, in-process record of funnel events. Constructed explicitly by
// the composition root and shared through Arc; there is no global instance.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;
use uuid::Uuid;

use crate::clock::Clock;
use crate::forwarder::EventForwarder;
use crate::metrics::AppMetrics;
use crate::models::{AnalyticsEventKind, AnalyticsEventRecord, NewEvent};

pub struct AnalyticsLog {
    records: RwLock<Vec<AnalyticsEventRecord>>,
    clock: Arc<dyn Clock>,
    forwarder: Arc<dyn EventForwarder>,
    metrics: Arc<AppMetrics>,
}

impl AnalyticsLog {
    pub fn new(clock: Arc<dyn Clock>, forwarder: Arc<dyn EventForwarder>, metrics: Arc<AppMetrics>) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            clock,
            forwarder,
            metrics,
        }
    }

    /// Append an event, stamping it with the current time when the host did
    /// not. Never fails; forwarding happens off the caller's path.
    pub fn log(&self, event: NewEvent) -> AnalyticsEventRecord {
        let record = AnalyticsEventRecord {
            id: Uuid::new_v4(),
            kind: event.kind,
            contest_id: event.contest_id,
            user_id: event.user_id,
            timestamp: event.timestamp.unwrap_or_else(|| self.clock.now()),
            metadata: event.metadata,
        };

        self.write().push(record.clone());
        self.metrics.record_event_logged(record.kind);
        debug!(
            "Logged {} for user {} in contest {}",
            record.kind, record.user_id, record.contest_id
        );

        self.forwarder.forward(&record);
        record
    }

    pub fn log_event(&self, kind: AnalyticsEventKind, contest_id: &str, user_id: &str) -> AnalyticsEventRecord {
        self.log(NewEvent::new(kind, contest_id, user_id))
    }

    /// Snapshot of the full history in append order
    pub fn events(&self) -> Vec<AnalyticsEventRecord> {
        self.read().clone()
    }

    pub fn events_for_contest(&self, contest_id: &str) -> Vec<AnalyticsEventRecord> {
        self.read()
            .iter()
            .filter(|record| record.contest_id == contest_id)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Drop every record. Reset and test isolation only.
    pub fn clear(&self) {
        self.write().clear();
    }

    // A panic while holding the lock cannot leave a half-pushed record, so
    // poisoned guards are still consistent.
    fn read(&self) -> RwLockReadGuard<'_, Vec<AnalyticsEventRecord>> {
        self.records.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<AnalyticsEventRecord>> {
        self.records.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::forwarder::NoopForwarder;
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingForwarder {
        seen: Mutex<Vec<Uuid>>,
    }

    impl EventForwarder for RecordingForwarder {
        fn forward(&self, record: &AnalyticsEventRecord) {
            self.seen.lock().unwrap().push(record.id);
        }
    }

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 5, 1, 9, 30, 0).unwrap()))
    }

    fn log_with(forwarder: Arc<dyn EventForwarder>) -> AnalyticsLog {
        AnalyticsLog::new(clock(), forwarder, Arc::new(AppMetrics::new().unwrap()))
    }

    #[test]
    fn test_append_order_and_stamping() {
        let log = log_with(Arc::new(NoopForwarder));
        let earlier = clock().0 - Duration::minutes(5);

        log.log_event(AnalyticsEventKind::Viewed, "c1", "u1");
        log.log(NewEvent::new(AnalyticsEventKind::ActionPerformed, "c1", "u1").at(earlier));
        log.log_event(AnalyticsEventKind::BoostShown, "c2", "u2");

        let events = log.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].kind, AnalyticsEventKind::Viewed);
        assert_eq!(events[0].timestamp, clock().0);
        assert_eq!(events[1].timestamp, earlier);
        assert_eq!(events[2].contest_id, "c2");
        assert_eq!(log.events_for_contest("c1").len(), 2);
    }

    #[test]
    fn test_clear_empties_log() {
        let log = log_with(Arc::new(NoopForwarder));
        log.log_event(AnalyticsEventKind::Finished, "c1", "u1");
        assert!(!log.is_empty());

        log.clear();
        assert!(log.events().is_empty());
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn test_every_record_is_forwarded() {
        let forwarder = Arc::new(RecordingForwarder::default());
        let log = log_with(forwarder.clone());

        let a = log.log_event(AnalyticsEventKind::BoostClicked, "c1", "u1");
        let b = log.log_event(AnalyticsEventKind::BoostPurchased, "c1", "u1");

        assert_eq!(*forwarder.seen.lock().unwrap(), vec![a.id, b.id]);
    }

    #[test]
    fn test_concurrent_appends() {
        let log = Arc::new(log_with(Arc::new(NoopForwarder)));
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let log = log.clone();
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        log.log_event(AnalyticsEventKind::ActionPerformed, "c1", &format!("u{}", worker));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(log.len(), 400);
    }
}
