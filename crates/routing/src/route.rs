use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local};
use log::{debug, warn};
use model::Coordinate;
use schemars::JsonSchema;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::{RequestResult, RouteService};

/// Snapshot of the route overlay. `points` is either empty or a continuous
/// path of at least two coordinates; a failed or empty fetch leaves the
/// previous path in place rather than clearing it.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteState {
    pub points: Vec<Coordinate>,
    pub is_loading: bool,
    pub fetched_at: Option<DateTime<Local>>,
}

/// How a call to [`RouteTracker::fetch_route`] settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The path was replaced with freshly fetched geometry.
    Updated,
    /// The service found no candidate route; the previous path is kept.
    NoRoute,
    /// A newer fetch was issued while this one was in flight; the result
    /// was dropped.
    Stale,
}

/// Owner of the [`RouteState`], delegating to a [`RouteService`] and
/// guarding against overlapping fetches.
pub struct RouteTracker<S>
where
    S: RouteService + Send + Sync,
{
    service: S,
    state: RwLock<RouteState>,
    issued: AtomicU64,
}

impl<S> RouteTracker<S>
where
    S: RouteService + Send + Sync,
{
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: RwLock::new(RouteState::default()),
            issued: AtomicU64::new(0),
        }
    }

    pub async fn state(&self) -> RouteState {
        self.state.read().await.clone()
    }

    /// Fetches a driving route and replaces the current path on success.
    ///
    /// Every call is stamped with a monotonically increasing sequence
    /// number and only the latest issued fetch may write the path or clear
    /// the loading flag: a result arriving after a newer fetch was issued
    /// is dropped as [`FetchOutcome::Stale`]. The loading flag is raised
    /// before the request goes out, but only while the call is still the
    /// latest issued, and cleared by whichever call holds the latest
    /// sequence number when it settles, so it cannot leak.
    ///
    /// Service failures are logged and returned; the previous path stays
    /// untouched in every non-`Updated` outcome.
    pub async fn fetch_route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> RequestResult<FetchOutcome> {
        let sequence = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        {
            // re-checked under the lock: a call superseded between stamping
            // and raising the flag must not raise it, or a newer call that
            // already settled would leave it set forever
            let mut state = self.state.write().await;
            if sequence != self.issued.load(Ordering::SeqCst) {
                debug!("dropping superseded route fetch (sequence {sequence})");
                return Ok(FetchOutcome::Stale);
            }
            state.is_loading = true;
        }

        let result = self.service.driving_route(origin, destination).await;

        let mut state = self.state.write().await;
        let is_latest = sequence == self.issued.load(Ordering::SeqCst);
        if is_latest {
            state.is_loading = false;
        }
        if !is_latest {
            debug!("dropping stale route result (sequence {sequence})");
            return Ok(FetchOutcome::Stale);
        }

        match result {
            Ok(Some(leg)) if leg.points.len() >= 2 => {
                state.points = leg.points;
                state.fetched_at = Some(Local::now());
                Ok(FetchOutcome::Updated)
            }
            Ok(Some(leg)) => {
                // a degenerate geometry must not replace a valid path
                warn!(
                    "ignoring route geometry with {} point(s)",
                    leg.points.len()
                );
                Ok(FetchOutcome::NoRoute)
            }
            Ok(None) => {
                debug!(
                    "no route between ({}, {}) and ({}, {})",
                    origin.latitude,
                    origin.longitude,
                    destination.latitude,
                    destination.longitude
                );
                Ok(FetchOutcome::NoRoute)
            }
            Err(why) => {
                warn!("route fetch failed: {why}");
                Err(why)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::{oneshot, Mutex};
    use tokio::task;

    use super::*;
    use crate::RouteLeg;

    type Reply = RequestResult<Option<RouteLeg>>;

    /// Service whose replies are fed through oneshot channels, one per
    /// expected request, in call order.
    struct StubService {
        replies: Mutex<VecDeque<oneshot::Receiver<Reply>>>,
    }

    fn stub(expected_requests: usize) -> (StubService, Vec<oneshot::Sender<Reply>>) {
        let mut senders = Vec::new();
        let mut receivers = VecDeque::new();
        for _ in 0..expected_requests {
            let (sender, receiver) = oneshot::channel();
            senders.push(sender);
            receivers.push_back(receiver);
        }
        let service = StubService {
            replies: Mutex::new(receivers),
        };
        (service, senders)
    }

    #[async_trait]
    impl RouteService for StubService {
        async fn driving_route(
            &self,
            _origin: &Coordinate,
            _destination: &Coordinate,
        ) -> Reply {
            let receiver = self
                .replies
                .lock()
                .await
                .pop_front()
                .expect("unexpected request");
            receiver.await.expect("stub reply dropped")
        }
    }

    fn leg(points: &[(f64, f64)]) -> RouteLeg {
        RouteLeg {
            points: points
                .iter()
                .map(|&(latitude, longitude)| {
                    Coordinate::new(latitude, longitude)
                })
                .collect(),
            distance_m: None,
            duration_s: None,
        }
    }

    fn origin() -> Coordinate {
        Coordinate::new(-21.5683, -45.4342)
    }

    fn destination() -> Coordinate {
        Coordinate::new(-21.5394, -45.4369)
    }

    #[tokio::test]
    async fn successful_fetch_replaces_the_path() {
        let (service, mut senders) = stub(1);
        let tracker = RouteTracker::new(service);
        senders
            .remove(0)
            .send(Ok(Some(leg(&[(38.5, -120.2), (40.7, -120.95)]))))
            .unwrap();

        let outcome = tracker
            .fetch_route(&origin(), &destination())
            .await
            .unwrap();

        assert_eq!(outcome, FetchOutcome::Updated);
        let state = tracker.state().await;
        assert_eq!(state.points.len(), 2);
        assert!(state.fetched_at.is_some());
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn empty_result_keeps_the_previous_path() {
        let (service, mut senders) = stub(2);
        let tracker = RouteTracker::new(service);
        senders
            .remove(0)
            .send(Ok(Some(leg(&[(38.5, -120.2), (40.7, -120.95)]))))
            .unwrap();
        senders.remove(0).send(Ok(None)).unwrap();

        tracker
            .fetch_route(&origin(), &destination())
            .await
            .unwrap();
        let outcome = tracker
            .fetch_route(&origin(), &destination())
            .await
            .unwrap();

        assert_eq!(outcome, FetchOutcome::NoRoute);
        let state = tracker.state().await;
        assert_eq!(state.points.len(), 2);
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn failure_keeps_the_path_and_clears_loading() {
        let (service, mut senders) = stub(2);
        let tracker = RouteTracker::new(service);
        senders
            .remove(0)
            .send(Ok(Some(leg(&[(38.5, -120.2), (40.7, -120.95)]))))
            .unwrap();
        senders.remove(0).send(Err("connection reset".into())).unwrap();

        tracker
            .fetch_route(&origin(), &destination())
            .await
            .unwrap();
        let result = tracker.fetch_route(&origin(), &destination()).await;

        assert!(result.is_err());
        let state = tracker.state().await;
        assert_eq!(state.points.len(), 2);
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn degenerate_geometry_does_not_replace_the_path() {
        let (service, mut senders) = stub(2);
        let tracker = RouteTracker::new(service);
        senders
            .remove(0)
            .send(Ok(Some(leg(&[(38.5, -120.2), (40.7, -120.95)]))))
            .unwrap();
        senders
            .remove(0)
            .send(Ok(Some(leg(&[(1.0, 1.0)]))))
            .unwrap();

        tracker
            .fetch_route(&origin(), &destination())
            .await
            .unwrap();
        let outcome = tracker
            .fetch_route(&origin(), &destination())
            .await
            .unwrap();

        assert_eq!(outcome, FetchOutcome::NoRoute);
        assert_eq!(tracker.state().await.points.len(), 2);
    }

    #[tokio::test]
    async fn loading_flag_is_visible_while_a_request_is_in_flight() {
        let (service, mut senders) = stub(1);
        let tracker = Arc::new(RouteTracker::new(service));

        let handle = {
            let tracker = tracker.clone();
            task::spawn(async move {
                tracker.fetch_route(&origin(), &destination()).await
            })
        };
        task::yield_now().await;

        assert!(tracker.state().await.is_loading);

        senders
            .remove(0)
            .send(Ok(Some(leg(&[(38.5, -120.2), (40.7, -120.95)]))))
            .unwrap();
        handle.await.unwrap().unwrap();

        assert!(!tracker.state().await.is_loading);
    }

    #[tokio::test]
    async fn latest_issued_fetch_wins_over_an_earlier_one() {
        let (service, mut senders) = stub(2);
        let tracker = Arc::new(RouteTracker::new(service));

        let first = {
            let tracker = tracker.clone();
            task::spawn(async move {
                tracker.fetch_route(&origin(), &destination()).await
            })
        };
        task::yield_now().await;
        let second = {
            let tracker = tracker.clone();
            task::spawn(async move {
                tracker.fetch_route(&origin(), &destination()).await
            })
        };
        task::yield_now().await;

        // the second request resolves before the first
        let first_reply = senders.remove(0);
        senders
            .remove(0)
            .send(Ok(Some(leg(&[(40.7, -120.95), (43.252, -126.453)]))))
            .unwrap();
        let second_outcome = second.await.unwrap().unwrap();
        first_reply
            .send(Ok(Some(leg(&[(38.5, -120.2), (40.7, -120.95)]))))
            .unwrap();
        let first_outcome = first.await.unwrap().unwrap();

        assert_eq!(second_outcome, FetchOutcome::Updated);
        assert_eq!(first_outcome, FetchOutcome::Stale);
        let state = tracker.state().await;
        assert!(!state.is_loading);
        assert_eq!(state.points[0].latitude, 40.7);
    }

    #[tokio::test]
    async fn superseded_call_settling_last_does_not_leave_loading_set() {
        let (service, mut senders) = stub(2);
        let tracker = Arc::new(RouteTracker::new(service));

        let first = {
            let tracker = tracker.clone();
            task::spawn(async move {
                tracker.fetch_route(&origin(), &destination()).await
            })
        };
        task::yield_now().await;
        let second = {
            let tracker = tracker.clone();
            task::spawn(async move {
                tracker.fetch_route(&origin(), &destination()).await
            })
        };
        task::yield_now().await;

        // the newer call settles while the superseded one is still in
        // flight; the busy flag must already be down and must stay down
        // once the old call finally settles
        let first_reply = senders.remove(0);
        senders
            .remove(0)
            .send(Ok(Some(leg(&[(40.7, -120.95), (43.252, -126.453)]))))
            .unwrap();
        assert_eq!(second.await.unwrap().unwrap(), FetchOutcome::Updated);
        assert!(!tracker.state().await.is_loading);

        first_reply
            .send(Ok(Some(leg(&[(38.5, -120.2), (40.7, -120.95)]))))
            .unwrap();
        assert_eq!(first.await.unwrap().unwrap(), FetchOutcome::Stale);
        assert!(!tracker.state().await.is_loading);
    }
}
