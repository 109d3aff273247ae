use log::{debug, info, warn};
use tokio::sync::mpsc;

use crate::actions::Request;
use crate::api::{PlaylistResult, Query};
use crate::error::{ErrorKind, PlaylistError};

/// Where the latest submission stands. The renderer reads nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(PlaylistResult),
    Failure(ErrorKind, String),
}

impl RequestState {
    fn from_error(err: &PlaylistError) -> Self {
        RequestState::Failure(err.kind(), err.to_string())
    }
}

/// Drives one playlist request at a time. Every submit bumps the generation;
/// a response is applied only if it carries the current one.
pub struct RequestController {
    state: RequestState,
    generation: u64,
    req_tx: mpsc::Sender<Request>,
}

impl RequestController {
    pub fn new(req_tx: mpsc::Sender<Request>) -> Self {
        Self { state: RequestState::Idle, generation: 0, req_tx }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RequestState::Loading)
    }

    pub fn submit(&mut self, query: Query) {
        // A rejected submit still supersedes whatever is in flight
        self.generation += 1;
        let generation = self.generation;

        if !query.is_complete() {
            debug!("Rejecting submission #{}: missing city or mood", generation);
            self.state = RequestState::from_error(&PlaylistError::Validation);
            return;
        }

        info!("Submitting #{} city={:?} mood={:?}", generation, query.city, query.mood);
        self.state = RequestState::Loading;

        if let Err(e) = self.req_tx.try_send(Request::GeneratePlaylist { generation, query }) {
            // sending failed; don't leave the UI in loading state
            warn!("Could not queue submission #{}: {}", generation, e);
            self.state = RequestState::from_error(&PlaylistError::Transport(
                "request queue is unavailable".to_string(),
            ));
        }
    }

    /// Apply a worker response. Returns false when it belonged to a superseded submit.
    pub fn apply(&mut self, generation: u64, result: Result<PlaylistResult, PlaylistError>) -> bool {
        if generation != self.generation {
            debug!(
                "Dropping stale response #{} (current #{})",
                generation, self.generation
            );
            return false;
        }

        self.state = match result {
            Ok(playlist) => {
                info!("Submission #{} resolved: {}", generation, playlist.embed_url);
                RequestState::Success(playlist)
            }
            Err(e) => {
                warn!("Submission #{} failed: {}", generation, e);
                RequestState::from_error(&e)
            }
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> (RequestController, mpsc::Receiver<Request>) {
        let (tx, rx) = mpsc::channel(8);
        (RequestController::new(tx), rx)
    }

    fn playlist(id: &str) -> PlaylistResult {
        PlaylistResult {
            embed_url: format!("https://open.spotify.com/embed/{}", id),
            weather_category: Some("rain".to_string()),
            emotion_category: Some("melancholic".to_string()),
            playlist_url: None,
        }
    }

    fn dispatched_generation(rx: &mut mpsc::Receiver<Request>) -> u64 {
        match rx.try_recv().expect("a request should have been queued") {
            Request::GeneratePlaylist { generation, .. } => generation,
        }
    }

    #[test]
    fn test_starts_idle() {
        let (ctrl, _rx) = controller();
        assert_eq!(ctrl.state(), &RequestState::Idle);
        assert_eq!(ctrl.generation(), 0);
    }

    #[test]
    fn test_blank_field_is_rejected_without_request() {
        let (mut ctrl, mut rx) = controller();
        ctrl.submit(Query::new("", "sad"));

        assert_eq!(
            ctrl.state(),
            &RequestState::Failure(ErrorKind::Validation, "city and mood are required".to_string())
        );
        assert!(rx.try_recv().is_err());

        ctrl.submit(Query::new("Lisbon", " \t"));
        assert!(matches!(ctrl.state(), RequestState::Failure(ErrorKind::Validation, _)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_submit_queues_raw_query_and_loads() {
        let (mut ctrl, mut rx) = controller();
        ctrl.submit(Query::new(" Lisbon", "calm "));

        assert!(ctrl.is_loading());
        assert_eq!(
            rx.try_recv().unwrap(),
            Request::GeneratePlaylist { generation: 1, query: Query::new(" Lisbon", "calm ") }
        );
    }

    #[test]
    fn test_success_round_trip() {
        let (mut ctrl, mut rx) = controller();
        ctrl.submit(Query::new("London", "gloomy"));
        let generation = dispatched_generation(&mut rx);

        assert!(ctrl.apply(generation, Ok(playlist("abc"))));
        match ctrl.state() {
            RequestState::Success(result) => {
                assert_eq!(result.embed_url, "https://open.spotify.com/embed/abc");
                assert_eq!(result.weather_category.as_deref(), Some("rain"));
                assert_eq!(result.emotion_category.as_deref(), Some("melancholic"));
            }
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn test_late_response_from_older_submit_is_dropped() {
        let (mut ctrl, mut rx) = controller();
        ctrl.submit(Query::new("Paris", "happy"));
        let first = dispatched_generation(&mut rx);
        ctrl.submit(Query::new("Berlin", "tired"));
        let second = dispatched_generation(&mut rx);

        assert!(ctrl.apply(second, Ok(playlist("berlin"))));
        assert!(!ctrl.apply(first, Ok(playlist("paris"))));

        assert_eq!(ctrl.state(), &RequestState::Success(playlist("berlin")));
    }

    #[test]
    fn test_older_response_arriving_first_is_dropped() {
        let (mut ctrl, mut rx) = controller();
        ctrl.submit(Query::new("Paris", "happy"));
        let first = dispatched_generation(&mut rx);
        ctrl.submit(Query::new("Berlin", "tired"));
        let second = dispatched_generation(&mut rx);

        assert!(!ctrl.apply(first, Ok(playlist("paris"))));
        assert!(ctrl.is_loading());

        let failure = PlaylistError::Service { status: "502 Bad Gateway".to_string() };
        assert!(ctrl.apply(second, Err(failure)));
        assert!(matches!(ctrl.state(), RequestState::Failure(ErrorKind::Service, _)));
    }

    #[test]
    fn test_rejected_submit_supersedes_in_flight_request() {
        let (mut ctrl, mut rx) = controller();
        ctrl.submit(Query::new("Paris", "happy"));
        let first = dispatched_generation(&mut rx);
        ctrl.submit(Query::new("Paris", ""));

        assert!(!ctrl.apply(first, Ok(playlist("paris"))));
        assert!(matches!(ctrl.state(), RequestState::Failure(ErrorKind::Validation, _)));
    }

    #[test]
    fn test_transport_failure_replaces_success() {
        let (mut ctrl, mut rx) = controller();
        ctrl.submit(Query::new("Rome", "joy"));
        let first = dispatched_generation(&mut rx);
        ctrl.apply(first, Ok(playlist("rome")));

        ctrl.submit(Query::new("Rome", "anger"));
        assert!(ctrl.is_loading());
        let second = dispatched_generation(&mut rx);
        ctrl.apply(second, Err(PlaylistError::Transport("connection refused".to_string())));

        assert_eq!(
            ctrl.state(),
            &RequestState::Failure(
                ErrorKind::Transport,
                "could not reach the playlist service: connection refused".to_string()
            )
        );
    }

    #[test]
    fn test_usable_after_failure() {
        let (mut ctrl, mut rx) = controller();
        ctrl.submit(Query::new("Oslo", "calm"));
        let first = dispatched_generation(&mut rx);
        ctrl.apply(first, Err(PlaylistError::Parse("expected value".to_string())));

        ctrl.submit(Query::new("Oslo", "calm"));
        let second = dispatched_generation(&mut rx);
        assert_eq!(second, first + 1);
        assert!(ctrl.apply(second, Ok(playlist("oslo"))));
        assert!(matches!(ctrl.state(), RequestState::Success(_)));
    }

    #[test]
    fn test_closed_queue_fails_instead_of_loading_forever() {
        let (mut ctrl, rx) = controller();
        drop(rx);
        ctrl.submit(Query::new("Oslo", "calm"));

        assert!(matches!(ctrl.state(), RequestState::Failure(ErrorKind::Transport, _)));
    }
}
