//! HTTP interception layer shared by a test session and the CLI under test.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::adapters::mocked::http::ScopeRegistry;
use crate::adapters::recording::http::ExchangeRecorder;
use crate::ports::http::{
    CallDescriptor, HttpFuture, HttpInterception, HttpRequest, HttpTransport, RecordedLine,
};

#[derive(Default)]
struct InterceptState {
    active: bool,
    recorder: ExchangeRecorder,
    registry: ScopeRegistry,
}

/// Routes requests to registered descriptors, the recorder or upstream.
///
/// - Inactive: every request goes upstream.
/// - Active and recording: requests go upstream and the exchange is captured.
/// - Active otherwise: registered descriptors answer; scopes without
///   registrations go upstream.
pub struct Interceptor {
    upstream: Arc<dyn HttpTransport>,
    state: Mutex<InterceptState>,
}

impl Interceptor {
    /// Creates an inactive interceptor in front of `upstream`.
    pub fn new(upstream: Arc<dyn HttpTransport>) -> Self {
        Self { upstream, state: Mutex::new(InterceptState::default()) }
    }

    /// Number of registered descriptors not yet consumed.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.lock().registry.pending()
    }

    fn lock(&self) -> MutexGuard<'_, InterceptState> {
        self.state.lock().expect("interceptor lock poisoned")
    }
}

impl HttpInterception for Interceptor {
    fn activate(&self) {
        self.lock().active = true;
    }

    fn deactivate(&self) {
        let mut state = self.lock();
        state.active = false;
        let discarded = state.registry.clear();
        if discarded > 0 {
            warn!(discarded, "recorded calls were registered but never requested");
        }
    }

    fn is_active(&self) -> bool {
        self.lock().active
    }

    fn start_recording(&self) {
        self.lock().recorder.start();
    }

    fn drain_recorded(&self) -> Vec<RecordedLine> {
        self.lock().recorder.drain()
    }

    fn register_scope(&self, descriptor: CallDescriptor) {
        self.lock().registry.register(descriptor);
    }
}

impl HttpTransport for Interceptor {
    fn send(&self, request: &HttpRequest) -> HttpFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let record = {
                let mut state = self.lock();
                if state.active && !state.recorder.is_recording() {
                    if let Some(response) = state.registry.take_match(&request)? {
                        debug!(method = %request.method, url = %request.url, "served from fixture");
                        return Ok(response);
                    }
                }
                state.active && state.recorder.is_recording()
            };

            let result = self.upstream.send(&request).await;

            if record {
                let mut state = self.lock();
                match &result {
                    Ok(response) => state.recorder.record_exchange(&request, response),
                    Err(e) => state
                        .recorder
                        .note(format!("{} {} failed upstream: {e}", request.method, request.url)),
                }
            }
            result
        })
    }
}
