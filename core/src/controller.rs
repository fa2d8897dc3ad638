//! View state and the controller that drives analysis attempts.
//!
//! # Design
//! `ViewState` holds the three UI slots (input, result, error) and changes
//! only through `ViewState::apply`, a pure function of state and `Event`.
//! `Controller` wraps it with the bookkeeping a host needs: request ids,
//! the set of in-flight requests and the structured cause of the last
//! failure. The controller never performs I/O itself; `request_analysis`
//! hands back a `PendingAnalysis` and the host reports the outcome through
//! `complete`.
//!
//! Overlapping requests are not cancelled. Under
//! `OrderingPolicy::LastResolvedWins` every completion lands, so the state
//! shows whichever response arrived last. `OrderingPolicy::LatestIssuedWins`
//! only lets the most recently issued request write to the state.

use std::collections::BTreeSet;
use std::fmt;

use crate::client::SentimentClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::Sentiment;

/// The only error text ever shown to the user.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while analyzing sentiment. Please try again.";

/// The three UI state slots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub input: String,
    pub result: Option<Sentiment>,
    pub error: Option<String>,
}

/// Inputs to `ViewState::apply`.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The user replaced the input text.
    Edit(String),
    /// An analysis attempt started.
    Submit,
    /// An attempt produced a sentiment.
    Succeeded(Sentiment),
    /// An attempt failed, for whatever reason.
    Failed,
}

impl ViewState {
    pub fn apply(self, event: Event) -> ViewState {
        match event {
            Event::Edit(input) => ViewState { input, ..self },
            Event::Submit => ViewState {
                result: None,
                error: None,
                ..self
            },
            Event::Succeeded(sentiment) => ViewState {
                result: Some(sentiment),
                error: None,
                ..self
            },
            Event::Failed => ViewState {
                result: None,
                error: Some(GENERIC_ERROR_MESSAGE.to_string()),
                ..self
            },
        }
    }

    pub fn is_idle(&self) -> bool {
        self.result.is_none() && self.error.is_none()
    }
}

/// Which completions may write to the state when requests overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderingPolicy {
    /// Every completion is applied; the last one to resolve wins.
    #[default]
    LastResolvedWins,
    /// Only the most recently issued request is applied; older ones are
    /// discarded as stale.
    LatestIssuedWins,
}

/// Identifies one analysis attempt. Ids increase monotonically per
/// controller, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An issued request the host has to execute.
#[derive(Debug, Clone)]
pub struct PendingAnalysis {
    pub id: RequestId,
    pub request: HttpRequest,
}

/// What `Controller::complete` did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer request was issued since; the outcome was dropped.
    Stale,
    /// The id was never issued or was already completed.
    Unknown,
}

/// Owns the view state and turns user actions and network outcomes into
/// state transitions.
#[derive(Debug)]
pub struct Controller {
    client: SentimentClient,
    policy: OrderingPolicy,
    state: ViewState,
    next_id: u64,
    latest: Option<RequestId>,
    in_flight: BTreeSet<RequestId>,
    last_failure: Option<ApiError>,
}

impl Controller {
    pub fn new(client: SentimentClient) -> Self {
        Self::with_policy(client, OrderingPolicy::default())
    }

    pub fn with_policy(client: SentimentClient, policy: OrderingPolicy) -> Self {
        Self {
            client,
            policy,
            state: ViewState::default(),
            next_id: 1,
            latest: None,
            in_flight: BTreeSet::new(),
            last_failure: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn policy(&self) -> OrderingPolicy {
        self.policy
    }

    pub fn client(&self) -> &SentimentClient {
        &self.client
    }

    /// Number of issued requests that have not been completed yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// The cause behind the currently displayed error, if any.
    pub fn last_failure(&self) -> Option<&ApiError> {
        self.last_failure.as_ref()
    }

    pub fn edit(&mut self, text: impl Into<String>) {
        self.transition(Event::Edit(text.into()));
    }

    /// Start an analysis attempt for the current input.
    ///
    /// Clears result and error, then builds the request. The caller must
    /// execute `PendingAnalysis::request` and report back through
    /// `complete`. If the request cannot be built the failure is recorded
    /// in the state straight away and returned.
    pub fn request_analysis(&mut self) -> Result<PendingAnalysis, ApiError> {
        self.transition(Event::Submit);
        self.last_failure = None;

        let request = match self.client.build_analyze(&self.state.input) {
            Ok(request) => request,
            Err(err) => {
                self.fail(None, err.clone());
                return Err(err);
            }
        };

        let id = RequestId(self.next_id);
        self.next_id += 1;
        self.latest = Some(id);
        self.in_flight.insert(id);
        tracing::debug!(request = %id, chars = self.state.input.chars().count(), "analysis submitted");

        Ok(PendingAnalysis { id, request })
    }

    /// Feed the outcome of an executed request back into the state.
    pub fn complete(&mut self, id: RequestId, outcome: Result<HttpResponse, ApiError>) -> Completion {
        if !self.in_flight.remove(&id) {
            tracing::warn!(request = %id, "completion for unknown request");
            return Completion::Unknown;
        }

        if self.policy == OrderingPolicy::LatestIssuedWins && self.latest != Some(id) {
            tracing::debug!(request = %id, latest = ?self.latest.map(RequestId::get), "discarding stale completion");
            return Completion::Stale;
        }

        match outcome.and_then(|response| self.client.parse_analyze(response)) {
            Ok(sentiment) => {
                tracing::info!(request = %id, label = %sentiment.label, score = sentiment.score, "analysis succeeded");
                self.last_failure = None;
                self.transition(Event::Succeeded(sentiment));
            }
            Err(err) => self.fail(Some(id), err),
        }
        Completion::Applied
    }

    fn fail(&mut self, id: Option<RequestId>, err: ApiError) {
        tracing::warn!(request = ?id.map(RequestId::get), kind = ?err.kind(), error = %err, "analysis failed");
        self.last_failure = Some(err);
        self.transition(Event::Failed);
    }

    fn transition(&mut self, event: Event) {
        self.state = std::mem::take(&mut self.state).apply(event);
    }
}
