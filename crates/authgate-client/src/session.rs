//! Session state machine.
//!
//! State transitions are pure: [`reduce`] maps a state and an event to
//! the next state with no I/O, so every transition is unit-testable
//! without a UI or a server. The async [`crate::SessionClient`] is the
//! only producer of events.

use crate::api::UserProfile;

/// The phase the client session is in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// Startup: restoring a previously persisted token.
    #[default]
    Initializing,
    /// No session; login or register may be submitted.
    Anonymous,
    /// A login or register call is in flight.
    Authenticating,
    /// A token and identity snapshot are held and server-verified.
    Authenticated,
    /// The last submission failed; the error is surfaced. A new
    /// submission may be started from here.
    Error,
}

/// Client-side session state.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    /// Current phase.
    pub phase: SessionPhase,
    /// Current bearer token, if any.
    pub token: Option<String>,
    /// Identity snapshot from the last successful server response.
    pub user: Option<UserProfile>,
    /// Error message from the last failed submission.
    pub error: Option<String>,
}

impl SessionState {
    /// True iff both token and identity snapshot are present and the
    /// last verification against the server succeeded.
    pub fn authenticated(&self) -> bool {
        self.phase == SessionPhase::Authenticated && self.token.is_some() && self.user.is_some()
    }

    /// True while an auth call is in flight; the UI disables duplicate
    /// submission while this holds.
    pub fn loading(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Initializing | SessionPhase::Authenticating
        )
    }
}

/// Events produced by the session client.
#[derive(Clone, Debug)]
pub enum SessionEvent {
    /// Startup restore found a token and the profile fetch succeeded.
    RestoreSucceeded {
        /// The restored token.
        token: String,
        /// The freshly fetched identity snapshot.
        user: UserProfile,
    },
    /// Startup restore found a token the server rejected; the persisted
    /// token has been cleared.
    RestoreFailed,
    /// Startup restore found no persisted token.
    RestoreEmpty,
    /// A login or register submission started.
    SubmitStarted,
    /// The submission succeeded; token and snapshot are persisted.
    LoginSucceeded {
        /// The newly issued token.
        token: String,
        /// The authenticated identity snapshot.
        user: UserProfile,
    },
    /// The submission failed; credentials were discarded.
    LoginFailed {
        /// Error message to surface.
        message: String,
    },
    /// Explicit logout; the persisted token has been cleared.
    LoggedOut,
    /// Some request was rejected with an authorization failure; the
    /// persisted token has been cleared.
    Rejected,
}

/// Applies one event to the session state, returning the next state.
pub fn reduce(state: &SessionState, event: SessionEvent) -> SessionState {
    match event {
        SessionEvent::RestoreSucceeded { token, user } | SessionEvent::LoginSucceeded { token, user } => {
            SessionState {
                phase: SessionPhase::Authenticated,
                token: Some(token),
                user: Some(user),
                error: None,
            }
        }
        SessionEvent::RestoreFailed
        | SessionEvent::RestoreEmpty
        | SessionEvent::LoggedOut
        | SessionEvent::Rejected => SessionState {
            phase: SessionPhase::Anonymous,
            token: None,
            user: None,
            error: None,
        },
        SessionEvent::SubmitStarted => {
            // Duplicate submissions while one is in flight are refused.
            if state.phase == SessionPhase::Authenticating {
                return state.clone();
            }
            SessionState {
                phase: SessionPhase::Authenticating,
                token: None,
                user: None,
                error: None,
            }
        }
        SessionEvent::LoginFailed { message } => SessionState {
            phase: SessionPhase::Error,
            token: None,
            user: None,
            error: Some(message),
        },
    }
}
