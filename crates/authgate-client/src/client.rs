//! Async session client driving the state machine.

use tracing::{debug, warn};

use crate::api::{ApiClient, ClientError, UserProfile};
use crate::session::{SessionEvent, SessionState, reduce};
use crate::store::TokenStore;

/// Holds the current session, persists the token across runs, and keeps
/// the state machine in sync with server responses.
///
/// One interactive actor drives this; overlapping calls are refused
/// while an auth call is in flight, and any 401 clears the session.
pub struct SessionClient {
    api: ApiClient,
    store: Box<dyn TokenStore>,
    state: SessionState,
}

impl SessionClient {
    /// Creates a client in the `Initializing` phase. Call
    /// [`SessionClient::initialize`] before anything else.
    pub fn new(api: ApiClient, store: Box<dyn TokenStore>) -> Self {
        Self {
            api,
            store,
            state: SessionState::default(),
        }
    }

    /// Current session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Restores a previously persisted token and re-validates it against
    /// the server.
    ///
    /// A rejected or unusable token is cleared so startup never loops on
    /// a dead session; the client lands in `Anonymous`.
    pub async fn initialize(&mut self) -> Result<(), ClientError> {
        let token = match self.store.load()? {
            Some(token) => token,
            None => {
                self.apply(SessionEvent::RestoreEmpty);
                return Ok(());
            }
        };

        match self.api.profile(&token).await {
            Ok(user) => {
                self.apply(SessionEvent::RestoreSucceeded { token, user });
                Ok(())
            }
            Err(e) => {
                debug!(error = %e, "Persisted token rejected, clearing");
                self.store.clear()?;
                self.apply(SessionEvent::RestoreFailed);
                Ok(())
            }
        }
    }

    /// Submits a login. On success the token is persisted and the
    /// session becomes `Authenticated`; on failure the error is surfaced
    /// and the credentials are discarded.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ClientError> {
        if self.state.loading() {
            return Err(ClientError::InFlight);
        }
        self.apply(SessionEvent::SubmitStarted);

        match self.api.login(email, password).await {
            Ok((token, user)) => self.complete_login(token, user),
            Err(e) => {
                self.apply(SessionEvent::LoginFailed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Registers a new identity and logs in with the same credentials.
    ///
    /// The register response carries no token, so a successful
    /// registration is immediately followed by a login call.
    pub async fn register(
        &mut self,
        email: &str,
        first_name: &str,
        last_name: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        if self.state.loading() {
            return Err(ClientError::InFlight);
        }
        self.apply(SessionEvent::SubmitStarted);

        if let Err(e) = self.api.register(email, first_name, last_name, password).await {
            self.apply(SessionEvent::LoginFailed {
                message: e.to_string(),
            });
            return Err(e);
        }

        match self.api.login(email, password).await {
            Ok((token, user)) => self.complete_login(token, user),
            Err(e) => {
                self.apply(SessionEvent::LoginFailed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Fetches the current profile with the held token.
    ///
    /// A 401 from the server clears the session (global interception).
    pub async fn profile(&mut self) -> Result<UserProfile, ClientError> {
        let token = self.state.token.clone().ok_or(ClientError::Api {
            status: 401,
            message: "No session".to_string(),
        })?;

        match self.api.profile(&token).await {
            Ok(user) => Ok(user),
            Err(e) => {
                self.intercept(&e)?;
                Err(e)
            }
        }
    }

    /// Logs out: best-effort server call, then clears the persisted
    /// token and the in-memory session.
    ///
    /// Logout converges on the same cleared state as a 401 interception,
    /// so racing the two is safe.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        if let Err(e) = self.api.logout().await {
            warn!(error = %e, "Server logout failed, clearing session anyway");
        }
        self.store.clear()?;
        self.apply(SessionEvent::LoggedOut);
        Ok(())
    }

    fn complete_login(&mut self, token: String, user: UserProfile) -> Result<(), ClientError> {
        self.store.save(&token)?;
        self.apply(SessionEvent::LoginSucceeded { token, user });
        Ok(())
    }

    /// Clears the session when any request reports an authorization
    /// failure.
    fn intercept(&mut self, error: &ClientError) -> Result<(), ClientError> {
        if error.is_unauthorized() {
            self.store.clear()?;
            self.apply(SessionEvent::Rejected);
        }
        Ok(())
    }

    fn apply(&mut self, event: SessionEvent) {
        self.state = reduce(&self.state, event);
    }
}
