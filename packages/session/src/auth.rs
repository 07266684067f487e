//! # Session store
//!
//! [`SessionStore`] owns the signed-in identity for the lifetime of the
//! process. It is the only writer of the `auth_user` / `auth_token` record and
//! the only holder of the bearer credential handed to the [`AuthApi`].
//!
//! ## Lifecycle
//!
//! ```text
//! new() ── Session { user: None, is_loading: true, restoring: true, .. }
//!   │
//!   ▼ initialize()          (reads the SessionVault once)
//! Anonymous ◄──────────────► Authenticated(user)
//!            login / signup
//!            ◄── logout ──
//! ```
//!
//! `restoring` is only true before rehydration finishes; it is what the shell
//! and the route guard gate on. `is_loading` additionally covers every
//! operation that awaits the remote API, which marks itself in flight through a
//! [`Busy`] guard. The guard is created before the first `.await` and dropped on
//! every exit path, including a dropped future, so `is_loading` can never stay
//! stuck at `true`.
//!
//! State is published through a [`tokio::sync::watch`] channel; UI bindings
//! [`subscribe`](SessionStore::subscribe) and re-render on change.
//!
//! ## Failure semantics
//!
//! Operations return `Result<(), AuthError>`. Remote and transport failures
//! arrive as [`api::ApiError`] and are converted; storage write failures are
//! logged and never fail the operation, since the in-memory session stays
//! authoritative until the next restart.

use std::cell::{Cell, RefCell};

use api::{AuthApi, AuthError, AuthResponse, AuthUser, Field, LoginRequest, SignupRequest, UserUpdate};
use store::{KeyValueStore, SessionVault};
use tokio::sync::watch;

/// Message returned when a second sign-in starts while one is pending.
pub const SIGN_IN_IN_PROGRESS: &str = "A sign-in request is already in progress";

/// An asynchronous session operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Initializing,
    LoggingIn,
    SigningUp,
    LoggingOut,
    ResettingPassword,
    VerifyingEmail,
    ResendingVerification,
}

impl Operation {
    /// Short label for spinners and buttons.
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Initializing => "Loading…",
            Operation::LoggingIn => "Signing in…",
            Operation::SigningUp => "Creating account…",
            Operation::LoggingOut => "Signing out…",
            Operation::ResettingPassword => "Sending reset link…",
            Operation::VerifyingEmail => "Verifying email…",
            Operation::ResendingVerification => "Sending verification email…",
        }
    }
}

/// Published session state.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub user: Option<AuthUser>,
    /// `true` while any operation is in flight, including startup rehydration.
    pub is_loading: bool,
    /// `true` until the stored session has been read.
    pub restoring: bool,
    /// Most recently started operation still in flight.
    pub activity: Option<Operation>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// A settled anonymous session.
    pub fn anonymous() -> Self {
        Self {
            user: None,
            is_loading: false,
            restoring: false,
            activity: None,
        }
    }

    /// A settled session for `user`.
    pub fn signed_in(user: AuthUser) -> Self {
        Self {
            user: Some(user),
            is_loading: false,
            restoring: false,
            activity: None,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self {
            user: None,
            is_loading: true,
            restoring: true,
            activity: Some(Operation::Initializing),
        }
    }
}

/// Marks one operation as in flight until dropped.
struct Busy<'a> {
    in_flight: &'a RefCell<Vec<Operation>>,
    state: &'a watch::Sender<Session>,
    op: Operation,
}

impl<'a> Busy<'a> {
    fn start(
        in_flight: &'a RefCell<Vec<Operation>>,
        state: &'a watch::Sender<Session>,
        op: Operation,
    ) -> Self {
        in_flight.borrow_mut().push(op);
        publish_activity(in_flight, state);
        Self {
            in_flight,
            state,
            op,
        }
    }
}

impl Drop for Busy<'_> {
    fn drop(&mut self) {
        finish(self.in_flight, self.state, self.op);
    }
}

fn finish(in_flight: &RefCell<Vec<Operation>>, state: &watch::Sender<Session>, op: Operation) {
    {
        let mut ops = in_flight.borrow_mut();
        if let Some(pos) = ops.iter().rposition(|o| *o == op) {
            ops.remove(pos);
        }
    }
    publish_activity(in_flight, state);
}

fn publish_activity(in_flight: &RefCell<Vec<Operation>>, state: &watch::Sender<Session>) {
    let ops = in_flight.borrow();
    state.send_if_modified(|session| {
        let is_loading = !ops.is_empty();
        let restoring = ops.contains(&Operation::Initializing);
        let activity = ops.last().copied();
        let changed = session.is_loading != is_loading
            || session.restoring != restoring
            || session.activity != activity;
        session.is_loading = is_loading;
        session.restoring = restoring;
        session.activity = activity;
        changed
    });
}

/// Exclusive claim on the sign-in slot shared by login and signup.
struct SignInClaim<'a>(&'a Cell<bool>);

impl Drop for SignInClaim<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Process-wide owner of the authentication state.
pub struct SessionStore<A: AuthApi, S: KeyValueStore> {
    api: A,
    vault: SessionVault<S>,
    state: watch::Sender<Session>,
    in_flight: RefCell<Vec<Operation>>,
    signing_in: Cell<bool>,
    initialized: Cell<bool>,
    token: RefCell<Option<String>>,
    /// Last verification token settled by the server and its outcome.
    verification: RefCell<Option<(String, Result<(), AuthError>)>>,
}

impl<A: AuthApi, S: KeyValueStore> SessionStore<A, S> {
    pub fn new(api: A, storage: S) -> Self {
        let (state, _) = watch::channel(Session::default());
        Self {
            api,
            vault: SessionVault::new(storage),
            state,
            in_flight: RefCell::new(vec![Operation::Initializing]),
            signing_in: Cell::new(false),
            initialized: Cell::new(false),
            token: RefCell::new(None),
            verification: RefCell::new(None),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Current state.
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.state.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Rehydrate from durable storage. Runs once; later calls are no-ops.
    pub fn initialize(&self) {
        if self.initialized.replace(true) {
            return;
        }

        match self.vault.load() {
            Some(record) => {
                tracing::info!("Restored session for {}", record.user.email);
                self.api.set_bearer(Some(record.token.clone()));
                *self.token.borrow_mut() = Some(record.token);
                self.state.send_modify(|session| session.user = Some(record.user));
            }
            None => tracing::debug!("No stored session"),
        }

        finish(&self.in_flight, &self.state, Operation::Initializing);
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::general("Please enter your email and password"));
        }

        let _claim = self.claim_sign_in()?;
        let _busy = self.begin(Operation::LoggingIn);

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.api.login(&request).await.map_err(|e| {
            tracing::warn!("Login failed for {email}: {e}");
            AuthError::from(e)
        })?;

        self.establish(response);
        Ok(())
    }

    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<(), AuthError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AuthError::general("Please fill in all fields"));
        }
        if password != confirm_password {
            return Err(AuthError::on(Field::ConfirmPassword, "Passwords do not match"));
        }

        let _claim = self.claim_sign_in()?;
        let _busy = self.begin(Operation::SigningUp);

        let request = SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.api.signup(&request).await.map_err(|e| {
            tracing::warn!("Signup failed for {email}: {e}");
            AuthError::from(e)
        })?;

        self.establish(response);
        Ok(())
    }

    /// Sign out locally, then ask the server to invalidate the credential.
    ///
    /// The local session is gone before the first `.await`; the remote outcome
    /// is only logged. A second call finds no credential and makes no request.
    pub async fn logout(&self) {
        let token = self.token.borrow_mut().take();
        self.api.set_bearer(None);
        self.verification.borrow_mut().take();
        if let Err(e) = self.vault.clear() {
            tracing::warn!("Failed to clear stored session: {e}");
        }
        self.state.send_if_modified(|session| session.user.take().is_some());

        let Some(token) = token else {
            return;
        };
        tracing::info!("Signed out");

        let _busy = self.begin(Operation::LoggingOut);
        if let Err(e) = self.api.logout(token).await {
            tracing::warn!("Remote logout failed: {e}");
        }
    }

    pub async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AuthError::on(Field::Email, "Please enter your email address"));
        }

        let _busy = self.begin(Operation::ResettingPassword);
        self.api.reset_password(email).await.map_err(|e| {
            tracing::warn!("Password reset request failed: {e}");
            AuthError::from(e)
        })
    }

    /// Exchange an email verification token.
    ///
    /// Once the server has answered for a token, that answer is reused. Transport
    /// failures and server errors are not remembered, so the link can be retried.
    pub async fn verify_email(&self, token: &str) -> Result<(), AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::on(Field::Token, "Verification link is missing its token"));
        }
        if let Some((seen, outcome)) = self.verification.borrow().as_ref() {
            if seen == token {
                return outcome.clone();
            }
        }

        let _busy = self.begin(Operation::VerifyingEmail);
        let outcome = match self.api.verify_email(token).await {
            Ok(()) => {
                tracing::info!("Email verified");
                self.update_user(UserUpdate::default().email_verified(true));
                Ok(())
            }
            Err(e) if e.is_network() || e.status >= 500 => {
                tracing::warn!("Email verification unavailable: {e}");
                return Err(e.into());
            }
            Err(e) => {
                tracing::warn!("Email verification failed: {e}");
                Err(AuthError::from(e))
            }
        };
        *self.verification.borrow_mut() = Some((token.to_string(), outcome.clone()));
        outcome
    }

    /// Send another verification email to the signed-in user.
    pub async fn resend_verification(&self) -> Result<(), AuthError> {
        let Some(email) = self.user().map(|user| user.email) else {
            return Err(AuthError::general(
                "Sign in to resend the verification email",
            ));
        };

        let _busy = self.begin(Operation::ResendingVerification);
        self.api.resend_verification(&email).await.map_err(|e| {
            tracing::warn!("Resending verification failed: {e}");
            AuthError::from(e)
        })
    }

    /// Merge `update` into the signed-in user and persist. No-op when signed out.
    pub fn update_user(&self, update: UserUpdate) {
        let changed = self.state.send_if_modified(|session| match session.user.as_mut() {
            Some(user) => {
                let before = user.clone();
                update.apply(user);
                *user != before
            }
            None => false,
        });
        if changed {
            self.persist();
        }
    }

    fn begin(&self, op: Operation) -> Busy<'_> {
        Busy::start(&self.in_flight, &self.state, op)
    }

    fn claim_sign_in(&self) -> Result<SignInClaim<'_>, AuthError> {
        if self.signing_in.replace(true) {
            tracing::debug!("Rejected overlapping sign-in request");
            return Err(AuthError::general(SIGN_IN_IN_PROGRESS));
        }
        Ok(SignInClaim(&self.signing_in))
    }

    fn establish(&self, response: AuthResponse) {
        let AuthResponse { user, token } = response;
        tracing::info!("Signed in as {}", user.email);

        if let Err(e) = self.vault.save(&user, &token) {
            tracing::warn!("Failed to persist session: {e}");
        }
        self.api.set_bearer(Some(token.clone()));
        *self.token.borrow_mut() = Some(token);
        self.verification.borrow_mut().take();
        self.state.send_modify(|session| session.user = Some(user));
    }

    fn persist(&self) {
        let token = self.token.borrow();
        let Some(token) = token.as_deref() else {
            return;
        };
        let state = self.state.borrow();
        let Some(user) = state.user.as_ref() else {
            return;
        };
        if let Err(e) = self.vault.save(user, token) {
            tracing::warn!("Failed to persist session: {e}");
        }
    }
}
