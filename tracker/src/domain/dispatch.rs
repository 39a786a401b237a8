//! Callback-driven surface over [`LocationTracker`].
//!
//! Exchanges are spawned on a tokio runtime; the caller gets the task handle
//! back immediately and the outcome arrives through a [`Callback`].

use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::error;

use super::callback::Callback;
use super::exchange::{ExchangeError, Operation};
use super::location::Location;
use super::ports::Transport;
use super::tracker_service::{Exchange, LocationTracker};
use super::user::User;
use super::validation::ValidationError;

/// Runs tracker operations in the background and reports through callbacks.
///
/// Validation still happens on the calling thread: an invalid input returns
/// `Err` and nothing is spawned.
pub struct CallbackTracker<T> {
    tracker: LocationTracker<T>,
    runtime: Handle,
}

impl<T> Clone for CallbackTracker<T> {
    fn clone(&self) -> Self {
        Self {
            tracker: self.tracker.clone(),
            runtime: self.runtime.clone(),
        }
    }
}

impl<T> CallbackTracker<T>
where
    T: Transport + 'static,
{
    /// Pair a tracker with the runtime its exchanges run on.
    #[must_use]
    pub const fn new(tracker: LocationTracker<T>, runtime: Handle) -> Self {
        Self { tracker, runtime }
    }

    /// Underlying future-returning tracker.
    #[must_use]
    pub const fn tracker(&self) -> &LocationTracker<T> {
        &self.tracker
    }

    /// Callback form of [`LocationTracker::create_user`].
    ///
    /// # Errors
    ///
    /// Returns the synchronous [`ValidationError`] without spawning.
    pub fn create_user<C>(
        &self,
        username: &str,
        callback: C,
    ) -> Result<JoinHandle<()>, ValidationError>
    where
        C: Callback<User>,
    {
        let exchange = self.tracker.create_user(username)?;
        Ok(self.spawn(Operation::CreateUser, exchange, callback))
    }

    /// Callback form of [`LocationTracker::verify_user`].
    ///
    /// # Errors
    ///
    /// Returns the synchronous [`ValidationError`] without spawning.
    pub fn verify_user<C>(&self, user_id: &str, callback: C) -> Result<JoinHandle<()>, ValidationError>
    where
        C: Callback<User>,
    {
        let exchange = self.tracker.verify_user(user_id)?;
        Ok(self.spawn(Operation::VerifyUser, exchange, callback))
    }

    /// Callback form of [`LocationTracker::update_user_status`].
    ///
    /// # Errors
    ///
    /// Returns the synchronous [`ValidationError`] without spawning.
    pub fn update_user_status<C>(
        &self,
        user_id: &str,
        is_active: bool,
        callback: C,
    ) -> Result<JoinHandle<()>, ValidationError>
    where
        C: Callback<User>,
    {
        let exchange = self.tracker.update_user_status(user_id, is_active)?;
        Ok(self.spawn(Operation::UpdateStatus, exchange, callback))
    }

    /// Callback form of [`LocationTracker::get_user_status`].
    ///
    /// # Errors
    ///
    /// Returns the synchronous [`ValidationError`] without spawning.
    pub fn get_user_status<C>(
        &self,
        user_id: &str,
        callback: C,
    ) -> Result<JoinHandle<()>, ValidationError>
    where
        C: Callback<User>,
    {
        let exchange = self.tracker.get_user_status(user_id)?;
        Ok(self.spawn(Operation::GetUser, exchange, callback))
    }

    /// Callback form of [`LocationTracker::update_location`].
    ///
    /// # Errors
    ///
    /// Returns the synchronous [`ValidationError`] without spawning.
    pub fn update_location<C>(
        &self,
        user_id: &str,
        latitude: f64,
        longitude: f64,
        callback: C,
    ) -> Result<JoinHandle<()>, ValidationError>
    where
        C: Callback<Location>,
    {
        let exchange = self.tracker.update_location(user_id, latitude, longitude)?;
        Ok(self.spawn(Operation::UpdateLocation, exchange, callback))
    }

    /// Callback form of [`LocationTracker::get_user_location`].
    ///
    /// # Errors
    ///
    /// Returns the synchronous [`ValidationError`] without spawning.
    pub fn get_user_location<C>(
        &self,
        user_id: &str,
        callback: C,
    ) -> Result<JoinHandle<()>, ValidationError>
    where
        C: Callback<Location>,
    {
        let exchange = self.tracker.get_user_location(user_id)?;
        Ok(self.spawn(Operation::GetLocation, exchange, callback))
    }

    /// A panicking exchange still reports once, as a network error.
    fn spawn<V, C>(
        &self,
        operation: Operation,
        exchange: Exchange<V>,
        callback: C,
    ) -> JoinHandle<()>
    where
        V: Send + 'static,
        C: Callback<V>,
    {
        self.runtime.spawn(async move {
            match AssertUnwindSafe(exchange).catch_unwind().await {
                Ok(Ok(value)) => callback.on_success(value),
                Ok(Err(failure)) => callback.on_error(failure.to_string()),
                Err(_) => {
                    error!(%operation, "exchange panicked");
                    callback.on_error(
                        ExchangeError::network(operation, "exchange aborted unexpectedly")
                            .to_string(),
                    );
                }
            }
        })
    }
}
