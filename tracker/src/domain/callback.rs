//! Single-shot completion callbacks.
//!
//! [`Callback`] methods consume the callback, so at most one of them can run
//! per exchange.

use tokio::sync::oneshot;
use tracing::debug;

/// Terminal result delivered to a callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The exchange produced a decoded value.
    Success(T),
    /// The exchange failed; carries the formatted error message.
    Failure(String),
}

impl<T> Outcome<T> {
    /// Convert into a standard `Result`.
    ///
    /// # Errors
    ///
    /// Returns the failure message for [`Outcome::Failure`].
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(message) => Err(message),
        }
    }
}

/// Receiver of exactly one exchange outcome.
pub trait Callback<T>: Send + 'static {
    /// Called with the decoded value of a successful exchange.
    fn on_success(self, value: T);

    /// Called with the formatted message of a failed exchange.
    fn on_error(self, message: String);
}

impl<T> Callback<T> for oneshot::Sender<Outcome<T>>
where
    T: Send + 'static,
{
    fn on_success(self, value: T) {
        deliver(self, Outcome::Success(value));
    }

    fn on_error(self, message: String) {
        deliver(self, Outcome::Failure(message));
    }
}

fn deliver<T>(sender: oneshot::Sender<Outcome<T>>, outcome: Outcome<T>) {
    if sender.send(outcome).is_err() {
        debug!("callback receiver dropped before the outcome arrived");
    }
}

/// Adapts a closure taking an [`Outcome`] into a [`Callback`].
#[derive(Debug, Clone, Copy)]
pub struct FnCallback<F>(F);

impl<F> FnCallback<F> {
    /// Wrap a closure.
    #[must_use]
    pub const fn new(callback: F) -> Self {
        Self(callback)
    }
}

/// Build a callback from a closure.
///
/// # Examples
/// ```
/// use location_tracker::domain::{Callback, Outcome, from_fn};
///
/// let callback = from_fn(|outcome: Outcome<u32>| assert_eq!(outcome, Outcome::Success(7)));
/// callback.on_success(7);
/// ```
#[must_use]
pub const fn from_fn<F>(callback: F) -> FnCallback<F> {
    FnCallback::new(callback)
}

impl<T, F> Callback<T> for FnCallback<F>
where
    F: FnOnce(Outcome<T>) + Send + 'static,
{
    fn on_success(self, value: T) {
        (self.0)(Outcome::Success(value));
    }

    fn on_error(self, message: String) {
        (self.0)(Outcome::Failure(message));
    }
}
