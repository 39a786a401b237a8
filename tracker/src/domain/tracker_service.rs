//! Public operation surface of the client.
//!
//! Each operation validates its input synchronously, then hands back an
//! [`Exchange`] future that performs exactly one transport round trip.

use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::{self, BoxFuture};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::exchange::{ExchangeError, Operation, resolve};
use super::location::Location;
use super::ports::{HttpMethod, Transport, TransportRequest};
use super::requests::{
    CreateUserRequest, LocationUpdateRequest, StatusUpdateRequest, VerifyUserRequest,
};
use super::user::{User, UserId};
use super::validation::ValidationError;

const CREATE_USER_PATH: &str = "api/users/create";
const VERIFY_USER_PATH: &str = "api/users/verify";
const UPDATE_LOCATION_PATH: &str = "api/locations/update";

/// Pending exchange resolving to a decoded value or a single error.
///
/// Dropping the future abandons the exchange.
pub type Exchange<V> = BoxFuture<'static, Result<V, ExchangeError>>;

/// Stateless facade over a [`Transport`].
///
/// Cloning shares the underlying transport; the facade itself has no mutable
/// state, so clones may be used from many tasks at once.
pub struct LocationTracker<T> {
    transport: Arc<T>,
}

impl<T> Clone for LocationTracker<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T> LocationTracker<T> {
    /// Wrap a shared transport.
    #[must_use]
    pub const fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// Wrap an owned transport.
    #[must_use]
    pub fn from_transport(transport: T) -> Self {
        Self::new(Arc::new(transport))
    }
}

impl<T> LocationTracker<T>
where
    T: Transport + 'static,
{
    /// Register a new user with a trimmed username.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` [`ValidationError`] when the username is
    /// empty or outside the accepted length range. No request is sent.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let user = tracker.create_user("alice")?.await?;
    /// assert_eq!(user.username(), "alice");
    /// ```
    pub fn create_user(&self, username: &str) -> Result<Exchange<User>, ValidationError> {
        let request = CreateUserRequest::new(username)?;
        Ok(self.send_json(
            Operation::CreateUser,
            HttpMethod::Post,
            CREATE_USER_PATH.to_owned(),
            &request,
        ))
    }

    /// Confirm that a user exists server-side.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyUserId`] for a blank identifier.
    pub fn verify_user(&self, user_id: &str) -> Result<Exchange<User>, ValidationError> {
        let request = VerifyUserRequest::new(user_id)?;
        Ok(self.send_json(
            Operation::VerifyUser,
            HttpMethod::Post,
            VERIFY_USER_PATH.to_owned(),
            &request,
        ))
    }

    /// Set a user's active flag.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyUserId`] for a blank identifier.
    pub fn update_user_status(
        &self,
        user_id: &str,
        is_active: bool,
    ) -> Result<Exchange<User>, ValidationError> {
        let request = StatusUpdateRequest::new(user_id, is_active)?;
        let path = format!("api/users/{}/status", path_segment(request.user_id()));
        Ok(self.send_json(Operation::UpdateStatus, HttpMethod::Patch, path, &request))
    }

    /// Fetch the current user record, including its active flag.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyUserId`] for a blank identifier.
    pub fn get_user_status(&self, user_id: &str) -> Result<Exchange<User>, ValidationError> {
        let id = UserId::new(user_id)?;
        let path = format!("api/users/{}", path_segment(&id));
        Ok(self.dispatch(Operation::GetUser, TransportRequest::get(path)))
    }

    /// Report a user's current position.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyUserId`] for a blank identifier, or a
    /// range error when either coordinate is out of bounds. No request is
    /// sent in either case.
    pub fn update_location(
        &self,
        user_id: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<Exchange<Location>, ValidationError> {
        let request = LocationUpdateRequest::new(user_id, latitude, longitude)?;
        Ok(self.send_json(
            Operation::UpdateLocation,
            HttpMethod::Post,
            UPDATE_LOCATION_PATH.to_owned(),
            &request,
        ))
    }

    /// Fetch a user's last known position.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyUserId`] for a blank identifier.
    pub fn get_user_location(&self, user_id: &str) -> Result<Exchange<Location>, ValidationError> {
        let id = UserId::new(user_id)?;
        let path = format!("api/locations/user/{}", path_segment(&id));
        Ok(self.dispatch(Operation::GetLocation, TransportRequest::get(path)))
    }

    fn send_json<B, V>(
        &self,
        operation: Operation,
        method: HttpMethod,
        path: String,
        body: &B,
    ) -> Exchange<V>
    where
        B: Serialize,
        V: DeserializeOwned + Send + 'static,
    {
        match serde_json::to_value(body) {
            Ok(json) => self.dispatch(operation, TransportRequest::new(method, path, Some(json))),
            Err(error) => {
                warn!(%operation, %error, "request body could not be encoded");
                future::ready(Err(ExchangeError::network(operation, error.to_string()))).boxed()
            }
        }
    }

    fn dispatch<V>(&self, operation: Operation, request: TransportRequest) -> Exchange<V>
    where
        V: DeserializeOwned + Send + 'static,
    {
        let transport = Arc::clone(&self.transport);
        async move {
            debug!(%operation, method = ?request.method(), path = request.path(), "starting exchange");
            let result = transport.execute(request).await;
            let outcome: Result<V, ExchangeError> = resolve(operation, result);
            match &outcome {
                Ok(_) => debug!(%operation, "exchange succeeded"),
                Err(error) => warn!(%operation, %error, "exchange failed"),
            }
            outcome
        }
        .boxed()
    }
}

fn path_segment(id: &UserId) -> String {
    urlencoding::encode(id.as_ref()).into_owned()
}

#[cfg(test)]
#[path = "tracker_service_tests.rs"]
mod tests;
