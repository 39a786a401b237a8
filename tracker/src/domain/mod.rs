//! Domain value objects, the transport port, and the tracker facade.
//!
//! Purpose: keep every validation rule and error-mapping decision here, free
//! of any HTTP concerns. Adapters live in [`crate::outbound`].
//!
//! Public surface:
//! - `User`, `UserId`, `Username`, `Location`, `Coordinates`, `Timestamp`:
//!   immutable, self-validating entities.
//! - Request DTOs in [`requests`].
//! - `LocationTracker`: future-returning operations over a [`ports::Transport`].
//! - `CallbackTracker`: the same operations delivered through [`Callback`]s.

pub mod callback;
pub mod dispatch;
pub mod exchange;
pub mod location;
pub mod ports;
pub mod requests;
pub mod timestamp;
pub mod tracker_service;
pub mod user;
pub mod validation;

pub use self::callback::{Callback, FnCallback, Outcome, from_fn};
pub use self::dispatch::CallbackTracker;
pub use self::exchange::{ExchangeError, Operation, UNREADABLE_BODY_PLACEHOLDER};
pub use self::location::{Coordinates, Location};
pub use self::requests::{
    CreateUserRequest, LocationUpdateRequest, StatusUpdateRequest, VerifyUserRequest,
};
pub use self::timestamp::Timestamp;
pub use self::tracker_service::{Exchange, LocationTracker};
pub use self::user::{User, UserId, Username};
pub use self::validation::{ValidationError, ValidationKind};
