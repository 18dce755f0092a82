//! Standard pipeline behaviors.

mod logging;
#[cfg(feature = "timeout")]
mod timeout;
mod validation;

pub use logging::LoggingBehavior;
#[cfg(feature = "timeout")]
pub use timeout::{TimeoutBehavior, TimeoutError};
pub use validation::{Validate, ValidationBehavior, ValidationError};
