//! Message trait and the well-known empty request.

use std::fmt;

/// A marker trait for requests, responses and events within the system.
///
/// Messages must be `Send + Sync + 'static` so that a single request can be
/// borrowed by every stage of a pipeline while the pipeline is awaited.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone)]
/// struct GetForecast { city: String }
///
/// impl Message for GetForecast {}
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must be `Send + Sync + 'static`",
    note = "Requests, responses and events must be thread-safe and static."
)]
pub trait Message: Send + Sync + 'static {}

// Common Message implementations
impl Message for () {}
impl Message for bool {}
impl Message for i32 {}
impl Message for i64 {}
impl Message for u32 {}
impl Message for u64 {}
impl Message for usize {}
impl Message for String {}
impl Message for &'static str {}
impl<T: Message> Message for Box<T> {}
impl<T: Message> Message for std::sync::Arc<T> {}
impl<T: Message> Message for Vec<T> {}
impl<T: Message> Message for Option<T> {}
impl<T: Message, E: Message> Message for Result<T, E> {}

/// The request type of handlers that take no input.
///
/// Dispatching without a payload sends `Empty`, so behaviors and hooks can
/// still be registered against the `(Empty, Res)` signature.
///
/// The "no content" response is plain `()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Empty;

impl Message for Empty {}

impl fmt::Display for Empty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{}")
    }
}
