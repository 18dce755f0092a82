//! Derive macros for Switchboard.
//!
//! - `#[derive(Message)]` - implements the `Message` marker trait
//! - `#[derive(Event)]` - implements `Message` and `Event`, reading the event
//!   id from a field

use proc_macro::TokenStream;

mod event;

/// Derive macro for implementing `Message` trait.
#[proc_macro_derive(Message)]
pub fn derive_message(input: TokenStream) -> TokenStream {
    event::derive_message_impl(input)
}

/// Derive macro for implementing the `Message` and `Event` traits.
///
/// The event id is read from the field marked `#[event(id)]`, or from a field
/// named `id` when no field is marked. The field must be `Copy` and convert
/// into an `EventId` (an `EventId` or a `Uuid`).
///
/// ```rust,ignore
/// #[derive(Clone, Debug, Event)]
/// struct OrderPlaced {
///     #[event(id)]
///     event_id: EventId,
///     order: u64,
/// }
/// ```
#[proc_macro_derive(Event, attributes(event))]
pub fn derive_event(input: TokenStream) -> TokenStream {
    event::derive_event_impl(input)
}
