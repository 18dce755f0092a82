//! Request signatures.
//!
//! A [`Signature`] identifies the (request type, response type) pair a handler
//! serves. Registries key handlers, behaviors and hooks by signature.

use crate::message::Message;
use std::{
    any::{TypeId, type_name},
    fmt,
    hash::{Hash, Hasher},
};

/// The (request type, response type) pair identifying a handler.
///
/// Equality and hashing use the [`TypeId`]s only; the type names are carried
/// for diagnostics.
#[derive(Clone, Copy)]
pub struct Signature {
    request: TypeId,
    response: TypeId,
    request_name: &'static str,
    response_name: &'static str,
}

impl Signature {
    /// The signature of a `Req -> Res` handler.
    pub fn of<Req: Message, Res: Message>() -> Self {
        Self {
            request: TypeId::of::<Req>(),
            response: TypeId::of::<Res>(),
            request_name: type_name::<Req>(),
            response_name: type_name::<Res>(),
        }
    }

    /// The request type id.
    pub fn request(&self) -> TypeId {
        self.request
    }

    /// The response type id.
    pub fn response(&self) -> TypeId {
        self.response
    }

    /// The request type name.
    pub fn request_name(&self) -> &'static str {
        self.request_name
    }

    /// The response type name.
    pub fn response_name(&self) -> &'static str {
        self.response_name
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.request == other.request && self.response == other.response
    }
}

impl Eq for Signature {}

impl Hash for Signature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.request.hash(state);
        self.response.hash(state);
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({self})")
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.request_name, self.response_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Empty;
    use std::collections::HashSet;

    #[test]
    fn signatures_compare_by_both_types() {
        assert_eq!(Signature::of::<String, u32>(), Signature::of::<String, u32>());
        assert_ne!(Signature::of::<String, u32>(), Signature::of::<String, u64>());
        assert_ne!(Signature::of::<String, u32>(), Signature::of::<Empty, u32>());

        let set: HashSet<_> = [
            Signature::of::<String, u32>(),
            Signature::of::<String, u32>(),
            Signature::of::<Empty, ()>(),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn display_names_both_types() {
        let sig = Signature::of::<Empty, ()>();
        let shown = sig.to_string();
        assert!(shown.ends_with("Empty -> ()"), "{shown}");
    }
}
