//! Type identity used in place of runtime reflection.
//!
//! # Responsibility
//! - Name presenter and view types in binding records and registries.
//! - Mint stable per-instance view identifiers.
//!
//! # Invariants
//! - `TypeKey` equality and hashing use `TypeId` only; the name is diagnostic.
//! - A `ViewId` is minted once per view instance and never reused.

use std::any::{type_name, TypeId};
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Stable identifier of one live view instance.
pub type ViewId = Uuid;

/// Mints a fresh view identifier.
pub fn new_view_id() -> ViewId {
    Uuid::new_v4()
}

/// Identity of a Rust type, comparable at runtime.
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Returns the key for `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name as reported by the compiler.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Last path segment of the type name, without generic arguments.
    ///
    /// `my_app::views::LoginView<u8>` -> `LoginView`.
    pub fn short_name(&self) -> &'static str {
        let without_generics = match self.name.find('<') {
            Some(index) => &self.name[..index],
            None => self.name,
        };
        match without_generics.rfind("::") {
            Some(index) => &without_generics[index + 2..],
            None => without_generics,
        }
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for TypeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::{new_view_id, TypeKey};

    mod nested {
        pub struct OrderView;
        pub struct Wrapper<T>(pub T);
    }

    #[test]
    fn equality_follows_type_identity() {
        assert_eq!(TypeKey::of::<nested::OrderView>(), TypeKey::of::<nested::OrderView>());
        assert_ne!(TypeKey::of::<nested::OrderView>(), TypeKey::of::<String>());
    }

    #[test]
    fn short_name_strips_module_path_and_generics() {
        assert_eq!(TypeKey::of::<nested::OrderView>().short_name(), "OrderView");
        assert_eq!(
            TypeKey::of::<nested::Wrapper<nested::OrderView>>().short_name(),
            "Wrapper"
        );
        assert_eq!(TypeKey::of::<u32>().short_name(), "u32");
    }

    #[test]
    fn view_ids_are_unique() {
        assert_ne!(new_view_id(), new_view_id());
        assert!(!new_view_id().is_nil());
    }
}
