//! Startup registration table for view/presenter bindings.
//!
//! # Responsibility
//! - Record which presenter type each view type declares.
//! - Hold the construction closure of each presenter type.
//!
//! # Invariants
//! - Declarations for one view type keep registration order; readers use the
//!   first one only.
//! - At most one constructor per presenter type.
//! - A poisoned lock is recovered, never propagated as a panic.

use crate::presenter::{PresenterConstructor, ViewPresenter};
use crate::type_key::TypeKey;
use crate::view::View;
use log::{debug, warn};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Declares that instances of a view type are controlled by `presenter_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingDeclaration {
    pub presenter_type: TypeKey,
    /// Expected view capability type, informational only.
    pub view_type: Option<TypeKey>,
}

/// Registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateConstructor(TypeKey),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateConstructor(presenter) => {
                write!(f, "presenter constructor already registered: {presenter}")
            }
        }
    }
}

impl Error for RegistryError {}

#[derive(Default)]
struct RegistryEntries {
    declarations: HashMap<TypeKey, Vec<BindingDeclaration>>,
    constructors: HashMap<TypeKey, PresenterConstructor>,
}

/// Thread-safe table populated at startup and read during binding.
#[derive(Default)]
pub struct BindingRegistry {
    entries: RwLock<RegistryEntries>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `P` as the presenter of view type `V`.
    pub fn declare<V: View, P: 'static>(&self) {
        self.push_declaration(
            TypeKey::of::<V>(),
            BindingDeclaration {
                presenter_type: TypeKey::of::<P>(),
                view_type: None,
            },
        );
    }

    /// Declares `P` for `V`, naming `I` as the expected view capability type.
    pub fn declare_with_view_type<V: View, P: 'static, I: ?Sized + 'static>(&self) {
        self.push_declaration(
            TypeKey::of::<V>(),
            BindingDeclaration {
                presenter_type: TypeKey::of::<P>(),
                view_type: Some(TypeKey::of::<I>()),
            },
        );
    }

    /// Registers the constructor used to build `P`.
    pub fn register_constructor<P: 'static>(
        &self,
        constructor: PresenterConstructor,
    ) -> Result<(), RegistryError> {
        let presenter_type = TypeKey::of::<P>();
        let mut entries = self.write();
        if entries.constructors.contains_key(&presenter_type) {
            return Err(RegistryError::DuplicateConstructor(presenter_type));
        }
        entries.constructors.insert(presenter_type, constructor);
        debug!(
            "event=registry_constructor module=registry status=ok presenter={}",
            presenter_type
        );
        Ok(())
    }

    /// Registers `P`'s constructor and declares `P` for its view type `V`.
    pub fn register<V, P>(&self, constructor: PresenterConstructor) -> Result<(), RegistryError>
    where
        V: View,
        P: ViewPresenter<View = V>,
    {
        self.register_constructor::<P>(constructor)?;
        self.declare::<V, P>();
        Ok(())
    }

    /// First declaration for `view_type`, with the number of ignored extras.
    pub fn first_declaration(&self, view_type: TypeKey) -> Option<(BindingDeclaration, usize)> {
        let entries = self.read();
        let declarations = entries.declarations.get(&view_type)?;
        let first = declarations.first()?;
        Some((*first, declarations.len() - 1))
    }

    pub fn declarations_for(&self, view_type: TypeKey) -> Vec<BindingDeclaration> {
        self.read()
            .declarations
            .get(&view_type)
            .cloned()
            .unwrap_or_default()
    }

    pub fn constructor_for(&self, presenter_type: TypeKey) -> Option<PresenterConstructor> {
        self.read().constructors.get(&presenter_type).cloned()
    }

    /// Finds a presenter with a registered constructor by short type name.
    ///
    /// Returns `None` when several registered presenters share the name.
    pub fn find_presenter_by_name(&self, short_name: &str) -> Option<TypeKey> {
        let matches: Vec<TypeKey> = self
            .read()
            .constructors
            .keys()
            .filter(|presenter| presenter.short_name() == short_name)
            .copied()
            .collect();
        match matches.as_slice() {
            [] => None,
            [presenter] => Some(*presenter),
            _ => {
                let mut names: Vec<&str> = matches.iter().map(TypeKey::name).collect();
                names.sort_unstable();
                warn!(
                    "event=registry_lookup module=registry status=ambiguous name={} candidates={}",
                    short_name,
                    names.join(",")
                );
                None
            }
        }
    }

    /// Number of view types with at least one declaration.
    pub fn declared_view_count(&self) -> usize {
        self.read().declarations.len()
    }

    pub fn constructor_count(&self) -> usize {
        self.read().constructors.len()
    }

    fn push_declaration(&self, view_type: TypeKey, declaration: BindingDeclaration) {
        let mut entries = self.write();
        let declarations = entries.declarations.entry(view_type).or_default();
        declarations.push(declaration);
        debug!(
            "event=registry_declare module=registry status=ok view_type={} presenter={} position={}",
            view_type,
            declaration.presenter_type,
            declarations.len()
        );
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryEntries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryEntries> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Debug for BindingRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingRegistry")
            .field("declared_views", &self.declared_view_count())
            .field("constructors", &self.constructor_count())
            .finish()
    }
}

static GLOBAL_REGISTRY: Lazy<Arc<BindingRegistry>> =
    Lazy::new(|| Arc::new(BindingRegistry::new()));

/// Process-wide registry read by `Binder::new()` and the default factory.
pub fn global_registry() -> Arc<BindingRegistry> {
    Arc::clone(&GLOBAL_REGISTRY)
}
