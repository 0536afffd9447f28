//! Pluggable presenter construction and the write-once factory slot.
//!
//! # Responsibility
//! - Define the create/release contract every factory satisfies.
//! - Provide the registry-backed default factory.
//! - Hold the active factory with write-once semantics.
//!
//! # Invariants
//! - A `FactorySlot` holds at most one factory for its whole lifetime.
//! - Reading an empty slot installs the default factory, which locks the slot.
//! - The write-once check is atomic: a lazy default install racing an explicit
//!   set resolves to exactly one winner.

use crate::binding::registry::{global_registry, BindingRegistry};
use crate::presenter::{ConstructionError, ConstructionResult, Presenter};
use crate::type_key::TypeKey;
use crate::view::View;
use log::{debug, info, warn};
use once_cell::sync::{Lazy, OnceCell};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;
use std::sync::Arc;

/// Strategy for creating and releasing presenters.
pub trait PresenterFactory: Send + Sync {
    /// Stable name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Creates a presenter of `presenter_type` bound to `view`.
    ///
    /// `view_type` is the view type named by the matched binding.
    fn create(
        &self,
        presenter_type: TypeKey,
        view_type: TypeKey,
        view: Rc<dyn View>,
    ) -> ConstructionResult;

    /// Returns a presenter created by this factory to its lifecycle management.
    fn release(&self, presenter: Rc<dyn Presenter>) -> Result<(), ConstructionError>;
}

/// Direct construction through constructors registered in a `BindingRegistry`.
#[derive(Debug)]
pub struct DefaultPresenterFactory {
    registry: Arc<BindingRegistry>,
}

impl DefaultPresenterFactory {
    pub const NAME: &'static str = "default";

    pub fn new(registry: Arc<BindingRegistry>) -> Self {
        Self { registry }
    }
}

impl PresenterFactory for DefaultPresenterFactory {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn create(
        &self,
        presenter_type: TypeKey,
        view_type: TypeKey,
        view: Rc<dyn View>,
    ) -> ConstructionResult {
        let constructor = self
            .registry
            .constructor_for(presenter_type)
            .ok_or(ConstructionError::MissingConstructor {
                presenter: presenter_type,
            })?;
        debug!(
            "event=presenter_create module=factory status=start factory={} presenter={} view_type={}",
            Self::NAME,
            presenter_type,
            view_type
        );
        constructor(view)
    }

    /// Direct construction owns nothing beyond the returned handle.
    fn release(&self, _presenter: Rc<dyn Presenter>) -> Result<(), ConstructionError> {
        Err(ConstructionError::ReleaseUnsupported {
            factory: Self::NAME,
        })
    }
}

/// How the installed factory got into its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactoryOrigin {
    /// Installed lazily on first read.
    Defaulted,
    /// Installed by an explicit `set`.
    Explicit,
}

/// Second write to a `FactorySlot`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactoryConfigError {
    /// The slot was read before being set and now holds the default factory.
    AlreadyDefaulted,
    /// A factory was already set explicitly.
    AlreadySet { installed: &'static str },
}

impl Display for FactoryConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyDefaulted => write!(
                f,
                "presenter factory is already fixed to the default implementation because it \
                 was used before being set; set a custom factory during startup, before any \
                 view is bound"
            ),
            Self::AlreadySet { installed } => write!(
                f,
                "presenter factory can only be set once; `{installed}` is already installed"
            ),
        }
    }
}

impl Error for FactoryConfigError {}

struct InstalledFactory {
    origin: FactoryOrigin,
    factory: Arc<dyn PresenterFactory>,
}

/// Write-once holder of the active presenter factory.
pub struct FactorySlot {
    installed: OnceCell<InstalledFactory>,
    default_registry: Arc<BindingRegistry>,
}

impl FactorySlot {
    /// Creates an empty slot whose lazy default reads `default_registry`.
    pub fn new(default_registry: Arc<BindingRegistry>) -> Self {
        Self {
            installed: OnceCell::new(),
            default_registry,
        }
    }

    /// Returns the active factory, installing the default when empty.
    pub fn get(&self) -> Arc<dyn PresenterFactory> {
        let installed = self.installed.get_or_init(|| {
            info!(
                "event=factory_install module=factory status=ok origin=defaulted factory={}",
                DefaultPresenterFactory::NAME
            );
            InstalledFactory {
                origin: FactoryOrigin::Defaulted,
                factory: Arc::new(DefaultPresenterFactory::new(Arc::clone(
                    &self.default_registry,
                ))),
            }
        });
        Arc::clone(&installed.factory)
    }

    /// Installs `factory`. Fails once the slot holds any factory.
    pub fn set(&self, factory: Arc<dyn PresenterFactory>) -> Result<(), FactoryConfigError> {
        let name = factory.name();
        let outcome = self.installed.set(InstalledFactory {
            origin: FactoryOrigin::Explicit,
            factory,
        });
        if outcome.is_ok() {
            info!(
                "event=factory_install module=factory status=ok origin=explicit factory={}",
                name
            );
            return Ok(());
        }

        let err = match self.installed.get() {
            Some(existing) if existing.origin == FactoryOrigin::Explicit => {
                FactoryConfigError::AlreadySet {
                    installed: existing.factory.name(),
                }
            }
            _ => FactoryConfigError::AlreadyDefaulted,
        };
        warn!(
            "event=factory_install module=factory status=error factory={} error={}",
            name, err
        );
        Err(err)
    }

    /// Origin of the installed factory; `None` while the slot is empty.
    pub fn origin(&self) -> Option<FactoryOrigin> {
        self.installed.get().map(|installed| installed.origin)
    }
}

impl Debug for FactorySlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactorySlot")
            .field("origin", &self.origin())
            .field(
                "factory",
                &self.installed.get().map(|installed| installed.factory.name()),
            )
            .finish()
    }
}

static GLOBAL_FACTORY_SLOT: Lazy<Arc<FactorySlot>> =
    Lazy::new(|| Arc::new(FactorySlot::new(global_registry())));

/// Process-wide factory slot, defaulting to the global registry.
pub fn global_factory_slot() -> Arc<FactorySlot> {
    Arc::clone(&GLOBAL_FACTORY_SLOT)
}

/// Returns the process-wide factory, installing the default when unset.
pub fn presenter_factory() -> Arc<dyn PresenterFactory> {
    GLOBAL_FACTORY_SLOT.get()
}

/// Sets the process-wide factory. Call once, during startup.
pub fn set_presenter_factory(factory: Arc<dyn PresenterFactory>) -> Result<(), FactoryConfigError> {
    GLOBAL_FACTORY_SLOT.set(factory)
}
