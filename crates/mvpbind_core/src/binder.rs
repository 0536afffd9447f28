//! Binding coordinator.
//!
//! # Responsibility
//! - Drive discovery then factory construction for one view instance.
//! - Skip binding entirely in design mode.
//! - Contain every binding failure at this boundary.
//!
//! # Invariants
//! - `perform_binding` never propagates an error or a panic to its caller; a
//!   failed binding leaves the view without a presenter and is reported to the
//!   configured `BindingNotifier`.
//! - Factory misconfiguration is not contained here; it surfaces from
//!   `FactorySlot::set` to the caller doing the write.

use crate::binding::discovery::{DeclaredBindingDiscovery, DiscoveryStrategy};
use crate::binding::registry::BindingRegistry;
use crate::config::BinderConfig;
use crate::presenter::factory::{global_factory_slot, FactorySlot, PresenterFactory};
use crate::presenter::{ConstructionError, Presenter};
use crate::view::{AsAnyView, View};
use log::{debug, error, info};
use std::any::Any;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;
use std::sync::Arc;

const MAX_PANIC_MESSAGE_CHARS: usize = 200;

/// Step of the binding sequence that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingStage {
    Discovery,
    Construction,
}

impl BindingStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Discovery => "discovery",
            Self::Construction => "construction",
        }
    }
}

/// Failure inside the binding sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    Construction(ConstructionError),
    Panicked { stage: BindingStage, message: String },
}

impl Display for BindingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Construction(err) => write!(f, "{err}"),
            Self::Panicked { stage, message } => {
                write!(f, "panic during {}: {message}", stage.as_str())
            }
        }
    }
}

impl Error for BindingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Construction(err) => Some(err),
            Self::Panicked { .. } => None,
        }
    }
}

impl From<ConstructionError> for BindingError {
    fn from(value: ConstructionError) -> Self {
        Self::Construction(value)
    }
}

/// Receives binding failures contained by [`Binder::perform_binding`].
pub trait BindingNotifier {
    fn binding_failed(&self, view: &dyn View, err: &BindingError);
}

/// Reports binding failures to the `log` error channel.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl BindingNotifier for LogNotifier {
    fn binding_failed(&self, view: &dyn View, err: &BindingError) {
        error!(
            "event=perform_binding module=binder status=error view_type={} view_id={} error={}",
            view.type_key(),
            view.view_id(),
            err
        );
    }
}

/// Connects view instances to their presenters.
///
/// The host owns the returned presenter handle for as long as the view lives;
/// dropping it detaches the presenter from every view signal.
pub struct Binder {
    discovery: Box<dyn DiscoveryStrategy>,
    factory_slot: Arc<FactorySlot>,
    config: BinderConfig,
    notifier: Box<dyn BindingNotifier>,
}

impl Binder {
    /// Binder over the process-wide registry and factory slot.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> BinderBuilder {
        BinderBuilder::default()
    }

    pub fn config(&self) -> BinderConfig {
        self.config
    }

    pub fn factory_slot(&self) -> &Arc<FactorySlot> {
        &self.factory_slot
    }

    /// Active factory; installs the default when none was set.
    pub fn factory(&self) -> Arc<dyn PresenterFactory> {
        self.factory_slot.get()
    }

    /// Binds `view` to its presenter.
    ///
    /// Returns `None` when the view is unbound, in design mode, or when
    /// binding failed; failures are reported to the notifier.
    #[must_use = "dropping the presenter handle detaches it from the view"]
    pub fn perform_binding(&self, view: &Rc<dyn View>) -> Option<Rc<dyn Presenter>> {
        match self.try_perform_binding(view) {
            Ok(presenter) => presenter,
            Err(err) => {
                let notified = catch_unwind(AssertUnwindSafe(|| {
                    self.notifier.binding_failed(&**view, &err);
                }));
                if notified.is_err() {
                    error!(
                        "event=perform_binding module=binder status=error notifier=panicked error={}",
                        err
                    );
                }
                None
            }
        }
    }

    /// Typed convenience over [`Binder::perform_binding`].
    #[must_use = "dropping the presenter handle detaches it from the view"]
    pub fn bind<V: View>(&self, view: &Rc<V>) -> Option<Rc<dyn Presenter>> {
        let view: Rc<dyn View> = Rc::clone(view) as Rc<dyn View>;
        self.perform_binding(&view)
    }

    /// Binding sequence with failures returned instead of reported.
    ///
    /// Panics raised by discovery or construction are still caught and
    /// returned as `BindingError::Panicked`.
    #[must_use = "dropping the presenter handle detaches it from the view"]
    pub fn try_perform_binding(
        &self,
        view: &Rc<dyn View>,
    ) -> Result<Option<Rc<dyn Presenter>>, BindingError> {
        if self.config.usage_mode.is_design() {
            debug!(
                "event=perform_binding module=binder status=skipped reason=design_mode view_type={}",
                (**view).type_key()
            );
            return Ok(None);
        }

        let (view_id, record) = contain(BindingStage::Discovery, || {
            (view.view_id(), self.discovery.get_binding(view))
        })?;
        let Some(record) = record else {
            debug!(
                "event=perform_binding module=binder status=unbound view_type={} view_id={}",
                (**view).type_key(),
                view_id
            );
            return Ok(None);
        };

        let factory = self.factory_slot.get();
        let presenter = contain(BindingStage::Construction, || {
            factory.create(
                record.presenter_type(),
                record.view_type(),
                Rc::clone(record.view()),
            )
        })??;

        info!(
            "event=perform_binding module=binder status=ok factory={} presenter={} view_type={} view_id={}",
            factory.name(),
            record.presenter_type(),
            record.view_type(),
            view_id
        );
        Ok(Some(presenter))
    }

    /// Hands `presenter` back to the active factory.
    pub fn release(&self, presenter: Rc<dyn Presenter>) -> Result<(), ConstructionError> {
        self.factory_slot.get().release(presenter)
    }
}

impl Default for Binder {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Binder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binder")
            .field("config", &self.config)
            .field("factory_slot", &self.factory_slot)
            .finish_non_exhaustive()
    }
}

/// Composition root for a [`Binder`].
///
/// Unset parts fall back to the process-wide registry, the process-wide
/// factory slot, live usage mode and [`LogNotifier`].
#[derive(Default)]
pub struct BinderBuilder {
    discovery: Option<Box<dyn DiscoveryStrategy>>,
    factory_slot: Option<Arc<FactorySlot>>,
    config: BinderConfig,
    notifier: Option<Box<dyn BindingNotifier>>,
}

impl BinderBuilder {
    pub fn discovery(mut self, discovery: impl DiscoveryStrategy + 'static) -> Self {
        self.discovery = Some(Box::new(discovery));
        self
    }

    pub fn factory_slot(mut self, slot: Arc<FactorySlot>) -> Self {
        self.factory_slot = Some(slot);
        self
    }

    /// Uses `registry` for both declared discovery and the default factory.
    pub fn registry(self, registry: Arc<BindingRegistry>) -> Self {
        self.discovery(DeclaredBindingDiscovery::new(Arc::clone(&registry)))
            .factory_slot(Arc::new(FactorySlot::new(registry)))
    }

    pub fn config(mut self, config: BinderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn notifier(mut self, notifier: impl BindingNotifier + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    pub fn build(self) -> Binder {
        Binder {
            discovery: self
                .discovery
                .unwrap_or_else(|| Box::new(DeclaredBindingDiscovery::global())),
            factory_slot: self.factory_slot.unwrap_or_else(global_factory_slot),
            config: self.config,
            notifier: self.notifier.unwrap_or_else(|| Box::new(LogNotifier)),
        }
    }
}

fn contain<T>(stage: BindingStage, step: impl FnOnce() -> T) -> Result<T, BindingError> {
    catch_unwind(AssertUnwindSafe(step)).map_err(|payload| BindingError::Panicked {
        stage,
        message: panic_message(payload.as_ref()),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let message = if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };
    crate::logging::sanitize_message(&message, MAX_PANIC_MESSAGE_CHARS)
}
