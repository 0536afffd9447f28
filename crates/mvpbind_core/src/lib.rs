//! Presenter discovery and binding for Model-View-Presenter desktop views.
//!
//! A view asks a [`Binder`] to bind itself at construction. The binder looks
//! up the view's declared presenter, builds it through the active
//! [`PresenterFactory`], and from then on view and presenter talk only
//! through the view's lifecycle signals.

pub mod binder;
pub mod binding;
pub mod config;
pub mod logging;
pub mod navigation;
pub mod presenter;
pub mod type_key;
pub mod view;

pub use binder::{Binder, BinderBuilder, BindingError, BindingNotifier, BindingStage, LogNotifier};
pub use binding::{
    global_registry, BindingDeclaration, BindingRecord, BindingRegistry, ChainedDiscovery,
    ConventionDiscovery, DeclaredBindingDiscovery, DiscoveryStrategy, RegistryError,
};
pub use config::{BinderConfig, ConfigError, UsageMode, USAGE_MODE_ENV};
pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget,
};
pub use navigation::Navigator;
pub use presenter::{
    attach_dialog, attach_view, dialog_constructor, global_factory_slot,
    model_constructor, model_dialog_constructor, presenter_factory, set_presenter_factory,
    view_constructor, BoundPresenter, ConstructionError, ConstructionResult,
    DefaultPresenterFactory, DialogPresenter, FactoryConfigError, FactoryOrigin, FactorySlot,
    FromView, Presenter, PresenterConstructor, PresenterFactory, ViewPresenter,
};
pub use type_key::{TypeKey, ViewId};
pub use view::{
    AsAnyView, BorderStyle, DialogResult, DialogSignals, DialogSurface, DialogView, ModelSlot,
    ModelView, PropertyNotifier, Signal, StartPosition, Subscription, View, ViewLifecycle,
    ViewModel, ViewSurface, WindowChrome, WindowState,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
