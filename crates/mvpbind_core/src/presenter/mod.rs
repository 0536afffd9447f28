//! Presenters and their construction.
//!
//! # Responsibility
//! - Define the erased `Presenter` handle the binder hands back to hosts.
//! - Build typed presenters from erased view instances.
//!
//! # Invariants
//! - A bound presenter references exactly one view, fixed at construction.
//! - A constructor never subscribes anything when the view type is wrong.
//! - Model-typed constructors assign the model before `on_view_created`.
//!
//! # See also
//! - `factory` for the pluggable construction strategy.

pub mod factory;
pub mod lifecycle;

use crate::type_key::{TypeKey, ViewId};
use crate::view::{AsAnyView, ModelView, Subscription, View};
use std::any::Any;
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;
use std::sync::Arc;

pub use factory::{
    global_factory_slot, presenter_factory, set_presenter_factory, DefaultPresenterFactory,
    FactoryConfigError, FactoryOrigin, FactorySlot, PresenterFactory,
};
pub use lifecycle::{
    apply_dialog_chrome, attach_dialog, attach_view, seed_model, DialogPresenter, FromView,
    ViewPresenter,
};

/// Erased handle to a live presenter bound to one view.
pub trait Presenter {
    fn presenter_type(&self) -> TypeKey;
    fn view_id(&self) -> ViewId;
    /// Whether the presenter still listens to its view.
    fn is_attached(&self) -> bool;
    /// Deregisters every view subscription. Idempotent.
    fn detach(&self);
    fn as_any(&self) -> &dyn Any;
}

impl dyn Presenter {
    /// Returns the typed presenter when this handle wraps a `P`.
    pub fn downcast<P: 'static>(&self) -> Option<Rc<P>> {
        self.as_any()
            .downcast_ref::<BoundPresenter<P>>()
            .map(|bound| Rc::clone(bound.presenter()))
    }
}

impl Debug for dyn Presenter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Presenter")
            .field("presenter_type", &self.presenter_type().name())
            .field("view_id", &self.view_id())
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// A typed presenter plus the subscriptions tying it to its view.
pub struct BoundPresenter<P> {
    presenter: Rc<P>,
    view_id: ViewId,
    subscriptions: RefCell<Vec<Subscription>>,
}

impl<P: lifecycle::ViewPresenter> BoundPresenter<P> {
    pub(crate) fn new(presenter: Rc<P>, subscriptions: Vec<Subscription>) -> Self {
        let view_id = presenter.view().view_id();
        Self {
            presenter,
            view_id,
            subscriptions: RefCell::new(subscriptions),
        }
    }
}

impl<P> BoundPresenter<P> {
    pub fn presenter(&self) -> &Rc<P> {
        &self.presenter
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.borrow().len()
    }
}

impl<P: 'static> Presenter for BoundPresenter<P> {
    fn presenter_type(&self) -> TypeKey {
        TypeKey::of::<P>()
    }

    fn view_id(&self) -> ViewId {
        self.view_id
    }

    fn is_attached(&self) -> bool {
        self.subscriptions
            .borrow()
            .iter()
            .any(Subscription::is_active)
    }

    fn detach(&self) {
        self.subscriptions.borrow_mut().clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Presenter construction failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// No constructor is registered for the presenter type.
    MissingConstructor { presenter: TypeKey },
    /// The view instance is not the view type the presenter accepts.
    ViewTypeMismatch {
        presenter: TypeKey,
        expected: TypeKey,
        actual: TypeKey,
    },
    /// The presenter's own constructor refused the view.
    Rejected { presenter: TypeKey, reason: String },
    /// The factory does not manage presenter release.
    ReleaseUnsupported { factory: &'static str },
}

impl ConstructionError {
    /// Rejection raised from inside `P`'s constructor.
    pub fn rejected<P: 'static>(reason: impl Into<String>) -> Self {
        Self::Rejected {
            presenter: TypeKey::of::<P>(),
            reason: reason.into(),
        }
    }
}

impl Display for ConstructionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingConstructor { presenter } => {
                write!(f, "no constructor registered for presenter {presenter}")
            }
            Self::ViewTypeMismatch {
                presenter,
                expected,
                actual,
            } => write!(
                f,
                "presenter {presenter} expects view {expected} but was given {actual}"
            ),
            Self::Rejected { presenter, reason } => {
                write!(f, "presenter {presenter} construction failed: {reason}")
            }
            Self::ReleaseUnsupported { factory } => {
                write!(f, "presenter factory `{factory}` does not support release")
            }
        }
    }
}

impl Error for ConstructionError {}

pub type ConstructionResult = Result<Rc<dyn Presenter>, ConstructionError>;

/// Builds an erased presenter for an erased view instance.
pub type PresenterConstructor = Arc<dyn Fn(Rc<dyn View>) -> ConstructionResult + Send + Sync>;

/// Constructor wiring `P` to the plain view lifecycle.
pub fn view_constructor<P: FromView>() -> PresenterConstructor {
    Arc::new(|view: Rc<dyn View>| -> ConstructionResult {
        let view = downcast_view::<P>(view)?;
        let presenter = P::from_view(view)?;
        Ok(Rc::new(attach_view(presenter)) as Rc<dyn Presenter>)
    })
}

/// Constructor wiring `P` to the dialog lifecycle.
pub fn dialog_constructor<P: FromView + DialogPresenter>() -> PresenterConstructor {
    Arc::new(|view: Rc<dyn View>| -> ConstructionResult {
        let view = downcast_view::<P>(view)?;
        let presenter = P::from_view(view)?;
        Ok(Rc::new(attach_dialog(presenter)) as Rc<dyn Presenter>)
    })
}

/// Like [`view_constructor`], seeding the view's model once `P` is built and
/// before any hook runs. A rejected construction leaves the model untouched.
pub fn model_constructor<P>() -> PresenterConstructor
where
    P: FromView,
    P::View: ModelView,
{
    Arc::new(|view: Rc<dyn View>| -> ConstructionResult {
        let view = downcast_view::<P>(view)?;
        let presenter = P::from_view(view)?;
        seed_model(&**presenter.view());
        Ok(Rc::new(attach_view(presenter)) as Rc<dyn Presenter>)
    })
}

/// Like [`dialog_constructor`], seeding the view's model before any hook runs.
pub fn model_dialog_constructor<P>() -> PresenterConstructor
where
    P: FromView + DialogPresenter,
    P::View: ModelView,
{
    Arc::new(|view: Rc<dyn View>| -> ConstructionResult {
        let view = downcast_view::<P>(view)?;
        let presenter = P::from_view(view)?;
        seed_model(&**presenter.view());
        Ok(Rc::new(attach_dialog(presenter)) as Rc<dyn Presenter>)
    })
}

fn downcast_view<P: ViewPresenter>(view: Rc<dyn View>) -> Result<Rc<P::View>, ConstructionError> {
    let actual = (*view).type_key();
    view.into_any_rc()
        .downcast::<P::View>()
        .map_err(|_| ConstructionError::ViewTypeMismatch {
            presenter: TypeKey::of::<P>(),
            expected: TypeKey::of::<P::View>(),
            actual,
        })
}
