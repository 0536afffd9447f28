//! Modal navigation between dialog views.

use crate::view::{DialogResult, DialogView};
use log::info;
use std::any::Any;
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Shows dialogs modally and keeps the argument of the last navigation.
///
/// The target dialog's presenter reads the argument through `args`.
#[derive(Default)]
pub struct Navigator {
    args: RefCell<Option<Rc<dyn Any>>>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `args`, shows `view` modally and returns its result.
    pub fn navigate_to<V: DialogView + ?Sized>(
        &self,
        view: &V,
        args: Option<Rc<dyn Any>>,
    ) -> DialogResult {
        *self.args.borrow_mut() = args;
        let result = view.show_modal();
        info!(
            "event=navigate module=navigation status=ok view_id={} result={:?}",
            view.view_id(),
            result
        );
        result
    }

    /// Argument passed to the last `navigate_to` call.
    pub fn args(&self) -> Option<Rc<dyn Any>> {
        self.args.borrow().clone()
    }

    /// Last argument, when it is a `T`.
    pub fn args_as<T: 'static>(&self) -> Option<Rc<T>> {
        self.args().and_then(|args| args.downcast::<T>().ok())
    }
}

impl Debug for Navigator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("has_args", &self.args.borrow().is_some())
            .finish()
    }
}
