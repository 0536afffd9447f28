//! Binding record value object.

use crate::type_key::{TypeKey, ViewId};
use crate::view::View;
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// "Presenter type `P`, for view type `V`, attached to this view instance."
///
/// # Invariants
/// - Fields are fixed at construction.
/// - Equality is structural over all three fields; view instances compare by
///   `ViewId`.
#[derive(Clone)]
pub struct BindingRecord {
    presenter_type: TypeKey,
    view_type: TypeKey,
    view: Rc<dyn View>,
}

impl BindingRecord {
    pub fn new(presenter_type: TypeKey, view_type: TypeKey, view: Rc<dyn View>) -> Self {
        Self {
            presenter_type,
            view_type,
            view,
        }
    }

    pub fn presenter_type(&self) -> TypeKey {
        self.presenter_type
    }

    pub fn view_type(&self) -> TypeKey {
        self.view_type
    }

    pub fn view(&self) -> &Rc<dyn View> {
        &self.view
    }

    pub fn view_id(&self) -> ViewId {
        self.view.view_id()
    }
}

impl PartialEq for BindingRecord {
    fn eq(&self, other: &Self) -> bool {
        self.presenter_type == other.presenter_type
            && self.view_type == other.view_type
            && self.view_id() == other.view_id()
    }
}

impl Eq for BindingRecord {}

impl Hash for BindingRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.presenter_type.hash(state);
        self.view_type.hash(state);
        self.view_id().hash(state);
    }
}

impl Debug for BindingRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingRecord")
            .field("presenter_type", &self.presenter_type.name())
            .field("view_type", &self.view_type.name())
            .field("view_id", &self.view_id())
            .finish()
    }
}
