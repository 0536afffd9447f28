//! Embeddable view state for host view types.
//!
//! Host view types hold a `ViewSurface` (or `DialogSurface`) and forward the
//! `View`/`DialogView` trait methods to it. The surface owns the signals and
//! raises them the way host base views do: lifecycle signals are suppressed
//! while the surface is in design mode.

use crate::type_key::{new_view_id, ViewId};
use crate::view::{DialogResult, DialogSignals, ViewLifecycle, WindowChrome};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Identity, visibility and lifecycle signals of one view.
#[derive(Debug)]
pub struct ViewSurface {
    id: ViewId,
    lifecycle: ViewLifecycle,
    visible: Cell<bool>,
    design_mode: bool,
}

impl ViewSurface {
    pub fn new() -> Self {
        Self {
            id: new_view_id(),
            lifecycle: ViewLifecycle::default(),
            visible: Cell::new(false),
            design_mode: false,
        }
    }

    /// Surface hosted by a visual designer; lifecycle signals never fire.
    pub fn for_designer() -> Self {
        Self {
            design_mode: true,
            ..Self::new()
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn lifecycle(&self) -> &ViewLifecycle {
        &self.lifecycle
    }

    pub fn is_design_mode(&self) -> bool {
        self.design_mode
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }

    /// Raises `loaded` unless in design mode.
    pub fn load(&self) {
        if self.design_mode {
            return;
        }
        self.lifecycle.loaded.raise();
    }

    /// Raises `activated` unless in design mode.
    pub fn activate(&self) {
        if self.design_mode {
            return;
        }
        self.lifecycle.activated.raise();
    }

    /// Hides the view and raises `closed` unless in design mode.
    pub fn close(&self) {
        self.visible.set(false);
        if self.design_mode {
            return;
        }
        self.lifecycle.closed.raise();
    }
}

impl Default for ViewSurface {
    fn default() -> Self {
        Self::new()
    }
}

/// `ViewSurface` plus dialog signals, chrome and modal result.
#[derive(Debug, Default)]
pub struct DialogSurface {
    view: ViewSurface,
    signals: DialogSignals,
    chrome: Cell<WindowChrome>,
    result: Cell<DialogResult>,
}

impl DialogSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_designer() -> Self {
        Self {
            view: ViewSurface::for_designer(),
            ..Self::default()
        }
    }

    pub fn view(&self) -> &ViewSurface {
        &self.view
    }

    pub fn signals(&self) -> &DialogSignals {
        &self.signals
    }

    pub fn chrome(&self) -> WindowChrome {
        self.chrome.get()
    }

    pub fn set_chrome(&self, chrome: WindowChrome) {
        self.chrome.set(chrome);
    }

    pub fn result(&self) -> DialogResult {
        self.result.get()
    }

    pub fn set_result(&self, result: DialogResult) {
        self.result.set(result);
    }

    /// Makes the dialog visible and raises `shown`.
    pub fn show(&self) {
        self.view.set_visible(true);
        if !self.view.is_design_mode() {
            self.signals.shown.raise();
        }
    }

    pub fn hide(&self) {
        self.view.set_visible(false);
    }

    pub fn close(&self) {
        self.view.close();
    }
}

/// Holder for a view's typed model reference.
#[derive(Debug)]
pub struct ModelSlot<M> {
    model: RefCell<Option<Rc<M>>>,
}

impl<M> ModelSlot<M> {
    pub fn new() -> Self {
        Self {
            model: RefCell::new(None),
        }
    }

    pub fn get(&self) -> Option<Rc<M>> {
        self.model.borrow().clone()
    }

    pub fn set(&self, model: Rc<M>) {
        *self.model.borrow_mut() = Some(model);
    }
}

impl<M> Default for ModelSlot<M> {
    fn default() -> Self {
        Self::new()
    }
}
