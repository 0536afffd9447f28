#![allow(dead_code)]

use mvpbind_core::{
    DialogResult, DialogSignals, DialogSurface, DialogView, ModelSlot, ModelView,
    PropertyNotifier, View, ViewId, ViewLifecycle, ViewModel, ViewSurface, WindowChrome,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

macro_rules! plain_view {
    ($name:ident) => {
        pub struct $name {
            surface: ViewSurface,
        }

        impl $name {
            pub fn new() -> Rc<Self> {
                Rc::new(Self {
                    surface: ViewSurface::new(),
                })
            }

            pub fn surface(&self) -> &ViewSurface {
                &self.surface
            }
        }

        impl View for $name {
            fn view_id(&self) -> ViewId {
                self.surface.id()
            }
            fn lifecycle(&self) -> &ViewLifecycle {
                self.surface.lifecycle()
            }
            fn is_visible(&self) -> bool {
                self.surface.is_visible()
            }
            fn set_visible(&self, visible: bool) {
                self.surface.set_visible(visible);
            }
        }
    };
}

plain_view!(OrderView);
plain_view!(ShippingView);
plain_view!(ArchiveView);

#[derive(Default)]
pub struct LoginModel {
    notifier: PropertyNotifier,
    user_name: RefCell<String>,
}

impl LoginModel {
    pub fn user_name(&self) -> String {
        self.user_name.borrow().clone()
    }

    pub fn set_user_name(&self, value: &str) -> bool {
        self.notifier
            .update(&self.user_name, value.to_string(), "user_name")
    }
}

impl ViewModel for LoginModel {
    fn notifier(&self) -> &PropertyNotifier {
        &self.notifier
    }
}

/// Dialog fixture. `show_modal` dismisses itself with the scripted outcome.
pub struct LoginDialog {
    surface: DialogSurface,
    model: ModelSlot<LoginModel>,
    user_name: RefCell<String>,
    scripted: Cell<DialogResult>,
}

impl LoginDialog {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            surface: DialogSurface::new(),
            model: ModelSlot::new(),
            user_name: RefCell::new(String::new()),
            scripted: Cell::new(DialogResult::Cancel),
        })
    }

    pub fn surface(&self) -> &DialogSurface {
        &self.surface
    }

    pub fn type_user_name(&self, value: &str) {
        *self.user_name.borrow_mut() = value.to_string();
    }

    pub fn script_outcome(&self, outcome: DialogResult) {
        self.scripted.set(outcome);
    }
}

impl View for LoginDialog {
    fn view_id(&self) -> ViewId {
        self.surface.view().id()
    }
    fn lifecycle(&self) -> &ViewLifecycle {
        self.surface.view().lifecycle()
    }
    fn is_visible(&self) -> bool {
        self.surface.view().is_visible()
    }
    fn set_visible(&self, visible: bool) {
        self.surface.view().set_visible(visible);
    }
}

impl DialogView for LoginDialog {
    fn dialog_signals(&self) -> &DialogSignals {
        self.surface.signals()
    }
    fn chrome(&self) -> WindowChrome {
        self.surface.chrome()
    }
    fn set_chrome(&self, chrome: WindowChrome) {
        self.surface.set_chrome(chrome);
    }
    fn dialog_result(&self) -> DialogResult {
        self.surface.result()
    }
    fn set_dialog_result(&self, result: DialogResult) {
        self.surface.set_result(result);
    }
    fn show(&self) {
        self.surface.show();
    }
    fn hide(&self) {
        self.surface.hide();
    }
    fn close(&self) {
        self.surface.close();
    }

    fn show_modal(&self) -> DialogResult {
        self.surface.show();
        match self.scripted.get() {
            DialogResult::Ok => self.accept(),
            DialogResult::Cancel => self.cancel(),
            other => self.set_dialog_result(other),
        }
        self.surface.hide();
        self.dialog_result()
    }

    fn is_valid(&self) -> bool {
        !self.user_name.borrow().trim().is_empty()
    }
}

impl ModelView for LoginDialog {
    type Model = LoginModel;

    fn model(&self) -> Option<Rc<LoginModel>> {
        self.model.get()
    }

    fn set_model(&self, model: Rc<LoginModel>) {
        self.model.set(model);
    }
}
