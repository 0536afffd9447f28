//! View capability surface consumed by presenters.
//!
//! # Responsibility
//! - Define what a presenter may observe and drive on a view.
//! - Keep host UI toolkit details behind trait seams.
//!
//! # Invariants
//! - One live view object per `ViewId`; lifetime is owned by the host.
//! - Views are UI-thread affine and shared as `Rc`.
//!
//! # See also
//! - `presenter` for the hooks wired onto these signals.

pub mod model;
pub mod signal;
pub mod surface;

use crate::type_key::{TypeKey, ViewId};
use std::any::Any;
use std::rc::Rc;

pub use model::{PropertyNotifier, ViewModel};
pub use signal::{Signal, Subscription};
pub use surface::{DialogSurface, ModelSlot, ViewSurface};

/// Concrete-type access for view trait objects.
///
/// Blanket-implemented for every `'static` type; view authors never
/// implement it by hand.
pub trait AsAnyView: Any {
    fn as_any(&self) -> &dyn Any;
    fn into_any_rc(self: Rc<Self>) -> Rc<dyn Any>;
    /// Key of the concrete type behind the trait object.
    fn type_key(&self) -> TypeKey;
}

impl<T: Any> AsAnyView for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any_rc(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }

    fn type_key(&self) -> TypeKey {
        TypeKey::of::<T>()
    }
}

/// Lifecycle signals every view exposes.
#[derive(Debug, Default)]
pub struct ViewLifecycle {
    pub loaded: Signal,
    pub activated: Signal,
    pub closed: Signal,
}

/// Extra signals raised by modal dialog views.
#[derive(Debug, Default)]
pub struct DialogSignals {
    pub shown: Signal,
    pub accepted: Signal,
    pub canceled: Signal,
}

/// A view instance that can be bound to one presenter.
pub trait View: AsAnyView {
    fn view_id(&self) -> ViewId;
    fn lifecycle(&self) -> &ViewLifecycle;
    fn is_visible(&self) -> bool;
    fn set_visible(&self, visible: bool);
}

/// A view that owns a typed model slot.
pub trait ModelView: View {
    type Model: ViewModel + Default + 'static;

    fn model(&self) -> Option<Rc<Self::Model>>;
    fn set_model(&self, model: Rc<Self::Model>);
}

/// Modal outcome reported by a dialog view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogResult {
    #[default]
    None,
    Ok,
    Cancel,
    Abort,
    Retry,
    Ignore,
    Yes,
    No,
}

/// Initial placement of a dialog window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartPosition {
    Manual,
    CenterScreen,
    #[default]
    DefaultLocation,
    CenterParent,
}

/// Window border style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    None,
    FixedSingle,
    Fixed3D,
    FixedDialog,
    #[default]
    Sizable,
    FixedToolWindow,
    SizableToolWindow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

/// Window chrome properties a dialog presenter may force.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowChrome {
    pub minimize_box: bool,
    pub maximize_box: bool,
    pub control_box: bool,
    pub top_most: bool,
    pub start_position: StartPosition,
    pub border_style: BorderStyle,
    pub window_state: WindowState,
}

impl WindowChrome {
    /// Fixed dialog policy: no minimize/maximize, centered on screen,
    /// fixed single border. Other properties are kept.
    pub fn fixed_dialog(self) -> Self {
        Self {
            minimize_box: false,
            maximize_box: false,
            start_position: StartPosition::CenterScreen,
            border_style: BorderStyle::FixedSingle,
            ..self
        }
    }
}

impl Default for WindowChrome {
    fn default() -> Self {
        Self {
            minimize_box: true,
            maximize_box: true,
            control_box: true,
            top_most: false,
            start_position: StartPosition::default(),
            border_style: BorderStyle::default(),
            window_state: WindowState::default(),
        }
    }
}

/// A view shown as a modal dialog.
pub trait DialogView: View {
    fn dialog_signals(&self) -> &DialogSignals;
    fn chrome(&self) -> WindowChrome;
    fn set_chrome(&self, chrome: WindowChrome);
    fn dialog_result(&self) -> DialogResult;
    fn set_dialog_result(&self, result: DialogResult);

    fn show(&self);
    fn hide(&self);
    fn close(&self);

    /// Shows the dialog modally and returns its result once dismissed.
    fn show_modal(&self) -> DialogResult;

    /// View-side validity of the current field values.
    fn is_valid(&self) -> bool {
        true
    }

    /// Records `Ok` and raises `accepted`.
    fn accept(&self) {
        self.set_dialog_result(DialogResult::Ok);
        self.dialog_signals().accepted.raise();
    }

    /// Records `Cancel` and raises `canceled`.
    fn cancel(&self) {
        self.set_dialog_result(DialogResult::Cancel);
        self.dialog_signals().canceled.raise();
    }
}

#[cfg(test)]
mod tests {
    use super::{BorderStyle, StartPosition, WindowChrome, WindowState};

    #[test]
    fn fixed_dialog_policy_keeps_unrelated_properties() {
        let chrome = WindowChrome {
            top_most: true,
            window_state: WindowState::Maximized,
            ..WindowChrome::default()
        }
        .fixed_dialog();

        assert!(!chrome.minimize_box);
        assert!(!chrome.maximize_box);
        assert!(chrome.control_box);
        assert!(chrome.top_most);
        assert_eq!(chrome.start_position, StartPosition::CenterScreen);
        assert_eq!(chrome.border_style, BorderStyle::FixedSingle);
        assert_eq!(chrome.window_state, WindowState::Maximized);
    }
}
