//! Presenter hooks and their wiring onto view signals.
//!
//! # Responsibility
//! - Define the hooks a presenter overrides (`ViewPresenter`, `DialogPresenter`).
//! - Subscribe a freshly constructed presenter to its view's signals.
//!
//! # Invariants
//! - `on_view_created` runs before any subscription exists.
//! - Signal handlers hold `Weak` presenter references; the view never keeps a
//!   presenter alive.
//! - `on_view_accepted` fires only while `is_valid()` holds; cancel is never
//!   gated.

use crate::presenter::BoundPresenter;
use crate::view::{DialogView, ModelView, Subscription, View};
use log::debug;
use std::rc::Rc;

/// A presenter controlling exactly one view for its whole lifetime.
pub trait ViewPresenter: 'static {
    type View: View;

    /// The bound view. Set once at construction, never reassigned.
    fn view(&self) -> &Rc<Self::View>;

    /// Runs during construction, before lifecycle subscription.
    fn on_view_created(&self) {}
    fn on_view_loaded(&self) {}
    fn on_view_activated(&self) {}
    fn on_view_closed(&self) {}

    /// Validity of the presenter's current state. Gates only dialog accept.
    fn is_valid(&self) -> bool {
        true
    }
}

/// Presenter for a modal dialog view.
pub trait DialogPresenter: ViewPresenter<View: DialogView> {
    /// Runs on `loaded`. The default forces the fixed dialog chrome and then
    /// calls `on_view_loaded`; override to change the chrome policy.
    fn on_dialog_loaded(&self) {
        apply_dialog_chrome(&**self.view());
        self.on_view_loaded();
    }

    fn on_view_shown(&self) {}
    fn on_view_accepted(&self) {}
    fn on_view_cancelled(&self) {}
}

/// Single-argument construction from the bound view.
pub trait FromView: ViewPresenter + Sized {
    fn from_view(view: Rc<Self::View>) -> Result<Self, crate::presenter::ConstructionError>;
}

/// Forces the fixed dialog chrome on `view`.
pub fn apply_dialog_chrome<V: DialogView + ?Sized>(view: &V) {
    view.set_chrome(view.chrome().fixed_dialog());
}

/// Assigns a default-constructed model to `view`.
pub fn seed_model<V: ModelView + ?Sized>(view: &V) {
    view.set_model(Rc::new(V::Model::default()));
}

/// Wires `presenter` to the plain view lifecycle (`loaded`, `activated`, `closed`).
pub fn attach_view<P: ViewPresenter>(presenter: P) -> BoundPresenter<P> {
    let presenter = Rc::new(presenter);
    presenter.on_view_created();
    let subscriptions = subscribe_lifecycle(&presenter, P::on_view_loaded);
    BoundPresenter::new(presenter, subscriptions)
}

/// Wires `presenter` to the view lifecycle plus `shown`, `accepted` and
/// `canceled`.
pub fn attach_dialog<P: DialogPresenter>(presenter: P) -> BoundPresenter<P> {
    let presenter = Rc::new(presenter);
    presenter.on_view_created();

    let mut subscriptions = subscribe_lifecycle(&presenter, P::on_dialog_loaded);
    let signals = presenter.view().dialog_signals();
    subscriptions.push(signals.shown.subscribe(forward(&presenter, P::on_view_shown)));
    subscriptions.push(
        signals
            .accepted
            .subscribe(forward(&presenter, accept_when_valid::<P>)),
    );
    subscriptions.push(
        signals
            .canceled
            .subscribe(forward(&presenter, P::on_view_cancelled)),
    );
    BoundPresenter::new(presenter, subscriptions)
}

fn subscribe_lifecycle<P: ViewPresenter>(
    presenter: &Rc<P>,
    on_loaded: fn(&P),
) -> Vec<Subscription> {
    let lifecycle = presenter.view().lifecycle();
    vec![
        lifecycle.loaded.subscribe(forward(presenter, on_loaded)),
        lifecycle
            .activated
            .subscribe(forward(presenter, P::on_view_activated)),
        lifecycle
            .closed
            .subscribe(forward(presenter, P::on_view_closed)),
    ]
}

fn accept_when_valid<P: DialogPresenter>(presenter: &P) {
    if presenter.is_valid() {
        presenter.on_view_accepted();
    } else {
        debug!(
            "event=dialog_accept module=presenter status=rejected view_id={}",
            presenter.view().view_id()
        );
    }
}

fn forward<P: 'static>(presenter: &Rc<P>, hook: fn(&P)) -> impl Fn(&()) + 'static {
    let presenter = Rc::downgrade(presenter);
    move |_: &()| {
        if let Some(presenter) = presenter.upgrade() {
            hook(&presenter);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{attach_dialog, attach_view, DialogPresenter, ViewPresenter};
    use crate::type_key::ViewId;
    use crate::view::{
        DialogResult, DialogSignals, DialogSurface, DialogView, View, ViewLifecycle,
        ViewSurface, WindowChrome,
    };
    use std::cell::RefCell;
    use std::rc::Rc;

    struct PanelView {
        surface: ViewSurface,
    }

    impl View for PanelView {
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

    struct PanelPresenter {
        view: Rc<PanelView>,
        calls: Rc<RefCell<Vec<&'static str>>>,
    }

    impl ViewPresenter for PanelPresenter {
        type View = PanelView;

        fn view(&self) -> &Rc<PanelView> {
            &self.view
        }
        fn on_view_created(&self) {
            let subscribers = self.view.lifecycle().loaded.subscriber_count();
            assert_eq!(subscribers, 0, "created hook must run before wiring");
            self.calls.borrow_mut().push("created");
        }
        fn on_view_loaded(&self) {
            self.calls.borrow_mut().push("loaded");
        }
        fn on_view_activated(&self) {
            self.calls.borrow_mut().push("activated");
        }
        fn on_view_closed(&self) {
            self.calls.borrow_mut().push("closed");
        }
    }

    struct NoteDialog {
        surface: DialogSurface,
    }

    impl View for NoteDialog {
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

    impl DialogView for NoteDialog {
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
            self.surface.result()
        }
    }

    struct KeepChromePresenter {
        view: Rc<NoteDialog>,
    }

    impl ViewPresenter for KeepChromePresenter {
        type View = NoteDialog;

        fn view(&self) -> &Rc<NoteDialog> {
            &self.view
        }
    }

    impl DialogPresenter for KeepChromePresenter {
        fn on_dialog_loaded(&self) {
            self.on_view_loaded();
        }
    }

    #[test]
    fn plain_presenter_receives_lifecycle_in_order() {
        let view = Rc::new(PanelView {
            surface: ViewSurface::new(),
        });
        let calls = Rc::new(RefCell::new(Vec::new()));
        let bound = attach_view(PanelPresenter {
            view: Rc::clone(&view),
            calls: Rc::clone(&calls),
        });

        view.surface.load();
        view.surface.activate();
        view.surface.activate();
        view.surface.close();

        assert_eq!(
            *calls.borrow(),
            vec!["created", "loaded", "activated", "activated", "closed"]
        );
        drop(bound);
    }

    #[test]
    fn dropping_bound_presenter_detaches_handlers() {
        let view = Rc::new(PanelView {
            surface: ViewSurface::new(),
        });
        let calls = Rc::new(RefCell::new(Vec::new()));
        let bound = attach_view(PanelPresenter {
            view: Rc::clone(&view),
            calls: Rc::clone(&calls),
        });
        assert_eq!(view.lifecycle().loaded.subscriber_count(), 1);

        drop(bound);
        view.surface.load();

        assert_eq!(view.lifecycle().loaded.subscriber_count(), 0);
        assert_eq!(*calls.borrow(), vec!["created"]);
    }

    #[test]
    fn overriding_dialog_loaded_hook_skips_chrome_policy() {
        let view = Rc::new(NoteDialog {
            surface: DialogSurface::new(),
        });
        let _bound = attach_dialog(KeepChromePresenter {
            view: Rc::clone(&view),
        });

        view.surface.view().load();
        assert_eq!(view.chrome(), WindowChrome::default());
    }
}
