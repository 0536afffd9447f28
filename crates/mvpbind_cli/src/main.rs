//! CLI smoke entry point.
//!
//! # Responsibility
//! - Bind a scripted dialog through the process-wide binder and drive its
//!   lifecycle, printing what the presenter observed.
//! - Keep output deterministic for quick local sanity checks.

use log::info;
use mvpbind_core::{
    dialog_constructor, global_registry, init_stderr_logging, Binder, BinderConfig,
    ConstructionError, DialogPresenter, DialogResult, DialogSignals, DialogSurface, DialogView,
    FromView, View, ViewId, ViewLifecycle, ViewPresenter, WindowChrome,
};
use std::cell::RefCell;
use std::process::ExitCode;
use std::rc::Rc;

struct ConfirmDialog {
    surface: DialogSurface,
    answer: RefCell<String>,
}

impl View for ConfirmDialog {
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

impl DialogView for ConfirmDialog {
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
        self.accept();
        self.surface.hide();
        self.dialog_result()
    }
    fn is_valid(&self) -> bool {
        self.answer.borrow().eq_ignore_ascii_case("yes")
    }
}

struct ConfirmPresenter {
    view: Rc<ConfirmDialog>,
}

impl ViewPresenter for ConfirmPresenter {
    type View = ConfirmDialog;

    fn view(&self) -> &Rc<ConfirmDialog> {
        &self.view
    }
    fn on_view_loaded(&self) {
        println!("presenter loaded chrome={:?}", self.view.chrome());
    }
    fn is_valid(&self) -> bool {
        self.view.is_valid()
    }
}

impl DialogPresenter for ConfirmPresenter {
    fn on_view_accepted(&self) {
        println!("presenter accepted answer={}", self.view.answer.borrow());
    }
    fn on_view_cancelled(&self) {
        println!("presenter cancelled");
    }
}

impl FromView for ConfirmPresenter {
    fn from_view(view: Rc<ConfirmDialog>) -> Result<Self, ConstructionError> {
        Ok(Self { view })
    }
}

fn run() -> Result<(), String> {
    init_stderr_logging(&std::env::var("MVPBIND_LOG").unwrap_or_else(|_| "warn".to_string()))?;
    let config = BinderConfig::from_env().map_err(|err| err.to_string())?;

    global_registry()
        .register::<ConfirmDialog, ConfirmPresenter>(dialog_constructor::<ConfirmPresenter>())
        .map_err(|err| err.to_string())?;

    let binder = Binder::builder().config(config).build();
    let dialog = Rc::new(ConfirmDialog {
        surface: DialogSurface::new(),
        answer: RefCell::new(String::new()),
    });
    let presenter = binder.bind(&dialog);
    println!(
        "usage_mode={} bound={}",
        config.usage_mode.as_str(),
        presenter.is_some()
    );

    dialog.surface.view().load();
    println!("modal result={:?} (blank answer)", dialog.show_modal());
    *dialog.answer.borrow_mut() = "yes".to_string();
    println!("modal result={:?}", dialog.show_modal());
    dialog.cancel();
    dialog.close();

    info!(
        "event=cli_smoke module=cli status=ok version={}",
        mvpbind_core::core_version()
    );
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("mvpbind_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}
