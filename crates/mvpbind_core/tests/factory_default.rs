mod common;

use common::OrderView;
use mvpbind_core::{
    global_factory_slot, global_registry, presenter_factory, set_presenter_factory,
    view_constructor, Binder, ConstructionError, ConstructionResult, DefaultPresenterFactory,
    FactoryConfigError, FactoryOrigin, FromView, Presenter, PresenterFactory, TypeKey, View,
    ViewPresenter,
};
use std::rc::Rc;
use std::sync::Arc;

struct OrderPresenter {
    view: Rc<OrderView>,
}

impl ViewPresenter for OrderPresenter {
    type View = OrderView;

    fn view(&self) -> &Rc<OrderView> {
        &self.view
    }
}

impl FromView for OrderPresenter {
    fn from_view(view: Rc<OrderView>) -> Result<Self, ConstructionError> {
        Ok(Self { view })
    }
}

struct LateFactory;

impl PresenterFactory for LateFactory {
    fn name(&self) -> &'static str {
        "late"
    }

    fn create(
        &self,
        presenter_type: TypeKey,
        _view_type: TypeKey,
        _view: Rc<dyn View>,
    ) -> ConstructionResult {
        Err(ConstructionError::MissingConstructor {
            presenter: presenter_type,
        })
    }

    fn release(&self, _presenter: Rc<dyn Presenter>) -> Result<(), ConstructionError> {
        Ok(())
    }
}

// Process-wide state: keep every step in one test so ordering is fixed.
#[test]
fn first_read_fixes_global_factory_to_default() {
    global_registry()
        .register::<OrderView, OrderPresenter>(view_constructor::<OrderPresenter>())
        .expect("register order presenter globally");

    let view = OrderView::new();
    let presenter = Binder::new()
        .bind(&view)
        .expect("global binder should bind order view");
    assert_eq!(presenter.presenter_type(), TypeKey::of::<OrderPresenter>());

    assert_eq!(presenter_factory().name(), DefaultPresenterFactory::NAME);
    assert_eq!(global_factory_slot().origin(), Some(FactoryOrigin::Defaulted));

    let err = set_presenter_factory(Arc::new(LateFactory))
        .expect_err("set after first use must fail");
    assert_eq!(err, FactoryConfigError::AlreadyDefaulted);
    assert_eq!(presenter_factory().name(), DefaultPresenterFactory::NAME);
}
