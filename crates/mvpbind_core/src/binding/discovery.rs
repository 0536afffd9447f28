//! Presenter discovery strategies.
//!
//! # Responsibility
//! - Map a view instance to at most one `BindingRecord`.
//!
//! # Invariants
//! - Discovery is a pure lookup with no side effects on the view.
//! - Records always carry the view's concrete type, not a declared one.

use crate::binding::record::BindingRecord;
use crate::binding::registry::{global_registry, BindingRegistry};
use crate::view::{AsAnyView, View};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::rc::Rc;
use std::sync::Arc;

static VIEW_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<stem>[A-Za-z_][A-Za-z0-9_]*?)(?:View|Form|Dialog|Control)$")
        .expect("valid view suffix regex")
});

/// Finds the presenter binding of a view instance.
pub trait DiscoveryStrategy {
    /// Returns the binding for `view`, or `None` when the view is unbound.
    fn get_binding(&self, view: &Rc<dyn View>) -> Option<BindingRecord>;
}

/// Reads bindings declared in a `BindingRegistry`.
///
/// When a view type carries several declarations only the first is used.
#[derive(Debug, Clone)]
pub struct DeclaredBindingDiscovery {
    registry: Arc<BindingRegistry>,
}

impl DeclaredBindingDiscovery {
    pub fn new(registry: Arc<BindingRegistry>) -> Self {
        Self { registry }
    }

    /// Discovery over the process-wide registry.
    pub fn global() -> Self {
        Self::new(global_registry())
    }
}

impl DiscoveryStrategy for DeclaredBindingDiscovery {
    fn get_binding(&self, view: &Rc<dyn View>) -> Option<BindingRecord> {
        let view_type = (**view).type_key();
        let (declaration, ignored) = self.registry.first_declaration(view_type)?;
        if ignored > 0 {
            // Extra declarations are reported, never bound.
            warn!(
                "event=discovery module=discovery status=ambiguous view_type={} used={} ignored={}",
                view_type, declaration.presenter_type, ignored
            );
        }
        Some(BindingRecord::new(
            declaration.presenter_type,
            view_type,
            Rc::clone(view),
        ))
    }
}

/// Name-based discovery: `OrderView` binds to a registered `OrderPresenter`.
///
/// Recognised view suffixes are `View`, `Form`, `Dialog` and `Control`.
#[derive(Debug, Clone)]
pub struct ConventionDiscovery {
    registry: Arc<BindingRegistry>,
}

impl ConventionDiscovery {
    pub fn new(registry: Arc<BindingRegistry>) -> Self {
        Self { registry }
    }

    /// Presenter type name expected for `view_name`, if it follows the convention.
    pub fn presenter_name_for(view_name: &str) -> Option<String> {
        let captures = VIEW_SUFFIX_RE.captures(view_name)?;
        Some(format!("{}Presenter", &captures["stem"]))
    }
}

impl DiscoveryStrategy for ConventionDiscovery {
    fn get_binding(&self, view: &Rc<dyn View>) -> Option<BindingRecord> {
        let view_type = (**view).type_key();
        let presenter_name = Self::presenter_name_for(view_type.short_name())?;
        let presenter_type = self.registry.find_presenter_by_name(&presenter_name)?;
        debug!(
            "event=discovery module=discovery status=ok strategy=convention view_type={} presenter={}",
            view_type, presenter_type
        );
        Some(BindingRecord::new(presenter_type, view_type, Rc::clone(view)))
    }
}

/// Tries each strategy in order; the first record found wins.
#[derive(Default)]
pub struct ChainedDiscovery {
    strategies: Vec<Box<dyn DiscoveryStrategy>>,
}

impl ChainedDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, strategy: impl DiscoveryStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }
}

impl DiscoveryStrategy for ChainedDiscovery {
    fn get_binding(&self, view: &Rc<dyn View>) -> Option<BindingRecord> {
        self.strategies
            .iter()
            .find_map(|strategy| strategy.get_binding(view))
    }
}

#[cfg(test)]
mod tests {
    use super::ConventionDiscovery;

    #[test]
    fn convention_maps_known_suffixes() {
        assert_eq!(
            ConventionDiscovery::presenter_name_for("OrderView").as_deref(),
            Some("OrderPresenter")
        );
        assert_eq!(
            ConventionDiscovery::presenter_name_for("LoginDialog").as_deref(),
            Some("LoginPresenter")
        );
        assert_eq!(
            ConventionDiscovery::presenter_name_for("SettingsForm").as_deref(),
            Some("SettingsPresenter")
        );
    }

    #[test]
    fn convention_rejects_names_without_suffix_or_stem() {
        assert_eq!(ConventionDiscovery::presenter_name_for("Order"), None);
        assert_eq!(ConventionDiscovery::presenter_name_for("View"), None);
        assert_eq!(ConventionDiscovery::presenter_name_for("Order-View"), None);
    }
}
