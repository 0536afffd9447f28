//! Change-notifying view model support.

use crate::view::signal::{Signal, Subscription};
use std::cell::RefCell;

/// A data holder exposed through a view and owned by its presenter.
pub trait ViewModel {
    fn notifier(&self) -> &PropertyNotifier;
}

/// Raises the name of each property that received a new value.
#[derive(Debug, Default)]
pub struct PropertyNotifier {
    changed: Signal<str>,
}

impl PropertyNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: impl Fn(&str) + 'static) -> Subscription {
        self.changed.subscribe(handler)
    }

    pub fn notify(&self, property: &str) {
        self.changed.raise_with(property);
    }

    /// Stores `value` into `slot` and notifies `property` when it changed.
    ///
    /// Returns whether a notification was raised.
    pub fn update<T: PartialEq>(&self, slot: &RefCell<T>, value: T, property: &str) -> bool {
        {
            let mut current = slot.borrow_mut();
            if *current == value {
                return false;
            }
            *current = value;
        }
        self.notify(property);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::PropertyNotifier;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn update_notifies_only_on_change() {
        let notifier = PropertyNotifier::new();
        let seen = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = Rc::clone(&seen);
        let _guard = notifier.subscribe(move |name| sink.borrow_mut().push(name.to_string()));

        let user_name = RefCell::new(String::new());
        assert!(notifier.update(&user_name, "ada".to_string(), "user_name"));
        assert!(!notifier.update(&user_name, "ada".to_string(), "user_name"));

        assert_eq!(*seen.borrow(), vec!["user_name".to_string()]);
        assert_eq!(user_name.borrow().as_str(), "ada");
    }
}
