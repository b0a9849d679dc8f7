use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::foundation::value::Value;

/// Change handler: `(name, new_value, old_value)`. `old_value` is `None` for a first write.
pub type ChangeHandler = dyn Fn(&str, &Value, Option<&Value>);

struct Registration {
    id: u64,
    handler: Rc<ChangeHandler>,
}

#[derive(Default)]
struct StoreInner {
    values: RefCell<HashMap<String, Value>>,
    listeners: RefCell<HashMap<String, Vec<Registration>>>,
    next_id: Cell<u64>,
}

/// Reactive key/value state with synchronous per-key change notification.
///
/// `StateStore` is a cheap, cloneable handle; clones share the same values and listeners. It is
/// single-threaded by construction (`!Send`).
///
/// Writes compare against the current value and notify only on change. Handlers run
/// synchronously, in registration order, with no internal borrow held, so a handler may write
/// state again. Handlers that write must be idempotent for unchanged values to terminate.
#[derive(Clone, Default)]
pub struct StateStore {
    inner: Rc<StoreInner>,
}

/// Handle identifying one `subscribe` call, used to unsubscribe.
#[derive(Debug)]
#[must_use = "dropping a Subscription keeps the handler registered; pass it to `unsubscribe` to remove it"]
pub struct Subscription {
    id: u64,
    names: Vec<String>,
}

/// Non-owning store handle for handlers that need to read state without keeping it alive.
#[derive(Clone)]
pub struct WeakStateStore {
    inner: Weak<StoreInner>,
}

impl WeakStateStore {
    /// Upgrade back to a full handle if the store still exists.
    pub fn upgrade(&self) -> Option<StateStore> {
        self.inner.upgrade().map(|inner| StateStore { inner })
    }
}

impl StateStore {
    /// Create a store seeded with `initial` values. Seeding does not notify.
    pub fn new<K, V>(initial: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let store = Self::default();
        store.inner.values.borrow_mut().extend(
            initial
                .into_iter()
                .map(|(k, v)| (k.into(), v.into())),
        );
        store
    }

    /// Current value of `name`, if it was ever set.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.inner.values.borrow().get(name).cloned()
    }

    /// Whether `name` holds a value.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.values.borrow().contains_key(name)
    }

    /// Write `value` under `name`.
    ///
    /// Returns `true` if the value changed (and handlers ran), `false` for a no-op write.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> bool {
        let value = value.into();
        let old = {
            let mut values = self.inner.values.borrow_mut();
            if values.get(name) == Some(&value) {
                return false;
            }
            values.insert(name.to_owned(), value.clone())
        };

        let handlers: Vec<Rc<ChangeHandler>> = self
            .inner
            .listeners
            .borrow()
            .get(name)
            .map(|regs| regs.iter().map(|r| Rc::clone(&r.handler)).collect())
            .unwrap_or_default();

        tracing::trace!(name, handlers = handlers.len(), "state changed");
        for handler in handlers {
            handler(name, &value, old.as_ref());
        }
        true
    }

    /// Write several values in order through [`Self::set`].
    pub fn seed<K, V>(&self, values: impl IntoIterator<Item = (K, V)>)
    where
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (k, v) in values {
            self.set(k.as_ref(), v);
        }
    }

    /// Register `handler` for every name in `names`.
    ///
    /// Registrations are additive: several handlers on one name fire in registration order.
    pub fn subscribe<I, S, F>(&self, names: I, handler: F) -> Subscription
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&str, &Value, Option<&Value>) + 'static,
    {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        let handler: Rc<ChangeHandler> = Rc::new(handler);
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        let mut listeners = self.inner.listeners.borrow_mut();
        for name in &names {
            listeners.entry(name.clone()).or_default().push(Registration {
                id,
                handler: Rc::clone(&handler),
            });
        }
        Subscription { id, names }
    }

    /// Remove every registration made by `subscription`.
    pub fn unsubscribe(&self, subscription: Subscription) {
        let mut listeners = self.inner.listeners.borrow_mut();
        for name in &subscription.names {
            if let Some(regs) = listeners.get_mut(name) {
                regs.retain(|r| r.id != subscription.id);
                if regs.is_empty() {
                    listeners.remove(name);
                }
            }
        }
    }

    /// Number of handlers registered for `name`.
    pub fn listener_count(&self, name: &str) -> usize {
        self.inner
            .listeners
            .borrow()
            .get(name)
            .map_or(0, Vec::len)
    }

    /// Non-owning handle, for handlers stored inside this same store.
    pub fn downgrade(&self) -> WeakStateStore {
        WeakStateStore {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore")
            .field("values", &self.inner.values.borrow())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/store.rs"]
mod tests;
