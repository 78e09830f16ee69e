//! Synchronous observer lists.

/// Callbacks invoked in registration order with a copy of the event value.
pub struct ObserverList<T> {
    observers: Vec<Box<dyn FnMut(T)>>,
}

impl<T> Default for ObserverList<T> {
    fn default() -> Self {
        Self {
            observers: Vec::new(),
        }
    }
}

impl<T: Copy> ObserverList<T> {
    pub fn add(&mut self, observer: impl FnMut(T) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn notify(&mut self, value: T) {
        for observer in &mut self.observers {
            observer(value);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl<T> std::fmt::Debug for ObserverList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverList")
            .field("len", &self.observers.len())
            .finish()
    }
}
