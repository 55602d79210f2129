use std::cell::Cell;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use rustc_hash::FxHashSet;

use super::ValueStore;

/// Shared reference to a heap allocated value. Equality and hashing go by
/// address, not by value.
#[derive(Clone, Debug)]
pub struct BoxedHandle(Rc<Cell<f32>>);

impl BoxedHandle {
    pub fn new(value: f32) -> Self {
        Self(Rc::new(Cell::new(value)))
    }

    pub fn value(&self) -> f32 {
        self.0.get()
    }
}

impl PartialEq for BoxedHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for BoxedHandle {}

impl Hash for BoxedHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.0).hash(state);
    }
}

/// Set of [`BoxedHandle`]s. Lookups hash the handle's address; iteration
/// chases one pointer per value.
#[derive(Debug, Default)]
pub struct BoxedStore {
    values: FxHashSet<BoxedHandle>,
}

impl BoxedStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
        }
    }
}

impl ValueStore for BoxedStore {
    type Handle = BoxedHandle;

    fn insert(&mut self, value: f32) -> BoxedHandle {
        let handle = BoxedHandle::new(value);
        self.values.insert(handle.clone());
        handle
    }

    fn get(&self, handle: &BoxedHandle) -> Option<f32> {
        self.values.get(handle).map(BoxedHandle::value)
    }

    fn for_each_mut<F: FnMut(&mut f32)>(&mut self, mut f: F) {
        for handle in &self.values {
            let mut value = handle.0.get();
            f(&mut value);
            handle.0.set(value);
        }
    }

    fn len(&self) -> usize {
        self.values.len()
    }
}
