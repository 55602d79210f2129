//! Value storage layouts.
//!
//! The same collection of `f32` values kept two ways:
//!
//! - [`PackedStore`]: contiguous array of plain structs, iterated with a tight loop.
//! - [`BoxedStore`]: heap allocated values behind shared references, kept in
//!   a set hashed by address.
//!
//! Both implement [`ValueStore`] so a harness can drive either one.

mod boxed;
mod packed;

pub use boxed::{BoxedHandle, BoxedStore};
pub use packed::{FloatComponent, PackedStore};

/// Lookup/iterate interface shared by the storage layouts.
pub trait ValueStore {
    /// Token returned by [`insert`](Self::insert) that identifies a value.
    type Handle;

    fn insert(&mut self, value: f32) -> Self::Handle;

    fn get(&self, handle: &Self::Handle) -> Option<f32>;

    fn contains(&self, handle: &Self::Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Visit every stored value mutably. Order is layout defined.
    fn for_each_mut<F: FnMut(&mut f32)>(&mut self, f: F);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add one to every value.
    fn increment_all(&mut self) {
        self.for_each_mut(|value| *value += 1.0);
    }

    fn sum(&mut self) -> f64 {
        let mut total = 0.0;
        self.for_each_mut(|value| total += *value as f64);
        total
    }
}
