use super::ValueStore;

/// A single float wrapped as a plain component (4 bytes).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FloatComponent {
    pub value: f32,
}

/// Contiguous array of [`FloatComponent`]s. Handles are indices.
#[derive(Clone, Debug, Default)]
pub struct PackedStore {
    components: Vec<FloatComponent>,
}

impl PackedStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            components: Vec::with_capacity(capacity),
        }
    }

    /// Index of the first component equal to `value`, by linear scan.
    pub fn find(&self, value: f32) -> Option<usize> {
        self.components.iter().position(|c| c.value == value)
    }

    pub fn as_slice(&self) -> &[FloatComponent] {
        &self.components
    }

    /// Raw buffer, for chunked parallel updates.
    pub fn as_mut_slice(&mut self) -> &mut [FloatComponent] {
        &mut self.components
    }
}

impl FromIterator<f32> for PackedStore {
    fn from_iter<I: IntoIterator<Item = f32>>(iter: I) -> Self {
        Self {
            components: iter.into_iter().map(|value| FloatComponent { value }).collect(),
        }
    }
}

impl ValueStore for PackedStore {
    type Handle = usize;

    fn insert(&mut self, value: f32) -> usize {
        self.components.push(FloatComponent { value });
        self.components.len() - 1
    }

    fn get(&self, handle: &usize) -> Option<f32> {
        self.components.get(*handle).map(|c| c.value)
    }

    #[inline]
    fn for_each_mut<F: FnMut(&mut f32)>(&mut self, mut f: F) {
        for component in &mut self.components {
            f(&mut component.value);
        }
    }

    fn len(&self) -> usize {
        self.components.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn component_is_a_bare_float() {
        assert_eq!(size_of::<FloatComponent>(), 4);
    }

    #[test]
    fn find_scans_by_value() {
        let store: PackedStore = [3.0, 7.5, 7.5].into_iter().collect();
        assert_eq!(store.find(7.5), Some(1));
        assert_eq!(store.find(1.0), None);
    }

    #[test]
    fn unknown_index_is_not_contained() {
        let mut store = PackedStore::with_capacity(1);
        let handle = store.insert(1.0);
        assert!(store.contains(&handle));
        assert!(!store.contains(&(handle + 1)));
    }
}
