use std::ops::{Deref, DerefMut};

/// Reusable buffer whose storage only ever grows.
///
/// The logical length is tracked separately from the backing `Vec`, so
/// resizing down and back up again never touches the allocator.
#[derive(Debug, Clone, Default)]
pub struct GrowableBuffer<T> {
    storage: Vec<T>,
    len: usize,
}

impl<T: Copy + Default> GrowableBuffer<T> {
    pub fn new() -> Self {
        Self {
            storage: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Set the logical length.
    ///
    /// Storage grows to at least double its previous size when it is too
    /// small. Newly exposed elements hold whatever an earlier use left there,
    /// or `T::default()` when the storage is fresh.
    pub fn resize(&mut self, len: usize) {
        if len > self.storage.len() {
            let grown = len.max(self.storage.len() * 2);
            self.storage.resize(grown, T::default());
        }
        self.len = len;
    }

    /// Set the logical length and fill every element with `value`
    pub fn resize_fill(&mut self, len: usize, value: T) {
        self.resize(len);
        self.storage[..len].fill(value);
    }

    /// Replace the contents with a copy of `values`
    pub fn copy_from(&mut self, values: &[T]) {
        self.resize(values.len());
        self.storage[..values.len()].copy_from_slice(values);
    }

    #[inline]
    pub fn push(&mut self, value: T) {
        if self.len == self.storage.len() {
            self.storage.push(value);
        } else {
            self.storage[self.len] = value;
        }
        self.len += 1;
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Number of elements the storage holds without reallocating
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.storage[..self.len]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.storage[..self.len]
    }
}

impl<T: Copy + Default> Deref for GrowableBuffer<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Copy + Default> DerefMut for GrowableBuffer<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}
