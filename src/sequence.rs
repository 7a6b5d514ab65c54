use std::fmt::{self, Debug};
use std::iter::{self, FromIterator};
use std::mem;
use std::ops::{Index, IndexMut};

use tracing::trace;

use crate::error::{Result, SequenceError};
use crate::iter::{Iter, IterMut};

/// A contiguous, owned, growable buffer with stack-style access.
///
/// The live elements always occupy `storage`, so `storage.len()` is the
/// element count. `capacity` is the number of slots the sequence has reserved
/// and only changes when the storage is reallocated; the allocation
/// behind `storage` is always at least that large.
pub struct GrowableSequence<T> {
    storage: Vec<T>,
    capacity: usize,
}

impl<T> GrowableSequence<T> {
    pub fn new() -> Self {
        Self { storage: Vec::new(), capacity: 0 }
    }

    /// Reserves exactly `capacity` slots without placing any elements.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut sequence = Self::new();
        if capacity > 0 {
            sequence.resize(capacity);
        }
        sequence
    }

    /// Creates a sequence holding `len` default values, with capacity `len`.
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        let mut sequence = Self::new();
        if len > 0 {
            sequence.resize_with(len, T::default);
        }
        sequence
    }

    /// Creates a sequence holding `len` clones of `value`, with capacity `len`.
    pub fn from_elem(len: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut sequence = Self::new();
        if len > 0 {
            sequence.resize_with_value(len, value);
        }
        sequence
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every element. The reserved slots stay allocated.
    pub fn clear(&mut self) {
        self.storage.clear();
    }

    /// Appends `item`, doubling the capacity first when the sequence is full.
    pub fn push(&mut self, item: T) {
        if self.len() == self.capacity {
            let grown = if self.capacity == 0 { 1 } else { self.capacity * 2 };
            self.resize(grown);
        }

        self.storage.push(item);
    }

    /// Removes the top element. Popping an empty sequence does nothing.
    pub fn pop(&mut self) {
        self.storage.pop();
    }

    pub fn top(&self) -> Result<T>
    where
        T: Clone,
    {
        self.peek(0).cloned()
    }

    /// Borrows the element `distance` places below the top.
    pub fn peek(&self, distance: usize) -> Result<&T> {
        let len = self.len();
        if len == 0 {
            return Err(SequenceError::EmptyAccess);
        }
        if distance >= len {
            return Err(SequenceError::IndexOutOfRange { index: distance, len });
        }

        Ok(&self.storage[len - 1 - distance])
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        let len = self.len();
        self.storage.get(index).ok_or(SequenceError::IndexOutOfRange { index, len })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len();
        self.storage.get_mut(index).ok_or(SequenceError::IndexOutOfRange { index, len })
    }

    /// Returns the element at `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`GrowableSequence::len`]. Slots past the
    /// element count are reserved but hold no value, so reading them is
    /// undefined behavior even when `index < capacity()`.
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        self.storage.get_unchecked(index)
    }

    /// Mutable counterpart of [`GrowableSequence::get_unchecked`].
    ///
    /// # Safety
    ///
    /// `index` must be less than [`GrowableSequence::len`].
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        self.storage.get_unchecked_mut(index)
    }

    /// Reallocates to exactly `capacity` slots and moves the elements over.
    ///
    /// Elements beyond the new capacity are dropped.
    pub fn resize(&mut self, capacity: usize) {
        self.move_into(Vec::with_capacity(capacity), capacity);
    }

    /// Like [`GrowableSequence::resize`], but reports a capacity that cannot
    /// be allocated instead of aborting. The sequence is untouched on error.
    pub fn try_resize(&mut self, capacity: usize) -> Result<()> {
        let mut storage = Vec::new();
        storage
            .try_reserve_exact(capacity)
            .map_err(|_| SequenceError::CapacityOverflow { requested: capacity })?;

        self.move_into(storage, capacity);
        Ok(())
    }

    fn move_into(&mut self, mut storage: Vec<T>, capacity: usize) {
        trace!(from = self.capacity, to = capacity, len = self.len(), "reallocating storage");

        self.storage.truncate(capacity);
        storage.extend(mem::take(&mut self.storage));

        self.storage = storage;
        self.capacity = capacity;
    }

    /// Reallocates to exactly `len` slots and fills every empty slot with a
    /// clone of `value`, leaving the sequence full.
    pub fn resize_with_value(&mut self, len: usize, value: T)
    where
        T: Clone,
    {
        self.resize_with(len, || value.clone())
    }

    fn resize_with<F: FnMut() -> T>(&mut self, len: usize, fill: F) {
        self.resize(len);
        let missing = len - self.len();
        self.storage.extend(iter::repeat_with(fill).take(missing));
    }

    pub fn as_slice(&self) -> &[T] {
        &self.storage
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.storage
    }

    pub fn into_vec(self) -> Vec<T> {
        self.storage
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.storage)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(&mut self.storage)
    }
}

impl<T> Default for GrowableSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for GrowableSequence<T> {
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        copy.clone_from(self);
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();

        if source.len() > self.capacity {
            self.resize(source.len());
        }

        self.storage.extend(source.storage.iter().cloned());
    }
}

impl<T: Debug> Debug for GrowableSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for GrowableSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.storage == other.storage
    }
}

impl<T: Eq> Eq for GrowableSequence<T> {}

impl<T> Index<usize> for GrowableSequence<T> {
    type Output = T;

    /// Panics when `index >= len()`.
    fn index(&self, index: usize) -> &T {
        &self.storage[index]
    }
}

impl<T> IndexMut<usize> for GrowableSequence<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.storage[index]
    }
}

impl<T> Extend<T> for GrowableSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for GrowableSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Self {
        let mut sequence = Self::new();
        sequence.extend(items);
        sequence
    }
}
