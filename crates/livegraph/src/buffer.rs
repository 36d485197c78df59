//! Fixed-capacity circular sample storage.
//!
//! A series keeps its samples in a [`RingBuffer`] that never grows: once it
//! is full, every append overwrites the oldest sample. Readers walk the
//! buffer oldest-to-newest by unwrapping it at the write position.

use super::types::DataPoint;
use std::iter::{Chain, FusedIterator};
use std::slice;

/// Ring buffer of plot samples.
pub type SampleRingBuffer = RingBuffer<DataPoint>;

/// Efficient ring buffer for streaming data.
///
/// A fixed-capacity circular buffer that overwrites the oldest elements
/// when full. Provides O(1) push operations and maintains temporal ordering.
///
/// # Example
///
/// ```
/// use livegraph::RingBuffer;
///
/// let mut buffer = RingBuffer::<f64>::new(100);
/// for i in 0..150 {
///     buffer.push(i as f64);
/// }
/// // Buffer now contains 50..150, oldest data was overwritten
/// assert_eq!(buffer.len(), 100);
/// assert_eq!(buffer.get(0), Some(&50.0));
/// ```
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    /// Internal data storage, always `capacity` long
    data: Vec<T>,
    /// Next slot to write
    write_pos: usize,
    /// Number of valid elements (capped at capacity)
    len: usize,
    /// Total number of elements ever written
    total_written: u64,
}

impl<T: Clone + Default> RingBuffer<T> {
    /// Create a new ring buffer with the specified capacity.
    ///
    /// A capacity of 0 is clamped to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = clamp_capacity(capacity);
        Self {
            data: vec![T::default(); capacity],
            write_pos: 0,
            len: 0,
            total_written: 0,
        }
    }

    /// Create a ring buffer holding the tail of `items`.
    ///
    /// If the items exceed capacity, only the last `capacity` are kept.
    pub fn from_iter_with_capacity<I: IntoIterator<Item = T>>(items: I, capacity: usize) -> Self {
        let mut buffer = Self::new(capacity);
        buffer.extend(items);
        buffer
    }

    /// Push a single item to the buffer.
    ///
    /// O(1). If the buffer is full, the oldest element is overwritten.
    #[inline]
    pub fn push(&mut self, item: T) {
        let capacity = self.data.len();
        self.data[self.write_pos] = item;
        self.write_pos += 1;
        if self.write_pos >= capacity {
            self.write_pos -= capacity;
        }
        if self.len < capacity {
            self.len += 1;
        }
        self.total_written = self.total_written.wrapping_add(1);
    }

    /// Push every item in order.
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.push(item);
        }
    }

    /// Reallocate storage for a new capacity and clear the contents.
    ///
    /// Samples are never carried across a resize.
    pub fn resize(&mut self, capacity: usize) {
        let capacity = clamp_capacity(capacity);
        self.data = vec![T::default(); capacity];
        self.write_pos = 0;
        self.len = 0;
    }
}

impl<T> RingBuffer<T> {
    /// Get an item by logical index (0 = oldest item).
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        let capacity = self.data.len();
        let actual_idx = (self.write_pos + capacity - self.len + index) % capacity;
        Some(&self.data[actual_idx])
    }

    /// Get the most recent item (newest).
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Get the oldest item.
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    /// Number of valid elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of elements held.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Check if the buffer is full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.data.len()
    }

    /// Index of the slot the next push writes to.
    #[inline]
    pub fn write_index(&self) -> usize {
        self.write_pos
    }

    /// Get the total number of items ever written.
    ///
    /// Survives [`clear`](Self::clear) and [`resize`](RingBuffer::resize).
    #[inline]
    pub fn total_written(&self) -> u64 {
        self.total_written
    }

    /// Forget all elements, keeping the allocation.
    pub fn clear(&mut self) {
        self.len = 0;
        self.write_pos = 0;
    }

    /// The valid data as two contiguous slices, oldest first.
    ///
    /// The second slice is empty unless the valid region wraps around the
    /// end of storage.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        if self.write_pos >= self.len {
            (&self.data[self.write_pos - self.len..self.write_pos], &[])
        } else {
            let start = self.write_pos + self.data.len() - self.len;
            (&self.data[start..], &self.data[..self.write_pos])
        }
    }

    /// Iterate over elements in order (oldest to newest).
    ///
    /// The iterator borrows the buffer; call again to restart.
    pub fn iter(&self) -> RingBufferIter<'_, T> {
        let (first, second) = self.as_slices();
        RingBufferIter {
            inner: first.iter().chain(second.iter()),
        }
    }

    /// Copy the valid data out, oldest first.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let (first, second) = self.as_slices();
        let mut result = Vec::with_capacity(self.len);
        result.extend_from_slice(first);
        result.extend_from_slice(second);
        result
    }
}

impl<T: Clone + Default> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = RingBufferIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Capacity of a default-constructed buffer.
pub const DEFAULT_CAPACITY: usize = 500;

pub(crate) fn clamp_capacity(capacity: usize) -> usize {
    if capacity == 0 {
        tracing::warn!("Ring buffer capacity 0 is invalid, clamping to 1");
        1
    } else {
        capacity
    }
}

/// Iterator over ring buffer elements, oldest first.
#[derive(Debug, Clone)]
pub struct RingBufferIter<'a, T> {
    inner: Chain<slice::Iter<'a, T>, slice::Iter<'a, T>>,
}

impl<'a, T> Iterator for RingBufferIter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for RingBufferIter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for RingBufferIter<'_, T> {}

impl<T> FusedIterator for RingBufferIter<'_, T> {}
