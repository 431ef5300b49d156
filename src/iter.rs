use core::iter::FusedIterator;
use core::fmt;

use super::wrap_index;

/// An iterator over the slots of a [`Deque`](crate::Deque).
///
/// It walks a physical cursor from the front of the ring to its back,
/// wrapping at the end of the buffer. Vacant positions yield `None`.
///
/// This `struct` is created by the [`iter`] method on [`Deque`]. See its
/// documentation for more.
///
/// [`Deque`]: crate::Deque
/// [`iter`]: crate::Deque::iter
pub struct Iter<'a, T> {
  slots: &'a [Option<T>],
  head: usize,
  tail: usize,
}

impl<'a, T> Iter<'a, T> {
  pub(super) const fn new(slots: &'a [Option<T>], head: usize, tail: usize) -> Self {
    Self { slots, head, tail }
  }
}

impl<T> Clone for Iter<'_, T> {
  fn clone(&self) -> Self {
    Self { ..*self }
  }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.clone()).finish()
  }
}

impl<'a, T> Iterator for Iter<'a, T> {
  type Item = Option<&'a T>;

  #[inline]
  fn next(&mut self) -> Option<Option<&'a T>> {
    if self.head == self.tail {
      return None;
    }
    let slot = self.slots[self.head].as_ref();
    self.head = wrap_index(self.head + 1, self.slots.len());
    Some(slot)
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    let len = self.len();
    (len, Some(len))
  }

  #[inline]
  fn last(mut self) -> Option<Option<&'a T>> {
    self.next_back()
  }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
  #[inline]
  fn next_back(&mut self) -> Option<Option<&'a T>> {
    if self.head == self.tail {
      return None;
    }
    self.tail = wrap_index(self.tail + self.slots.len() - 1, self.slots.len());
    Some(self.slots[self.tail].as_ref())
  }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
  fn len(&self) -> usize {
    wrap_index(self.tail + self.slots.len() - self.head, self.slots.len())
  }
}

impl<T> FusedIterator for Iter<'_, T> {}
