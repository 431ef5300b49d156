use core::{fmt, iter::FusedIterator};

use super::Deque;

/// An owning iterator over the slots of a [`Deque`].
///
/// This `struct` is created by the [`into_iter`] method on [`Deque`]
/// (provided by the [`IntoIterator`] trait). See its documentation for more.
///
/// [`into_iter`]: Deque::into_iter
#[derive(Clone)]
pub struct IntoIter<T> {
  inner: Deque<T>,
}

impl<T> IntoIter<T> {
  pub(super) fn new(inner: Deque<T>) -> Self {
    IntoIter { inner }
  }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("IntoIter").field(&self.inner).finish()
  }
}

impl<T> Iterator for IntoIter<T> {
  type Item = Option<T>;

  #[inline]
  fn next(&mut self) -> Option<Option<T>> {
    self.inner.take_front()
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    let len = self.inner.len();
    (len, Some(len))
  }

  #[inline]
  fn count(self) -> usize {
    self.inner.len()
  }

  #[inline]
  fn last(mut self) -> Option<Self::Item> {
    self.inner.take_back()
  }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
  #[inline]
  fn next_back(&mut self) -> Option<Option<T>> {
    self.inner.take_back()
  }
}

impl<T> ExactSizeIterator for IntoIter<T> {
  #[inline]
  fn len(&self) -> usize {
    self.inner.len()
  }
}

impl<T> FusedIterator for IntoIter<T> {}
