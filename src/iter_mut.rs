use core::iter::FusedIterator;
use core::{fmt, mem, slice};

/// A mutable iterator over the slots of a [`Deque`](crate::Deque).
///
/// This `struct` is created by the [`iter_mut`] method on [`Deque`]. See its
/// documentation for more.
///
/// [`Deque`]: crate::Deque
/// [`iter_mut`]: crate::Deque::iter_mut
pub struct IterMut<'a, T> {
  i1: slice::IterMut<'a, Option<T>>,
  i2: slice::IterMut<'a, Option<T>>,
}

impl<'a, T> IterMut<'a, T> {
  pub(super) fn new(i1: slice::IterMut<'a, Option<T>>, i2: slice::IterMut<'a, Option<T>>) -> Self {
    Self { i1, i2 }
  }

  /// Views the slots not yet yielded as a pair of subslices, consuming the
  /// iterator.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let mut deque = Deque::from([1, 2, 3]);
  /// let mut iter = deque.iter_mut();
  /// iter.next();
  /// let (front, _) = iter.into_slices();
  /// front[0] = None;
  /// assert_eq!(deque.get(1), Ok(None));
  /// ```
  pub fn into_slices(self) -> (&'a mut [Option<T>], &'a mut [Option<T>]) {
    (self.i1.into_slice(), self.i2.into_slice())
  }
}

impl<T: fmt::Debug> fmt::Debug for IterMut<'_, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("IterMut")
      .field(&self.i1.as_slice())
      .field(&self.i2.as_slice())
      .finish()
  }
}

impl<'a, T> Iterator for IterMut<'a, T> {
  type Item = Option<&'a mut T>;

  #[inline]
  fn next(&mut self) -> Option<Option<&'a mut T>> {
    match self.i1.next() {
      Some(slot) => Some(slot.as_mut()),
      None => {
        // Swapping once the first half runs dry keeps the common path on
        // the first branch.
        mem::swap(&mut self.i1, &mut self.i2);
        self.i1.next().map(Option::as_mut)
      }
    }
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    let len = self.len();
    (len, Some(len))
  }

  fn fold<Acc, F>(self, accum: Acc, mut f: F) -> Acc
  where
    F: FnMut(Acc, Self::Item) -> Acc,
  {
    let accum = self.i1.map(Option::as_mut).fold(accum, &mut f);
    self.i2.map(Option::as_mut).fold(accum, &mut f)
  }

  #[inline]
  fn last(mut self) -> Option<Self::Item> {
    self.next_back()
  }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
  #[inline]
  fn next_back(&mut self) -> Option<Option<&'a mut T>> {
    match self.i2.next_back() {
      Some(slot) => Some(slot.as_mut()),
      None => {
        mem::swap(&mut self.i1, &mut self.i2);
        self.i2.next_back().map(Option::as_mut)
      }
    }
  }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {
  fn len(&self) -> usize {
    self.i1.len() + self.i2.len()
  }
}

impl<T> FusedIterator for IterMut<'_, T> {}

#[cfg(test)]
mod tests {
  use crate::Deque;

  #[test]
  fn mutates_across_the_wrap_point() {
    let mut deque = Deque::new();
    for value in 0..4 {
      deque.push_back(value).unwrap();
      deque.push_front(value).unwrap();
    }
    for slot in deque.iter_mut().flatten() {
      *slot *= 10;
    }
    assert_eq!(deque, Deque::from([30, 20, 10, 0, 0, 10, 20, 30]));
  }

  #[test]
  fn fills_vacant_positions() {
    let mut deque = Deque::with_len(3).unwrap();
    assert!(deque.iter_mut().all(|slot| slot.is_none()));
    for slot in deque.as_mut_slices().0 {
      *slot = Some(7);
    }
    assert_eq!(deque, Deque::from([7, 7, 7]));
  }

  #[test]
  fn double_ended() {
    let mut deque = Deque::from([1, 2, 3, 4]);
    let mut iter = deque.iter_mut();
    assert_eq!(iter.len(), 4);
    if let Some(Some(back)) = iter.next_back() {
      *back = 40;
    }
    assert_eq!(iter.next().flatten().copied(), Some(1));
    assert_eq!(iter.size_hint(), (2, Some(2)));
    assert_eq!(deque.back(), Some(&40));
  }
}
