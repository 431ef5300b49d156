use core::{fmt, marker::PhantomData};

use super::{Deque, Error};

/// A reduction that folds a sequence of values into a new [`Deque`].
///
/// The three steps mirror a supplier/accumulator/combiner pipeline:
/// [`supply`](Collector::supply) creates an empty deque,
/// [`accumulate`](Collector::accumulate) pushes one value to its back, and
/// [`combine`](Collector::combine) appends a partial result to another. Split
/// a sequence, accumulate the pieces independently and combine them in order
/// to get the same deque a single pass would have built.
///
/// This `struct` is created by [`Deque::collector`].
///
/// ## Examples
///
/// ```
/// use ring_deque::Deque;
///
/// let collector = Deque::collector();
/// let mut left = collector.supply();
/// let mut right = collector.supply();
/// for value in 0..3 {
///   collector.accumulate(&mut left, value).unwrap();
/// }
/// for value in 3..6 {
///   collector.accumulate(&mut right, value).unwrap();
/// }
///
/// let all = collector.combine(left, right).unwrap();
/// assert_eq!(all, collector.reduce(0..6).unwrap());
/// ```
pub struct Collector<T> {
  _marker: PhantomData<fn() -> T>,
}

impl<T> Collector<T> {
  pub(super) const fn new() -> Self {
    Self {
      _marker: PhantomData,
    }
  }

  /// Creates the empty deque a reduction starts from.
  #[inline]
  pub fn supply(&self) -> Deque<T> {
    Deque::new()
  }

  /// Pushes `value` to the back of `deque`.
  #[inline]
  pub fn accumulate(&self, deque: &mut Deque<T>, value: T) -> Result<(), Error> {
    deque.push_back(value)
  }

  /// Appends every slot of `right` to the back of `left` and returns `left`.
  pub fn combine(&self, mut left: Deque<T>, mut right: Deque<T>) -> Result<Deque<T>, Error> {
    left.append(&mut right)?;
    Ok(left)
  }

  /// Runs the whole reduction over `values`.
  pub fn reduce<I: IntoIterator<Item = T>>(&self, values: I) -> Result<Deque<T>, Error> {
    values.into_iter().try_fold(self.supply(), |mut deque, value| {
      self.accumulate(&mut deque, value)?;
      Ok(deque)
    })
  }
}

impl<T> Clone for Collector<T> {
  #[inline]
  fn clone(&self) -> Self {
    *self
  }
}

impl<T> Copy for Collector<T> {}

impl<T> Default for Collector<T> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<T> fmt::Debug for Collector<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Collector")
  }
}

#[cfg(test)]
mod tests {
  use crate::{Deque, Error};

  #[test]
  fn combine_preserves_order_and_vacancies() {
    let collector = Deque::collector();
    let mut left = Deque::with_len(1).unwrap();
    collector.accumulate(&mut left, 1).unwrap();
    let right = collector.reduce([2, 3]).unwrap();

    let combined = collector.combine(left, right).unwrap();
    assert_eq!(combined.len(), 4);
    assert_eq!(combined.get(0), Ok(None));
    assert_eq!(
      combined.elements().copied().collect::<std::vec::Vec<_>>(),
      [1, 2, 3]
    );
  }

  #[test]
  fn reduce_grows_past_default_capacity() {
    let deque = Deque::collector().reduce(0..100).unwrap();
    assert_eq!(deque.len(), 100);
    assert_eq!(deque.get(-1), Ok(Some(&99)));
    assert!(deque.capacity() >= 100);
  }

  #[test]
  fn fold_with_iterator_adapters() {
    let collector = Deque::collector();
    let deque: Result<Deque<_>, Error> = (0..4)
      .map(|x| x * x)
      .try_fold(collector.supply(), |mut deque, value| {
        collector.accumulate(&mut deque, value)?;
        Ok(deque)
      });
    assert_eq!(deque.unwrap(), Deque::from([0, 1, 4, 9]));
  }
}
