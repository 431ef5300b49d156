use generic_array::{ArrayLength, GenericArray};

use super::Deque;

impl<T, N: ArrayLength> From<GenericArray<T, N>> for Deque<T> {
  /// Appends the array elements in order to a new deque.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::{Deque, GenericArray, typenum::U3};
  ///
  /// let array: GenericArray<u8, U3> = GenericArray::from_array([1, 2, 3]);
  /// let deque = Deque::from(array);
  /// assert_eq!(deque.get(-1), Ok(Some(&3)));
  /// ```
  fn from(array: GenericArray<T, N>) -> Self {
    array.into_iter().collect()
  }
}

/// Exports the slots of a deque whose length is exactly `N`, handing the
/// deque back otherwise.
impl<T, N: ArrayLength> TryFrom<Deque<T>> for GenericArray<Option<T>, N> {
  type Error = Deque<T>;

  fn try_from(deque: Deque<T>) -> Result<Self, Deque<T>> {
    if deque.len() != N::USIZE {
      return Err(deque);
    }
    Ok(deque.into_iter().collect())
  }
}
