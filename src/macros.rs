/// Creates a [`Deque`](crate::Deque) holding the given elements, front to
/// back.
///
/// ## Examples
///
/// ```
/// use ring_deque::{deque, Deque};
///
/// let deque = deque![1, 2, 3];
/// assert_eq!(deque.get(-1), Ok(Some(&3)));
///
/// let empty: Deque<u8> = deque![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! deque {
  () => {
    $crate::Deque::new()
  };
  ($($value:expr),+ $(,)?) => {
    <$crate::Deque<_> as ::core::iter::FromIterator<_>>::from_iter([$($value),+])
  };
}

macro_rules! trace_event {
  ($($tt:tt)+) => {
    #[cfg(feature = "tracing")]
    tracing::trace!($($tt)+);
  };
}

pub(super) use trace_event;
