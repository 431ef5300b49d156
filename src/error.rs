use core::fmt::{Display, Formatter};

/// Errors of [`Deque`](crate::Deque).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
  /// An index resolved outside the valid range of the deque.
  OutOfRange {
    /// The index after negative indices were translated.
    index: isize,
    /// Length of the deque at the time of the call.
    len: usize,
  },
  /// A pop was attempted on an empty deque.
  Underflow,
  /// The ring buffer could not be reallocated.
  AllocationFailure {
    /// Number of slots the failed allocation asked for.
    requested: usize,
  },
}

impl Display for Error {
  #[inline]
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::OutOfRange { index, len } => write!(f, "index {index} out of range for length {len}"),
      Self::Underflow => f.write_str("pop from an empty deque"),
      Self::AllocationFailure { requested } => {
        write!(f, "failed to allocate a ring buffer of {requested} slots")
      }
    }
  }
}

impl core::error::Error for Error {}
