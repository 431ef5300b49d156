#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, allow(unused_attributes))]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(not(any(feature = "std", feature = "alloc")))]
compile_error!("`ring-deque` requires either the `std` or the `alloc` feature");

#[cfg(all(not(feature = "std"), feature = "alloc"))]
extern crate alloc as std;

#[cfg(feature = "std")]
extern crate std;

use core::{
  fmt,
  hash::{Hash, Hasher},
  iter::{repeat_with, Flatten},
  mem,
  ops::{Index, IndexMut, Range},
};
use std::{boxed::Box, vec::Vec};

use macros::*;

pub use bulk::Membership;
pub use collector::Collector;
pub use error::Error;
pub use generic_array::{typenum, ArrayLength, GenericArray};
pub use into_iter::IntoIter;
pub use iter::Iter;
pub use iter_mut::IterMut;

mod array;
mod bulk;
mod collector;
mod error;
mod into_iter;
#[cfg(feature = "std")]
mod io;
mod iter;
mod iter_mut;
mod macros;
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde;

#[cfg(all(test, feature = "std"))]
mod tests;

/// Number of slots allocated by [`Deque::new`] and [`Deque::clear`].
///
/// Shrinking never takes the buffer below this many slots.
pub const DEFAULT_CAPACITY: usize = 10;

/// Smallest buffer able to hold one element while keeping a slot vacant.
const MIN_SLOTS: usize = 2;

/// Textual form of a vacant slot in the [`Display`](fmt::Display) output.
const VACANT: &str = "<empty>";

/// A growable double-ended queue backed by a single ring buffer.
///
/// `Deque` offers amortized O(1) pushes and pops at both ends together with
/// O(1) random access. Positions may be addressed from the back with negative
/// indices: `-1` is the last element and `-len` the first.
///
/// Every slot of the ring is an [`Option<T>`]. Slots outside the logical range
/// are always `None`, and a popped slot is cleared so the value it held is
/// released. Logical positions may also be vacant, which is what
/// [`Deque::with_len`] produces.
///
/// The buffer always keeps one slot unoccupied, so `head == tail` means the
/// deque is empty. It doubles before a push would fill it and halves once fewer
/// than a quarter of its slots are in use, never dropping below
/// [`DEFAULT_CAPACITY`].
///
/// ## Examples
///
/// ```rust
/// use ring_deque::Deque;
///
/// let mut deque = Deque::new();
/// deque.push_back(1).unwrap();
/// deque.push_back(2).unwrap();
/// deque.push_front(0).unwrap();
///
/// assert_eq!(deque.len(), 3);
/// assert_eq!(deque.get(0), Ok(Some(&0)));
/// assert_eq!(deque.get(-1), Ok(Some(&2)));
///
/// assert_eq!(deque.pop_front(), Ok(Some(0)));
/// assert_eq!(deque.pop_back(), Ok(Some(2)));
/// assert_eq!(deque.len(), 1);
/// ```
#[derive(Clone)]
pub struct Deque<T> {
  slots: Box<[Option<T>]>,
  head: usize,
  tail: usize,
}

impl<T> Default for Deque<T> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.iter()).finish()
  }
}

/// Renders the deque one element per line, each preceded by a space, between
/// a pair of brackets. Vacant slots render as `<empty>`.
impl<T: fmt::Display> fmt::Display for Deque<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("[\n")?;
    for slot in self {
      match slot {
        Some(value) => writeln!(f, " {value}")?,
        None => writeln!(f, " {VACANT}")?,
      }
    }
    f.write_str("]")
  }
}

impl<T: PartialEq> PartialEq for Deque<T> {
  fn eq(&self, other: &Self) -> bool {
    self.len() == other.len() && self.iter().eq(other.iter())
  }
}

impl<T: Eq> Eq for Deque<T> {}

impl<T: Hash> Hash for Deque<T> {
  fn hash<H: Hasher>(&self, state: &mut H) {
    state.write_usize(self.len());
    self.iter().for_each(|slot| slot.hash(state));
  }
}

impl<T> Index<isize> for Deque<T> {
  type Output = Option<T>;

  #[inline]
  fn index(&self, index: isize) -> &Option<T> {
    let idx = self.physical_slot(index).expect("Out of bounds access");
    &self.slots[idx]
  }
}

impl<T> IndexMut<isize> for Deque<T> {
  #[inline]
  fn index_mut(&mut self, index: isize) -> &mut Option<T> {
    let idx = self.physical_slot(index).expect("Out of bounds access");
    &mut self.slots[idx]
  }
}

impl<T> IntoIterator for Deque<T> {
  type Item = Option<T>;
  type IntoIter = IntoIter<T>;

  /// Consumes the deque into a front-to-back iterator yielding slots by
  /// value.
  fn into_iter(self) -> IntoIter<T> {
    IntoIter::new(self)
  }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
  type Item = Option<&'a T>;
  type IntoIter = Iter<'a, T>;

  fn into_iter(self) -> Iter<'a, T> {
    self.iter()
  }
}

impl<'a, T> IntoIterator for &'a mut Deque<T> {
  type Item = Option<&'a mut T>;
  type IntoIter = IterMut<'a, T>;

  fn into_iter(self) -> IterMut<'a, T> {
    self.iter_mut()
  }
}

impl<T> FromIterator<T> for Deque<T> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    let mut deque = Self::new();
    deque.extend(iter);
    deque
  }
}

/// Appends every value to the back. Like the std collections this aborts on
/// allocation failure; use [`Deque::add_all`] to observe it instead.
impl<T> Extend<T> for Deque<T> {
  fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
    for value in iter {
      if self.is_full() {
        self.relocate(vacant_slots(self.slots.len() * 2));
      }
      self.write_back(Some(value));
    }
  }
}

impl<'a, T: Clone + 'a> Extend<&'a T> for Deque<T> {
  fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
    self.extend(iter.into_iter().cloned());
  }
}

impl<T, const N: usize> From<[T; N]> for Deque<T> {
  fn from(array: [T; N]) -> Self {
    array.into_iter().collect()
  }
}

impl<T> From<Vec<T>> for Deque<T> {
  fn from(vec: Vec<T>) -> Self {
    vec.into_iter().collect()
  }
}

impl<T> Deque<T> {
  /// Creates an empty deque with [`DEFAULT_CAPACITY`] slots.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let deque: Deque<u32> = Deque::new();
  /// assert!(deque.is_empty());
  /// ```
  #[inline]
  pub fn new() -> Self {
    Self {
      slots: vacant_slots(DEFAULT_CAPACITY),
      head: 0,
      tail: 0,
    }
  }

  /// Creates a deque of `len` vacant elements.
  ///
  /// The buffer is allocated with `2 * len` slots (at least two), so
  /// [`len`](Deque::len) reports `len` right away and every position reads as
  /// `None`.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let mut deque = Deque::<u32>::with_len(4).unwrap();
  /// assert_eq!(deque.len(), 4);
  /// assert_eq!(deque.at(0), Ok(None));
  ///
  /// deque.push_back(1).unwrap();
  /// assert_eq!(deque.len(), 5);
  /// assert_eq!(deque.at(-1), Ok(Some(&1)));
  /// ```
  pub fn with_len(len: usize) -> Result<Self, Error> {
    let slots = try_vacant_slots(len.saturating_mul(2).max(MIN_SLOTS))?;
    Ok(Self {
      slots,
      head: 0,
      tail: len,
    })
  }

  /// Creates a deque from an iterator, reporting allocation failures instead
  /// of aborting.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let deque = Deque::from_iter_checked(0..32).unwrap();
  /// assert_eq!(deque.len(), 32);
  /// assert_eq!(deque.get(-1), Ok(Some(&31)));
  /// ```
  pub fn from_iter_checked<I: IntoIterator<Item = T>>(iter: I) -> Result<Self, Error> {
    let mut deque = Self::new();
    for value in iter {
      deque.push_back(value)?;
    }
    Ok(deque)
  }

  /// Creates a deque from slots, keeping vacant ones in place.
  ///
  /// This is the inverse of [`to_array`](Deque::to_array).
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let mut deque = Deque::with_len(2).unwrap();
  /// deque.push_back('a').unwrap();
  ///
  /// let rebuilt = Deque::from_slots(deque.to_array().into_vec()).unwrap();
  /// assert_eq!(rebuilt, deque);
  /// assert_eq!(rebuilt.get(0), Ok(None));
  /// ```
  pub fn from_slots<I: IntoIterator<Item = Option<T>>>(slots: I) -> Result<Self, Error> {
    let mut deque = Self::new();
    for slot in slots {
      deque.push_slot(slot)?;
    }
    Ok(deque)
  }

  /// Returns a [`Collector`] that folds values into a fresh deque.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let collector = Deque::collector();
  /// let deque = collector.reduce((0..5).map(|x| x * 10)).unwrap();
  /// assert_eq!(deque.get(2), Ok(Some(&20)));
  /// ```
  #[inline]
  pub const fn collector() -> Collector<T> {
    Collector::new()
  }

  /// Returns the number of logical positions, vacant ones included.
  #[inline]
  pub fn len(&self) -> usize {
    self.wrap_sub(self.tail, self.head)
  }

  /// Returns `true` if the deque holds no positions.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let mut deque = Deque::new();
  /// assert!(deque.is_empty());
  /// deque.push_front(1).unwrap();
  /// assert!(!deque.is_empty());
  /// ```
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.head == self.tail
  }

  /// Returns how many elements fit before the next push grows the buffer.
  ///
  /// One slot of the buffer always stays vacant, so this is one less than the
  /// number of allocated slots.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::{Deque, DEFAULT_CAPACITY};
  ///
  /// let deque: Deque<u8> = Deque::new();
  /// assert_eq!(deque.capacity(), DEFAULT_CAPACITY - 1);
  /// ```
  #[inline]
  pub fn capacity(&self) -> usize {
    self.slots.len() - 1
  }

  /// Returns the slot at `index`, which may count back from the end when
  /// negative.
  ///
  /// Fails with [`Error::OutOfRange`] when the resolved index is outside
  /// `0..len`. A vacant position reads as `Ok(None)`.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::{Deque, Error};
  ///
  /// let deque = Deque::from([10, 20, 30]);
  /// assert_eq!(deque.get(0), Ok(Some(&10)));
  /// assert_eq!(deque.get(-1), Ok(Some(&30)));
  /// assert_eq!(deque.get(3), Err(Error::OutOfRange { index: 3, len: 3 }));
  /// assert_eq!(deque.get(-4), Err(Error::OutOfRange { index: -1, len: 3 }));
  /// ```
  #[inline]
  pub fn get(&self, index: isize) -> Result<Option<&T>, Error> {
    let idx = self.physical_slot(index)?;
    Ok(self.slots[idx].as_ref())
  }

  /// Alias of [`get`](Deque::get).
  #[inline]
  pub fn at(&self, index: isize) -> Result<Option<&T>, Error> {
    self.get(index)
  }

  /// Returns a mutable reference into the slot at `index`.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let mut deque = Deque::from([1, 2]);
  /// if let Ok(Some(last)) = deque.get_mut(-1) {
  ///   *last += 5;
  /// }
  /// assert_eq!(deque.get(1), Ok(Some(&7)));
  /// ```
  #[inline]
  pub fn get_mut(&mut self, index: isize) -> Result<Option<&mut T>, Error> {
    let idx = self.physical_slot(index)?;
    Ok(self.slots[idx].as_mut())
  }

  /// Overwrites the slot at `index`, returning what it held before.
  ///
  /// The length and the ends of the deque are left untouched.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let mut deque = Deque::from([0]);
  /// assert_eq!(deque.set(0, 1), Ok(Some(0)));
  /// assert_eq!(deque.at(0), Ok(Some(&1)));
  /// assert!(deque.set(1, 2).is_err());
  /// ```
  #[inline]
  pub fn set(&mut self, index: isize, value: T) -> Result<Option<T>, Error> {
    let idx = self.physical_slot(index)?;
    Ok(self.slots[idx].replace(value))
  }

  /// Provides a reference to the front element, or `None` if the deque is
  /// empty or its front slot is vacant.
  #[inline]
  pub fn front(&self) -> Option<&T> {
    if self.is_empty() {
      None
    } else {
      self.slots[self.head].as_ref()
    }
  }

  /// Provides a reference to the back element, or `None` if the deque is
  /// empty or its back slot is vacant.
  #[inline]
  pub fn back(&self) -> Option<&T> {
    if self.is_empty() {
      None
    } else {
      self.slots[self.wrap_sub(self.tail, 1)].as_ref()
    }
  }

  /// Appends an element to the back of the deque.
  ///
  /// The buffer doubles first when the push would occupy its last vacant
  /// slot. If that allocation fails the deque is left unchanged.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let mut deque = Deque::new();
  /// for value in 0..100 {
  ///   deque.push_back(value).unwrap();
  /// }
  /// assert_eq!(deque.len(), 100);
  /// assert_eq!(deque.back(), Some(&99));
  /// ```
  pub fn push_back(&mut self, value: T) -> Result<(), Error> {
    self.push_slot(Some(value))
  }

  /// Prepends an element to the front of the deque.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let mut deque = Deque::new();
  /// deque.push_front(1).unwrap();
  /// deque.push_front(2).unwrap();
  /// assert_eq!(deque.front(), Some(&2));
  /// ```
  pub fn push_front(&mut self, value: T) -> Result<(), Error> {
    if self.is_full() {
      self.grow()?;
    }
    self.head = self.wrap_sub(self.head, 1);
    self.slots[self.head] = Some(value);
    Ok(())
  }

  /// Removes the front position and returns its slot.
  ///
  /// Fails with [`Error::Underflow`] on an empty deque. The buffer halves
  /// once fewer than a quarter of its slots remain in use.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::{Deque, Error};
  ///
  /// let mut deque = Deque::from([1, 2]);
  /// assert_eq!(deque.pop_front(), Ok(Some(1)));
  /// assert_eq!(deque.pop_front(), Ok(Some(2)));
  /// assert_eq!(deque.pop_front(), Err(Error::Underflow));
  /// ```
  pub fn pop_front(&mut self) -> Result<Option<T>, Error> {
    if self.is_empty() {
      return Err(Error::Underflow);
    }
    let shrunk = self.shrunk_slots(self.len() - 1)?;
    let slot = self.take_front();
    if let Some(slots) = shrunk {
      self.relocate(slots);
    }
    Ok(slot.flatten())
  }

  /// Removes the back position and returns its slot.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::{Deque, Error};
  ///
  /// let mut deque = Deque::new();
  /// assert_eq!(deque.pop_back(), Err(Error::Underflow));
  /// deque.push_back(1).unwrap();
  /// deque.push_back(3).unwrap();
  /// assert_eq!(deque.pop_back(), Ok(Some(3)));
  /// ```
  pub fn pop_back(&mut self) -> Result<Option<T>, Error> {
    if self.is_empty() {
      return Err(Error::Underflow);
    }
    let shrunk = self.shrunk_slots(self.len() - 1)?;
    let slot = self.take_back();
    if let Some(slots) = shrunk {
      self.relocate(slots);
    }
    Ok(slot.flatten())
  }

  /// Resets the deque to an empty buffer of [`DEFAULT_CAPACITY`] slots,
  /// dropping every element it held.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let mut deque = Deque::from([1, 2, 3]);
  /// deque.clear();
  /// assert!(deque.is_empty());
  /// deque.push_back(4).unwrap();
  /// assert_eq!(deque.len(), 1);
  /// ```
  #[inline]
  pub fn clear(&mut self) {
    *self = Self::new();
  }

  /// Returns a front-to-back iterator over the slots.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let deque = Deque::from([5, 3, 4]);
  /// let b: &[_] = &[Some(&5), Some(&3), Some(&4)];
  /// let c: Vec<Option<&i32>> = deque.iter().collect();
  /// assert_eq!(&c[..], b);
  /// ```
  #[inline]
  pub fn iter(&self) -> Iter<'_, T> {
    Iter::new(&self.slots, self.head, self.tail)
  }

  /// Returns a front-to-back iterator that allows modifying each element.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let mut deque = Deque::from([5, 3, 4]);
  /// for num in deque.iter_mut().flatten() {
  ///   *num -= 2;
  /// }
  /// assert_eq!(deque, Deque::from([3, 1, 2]));
  /// ```
  #[inline]
  pub fn iter_mut(&mut self) -> IterMut<'_, T> {
    let (a, b) = self.as_mut_slices();
    IterMut::new(a.iter_mut(), b.iter_mut())
  }

  /// Returns an iterator over the occupied slots only.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let mut deque = Deque::with_len(2).unwrap();
  /// deque.push_back(7).unwrap();
  /// assert_eq!(deque.elements().copied().collect::<Vec<_>>(), vec![7]);
  /// ```
  #[inline]
  pub fn elements(&self) -> Flatten<Iter<'_, T>> {
    self.iter().flatten()
  }

  /// Returns a pair of slices which contain, in order, the slots of the
  /// deque.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let mut deque = Deque::new();
  /// deque.push_back(0).unwrap();
  /// deque.push_back(1).unwrap();
  /// deque.push_front(10).unwrap();
  ///
  /// assert_eq!(deque.as_slices(), (&[Some(10)][..], &[Some(0), Some(1)][..]));
  /// ```
  #[inline]
  pub fn as_slices(&self) -> (&[Option<T>], &[Option<T>]) {
    let (a, b) = self.slot_ranges();
    (&self.slots[a], &self.slots[b])
  }

  /// Returns a pair of mutable slices which contain, in order, the slots of
  /// the deque.
  pub fn as_mut_slices(&mut self) -> (&mut [Option<T>], &mut [Option<T>]) {
    let (a, b) = self.slot_ranges();
    if b.is_empty() {
      (&mut self.slots[a], Default::default())
    } else {
      let (lower, upper) = self.slots.split_at_mut(a.start);
      (upper, &mut lower[b])
    }
  }

  /// Copies the half-open logical range `start..end` into a new deque.
  ///
  /// Negative bounds count back from the end and `end` may equal the length.
  /// Fails with [`Error::OutOfRange`] when a bound resolves outside `0..=len`
  /// or when `start` resolves past `end`.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let deque = Deque::from([0, 1, 2, 3, 4]);
  /// let middle = deque.slice(1, -1).unwrap();
  /// assert_eq!(middle, Deque::from([1, 2, 3]));
  /// assert!(deque.slice(3, 1).is_err());
  /// ```
  pub fn slice(&self, start: isize, end: isize) -> Result<Self, Error>
  where
    T: Clone,
  {
    let len = self.len();
    let start = self.logical_index(start, len + 1)?;
    let end = self.logical_index(end, len + 1)?;
    if start > end {
      return Err(Error::OutOfRange {
        index: start as isize,
        len,
      });
    }

    let count = end - start;
    let mut slots = try_vacant_slots(count.saturating_mul(2).max(MIN_SLOTS))?;
    for (dst, logical) in slots.iter_mut().zip(start..end) {
      dst.clone_from(&self.slots[self.to_physical_idx(logical)]);
    }
    Ok(Self {
      slots,
      head: 0,
      tail: count,
    })
  }

  /// Moves every slot of `other` to the back of `self`, leaving `other`
  /// empty.
  ///
  /// The room needed is reserved up front, so on failure both deques are
  /// left unchanged.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let mut left = Deque::from([1, 2]);
  /// let mut right = Deque::from([3, 4]);
  /// left.append(&mut right).unwrap();
  /// assert_eq!(left, Deque::from([1, 2, 3, 4]));
  /// assert!(right.is_empty());
  /// ```
  pub fn append(&mut self, other: &mut Self) -> Result<(), Error> {
    self.reserve(other.len())?;
    let (front, back) = other.as_mut_slices();
    for slot in front.iter_mut().chain(back.iter_mut()) {
      self.write_back(slot.take());
    }
    other.head = 0;
    other.tail = 0;
    Ok(())
  }
}

impl<T> Deque<T> {
  #[inline]
  pub(crate) fn push_slot(&mut self, slot: Option<T>) -> Result<(), Error> {
    if self.is_full() {
      self.grow()?;
    }
    self.write_back(slot);
    Ok(())
  }

  /// Writes at `tail` without checking for room.
  #[inline]
  fn write_back(&mut self, slot: Option<T>) {
    self.slots[self.tail] = slot;
    self.tail = self.wrap_add(self.tail, 1);
  }

  /// Removes the front position without applying the shrink policy.
  #[inline]
  pub(crate) fn take_front(&mut self) -> Option<Option<T>> {
    if self.is_empty() {
      return None;
    }
    let slot = self.slots[self.head].take();
    self.head = self.wrap_add(self.head, 1);
    Some(slot)
  }

  /// Removes the back position without applying the shrink policy.
  #[inline]
  pub(crate) fn take_back(&mut self) -> Option<Option<T>> {
    if self.is_empty() {
      return None;
    }
    self.tail = self.wrap_sub(self.tail, 1);
    Some(self.slots[self.tail].take())
  }

  /// Drops up to `count` positions from the back without applying the shrink
  /// policy.
  pub(crate) fn discard_back(&mut self, count: usize) {
    for _ in 0..count {
      drop(self.take_back());
    }
  }

  #[inline]
  fn is_full(&self) -> bool {
    self.len() == self.slots.len() - 1
  }

  fn grow(&mut self) -> Result<(), Error> {
    let slots = try_vacant_slots(self.slots.len().saturating_mul(2))?;
    self.relocate(slots);
    Ok(())
  }

  /// Makes room for `additional` more positions with at most one
  /// reallocation.
  pub(crate) fn reserve(&mut self, additional: usize) -> Result<(), Error> {
    let needed = self.len().saturating_add(additional);
    let mut cap = self.slots.len();
    while needed > cap - 1 {
      cap = cap.saturating_mul(2);
      if cap == usize::MAX {
        return Err(Error::AllocationFailure { requested: cap });
      }
    }
    if cap != self.slots.len() {
      let slots = try_vacant_slots(cap)?;
      self.relocate(slots);
    }
    Ok(())
  }

  /// Allocates the halved buffer a pop leaving `len_after` positions calls
  /// for, if any.
  fn shrunk_slots(&self, len_after: usize) -> Result<Option<Box<[Option<T>]>>, Error> {
    let cap = self.slots.len();
    if len_after >= cap / 4 || cap / 2 < DEFAULT_CAPACITY {
      return Ok(None);
    }
    try_vacant_slots(cap / 2).map(Some)
  }

  /// Moves the logical sequence into `slots` starting at index 0.
  fn relocate(&mut self, slots: Box<[Option<T>]>) {
    trace_event!(
      from = self.slots.len(),
      to = slots.len(),
      len = self.len(),
      "relocating ring buffer"
    );
    self.rebuild(slots, |_| true);
  }

  /// Moves the slots `keep` accepts, in logical order, into `slots` starting
  /// at index 0. Rejected slots are dropped with the old buffer.
  pub(crate) fn rebuild<F>(&mut self, slots: Box<[Option<T>]>, mut keep: F)
  where
    F: FnMut(&Option<T>) -> bool,
  {
    debug_assert!(slots.len() > self.len());
    let mut old = mem::replace(
      self,
      Self {
        slots,
        head: 0,
        tail: 0,
      },
    );
    let (front, back) = old.as_mut_slices();
    for slot in front.iter_mut().chain(back.iter_mut()) {
      if keep(slot) {
        self.write_back(slot.take());
      }
    }
  }

  /// Physical ranges of the logical sequence: `[head, tail)` when contiguous,
  /// otherwise `[head, cap)` followed by `[0, tail)`.
  #[inline]
  fn slot_ranges(&self) -> (Range<usize>, Range<usize>) {
    if self.head <= self.tail {
      (self.head..self.tail, 0..0)
    } else {
      (self.head..self.slots.len(), 0..self.tail)
    }
  }

  /// Resolves a possibly negative `index` into a logical index below
  /// `limit`.
  #[inline]
  fn logical_index(&self, index: isize, limit: usize) -> Result<usize, Error> {
    let len = self.len();
    let resolved = if index < 0 {
      index + len as isize
    } else {
      index
    };
    if resolved < 0 || resolved as usize >= limit {
      return Err(Error::OutOfRange {
        index: resolved,
        len,
      });
    }
    Ok(resolved as usize)
  }

  #[inline]
  fn physical_slot(&self, index: isize) -> Result<usize, Error> {
    let logical = self.logical_index(index, self.len())?;
    Ok(self.to_physical_idx(logical))
  }

  /// Returns the index in the underlying buffer for a given logical element
  /// index + addend.
  #[inline]
  fn wrap_add(&self, idx: usize, addend: usize) -> usize {
    wrap_index(idx.wrapping_add(addend), self.slots.len())
  }

  #[inline]
  fn to_physical_idx(&self, idx: usize) -> usize {
    self.wrap_add(self.head, idx)
  }

  /// Returns the index in the underlying buffer for a given logical element
  /// index - subtrahend.
  #[inline]
  fn wrap_sub(&self, idx: usize, subtrahend: usize) -> usize {
    wrap_index(
      idx.wrapping_sub(subtrahend).wrapping_add(self.slots.len()),
      self.slots.len(),
    )
  }
}

/// Returns the index in the underlying buffer for a given logical element index.
#[inline]
pub(crate) const fn wrap_index(logical_index: usize, capacity: usize) -> usize {
  debug_assert!(logical_index < capacity || (logical_index - capacity) < capacity);
  if logical_index >= capacity {
    logical_index - capacity
  } else {
    logical_index
  }
}

fn vacant_slots<T>(len: usize) -> Box<[Option<T>]> {
  repeat_with(|| None).take(len).collect()
}

fn try_vacant_slots<T>(len: usize) -> Result<Box<[Option<T>]>, Error> {
  let mut slots = Vec::new();
  slots
    .try_reserve_exact(len)
    .map_err(|_err| Error::AllocationFailure { requested: len })?;
  slots.extend(repeat_with(|| None).take(len));
  Ok(slots.into_boxed_slice())
}
