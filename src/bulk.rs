use std::{
  boxed::Box,
  collections::{BTreeSet, VecDeque},
  vec::Vec,
};

use super::{try_vacant_slots, Deque, Error};

/// A collection that can answer whether it holds a value.
///
/// This is the companion-collection seam of [`Deque::remove_all`] and
/// [`Deque::retain_all`]. Their cost is one [`has`](Membership::has) call per
/// slot, so a hashed or ordered set keeps them close to linear.
pub trait Membership<T: ?Sized> {
  /// Returns `true` if `value` is a member of the collection.
  fn has(&self, value: &T) -> bool;
}

impl<T: PartialEq> Membership<T> for Deque<T> {
  #[inline]
  fn has(&self, value: &T) -> bool {
    self.contains(value)
  }
}

impl<T: PartialEq> Membership<T> for [T] {
  #[inline]
  fn has(&self, value: &T) -> bool {
    self.contains(value)
  }
}

impl<T: PartialEq, const N: usize> Membership<T> for [T; N] {
  #[inline]
  fn has(&self, value: &T) -> bool {
    self.contains(value)
  }
}

impl<T: PartialEq> Membership<T> for Vec<T> {
  #[inline]
  fn has(&self, value: &T) -> bool {
    self.contains(value)
  }
}

impl<T: PartialEq> Membership<T> for VecDeque<T> {
  #[inline]
  fn has(&self, value: &T) -> bool {
    self.contains(value)
  }
}

impl<T: Ord> Membership<T> for BTreeSet<T> {
  #[inline]
  fn has(&self, value: &T) -> bool {
    self.contains(value)
  }
}

#[cfg(feature = "std")]
impl<T, S> Membership<T> for std::collections::HashSet<T, S>
where
  T: Eq + core::hash::Hash,
  S: core::hash::BuildHasher,
{
  #[inline]
  fn has(&self, value: &T) -> bool {
    self.contains(value)
  }
}

impl<T> Deque<T> {
  /// Appends `value` to the back, returning `true` since the deque always
  /// changes.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let mut deque = Deque::new();
  /// assert_eq!(deque.add("a"), Ok(true));
  /// assert_eq!(deque.back(), Some(&"a"));
  /// ```
  #[inline]
  pub fn add(&mut self, value: T) -> Result<bool, Error> {
    self.push_back(value)?;
    Ok(true)
  }

  /// Appends every value to the back in iteration order, returning whether
  /// any value was appended.
  ///
  /// If the buffer cannot grow midway, the values already appended are
  /// removed again and the error is returned.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let mut deque = Deque::from([0]);
  /// assert_eq!(deque.add_all([1, 2]), Ok(true));
  /// assert_eq!(deque.add_all([]), Ok(false));
  /// assert_eq!(deque, Deque::from([0, 1, 2]));
  /// ```
  pub fn add_all<I: IntoIterator<Item = T>>(&mut self, values: I) -> Result<bool, Error> {
    let mut appended = 0usize;
    for value in values {
      if let Err(err) = self.push_back(value) {
        self.discard_back(appended);
        return Err(err);
      }
      appended += 1;
    }
    Ok(appended > 0)
  }

  /// Removes every element that is a member of `other`, returning whether
  /// anything was removed. Vacant slots are kept.
  ///
  /// ## Examples
  ///
  /// ```
  /// use std::collections::HashSet;
  /// use ring_deque::Deque;
  ///
  /// let mut deque = Deque::from([1, 2, 3, 4]);
  /// let odd: HashSet<i32> = [1, 3].into_iter().collect();
  /// assert_eq!(deque.remove_all(&odd), Ok(true));
  /// assert_eq!(deque, Deque::from([2, 4]));
  /// assert_eq!(deque.remove_all(&odd), Ok(false));
  /// ```
  pub fn remove_all<C>(&mut self, other: &C) -> Result<bool, Error>
  where
    C: Membership<T> + ?Sized,
  {
    self.rebuild_where(|slot| slot.as_ref().map_or(true, |value| !other.has(value)))
  }

  /// Keeps only the elements that are members of `other`, returning whether
  /// anything was removed. Vacant slots are never members and are removed.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let mut deque = Deque::from([0, 1, 2]);
  /// assert_eq!(deque.retain_all(&[0]), Ok(true));
  /// assert_eq!(deque, Deque::from([0]));
  /// ```
  pub fn retain_all<C>(&mut self, other: &C) -> Result<bool, Error>
  where
    C: Membership<T> + ?Sized,
  {
    self.rebuild_where(|slot| slot.as_ref().is_some_and(|value| other.has(value)))
  }

  /// Copies the slots into a new boxed slice of exactly `len` entries, in
  /// logical order.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let deque = Deque::from([7, 8]);
  /// assert_eq!(&*deque.to_array(), &[Some(7), Some(8)]);
  /// ```
  pub fn to_array(&self) -> Box<[Option<T>]>
  where
    T: Clone,
  {
    self.iter().map(|slot| slot.cloned()).collect()
  }

  /// Copies the slots into `buf` when it has room for all of them, otherwise
  /// into a new boxed slice of exactly `len` entries.
  ///
  /// Entries of `buf` past `len` are left as they were.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let deque = Deque::from([1, 2]);
  /// let buf = vec![None, None, Some(9)].into_boxed_slice();
  /// assert_eq!(&*deque.to_array_in(buf), &[Some(1), Some(2), Some(9)]);
  ///
  /// let small = vec![None].into_boxed_slice();
  /// assert_eq!(deque.to_array_in(small).len(), 2);
  /// ```
  pub fn to_array_in(&self, mut buf: Box<[Option<T>]>) -> Box<[Option<T>]>
  where
    T: Clone,
  {
    if buf.len() < self.len() {
      return self.to_array();
    }
    for (dst, slot) in buf.iter_mut().zip(self.iter()) {
      *dst = slot.cloned();
    }
    buf
  }

  /// Rebuilds the sequence into a fresh buffer of the same length when some
  /// slot fails `keep`.
  fn rebuild_where<F>(&mut self, mut keep: F) -> Result<bool, Error>
  where
    F: FnMut(&Option<T>) -> bool,
  {
    let (front, back) = self.as_slices();
    if front.iter().chain(back).all(&mut keep) {
      return Ok(false);
    }
    let slots = try_vacant_slots(self.slots.len())?;
    self.rebuild(slots, keep);
    Ok(true)
  }
}

impl<T: PartialEq> Deque<T> {
  /// Returns `true` if some slot holds a value equal to `value`.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let deque = Deque::from([0, 1]);
  /// assert!(deque.contains(&1));
  /// assert!(!deque.contains(&10));
  /// ```
  #[inline]
  pub fn contains(&self, value: &T) -> bool {
    self.iter().any(|slot| slot == Some(value))
  }

  /// Returns `true` if every value is contained in the deque.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let deque = Deque::from([0, 1, 2]);
  /// assert!(deque.contains_all(&[0, 2]));
  /// assert!(!deque.contains_all(&[0, 3]));
  /// ```
  pub fn contains_all<'a, I>(&self, values: I) -> bool
  where
    I: IntoIterator<Item = &'a T>,
    T: 'a,
  {
    values.into_iter().all(|value| self.contains(value))
  }

  /// Removes the first element equal to `value`, preserving the order of the
  /// rest. Returns whether an element was removed.
  ///
  /// ## Examples
  ///
  /// ```
  /// use ring_deque::Deque;
  ///
  /// let mut deque = Deque::from([1, 2, 1]);
  /// assert_eq!(deque.remove(&1), Ok(true));
  /// assert_eq!(deque, Deque::from([2, 1]));
  /// assert_eq!(deque.remove(&5), Ok(false));
  /// ```
  pub fn remove(&mut self, value: &T) -> Result<bool, Error> {
    let Some(position) = self.iter().position(|slot| slot == Some(value)) else {
      return Ok(false);
    };
    let slots = try_vacant_slots(self.slots.len())?;
    let mut logical = 0;
    self.rebuild(slots, |_| {
      let keep = logical != position;
      logical += 1;
      keep
    });
    Ok(true)
  }
}
