use std::{
  collections::{BTreeSet, HashSet},
  format,
  string::ToString,
  vec,
  vec::Vec,
};

use super::*;

/// Checks the ring invariants that must hold between public calls.
fn assert_ring<T>(deque: &Deque<T>) {
  let cap = deque.slots.len();
  assert!(cap >= MIN_SLOTS);
  assert!(deque.head < cap);
  assert!(deque.tail < cap);
  assert!(deque.len() < cap);
  assert_eq!(deque.len(), (deque.tail + cap - deque.head) % cap);
  assert_eq!(deque.is_empty(), deque.len() == 0);

  let len = deque.len();
  for offset in len..cap {
    let idx = (deque.head + offset) % cap;
    assert!(deque.slots[idx].is_none(), "slot {idx} outside the ring is occupied");
  }
}

fn values<T: Copy>(deque: &Deque<T>) -> Vec<Option<T>> {
  deque.iter().map(|slot| slot.copied()).collect()
}

#[test]
fn test_push_and_get() {
  let mut list = Deque::new();
  list.push_back(1).unwrap();
  list.push_back(2).unwrap();
  list.push_back(3).unwrap();
  list.push_front(0).unwrap();

  for i in 0..4 {
    assert_eq!(list.get(i), Ok(Some(&(i as i32))));
  }
  assert_eq!(list.len(), 4);
  assert_ring(&list);
}

#[test]
fn test_remove_front_until_empty() {
  let mut list = Deque::from([0, 1, 2, 3]);
  list.push_back(5).unwrap();
  assert_eq!(list.len(), 5);
  assert!(!list.is_empty());

  for _ in 0..5 {
    let first = *list.get(0).unwrap().unwrap();
    assert_eq!(list.remove(&first), Ok(true));
    assert_ring(&list);
  }
  assert!(list.is_empty());
  assert!(!list.contains(&0));

  list.add(0).unwrap();
  assert!(list.contains(&0));
}

#[test]
fn test_iteration_and_export() {
  let mut list = Deque::new();
  for i in 0..9 {
    assert_eq!(list.add(i), Ok(true));
  }

  for (index, slot) in list.iter().enumerate() {
    assert_eq!(slot, Some(&index));
  }
  assert_eq!(list.get(-1), Ok(Some(&8)));

  let array = list.to_array_in(vec![None; list.len()].into_boxed_slice());
  assert_eq!(array[7], Some(7));

  let array = list.to_array();
  assert_eq!(array.len(), 9);
  assert_eq!(array[1], Some(1));
}

#[test]
fn test_bulk_membership() {
  let mut list: Deque<i32> = (0..9).collect();
  let zero = Deque::from([0]);
  let nine = Deque::from([9]);

  assert!(list.contains_all(&[0]));
  assert!(list.contains_all(zero.elements()));

  assert_eq!(list.add_all(nine.elements().copied()), Ok(true));
  assert_eq!(list.get(9), Ok(Some(&9)));
  assert_eq!(list.len(), 10);
  assert!(list.contains_all(&[9]));

  assert_eq!(list.remove_all(&nine), Ok(true));
  assert_eq!(list.len(), 9);
  assert!(!list.contains(&9));

  assert_eq!(list.retain_all(&zero), Ok(true));
  assert_eq!(list.len(), 1);
  assert_eq!(list.get(0), Ok(Some(&0)));

  assert_eq!(list.set(0, 1), Ok(Some(0)));
  assert_eq!(list.at(0), Ok(Some(&1)));

  list.clear();
  assert_eq!(list.len(), 0);
  assert_ring(&list);
}

#[test]
fn test_grow_then_shrink() {
  let mut list = Deque::new();
  for i in 0..100 {
    list.push_back(i).unwrap();
    list.push_front(i).unwrap();
    assert_ring(&list);
  }
  assert_eq!(list.len(), 200);

  assert_eq!(list.pop_front(), Ok(Some(99)));
  assert_eq!(list.pop_back(), Ok(Some(99)));
  assert_eq!(list.len(), 198);

  let grown = list.slots.len();
  for _ in 0..79 {
    list.pop_front().unwrap();
    list.pop_back().unwrap();
    assert_ring(&list);
  }
  assert_eq!(list.len(), 40);
  assert_eq!(list.get(0), Ok(Some(&19)));
  assert_eq!(list.get(-1), Ok(Some(&19)));
  assert!(list.slots.len() < grown);
}

#[test]
fn test_with_len() {
  let mut list = Deque::<i32>::with_len(4).unwrap();
  assert_eq!(list.len(), 4);
  assert_eq!(list.slots.len(), 8);
  for i in -4..4 {
    assert_eq!(list.get(i), Ok(None));
  }

  list.push_back(1).unwrap();
  assert_eq!(list.len(), 5);
  assert_eq!(list.at(0), Ok(None));
  assert_eq!(list.at(4), Ok(Some(&1)));
  assert_ring(&list);
}

#[test]
fn test_with_len_zero_and_one() {
  let empty = Deque::<u8>::with_len(0).unwrap();
  assert!(empty.is_empty());
  assert_ring(&empty);

  let mut one = Deque::<u8>::with_len(1).unwrap();
  assert_eq!(one.slots.len(), 2);
  assert_ring(&one);
  one.push_front(3).unwrap();
  assert_eq!(values(&one), [Some(3), None]);
  assert_ring(&one);
}

#[test]
fn test_with_len_reports_allocation_failure() {
  assert_eq!(
    Deque::<u8>::with_len(usize::MAX).unwrap_err(),
    Error::AllocationFailure {
      requested: usize::MAX
    }
  );
}

#[test]
fn test_out_of_range() {
  let mut list = Deque::from([1, 2, 3]);
  assert_eq!(list.get(3), Err(Error::OutOfRange { index: 3, len: 3 }));
  assert_eq!(list.get(-4), Err(Error::OutOfRange { index: -1, len: 3 }));
  assert_eq!(list.set(7, 0), Err(Error::OutOfRange { index: 7, len: 3 }));
  assert!(list.get_mut(isize::MIN).is_err());
  assert_eq!(
    Error::OutOfRange { index: 7, len: 3 }.to_string(),
    "index 7 out of range for length 3"
  );

  // the failed calls left the deque usable
  assert_eq!(values(&list), [Some(1), Some(2), Some(3)]);
  list.push_back(4).unwrap();
  assert_eq!(list.len(), 4);
}

#[test]
fn test_underflow() {
  let mut list = Deque::<u8>::new();
  assert_eq!(list.pop_front(), Err(Error::Underflow));
  assert_eq!(list.pop_back(), Err(Error::Underflow));
  assert_ring(&list);

  list.push_back(1).unwrap();
  assert_eq!(list.pop_back(), Ok(Some(1)));
  assert_eq!(list.pop_back(), Err(Error::Underflow));
  assert_eq!(Error::Underflow.to_string(), "pop from an empty deque");
}

#[test]
#[should_panic(expected = "Out of bounds access")]
fn test_index_out_of_bounds_panics() {
  let list = Deque::from([1]);
  let _ = &list[1];
}

#[test]
fn test_index_negative() {
  let mut list = Deque::from([1, 2, 3]);
  assert_eq!(list[-1], Some(3));
  list[-3] = None;
  assert_eq!(list[0], None);
}

#[test]
fn test_negative_index_matches_positive() {
  // Every head position, so the mapping is checked across the wrap point.
  let mut tester = Deque::new();
  let cap = tester.slots.len();
  for head_pos in 0..cap {
    tester.head = head_pos;
    tester.tail = head_pos;
    for i in 0..7 {
      tester.push_back(i).unwrap();
    }
    let len = tester.len() as isize;
    for i in 0..len {
      assert_eq!(tester.get(i), tester.get(i - len));
    }
    assert_ring(&tester);
    tester.clear();
  }
}

#[test]
fn test_push_pop_restores_state() {
  let mut tester = Deque::new();
  let cap = tester.slots.len();
  for head_pos in 0..cap {
    for len in 0..cap - 1 {
      tester.clear();
      tester.head = head_pos;
      tester.tail = head_pos;
      for i in 0..len {
        tester.push_back(i).unwrap();
      }
      let before = tester.clone();

      tester.push_back(100).unwrap();
      assert_eq!(tester.pop_back(), Ok(Some(100)));
      assert_eq!(tester, before);

      tester.push_front(200).unwrap();
      assert_eq!(tester.pop_front(), Ok(Some(200)));
      assert_eq!(tester, before);
      assert_ring(&tester);
    }
  }
}

#[test]
fn test_grow_copies_both_halves_in_order() {
  let mut tester = Deque::new();
  let cap = tester.slots.len();
  for head_pos in 0..cap {
    tester.clear();
    tester.head = head_pos;
    tester.tail = head_pos;
    for i in 0..cap - 1 {
      tester.push_back(i).unwrap();
    }
    assert_eq!(tester.slots.len(), cap);

    tester.push_back(cap - 1).unwrap();
    assert_eq!(tester.slots.len(), cap * 2);
    assert_eq!(tester.head, 0);
    let expected: Vec<_> = (0..cap).map(Some).collect();
    assert_eq!(values(&tester), expected);
    assert_ring(&tester);
  }
}

#[test]
fn test_shrink_never_below_default() {
  let mut list = Deque::new();
  for i in 0..1000 {
    list.push_back(i).unwrap();
  }
  let mut smallest = list.slots.len();
  while !list.is_empty() {
    list.pop_front().unwrap();
    smallest = smallest.min(list.slots.len());
    assert_ring(&list);
  }
  assert_eq!(smallest, DEFAULT_CAPACITY);
  assert_eq!(list.slots.len(), DEFAULT_CAPACITY);

  let mut small = Deque::<u8>::with_len(4).unwrap();
  while small.pop_back().is_ok() {}
  assert_eq!(small.slots.len(), 8);
}

#[test]
fn test_no_thrash_at_growth_boundary() {
  let mut list: Deque<usize> = (0..9).collect();
  assert_eq!(list.slots.len(), DEFAULT_CAPACITY);
  list.push_back(9).unwrap();
  let grown = list.slots.len();
  for _ in 0..50 {
    list.pop_back().unwrap();
    list.push_back(9).unwrap();
    assert_eq!(list.slots.len(), grown);
  }
}

#[test]
fn test_capacity_stays_proportional() {
  let mut list = Deque::new();
  for i in 0..10_000 {
    if i % 3 == 0 {
      list.push_front(i).unwrap();
    } else {
      list.push_back(i).unwrap();
    }
    assert!(list.slots.len() <= 2 * list.len() + DEFAULT_CAPACITY);
  }
  for _ in 0..9_990 {
    list.pop_back().unwrap();
    assert!(list.slots.len() <= 8 * list.len() + 2 * DEFAULT_CAPACITY);
  }
}

#[test]
fn test_clear_releases_and_resets() {
  let mut list: Deque<u32> = (0..100).collect();
  list.clear();
  assert_eq!(list.len(), 0);
  assert_eq!(list.slots.len(), DEFAULT_CAPACITY);
  assert_eq!((list.head, list.tail), (0, 0));
  list.push_front(1).unwrap();
  assert_eq!(list.front(), Some(&1));
}

#[test]
fn test_remove_first_occurrence_only() {
  let mut list = Deque::from([3, 1, 3, 2]);
  let cap = list.slots.len();
  assert_eq!(list.remove(&3), Ok(true));
  assert_eq!(values(&list), [Some(1), Some(3), Some(2)]);
  assert_eq!(list.slots.len(), cap);
  assert_eq!((list.head, list.tail), (0, 3));
  assert_eq!(list.remove(&4), Ok(false));
  assert_ring(&list);
}

#[test]
fn test_remove_keeps_vacant_slots() {
  let mut list = Deque::with_len(2).unwrap();
  list.push_back(1).unwrap();
  assert_eq!(list.remove(&1), Ok(true));
  assert_eq!(values(&list), [None, None]);
}

#[test]
fn test_remove_all_and_retain_all_with_vacancies() {
  let mut list = Deque::with_len(1).unwrap();
  list.add_all([1, 2, 3]).unwrap();

  let mut removed = list.clone();
  assert_eq!(removed.remove_all(&[2]), Ok(true));
  assert_eq!(values(&removed), [None, Some(1), Some(3)]);

  let set: BTreeSet<_> = [1, 3].into_iter().collect();
  assert_eq!(list.retain_all(&set), Ok(true));
  assert_eq!(values(&list), [Some(1), Some(3)]);
  assert_eq!(list.retain_all(&set), Ok(false));
  assert_ring(&list);
}

#[test]
fn test_remove_all_unchanged_keeps_layout() {
  let mut list = Deque::new();
  list.push_front(1).unwrap();
  list.push_back(2).unwrap();
  let (head, tail) = (list.head, list.tail);

  let set: HashSet<i32> = [5, 6].into_iter().collect();
  assert_eq!(list.remove_all(&set), Ok(false));
  assert_eq!((list.head, list.tail), (head, tail));
  assert_eq!(list.retain_all(&vec![1, 2]), Ok(false));
}

#[test]
fn test_add_all_reports_empty_input() {
  let mut list = Deque::<u8>::new();
  assert_eq!(list.add_all(Vec::new()), Ok(false));
  assert_eq!(list.add_all(vec![1]), Ok(true));
}

#[test]
fn test_round_trip_through_array() {
  let mut list = Deque::new();
  for i in 0..6 {
    list.push_front(i).unwrap();
  }
  list.push_back(42).unwrap();

  let rebuilt = Deque::from_slots(list.to_array().into_vec()).unwrap();
  assert_eq!(rebuilt, list);
  assert_ring(&rebuilt);
}

#[test]
fn test_round_trip_keeps_vacant_positions() {
  let mut list = Deque::with_len(2).unwrap();
  list.push_back(1).unwrap();
  list.push_front(0).unwrap();

  let rebuilt = Deque::from_slots(list.to_array().into_vec()).unwrap();
  assert_eq!(rebuilt.len(), 4);
  assert_eq!(values(&rebuilt), [Some(0), None, None, Some(1)]);
  assert_eq!(rebuilt, list);
  assert_ring(&rebuilt);
}

#[test]
fn test_slice() {
  let mut list = Deque::new();
  for i in 0..5 {
    list.push_front(4 - i).unwrap();
  }
  assert_eq!(values(&list.slice(0, 5).unwrap()), values(&list));
  assert_eq!(values(&list.slice(-2, 5).unwrap()), [Some(3), Some(4)]);
  assert!(list.slice(2, 2).unwrap().is_empty());
  assert_eq!(
    list.slice(0, 6).unwrap_err(),
    Error::OutOfRange { index: 6, len: 5 }
  );
  assert_eq!(
    list.slice(4, 1).unwrap_err(),
    Error::OutOfRange { index: 4, len: 5 }
  );

  let sliced = list.slice(1, 4).unwrap();
  assert_eq!(sliced.slots.len(), 6);
  assert_ring(&sliced);
}

#[test]
fn test_front_back() {
  let mut list = Deque::<u8>::with_len(1).unwrap();
  assert_eq!(list.front(), None);
  list.push_back(2).unwrap();
  assert_eq!(list.front(), None);
  assert_eq!(list.back(), Some(&2));
  list.pop_front().unwrap();
  assert_eq!(list.front(), Some(&2));
}

#[test]
fn test_append() {
  let mut left: Deque<_> = (0..8).collect();
  let mut right: Deque<_> = (8..20).collect();
  left.append(&mut right).unwrap();
  assert_eq!(values(&left), (0..20).map(Some).collect::<Vec<_>>());
  assert!(right.is_empty());
  assert_ring(&left);
  assert_ring(&right);
}

#[test]
fn test_display() {
  let mut list = Deque::from([1, 2]);
  assert_eq!(list.to_string(), "[\n 1\n 2\n]");

  list.set(0, 10).unwrap();
  list.push_front(0).unwrap();
  assert_eq!(format!("{list}"), "[\n 0\n 10\n 2\n]");

  let vacant = Deque::<u8>::with_len(1).unwrap();
  assert_eq!(vacant.to_string(), "[\n <empty>\n]");
  assert_eq!(Deque::<u8>::new().to_string(), "[\n]");
}

#[test]
fn test_debug() {
  let mut list = Deque::with_len(1).unwrap();
  list.push_back("a").unwrap();
  assert_eq!(format!("{list:?}"), "[None, Some(\"a\")]");
}

#[test]
fn test_eq_and_hash() {
  use core::hash::BuildHasher;
  use std::collections::hash_map::RandomState;

  let mut a = Deque::new();
  let mut b = Deque::new();
  for i in 0..5 {
    a.push_back(i).unwrap();
    b.push_front(4 - i).unwrap();
  }
  assert_ne!(a.head, b.head);
  assert_eq!(a, b);

  let state = RandomState::new();
  assert_eq!(state.hash_one(&a), state.hash_one(&b));

  b.set(0, 9).unwrap();
  assert_ne!(a, b);
}

#[test]
fn test_macro_and_conversions() {
  let list = crate::deque![1, 2, 3];
  assert_eq!(list, Deque::from(vec![1, 2, 3]));
  assert_eq!(list, Deque::from_iter_checked([1, 2, 3]).unwrap());

  let mut extended: Deque<i32> = Deque::new();
  extended.extend(&[1, 2]);
  extended.extend([3]);
  assert_eq!(extended, list);
}
