use ring_deque::{Deque, Error};
use std::{cell::RefCell, rc::Rc};

#[derive(Debug)]
struct DropTracker {
  id: i32,
  log: Rc<RefCell<Vec<i32>>>,
}

impl DropTracker {
  fn new(log: &Rc<RefCell<Vec<i32>>>, id: i32) -> Self {
    Self {
      id,
      log: Rc::clone(log),
    }
  }
}

impl PartialEq for DropTracker {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Drop for DropTracker {
  fn drop(&mut self) {
    self.log.borrow_mut().push(self.id);
  }
}

fn main() -> Result<(), Error> {
  let mut list = Deque::new();
  list.push_back(1)?;
  list.push_back(2)?;
  list.push_back(3)?;
  list.push_front(0)?;
  for i in 0..4 {
    assert_eq!(list.get(i)?, Some(&(i as i32)));
  }
  println!("{list}");

  list.push_back(5)?;
  while let Some(&first) = list.front() {
    assert!(list.remove(&first)?);
  }
  assert!(list.is_empty());
  assert!(!list.contains(&0));

  let mut list: Deque<i32> = (0..9).collect();
  let other = Deque::from([9]);
  assert!(list.add_all(other.elements().copied())?);
  assert_eq!(list.get(9)?, Some(&9));
  assert!(list.remove_all(&other)?);
  assert!(list.retain_all(&[0])?);
  assert_eq!(list.set(0, 1)?, Some(0));
  assert_eq!(list.at(0)?, Some(&1));

  let mut list = Deque::new();
  for i in 0..100 {
    list.push_back(i)?;
    list.push_front(i)?;
  }
  assert_eq!(list.pop_front()?, Some(99));
  assert_eq!(list.pop_back()?, Some(99));
  for _ in 0..79 {
    list.pop_front()?;
    list.pop_back()?;
  }
  assert_eq!((list.len(), list.get(0)?, list.get(-1)?), (40, Some(&19), Some(&19)));

  let mut sized = Deque::<u8>::with_len(4)?;
  sized.push_back(1)?;
  assert_eq!((sized.len(), sized.at(0)?), (5, None));
  println!("{sized}");

  let collector = Deque::collector();
  let squares = collector.reduce((1..=12).map(|n| n * n))?;
  assert_eq!(squares.back(), Some(&144));

  let drops = Rc::new(RefCell::new(Vec::new()));
  {
    let mut deque = Deque::new();
    for id in 0..4 {
      deque.push_back(DropTracker::new(&drops, id))?;
    }
    for id in 4..8 {
      deque.push_front(DropTracker::new(&drops, id))?;
    }

    let members = [DropTracker::new(&drops, 2), DropTracker::new(&drops, 6)];
    assert!(deque.remove_all(&members)?);
    assert_eq!(deque.len(), 6);
    drop(members);

    while deque.len() > 3 {
      deque.pop_front()?;
    }
    assert!(deque.pop_back()?.is_some());
  }

  let mut dropped = drops.borrow().clone();
  dropped.sort();
  assert_eq!(dropped, [0, 1, 2, 2, 3, 4, 5, 6, 6, 7]);

  println!("all scenarios passed");
  Ok(())
}
