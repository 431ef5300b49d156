use core::{fmt, marker::PhantomData};

use serde_core::{
  de::{Error, SeqAccess, Visitor},
  Deserialize, Deserializer, Serialize, Serializer,
};

use super::Deque;

/// Upper bound on the slots reserved from an untrusted length hint.
const MAX_PREALLOCATED_SLOTS: usize = 4096;

/// Serializes the slots front to back as a sequence of options.
impl<T: Serialize> Serialize for Deque<T> {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.collect_seq(self)
  }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Deque<T> {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    struct SeqVisitor<T> {
      marker: PhantomData<T>,
    }

    impl<'de, T> Visitor<'de> for SeqVisitor<T>
    where
      T: Deserialize<'de>,
    {
      type Value = Deque<T>;

      fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence")
      }

      #[inline]
      fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
      where
        A: SeqAccess<'de>,
      {
        let mut values = Deque::new();
        if let Some(hint) = seq.size_hint() {
          values.reserve(hint.min(MAX_PREALLOCATED_SLOTS)).map_err(A::Error::custom)?;
        }

        while let Some(slot) = seq.next_element::<Option<T>>()? {
          values.push_slot(slot).map_err(A::Error::custom)?;
        }

        Ok(values)
      }
    }

    let visitor = SeqVisitor {
      marker: PhantomData,
    };
    deserializer.deserialize_seq(visitor)
  }

  fn deserialize_in_place<D>(deserializer: D, place: &mut Self) -> Result<(), D::Error>
  where
    D: Deserializer<'de>,
  {
    struct SeqInPlaceVisitor<'a, T>(&'a mut Deque<T>);

    impl<'de, T> Visitor<'de> for SeqInPlaceVisitor<'_, T>
    where
      T: Deserialize<'de>,
    {
      type Value = ();

      fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence")
      }

      #[inline]
      fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
      where
        A: SeqAccess<'de>,
      {
        self.0.clear();

        while let Some(slot) = seq.next_element::<Option<T>>()? {
          self.0.push_slot(slot).map_err(A::Error::custom)?;
        }

        Ok(())
      }
    }

    deserializer.deserialize_seq(SeqInPlaceVisitor(place))
  }
}
