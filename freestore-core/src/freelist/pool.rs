use thiserror::Error;

use super::tree::Record;

/// Handle to a slot in the record pool. Indices are only meaningful for the
/// pool that issued them and may be reissued after a `free`.
pub(crate) type RecordIndex = usize;

/// The pool has no free slot and is not allowed to grow any further.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("block record pool exhausted")]
pub(crate) struct PoolExhausted;

/// Fixed-size slab of block records.
///
/// Slots are kept in a `Vec` and recycled through a free-index stack. The
/// slab grows in batches of [`RecordPool::BATCH`] slots; an optional
/// `capacity` bounds the total number of slots ever created, which makes
/// allocation failure observable and testable. The pool knows nothing about
/// the tree the records participate in.
#[derive(Debug, Clone)]
pub(crate) struct RecordPool {
  slots: Vec<Option<Record>>,
  free: Vec<RecordIndex>,
  capacity: Option<usize>,
}

impl RecordPool {
  /// Slots added per growth step.
  const BATCH: usize = 64;

  pub fn new(capacity: Option<usize>) -> Self {
    RecordPool {
      slots: Vec::new(),
      free: Vec::new(),
      capacity,
    }
  }

  /// Store `record` in a free slot and return its index.
  pub fn alloc(&mut self, record: Record) -> Result<RecordIndex, PoolExhausted> {
    if self.free.is_empty() {
      self.grow()?;
    }
    let index = self
      .free
      .pop()
      .expect("grow leaves at least one free slot");
    debug_assert!(self.slots[index].is_none(), "free list held a live slot");
    self.slots[index] = Some(record);
    Ok(index)
  }

  /// Extend the slab by one batch, respecting the capacity bound.
  fn grow(&mut self) -> Result<(), PoolExhausted> {
    let start = self.slots.len();
    let batch = match self.capacity {
      Some(cap) => Self::BATCH.min(cap.saturating_sub(start)),
      None => Self::BATCH,
    };
    if batch == 0 {
      return Err(PoolExhausted);
    }
    self.slots.reserve(batch);
    for index in start..start + batch {
      self.slots.push(None);
      self.free.push(index);
    }
    Ok(())
  }

  /// Return a slot to the pool. Freeing never fails.
  pub fn free(&mut self, index: RecordIndex) -> Record {
    let record = self.slots[index]
      .take()
      .expect("double free of a record slot");
    self.free.push(index);
    record
  }

  pub fn get(&self, index: RecordIndex) -> &Record {
    self.slots[index]
      .as_ref()
      .expect("stale record index: slot is vacant")
  }

  pub fn get_mut(&mut self, index: RecordIndex) -> &mut Record {
    self.slots[index]
      .as_mut()
      .expect("stale record index: slot is vacant")
  }

  /// Number of live records.
  pub fn len(&self) -> usize {
    self.slots.len() - self.free.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn capacity(&self) -> Option<usize> {
    self.capacity
  }
}
