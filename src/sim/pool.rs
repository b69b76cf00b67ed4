//! Ordered entity pool
//!
//! A singly-linked list threaded through an index arena. Slots released by
//! `remove` go onto a free list and are reused by later appends; every reuse
//! bumps the slot generation so handles to the old occupant stop resolving.
//!
//! Removing while walking the list is safe as long as the walker grabs the
//! next handle before unlinking the current one:
//!
//! ```ignore
//! let mut cursor = pool.first();
//! while let Some(handle) = cursor {
//!     cursor = pool.next_of(handle);
//!     if doomed(pool.get(handle)) {
//!         pool.remove(handle)?;
//!     }
//! }
//! ```

use std::sync::atomic::{AtomicU32, Ordering};

use super::error::{SimError, SimResult};

static NEXT_POOL_ID: AtomicU32 = AtomicU32::new(1);

/// Stable reference to a node in one specific pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    pool: u32,
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Slot<T> {
    value: Option<T>,
    next: Option<u32>,
    generation: u32,
}

/// Insertion-ordered collection with O(1) append and stable handles
#[derive(Debug, Clone)]
pub struct EntityPool<T> {
    id: u32,
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    head: Option<u32>,
    tail: Option<u32>,
    count: usize,
    limit: usize,
}

impl<T> Default for EntityPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EntityPool<T> {
    /// Unbounded pool (limited only by the allocator)
    pub fn new() -> Self {
        Self::with_limit(usize::MAX)
    }

    /// Pool that refuses to hold more than `limit` live nodes
    pub fn with_limit(limit: usize) -> Self {
        Self {
            id: NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed),
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            count: 0,
            limit,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    fn handle_at(&self, index: u32) -> Handle {
        Handle {
            pool: self.id,
            index,
            generation: self.slots[index as usize].generation,
        }
    }

    fn live_slot(&self, handle: Handle) -> Option<&Slot<T>> {
        if handle.pool != self.id {
            return None;
        }
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation && slot.value.is_some())
    }

    /// Link a new node at the tail
    pub fn append(&mut self, value: T) -> SimResult<Handle> {
        if self.count >= self.limit {
            return Err(SimError::OutOfMemory {
                live: self.count,
                limit: self.limit,
            });
        }

        let index = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.value = Some(value);
                slot.next = None;
                index
            }
            None => {
                self.slots
                    .try_reserve(1)
                    .map_err(|_| SimError::OutOfMemory {
                        live: self.count,
                        limit: self.limit,
                    })?;
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    value: Some(value),
                    next: None,
                    generation: 0,
                });
                index
            }
        };

        match self.tail {
            Some(tail) => self.slots[tail as usize].next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.count += 1;

        Ok(self.handle_at(index))
    }

    /// Unlink a node and hand its value back
    pub fn remove(&mut self, handle: Handle) -> SimResult<T> {
        if self.live_slot(handle).is_none() {
            return Err(SimError::NotFound {
                index: handle.index,
                generation: handle.generation,
            });
        }

        // Find the predecessor; the head has none
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(index) = cursor {
            if index == handle.index {
                break;
            }
            prev = Some(index);
            cursor = self.slots[index as usize].next;
        }

        let slot = &mut self.slots[handle.index as usize];
        let next = slot.next.take();
        let value = slot.value.take();
        slot.generation = slot.generation.wrapping_add(1);

        match prev {
            Some(prev) => self.slots[prev as usize].next = next,
            None => self.head = next,
        }
        if self.tail == Some(handle.index) {
            self.tail = prev;
        }
        self.free.push(handle.index);
        self.count -= 1;

        value.ok_or(SimError::NotFound {
            index: handle.index,
            generation: handle.generation,
        })
    }

    /// Release every node
    pub fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            slot.next = None;
            self.free.push(index as u32);
        }
        self.head = None;
        self.tail = None;
        self.count = 0;
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.live_slot(handle).is_some()
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.live_slot(handle).and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.live_slot(handle)?;
        self.slots[handle.index as usize].value.as_mut()
    }

    /// Handle of the oldest node
    pub fn first(&self) -> Option<Handle> {
        self.head.map(|index| self.handle_at(index))
    }

    /// Handle of the node after `handle`, `None` at the tail or if `handle` is dead
    pub fn next_of(&self, handle: Handle) -> Option<Handle> {
        self.live_slot(handle)?
            .next
            .map(|index| self.handle_at(index))
    }

    /// Walk nodes in insertion order
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            pool: self,
            cursor: self.head,
            remaining: self.count,
        }
    }

    /// Update every node in order, unlinking those for which `keep` returns false
    pub fn retain_mut(&mut self, mut keep: impl FnMut(&mut T) -> bool) {
        let mut prev: Option<u32> = None;
        let mut cursor = self.head;

        while let Some(index) = cursor {
            let slot = &mut self.slots[index as usize];
            cursor = slot.next;

            let kept = slot.value.as_mut().is_some_and(&mut keep);
            if kept {
                prev = Some(index);
                continue;
            }

            slot.value = None;
            slot.next = None;
            slot.generation = slot.generation.wrapping_add(1);
            match prev {
                Some(prev) => self.slots[prev as usize].next = cursor,
                None => self.head = cursor,
            }
            if self.tail == Some(index) {
                self.tail = prev;
            }
            self.free.push(index);
            self.count -= 1;
        }
    }
}

/// Insertion-order iterator over `(handle, value)` pairs
pub struct Iter<'a, T> {
    pool: &'a EntityPool<T>,
    cursor: Option<u32>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Handle, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let slot = &self.pool.slots[index as usize];
        self.cursor = slot.next;
        self.remaining = self.remaining.saturating_sub(1);
        slot.value
            .as_ref()
            .map(|value| (self.pool.handle_at(index), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> IntoIterator for &'a EntityPool<T> {
    type Item = (Handle, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
