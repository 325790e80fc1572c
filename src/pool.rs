//! Fixed-capacity entity pools.
//!
//! Every transient entity (bullets, power-ups, particles, ship fragments) lives
//! in a [`Pool`] allocated once when the simulation is built.  Spawning flips
//! a slot's active flag and re-initialises its fields; retiring flips it back.
//! Nothing is allocated or freed while a game is running.
//!
//! Acquisition is deterministic: the lowest-index inactive slot always wins.
//! When every slot is busy, acquisition returns `None` / `0` and the caller
//! simply does less (fewer bullets, sparser explosions).

/// Anything that can live in a [`Pool`].
pub trait Poolable {
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
}

#[derive(Debug, Clone)]
pub struct Pool<T> {
    slots: Vec<T>,
}

impl<T: Poolable + Default> Pool<T> {
    /// Pre-allocate `capacity` inactive slots.
    pub fn with_capacity(capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|_| {
                let mut slot = T::default();
                slot.set_active(false);
                slot
            })
            .collect();
        Self { slots }
    }
}

impl<T: Poolable> Pool<T> {
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_active()).count()
    }

    #[inline]
    pub fn free_count(&self) -> usize {
        self.capacity() - self.active_count()
    }

    /// Index of the first inactive slot.
    pub fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(|s| !s.is_active())
    }

    /// Activate and return the first inactive slot, or `None` when exhausted.
    ///
    /// The caller is expected to re-initialise every field it cares about.
    pub fn acquire(&mut self) -> Option<&mut T> {
        let index = self.first_free()?;
        let slot = &mut self.slots[index];
        slot.set_active(true);
        Some(slot)
    }

    /// Acquire up to `count` slots in index order, handing each to `init`
    /// together with its ordinal (0, 1, …).  Returns how many were acquired.
    pub fn acquire_many<F>(&mut self, count: usize, mut init: F) -> usize
    where
        F: FnMut(usize, &mut T),
    {
        let mut acquired = 0;
        for slot in self.slots.iter_mut() {
            if acquired == count {
                break;
            }
            if slot.is_active() {
                continue;
            }
            slot.set_active(true);
            init(acquired, slot);
            acquired += 1;
        }
        acquired
    }

    /// Retire the slot at `index`.  Out-of-range indices are ignored.
    pub fn release(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.set_active(false);
        }
    }

    /// Retire every slot.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.set_active(false);
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    /// All slots, active or not, in index order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter()
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter(|s| s.is_active())
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().filter(|s| s.is_active())
    }

    /// Raw slot access for pairwise resolution loops that need indices.
    #[inline]
    pub fn slots_mut(&mut self) -> &mut [T] {
        &mut self.slots
    }

    #[inline]
    pub fn slots(&self) -> &[T] {
        &self.slots
    }
}
