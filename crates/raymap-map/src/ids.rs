//! Object id allocation.
//!
//! Every object on a map, whether placed on a tile or minted by a script
//! spawn, carries a one-byte id unique within its document.

use std::collections::BTreeSet;

/// Number of distinct object ids.
pub const ID_COUNT: usize = 256;

/// All 256 object ids are in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("all 256 object ids are in use")]
pub struct PoolExhausted;

/// Set of ids in use plus a rotating probe.
///
/// Allocation hands out the probe and moves it on, so freshly released ids
/// are not reused straight away while unused ids remain ahead of the probe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdPool {
    probe: u8,
    used: BTreeSet<u8>,
}

impl IdPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next free id at or after the probe, wrapping at 256.
    pub fn allocate(&mut self) -> Result<u8, PoolExhausted> {
        if self.used.len() >= ID_COUNT {
            return Err(PoolExhausted);
        }
        loop {
            let id = self.probe;
            self.probe = self.probe.wrapping_add(1);
            if self.used.insert(id) {
                log::debug!("allocated object id {id}");
                return Ok(id);
            }
        }
    }

    /// Return an id to the pool. Returns `false` if it was not in use.
    pub fn release(&mut self, id: u8) -> bool {
        let released = self.used.remove(&id);
        if released {
            log::debug!("released object id {id}");
        }
        released
    }

    /// Mark a known id as used. Returns `false` if it already was.
    pub fn reserve(&mut self, id: u8) -> bool {
        self.used.insert(id)
    }

    pub fn contains(&self, id: u8) -> bool {
        self.used.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    pub fn clear(&mut self) {
        self.used.clear();
        self.probe = 0;
    }

    /// Ids in use, ascending.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.used.iter().copied()
    }

    /// Keep only the ids `keep` returns true for.
    pub fn retain(&mut self, mut keep: impl FnMut(u8) -> bool) {
        self.used.retain(|&id| {
            let kept = keep(id);
            if !kept {
                log::debug!("released object id {id}");
            }
            kept
        });
    }
}
