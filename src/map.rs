use std::{fmt, hash::Hasher};

use rustc_hash::FxHasher;

use crate::aggregate::StationAggregate;

const INITIAL_CAPACITY: usize = 1 << 12;

#[derive(Clone)]
struct Entry {
    hash: u64,
    key: Box<[u8]>,
    value: StationAggregate,
}

/// Open-addressing map from raw station name to its aggregate.
///
/// Slots are probed linearly and the table doubles once it is half full, so
/// the number of distinct stations is not bounded up front.
#[derive(Clone)]
pub struct AggregateTable {
    slots: Vec<Option<Entry>>,
    len: usize,
}

#[inline]
fn hash_key(key: &[u8]) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(key);
    hasher.finish()
}

impl AggregateTable {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity.max(16).next_power_of_two()],
            len: 0,
        }
    }

    #[inline]
    fn find_slot(&self, hash: u64, key: &[u8]) -> usize {
        let mask = self.slots.len() - 1;
        let mut slot = hash as usize & mask;
        loop {
            match &self.slots[slot] {
                Some(entry) if entry.hash != hash || *entry.key != *key => {
                    slot = (slot + 1) & mask;
                }
                _ => return slot,
            }
        }
    }

    fn insert_at(&mut self, slot: usize, entry: Entry) {
        self.slots[slot] = Some(entry);
        self.len += 1;
        if self.len * 2 > self.slots.len() {
            self.grow();
        }
    }

    fn grow(&mut self) {
        let capacity = self.slots.len() * 2;
        let old = std::mem::replace(&mut self.slots, vec![None; capacity]);
        for entry in old.into_iter().flatten() {
            let slot = self.find_slot(entry.hash, &entry.key);
            self.slots[slot] = Some(entry);
        }
    }

    #[inline]
    pub fn record(&mut self, key: &[u8], temperature: i32) {
        let hash = hash_key(key);
        let slot = self.find_slot(hash, key);
        match &mut self.slots[slot] {
            Some(entry) => entry.value.record(temperature),
            None => self.insert_at(
                slot,
                Entry {
                    hash,
                    key: key.into(),
                    value: StationAggregate::new(temperature),
                },
            ),
        }
    }

    pub fn merge(&mut self, other: AggregateTable) {
        for entry in other.slots.into_iter().flatten() {
            let slot = self.find_slot(entry.hash, &entry.key);
            match &mut self.slots[slot] {
                Some(existing) => existing.value.merge(&entry.value),
                None => self.insert_at(slot, entry),
            }
        }
    }

    pub fn get(&self, key: &[u8]) -> Option<&StationAggregate> {
        let slot = self.find_slot(hash_key(key), key);
        self.slots[slot].as_ref().map(|entry| &entry.value)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &StationAggregate)> {
        self.slots
            .iter()
            .flatten()
            .map(|entry| (&*entry.key, &entry.value))
    }

    pub fn sorted(&self) -> Vec<(&[u8], &StationAggregate)> {
        let mut entries = self.iter().collect::<Vec<_>>();
        entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        entries
    }
}

impl Default for AggregateTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for AggregateTable {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl Eq for AggregateTable {}

impl fmt::Debug for AggregateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.sorted()
                    .into_iter()
                    .map(|(key, value)| (String::from_utf8_lossy(key), value)),
            )
            .finish()
    }
}
