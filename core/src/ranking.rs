use crate::model::{ImageSet, RankingEntry};

/// Click-order ranking of the masks of one image set.
///
/// Entries are kept in click order, so the entry at index `i` always holds
/// rank `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankingStore {
    set_id: String,
    mask_ids: Vec<String>,
    entries: Vec<RankingEntry>,
}

impl RankingStore {
    pub fn new(set: &ImageSet) -> Self {
        Self {
            set_id: set.id.clone(),
            mask_ids: set.masks.iter().map(|mask| mask.id.clone()).collect(),
            entries: Vec::new(),
        }
    }

    pub fn set_id(&self) -> &str {
        &self.set_id
    }

    /// Rebinds the store to `set` when its id differs from the current one,
    /// dropping every rank. Returns whether a rebind happened.
    pub fn sync_set(&mut self, set: &ImageSet) -> bool {
        if self.set_id == set.id {
            return false;
        }
        *self = Self::new(set);
        true
    }

    pub fn click(&mut self, mask_id: &str) -> Option<u32> {
        if self.rank_of(mask_id).is_some() {
            return None;
        }
        if !self.mask_ids.iter().any(|id| id == mask_id) {
            return None;
        }
        let rank = self.next_rank();
        self.entries.push(RankingEntry::new(mask_id, rank));
        Some(rank)
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn is_complete(&self) -> bool {
        self.entries.len() == self.mask_ids.len()
    }

    pub fn rank_of(&self, mask_id: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|entry| entry.mask_id == mask_id)
            .map(|entry| entry.rank)
    }

    pub fn next_rank(&self) -> u32 {
        self.entries.len() as u32 + 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn mask_count(&self) -> usize {
        self.mask_ids.len()
    }

    pub fn entries(&self) -> &[RankingEntry] {
        &self.entries
    }

    pub fn finalize(&self) -> Option<Vec<RankingEntry>> {
        if self.is_complete() {
            Some(self.entries.clone())
        } else {
            None
        }
    }
}
