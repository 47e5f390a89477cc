use crate::error::{FetchError, SessionError};
use crate::model::{ImageSet, RankingEntry, Results};

/// Whether the listing already carries full image sets (built-in catalog) or
/// only stubs whose masks are fetched per set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetResolution {
    Preloaded,
    OnDemand,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    Ready,
    Error(SessionError),
    Finished,
}

/// Identifies the request a set-details fetch was issued for. A resolution is
/// only applied while its ticket still matches the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub index: usize,
    pub set_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The next set is already resolved and ready for ranking.
    Next,
    /// The next set needs its details fetched.
    Fetch(FetchTicket),
    Finished,
}

#[derive(Debug, Clone)]
pub struct Session {
    resolution: SetResolution,
    sets: Vec<ImageSet>,
    index: usize,
    current: Option<ImageSet>,
    results: Results,
    phase: SessionPhase,
    generation: u64,
}

impl Session {
    pub fn new(resolution: SetResolution) -> Self {
        Self {
            resolution,
            sets: Vec::new(),
            index: 0,
            current: None,
            results: Results::new(),
            phase: SessionPhase::Loading,
            generation: 0,
        }
    }

    /// Session over fully resolved sets; advancing is a pure index bump.
    pub fn preloaded(sets: Vec<ImageSet>) -> Self {
        let mut session = Self::new(SetResolution::Preloaded);
        let generation = session.begin_load();
        session.apply_listing(generation, Ok(sets));
        session
    }

    /// Starts a load from scratch, dropping sets, results and any in-flight
    /// request. Returns the generation the listing must be applied with.
    pub fn begin_load(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.sets.clear();
        self.index = 0;
        self.current = None;
        self.results = Results::new();
        self.phase = SessionPhase::Loading;
        self.generation
    }

    /// Leaves the error phase by restarting the whole load.
    pub fn retry(&mut self) -> Option<u64> {
        match self.phase {
            SessionPhase::Error(_) => Some(self.begin_load()),
            _ => None,
        }
    }

    pub fn apply_listing(
        &mut self,
        generation: u64,
        listing: Result<Vec<ImageSet>, FetchError>,
    ) -> Option<FetchTicket> {
        if generation != self.generation || self.phase != SessionPhase::Loading {
            return None;
        }
        match listing {
            Err(err) => {
                self.phase = SessionPhase::Error(SessionError::Fetch(err));
                None
            }
            Ok(sets) if sets.is_empty() => {
                self.phase = SessionPhase::Error(SessionError::NoData);
                None
            }
            Ok(sets) => {
                self.sets = sets;
                self.index = 0;
                self.enter_current_set()
            }
        }
    }

    /// Applies a set-details resolution. Returns `false` when the ticket is
    /// stale and the resolution was discarded.
    pub fn apply_details(
        &mut self,
        ticket: &FetchTicket,
        details: Result<ImageSet, FetchError>,
    ) -> bool {
        if !self.is_current_ticket(ticket) {
            return false;
        }
        match details {
            Ok(set) if set.id != ticket.set_id => false,
            Ok(set) => {
                self.current = Some(set);
                self.phase = SessionPhase::Ready;
                true
            }
            Err(err) => {
                self.phase = SessionPhase::Error(SessionError::Fetch(err));
                true
            }
        }
    }

    pub fn is_current_ticket(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation
            && ticket.index == self.index
            && self.phase == SessionPhase::Loading
            && self
                .sets
                .get(self.index)
                .is_some_and(|set| set.id == ticket.set_id)
    }

    /// Records a finalized ranking for the current set and moves on.
    pub fn submit(&mut self, ranking: Vec<RankingEntry>) -> Result<Advance, SessionError> {
        let current = match (&self.phase, &self.current) {
            (SessionPhase::Ready, Some(current)) => current,
            _ => return Err(SessionError::NotReady),
        };
        validate_ranking(current, &ranking)?;
        let set_id = current.id.clone();
        if !self.results.record(&set_id, ranking) {
            return Err(SessionError::AlreadyRecorded(set_id));
        }
        if self.index + 1 < self.sets.len() {
            self.index += 1;
            Ok(match self.enter_current_set() {
                Some(ticket) => Advance::Fetch(ticket),
                None => Advance::Next,
            })
        } else {
            self.current = None;
            self.phase = SessionPhase::Finished;
            Ok(Advance::Finished)
        }
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn current_set(&self) -> Option<&ImageSet> {
        self.current.as_ref()
    }

    pub fn results(&self) -> &Results {
        &self.results
    }

    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    /// One-based position of the current set and the total set count.
    pub fn position(&self) -> Option<(usize, usize)> {
        if self.sets.is_empty() || self.phase == SessionPhase::Finished {
            return None;
        }
        Some((self.index + 1, self.sets.len()))
    }

    pub fn is_finished(&self) -> bool {
        self.phase == SessionPhase::Finished
    }

    fn enter_current_set(&mut self) -> Option<FetchTicket> {
        let set = self.sets.get(self.index)?;
        match self.resolution {
            SetResolution::Preloaded => {
                self.current = Some(set.clone());
                self.phase = SessionPhase::Ready;
                None
            }
            SetResolution::OnDemand => {
                let ticket = FetchTicket {
                    generation: self.generation,
                    index: self.index,
                    set_id: set.id.clone(),
                };
                self.current = None;
                self.phase = SessionPhase::Loading;
                Some(ticket)
            }
        }
    }
}

/// Checks that `ranking` ranks every mask of `set` exactly once with ranks
/// 1..=N.
pub fn validate_ranking(set: &ImageSet, ranking: &[RankingEntry]) -> Result<(), SessionError> {
    let expected = set.masks.len();
    if ranking.len() != expected {
        return Err(SessionError::IncompleteRanking {
            expected,
            found: ranking.len(),
        });
    }
    let mut seen_ranks = vec![false; expected];
    for (pos, entry) in ranking.iter().enumerate() {
        if !set.has_mask(&entry.mask_id) {
            return Err(SessionError::UnknownMask(entry.mask_id.clone()));
        }
        if ranking[..pos]
            .iter()
            .any(|other| other.mask_id == entry.mask_id)
        {
            return Err(SessionError::DuplicateMask(entry.mask_id.clone()));
        }
        let slot = (entry.rank as usize).checked_sub(1);
        match slot.and_then(|slot| seen_ranks.get_mut(slot)) {
            Some(seen) if !*seen => *seen = true,
            _ => return Err(SessionError::InvalidRank(entry.rank)),
        }
    }
    Ok(())
}
