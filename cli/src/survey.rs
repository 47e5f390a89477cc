use clap::ValueEnum;

use saliency_survey_core::{
    demo_image_sets, Advance, ImageSet, RankingEntry, RankingStore, Results, Session,
    SessionError, SessionPhase, SetResolution,
};

use crate::provider::Provider;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum RankOrder {
    /// Rank masks in the order the provider lists them.
    Given,
    /// Rank masks in reverse listing order.
    Reverse,
}

/// Clicks every mask of `set` in `order` and returns the finalized ranking.
pub(crate) fn rank_set(set: &ImageSet, order: RankOrder) -> Vec<RankingEntry> {
    let mut store = RankingStore::new(set);
    let mut ids: Vec<&str> = set.masks.iter().map(|mask| mask.id.as_str()).collect();
    if order == RankOrder::Reverse {
        ids.reverse();
    }
    for id in ids {
        store.click(id);
    }
    store.finalize().unwrap_or_default()
}

/// Drives a whole session headlessly. Without a provider the built-in demo
/// catalog is used.
pub(crate) async fn run(
    provider: Option<&Provider>,
    order: RankOrder,
) -> Result<Results, SessionError> {
    let (mut session, mut ticket) = match provider {
        Some(provider) => {
            let mut session = Session::new(SetResolution::OnDemand);
            let generation = session.begin_load();
            let listing = provider.image_sets().await;
            let ticket = session.apply_listing(generation, listing);
            (session, ticket)
        }
        None => (Session::preloaded(demo_image_sets()), None),
    };
    loop {
        if let (Some(pending), Some(provider)) = (ticket.take(), provider) {
            let details = provider.image_set_details(&pending.set_id).await;
            session.apply_details(&pending, details);
        }
        match session.phase() {
            SessionPhase::Error(err) => return Err(err.clone()),
            SessionPhase::Finished => return Ok(session.results().clone()),
            SessionPhase::Loading => return Err(SessionError::NotReady),
            SessionPhase::Ready => {}
        }
        let Some(set) = session.current_set().cloned() else {
            return Err(SessionError::NotReady);
        };
        let ranking = rank_set(&set, order);
        println!(
            "ranked set {} ({} masks)",
            set.id,
            ranking.len()
        );
        ticket = match session.submit(ranking)? {
            Advance::Fetch(next) => Some(next),
            Advance::Next | Advance::Finished => None,
        };
    }
}
