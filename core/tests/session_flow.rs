use saliency_survey_core::{
    demo_image_sets, Advance, FetchError, ImageSet, MaskImage, MaskType, RankingEntry,
    RankingStore, Session, SessionError, SessionPhase, SetResolution,
};

fn build_set(id: &str, mask_ids: &[&str]) -> ImageSet {
    ImageSet {
        id: id.to_string(),
        original_image: format!("/file/{id}/original.png"),
        masks: mask_ids
            .iter()
            .map(|mask_id| MaskImage {
                id: mask_id.to_string(),
                kind: MaskType::Occlusion,
                image_url: format!("/masks/{mask_id}.png"),
                name: "Occlusion".to_string(),
            })
            .collect(),
    }
}

fn stub(id: &str) -> ImageSet {
    build_set(id, &[])
}

fn rank_in_order(set: &ImageSet, order: &[&str]) -> Vec<RankingEntry> {
    let mut store = RankingStore::new(set);
    for mask_id in order {
        store.click(mask_id);
    }
    store.finalize().expect("complete ranking")
}

#[test]
fn click_order_becomes_the_recorded_ranking() {
    let set = build_set("s1", &["A", "B", "C"]);
    let mut session = Session::preloaded(vec![set.clone(), build_set("s2", &["X"])]);
    assert_eq!(session.phase(), &SessionPhase::Ready);

    let ranking = rank_in_order(&set, &["B", "A", "C"]);
    assert_eq!(
        ranking,
        vec![
            RankingEntry::new("B", 1),
            RankingEntry::new("A", 2),
            RankingEntry::new("C", 3),
        ]
    );
    assert_eq!(session.submit(ranking.clone()), Ok(Advance::Next));
    assert_eq!(session.results().get("s1"), Some(ranking.as_slice()));
    assert_eq!(session.current_set().map(|set| set.id.as_str()), Some("s2"));
    assert_eq!(session.position(), Some((2, 2)));
}

#[test]
fn two_set_session_finishes_with_both_results() {
    let first = build_set("s1", &["a", "b"]);
    let second = build_set("s2", &["c", "d", "e"]);
    let mut session = Session::preloaded(vec![first.clone(), second.clone()]);

    session
        .submit(rank_in_order(&first, &["b", "a"]))
        .expect("first set");
    let advance = session
        .submit(rank_in_order(&second, &["e", "c", "d"]))
        .expect("second set");

    assert_eq!(advance, Advance::Finished);
    assert!(session.is_finished());
    assert_eq!(session.position(), None);
    assert_eq!(session.results().len(), 2);
    for (_, ranking) in session.results().iter() {
        let ranks: Vec<u32> = ranking.iter().map(|entry| entry.rank).collect();
        let expected: Vec<u32> = (1..=ranking.len() as u32).collect();
        assert_eq!(ranks, expected);
    }
    assert_eq!(session.submit(Vec::new()), Err(SessionError::NotReady));
}

#[test]
fn empty_listing_reports_no_data() {
    let mut session = Session::new(SetResolution::OnDemand);
    let generation = session.begin_load();
    assert_eq!(session.apply_listing(generation, Ok(Vec::new())), None);
    assert_eq!(session.phase(), &SessionPhase::Error(SessionError::NoData));
    assert!(session.current_set().is_none());
}

#[test]
fn listing_failure_enters_error_and_retry_restarts_loading() {
    let mut session = Session::new(SetResolution::OnDemand);
    let generation = session.begin_load();
    let failure = FetchError::Status {
        url: "/images".to_string(),
        status: 502,
    };
    session.apply_listing(generation, Err(failure.clone()));
    assert_eq!(
        session.phase(),
        &SessionPhase::Error(SessionError::Fetch(failure))
    );

    let retry_generation = session.retry().expect("retry from error");
    assert_ne!(retry_generation, generation);
    assert_eq!(session.phase(), &SessionPhase::Loading);
    assert_eq!(session.retry(), None);

    let ticket = session
        .apply_listing(retry_generation, Ok(vec![stub("7")]))
        .expect("details ticket");
    assert_eq!(ticket.set_id, "7");
}

#[test]
fn on_demand_sets_load_details_per_set() {
    let mut session = Session::new(SetResolution::OnDemand);
    let generation = session.begin_load();
    let ticket = session
        .apply_listing(generation, Ok(vec![stub("1"), stub("2")]))
        .expect("first ticket");
    assert_eq!(session.phase(), &SessionPhase::Loading);
    assert_eq!(ticket.index, 0);

    let first = build_set("1", &["a", "b"]);
    assert!(session.apply_details(&ticket, Ok(first.clone())));
    assert_eq!(session.phase(), &SessionPhase::Ready);

    let advance = session
        .submit(rank_in_order(&first, &["a", "b"]))
        .expect("submit");
    let Advance::Fetch(next) = &advance else {
        panic!("expected a fetch for the second set, got {advance:?}");
    };
    assert_eq!(next.set_id, "2");
    assert_eq!(session.phase(), &SessionPhase::Loading);
    assert!(session.current_set().is_none());
}

#[test]
fn stale_details_are_discarded() {
    let mut session = Session::new(SetResolution::OnDemand);
    let generation = session.begin_load();
    let stale = session
        .apply_listing(generation, Ok(vec![stub("1")]))
        .expect("ticket");

    let failure = FetchError::Transport("offline".to_string());
    assert!(session.apply_details(&stale, Err(failure)));
    let fresh_generation = session.retry().expect("retry");
    let fresh = session
        .apply_listing(fresh_generation, Ok(vec![stub("1")]))
        .expect("fresh ticket");

    assert!(!session.apply_details(&stale, Ok(build_set("1", &["old"]))));
    assert_eq!(session.phase(), &SessionPhase::Loading);
    assert!(session.apply_details(&fresh, Ok(build_set("1", &["new"]))));
    assert_eq!(
        session.current_set().map(|set| set.masks[0].id.as_str()),
        Some("new")
    );
}

#[test]
fn details_for_another_set_id_are_discarded() {
    let mut session = Session::new(SetResolution::OnDemand);
    let generation = session.begin_load();
    let ticket = session
        .apply_listing(generation, Ok(vec![stub("1")]))
        .expect("ticket");
    assert!(!session.apply_details(&ticket, Ok(build_set("2", &["a"]))));
    assert_eq!(session.phase(), &SessionPhase::Loading);
}

#[test]
fn stale_listing_is_ignored() {
    let mut session = Session::new(SetResolution::OnDemand);
    let old_generation = session.begin_load();
    let new_generation = session.begin_load();
    assert_eq!(session.apply_listing(old_generation, Ok(vec![stub("1")])), None);
    assert_eq!(session.set_count(), 0);
    assert!(session
        .apply_listing(new_generation, Ok(vec![stub("1")]))
        .is_some());
}

#[test]
fn incomplete_or_invalid_rankings_are_rejected() {
    let set = build_set("s1", &["a", "b", "c"]);
    let mut session = Session::preloaded(vec![set]);

    assert_eq!(
        session.submit(vec![RankingEntry::new("a", 1)]),
        Err(SessionError::IncompleteRanking {
            expected: 3,
            found: 1
        })
    );
    assert_eq!(
        session.submit(vec![
            RankingEntry::new("a", 1),
            RankingEntry::new("b", 2),
            RankingEntry::new("z", 3),
        ]),
        Err(SessionError::UnknownMask("z".to_string()))
    );
    assert_eq!(
        session.submit(vec![
            RankingEntry::new("a", 1),
            RankingEntry::new("a", 2),
            RankingEntry::new("b", 3),
        ]),
        Err(SessionError::DuplicateMask("a".to_string()))
    );
    assert_eq!(
        session.submit(vec![
            RankingEntry::new("a", 1),
            RankingEntry::new("b", 1),
            RankingEntry::new("c", 3),
        ]),
        Err(SessionError::InvalidRank(1))
    );
    assert!(session.results().is_empty());
    assert_eq!(session.phase(), &SessionPhase::Ready);
}

#[test]
fn demo_catalog_runs_to_completion() {
    let sets = demo_image_sets();
    let mut session = Session::preloaded(sets.clone());
    for set in &sets {
        let order: Vec<&str> = set.masks.iter().rev().map(|mask| mask.id.as_str()).collect();
        session
            .submit(rank_in_order(set, &order))
            .expect("submit demo set");
    }
    assert!(session.is_finished());
    assert_eq!(session.results().len(), sets.len());
    let json = session.results().to_pretty_json().expect("results json");
    assert!(json.contains("\"maskId\""));
}

#[test]
fn repeated_set_id_refuses_the_second_ranking() {
    let first = build_set("7", &["a"]);
    let second = build_set("7", &["b"]);
    let mut session = Session::preloaded(vec![first.clone(), second.clone()]);

    let ranking = rank_in_order(&first, &["a"]);
    assert_eq!(session.submit(ranking.clone()), Ok(Advance::Next));

    let err = session
        .submit(rank_in_order(&second, &["b"]))
        .unwrap_err();
    assert_eq!(err, SessionError::AlreadyRecorded("7".to_string()));
    assert_eq!(session.phase(), &SessionPhase::Ready);
    assert!(!session.is_finished());
    assert_eq!(session.results().get("7"), Some(ranking.as_slice()));
}
