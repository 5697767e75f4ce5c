//! Tests for the BatchLoader state machine.

use super::*;
use crate::grid::position::CellPosition;

fn config(threshold: usize) -> GridConfig {
    GridConfig {
        batch_size: 4,
        min_empty_cells_to_load: threshold,
        ..GridConfig::default()
    }
}

fn batch(prefix: &str, n: usize) -> Vec<ContentItem> {
    (0..n)
        .map(|i| ContentItem::new(ContentId::new(format!("{prefix}-{i}")).unwrap(), "t"))
        .collect()
}

fn vp(start_col: i32, end_col: i32) -> Viewport {
    Viewport {
        start_row: 0,
        end_row: 3,
        start_col,
        end_col,
    }
}

/// Loader that has already placed a seed batch.
fn seeded(threshold: usize) -> (BatchLoader, CellStore) {
    let mut loader = BatchLoader::new(&config(threshold));
    let mut store = CellStore::new();
    let request = loader
        .evaluate(&store, &Filter::any(), &vp(0, 3), None)
        .expect("seed request");
    assert_eq!(request.kind, LoadKind::Seed);
    let outcome = loader.complete(&mut store, request.ticket, Ok(batch("seed", 4)));
    assert_eq!(outcome, LoadOutcome::Placed(4));
    (loader, store)
}

mod seeding {
    use super::*;

    #[test]
    fn first_evaluation_issues_seed_regardless_of_threshold() {
        let mut loader = BatchLoader::new(&config(1000));
        let store = CellStore::new();

        let request = loader.evaluate(&store, &Filter::any(), &vp(0, 0), None);

        let request = request.expect("seed is not threshold gated");
        assert_eq!(request.kind, LoadKind::Seed);
        assert_eq!(request.batch_size, 4);
        assert!(request.exclude_ids.is_empty());
        assert_eq!(loader.state(), LoadState::Loading);
    }

    #[test]
    fn seed_items_land_on_spiral() {
        let (loader, store) = seeded(10);
        assert!(loader.is_seeded());
        assert_eq!(
            store.get(&CellPosition::ORIGIN).unwrap().id.as_str(),
            "seed-0"
        );
        assert!(store.is_filled(&CellPosition::new(-1, -1)));
    }

    #[test]
    fn failed_seed_is_retried_on_next_evaluation() {
        let mut loader = BatchLoader::new(&config(10));
        let mut store = CellStore::new();
        let request = loader.evaluate(&store, &Filter::any(), &vp(0, 3), None).unwrap();

        let outcome = loader.complete(
            &mut store,
            request.ticket,
            Err(ProviderError::Unavailable("offline".into())),
        );
        assert!(matches!(outcome, LoadOutcome::Failed(_)));

        let retry = loader.evaluate(&store, &Filter::any(), &vp(0, 3), Some(&vp(0, 3)));
        assert_eq!(retry.map(|r| r.kind), Some(LoadKind::Seed));
    }
}

mod triggering {
    use super::*;

    #[test]
    fn below_threshold_issues_nothing() {
        let (mut loader, store) = seeded(5);
        // One new column of 4 rows
        let request = loader.evaluate(&store, &Filter::any(), &vp(1, 4), Some(&vp(0, 3)));
        assert!(request.is_none());
        assert_eq!(loader.state(), LoadState::Idle);
    }

    #[test]
    fn meeting_threshold_issues_viewport_request() {
        let (mut loader, store) = seeded(4);
        let request = loader
            .evaluate(&store, &Filter::any(), &vp(1, 4), Some(&vp(0, 3)))
            .expect("exactly threshold triggers");

        assert_eq!(request.kind, LoadKind::Viewport(vp(1, 4)));
        assert_eq!(request.exclude_ids.len(), 4, "Seed ids are excluded");
    }

    #[test]
    fn request_carries_filter() {
        let (mut loader, store) = seeded(1);
        let filter = Filter::any().with_media_type("tv");
        let request = loader
            .evaluate(&store, &filter, &vp(5, 8), Some(&vp(0, 3)))
            .unwrap();
        assert_eq!(request.filter, filter);
    }

    #[test]
    fn viewport_batch_fills_triggering_range() {
        let (mut loader, mut store) = seeded(4);
        let range = vp(10, 11);
        let request = loader
            .evaluate(&store, &Filter::any(), &range, Some(&vp(0, 3)))
            .unwrap();

        let outcome = loader.complete(&mut store, request.ticket, Ok(batch("more", 4)));

        assert_eq!(outcome, LoadOutcome::Placed(4));
        assert_eq!(
            store.get(&CellPosition::new(0, 10)).unwrap().id.as_str(),
            "more-0"
        );
        assert_eq!(loader.state(), LoadState::Idle);
    }
}

mod single_flight {
    use super::*;

    #[test]
    fn no_second_request_while_loading() {
        let (mut loader, store) = seeded(1);
        let first = loader.evaluate(&store, &Filter::any(), &vp(4, 7), Some(&vp(0, 3)));
        assert!(first.is_some());

        for shift in 1..20 {
            let next = loader.evaluate(
                &store,
                &Filter::any(),
                &vp(4 + shift * 4, 7 + shift * 4),
                Some(&vp(shift * 4, 3 + shift * 4)),
            );
            assert!(next.is_none(), "Qualifying change #{shift} must be dropped");
        }
        assert_eq!(loader.state(), LoadState::Loading);
    }

    #[test]
    fn unknown_ticket_is_stale() {
        let (mut loader, mut store) = seeded(1);
        let request = loader
            .evaluate(&store, &Filter::any(), &vp(4, 7), Some(&vp(0, 3)))
            .unwrap();

        // Completing twice: the second completion has no matching in-flight slot.
        loader.complete(&mut store, request.ticket, Ok(batch("x", 1)));
        let again = loader.complete(&mut store, request.ticket, Ok(batch("y", 1)));
        assert_eq!(again, LoadOutcome::Stale);
        assert!(!store.is_loaded(&ContentId::new("y-0").unwrap()));
    }
}

mod exhaustion {
    use super::*;

    #[test]
    fn empty_batch_exhausts_permanently() {
        let (mut loader, mut store) = seeded(1);
        let request = loader
            .evaluate(&store, &Filter::any(), &vp(4, 7), Some(&vp(0, 3)))
            .unwrap();

        let outcome = loader.complete(&mut store, request.ticket, Ok(Vec::new()));

        assert_eq!(outcome, LoadOutcome::Exhausted);
        assert!(!loader.has_more());
        assert_eq!(loader.state(), LoadState::Exhausted);
        for shift in 1..10 {
            let next = loader.evaluate(
                &store,
                &Filter::any(),
                &vp(shift * 10, shift * 10 + 3),
                Some(&vp(0, 3)),
            );
            assert!(next.is_none());
        }
    }

    #[test]
    fn empty_seed_exhausts() {
        let mut loader = BatchLoader::new(&config(1));
        let mut store = CellStore::new();
        let request = loader.evaluate(&store, &Filter::any(), &vp(0, 3), None).unwrap();

        assert_eq!(
            loader.complete(&mut store, request.ticket, Ok(Vec::new())),
            LoadOutcome::Exhausted
        );
        assert!(loader
            .evaluate(&store, &Filter::any(), &vp(0, 3), None)
            .is_none());
    }

    #[test]
    fn failure_keeps_has_more() {
        let (mut loader, mut store) = seeded(1);
        let request = loader
            .evaluate(&store, &Filter::any(), &vp(4, 7), Some(&vp(0, 3)))
            .unwrap();

        loader.complete(
            &mut store,
            request.ticket,
            Err(ProviderError::Unavailable("500".into())),
        );

        assert!(loader.has_more());
        assert_eq!(loader.state(), LoadState::Idle);
        let retry = loader.evaluate(&store, &Filter::any(), &vp(8, 11), Some(&vp(4, 7)));
        assert!(retry.is_some(), "Next viewport change retries");
    }
}

mod epochs {
    use super::*;

    #[test]
    fn reset_bumps_epoch_and_reopens() {
        let (mut loader, mut store) = seeded(1);
        let request = loader
            .evaluate(&store, &Filter::any(), &vp(4, 7), Some(&vp(0, 3)))
            .unwrap();
        loader.complete(&mut store, request.ticket, Ok(Vec::new()));
        assert!(!loader.has_more());

        let before = loader.epoch();
        loader.reset();

        assert_eq!(loader.epoch(), before + 1);
        assert!(loader.has_more());
        assert!(!loader.is_seeded());
        assert_eq!(loader.state(), LoadState::Idle);
    }

    #[test]
    fn completion_from_previous_epoch_is_discarded() {
        let (mut loader, mut store) = seeded(1);
        let old = loader
            .evaluate(&store, &Filter::any(), &vp(4, 7), Some(&vp(0, 3)))
            .unwrap();

        loader.reset();
        store.reset();
        let fresh = loader.evaluate(&store, &Filter::any(), &vp(0, 3), None).unwrap();
        assert_eq!(fresh.ticket.epoch(), old.ticket.epoch() + 1);

        let outcome = loader.complete(&mut store, old.ticket, Ok(batch("old", 3)));

        assert_eq!(outcome, LoadOutcome::Stale);
        assert!(store.is_empty(), "Stale items never reach the store");
        assert_eq!(loader.in_flight(), Some(fresh.ticket), "Fresh request still pending");
        assert_eq!(loader.state(), LoadState::Loading);
    }
}
