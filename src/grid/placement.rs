//! Spiral seeding of the first batch around the origin.
//!
//! Positions are generated in square rings of growing Chebyshev radius. Ring
//! `r` holds every position with `max(|row|, |col|) == r`, enumerated in
//! row-major order, so the seed region stays contiguous and centered for any
//! batch size.

use super::cell_store::CellStore;
use super::position::CellPosition;
use crate::model::ContentItem;
use tracing::info;

/// Positions of one ring, row-major.
pub fn ring(radius: u32) -> impl Iterator<Item = CellPosition> {
    let r = radius.min(i32::MAX as u32) as i32;
    (-r..=r).flat_map(move |row| {
        (-r..=r)
            .map(move |col| CellPosition::new(row, col))
            .filter(move |p| p.chebyshev_distance(CellPosition::ORIGIN) == r as u32)
    })
}

/// Endless spiral of positions: ring 0, ring 1, ring 2, ...
pub fn spiral_positions() -> impl Iterator<Item = CellPosition> {
    (0u32..).flat_map(ring)
}

/// Place the first fetched batch along the spiral.
///
/// Returns the number of items placed.
pub fn seed(store: &mut CellStore, items: Vec<ContentItem>) -> usize {
    let offered = items.len();
    let placed = store.assign_at(items, spiral_positions());
    info!(offered, placed, "Seeded grid around origin");
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentId;

    fn batch(n: usize) -> Vec<ContentItem> {
        (0..n)
            .map(|i| ContentItem::new(ContentId::new(format!("item-{i}")).unwrap(), "t"))
            .collect()
    }

    #[test]
    fn ring_zero_is_origin_only() {
        let cells: Vec<_> = ring(0).collect();
        assert_eq!(cells, vec![CellPosition::ORIGIN]);
    }

    #[test]
    fn ring_sizes_grow_by_eight() {
        for r in 1..6u32 {
            assert_eq!(ring(r).count() as u32, 8 * r);
        }
    }

    #[test]
    fn ring_members_have_exact_radius() {
        for position in ring(3) {
            assert_eq!(position.chebyshev_distance(CellPosition::ORIGIN), 3);
        }
    }

    #[test]
    fn spiral_starts_with_origin_then_ring_one() {
        let first: Vec<_> = spiral_positions().take(9).collect();
        assert_eq!(
            first,
            vec![
                CellPosition::new(0, 0),
                CellPosition::new(-1, -1),
                CellPosition::new(-1, 0),
                CellPosition::new(-1, 1),
                CellPosition::new(0, -1),
                CellPosition::new(0, 1),
                CellPosition::new(1, -1),
                CellPosition::new(1, 0),
                CellPosition::new(1, 1),
            ]
        );
    }

    #[test]
    fn seed_of_nine_fills_origin_and_ring_one() {
        let mut store = CellStore::new();
        let placed = seed(&mut store, batch(9));

        assert_eq!(placed, 9);
        let origin = store.get(&CellPosition::ORIGIN).unwrap();
        assert_eq!(origin.id.as_str(), "item-0");
        let last = store.get(&CellPosition::new(1, 1)).unwrap();
        assert_eq!(last.id.as_str(), "item-8");
    }

    #[test]
    fn seed_region_is_contiguous_for_partial_ring() {
        let mut store = CellStore::new();
        seed(&mut store, batch(12));

        for (position, _) in store.occupied() {
            assert!(position.chebyshev_distance(CellPosition::ORIGIN) <= 2);
        }
        assert_eq!(
            store
                .occupied()
                .filter(|(p, _)| p.chebyshev_distance(CellPosition::ORIGIN) <= 1)
                .count(),
            9,
            "Inner rings are complete before the next one starts"
        );
    }

    #[test]
    fn seed_of_empty_batch_places_nothing() {
        let mut store = CellStore::new();
        assert_eq!(seed(&mut store, Vec::new()), 0);
        assert!(store.is_empty());
    }
}
