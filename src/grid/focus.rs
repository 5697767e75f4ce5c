//! Random pick of an occupied cell and the offset that re-centers it.

use super::cell_store::CellStore;
use super::coordinates::{CoordinateSpace, Offset};
use super::position::CellPosition;
use crate::model::ContentItem;
use rand::seq::IteratorRandom;
use rand::Rng;
use std::rc::Rc;

/// Where a focus jump should land.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusTarget {
    /// Content under the target cell.
    pub item: Rc<ContentItem>,
    /// Target cell.
    pub position: CellPosition,
    /// Offset that puts `position` under the screen center.
    pub offset: Offset,
}

/// Pick a uniformly random occupied cell, or `None` when the store is empty.
pub fn pick_random<R: Rng + ?Sized>(
    store: &CellStore,
    rng: &mut R,
) -> Option<(Rc<ContentItem>, CellPosition)> {
    store
        .occupied()
        .choose(rng)
        .map(|(position, item)| (Rc::clone(item), *position))
}

/// Offset that centers `position` on screen, stagger included.
///
/// Inverse of [`CoordinateSpace::center_cell`]: for any position `p`,
/// `space.center_cell(target_offset_for(space, p)) == p`.
pub fn target_offset_for(space: &CoordinateSpace, position: CellPosition) -> Offset {
    let screen = space.screen();
    let cw = space.cell_width();
    let ch = space.cell_height();
    let x = screen.width / 2.0 - cw / 2.0 - position.col as f32 * cw;
    let y = screen.height / 2.0
        - ch / 2.0
        - position.row as f32 * ch
        - space.stagger(position.row, position.col);
    Offset::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::config::GridConfig;
    use crate::grid::coordinates::{ScanOrder, ScreenSize, Viewport};
    use crate::model::ContentId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn space() -> CoordinateSpace {
        CoordinateSpace::new(&GridConfig::default(), ScreenSize::new(800.0, 600.0))
    }

    fn filled_store(n: usize) -> CellStore {
        let mut store = CellStore::new();
        let items = (0..n)
            .map(|i| ContentItem::new(ContentId::new(format!("id-{i}")).unwrap(), "t"))
            .collect();
        let range = Viewport {
            start_row: -5,
            end_row: 5,
            start_col: -5,
            end_col: 5,
        };
        store.assign_batch(items, &range, ScanOrder::RowMajor);
        store
    }

    #[test]
    fn pick_from_empty_store_is_none() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(pick_random(&CellStore::new(), &mut rng).is_none());
    }

    #[test]
    fn pick_returns_item_at_its_position() {
        let store = filled_store(20);
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let (item, position) = pick_random(&store, &mut rng).unwrap();
            let stored = store.get(&position).unwrap();
            assert!(Rc::ptr_eq(stored, &item));
        }
    }

    #[test]
    fn picks_cover_every_cell_eventually() {
        let store = filled_store(6);
        let mut rng = StdRng::seed_from_u64(42);
        let seen: HashSet<_> = (0..500)
            .filter_map(|_| pick_random(&store, &mut rng))
            .map(|(_, position)| position)
            .collect();
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn origin_target_matches_initial_offset() {
        let space = space();
        let offset = target_offset_for(&space, CellPosition::ORIGIN);
        assert_eq!(offset, Offset::new(272.0, 110.0 - 40.0));
    }

    #[test]
    fn target_round_trips_through_center_cell() {
        let space = space();
        for row in -7..=7 {
            for col in -7..=7 {
                let position = CellPosition::new(row, col);
                let offset = target_offset_for(&space, position);
                assert_eq!(space.center_cell(offset), position, "{position}");
                assert!(space.viewport_at(offset).contains_position(position));
            }
        }
    }

    #[test]
    fn unstaggered_cell_target_has_no_stagger_term() {
        let space = space();
        // (0, 1) has odd index with two columns
        let offset = target_offset_for(&space, CellPosition::new(0, 1));
        assert_eq!(offset, Offset::new(272.0 - 256.0, 110.0));
    }
}
