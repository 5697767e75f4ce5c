//! Cell positions and the bounded position intern cache.
//!
//! Renderers skip redrawing a cell when its position handle is the same
//! allocation as last frame (`Rc::ptr_eq`). [`PositionCache`] provides that
//! guarantee: interning the same `(row, col)` twice yields the same `Rc` for as
//! long as the entry has not been evicted. Eviction is FIFO on insertion order,
//! so a cache hit does not refresh an entry.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::rc::Rc;

/// One discrete `(row, col)` slot of the infinite grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CellPosition {
    /// Row index, growing downwards. May be negative.
    pub row: i32,
    /// Column index, growing rightwards. May be negative.
    pub col: i32,
}

impl CellPosition {
    /// The grid origin `(0, 0)`.
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    /// Create a new position.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Chebyshev (chessboard) distance to another position.
    pub fn chebyshev_distance(&self, other: CellPosition) -> u32 {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr.max(dc)
    }
}

impl fmt::Display for CellPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.row, self.col)
    }
}

/// Bounded intern cache for [`CellPosition`] handles.
///
/// # Invariants
/// - `len() <= limit()` at all times
/// - the oldest-inserted entry is evicted first once the limit is reached
#[derive(Debug)]
pub struct PositionCache {
    entries: HashMap<CellPosition, Rc<CellPosition>>,
    /// Insertion order: front = oldest.
    order: VecDeque<CellPosition>,
    limit: usize,
}

impl PositionCache {
    /// Create an empty cache holding at most `limit` positions.
    ///
    /// A limit of 0 is treated as 1.
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: HashMap::with_capacity(limit),
            order: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Return the shared handle for `(row, col)`, inserting it if absent.
    pub fn intern(&mut self, row: i32, col: i32) -> Rc<CellPosition> {
        let position = CellPosition::new(row, col);
        if let Some(existing) = self.entries.get(&position) {
            return Rc::clone(existing);
        }

        if self.entries.len() >= self.limit {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }

        let handle = Rc::new(position);
        self.entries.insert(position, Rc::clone(&handle));
        self.order.push_back(position);
        handle
    }

    /// Number of interned positions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is interned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured capacity.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Drop every interned handle.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_pipe_separator() {
        assert_eq!(CellPosition::new(-3, 7).to_string(), "-3|7");
    }

    #[test]
    fn chebyshev_distance_is_max_axis_delta() {
        let origin = CellPosition::ORIGIN;
        assert_eq!(origin.chebyshev_distance(CellPosition::new(2, -5)), 5);
        assert_eq!(origin.chebyshev_distance(origin), 0);
    }

    #[test]
    fn intern_returns_same_handle_for_same_coordinates() {
        let mut cache = PositionCache::new(8);
        let a = cache.intern(1, 2);
        let b = cache.intern(1, 2);
        assert!(Rc::ptr_eq(&a, &b), "Repeated lookups must share one allocation");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn intern_returns_distinct_handles_for_distinct_coordinates() {
        let mut cache = PositionCache::new(8);
        let a = cache.intern(1, 2);
        let b = cache.intern(2, 1);
        assert!(!Rc::ptr_eq(&a, &b));
        assert_eq!(*a, CellPosition::new(1, 2));
    }

    #[test]
    fn cache_never_exceeds_limit() {
        let mut cache = PositionCache::new(3);
        for i in 0..10 {
            cache.intern(i, i);
            assert!(cache.len() <= 3);
        }
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn eviction_removes_oldest_inserted_first() {
        let mut cache = PositionCache::new(2);
        let first = cache.intern(0, 0);
        cache.intern(0, 1);

        // Hitting the oldest entry does not refresh it (FIFO, not LRU).
        let hit = cache.intern(0, 0);
        assert!(Rc::ptr_eq(&first, &hit));

        let newest = cache.intern(0, 2);
        assert_eq!(cache.len(), 2);
        assert!(Rc::ptr_eq(&newest, &cache.intern(0, 2)));

        // (0,0) was evicted, so it comes back as a new handle
        let reinserted = cache.intern(0, 0);
        assert!(
            !Rc::ptr_eq(&first, &reinserted),
            "Evicted positions come back as new handles"
        );
    }

    #[test]
    fn zero_limit_is_treated_as_one() {
        let mut cache = PositionCache::new(0);
        assert_eq!(cache.limit(), 1);
        cache.intern(0, 0);
        cache.intern(0, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_empties_cache() {
        let mut cache = PositionCache::new(4);
        let before = cache.intern(1, 1);
        cache.clear();
        assert!(cache.is_empty());
        assert!(!Rc::ptr_eq(&before, &cache.intern(1, 1)));
    }
}
