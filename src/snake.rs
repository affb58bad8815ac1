use crate::dir::Dir;
use crate::pos::Cell;
use ahash::{AHashMap, AHashSet};
use std::collections::VecDeque;

/// Ordered body, head first.
///
/// An occupancy index is kept next to the segment queue so membership tests
/// do not scan the body. It counts segments per cell because a head that ran
/// into the body briefly shares a cell with another segment.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    occupied: AHashMap<Cell, u32>,
}

impl Snake {
    pub fn new(head: Cell) -> Self {
        let mut s = Self { body: VecDeque::new(), occupied: AHashMap::new() };
        s.push_back(head);
        s
    }

    /// Builds a snake from explicit segments, head first. Returns `None` for
    /// an empty sequence.
    pub fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Option<Self> {
        let mut iter = cells.into_iter();
        let mut s = Self::new(iter.next()?);
        for c in iter {
            s.push_back(c);
        }
        Some(s)
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, c: Cell) -> bool {
        self.occupied.contains_key(&c)
    }

    /// True if the head shares its cell with any other segment.
    pub fn collides_with_body(&self) -> bool {
        self.occupied.get(&self.head()).is_some_and(|&n| n > 1)
    }

    /// Snapshot of occupied cells for membership queries.
    pub fn positions(&self) -> AHashSet<Cell> {
        self.occupied.keys().copied().collect()
    }

    /// One-cell translation: new head in `dir`, last segment dropped.
    /// Bounds and collisions are the caller's concern.
    pub fn move_to(&mut self, dir: Dir) {
        let new_head = self.head().offset(dir.offset());
        self.push_front(new_head);
        self.pop_back();
    }

    /// Appends one segment behind the tail, offset opposite to `dir`.
    /// Existing segments are untouched; the appended cell is not validated.
    pub fn grow(&mut self, dir: Dir) {
        let extra = self.tail().offset(dir.opposite().offset());
        self.push_back(extra);
    }

    fn push_front(&mut self, c: Cell) {
        self.body.push_front(c);
        *self.occupied.entry(c).or_insert(0) += 1;
    }

    fn push_back(&mut self, c: Cell) {
        self.body.push_back(c);
        *self.occupied.entry(c).or_insert(0) += 1;
    }

    fn pop_back(&mut self) {
        // A snake never drops below its head.
        if self.body.len() < 2 {
            return;
        }
        if let Some(c) = self.body.pop_back() {
            if let Some(n) = self.occupied.get_mut(&c) {
                *n -= 1;
                if *n == 0 {
                    self.occupied.remove(&c);
                }
            }
        }
    }
}
