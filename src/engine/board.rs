use std::fmt;

/// Idx addresses a single board cell as (row, column).
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Idx(pub(crate) usize, pub(crate) usize);

impl fmt::Display for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell({0},{1})", self.0, self.1)
    }
}

impl Idx {
    pub(crate) fn row(&self) -> usize {
        self.0
    }

    pub(crate) fn col(&self) -> usize {
        self.1
    }
}

pub(crate) type Tile = u32;

/// Board owns the n x n grid of tile values. `0` marks an empty cell; any
/// nonzero value is a power of two >= 2. The grid is mutated in place by the
/// spawner and replaced wholesale on resize or reset; the shift transform
/// works on a clone and commits through the session.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Board {
    size: usize,
    cells: Vec<Tile>,
}

impl Board {
    pub(crate) fn new(size: usize) -> Self {
        assert!(size >= 2, "board side must be at least 2, got {}", size);
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    /// Value at the given cell. An out-of-range index is a programming
    /// error and panics.
    pub(crate) fn get(&self, idx: &Idx) -> Tile {
        self.cells[self.offset(idx)]
    }

    pub(crate) fn set(&mut self, idx: &Idx, value: Tile) {
        let offset = self.offset(idx);
        self.cells[offset] = value;
    }

    pub(crate) fn is_full(&self) -> bool {
        self.cells.iter().all(|&value| value != 0)
    }

    /// Every empty cell in row-major order.
    pub(crate) fn empty_cells(&self) -> Vec<Idx> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &value)| value == 0)
            .map(|(offset, _)| Idx(offset / self.size, offset % self.size))
            .collect()
    }

    /// A fresh all-zero board of the given size. Prior contents are never
    /// carried over, even when the sizes match.
    pub(crate) fn resize(&self, size: usize) -> Board {
        Board::new(size)
    }

    #[cfg(test)]
    pub(crate) fn sum(&self) -> u64 {
        self.cells.iter().map(|&value| u64::from(value)).sum()
    }

    fn offset(&self, idx: &Idx) -> usize {
        assert!(
            idx.row() < self.size && idx.col() < self.size,
            "{0} out of range for a {1}x{1} board",
            idx,
            self.size
        );
        idx.row() * self.size + idx.col()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            for value in row {
                write!(f, "{:>5}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
