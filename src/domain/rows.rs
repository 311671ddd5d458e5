use crate::util::*;

/// A mutable slab of consecutive full rows of a grid.
/// Handed out by `Grid::par_rows_mut`, so slabs never overlap.
pub struct GridRows<'a, F> {
    first_row: usize,
    width: usize,
    buffer: &'a mut [F],
}

impl<'a, F> GridRows<'a, F> {
    pub fn new(first_row: usize, width: usize, buffer: &'a mut [F]) -> Self {
        debug_assert_eq!(buffer.len() % width, 0);
        GridRows {
            first_row,
            width,
            buffer,
        }
    }

    /// World row indices covered by this slab.
    pub fn rows(&self) -> std::ops::Range<usize> {
        self.first_row..self.first_row + self.buffer.len() / self.width
    }

    #[track_caller]
    #[inline]
    pub fn row_mut(&mut self, x: usize) -> &mut [F] {
        debug_assert!(
            self.rows().contains(&x),
            "row {} not in {:?}",
            x,
            self.rows()
        );
        let start = (x - self.first_row) * self.width;
        &mut self.buffer[start..start + self.width]
    }

    pub fn coord_iter_mut(
        &mut self,
    ) -> impl Iterator<Item = (Coord<2>, &mut F)> {
        let first_row = self.first_row;
        let width = self.width;
        self.buffer
            .iter_mut()
            .enumerate()
            .map(move |(i, v): (usize, &mut F)| {
                let coord =
                    vector![(first_row + i / width) as i32, (i % width) as i32];
                (coord, v)
            })
    }
}
