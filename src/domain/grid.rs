use super::*;
use crate::error::*;
use crate::util::indexing::*;
use crate::util::*;
use rayon::prelude::*;

/// Square `n x n` grid of values owning its buffer.
/// Coordinates are `(x, y)` with `y` varying fastest in memory,
/// so a row is a fixed `x`.
pub struct Grid<F: StencilFloat> {
    aabb: AABB<2>,
    buffer: Vec<F>,
}

impl<F: StencilFloat> Grid<F> {
    /// Allocate a zero filled grid.
    /// Fails if the size cannot be represented or allocated.
    pub fn try_new(n: usize) -> Result<Self> {
        let aabb = Self::checked_aabb(n)?;
        let elements = aabb.buffer_size();
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(elements)
            .map_err(|_| StencilError::Allocation { elements })?;
        buffer.resize(elements, F::zero());
        Ok(Grid { aabb, buffer })
    }

    /// Bounds of an `n x n` grid, checking that its buffer is addressable.
    pub fn checked_aabb(n: usize) -> Result<AABB<2>> {
        if n < 1 {
            return Err(StencilError::InvalidGridSize(n as i64));
        }
        let side = i32::try_from(n).map_err(|_| StencilError::GridTooLarge(n))?;
        checked_buffer_bytes(&vector![side, side], std::mem::size_of::<F>())
            .ok_or(StencilError::GridTooLarge(n))?;
        Ok(AABB::cube(side))
    }

    pub fn aabb(&self) -> &AABB<2> {
        &self.aabb
    }

    /// Linear dimension `n`.
    #[inline]
    pub fn size(&self) -> usize {
        self.aabb.exclusive_bounds()[1] as usize
    }

    pub fn buffer(&self) -> &[F] {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut [F] {
        &mut self.buffer
    }

    /// Cells at least `radius` away from every edge.
    pub fn interior(&self, radius: usize) -> Option<AABB<2>> {
        self.aabb.shrink_by(radius as i32)
    }

    #[track_caller]
    pub fn view(&self, world_coord: &Coord<2>) -> F {
        debug_assert!(
            self.aabb.contains(world_coord),
            "{:?} does not contain {:?}",
            self.aabb,
            world_coord
        );
        self.buffer[self.aabb.coord_to_linear(world_coord)]
    }

    #[track_caller]
    pub fn set_coord(&mut self, world_coord: &Coord<2>, value: F) {
        debug_assert!(
            self.aabb.contains(world_coord),
            "{:?} does not contain {:?}",
            self.aabb,
            world_coord
        );
        let index = self.aabb.coord_to_linear(world_coord);
        self.buffer[index] = value;
    }

    /// Disjoint mutable slabs of `rows_per_chunk` rows covering `rows`.
    /// The last slab is clipped at `rows.end`.
    pub fn par_rows_mut(
        &mut self,
        rows: std::ops::Range<usize>,
        rows_per_chunk: usize,
    ) -> impl IndexedParallelIterator<Item = GridRows<'_, F>> + '_ {
        let width = self.size();
        debug_assert!(rows.end <= width);
        debug_assert!(rows_per_chunk >= 1);
        let first_row = rows.start;
        self.buffer[rows.start * width..rows.end * width]
            .par_chunks_mut(rows_per_chunk * width)
            .enumerate()
            .map(move |(i, buffer)| {
                GridRows::new(first_row + i * rows_per_chunk, width, buffer)
            })
    }

    /// Rows in `rows` paired with their world row index.
    pub fn par_rows(
        &self,
        rows: std::ops::Range<usize>,
    ) -> impl IndexedParallelIterator<Item = (usize, &[F])> + '_ {
        let width = self.size();
        debug_assert!(rows.end <= width);
        let first_row = rows.start;
        self.buffer[rows.start * width..rows.end * width]
            .par_chunks(width)
            .enumerate()
            .map(move |(i, row)| (first_row + i, row))
    }

    /// `chunk_size` is the number of rows given to one task.
    pub fn par_set_values<G: Fn(Coord<2>) -> F + Send + Sync>(
        &mut self,
        f: G,
        chunk_size: usize,
    ) {
        let n = self.size();
        self.par_rows_mut(0..n, chunk_size)
            .for_each(|mut rows: GridRows<'_, F>| {
                rows.coord_iter_mut().for_each(|(world_coord, value_mut)| {
                    *value_mut = f(world_coord);
                })
            });
    }
}
