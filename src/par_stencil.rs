use crate::domain::*;
use crate::stencil::*;
use crate::util::*;
use rayon::prelude::*;

/// Order in which the interior is visited.
/// Never changes results, every cell is computed the same way.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Traversal {
    /// One task per interior row.
    Direct,

    /// Square tiles of the given edge, one task per row of tiles.
    Tiled(usize),
}

impl Traversal {
    /// Only tile when a tile is smaller than the interior.
    pub fn for_interior(tile_size: usize, interior_extent: usize) -> Self {
        if tile_size < interior_extent {
            Traversal::Tiled(tile_size)
        } else {
            Traversal::Direct
        }
    }

    pub fn rows_per_task(&self) -> usize {
        match self {
            Traversal::Direct => 1,
            Traversal::Tiled(edge) => *edge,
        }
    }
}

/// Weights laid out for linear indexing into a grid of a fixed width.
struct PointKernel<'a, F: StencilFloat> {
    input: &'a [F],
    shape: StencilShape,
    radius: usize,
    width: usize,

    /// Star: w(0, dy) for dy in [-r, r].
    row_weights: Vec<F>,

    /// Star: w(dx, 0) for dx in [-r, r].
    column_weights: Vec<F>,

    /// Compact: w(dx, dy) with dy varying fastest.
    square_weights: Vec<F>,
}

impl<'a, F: StencilFloat> PointKernel<'a, F> {
    fn new(weights: &WeightMatrix<F>, input: &'a Grid<F>) -> Self {
        let r = weights.radius() as i32;
        let mut square_weights = Vec::new();
        if weights.shape() == StencilShape::Compact {
            for dx in -r..=r {
                for dy in -r..=r {
                    square_weights.push(weights.weight(dx, dy));
                }
            }
        }
        PointKernel {
            input: input.buffer(),
            shape: weights.shape(),
            radius: weights.radius(),
            width: input.size(),
            row_weights: weights.row_weights(),
            column_weights: weights.column_weights(),
            square_weights,
        }
    }

    /// `acc` plus the stencil applied at `(x, y)`.
    #[inline]
    fn apply(&self, x: usize, y: usize, acc: F) -> F {
        match self.shape {
            StencilShape::Star => self.star(x, y, acc),
            StencilShape::Compact => self.compact(x, y, acc),
        }
    }

    #[inline]
    fn star(&self, x: usize, y: usize, mut acc: F) -> F {
        let r = self.radius;
        let center = x * self.width + y;

        // Center row, contiguous in memory
        let row = &self.input[center - r..=center + r];
        for (w, v) in self.row_weights.iter().zip(row) {
            acc = acc + *w * *v;
        }

        // Center column, skipping the center itself
        for k in 0..r {
            acc = acc
                + self.column_weights[k] * self.input[center - (r - k) * self.width];
        }
        for k in r + 1..=2 * r {
            acc = acc
                + self.column_weights[k] * self.input[center + (k - r) * self.width];
        }
        acc
    }

    #[inline]
    fn compact(&self, x: usize, y: usize, mut acc: F) -> F {
        let r = self.radius;
        let side = 2 * r + 1;
        for k in 0..side {
            let start = (x + k - r) * self.width + y - r;
            let row = &self.input[start..start + side];
            let weights = &self.square_weights[k * side..(k + 1) * side];
            for (w, v) in weights.iter().zip(row) {
                acc = acc + *w * *v;
            }
        }
        acc
    }
}

/// Accumulate the stencil applied to `input` into the interior of `output`.
/// The halo of `output` is not touched.
/// Grids must have the same bounds and fit one full footprint.
pub fn apply<F: StencilFloat>(
    weights: &WeightMatrix<F>,
    input: &Grid<F>,
    output: &mut Grid<F>,
    traversal: Traversal,
) {
    profiling::scope!("par_stencil::apply");
    debug_assert_eq!(input.aabb(), output.aabb());
    let n = input.size();
    let r = weights.radius();
    debug_assert!(2 * r < n);

    let kernel = PointKernel::new(weights, input);
    let interior = r..n - r;
    let slabs = output.par_rows_mut(interior.clone(), traversal.rows_per_task());
    match traversal {
        Traversal::Direct => slabs.for_each(
            |mut rows: GridRows<'_, F>| {
                profiling::scope!("par_stencil: Row Callback");
                for x in rows.rows() {
                    let row = rows.row_mut(x);
                    for y in interior.clone() {
                        row[y] = kernel.apply(x, y, row[y]);
                    }
                }
            },
        ),
        Traversal::Tiled(edge) => {
            slabs.for_each(|mut rows: GridRows<'_, F>| {
                profiling::scope!("par_stencil: Tile Row Callback");
                let slab_rows = rows.rows();
                let slab = AABB::from_mm(
                    vector![slab_rows.start as i32, r as i32],
                    vector![slab_rows.end as i32 - 1, (n - r) as i32 - 1],
                );
                for tile in tiles(&slab, edge) {
                    debug_assert!(slab.contains_aabb(&tile));
                    for x in tile.bounds[(0, 0)]..=tile.bounds[(0, 1)] {
                        let x = x as usize;
                        let row = rows.row_mut(x);
                        for y in tile.bounds[(1, 0)]..=tile.bounds[(1, 1)] {
                            let y = y as usize;
                            row[y] = kernel.apply(x, y, row[y]);
                        }
                    }
                }
            })
        }
    }
}

/// Tile cover of `interior`, first dimension outermost.
/// `apply` walks each slab of rows in this order.
pub fn tiles(interior: &AABB<2>, edge: usize) -> Vec<AABB<2>> {
    interior.tiles(edge as i32)
}

/// Straightforward serial version of `apply` that walks the support list.
/// Slow, only for checking the fast paths.
pub fn apply_general<F: StencilFloat>(
    weights: &WeightMatrix<F>,
    input: &Grid<F>,
    output: &mut Grid<F>,
) {
    debug_assert_eq!(input.aabb(), output.aabb());
    let support = weights.support();
    let Some(interior) = input.interior(weights.radius()) else {
        return;
    };
    for c in interior.coord_iter() {
        let mut acc = output.view(&c);
        for (offset, w) in support.iter() {
            acc = acc + *w * input.view(&(c + offset));
        }
        output.set_coord(&c, acc);
    }
}
