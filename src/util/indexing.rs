use crate::util::*;

/// Number of values needed to store a box with the given exclusive bound.
pub fn buffer_size<const DIMENSION: usize>(
    exclusive_bound: &Coord<DIMENSION>,
) -> usize {
    let mut accumulator = 1;
    for d in exclusive_bound {
        accumulator *= *d as usize;
    }
    accumulator
}

/// Like `buffer_size`, but also checks that a buffer of `element_size`
/// byte values can be addressed.
pub fn checked_buffer_bytes<const DIMENSION: usize>(
    exclusive_bound: &Coord<DIMENSION>,
    element_size: usize,
) -> Option<usize> {
    let mut accumulator = element_size;
    for d in exclusive_bound {
        let d = usize::try_from(*d).ok()?;
        accumulator = accumulator.checked_mul(d)?;
    }
    if accumulator > isize::MAX as usize {
        return None;
    }
    Some(accumulator)
}

/// The last dimension varies fastest.
pub fn coord_to_linear<const GRID_DIMENSION: usize>(
    coord: &Coord<GRID_DIMENSION>,
    exclusive_bounds: &Coord<GRID_DIMENSION>,
) -> usize {
    let mut accumulator = 0;
    for d in 0..GRID_DIMENSION {
        debug_assert!(coord[d] >= 0);
        accumulator =
            accumulator * exclusive_bounds[d] as usize + coord[d] as usize;
    }
    accumulator
}

pub fn linear_to_coord<const GRID_DIMENSION: usize>(
    linear_index: usize,
    exclusive_bounds: &Coord<GRID_DIMENSION>,
) -> Coord<GRID_DIMENSION> {
    let mut result = Coord::zero();
    let mut index_accumulator = linear_index;
    for d in (0..GRID_DIMENSION).rev() {
        let extent = exclusive_bounds[d] as usize;
        result[d] = (index_accumulator % extent) as i32;
        index_accumulator /= extent;
    }
    result
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn buffer_size_test() {
        assert_eq!(buffer_size(&vector![5]), 5);
        assert_eq!(buffer_size(&vector![5, 7]), 35);
    }

    #[test]
    fn checked_buffer_bytes_test() {
        assert_eq!(checked_buffer_bytes(&vector![10, 10], 8), Some(800));
        assert_eq!(checked_buffer_bytes(&vector![-1, 10], 8), None);
        assert_eq!(
            checked_buffer_bytes(&vector![i32::MAX, i32::MAX], 8),
            None
        );
    }

    #[test]
    fn coord_to_linear_index_test() {
        {
            let index = vector![5, 7];
            let bound = vector![20, 20];
            assert_eq!(coord_to_linear(&index, &bound), 5 * 20 + 7);
        }

        {
            let index = vector![3, 9];
            let bound = vector![4, 10];
            assert_eq!(coord_to_linear(&index, &bound), 3 * 10 + 9);
        }
    }

    #[test]
    fn linear_to_coord_test() {
        {
            let bound = vector![10, 10];
            assert_eq!(linear_to_coord(67, &bound), vector![6, 7]);
        }

        {
            let bound = vector![4, 10];
            for l in 0..40 {
                let c = linear_to_coord(l, &bound);
                assert_eq!(coord_to_linear(&c, &bound), l);
            }
        }
    }
}
