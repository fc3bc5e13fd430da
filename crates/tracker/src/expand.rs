//! Continuous-mode expansion.
//!
//! Each region is stretched to the next region's in-point and the final
//! region runs just past `max`, so the regions tile the tracked range with
//! no gaps. Whatever out-points the regions had before are discarded.

use regionwatch_region_model::Region;

/// How far past `max` the final expanded region reaches.
pub const EXPANSION_EPSILON: f64 = 1e-3;

/// Build the expanded copy of `regions`.
///
/// `regions` must already be sorted ascending by in-point; the input is not
/// touched.
pub fn expand_regions(regions: &[Region], max: f64) -> Vec<Region> {
    let mut expanded: Vec<Region> = regions
        .windows(2)
        .map(|pair| pair[0].with_out_point(pair[1].in_point()))
        .collect();

    if let Some(last) = regions.last() {
        expanded.push(last.with_out_point(max + EXPANSION_EPSILON));
    }

    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(ins: &[f64]) -> Vec<Region> {
        ins.iter()
            .enumerate()
            .map(|(i, &at)| Region::point(at, i).unwrap())
            .collect()
    }

    #[test]
    fn test_expand_points_to_tiles() {
        let regions = points(&[0.0, 5.0, 10.0]);
        let expanded = expand_regions(&regions, 10.0);

        assert_eq!(expanded.len(), 3);
        assert_eq!((expanded[0].in_point(), expanded[0].out_point()), (0.0, 5.0));
        assert_eq!((expanded[1].in_point(), expanded[1].out_point()), (5.0, 10.0));
        assert_eq!(expanded[2].in_point(), 10.0);
        assert!((expanded[2].out_point() - 10.001).abs() < 1e-9);

        // Source regions are values; expansion must not rewrite them.
        assert!(regions.iter().all(Region::is_point));
    }

    #[test]
    fn test_expand_keeps_data() {
        let regions = points(&[0.0, 5.0]);
        let expanded = expand_regions(&regions, 20.0);
        assert_eq!(expanded[0].data(), regions[0].data());
        assert_eq!(expanded[1].data(), regions[1].data());
    }

    #[test]
    fn test_expand_overrides_existing_out_points() {
        let regions = vec![
            Region::new(0.0, Some(100.0), "wide").unwrap(),
            Region::new(3.0, Some(4.0), "narrow").unwrap(),
        ];
        let expanded = expand_regions(&regions, 50.0);
        assert_eq!(expanded[0].out_point(), 3.0);
        assert!((expanded[1].out_point() - 50.001).abs() < 1e-9);
    }

    #[test]
    fn test_expand_empty_and_single() {
        assert!(expand_regions(&[], 10.0).is_empty());

        let single = expand_regions(&points(&[2.0]), 2.0);
        assert_eq!(single.len(), 1);
        assert!((single[0].out_point() - 2.001).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_in_points_collapse_to_point_regions() {
        let expanded = expand_regions(&points(&[5.0, 5.0, 8.0]), 8.0);
        assert!(expanded[0].is_point());
        assert_eq!(expanded[1].out_point(), 8.0);
    }

    proptest::proptest! {
        #[test]
        fn prop_expanded_regions_tile_without_gaps(
            mut ins in proptest::collection::vec(-1e4f64..1e4, 1..20),
            headroom in 0f64..1e3,
        ) {
            ins.sort_by(f64::total_cmp);
            let max = ins[ins.len() - 1] + headroom;
            let expanded = expand_regions(&points(&ins), max);

            proptest::prop_assert_eq!(expanded.len(), ins.len());
            for pair in expanded.windows(2) {
                proptest::prop_assert_eq!(pair[0].out_point(), pair[1].in_point());
                proptest::prop_assert!(pair[0].in_point() <= pair[0].out_point());
            }
            let last = &expanded[expanded.len() - 1];
            proptest::prop_assert!(last.out_point() > max);
            proptest::prop_assert!(last.contains(max));
        }
    }
}
