//! Slice kernels against scalar loops, for every slice length

use lanewise::{ops, ArrayVector, SimdFloat, SimdVector, Vector};
use proptest::prelude::*;

use test_utils::*;

proptest! {
    #[test]
    fn prop_map_unary_matches_loop(xs in prop::collection::vec(any_f32(), 0..70)) {
        let mut out = vec![0.0f32; xs.len()];
        ops::map_unary::<Vector<f32>>(&xs, &mut out, |v| v.abs() * Vector::<f32>::splat(0.5));
        let expected: Vec<f32> = xs.iter().map(|x| x.abs() * 0.5).collect();
        assert_f32_lanes_identical(&out, &expected, "map_unary");
    }

    #[test]
    fn prop_map_binary_matches_loop(
        pairs in prop::collection::vec((any_i32(), any_i32()), 0..70),
    ) {
        let (a, b): (Vec<i32>, Vec<i32>) = pairs.into_iter().unzip();
        let mut out = vec![0i32; a.len()];
        ops::map_binary::<ArrayVector<i32, 8>>(&a, &b, &mut out, |x, y| x.max(y) - y);
        let expected: Vec<i32> = a
            .iter()
            .zip(&b)
            .map(|(&x, &y)| ref_max(x, y).wrapping_sub(y))
            .collect();
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn prop_sum_and_dot_exact_on_integral_values(
        pairs in prop::collection::vec((integral_f32(), integral_f32()), 0..100),
    ) {
        let (a, b): (Vec<f32>, Vec<f32>) = pairs.into_iter().unzip();
        prop_assert_eq!(ops::sum::<Vector<f32>>(&a), a.iter().sum::<f32>());

        // products stay below 2^24 per term only when small; use f64 to stay exact
        let a64: Vec<f64> = a.iter().map(|&x| f64::from(x)).collect();
        let b64: Vec<f64> = b.iter().map(|&x| f64::from(x)).collect();
        let expected: f64 = a64.iter().zip(&b64).map(|(x, y)| x * y).sum();
        prop_assert_eq!(ops::dot::<Vector<f64>>(&a64, &b64), expected);
        prop_assert_eq!(ops::dot_fused::<Vector<f64>>(&a64, &b64), expected);
    }

    #[test]
    fn prop_min_max_value(xs in prop::collection::vec(any::<u32>(), 0..50)) {
        prop_assert_eq!(ops::min_value::<Vector<u32>>(&xs), xs.iter().copied().min());
        prop_assert_eq!(ops::max_value::<Vector<u32>>(&xs), xs.iter().copied().max());
    }
}

#[test]
fn test_kernels_agree_across_widths() {
    let xs: Vec<f64> = (0..37).map(|i| f64::from(i) * 0.25 - 3.0).collect();
    let mut narrow = vec![0.0; xs.len()];
    let mut wide = vec![0.0; xs.len()];
    ops::map_unary::<ArrayVector<f64, 2>>(&xs, &mut narrow, |v| v.mul_add(v, v));
    ops::map_unary::<ArrayVector<f64, 4>>(&xs, &mut wide, |v| v.mul_add(v, v));
    assert_eq!(narrow, wide);
    assert_eq!(ops::min_value::<ArrayVector<f64, 4>>(&xs), Some(-3.0));
    assert_eq!(ops::max_value::<ArrayVector<f64, 2>>(&xs), Some(6.0));
}
