//! Behavioural contract shared by every backend
//!
//! Each check is written once against `SimdVector` and instantiated for the
//! scalar backend, both portable array widths and the active backend.

use lanewise::{
    ArrayVector, IndexVector, ScalarVector, SimdFloat, SimdInt, SimdMask, SimdVector, Vector,
};

use test_utils::*;

fn check_splat_sum<V: SimdVector<Scalar = f32>>() {
    let sum = V::splat(1.5).horizontal_sum();
    assert_eq!(sum, 1.5 * V::LANES as f32);
    assert_eq!(V::zero().horizontal_sum(), 0.0);
}

fn check_masked_store_complement<V: SimdVector<Scalar = f32>>() {
    let value = vector_from_fn::<V>(|i| i as f32 + 1.0);
    let mask: V::Mask = mask_from_fn(|i| i % 3 == 0);

    let mut full = vec![-1.0f32; V::LANES];
    value.store_unaligned(&mut full);

    let mut split = vec![-1.0f32; V::LANES];
    value.store_masked(&mut split, mask);
    value.store_masked(&mut split, mask.not());
    assert_eq!(split, full);

    let mut partial = vec![-1.0f32; V::LANES];
    value.store_masked(&mut partial, mask);
    for (i, x) in partial.iter().enumerate() {
        let expected = if i % 3 == 0 { i as f32 + 1.0 } else { -1.0 };
        assert_eq!(*x, expected, "lane {}", i);
    }
}

fn check_scatter_gather_roundtrip<V, I>(indices: I)
where
    V: SimdVector<Scalar = f32>,
    I: IndexVector,
{
    let value = vector_from_fn::<V>(|i| 10.0 + i as f32);
    let mut base = vec![0.0f32; 4 * V::LANES];
    value.scatter(&mut base, indices);
    let back = V::gather(&base, indices);
    assert_eq!(lanes(back), lanes(value));
}

fn check_select_is_max<V: SimdVector<Scalar = f32>>() {
    let a = vector_from_fn::<V>(|i| (i as f32 * 1.7) % 3.0);
    let b = vector_from_fn::<V>(|i| 2.0 - i as f32 * 0.5);
    assert_eq!(lanes(V::select(a.cmp_gt(b), a, b)), lanes(a.max(b)));
    assert_eq!(lanes(V::select(a.cmp_lt(b), a, b)), lanes(a.min(b)));
}

fn check_comparisons<V: SimdVector<Scalar = f32>>() {
    let a = vector_from_fn::<V>(|i| i as f32);
    let b = V::splat(1.0);
    let lanes_below = a.cmp_lt(b).count();
    assert_eq!(lanes_below, 1);
    assert_eq!(a.cmp_le(b).count(), 2.min(V::LANES));
    assert_eq!(a.cmp_eq(a).count(), V::LANES);
    assert!(a.cmp_ne(a).none());
    assert_eq!(
        a.cmp_ge(b).to_bitmask() | a.cmp_lt(b).to_bitmask(),
        a.cmp_eq(a).to_bitmask()
    );
}

fn check_nan_lanes<V: SimdFloat<Scalar = f32>>() {
    let nan = V::splat(f32::NAN);
    let one = V::splat(1.0);
    assert!(nan.is_nan().all());
    assert!(nan.cmp_ne(nan).all());
    assert!(nan.cmp_eq(nan).none());
    assert!(nan.cmp_lt(one).none());
    assert!(one.is_nan().none());

    // a < b ? a : b keeps b whenever either side is NaN
    assert!(lanes(nan.min(one)).iter().all(|&x| x == 1.0));
    assert!(lanes(one.min(nan)).iter().all(|x| x.is_nan()));
}

fn check_float_ops<V: SimdFloat<Scalar = f32>>() {
    let v = vector_from_fn::<V>(|i| i as f32 - 1.5);
    for (i, x) in lanes(v.abs()).into_iter().enumerate() {
        assert_eq!(x, (i as f32 - 1.5).abs());
    }
    for (i, x) in lanes(v.floor()).into_iter().enumerate() {
        assert_eq!(x, libm::floorf(i as f32 - 1.5));
    }
    for (i, x) in lanes(v.ceil()).into_iter().enumerate() {
        assert_eq!(x, libm::ceilf(i as f32 - 1.5));
    }
    assert!(lanes(V::splat(16.0).sqrt()).iter().all(|&x| x == 4.0));
    assert!(lanes(V::splat(4.0).recip()).iter().all(|&x| x == 0.25));

    let neg = -V::splat(0.0);
    assert!(lanes(neg).iter().all(|x| x.is_sign_negative()));
}

fn check_fused_multiply_add<V: SimdFloat<Scalar = f32>>() {
    // (1 + e)(1 - e) - 1 is -e^2 when fused and 0 when the product is rounded
    let (x, y) = (1.0 + f32::EPSILON, 1.0 - f32::EPSILON);
    let expected = ref_fma(x, y, -1.0);
    assert_eq!(expected, -(f32::EPSILON * f32::EPSILON));
    let fused = V::splat(x).mul_add(V::splat(y), V::splat(-1.0));
    assert!(lanes(fused).iter().all(|&v| v == expected));
}

fn check_lane_shuffles<V: SimdVector<Scalar = f32>>() {
    let v = V::indexes_from_zero();
    let n = V::LANES;

    let reversed = lanes(v.reversed());
    let rotated = lanes(v.rotated(1));
    let shifted = lanes(v.shifted(1));
    for i in 0..n {
        assert_eq!(reversed[i], (n - 1 - i) as f32);
        assert_eq!(rotated[i], ((i + 1) % n) as f32);
        let expected = if i + 1 < n { (i + 1) as f32 } else { 0.0 };
        assert_eq!(shifted[i], expected);
    }
    assert_eq!(lanes(v.rotated(n)), lanes(v));
    assert_eq!(v.replace(0, 9.0).extract(0), 9.0);
    assert!(lanes(v.shifted(-(n as isize))).iter().all(|&x| x == 0.0));
}

fn check_integer_wrapping<V: SimdInt<Scalar = i32>>() {
    let max = V::splat(i32::MAX);
    let one = V::splat(1);
    assert!(lanes(max + one).iter().all(|&x| x == i32::MIN));
    assert!(lanes(V::splat(i32::MIN) - one).iter().all(|&x| x == i32::MAX));
    assert!(lanes(-V::splat(i32::MIN)).iter().all(|&x| x == i32::MIN));
    assert!(lanes(V::splat(-7) / V::splat(2)).iter().all(|&x| x == -3));

    assert!(lanes(V::splat(-16) >> 2).iter().all(|&x| x == -4));
    assert!(lanes(V::splat(1) << 33).iter().all(|&x| x == 2));
    assert!(lanes(!V::splat(0)).iter().all(|&x| x == -1));
    assert!(lanes((V::splat(0b1100) & V::splat(0b1010)) ^ V::splat(0b0001))
        .iter()
        .all(|&x| x == 0b1001));
}

fn check_unsigned_compare<V: SimdInt<Scalar = u32>>() {
    let big = V::splat(0x8000_0000);
    let small = V::splat(1);
    assert!(big.cmp_gt(small).all());
    assert!(lanes(big.max(small)).iter().all(|&x| x == 0x8000_0000));
    assert!(lanes(V::splat(u32::MAX) >> 28).iter().all(|&x| x == 0xF));
    assert_eq!(V::splat(u32::MAX).horizontal_max(), u32::MAX);
}

fn check_all<F, I, U>()
where
    F: SimdFloat<Scalar = f32>,
    I: SimdInt<Scalar = i32>,
    U: SimdInt<Scalar = u32> + IndexVector,
{
    check_splat_sum::<F>();
    check_masked_store_complement::<F>();
    check_scatter_gather_roundtrip::<F, U>(vector_from_fn::<U>(|i| (3 * i) as u32));
    check_select_is_max::<F>();
    check_comparisons::<F>();
    check_nan_lanes::<F>();
    check_float_ops::<F>();
    check_fused_multiply_add::<F>();
    check_lane_shuffles::<F>();
    check_integer_wrapping::<I>();
    check_unsigned_compare::<U>();
}

#[test]
fn test_scalar_backend_contract() {
    check_all::<ScalarVector<f32>, ScalarVector<i32>, ScalarVector<u32>>();
}

#[test]
fn test_generic128_contract() {
    check_all::<ArrayVector<f32, 4>, ArrayVector<i32, 4>, ArrayVector<u32, 4>>();
}

#[test]
fn test_generic256_contract() {
    check_all::<ArrayVector<f32, 8>, ArrayVector<i32, 8>, ArrayVector<u32, 8>>();
}

#[test]
fn test_active_backend_contract() {
    check_all::<Vector<f32>, Vector<i32>, Vector<u32>>();
}

#[test]
fn test_four_lane_comparison_example() {
    let a = ArrayVector::<i32, 4>::from_array([1, 2, 3, 4]);
    let b = ArrayVector::<i32, 4>::from_array([4, 3, 2, 1]);
    let mask = a.cmp_lt(b);
    assert_eq!(mask.to_array(), [true, true, false, false]);
    assert_eq!(mask.count(), 2);
    assert!(mask.test(1));
    assert!(!mask.test(2));
}

#[test]
fn test_duplicate_scatter_indices_highest_lane_wins() {
    let mut out = [0.0f32; 4];
    ArrayVector::<f32, 4>::from_array([1.0, 2.0, 3.0, 4.0]).scatter(&mut out, [0u32, 0, 2, 2]);
    assert_eq!(out, [2.0, 0.0, 4.0, 0.0]);

    let mut masked = [0.0f32; 4];
    let mask = ArrayVector::<f32, 4>::from_array([1.0, 0.0, 1.0, 0.0]).cmp_gt(ArrayVector::zero());
    ArrayVector::<f32, 4>::from_array([1.0, 2.0, 3.0, 4.0]).scatter_masked(
        &mut masked,
        [0u32, 0, 2, 2],
        mask,
    );
    assert_eq!(masked, [1.0, 0.0, 3.0, 0.0]);
}

#[test]
fn test_strided_gather_reads_one_field() {
    // [x0, y0, x1, y1, ...]
    let points: Vec<f64> = (0..16).map(|i| i as f64).collect();
    let xs = ArrayVector::<f64, 4>::gather_strided(&points, [0u32, 1, 2, 3], 2);
    let ys = ArrayVector::<f64, 4>::gather_strided(&points[1..], [0u32, 1, 2, 3], 2);
    assert_eq!(xs.to_array(), [0.0, 2.0, 4.0, 6.0]);
    assert_eq!(ys.to_array(), [1.0, 3.0, 5.0, 7.0]);
}

#[test]
fn test_masked_gather_skips_unset_lanes() {
    let base = [1.0f32, 2.0, 3.0];
    let mask = ArrayVector::<f32, 4>::from_array([1.0, 0.0, 1.0, 0.0]).cmp_gt(ArrayVector::zero());
    // lanes 1 and 3 point out of bounds but are masked off
    let v = ArrayVector::<f32, 4>::gather_masked(
        &base,
        [2u32, 100, 0, 100],
        mask,
        ArrayVector::splat(-1.0),
    );
    assert_eq!(v.to_array(), [3.0, -1.0, 1.0, -1.0]);
}

#[test]
fn test_permute() {
    let v = ArrayVector::<u32, 4>::from_array([10, 20, 30, 40]);
    assert_eq!(v.permute([3u32, 3, 0, 1]).to_array(), [40, 40, 10, 20]);
}

#[test]
#[should_panic(expected = "out of range")]
fn test_gather_out_of_bounds_panics() {
    let base = [1.0f32; 4];
    let _ = ArrayVector::<f32, 4>::gather(&base, [0u32, 1, 2, 4]);
}

#[test]
#[should_panic(expected = "index 4 out of range for length 4")]
fn test_extract_past_lanes_panics() {
    let _ = ArrayVector::<f32, 4>::splat(1.0).extract(4);
}

#[test]
#[should_panic(expected = "out of range")]
fn test_short_slice_load_panics() {
    let data = [1.0f32; 3];
    let _ = ArrayVector::<f32, 4>::load_unaligned(&data);
}

/// Over-aligned backing store, so `&block.0[1..]` is misaligned for every vector
#[cfg(debug_assertions)]
#[repr(align(64))]
struct Block64([f32; 32]);

/// Run `f`, returning its panic message if it panicked
#[cfg(debug_assertions)]
fn panic_message(f: impl FnOnce()) -> Option<String> {
    let payload = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)).err()?;
    payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| s.to_string()))
}

#[cfg(debug_assertions)]
fn check_misaligned_access_panics<V: SimdVector<Scalar = f32>>() {
    use lanewise::{Aligned, Streaming};

    // one-lane vectors only need element alignment, which a slice always has
    if V::ALIGN <= core::mem::align_of::<f32>() {
        return;
    }

    let mut block = Block64([1.0; 32]);
    let value = V::splat(2.0);
    let expect = |operation: &str, message: Option<String>| {
        let message = message.unwrap_or_else(|| panic!("{operation} accepted a misaligned slice"));
        assert!(message.contains("is not aligned"), "{operation}: {message}");
    };

    expect("load_aligned", panic_message(|| {
        let _ = V::load_aligned(&block.0[1..]);
    }));
    expect("load(Aligned)", panic_message(|| {
        let _ = V::load(&block.0[1..], Aligned);
    }));
    expect("load_streaming", panic_message(|| {
        let _ = V::load_streaming(&block.0[1..]);
    }));
    expect("store_aligned", panic_message(|| value.store_aligned(&mut block.0[1..])));
    expect("store(Streaming)", panic_message(|| value.store(&mut block.0[1..], Streaming)));
    expect("store_streaming", panic_message(|| value.store_streaming(&mut block.0[1..])));

    // untouched by the rejected stores, and fine at the aligned start
    assert!(block.0.iter().all(|&x| x == 1.0));
    value.store_aligned(&mut block.0);
    assert_eq!(V::load_aligned(&block.0).horizontal_sum(), 2.0 * V::LANES as f32);
}

#[test]
#[cfg(debug_assertions)]
fn test_misaligned_access_panics_on_every_backend() {
    check_misaligned_access_panics::<ScalarVector<f32>>();
    check_misaligned_access_panics::<ArrayVector<f32, 4>>();
    check_misaligned_access_panics::<ArrayVector<f32, 8>>();
    check_misaligned_access_panics::<Vector<f32>>();
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "is not aligned")]
fn test_misaligned_aligned_load_panics() {
    use lanewise::Aligned;

    let block = Block64([0.0; 32]);
    let _ = ArrayVector::<f32, 4>::load(&block.0[1..], Aligned);
}

#[test]
fn test_map_lanes_applies_scalar_function() {
    let v = ArrayVector::<f32, 4>::from_array([0.0, 1.0, 4.0, 9.0]);
    assert_eq!(v.map_lanes(libm::sqrtf).to_array(), [0.0, 1.0, 2.0, 3.0]);
}

#[test]
fn test_reduction_tree_order() {
    let values = [1.0e8f32, 1.0, -1.0e8, 1.0, 0.5, 0.25, 0.125, 0.0625];
    let v = ArrayVector::<f32, 8>::from_array(values);
    assert_eq!(v.horizontal_sum(), ref_reduce(&values, |a, b| a + b));
    assert_eq!(v.horizontal_product(), ref_reduce(&values, |a, b| a * b));
    assert_eq!(v.horizontal_min(), -1.0e8);
    assert_eq!(v.horizontal_max(), 1.0e8);
}
