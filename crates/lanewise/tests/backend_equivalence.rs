//! Property-based backend equivalence tests
//!
//! The active backend (scalar, a portable array width or an intrinsic
//! backend) must agree lane for lane with `ArrayVector` of the same width,
//! which is the plain-Rust statement of the lane-wise semantics. Floats are
//! compared bit for bit, with any NaN equal to any other NaN.

use lanewise::{ArrayVector, SimdFloat, SimdInt, SimdMask, SimdVector, Vector};
use proptest::prelude::*;

use test_utils::*;

const F32_LANES: usize = <Vector<f32> as SimdVector>::LANES;
const F64_LANES: usize = <Vector<f64> as SimdVector>::LANES;
const I32_LANES: usize = <Vector<i32> as SimdVector>::LANES;
const U32_LANES: usize = <Vector<u32> as SimdVector>::LANES;

type RefF32 = ArrayVector<f32, F32_LANES>;
type RefF64 = ArrayVector<f64, F64_LANES>;
type RefI32 = ArrayVector<i32, I32_LANES>;
type RefU32 = ArrayVector<u32, U32_LANES>;

/// Every operation's lanes, in a fixed order
struct Battery<T> {
    values: Vec<(&'static str, Vec<T>)>,
    masks: Vec<(&'static str, Vec<bool>)>,
}

fn mask_lanes<M: SimdMask>(mask: M) -> Vec<bool> {
    mask.to_array().as_ref().to_vec()
}

fn common_battery<V: SimdVector>(a: V, b: V, c: V) -> Battery<V::Scalar> {
    let values = vec![
        ("add", lanes(a + b)),
        ("sub", lanes(a - b)),
        ("mul", lanes(a * b)),
        ("neg", lanes(-a)),
        ("min", lanes(a.min(b))),
        ("max", lanes(a.max(b))),
        ("select", lanes(V::select(a.cmp_lt(b), a, c))),
        ("reversed", lanes(a.reversed())),
        ("rotated", lanes(a.rotated(1))),
        ("shifted", lanes(a.shifted(-1))),
        ("sum", vec![a.horizontal_sum()]),
        ("product", vec![a.horizontal_product()]),
        ("hmin", vec![a.horizontal_min()]),
        ("hmax", vec![a.horizontal_max()]),
    ];
    let masks = vec![
        ("eq", mask_lanes(a.cmp_eq(b))),
        ("ne", mask_lanes(a.cmp_ne(b))),
        ("lt", mask_lanes(a.cmp_lt(b))),
        ("le", mask_lanes(a.cmp_le(b))),
        ("gt", mask_lanes(a.cmp_gt(b))),
        ("ge", mask_lanes(a.cmp_ge(b))),
        ("bitmask", vec![a.cmp_lt(b).to_bitmask().count_ones() % 2 == 1]),
    ];
    Battery { values, masks }
}

fn float_battery<V: SimdFloat>(a: V, b: V, c: V) -> Battery<V::Scalar> {
    let mut battery = common_battery(a, b, c);
    battery.values.extend([
        ("div", lanes(a / b)),
        ("abs", lanes(a.abs())),
        ("sqrt", lanes(a.sqrt())),
        ("floor", lanes(a.floor())),
        ("ceil", lanes(a.ceil())),
        ("mul_add", lanes(a.mul_add(b, c))),
        ("recip", lanes(b.recip())),
    ]);
    battery.masks.push(("is_nan", mask_lanes(a.is_nan())));
    battery
}

fn int_battery<V: SimdInt>(a: V, b: V, c: V, shift: u32) -> Battery<V::Scalar> {
    let mut battery = common_battery(a, b, c);
    battery.values.extend([
        ("and", lanes(a & b)),
        ("or", lanes(a | b)),
        ("xor", lanes(a ^ b)),
        ("not", lanes(!a)),
        ("shl", lanes(a << shift)),
        ("shr", lanes(a >> shift)),
    ]);
    battery
}

fn assert_same_masks<T>(actual: &Battery<T>, expected: &Battery<T>) {
    for ((name, got), (_, want)) in actual.masks.iter().zip(&expected.masks) {
        assert_eq!(got, want, "{}", name);
    }
}

/// Integer-only division input: zero divisors are replaced by one
fn nonzero<T: Copy + PartialEq + Default + From<u8>>(values: &[T]) -> Vec<T> {
    values
        .iter()
        .map(|&x| if x == T::default() { T::from(1) } else { x })
        .collect()
}

proptest! {
    #[test]
    fn prop_f32_backend_matches_reference(
        a in lanes8(any_f32()),
        b in lanes8(any_f32()),
        c in lanes8(any_f32()),
    ) {
        let actual = float_battery(
            vector_from_slice::<Vector<f32>>(&a),
            vector_from_slice::<Vector<f32>>(&b),
            vector_from_slice::<Vector<f32>>(&c),
        );
        let expected = float_battery(
            vector_from_slice::<RefF32>(&a),
            vector_from_slice::<RefF32>(&b),
            vector_from_slice::<RefF32>(&c),
        );
        for ((name, got), (_, want)) in actual.values.iter().zip(&expected.values) {
            assert_f32_lanes_identical(got, want, name);
        }
        assert_same_masks(&actual, &expected);
    }

    #[test]
    fn prop_f64_backend_matches_reference(
        a in lanes8(any_f32()),
        b in lanes8(any_f32()),
        c in lanes8(any_f32()),
    ) {
        let widen = |xs: &[f32]| -> Vec<f64> { xs.iter().map(|&x| f64::from(x) * 1.1).collect() };
        let (a, b, c) = (widen(&a), widen(&b), widen(&c));
        let actual = float_battery(
            vector_from_slice::<Vector<f64>>(&a),
            vector_from_slice::<Vector<f64>>(&b),
            vector_from_slice::<Vector<f64>>(&c),
        );
        let expected = float_battery(
            vector_from_slice::<RefF64>(&a),
            vector_from_slice::<RefF64>(&b),
            vector_from_slice::<RefF64>(&c),
        );
        for ((name, got), (_, want)) in actual.values.iter().zip(&expected.values) {
            assert_f64_lanes_identical(got, want, name);
        }
        assert_same_masks(&actual, &expected);
    }

    #[test]
    fn prop_i32_backend_matches_reference(
        a in lanes8(any_i32()),
        b in lanes8(any_i32()),
        c in lanes8(any_i32()),
        shift in 0u32..40,
    ) {
        let actual = int_battery(
            vector_from_slice::<Vector<i32>>(&a),
            vector_from_slice::<Vector<i32>>(&b),
            vector_from_slice::<Vector<i32>>(&c),
            shift,
        );
        let expected = int_battery(
            vector_from_slice::<RefI32>(&a),
            vector_from_slice::<RefI32>(&b),
            vector_from_slice::<RefI32>(&c),
            shift,
        );
        prop_assert_eq!(&actual.values, &expected.values);
        assert_same_masks(&actual, &expected);

        let divisor: Vec<i32> = nonzero(&b);
        prop_assert_eq!(
            lanes(vector_from_slice::<Vector<i32>>(&a) / vector_from_slice::<Vector<i32>>(&divisor)),
            lanes(vector_from_slice::<RefI32>(&a) / vector_from_slice::<RefI32>(&divisor))
        );
    }

    #[test]
    fn prop_u32_backend_matches_reference(
        a in lanes8(any::<u32>()),
        b in lanes8(any::<u32>()),
        c in lanes8(any::<u32>()),
        shift in 0u32..40,
    ) {
        let actual = int_battery(
            vector_from_slice::<Vector<u32>>(&a),
            vector_from_slice::<Vector<u32>>(&b),
            vector_from_slice::<Vector<u32>>(&c),
            shift,
        );
        let expected = int_battery(
            vector_from_slice::<RefU32>(&a),
            vector_from_slice::<RefU32>(&b),
            vector_from_slice::<RefU32>(&c),
            shift,
        );
        prop_assert_eq!(&actual.values, &expected.values);
        assert_same_masks(&actual, &expected);

        let divisor: Vec<u32> = nonzero(&b);
        prop_assert_eq!(
            lanes(vector_from_slice::<Vector<u32>>(&a) / vector_from_slice::<Vector<u32>>(&divisor)),
            lanes(vector_from_slice::<RefU32>(&a) / vector_from_slice::<RefU32>(&divisor))
        );
    }

    #[test]
    fn prop_memory_ops_match_reference(values in lanes8(normal_f32()), bits in any::<u8>()) {
        let v = vector_from_slice::<Vector<f32>>(&values);
        let r = vector_from_slice::<RefF32>(&values);
        let mv = mask_from_fn::<<Vector<f32> as SimdVector>::Mask>(|i| (bits >> i) & 1 == 1);
        let mr = mask_from_fn::<<RefF32 as SimdVector>::Mask>(|i| (bits >> i) & 1 == 1);
        prop_assert_eq!(mv.to_bitmask(), mr.to_bitmask());
        prop_assert_eq!(mv.all(), mr.all());
        prop_assert_eq!(mv.any(), mr.any());

        let mut got = vec![-1.0f32; F32_LANES];
        let mut want = vec![-1.0f32; F32_LANES];
        v.store_masked(&mut got, mv);
        r.store_masked(&mut want, mr);
        prop_assert_eq!(got, want);

        let table: Vec<f32> = (0..32).map(|i| i as f32 * 0.5).collect();
        let idx: Vec<u32> = (0..U32_LANES as u32).map(|i| (i * 7 + u32::from(bits)) % 32).collect();
        let gathered = Vector::<f32>::gather(&table, vector_from_slice::<Vector<u32>>(&idx));
        let gathered_ref = RefF32::gather(&table, vector_from_slice::<RefU32>(&idx));
        prop_assert_eq!(lanes(gathered), lanes(gathered_ref));
    }
}

#[test]
fn test_reference_widths_match_active_backend() {
    assert_eq!(RefF32::LANES, Vector::<f32>::LANES);
    assert_eq!(RefF64::ALIGN, Vector::<f64>::ALIGN);
    assert_eq!(RefI32::LANES, I32_LANES);
}
