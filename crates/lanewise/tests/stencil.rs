//! Finite-difference stencil through shifted vector windows
//!
//! Builds `y = sin(x)` on a grid, then differentiates it with the fourth-order
//! central difference, reading neighbours through `vector_at`. The vector
//! result must match the same formula evaluated element by element.

use lanewise::{
    ArrayVector, DynMemory, Memory, ScalarVector, SimdFloat, SimdVector, Vector, VectorMemory,
};

use test_utils::*;

const H: f64 = 0.01;

/// Sample `sin` at `x_i = i * H`, padding included
fn sample<M>(y: &mut M)
where
    M: VectorMemory,
    M::Vector: SimdFloat<Scalar = f64>,
{
    let lanes = <M::Vector as SimdVector>::LANES;
    let step = <M::Vector as SimdVector>::splat(lanes as f64);
    let mut x_i = <M::Vector as SimdVector>::indexes_from_zero();
    for i in 0..y.vectors_count() {
        let x = x_i * <M::Vector as SimdVector>::splat(H);
        y.set_vector(i, x.map_lanes(libm::sin));
        x_i += step;
    }
}

/// `(y[j-2] - y[j+2] + 8 (y[j+1] - y[j-1])) / 12h` for every vector whose
/// windows stay inside the allocation; other elements are left at zero
fn differentiate<M>(y: &M, dy: &mut M)
where
    M: VectorMemory,
    M::Vector: SimdFloat<Scalar = f64>,
{
    let lanes = <M::Vector as SimdVector>::LANES;
    let eight = <M::Vector as SimdVector>::splat(8.0);
    let denom = <M::Vector as SimdVector>::splat(12.0 * H);
    let first = 2usize.div_ceil(lanes);

    for i in first..y.vectors_count() {
        if (i + 1) * lanes + 2 > y.padded_len() {
            break;
        }
        let ym2 = y.vector_at(i, -2);
        let ym1 = y.vector_at(i, -1);
        let yp1 = y.vector_at(i, 1);
        let yp2 = y.vector_at(i, 2);
        dy.set_vector(i, (ym2 - yp2 + eight * (yp1 - ym1)) / denom);
    }
}

/// The same stencil as a plain loop over the padded elements
fn differentiate_scalar(y: &[f64], lanes: usize) -> Vec<f64> {
    let mut dy = vec![0.0; y.len()];
    let first = 2usize.div_ceil(lanes) * lanes;
    let mut j = first;
    while j + lanes + 2 <= y.len() {
        for k in j..j + lanes {
            dy[k] = (y[k - 2] - y[k + 2] + 8.0 * (y[k + 1] - y[k - 1])) / (12.0 * H);
        }
        j += lanes;
    }
    dy
}

fn check_stencil<M>(mut y: M, mut dy: M)
where
    M: VectorMemory,
    M::Vector: SimdFloat<Scalar = f64>,
{
    let lanes = <M::Vector as SimdVector>::LANES;
    sample(&mut y);
    differentiate(&y, &mut dy);

    let expected = differentiate_scalar(y.padded(), lanes);
    assert_f64_lanes_identical(dy.padded(), &expected, "stencil");

    // d/dx sin = cos, to fourth order in H
    let j = 2usize.div_ceil(lanes) * lanes + 1;
    assert!((dy.padded()[j] - libm::cos(j as f64 * H)).abs() < 1e-8);
}

#[test]
fn test_stencil_scalar_backend() {
    check_stencil(
        Memory::<ScalarVector<f64>, 101>::new(),
        Memory::<ScalarVector<f64>, 101>::new(),
    );
}

#[test]
fn test_stencil_two_lanes() {
    check_stencil(
        Memory::<ArrayVector<f64, 2>, 101>::new(),
        Memory::<ArrayVector<f64, 2>, 101>::new(),
    );
}

#[test]
fn test_stencil_four_lanes() {
    check_stencil(
        DynMemory::<ArrayVector<f64, 4>>::new(99),
        DynMemory::<ArrayVector<f64, 4>>::new(99),
    );
}

#[test]
fn test_stencil_active_backend() {
    check_stencil(
        DynMemory::<Vector<f64>>::new(257),
        DynMemory::<Vector<f64>>::new(257),
    );
}

#[test]
fn test_abscissae_from_indexes() {
    let mut y = Memory::<ArrayVector<f64, 4>, 6>::new();
    sample(&mut y);
    for (i, &v) in y.padded().iter().enumerate() {
        assert_eq!(v, libm::sin(i as f64 * H));
    }
}
