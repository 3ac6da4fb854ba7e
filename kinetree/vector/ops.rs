//! Generic operations over frame-tagged vectors

use super::FrameVector;
use crate::quaternion::Quaternion;
use crate::scalar::Scalar;

/// Combine two component arrays elementwise
pub(crate) fn zip_with<T: Copy, const N: usize>(a: [T; N], b: [T; N], op: impl Fn(T, T) -> T) -> [T; N] {
    std::array::from_fn(|i| op(a[i], b[i]))
}

/// Vector dot product
pub fn dot_product<V: FrameVector>(v: &V, u: &V) -> V::Scalar {
    let (v, u) = (v.components(), u.components());
    v.iter()
        .zip(u.iter())
        .fold(V::Scalar::zero(), |acc, (a, b)| acc + *a * *b)
}

/// Vector cross product
///
/// Taken as the vector part of the product of the two pure quaternions, so
/// it rounds exactly like quaternion multiplication does.
pub fn cross_product<V: FrameVector>(v: &V, u: &V) -> V {
    let product = Quaternion::pure(v.components()) * Quaternion::pure(u.components());
    V::from_components(product.vector_part())
}

/// Euclidean norm
pub fn magnitude<V: FrameVector>(v: &V) -> V::Scalar {
    let [x, y, z] = v.components();
    V::Scalar::hypot3(x, y, z)
}

/// Vector with the same direction as `v` and unit norm
///
/// The zero vector is returned unchanged.
pub fn normalized<V: FrameVector>(v: &V) -> V {
    let components = v.components();
    if components.iter().all(|c| *c == V::Scalar::zero()) {
        return *v;
    }

    let norm = magnitude(v);
    V::from_components(components.map(|c| c / norm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame;
    use crate::frame::Frame;
    use crate::scalar::within_ulps;
    use crate::vector::{Position, Vector, Velocity};

    frame!(struct N);
    frame!(struct A);
    frame!(struct S: f32);

    #[test]
    fn test_zip_with() {
        assert_eq!(zip_with([1, 2, 3], [4, 5, 6], |a, b| a * b), [4, 10, 18]);
    }

    #[test]
    fn test_dot_product() {
        let v = Vector::<N>::zero();
        let u = Vector::<N>::new(1.0, 0.0, 0.0);
        let w = Vector::<N>::new(1.0, 1.0, 0.0);

        assert_eq!(dot_product(&v, &v), 0.0);
        assert_eq!(dot_product(&u, &u), 1.0);
        assert_eq!(dot_product(&w, &w), 2.0);
        assert_eq!(dot_product(&v, &u), 0.0);
        assert_eq!(dot_product(&u, &w), 1.0);
        assert_eq!(dot_product(&w, &u), 1.0);
    }

    #[test]
    fn test_dot_product_f32() {
        let w = Vector::<S>::new(1.0, 1.0, 0.0);
        assert_eq!(dot_product(&w, &w), 2.0f32);
    }

    #[test]
    fn test_cross_product_basis() {
        assert_eq!(cross_product(&N::x(), &N::y()), N::z());
        assert_eq!(cross_product(&N::y(), &N::z()), N::x());
        assert_eq!(cross_product(&N::z(), &N::x()), N::y());
    }

    #[test]
    fn test_cross_product_self_is_zero() {
        let u = Vector::<N>::new(1.5, -2.0, 0.25);
        assert!(cross_product(&u, &u).is_zero());
    }

    #[test]
    fn test_cross_product_anticommutes() {
        let u = Vector::<N>::new(1.5, -2.0, 0.25);
        let v = Vector::<N>::new(-0.5, 3.0, 7.0);
        assert_eq!(cross_product(&u, &v), -cross_product(&v, &u));
    }

    #[test]
    fn test_cross_product_on_positions() {
        let r = Position::<A>::new(1.0, 0.0, 0.0);
        let s = Position::<A>::new(0.0, 2.0, 0.0);
        assert_eq!(cross_product(&r, &s), Position::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_magnitude() {
        assert_eq!(magnitude(&Vector::<N>::new(3.0, 4.0, 0.0)), 5.0);
        assert_eq!(magnitude(&Velocity::<A, N>::new(0.0, 0.0, -2.0)), 2.0);
    }

    #[test]
    fn test_normalized_has_unit_magnitude() {
        let vectors = [
            Vector::<N>::new(1.0, 1.0, 1.0),
            Vector::<N>::new(-3.0, 0.1, 12.0),
            Vector::<N>::new(1e-3, 0.0, 0.0),
            Vector::<N>::new(7.0, -24.0, 0.5),
        ];

        for v in vectors {
            let n = normalized(&v);
            assert!(within_ulps(magnitude(&n), 1.0, 4), "{} -> {}", v, n);
        }
    }

    #[test]
    fn test_normalized_zero() {
        assert_eq!(normalized(&Vector::<N>::zero()), Vector::zero());
    }
}
