//! 4x4 transforms.
//!
//! The viewer builds its model and camera transforms from these matrices:
//! translation, scaling, axis-angle rotation and the perspective
//! projection. The convention is column vectors (`p' = M * p`) with the
//! matrix stored column by column, so [`Matrix4x4::as_slice`] yields the
//! sixteen scalars in the order GPU APIs expect.

use crate::scalar::Scalar;
use crate::vec3::Vector3D;

use core::fmt;
use core::ops;
use core::slice;

/// A 4x4 matrix of `f32`s, the viewer's working precision.
pub type Mat4 = Matrix4x4<f32>;

/// A 4x4 transform matrix.
///
/// Fields are named `_rc` (row `r`, column `c`) and laid out column-major:
/// `_11, _21, _31, _41` are the first four scalars in memory.
#[repr(C)]
#[derive(Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Matrix4x4<S> {
    pub _11: S, pub _21: S, pub _31: S, pub _41: S,
    pub _12: S, pub _22: S, pub _32: S, pub _42: S,
    pub _13: S, pub _23: S, pub _33: S, pub _43: S,
    pub _14: S, pub _24: S, pub _34: S, pub _44: S,
}

impl<S: Scalar> Matrix4x4<S> {
    /// Builds a matrix from sixteen scalars in column-major order (the
    /// first four arguments are the first column).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        a11: S, a21: S, a31: S, a41: S,
        a12: S, a22: S, a32: S, a42: S,
        a13: S, a23: S, a33: S, a43: S,
        a14: S, a24: S, a34: S, a44: S,
    ) -> Self {
        Matrix4x4 {
            _11: a11, _21: a21, _31: a31, _41: a41,
            _12: a12, _22: a22, _32: a32, _42: a42,
            _13: a13, _23: a23, _33: a33, _43: a43,
            _14: a14, _24: a24, _34: a34, _44: a44,
        }
    }

    /// Reads the first sixteen elements of `from`, column-major.
    ///
    /// Asserts that the slice holds at least sixteen elements.
    pub fn from_slice(from: &[S]) -> Self {
        assert!(from.len() >= 16);
        Matrix4x4::new(
            from[0], from[1], from[2], from[3],
            from[4], from[5], from[6], from[7],
            from[8], from[9], from[10], from[11],
            from[12], from[13], from[14], from[15],
        )
    }

    /// Borrows the matrix as sixteen consecutive scalars, column-major.
    #[inline]
    pub fn as_slice(&self) -> &[S] {
        // Layout: repr(C), sixteen scalar fields, no padding.
        unsafe { slice::from_raw_parts(&self._11, 16) }
    }

    /// Mutably borrows the matrix as sixteen consecutive scalars.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [S] {
        unsafe { slice::from_raw_parts_mut(&mut self._11, 16) }
    }

    #[inline]
    pub fn identity() -> Self {
        let o = S::ONE;
        let z = S::ZERO;
        Matrix4x4::new(
            o, z, z, z,
            z, o, z, z,
            z, z, o, z,
            z, z, z, o,
        )
    }

    /// A transform moving points by `v`.
    pub fn translation(v: Vector3D<S>) -> Self {
        let o = S::ONE;
        let z = S::ZERO;
        Matrix4x4::new(
            o, z, z, z,
            z, o, z, z,
            z, z, o, z,
            v.x, v.y, v.z, o,
        )
    }

    /// A transform scaling each axis by the matching component of `v`.
    pub fn scaling(v: Vector3D<S>) -> Self {
        let o = S::ONE;
        let z = S::ZERO;
        Matrix4x4::new(
            v.x, z, z, z,
            z, v.y, z, z,
            z, z, v.z, z,
            z, z, z, o,
        )
    }

    /// A right-handed rotation of `rad` radians around `axis`.
    ///
    /// The axis does not need to be normalized. An axis of length below
    /// epsilon yields the identity.
    pub fn rotation(rad: S, axis: Vector3D<S>) -> Self {
        let len = axis.length();
        if len < S::EPSILON {
            return Matrix4x4::identity();
        }

        let x = axis.x / len;
        let y = axis.y / len;
        let z = axis.z / len;

        let s = rad.sin();
        let c = rad.cos();
        let t = S::ONE - c;

        Matrix4x4::new(
            t * x * x + c,
            t * x * y + s * z,
            t * x * z - s * y,
            S::ZERO,
            t * x * y - s * z,
            t * y * y + c,
            t * y * z + s * x,
            S::ZERO,
            t * x * z + s * y,
            t * y * z - s * x,
            t * z * z + c,
            S::ZERO,
            S::ZERO,
            S::ZERO,
            S::ZERO,
            S::ONE,
        )
    }

    /// The perspective projection used by the viewer's camera.
    ///
    /// `fovy` is the vertical field of view in radians; depth maps into
    /// clip space between `near` and `far`.
    pub fn perspective(fovy: S, aspect: S, near: S, far: S) -> Self {
        let f = S::ONE / (fovy * S::HALF).tan();
        let nf = S::ONE / (near - far);
        let z = S::ZERO;

        Matrix4x4::new(
            f / aspect, z, z, z,
            z, f, z, z,
            z, z, (far + near) * nf, -S::ONE,
            z, z, S::TWO * far * near * nf, z,
        )
    }

    /// Applies the transform to a position (`w = 1`).
    ///
    /// Assumes an affine matrix; there is no perspective divide.
    #[inline]
    pub fn transform_point(&self, p: Vector3D<S>) -> Vector3D<S> {
        Vector3D::new(
            self._11 * p.x + self._12 * p.y + self._13 * p.z + self._14,
            self._21 * p.x + self._22 * p.y + self._23 * p.z + self._24,
            self._31 * p.x + self._32 * p.y + self._33 * p.z + self._34,
        )
    }

    /// Applies the transform to a direction (`w = 0`, translation is
    /// ignored).
    #[inline]
    pub fn transform_vector(&self, v: Vector3D<S>) -> Vector3D<S> {
        Vector3D::new(
            self._11 * v.x + self._12 * v.y + self._13 * v.z,
            self._21 * v.x + self._22 * v.y + self._23 * v.z,
            self._31 * v.x + self._32 * v.y + self._33 * v.z,
        )
    }

    /// Right-multiplies by a translation: `self = self * T(v)`.
    pub fn translate(&mut self, v: Vector3D<S>) {
        self._14 = self._11 * v.x + self._12 * v.y + self._13 * v.z + self._14;
        self._24 = self._21 * v.x + self._22 * v.y + self._23 * v.z + self._24;
        self._34 = self._31 * v.x + self._32 * v.y + self._33 * v.z + self._34;
        self._44 = self._41 * v.x + self._42 * v.y + self._43 * v.z + self._44;
    }

    /// Right-multiplies by a scaling: `self = self * S(v)`.
    pub fn scale_by(&mut self, v: Vector3D<S>) {
        self._11 = self._11 * v.x;
        self._21 = self._21 * v.x;
        self._31 = self._31 * v.x;
        self._41 = self._41 * v.x;
        self._12 = self._12 * v.y;
        self._22 = self._22 * v.y;
        self._32 = self._32 * v.y;
        self._42 = self._42 * v.y;
        self._13 = self._13 * v.z;
        self._23 = self._23 * v.z;
        self._33 = self._33 * v.z;
        self._43 = self._43 * v.z;
    }

    /// Right-multiplies by a rotation: `self = self * R(rad, axis)`.
    pub fn rotate(&mut self, rad: S, axis: Vector3D<S>) {
        *self = *self * Matrix4x4::rotation(rad, axis);
    }
}

impl<S: Scalar> ops::Mul for Matrix4x4<S> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Matrix4x4::new(
            self._11 * rhs._11 + self._12 * rhs._21 + self._13 * rhs._31 + self._14 * rhs._41,
            self._21 * rhs._11 + self._22 * rhs._21 + self._23 * rhs._31 + self._24 * rhs._41,
            self._31 * rhs._11 + self._32 * rhs._21 + self._33 * rhs._31 + self._34 * rhs._41,
            self._41 * rhs._11 + self._42 * rhs._21 + self._43 * rhs._31 + self._44 * rhs._41,
            self._11 * rhs._12 + self._12 * rhs._22 + self._13 * rhs._32 + self._14 * rhs._42,
            self._21 * rhs._12 + self._22 * rhs._22 + self._23 * rhs._32 + self._24 * rhs._42,
            self._31 * rhs._12 + self._32 * rhs._22 + self._33 * rhs._32 + self._34 * rhs._42,
            self._41 * rhs._12 + self._42 * rhs._22 + self._43 * rhs._32 + self._44 * rhs._42,
            self._11 * rhs._13 + self._12 * rhs._23 + self._13 * rhs._33 + self._14 * rhs._43,
            self._21 * rhs._13 + self._22 * rhs._23 + self._23 * rhs._33 + self._24 * rhs._43,
            self._31 * rhs._13 + self._32 * rhs._23 + self._33 * rhs._33 + self._34 * rhs._43,
            self._41 * rhs._13 + self._42 * rhs._23 + self._43 * rhs._33 + self._44 * rhs._43,
            self._11 * rhs._14 + self._12 * rhs._24 + self._13 * rhs._34 + self._14 * rhs._44,
            self._21 * rhs._14 + self._22 * rhs._24 + self._23 * rhs._34 + self._24 * rhs._44,
            self._31 * rhs._14 + self._32 * rhs._24 + self._33 * rhs._34 + self._34 * rhs._44,
            self._41 * rhs._14 + self._42 * rhs._24 + self._43 * rhs._34 + self._44 * rhs._44,
        )
    }
}

impl<S: Scalar> fmt::Debug for Matrix4x4<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Matrix4x4[{} {} {} {} | {} {} {} {} | {} {} {} {} | {} {} {} {}]",
            self._11, self._21, self._31, self._41,
            self._12, self._22, self._32, self._42,
            self._13, self._23, self._33, self._43,
            self._14, self._24, self._34, self._44,
        )
    }
}

#[cfg(test)]
use crate::vec3::{vec3, Vec3};
#[cfg(test)]
use std::f32::consts::PI;

#[test]
fn test_identity() {
    let m = Mat4::identity();
    let p = vec3(1.0, 2.0, 3.0);

    assert_eq!(m.transform_point(p), p);
    assert_eq!(m.transform_vector(p), p);
    assert_eq!(m * m, m);
}

#[test]
fn test_translation() {
    let m = Mat4::translation(vec3(10.0, 20.0, 30.0));
    let p = vec3(1.0, 2.0, 3.0);

    assert_eq!(m.transform_point(p), vec3(11.0, 22.0, 33.0));
    // Directions are unaffected by translation.
    assert_eq!(m.transform_vector(p), p);

    // The translation lands in the last column of the GPU buffer.
    assert_eq!(&m.as_slice()[12..16], &[10.0, 20.0, 30.0, 1.0]);
}

#[test]
fn test_scaling() {
    let m = Mat4::scaling(vec3(2.0, 3.0, 4.0));
    assert_eq!(m.transform_point(vec3(1.0, 1.0, 1.0)), vec3(2.0, 3.0, 4.0));
    assert_eq!(m.transform_vector(vec3(1.0, -1.0, 0.5)), vec3(2.0, -3.0, 2.0));
}

#[test]
fn test_rotation() {
    // Right-handed quarter turns.
    let rz = Mat4::rotation(PI * 0.5, Vec3::z_axis());
    assert!(rz.transform_vector(Vec3::x_axis()).epsilon_eq(Vec3::y_axis()));

    let rx = Mat4::rotation(PI * 0.5, Vec3::x_axis());
    assert!(rx.transform_vector(Vec3::y_axis()).epsilon_eq(Vec3::z_axis()));

    // The axis is normalized internally.
    let rz10 = Mat4::rotation(PI * 0.5, vec3(0.0, 0.0, 10.0));
    assert_eq!(rz10, rz);

    // Rotation preserves length.
    let v = vec3(1.0, 2.0, 3.0);
    let rotated = Mat4::rotation(1.2, vec3(1.0, 1.0, 0.0)).transform_vector(v);
    assert!((rotated.length() - v.length()).abs() < 1e-5);

    // A degenerate axis yields the identity.
    assert_eq!(Mat4::rotation(1.0, Vec3::zero()), Mat4::identity());
}

#[test]
fn test_mul_composes() {
    let a = vec3(1.0, 2.0, 3.0);
    let b = vec3(10.0, 20.0, 30.0);

    assert_eq!(
        Mat4::translation(a) * Mat4::translation(b),
        Mat4::translation(a + b)
    );

    let m = Mat4::translation(a) * Mat4::scaling(vec3(2.0, 2.0, 2.0));
    let p = vec3(1.0, 1.0, 1.0);
    assert_eq!(m.transform_point(p), vec3(3.0, 4.0, 5.0));
}

#[test]
fn test_mutating_ops() {
    let v = vec3(1.0, -2.0, 3.0);

    let mut m = Mat4::identity();
    m.translate(v);
    assert_eq!(m, Mat4::translation(v));

    let mut m = Mat4::identity();
    m.scale_by(v);
    assert_eq!(m, Mat4::scaling(v));

    let mut m = Mat4::identity();
    m.rotate(0.7, vec3(1.0, 2.0, 3.0));
    assert_eq!(m, Mat4::rotation(0.7, vec3(1.0, 2.0, 3.0)));

    // translate() is a right-multiply: the scaling applies to the offset.
    let mut m = Mat4::scaling(vec3(2.0, 2.0, 2.0));
    m.translate(v);
    assert_eq!(m, Mat4::scaling(vec3(2.0, 2.0, 2.0)) * Mat4::translation(v));
}

#[test]
fn test_perspective() {
    let m = Mat4::perspective(PI * 0.5, 1.0, 1.0, 3.0);

    assert!((m._11 - 1.0).abs() < 1e-6);
    assert!((m._22 - 1.0).abs() < 1e-6);
    assert_eq!(m._33, -2.0);
    assert_eq!(m._34, -3.0);
    assert_eq!(m._43, -1.0);
    assert_eq!(m._44, 0.0);
}

#[test]
fn test_layout() {
    use core::mem;

    assert_eq!(mem::size_of::<Mat4>(), mem::size_of::<f32>() * 16);

    let m = Mat4::identity();
    assert!(core::ptr::eq(&m._11, &m.as_slice()[0]));
    assert_eq!(Mat4::from_slice(m.as_slice()), m);
}
