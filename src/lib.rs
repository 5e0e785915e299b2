#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::many_single_char_names)]
#![no_std]

//! Vector and matrix math for the mdlview model viewer.
//!
//! # Overview.
//!
//! This crate implements the geometric value types the viewer computes with:
//!
//! - planar vectors ([`Vector2D`]), used for pathfinding and other
//!   operations treated as planar rather than 3d,
//! - spatial vectors ([`Vector3D`]), used for positions, directions and
//!   normals,
//! - 4x4 transforms ([`Matrix4x4`]), used for model and camera transforms.
//!
//! All types are plain `Copy` values generic over a [`Scalar`] floating
//! point type, with `f32` aliases ([`Vec2`], [`Vec3`], [`Mat4`]) matching
//! the engine's representation. `Vector3D` and `Matrix4x4` are guaranteed
//! to be laid out as consecutive scalars with no padding, so they can be
//! exchanged with the engine as raw `float[3]` / `float[16]` buffers
//! through the slice accessors.

#[cfg(any(test, feature = "std"))]
extern crate std;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod matrix;
pub mod vec2;
pub mod vec3;

#[doc(inline)]
pub use crate::matrix::{Mat4, Matrix4x4};
#[doc(inline)]
pub use crate::vec2::{vec2, Vec2, Vector2D};
#[doc(inline)]
pub use crate::vec3::{vec3, Vec3, Vector3D};

pub use crate::scalar::Scalar;

mod scalar {
    use num_traits::{Float, FloatConst, NumCast};

    use core::fmt::{Debug, Display};

    pub trait Scalar: Float + NumCast + FloatConst + Sized + Display + Debug {
        const HALF: Self;
        const ZERO: Self;
        const ONE: Self;
        const TWO: Self;

        const EPSILON: Self;

        fn value(v: f32) -> Self;
    }

    impl Scalar for f32 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;

        const EPSILON: Self = 1e-4;

        #[inline]
        fn value(v: f32) -> Self {
            v
        }
    }

    impl Scalar for f64 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;

        const EPSILON: Self = 1e-8;

        #[inline]
        fn value(v: f32) -> Self {
            v as f64
        }
    }
}
