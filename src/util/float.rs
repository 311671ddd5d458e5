use num_traits::Float;

/// Floating point types a grid can be built from.
/// Each precision carries its own validation tolerance.
pub trait StencilFloat:
    Float
    + nalgebra::Scalar
    + std::iter::Sum
    + std::fmt::Display
    + Send
    + Sync
{
    /// Largest accepted distance between computed and reference L1 norm.
    const VALIDATION_EPSILON: Self;

    /// Human readable name used in reports.
    const PRECISION_NAME: &'static str;

    fn from_real(value: f64) -> Self;

    fn from_count(value: usize) -> Self;

    fn as_f64(self) -> f64;
}

impl StencilFloat for f32 {
    const VALIDATION_EPSILON: Self = 0.0001;
    const PRECISION_NAME: &'static str = "single precision";

    #[inline]
    fn from_real(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn from_count(value: usize) -> Self {
        value as f32
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl StencilFloat for f64 {
    const VALIDATION_EPSILON: Self = 1.0e-8;
    const PRECISION_NAME: &'static str = "double precision";

    #[inline]
    fn from_real(value: f64) -> Self {
        value
    }

    #[inline]
    fn from_count(value: usize) -> Self {
        value as f64
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
}

/// Precision selected for the binary at build time.
#[cfg(feature = "double")]
pub type Real = f64;

#[cfg(not(feature = "double"))]
pub type Real = f32;
