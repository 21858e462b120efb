//! Second-order dual numbers.
//!
//! A [`Jet`] extends [`Dual`](crate::dual::Dual) with a second derivative so a
//! curve can report its acceleration alongside its velocity.

use core::ops::{Add, Mul, Sub};

use glam::Vec2;

use crate::dual::Tangent;

/// Tangent carrier with a componentwise product, needed for the `2 f' g'` and
/// `f'²` terms of the second derivative.
pub trait JetTangent: Tangent {
    fn hadamard(self, other: Self) -> Self;
}

impl JetTangent for f32 {
    #[inline]
    fn hadamard(self, other: Self) -> Self {
        self * other
    }
}

impl JetTangent for Vec2 {
    #[inline]
    fn hadamard(self, other: Self) -> Self {
        self * other
    }
}

/// Value, first derivative and second derivative.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Jet<T: JetTangent = Vec2> {
    pub value: f32,
    pub deriv: T,
    pub deriv2: T,
}

/// Second-order jet over the surface parameters `(u, v)`.
pub type Jet2 = Jet<Vec2>;

impl<T: JetTangent> Jet<T> {
    #[inline]
    pub fn new(value: f32, deriv: T, deriv2: T) -> Self {
        Self { value, deriv, deriv2 }
    }

    #[inline]
    pub fn constant(value: f32) -> Self {
        Self::new(value, T::default(), T::default())
    }

    /// Seeds an independent variable with derivative `seed` and zero curvature.
    #[inline]
    pub fn seed(value: f32, seed: T) -> Self {
        Self::new(value, seed, T::default())
    }

    /// `f(g)` given `f`, `f'` and `f''` evaluated at `g.value`:
    /// `(f∘g)'' = f''(g) g'² + f'(g) g''`.
    #[inline]
    fn chain(self, f: f32, df: f32, ddf: f32) -> Self {
        Self::new(
            f,
            self.deriv * df,
            self.deriv.hadamard(self.deriv) * ddf + self.deriv2 * df,
        )
    }

    pub fn sin(self) -> Self {
        let (s, c) = self.value.sin_cos();
        self.chain(s, c, -s)
    }

    pub fn cos(self) -> Self {
        let (s, c) = self.value.sin_cos();
        self.chain(c, -s, -c)
    }

    /// `self^n` for a constant exponent `n`.
    pub fn powf(self, n: f32) -> Self {
        let f = self.value.powf(n);
        let df = n * self.value.powf(n - 1.0);
        let ddf = n * (n - 1.0) * self.value.powf(n - 2.0);
        self.chain(f, df, ddf)
    }
}

impl<T: JetTangent> Add for Jet<T> {
    type Output = Self;
    #[inline]
    fn add(self, r: Self) -> Self {
        Self::new(self.value + r.value, self.deriv + r.deriv, self.deriv2 + r.deriv2)
    }
}

impl<T: JetTangent> Sub for Jet<T> {
    type Output = Self;
    #[inline]
    fn sub(self, r: Self) -> Self {
        Self::new(self.value - r.value, self.deriv - r.deriv, self.deriv2 - r.deriv2)
    }
}

impl<T: JetTangent> Mul for Jet<T> {
    type Output = Self;
    #[inline]
    fn mul(self, r: Self) -> Self {
        Self::new(
            self.value * r.value,
            r.deriv * self.value + self.deriv * r.value,
            r.deriv2 * self.value + self.deriv.hadamard(r.deriv) * 2.0 + self.deriv2 * r.value,
        )
    }
}

impl<T: JetTangent> Mul<f32> for Jet<T> {
    type Output = Self;
    #[inline]
    fn mul(self, r: f32) -> Self {
        Self::new(self.value * r, self.deriv * r, self.deriv2 * r)
    }
}

impl<T: JetTangent> Add<f32> for Jet<T> {
    type Output = Self;
    #[inline]
    fn add(self, r: f32) -> Self {
        Self::new(self.value + r, self.deriv, self.deriv2)
    }
}
