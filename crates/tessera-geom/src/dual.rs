//! Forward-mode automatic differentiation.
//!
//! A [`Dual`] carries a function value together with its derivative. The
//! derivative type is generic: `f32` tracks a single parameter, `Vec2` tracks
//! the two surface parameters `(u, v)` at once.
//!
//! Division by a zero-valued dual is not guarded; the result is `inf`/`NaN`.

use core::ops::{Add, Div, Mul, Neg, Sub};

use glam::Vec2;

/// Derivative carrier: anything that scales by `f32` and forms a vector space.
pub trait Tangent:
    Copy
    + Default
    + PartialEq
    + core::fmt::Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Mul<f32, Output = Self>
{
}

impl<T> Tangent for T where
    T: Copy
        + Default
        + PartialEq
        + core::fmt::Debug
        + Add<Output = T>
        + Sub<Output = T>
        + Neg<Output = T>
        + Mul<f32, Output = T>
{
}

/// Value plus first derivative.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Dual<T: Tangent = Vec2> {
    pub value: f32,
    pub deriv: T,
}

/// Single-parameter dual number.
pub type Dual1 = Dual<f32>;

/// Dual number over the surface parameters `(u, v)`.
pub type Dual2 = Dual<Vec2>;

impl<T: Tangent> Dual<T> {
    #[inline]
    pub fn new(value: f32, deriv: T) -> Self {
        Self { value, deriv }
    }

    /// A constant (zero derivative).
    #[inline]
    pub fn constant(value: f32) -> Self {
        Self { value, deriv: T::default() }
    }

    /// Chain rule helper: `f(g)` with `f(g.value) = value` and `f'(g.value) = slope`.
    #[inline]
    fn chain(self, value: f32, slope: f32) -> Self {
        Self { value, deriv: self.deriv * slope }
    }

    pub fn sin(self) -> Self {
        self.chain(self.value.sin(), self.value.cos())
    }

    pub fn cos(self) -> Self {
        self.chain(self.value.cos(), -self.value.sin())
    }

    pub fn tan(self) -> Self {
        self.sin() / self.cos()
    }

    pub fn sinh(self) -> Self {
        self.chain(self.value.sinh(), self.value.cosh())
    }

    pub fn cosh(self) -> Self {
        self.chain(self.value.cosh(), self.value.sinh())
    }

    pub fn tanh(self) -> Self {
        self.sinh() / self.cosh()
    }

    pub fn exp(self) -> Self {
        let e = self.value.exp();
        self.chain(e, e)
    }

    /// Natural logarithm.
    pub fn log(self) -> Self {
        self.chain(self.value.ln(), 1.0 / self.value)
    }

    /// `self^n` for a constant exponent `n`.
    pub fn powf(self, n: f32) -> Self {
        self.chain(self.value.powf(n), n * self.value.powf(n - 1.0))
    }

    pub fn sqrt(self) -> Self {
        let r = self.value.sqrt();
        self.chain(r, 0.5 / r)
    }
}

impl Dual2 {
    /// Seeds the `u` parameter: derivative `(1, 0)`.
    #[inline]
    pub fn u(value: f32) -> Self {
        Self::new(value, Vec2::X)
    }

    /// Seeds the `v` parameter: derivative `(0, 1)`.
    #[inline]
    pub fn v(value: f32) -> Self {
        Self::new(value, Vec2::Y)
    }
}

impl Dual1 {
    /// The independent variable itself: derivative `1`.
    #[inline]
    pub fn variable(value: f32) -> Self {
        Self::new(value, 1.0)
    }
}

impl<T: Tangent> From<f32> for Dual<T> {
    #[inline]
    fn from(value: f32) -> Self {
        Self::constant(value)
    }
}

// ── dual ⊕ dual ───────────────────────────────────────────────────────────

impl<T: Tangent> Add for Dual<T> {
    type Output = Self;
    #[inline]
    fn add(self, r: Self) -> Self {
        Self::new(self.value + r.value, self.deriv + r.deriv)
    }
}

impl<T: Tangent> Sub for Dual<T> {
    type Output = Self;
    #[inline]
    fn sub(self, r: Self) -> Self {
        Self::new(self.value - r.value, self.deriv - r.deriv)
    }
}

impl<T: Tangent> Mul for Dual<T> {
    type Output = Self;
    #[inline]
    fn mul(self, r: Self) -> Self {
        Self::new(self.value * r.value, self.deriv * r.value + r.deriv * self.value)
    }
}

impl<T: Tangent> Div for Dual<T> {
    type Output = Self;
    #[inline]
    fn div(self, r: Self) -> Self {
        let g2 = r.value * r.value;
        Self::new(
            self.value / r.value,
            (self.deriv * r.value - r.deriv * self.value) * (1.0 / g2),
        )
    }
}

impl<T: Tangent> Neg for Dual<T> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.value, -self.deriv)
    }
}

// ── dual ⊕ scalar ─────────────────────────────────────────────────────────

impl<T: Tangent> Add<f32> for Dual<T> {
    type Output = Self;
    #[inline]
    fn add(self, r: f32) -> Self {
        Self::new(self.value + r, self.deriv)
    }
}

impl<T: Tangent> Sub<f32> for Dual<T> {
    type Output = Self;
    #[inline]
    fn sub(self, r: f32) -> Self {
        Self::new(self.value - r, self.deriv)
    }
}

impl<T: Tangent> Mul<f32> for Dual<T> {
    type Output = Self;
    #[inline]
    fn mul(self, r: f32) -> Self {
        Self::new(self.value * r, self.deriv * r)
    }
}

impl<T: Tangent> Div<f32> for Dual<T> {
    type Output = Self;
    #[inline]
    fn div(self, r: f32) -> Self {
        Self::new(self.value / r, self.deriv * (1.0 / r))
    }
}

impl<T: Tangent> Add<Dual<T>> for f32 {
    type Output = Dual<T>;
    #[inline]
    fn add(self, r: Dual<T>) -> Dual<T> {
        r + self
    }
}

impl<T: Tangent> Sub<Dual<T>> for f32 {
    type Output = Dual<T>;
    #[inline]
    fn sub(self, r: Dual<T>) -> Dual<T> {
        Dual::new(self - r.value, -r.deriv)
    }
}

impl<T: Tangent> Mul<Dual<T>> for f32 {
    type Output = Dual<T>;
    #[inline]
    fn mul(self, r: Dual<T>) -> Dual<T> {
        r * self
    }
}

impl<T: Tangent> Div<Dual<T>> for f32 {
    type Output = Dual<T>;
    #[inline]
    fn div(self, r: Dual<T>) -> Dual<T> {
        Dual::constant(self) / r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn samples() -> impl Iterator<Item = f32> {
        (0..40).map(|i| -2.0 + i as f32 * 0.1 + 0.05)
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() <= EPS * (1.0 + b.abs())
    }

    // ── elementary functions ──────────────────────────────────────────────

    #[test]
    fn sin_cos_derivatives_match_analytic() {
        for x in samples() {
            let d = Dual1::variable(x);
            assert!(close(d.sin().deriv, x.cos()), "sin'({x})");
            assert!(close(d.cos().deriv, -x.sin()), "cos'({x})");
        }
    }

    #[test]
    fn tan_derivative_is_sec_squared() {
        for x in samples().filter(|x| x.abs() < 1.4) {
            let c = x.cos();
            assert!(close(Dual1::variable(x).tan().deriv, 1.0 / (c * c)), "tan'({x})");
        }
    }

    #[test]
    fn hyperbolic_derivatives_match_analytic() {
        for x in samples() {
            let d = Dual1::variable(x);
            assert!(close(d.sinh().deriv, x.cosh()));
            assert!(close(d.cosh().deriv, x.sinh()));
            let c = x.cosh();
            assert!(close(d.tanh().deriv, 1.0 / (c * c)));
        }
    }

    #[test]
    fn exp_log_pow_derivatives_match_analytic() {
        for x in samples().filter(|x| *x > 0.0) {
            let d = Dual1::variable(x);
            assert!(close(d.exp().deriv, x.exp()));
            assert!(close(d.log().deriv, 1.0 / x));
            assert!(close(d.powf(3.0).deriv, 3.0 * x * x));
            assert!(close(d.powf(0.5).deriv, 0.5 / x.sqrt()));
            assert!(close(d.sqrt().deriv, 0.5 / x.sqrt()));
        }
    }

    // ── operators ─────────────────────────────────────────────────────────

    #[test]
    fn product_and_quotient_rules() {
        let x = 0.7f32;
        let f = Dual1::variable(x).sin();
        let g = Dual1::variable(x).exp();

        let p = f * g;
        assert!(close(p.deriv, x.cos() * x.exp() + x.sin() * x.exp()));

        let q = f / g;
        let expected = (x.cos() * x.exp() - x.sin() * x.exp()) / (x.exp() * x.exp());
        assert!(close(q.deriv, expected));
    }

    #[test]
    fn scalar_operands_act_as_constants() {
        let x = Dual1::variable(2.0);
        assert_eq!((x * 3.0).deriv, 3.0);
        assert_eq!((3.0 * x).deriv, 3.0);
        assert_eq!((x + 5.0).deriv, 1.0);
        assert_eq!((5.0 - x).deriv, -1.0);
        assert_eq!((5.0 - x).value, 3.0);
        assert!(close((1.0 / x).deriv, -0.25));
        assert_eq!((-x).value, -2.0);
    }

    #[test]
    fn two_parameter_seeds_give_partial_derivatives() {
        let u = Dual2::u(0.3);
        let v = Dual2::v(1.1);
        let f = u * v.sin();
        assert!(close(f.deriv.x, 1.1f32.sin()));
        assert!(close(f.deriv.y, 0.3 * 1.1f32.cos()));
    }

    #[test]
    fn division_by_zero_is_not_guarded() {
        let q = Dual1::variable(1.0) / Dual1::constant(0.0);
        assert!(q.value.is_infinite());
        assert!(!q.deriv.is_finite());
    }
}
