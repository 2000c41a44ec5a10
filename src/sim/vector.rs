//! Vector helpers on top of `glam::Vec2`
//!
//! glam covers the arithmetic. The simulation additionally needs division that
//! treats a zero divisor as "no direction" and yields zero instead of inf/NaN.

use glam::Vec2;

use crate::{round_to, sign};

pub trait VecExt {
    /// Divide by a scalar; a zero divisor yields `Vec2::ZERO`
    fn safe_div(self, n: f32) -> Vec2;
    /// Component-wise divide; each zero component of `n` yields zero
    fn safe_div_vec(self, n: Vec2) -> Vec2;
    /// Per-component sign, e.g. (-500, 0) -> (-1, 0)
    fn identity(self) -> Vec2;
    /// Round each component to `decimals` places
    fn rounded(self, decimals: i32) -> Vec2;
    /// True when the vector rounds to zero at one decimal place
    fn is_negligible(self) -> bool;
}

impl VecExt for Vec2 {
    #[inline]
    fn safe_div(self, n: f32) -> Vec2 {
        if n == 0.0 { Vec2::ZERO } else { self / n }
    }

    #[inline]
    fn safe_div_vec(self, n: Vec2) -> Vec2 {
        Vec2::new(
            if n.x == 0.0 { 0.0 } else { self.x / n.x },
            if n.y == 0.0 { 0.0 } else { self.y / n.y },
        )
    }

    #[inline]
    fn identity(self) -> Vec2 {
        Vec2::new(sign(self.x), sign(self.y))
    }

    #[inline]
    fn rounded(self, decimals: i32) -> Vec2 {
        Vec2::new(round_to(self.x, decimals), round_to(self.y, decimals))
    }

    #[inline]
    fn is_negligible(self) -> bool {
        self.rounded(1) == Vec2::ZERO
    }
}
