//! Size-driven bounds scaling for numeric generators.

use crate::data::Size;
use std::fmt::{Debug, Display};

/// Integer types that can be generated and scaled.
///
/// All scaling arithmetic happens in `i128`, which holds every value of every
/// implementing type, so extreme bounds never overflow.
pub trait Integral: Copy + Ord + Debug + Display + 'static {
    const MIN: Self;
    const MAX: Self;

    /// Widen into `i128`.
    fn to_wide(self) -> i128;

    /// Narrow from `i128`, if the value is representable.
    fn from_wide(value: i128) -> Option<Self>;
}

macro_rules! impl_integral {
    ($($t:ty),*) => {
        $(
            impl Integral for $t {
                const MIN: Self = <$t>::MIN;
                const MAX: Self = <$t>::MAX;

                fn to_wide(self) -> i128 {
                    self as i128
                }

                fn from_wide(value: i128) -> Option<Self> {
                    <$t>::try_from(value).ok()
                }
            }
        )*
    };
}

impl_integral!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// How a numeric range responds to the size parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scaling {
    /// Always the full range, whatever the size.
    Unscaled,
    /// The range grows linearly from the origin with size.
    Linear,
    /// The range grows exponentially from the origin, in discrete steps.
    Exponential,
}

impl Scaling {
    /// Scale `[min, max]` around `origin` for the given size.
    ///
    /// Requires `min <= origin <= max`. Size 0 yields `(origin, origin)` and
    /// size 100 yields `(min, max)` for every scaled variant.
    pub fn bounds(self, min: i128, max: i128, origin: i128, size: Size) -> (i128, i128) {
        match self {
            Scaling::Unscaled => (min, max),
            Scaling::Linear | Scaling::Exponential => {
                let below = origin.abs_diff(min);
                let above = max.abs_diff(origin);
                let lo = origin - self.width(below, size) as i128;
                let hi = origin + self.width(above, size) as i128;
                (lo.max(min), hi.min(max))
            }
        }
    }

    /// Build a scaling function for a fixed range, as `size -> (min, max)`.
    pub fn factory<N: Integral>(self, min: N, max: N, origin: N) -> impl Fn(Size) -> (N, N) {
        move |size| {
            let (lo, hi) = self.bounds(min.to_wide(), max.to_wide(), origin.to_wide(), size);
            (
                N::from_wide(lo).unwrap_or(min),
                N::from_wide(hi).unwrap_or(max),
            )
        }
    }

    /// Half-width of one side of the range at the given size.
    fn width(self, distance: u128, size: Size) -> u128 {
        let size = size.get() as u128;
        match self {
            Scaling::Unscaled => distance,
            // `distance` is below 2^65, so the product cannot overflow.
            Scaling::Linear => distance * size / 100,
            Scaling::Exponential => {
                let step = size / 10;
                if step == 0 {
                    0
                } else if step >= 10 {
                    distance
                } else {
                    let exponent = step as f64 / 10.0;
                    let scaled = ((distance as f64 + 1.0).powf(exponent) - 1.0).round();
                    (scaled.max(0.0) as u128).min(distance)
                }
            }
        }
    }
}

/// A numeric range with an origin to shrink towards and a scaling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range<N> {
    pub min: N,
    pub max: N,
    pub origin: N,
    pub scaling: Scaling,
}

impl<N: Integral> Range<N> {
    /// A range that ignores size.
    pub fn new(min: N, max: N) -> Self {
        Self::with_scaling(min, max, Scaling::Unscaled)
    }

    /// A range that grows linearly with size.
    pub fn linear(min: N, max: N) -> Self {
        Self::with_scaling(min, max, Scaling::Linear)
    }

    /// A range that grows exponentially with size.
    pub fn exponential(min: N, max: N) -> Self {
        Self::with_scaling(min, max, Scaling::Exponential)
    }

    /// A range covering the whole type, scaled exponentially.
    pub fn full() -> Self {
        Self::exponential(N::MIN, N::MAX)
    }

    fn with_scaling(min: N, max: N, scaling: Scaling) -> Self {
        Range {
            min,
            max,
            origin: default_origin(min, max),
            scaling,
        }
    }

    /// Shrink towards a different origin.
    pub fn with_origin(mut self, origin: N) -> Self {
        self.origin = origin;
        self
    }

    /// Check that `min <= origin <= max`.
    pub fn validate(&self) -> Result<(), String> {
        if self.min > self.max {
            return Err(format!(
                "minimum {} is greater than maximum {}",
                self.min, self.max
            ));
        }
        if self.origin < self.min || self.origin > self.max {
            return Err(format!(
                "origin {} is outside the range {}..={}",
                self.origin, self.min, self.max
            ));
        }
        Ok(())
    }

    /// The effective bounds at the given size.
    pub fn bounds(&self, size: Size) -> (N, N) {
        self.scaling
            .factory(self.min, self.max, self.origin)(size)
    }
}

/// Zero, clamped into `[min, max]`.
fn default_origin<N: Integral>(min: N, max: N) -> N {
    let zero = N::from_wide(0);
    match zero {
        Some(zero) if zero < min => min,
        Some(zero) if zero > max => max,
        Some(zero) => zero,
        None => min,
    }
}
