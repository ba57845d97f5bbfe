//! Fixed-point interval arithmetic over big integers
//!
//! A [`Bracket`] encloses a real number `x` as `lo ≤ x·2^bits ≤ hi`. Every
//! operation widens the enclosure just enough to stay rigorous, so a
//! decision taken from a bracket (a floor, a ceiling, a comparison) is as
//! trustworthy as one taken from an exact rational. Only the fast-path
//! counter and the pi digit oracle use this module.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::ops::{Add, Neg, Sub};

/// Enclosure `lo ≤ x·2^bits ≤ hi` of a real number `x`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bracket {
    lo: BigInt,
    hi: BigInt,
    bits: u32,
}

impl Bracket {
    pub fn zero(bits: u32) -> Self {
        Self {
            lo: BigInt::zero(),
            hi: BigInt::zero(),
            bits,
        }
    }

    pub fn from_integer(value: &BigInt, bits: u32) -> Self {
        let scaled = value << bits;
        Self {
            lo: scaled.clone(),
            hi: scaled,
            bits,
        }
    }

    pub fn lo(&self) -> &BigInt {
        &self.lo
    }

    pub fn hi(&self) -> &BigInt {
        &self.hi
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Width of the enclosure in units of `2^-bits`
    pub fn width(&self) -> BigInt {
        &self.hi - &self.lo
    }

    /// Multiply by a non-negative integer
    pub fn scale(&self, factor: u32) -> Self {
        Self {
            lo: &self.lo * factor,
            hi: &self.hi * factor,
            bits: self.bits,
        }
    }

    pub fn half(&self) -> Self {
        let two = BigInt::from(2);
        Self {
            lo: self.lo.div_floor(&two),
            hi: self.hi.div_ceil(&two),
            bits: self.bits,
        }
    }

    /// `floor(x·multiplier)` when the enclosure pins it down
    pub fn floor_scaled(&self, multiplier: &BigInt) -> Option<BigInt> {
        let unit = BigInt::one() << self.bits;
        let lo = (&self.lo * multiplier).div_floor(&unit);
        let hi = (&self.hi * multiplier).div_floor(&unit);
        (lo == hi).then_some(lo)
    }
}

impl Add for &Bracket {
    type Output = Bracket;

    fn add(self, other: &Bracket) -> Bracket {
        debug_assert_eq!(self.bits, other.bits);
        Bracket {
            lo: &self.lo + &other.lo,
            hi: &self.hi + &other.hi,
            bits: self.bits,
        }
    }
}

impl Sub for &Bracket {
    type Output = Bracket;

    fn sub(self, other: &Bracket) -> Bracket {
        debug_assert_eq!(self.bits, other.bits);
        Bracket {
            lo: &self.lo - &other.hi,
            hi: &self.hi - &other.lo,
            bits: self.bits,
        }
    }
}

impl Neg for &Bracket {
    type Output = Bracket;

    fn neg(self) -> Bracket {
        Bracket {
            lo: -&self.hi,
            hi: -&self.lo,
            bits: self.bits,
        }
    }
}

/// `arctan(p / q)` for `0 ≤ p ≤ q`, `q > 0`.
///
/// Euler's series
/// `arctan x = Σ 2^2n (n!)² / (2n+1)! · x^(2n+1) / (1+x²)^(n+1)`
/// has term ratio `2n/(2n+1) · p²/(p²+q²) ≤ 1/2` here, so it gains at
/// least one bit per term. Each truncated term sits below its true value
/// by less than `index + 1` units and the dropped tail is below twice the
/// first dropped term.
pub fn arctan_ratio(p: &BigInt, q: &BigInt, bits: u32) -> Bracket {
    debug_assert!(!p.is_negative() && q.is_positive() && p <= q);
    if p.is_zero() {
        return Bracket::zero(bits);
    }

    let p2 = p * p;
    let norm = &p2 + q * q;
    let mut term = ((p * q) << bits) / &norm;
    let mut sum = BigInt::zero();
    let mut n: u64 = 0;
    while !term.is_zero() {
        sum += &term;
        n += 1;
        term = term * BigInt::from(2 * n) * &p2 / (BigInt::from(2 * n + 1) * &norm);
    }

    let slack = BigInt::from((n + 1) * (n + 2) / 2 + n + 2);
    Bracket {
        hi: &sum + slack,
        lo: sum,
        bits,
    }
}

/// Machin's formula `π = 16·arctan(1/5) − 4·arctan(1/239)`
pub fn pi(bits: u32) -> Bracket {
    let one = BigInt::one();
    let a = arctan_ratio(&one, &BigInt::from(5), bits);
    let b = arctan_ratio(&one, &BigInt::from(239), bits);
    &a.scale(16) - &b.scale(4)
}

/// Angle arithmetic at a fixed precision, with pi computed once
#[derive(Debug, Clone)]
pub struct Angles {
    bits: u32,
    pi: Bracket,
}

impl Angles {
    pub fn new(bits: u32) -> Self {
        Self {
            bits,
            pi: pi(bits),
        }
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn pi(&self) -> &Bracket {
        &self.pi
    }

    pub fn arctan(&self, p: &BigInt, q: &BigInt) -> Bracket {
        arctan_ratio(p, q, self.bits)
    }

    /// Counter-clockwise angle of the direction `(x, y)` in `[0, 2π)`.
    /// The direction must not be the zero vector.
    pub fn direction(&self, x: &BigInt, y: &BigInt) -> Bracket {
        debug_assert!(!(x.is_zero() && y.is_zero()));
        if y.is_negative() {
            let upper = self.upper_direction(x, &-y);
            &self.pi.scale(2) - &upper
        } else {
            self.upper_direction(x, y)
        }
    }

    /// Angle in `[0, π]` of a direction with `y ≥ 0`
    fn upper_direction(&self, x: &BigInt, y: &BigInt) -> Bracket {
        if y.is_zero() {
            return if x.is_positive() {
                Bracket::zero(self.bits)
            } else {
                self.pi.clone()
            };
        }

        let ax = x.abs();
        if y <= &ax {
            let base = self.arctan(y, &ax);
            if x.is_positive() {
                base
            } else {
                &self.pi - &base
            }
        } else {
            let base = self.arctan(&ax, y);
            let right = self.pi.half();
            if x.is_negative() {
                &right + &base
            } else {
                &right - &base
            }
        }
    }

    /// Counter-clockwise angle from direction `a` to direction `b`, in `[0, 2π)`
    pub fn ccw_between(&self, a: &(BigInt, BigInt), b: &(BigInt, BigInt)) -> Bracket {
        let cross = &a.0 * &b.1 - &a.1 * &b.0;
        let dot = &a.0 * &b.0 + &a.1 * &b.1;
        self.direction(&dot, &cross)
    }
}
