//! Operator overloads that build combinator nodes
//!
//! Applying an operator to a `Chance` never computes anything: it wraps the
//! operands in a new binary (or unary) node, to be evaluated at resolution
//! time. Each binary operator accepts either another `Chance<T>` or a plain
//! `T` on the right-hand side.

use super::Chance;
use std::ops::{Add, Div, Mul, Neg, Not, Sub};

/// Division that rounds the quotient toward negative infinity
///
/// For floats this is `(a / b).floor()`; for integers the quotient is
/// adjusted when the remainder and divisor disagree in sign, so
/// `(-7).floor_div(2) == -4` rather than the `-3` plain `/` would give.
pub trait FloorDiv<Rhs = Self> {
    type Output;

    fn floor_div(self, rhs: Rhs) -> Self::Output;
}

impl FloorDiv for f64 {
    type Output = f64;

    fn floor_div(self, rhs: f64) -> f64 {
        (self / rhs).floor()
    }
}

impl FloorDiv for i64 {
    type Output = i64;

    fn floor_div(self, rhs: i64) -> i64 {
        let quotient = self / rhs;
        let remainder = self % rhs;
        if remainder != 0 && (remainder < 0) != (rhs < 0) {
            quotient - 1
        } else {
            quotient
        }
    }
}

impl FloorDiv for i32 {
    type Output = i32;

    fn floor_div(self, rhs: i32) -> i32 {
        let quotient = self / rhs;
        let remainder = self % rhs;
        if remainder != 0 && (remainder < 0) != (rhs < 0) {
            quotient - 1
        } else {
            quotient
        }
    }
}

impl<T> Add<Chance<T>> for Chance<T>
where
    T: Add<Output = T> + 'static,
{
    type Output = Chance<T>;

    fn add(self, rhs: Chance<T>) -> Chance<T> {
        Chance::binary("add", |a, b| a + b, self, rhs)
    }
}

impl<T> Add<T> for Chance<T>
where
    T: Add<Output = T> + 'static,
{
    type Output = Chance<T>;

    fn add(self, rhs: T) -> Chance<T> {
        Chance::binary("add", |a, b| a + b, self, rhs)
    }
}

impl<T> Sub<Chance<T>> for Chance<T>
where
    T: Sub<Output = T> + 'static,
{
    type Output = Chance<T>;

    fn sub(self, rhs: Chance<T>) -> Chance<T> {
        Chance::binary("sub", |a, b| a - b, self, rhs)
    }
}

impl<T> Sub<T> for Chance<T>
where
    T: Sub<Output = T> + 'static,
{
    type Output = Chance<T>;

    fn sub(self, rhs: T) -> Chance<T> {
        Chance::binary("sub", |a, b| a - b, self, rhs)
    }
}

impl<T> Mul<Chance<T>> for Chance<T>
where
    T: Mul<Output = T> + 'static,
{
    type Output = Chance<T>;

    fn mul(self, rhs: Chance<T>) -> Chance<T> {
        Chance::binary("mul", |a, b| a * b, self, rhs)
    }
}

impl<T> Mul<T> for Chance<T>
where
    T: Mul<Output = T> + 'static,
{
    type Output = Chance<T>;

    fn mul(self, rhs: T) -> Chance<T> {
        Chance::binary("mul", |a, b| a * b, self, rhs)
    }
}

impl<T> Div<Chance<T>> for Chance<T>
where
    T: Div<Output = T> + 'static,
{
    type Output = Chance<T>;

    fn div(self, rhs: Chance<T>) -> Chance<T> {
        Chance::binary("div", |a, b| a / b, self, rhs)
    }
}

impl<T> Div<T> for Chance<T>
where
    T: Div<Output = T> + 'static,
{
    type Output = Chance<T>;

    fn div(self, rhs: T) -> Chance<T> {
        Chance::binary("div", |a, b| a / b, self, rhs)
    }
}

impl<T> FloorDiv<Chance<T>> for Chance<T>
where
    T: FloorDiv<Output = T> + 'static,
{
    type Output = Chance<T>;

    fn floor_div(self, rhs: Chance<T>) -> Chance<T> {
        Chance::binary("floor_div", |a: T, b: T| a.floor_div(b), self, rhs)
    }
}

impl<T> FloorDiv<T> for Chance<T>
where
    T: FloorDiv<Output = T> + 'static,
{
    type Output = Chance<T>;

    fn floor_div(self, rhs: T) -> Chance<T> {
        Chance::binary("floor_div", |a: T, b: T| a.floor_div(b), self, rhs)
    }
}

impl<T> Neg for Chance<T>
where
    T: Neg<Output = T> + 'static,
{
    type Output = Chance<T>;

    fn neg(self) -> Chance<T> {
        Chance::unary("neg", |value: T| -value, self)
    }
}

impl<T> Not for Chance<T>
where
    T: Not<Output = T> + 'static,
{
    type Output = Chance<T>;

    fn not(self) -> Chance<T> {
        Chance::unary("not", |value: T| !value, self)
    }
}
