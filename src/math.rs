use std::{fmt, ops::Index};

use elliptic_curve::{Field, Group};
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::compat::{public_of, CurveGroup};
use crate::participants::MemberId;
use crate::serde::{deserialize_points, serialize_points};

/// Represents a polynomial with coefficients in the scalar field of the curve.
///
/// This is secret material: it can't be cloned, and its coefficients are
/// wiped when it goes out of scope.
pub struct Polynomial<C: CurveGroup> {
    /// The coefficients of our polynomial, from 0..size-1.
    coefficients: Vec<C::Scalar>,
}

impl<C: CurveGroup> Polynomial<C> {
    /// Generate a random polynomial with a certain number of coefficients.
    pub fn random(rng: &mut impl CryptoRngCore, size: usize) -> Self {
        let coefficients = (0..size).map(|_| C::Scalar::random(&mut *rng)).collect();
        Self { coefficients }
    }

    /// Extend a constant to a random polynomial of a certain size.
    ///
    /// This is useful if you want the polynomial to have a certain value, but
    /// otherwise be random.
    pub fn extend_random(rng: &mut impl CryptoRngCore, size: usize, constant: &C::Scalar) -> Self {
        let mut coefficients = Vec::with_capacity(size);
        coefficients.push(*constant);
        for _ in 1..size {
            coefficients.push(C::Scalar::random(&mut *rng));
        }
        Self { coefficients }
    }

    /// A random polynomial whose constant term is zero.
    pub fn zero_constant(rng: &mut impl CryptoRngCore, size: usize) -> Self {
        Self::extend_random(rng, size, &C::Scalar::ZERO)
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Evaluate this polynomial at 0.
    ///
    /// This is much more efficient than evaluating at other points.
    pub fn evaluate_zero(&self) -> C::Scalar {
        self.coefficients.first().copied().unwrap_or(C::Scalar::ZERO)
    }

    /// Evaluate this polynomial at a specific point, using Horner's method.
    pub fn evaluate(&self, x: &C::Scalar) -> C::Scalar {
        let mut out = C::Scalar::ZERO;
        for c in self.coefficients.iter().rev() {
            out = out * x + c;
        }
        out
    }

    /// Evaluate this polynomial at a member's id.
    pub fn evaluate_at(&self, id: &MemberId<C>) -> C::Scalar {
        self.evaluate(id.scalar())
    }

    /// Commit to this polynomial by acting on the generator.
    pub fn commit(&self) -> VerificationVector<C> {
        let points = self.coefficients.iter().map(public_of::<C>).collect();
        VerificationVector { points }
    }
}

impl<C: CurveGroup> Drop for Polynomial<C> {
    fn drop(&mut self) {
        self.coefficients.zeroize();
    }
}

impl<C: CurveGroup> fmt::Debug for Polynomial<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Polynomial")
            .field("len", &self.coefficients.len())
            .finish_non_exhaustive()
    }
}

impl<C: CurveGroup> Index<usize> for Polynomial<C> {
    type Output = C::Scalar;

    fn index(&self, i: usize) -> &Self::Output {
        &self.coefficients[i]
    }
}

/// The public commitment to a polynomial, one point per coefficient.
///
/// This is a polynomial with coefficients in the group, so the same
/// evaluation rules apply. Entry 0 commits to the constant term, which
/// for an aggregated vector is the group public key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct VerificationVector<C: CurveGroup> {
    #[serde(
        serialize_with = "serialize_points::<C, _>",
        deserialize_with = "deserialize_points::<C, _>"
    )]
    points: Vec<C::Point>,
}

impl<C: CurveGroup> VerificationVector<C> {
    /// Build a vector directly from its commitments.
    pub fn from_points(points: Vec<C::Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn as_slice(&self) -> &[C::Point] {
        &self.points
    }

    /// The commitment to the constant term.
    ///
    /// For a group verification vector, this is the group public key.
    pub fn public_key(&self) -> C::Point {
        self.evaluate_zero()
    }

    /// Evaluate this polynomial at 0.
    pub fn evaluate_zero(&self) -> C::Point {
        self.points.first().copied().unwrap_or(C::Point::identity())
    }

    /// Evaluate this polynomial at a specific point.
    pub fn evaluate(&self, x: &C::Scalar) -> C::Point {
        let mut out = C::Point::identity();
        for c in self.points.iter().rev() {
            out = out * *x + c;
        }
        out
    }

    /// The public key of a member's share, computed from public data alone.
    pub fn public_key_share(&self, id: &MemberId<C>) -> C::Point {
        self.evaluate(id.scalar())
    }

    /// Add another vector into this one, pointwise.
    ///
    /// The caller is responsible for the lengths matching.
    pub(crate) fn add_assign_unchecked(&mut self, other: &Self) {
        for (p, q) in self.points.iter_mut().zip(other.points.iter()) {
            *p += q;
        }
    }
}

impl<C: CurveGroup> PartialEq for VerificationVector<C> {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

impl<C: CurveGroup> Eq for VerificationVector<C> {}

impl<C: CurveGroup> Index<usize> for VerificationVector<C> {
    type Output = C::Point;

    fn index(&self, i: usize) -> &Self::Output {
        &self.points[i]
    }
}
