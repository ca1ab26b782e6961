//! Generation of one member's contribution to a round.
//!
//! Each member draws a secret polynomial `f` of degree `threshold - 1`,
//! publishes the commitment to its coefficients, and hands every recipient
//! the evaluation `f(id)`. Summing the contributions of all members gives
//! shares of a polynomial nobody knows, whose constant term is the group secret.
use std::{
    fmt,
    ops::{Add, Mul},
};

use rand_core::CryptoRngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::compat::{public_of, CurveGroup};
use crate::error::DkgError;
use crate::math::{Polynomial, VerificationVector};
use crate::participants::{MemberId, MemberList};
use crate::serde::{deserialize_scalar, serialize_scalar};

/// A secret share: some polynomial evaluated at one member's id.
///
/// This may be a single contribution share, or the aggregated share a member
/// keeps for the group. The value is wiped on drop and never printed.
pub struct SecretShare<C: CurveGroup>(C::Scalar);

impl<C: CurveGroup> SecretShare<C> {
    pub fn from_scalar(x: C::Scalar) -> Self {
        Self(x)
    }

    /// Access the underlying scalar.
    pub fn scalar(&self) -> &C::Scalar {
        &self.0
    }

    /// The public key corresponding to this share.
    pub fn public_key(&self) -> C::Point {
        public_of::<C>(&self.0)
    }
}

impl<C: CurveGroup> Clone for SecretShare<C> {
    fn clone(&self) -> Self {
        Self(self.0)
    }
}

impl<C: CurveGroup> Drop for SecretShare<C> {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl<C: CurveGroup> fmt::Debug for SecretShare<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretShare(..)")
    }
}

impl<C: CurveGroup> PartialEq for SecretShare<C> {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl<C: CurveGroup> Eq for SecretShare<C> {}

impl<'a, C: CurveGroup> Add<&'a SecretShare<C>> for SecretShare<C> {
    type Output = SecretShare<C>;

    fn add(self, rhs: &'a SecretShare<C>) -> Self::Output {
        SecretShare(self.0 + rhs.0)
    }
}

impl<C: CurveGroup> Add for SecretShare<C> {
    type Output = SecretShare<C>;

    fn add(self, rhs: SecretShare<C>) -> Self::Output {
        self + &rhs
    }
}

impl<C: CurveGroup> Mul<C::Scalar> for SecretShare<C> {
    type Output = SecretShare<C>;

    fn mul(self, rhs: C::Scalar) -> Self::Output {
        SecretShare(self.0 * rhs)
    }
}

impl<C: CurveGroup> Serialize for SecretShare<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_scalar::<C, S>(&self.0, serializer)
    }
}

impl<'de, C: CurveGroup> Deserialize<'de> for SecretShare<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_scalar::<C, D>(deserializer).map(Self)
    }
}

/// The output of one member's generation step.
///
/// The verification vector is published, and each share is sent privately
/// to the member it is addressed to.
#[derive(Debug, Clone)]
pub struct Contribution<C: CurveGroup> {
    pub verification_vector: VerificationVector<C>,
    shares: Vec<(MemberId<C>, SecretShare<C>)>,
}

impl<C: CurveGroup> Contribution<C> {
    /// The share addressed to a given member, if any.
    pub fn share_for(&self, id: &MemberId<C>) -> Option<&SecretShare<C>> {
        self.shares.iter().find(|(x, _)| x == id).map(|(_, s)| s)
    }

    /// Remove the share addressed to a given member.
    ///
    /// This is how a member keeps its own share without it ever being sent.
    pub fn take_share(&mut self, id: &MemberId<C>) -> Option<SecretShare<C>> {
        let i = self.shares.iter().position(|(x, _)| x == id)?;
        Some(self.shares.remove(i).1)
    }

    /// Iterate over the shares, in recipient order.
    pub fn shares(&self) -> impl Iterator<Item = (&MemberId<C>, &SecretShare<C>)> + '_ {
        self.shares.iter().map(|(id, s)| (id, s))
    }

    pub fn threshold(&self) -> usize {
        self.verification_vector.len()
    }
}

fn check_threshold<C: CurveGroup>(
    recipients: &MemberList<C>,
    threshold: usize,
) -> Result<(), DkgError> {
    if threshold == 0 {
        return Err(DkgError::BadParameters(
            "threshold must be at least 1".to_string(),
        ));
    }
    if threshold > recipients.len() {
        return Err(DkgError::BadParameters(format!(
            "threshold {threshold} exceeds recipient count {}",
            recipients.len()
        )));
    }
    Ok(())
}

fn share_out<C: CurveGroup>(f: Polynomial<C>, recipients: &MemberList<C>) -> Contribution<C> {
    let verification_vector = f.commit();
    let shares = recipients
        .iter()
        .map(|id| (*id, SecretShare(f.evaluate_at(id))))
        .collect();
    // Dropping `f` here wipes the coefficients, only shares and commitments remain.
    drop(f);
    Contribution {
        verification_vector,
        shares,
    }
}

/// Generate a member's contribution to a key generation round.
///
/// This draws a fresh random polynomial with `threshold` coefficients,
/// whose constant term is this member's part of the group secret.
pub fn generate_contribution<C: CurveGroup>(
    rng: &mut impl CryptoRngCore,
    recipients: &MemberList<C>,
    threshold: usize,
) -> Result<Contribution<C>, DkgError> {
    check_threshold(recipients, threshold)?;
    let f = Polynomial::<C>::random(rng, threshold);
    Ok(share_out(f, recipients))
}

/// Generate a contribution whose secret is zero, for renewing shares.
///
/// Adding this to existing shares re-randomizes them without
/// changing the secret they interpolate to.
pub fn generate_zero_contribution<C: CurveGroup>(
    rng: &mut impl CryptoRngCore,
    recipients: &MemberList<C>,
    threshold: usize,
) -> Result<Contribution<C>, DkgError> {
    check_threshold(recipients, threshold)?;
    let f = Polynomial::<C>::zero_constant(rng, threshold);
    Ok(share_out(f, recipients))
}
