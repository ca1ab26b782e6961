//! Combining the contributions of every member into group values.
//!
//! Adding polynomials adds their evaluations and their commitments, so
//! summing the shares a member received, and summing every verification
//! vector, gives a consistent view of the group polynomial.
use crate::compat::CurveGroup;
use crate::contribution::SecretShare;
use crate::error::DkgError;
use crate::math::VerificationVector;

/// Sum the shares a member received into its group secret share.
///
/// The first share serves as the starting value, so an empty list has no sum.
pub fn add_contribution_shares<C: CurveGroup>(
    shares: &[SecretShare<C>],
) -> Result<SecretShare<C>, DkgError> {
    let (first, rest) = shares.split_first().ok_or(DkgError::UndefinedAggregate)?;
    Ok(rest.iter().fold(first.clone(), |acc, s| acc + s))
}

/// Sum verification vectors pointwise into the group verification vector.
///
/// Every vector must have the same length, i.e. come from the same threshold.
pub fn add_verification_vectors<C: CurveGroup>(
    vectors: &[VerificationVector<C>],
) -> Result<VerificationVector<C>, DkgError> {
    let (first, rest) = vectors.split_first().ok_or(DkgError::UndefinedAggregate)?;
    let mut out = first.clone();
    for v in rest {
        if v.len() != out.len() {
            return Err(DkgError::LengthMismatch {
                expected: out.len(),
                found: v.len(),
            });
        }
        out.add_assign_unchecked(v);
    }
    Ok(out)
}
