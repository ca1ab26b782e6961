//! The Feldman check of a received share.
use subtle::ConstantTimeEq;

use crate::compat::CurveGroup;
use crate::contribution::SecretShare;
use crate::error::DkgError;
use crate::math::VerificationVector;
use crate::participants::MemberId;

/// Check a received share against its sender's verification vector.
///
/// This evaluates the committed polynomial at the recipient's id, using only
/// public data, and compares it with the public key of the share.
/// Equality proves the share is the sender's polynomial evaluated at that id,
/// without revealing the polynomial.
#[must_use]
pub fn verify_contribution_share<C: CurveGroup>(
    verification_vector: &VerificationVector<C>,
    recipient: &MemberId<C>,
    share: &SecretShare<C>,
) -> bool {
    if verification_vector.is_empty() {
        return false;
    }
    let from_vector = verification_vector.public_key_share(recipient);
    let from_share = share.public_key();
    from_vector.ct_eq(&from_share).into()
}

/// Like [verify_contribution_share], but reporting the sender on failure.
pub fn check_contribution_share<C: CurveGroup>(
    sender: &MemberId<C>,
    verification_vector: &VerificationVector<C>,
    recipient: &MemberId<C>,
    share: &SecretShare<C>,
) -> Result<(), DkgError> {
    if verify_contribution_share(verification_vector, recipient, share) {
        Ok(())
    } else {
        Err(DkgError::InvalidShare {
            sender: sender.fingerprint(),
        })
    }
}
