//! Threshold BLS signatures over the output of key generation.
//!
//! A member signs by hashing the message onto the signature group and
//! multiplying by its share. Since this is linear in the share, any
//! `threshold` signature shares interpolate to the signature of the group
//! secret, which verifies against the group public key.
use elliptic_curve::group::GroupEncoding;

use crate::compat::PairingCurve;
use crate::contribution::SecretShare;
use crate::error::DkgError;
use crate::math::VerificationVector;
use crate::participants::MemberId;
use crate::recover::{recover, LabeledShare};

/// Sign a message with a secret share.
///
/// With the group secret, this is a plain BLS signature. With a member's
/// share, this is that member's signature share.
pub fn sign<C: PairingCurve>(share: &SecretShare<C>, msg: &[u8]) -> C::Signature {
    C::hash_to_signature_group(msg) * *share.scalar()
}

/// Verify a signature against a public key.
#[must_use]
pub fn verify<C: PairingCurve>(
    public_key: &C::Point,
    msg: &[u8],
    signature: &C::Signature,
) -> bool {
    C::verify(public_key, msg, signature)
}

/// Verify one member's signature share.
///
/// The public key of the member's share is derived from the group
/// verification vector, so no extra key material needs to be exchanged.
#[must_use]
pub fn verify_share<C: PairingCurve>(
    group_vector: &VerificationVector<C>,
    id: &MemberId<C>,
    msg: &[u8],
    signature_share: &C::Signature,
) -> bool {
    if group_vector.is_empty() {
        return false;
    }
    C::verify(&group_vector.public_key_share(id), msg, signature_share)
}

/// Combine signature shares into the group signature.
///
/// Exactly like other recoveries, only the first `threshold` shares are used,
/// and the result doesn't depend on which members provided them.
/// Shares aren't checked here, use [verify_share] on anything untrusted.
pub fn combine_signatures<C: PairingCurve>(
    labeled: &[LabeledShare<C, C::Signature>],
    threshold: usize,
) -> Result<C::Signature, DkgError> {
    recover(labeled, threshold)
}

/// The canonical encoding of a signature.
pub fn signature_to_bytes<C: PairingCurve>(signature: &C::Signature) -> Vec<u8> {
    signature.to_bytes().as_ref().to_vec()
}

/// Decode a signature, rejecting anything not in the signature group.
pub fn signature_from_bytes<C: PairingCurve>(bytes: &[u8]) -> Result<C::Signature, DkgError> {
    let mut repr = <C::Signature as GroupEncoding>::Repr::default();
    if repr.as_ref().len() != bytes.len() {
        return Err(DkgError::CapabilityFailure(format!(
            "signature must be {} bytes, found {}",
            repr.as_ref().len(),
            bytes.len()
        )));
    }
    repr.as_mut().copy_from_slice(bytes);
    Option::from(C::Signature::from_bytes(&repr))
        .ok_or_else(|| DkgError::CapabilityFailure("invalid signature encoding".to_string()))
}

#[cfg(test)]
mod test {
    use rand_core::OsRng;

    use super::*;
    use crate::compat::Bls12;
    use crate::math::Polynomial;

    const MSG: &[u8] = b"hello world";

    fn deal(
        n: u32,
        t: usize,
    ) -> (
        VerificationVector<Bls12>,
        Vec<(MemberId<Bls12>, SecretShare<Bls12>)>,
    ) {
        let f = Polynomial::<Bls12>::random(&mut OsRng, t);
        let shares = (0..n)
            .map(|i| {
                let id = MemberId::from_index(i);
                (id, SecretShare::from_scalar(f.evaluate_at(&id)))
            })
            .collect();
        (f.commit(), shares)
    }

    #[test]
    fn test_threshold_signature() -> Result<(), DkgError> {
        let (vvec, shares) = deal(5, 3);
        let labeled: Vec<_> = shares
            .iter()
            .map(|(id, share)| LabeledShare::new(*id, sign(share, MSG)))
            .collect();

        for s in &labeled {
            assert!(verify_share(&vvec, &s.id, MSG, &s.value));
        }

        let signature = combine_signatures(&labeled, 3)?;
        assert!(verify::<Bls12>(&vvec.public_key(), MSG, &signature));
        assert!(!verify::<Bls12>(&vvec.public_key(), b"goodbye world", &signature));

        let other = combine_signatures(&labeled[2..], 3)?;
        assert_eq!(signature, other);
        Ok(())
    }

    #[test]
    fn test_bad_signature_share_is_detected() {
        let (vvec, shares) = deal(4, 2);
        let (id0, share0) = &shares[0];
        let (id1, _) = &shares[1];
        let sig = sign(share0, MSG);

        assert!(verify_share(&vvec, id0, MSG, &sig));
        assert!(!verify_share(&vvec, id1, MSG, &sig));
        assert!(!verify_share(&vvec, id0, b"something else", &sig));
        assert!(!verify_share(
            &VerificationVector::from_points(vec![]),
            id0,
            MSG,
            &sig
        ));
    }

    #[test]
    fn test_too_few_signature_shares() {
        let (_, shares) = deal(4, 3);
        let labeled: Vec<_> = shares[..2]
            .iter()
            .map(|(id, share)| LabeledShare::new(*id, sign(share, MSG)))
            .collect();
        assert_eq!(
            combine_signatures(&labeled, 3),
            Err(DkgError::InsufficientShares {
                required: 3,
                got: 2
            })
        );
    }

    #[test]
    fn test_signature_encoding() -> Result<(), DkgError> {
        let (_, shares) = deal(2, 2);
        let sig = sign(&shares[0].1, MSG);
        let bytes = signature_to_bytes::<Bls12>(&sig);
        assert_eq!(bytes.len(), 48);
        assert_eq!(signature_from_bytes::<Bls12>(&bytes)?, sig);

        assert!(matches!(
            signature_from_bytes::<Bls12>(&bytes[1..]),
            Err(DkgError::CapabilityFailure(_))
        ));
        let mut garbage = bytes.clone();
        garbage[47] ^= 0xff;
        garbage[0] ^= 0x01;
        assert!(matches!(
            signature_from_bytes::<Bls12>(&garbage),
            Err(DkgError::CapabilityFailure(_))
        ));
        Ok(())
    }
}
