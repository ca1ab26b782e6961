//! Lagrange interpolation at zero, over anything shares can be made of.
//!
//! The same routine recovers a secret from secret shares, a public key from
//! public key shares, and a group signature from signature shares.
use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

use crate::compat::CurveGroup;
use crate::contribution::SecretShare;
use crate::error::DkgError;
use crate::participants::{MemberId, MemberList};

/// A value tagged with the id of the member it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(serialize = "V: Serialize", deserialize = "V: Deserialize<'de>"))]
pub struct LabeledShare<C: CurveGroup, V> {
    pub id: MemberId<C>,
    pub value: V,
}

impl<C: CurveGroup, V> LabeledShare<C, V> {
    pub fn new(id: MemberId<C>, value: V) -> Self {
        Self { id, value }
    }
}

/// Interpolate labeled values at zero.
///
/// Only the first `threshold` values are used, any extra are ignored.
/// Which subset of the group provides them makes no difference to the result.
pub fn recover<C, V>(labeled: &[LabeledShare<C, V>], threshold: usize) -> Result<V, DkgError>
where
    C: CurveGroup,
    V: Clone + Add<Output = V> + Mul<C::Scalar, Output = V>,
{
    if threshold == 0 {
        return Err(DkgError::BadParameters(
            "threshold must be at least 1".to_string(),
        ));
    }
    if labeled.len() < threshold {
        return Err(DkgError::InsufficientShares {
            required: threshold,
            got: labeled.len(),
        });
    }
    let used = &labeled[..threshold];
    let ids: Vec<_> = used.iter().map(|s| s.id).collect();
    let list = MemberList::new(&ids)?;
    let lambdas = list.lagrange_coefficients()?;

    let mut terms = used
        .iter()
        .zip(lambdas)
        .map(|(s, lambda)| s.value.clone() * lambda);
    let first = terms.next().ok_or(DkgError::UndefinedAggregate)?;
    Ok(terms.fold(first, |acc, term| acc + term))
}

/// Recover the group secret from secret shares.
pub fn recover_secret<C: CurveGroup>(
    labeled: &[LabeledShare<C, SecretShare<C>>],
    threshold: usize,
) -> Result<SecretShare<C>, DkgError> {
    recover(labeled, threshold)
}

/// Recover the group public key from public key shares.
pub fn recover_public_key<C: CurveGroup>(
    labeled: &[LabeledShare<C, C::Point>],
    threshold: usize,
) -> Result<C::Point, DkgError> {
    recover(labeled, threshold)
}

#[cfg(test)]
mod test {
    use elliptic_curve::Field;
    use k256::{ProjectivePoint, Scalar, Secp256k1};
    use rand_core::OsRng;

    use super::*;
    use crate::math::Polynomial;

    fn labeled_secret_shares(
        f: &Polynomial<Secp256k1>,
        indices: &[u32],
    ) -> Vec<LabeledShare<Secp256k1, SecretShare<Secp256k1>>> {
        indices
            .iter()
            .map(|&i| {
                let id = MemberId::from_index(i);
                LabeledShare::new(id, SecretShare::from_scalar(f.evaluate_at(&id)))
            })
            .collect()
    }

    #[test]
    fn test_any_subset_recovers_the_secret() -> Result<(), DkgError> {
        let f = Polynomial::<Secp256k1>::random(&mut OsRng, 4);
        let secret = f.evaluate_zero();

        for subset in [[0, 1, 2, 3], [3, 4, 5, 6], [6, 1, 4, 2]] {
            let shares = labeled_secret_shares(&f, &subset);
            assert_eq!(*recover_secret(&shares, 4)?.scalar(), secret);
        }
        Ok(())
    }

    #[test]
    fn test_extra_shares_are_ignored() -> Result<(), DkgError> {
        let f = Polynomial::<Secp256k1>::random(&mut OsRng, 3);
        let mut shares = labeled_secret_shares(&f, &[0, 1, 2]);
        // Garbage past the threshold must not matter.
        shares.push(LabeledShare::new(
            MemberId::from_index(9),
            SecretShare::from_scalar(Scalar::random(&mut OsRng)),
        ));
        assert_eq!(*recover_secret(&shares, 3)?.scalar(), f.evaluate_zero());
        Ok(())
    }

    #[test]
    fn test_public_key_recovery() -> Result<(), DkgError> {
        let f = Polynomial::<Secp256k1>::random(&mut OsRng, 3);
        let vvec = f.commit();
        let shares: Vec<_> = [2u32, 5, 7]
            .into_iter()
            .map(|i| {
                let id = MemberId::from_index(i);
                LabeledShare::new(id, vvec.public_key_share(&id))
            })
            .collect();
        assert_eq!(recover_public_key(&shares, 3)?, vvec.public_key());
        assert_eq!(
            vvec.public_key(),
            ProjectivePoint::GENERATOR * f.evaluate_zero()
        );
        Ok(())
    }

    #[test]
    fn test_too_few_shares() {
        let f = Polynomial::<Secp256k1>::random(&mut OsRng, 4);
        let shares = labeled_secret_shares(&f, &[0, 1, 2]);
        assert_eq!(
            recover_secret(&shares, 4),
            Err(DkgError::InsufficientShares {
                required: 4,
                got: 3
            })
        );
    }

    #[test]
    fn test_duplicate_ids() {
        let f = Polynomial::<Secp256k1>::random(&mut OsRng, 3);
        let shares = labeled_secret_shares(&f, &[0, 1, 1]);
        assert!(matches!(
            recover_secret(&shares, 3),
            Err(DkgError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_zero_threshold() {
        let f = Polynomial::<Secp256k1>::random(&mut OsRng, 3);
        let shares = labeled_secret_shares(&f, &[0, 1, 2]);
        assert!(matches!(
            recover_secret(&shares, 0),
            Err(DkgError::BadParameters(_))
        ));
    }
}
