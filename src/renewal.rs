//! Proactive renewal of the shares of an existing group.
//!
//! Every member contributes a polynomial with a zero constant term. Adding
//! the resulting shares to the existing ones re-randomizes every share,
//! without changing the group secret, or the group public key. Shares from
//! before a renewal can't be combined with shares from after it.
use elliptic_curve::Group;
use rand_core::CryptoRngCore;
use tracing::{debug, info, warn};

use crate::aggregate::{add_contribution_shares, add_verification_vectors};
use crate::compat::CurveGroup;
use crate::contribution::{generate_zero_contribution, Contribution, SecretShare};
use crate::error::DkgError;
use crate::keyshare::KeygenOutput;
use crate::math::VerificationVector;
use crate::participants::{MemberId, MemberList};
use crate::round::Round;
use crate::verify::verify_contribution_share;

/// One member's state for a renewal round.
pub struct RenewalSession<C: CurveGroup> {
    previous: KeygenOutput<C>,
    round: Round<C>,
}

impl<C: CurveGroup> RenewalSession<C> {
    /// Start renewing the output of a previous key generation or renewal.
    ///
    /// The members and threshold stay the same as before.
    pub fn new(previous: KeygenOutput<C>, members: &[MemberId<C>]) -> Result<Self, DkgError> {
        C::init();
        let round = Round::new(members, previous.id, previous.threshold())?;
        debug!(
            member = %previous.id,
            members = members.len(),
            threshold = previous.threshold(),
            "starting renewal"
        );
        Ok(Self { previous, round })
    }

    pub fn me(&self) -> MemberId<C> {
        self.round.me()
    }

    pub fn members(&self) -> &MemberList<C> {
        self.round.members()
    }

    /// Generate this member's zero contribution.
    ///
    /// As with key generation, our own share stays in the session, and the
    /// rest is returned for delivery.
    pub fn contribute(
        &mut self,
        rng: &mut impl CryptoRngCore,
    ) -> Result<Contribution<C>, DkgError> {
        if self.round.has_contributed() {
            return Err(DkgError::DuplicateContribution(self.me().fingerprint()));
        }
        let mut contribution =
            generate_zero_contribution(rng, self.round.members(), self.round.threshold())?;
        self.round.keep_own(&mut contribution)?;
        debug!(member = %self.me(), "generated renewal contribution");
        Ok(contribution)
    }

    /// Receive another member's zero contribution.
    ///
    /// Besides the checks done during key generation, the vector must commit
    /// to a zero secret, otherwise the group key would change.
    pub fn receive(
        &mut self,
        from: &MemberId<C>,
        verification_vector: VerificationVector<C>,
        share: SecretShare<C>,
    ) -> Result<(), DkgError> {
        self.round.check_sender(from)?;
        self.round.check_length(&verification_vector)?;
        if !bool::from(verification_vector.public_key().is_identity()) {
            warn!(member = %self.me(), sender = %from, "renewal contribution is not zero");
            return Err(DkgError::NonZeroContribution {
                sender: from.fingerprint(),
            });
        }
        self.round.accept(from, verification_vector, share)?;
        debug!(
            member = %self.me(),
            sender = %from,
            missing = self.round.missing(),
            "accepted renewal contribution"
        );
        Ok(())
    }

    /// Exclude a member from this round.
    pub fn exclude(&mut self, member: &MemberId<C>) -> Result<(), DkgError> {
        self.round.exclude(member)
    }

    pub fn missing(&self) -> usize {
        self.round.missing()
    }

    /// Our share before renewal, which the zero shares get added onto.
    fn seed_share(&self) -> SecretShare<C> {
        self.previous.private_share.clone()
    }

    /// Produce our renewed output.
    pub fn finalize(&self) -> Result<KeygenOutput<C>, DkgError> {
        let (vectors, zero_shares) = self.round.collect()?;
        let me = self.me();

        let private_share = self.seed_share() + add_contribution_shares(&zero_shares)?;

        let mut all_vectors = Vec::with_capacity(vectors.len() + 1);
        all_vectors.push(self.previous.verification_vector.clone());
        all_vectors.extend(vectors);
        let verification_vector = add_verification_vectors(&all_vectors)?;

        if verification_vector.public_key() != self.previous.public_key() {
            return Err(DkgError::PublicKeyMismatch);
        }
        if !verify_contribution_share(&verification_vector, &me, &private_share) {
            return Err(DkgError::AssertionFailed(
                "renewed share does not match renewed verification vector".to_string(),
            ));
        }
        info!(
            member = %me,
            contributors = self.round.received_count(),
            "renewal complete"
        );
        Ok(KeygenOutput {
            id: me,
            private_share,
            verification_vector,
        })
    }
}

#[cfg(test)]
mod test {
    use rand_core::OsRng;

    use super::*;
    use crate::compat::Bls12;
    use crate::contribution::generate_contribution;
    use crate::recover::{recover_secret, LabeledShare};
    use crate::test::{run_keygen, run_renewal};

    fn ids(n: u32) -> Vec<MemberId<Bls12>> {
        (0..n).map(MemberId::from_index).collect()
    }

    #[test]
    fn test_renewal_keeps_the_secret() -> Result<(), DkgError> {
        let members = ids(4);
        let before = run_keygen(&members, 3)?;
        let after = run_renewal(&members, before.clone())?;

        for (old, new) in before.iter().zip(after.iter()) {
            assert_eq!(old.id, new.id);
            assert_eq!(old.public_key(), new.public_key());
            assert_ne!(old.private_share, new.private_share);
            assert_ne!(old.verification_vector, new.verification_vector);
        }

        let secret = |outputs: &[KeygenOutput<Bls12>]| {
            let labeled: Vec<_> = outputs
                .iter()
                .map(|o| LabeledShare::new(o.id, o.private_share.clone()))
                .collect();
            recover_secret(&labeled, 3)
        };
        assert_eq!(secret(&before)?, secret(&after[1..])?);
        Ok(())
    }

    #[test]
    fn test_non_zero_contribution_is_rejected() -> Result<(), DkgError> {
        let members = ids(3);
        let before = run_keygen(&members, 2)?;
        let mut session = RenewalSession::new(before[0].clone(), &members)?;
        session.contribute(&mut OsRng)?;

        let list = MemberList::new(&members)?;
        let sneaky = generate_contribution(&mut OsRng, &list, 2)?;
        assert_eq!(
            session.receive(
                &members[1],
                sneaky.verification_vector.clone(),
                sneaky.share_for(&members[0]).unwrap().clone()
            ),
            Err(DkgError::NonZeroContribution {
                sender: members[1].fingerprint()
            })
        );
        assert_eq!(session.missing(), 2);
        Ok(())
    }

    #[test]
    fn test_contribute_once() -> Result<(), DkgError> {
        let members = ids(3);
        let before = run_keygen(&members, 2)?;
        let mut session = RenewalSession::new(before[1].clone(), &members)?;
        let contribution = session.contribute(&mut OsRng)?;
        assert!(contribution.share_for(&members[1]).is_none());
        assert!(matches!(
            session.contribute(&mut OsRng),
            Err(DkgError::DuplicateContribution(_))
        ));
        Ok(())
    }

    #[test]
    fn test_renewal_with_exclusion() -> Result<(), DkgError> {
        let members = ids(3);
        let before = run_keygen(&members, 2)?;
        let mut alice = RenewalSession::new(before[0].clone(), &members)?;
        let mut bob = RenewalSession::new(before[1].clone(), &members)?;
        alice.contribute(&mut OsRng)?;
        let from_bob = bob.contribute(&mut OsRng)?;

        alice.exclude(&members[2])?;
        assert_eq!(
            alice.finalize(),
            Err(DkgError::Incomplete { missing: 1 })
        );
        alice.receive(
            &members[1],
            from_bob.verification_vector.clone(),
            from_bob.share_for(&members[0]).unwrap().clone(),
        )?;
        let renewed = alice.finalize()?;
        assert_eq!(renewed.public_key(), before[0].public_key());
        Ok(())
    }
}
