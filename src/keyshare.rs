//! The key generation round, from one member's point of view.
//!
//! Each member creates a [KeygenSession], contributes once, delivers the
//! resulting verification vector and shares to the others, and feeds what it
//! receives back into the session. Once every member has delivered, or been
//! excluded, the session produces that member's [KeygenOutput].
//!
//! Moving the messages around is left to the caller.
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::aggregate::{add_contribution_shares, add_verification_vectors};
use crate::compat::CurveGroup;
use crate::contribution::{generate_contribution, Contribution, SecretShare};
use crate::error::DkgError;
use crate::math::VerificationVector;
use crate::participants::{MemberId, MemberList};
use crate::round::Round;
use crate::verify::verify_contribution_share;

/// Represents the output of the key generation protocol.
///
/// This contains our share of the private key, along with the group
/// verification vector, whose first entry is the group public key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct KeygenOutput<C: CurveGroup> {
    pub id: MemberId<C>,
    pub private_share: SecretShare<C>,
    pub verification_vector: VerificationVector<C>,
}

impl<C: CurveGroup> KeygenOutput<C> {
    pub fn public_key(&self) -> C::Point {
        self.verification_vector.public_key()
    }

    /// The public key of any member's share.
    pub fn public_key_share(&self, id: &MemberId<C>) -> C::Point {
        self.verification_vector.public_key_share(id)
    }

    pub fn threshold(&self) -> usize {
        self.verification_vector.len()
    }
}

/// Aggregate a completed round, and check the result is consistent.
pub(crate) fn finish_round<C: CurveGroup>(
    me: &MemberId<C>,
    vectors: &[VerificationVector<C>],
    shares: &[SecretShare<C>],
) -> Result<(VerificationVector<C>, SecretShare<C>), DkgError> {
    let verification_vector = add_verification_vectors(vectors)?;
    let private_share = add_contribution_shares(shares)?;
    if !verify_contribution_share(&verification_vector, me, &private_share) {
        return Err(DkgError::AssertionFailed(
            "aggregated share does not match aggregated verification vector".to_string(),
        ));
    }
    Ok((verification_vector, private_share))
}

/// One member's state for a key generation round.
pub struct KeygenSession<C: CurveGroup> {
    round: Round<C>,
}

impl<C: CurveGroup> KeygenSession<C> {
    /// Start a round with a given threshold.
    ///
    /// Any `threshold` members will be able to sign or recover the secret,
    /// but no smaller set can.
    pub fn new(
        members: &[MemberId<C>],
        me: MemberId<C>,
        threshold: usize,
    ) -> Result<Self, DkgError> {
        C::init();
        let round = Round::new(members, me, threshold)?;
        debug!(member = %me, members = members.len(), threshold, "starting key generation");
        Ok(Self { round })
    }

    pub fn me(&self) -> MemberId<C> {
        self.round.me()
    }

    pub fn members(&self) -> &MemberList<C> {
        self.round.members()
    }

    pub fn threshold(&self) -> usize {
        self.round.threshold()
    }

    /// Generate this member's contribution.
    ///
    /// Our own share is kept inside the session. The returned contribution
    /// holds the verification vector to broadcast and one share for each
    /// other member, to be sent privately.
    pub fn contribute(
        &mut self,
        rng: &mut impl CryptoRngCore,
    ) -> Result<Contribution<C>, DkgError> {
        if self.round.has_contributed() {
            return Err(DkgError::DuplicateContribution(self.me().fingerprint()));
        }
        let mut contribution =
            generate_contribution(rng, self.round.members(), self.round.threshold())?;
        self.round.keep_own(&mut contribution)?;
        debug!(member = %self.me(), "generated contribution");
        Ok(contribution)
    }

    /// Receive another member's verification vector, and our share from it.
    ///
    /// An invalid share is rejected without being stored. The round will wait
    /// for a valid share from that member, or for it to be excluded.
    pub fn receive(
        &mut self,
        from: &MemberId<C>,
        verification_vector: VerificationVector<C>,
        share: SecretShare<C>,
    ) -> Result<(), DkgError> {
        self.round.accept(from, verification_vector, share)?;
        debug!(
            member = %self.me(),
            sender = %from,
            missing = self.round.missing(),
            "accepted contribution"
        );
        Ok(())
    }

    /// Exclude a member from this round.
    pub fn exclude(&mut self, member: &MemberId<C>) -> Result<(), DkgError> {
        self.round.exclude(member)
    }

    /// How many members we are still waiting on.
    pub fn missing(&self) -> usize {
        self.round.missing()
    }

    /// Aggregate everything received into our output.
    pub fn finalize(&self) -> Result<KeygenOutput<C>, DkgError> {
        let (vectors, shares) = self.round.collect()?;
        let me = self.me();
        let (verification_vector, private_share) = finish_round(&me, &vectors, &shares)?;
        info!(
            member = %me,
            contributors = self.round.received_count(),
            "key generation complete"
        );
        Ok(KeygenOutput {
            id: me,
            private_share,
            verification_vector,
        })
    }
}
