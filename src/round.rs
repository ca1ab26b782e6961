//! Bookkeeping shared by the key generation and renewal sessions.
//!
//! A round collects one verification vector and one share from every member,
//! checking each as it arrives. Members can be excluded, after which the
//! round completes without them.
use tracing::warn;

use crate::compat::CurveGroup;
use crate::contribution::{Contribution, SecretShare};
use crate::error::DkgError;
use crate::math::VerificationVector;
use crate::participants::{MemberId, MemberList, MemberMap};
use crate::verify::check_contribution_share;

pub(crate) struct Round<C: CurveGroup> {
    members: MemberList<C>,
    me: MemberId<C>,
    threshold: usize,
    received: MemberMap<C, (VerificationVector<C>, SecretShare<C>)>,
    excluded: Vec<MemberId<C>>,
}

impl<C: CurveGroup> Round<C> {
    pub fn new(
        members: &[MemberId<C>],
        me: MemberId<C>,
        threshold: usize,
    ) -> Result<Self, DkgError> {
        if members.len() < 2 {
            return Err(DkgError::BadParameters(format!(
                "member count cannot be < 2, found: {}",
                members.len()
            )));
        };
        if threshold == 0 || threshold > members.len() {
            return Err(DkgError::BadParameters(format!(
                "threshold must be in 1..={}, found: {threshold}",
                members.len()
            )));
        }
        let members = MemberList::new(members)?;
        if !members.contains(&me) {
            return Err(DkgError::BadParameters(
                "member list must contain this member".to_string(),
            ));
        }
        let received = MemberMap::new(&members);
        Ok(Self {
            members,
            me,
            threshold,
            received,
            excluded: Vec::new(),
        })
    }

    pub fn members(&self) -> &MemberList<C> {
        &self.members
    }

    pub fn me(&self) -> MemberId<C> {
        self.me
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Keep our own share out of a fresh contribution, recording it as received.
    pub fn keep_own(&mut self, contribution: &mut Contribution<C>) -> Result<(), DkgError> {
        if self.received.contains(&self.me) {
            return Err(DkgError::DuplicateContribution(self.me.fingerprint()));
        }
        let share = contribution.take_share(&self.me).ok_or_else(|| {
            DkgError::AssertionFailed("contribution has no share for this member".to_string())
        })?;
        self.received
            .put(&self.me, (contribution.verification_vector.clone(), share));
        Ok(())
    }

    pub fn has_contributed(&self) -> bool {
        self.received.contains(&self.me)
    }

    /// Check a sender may still contribute to this round.
    pub fn check_sender(&self, from: &MemberId<C>) -> Result<(), DkgError> {
        if !self.members.contains(from) {
            return Err(DkgError::UnknownMember(from.fingerprint()));
        }
        if self.excluded.contains(from) {
            return Err(DkgError::BadParameters(format!(
                "member {from} was excluded from this round"
            )));
        }
        if self.received.contains(from) {
            return Err(DkgError::DuplicateContribution(from.fingerprint()));
        }
        Ok(())
    }

    pub fn check_length(&self, vector: &VerificationVector<C>) -> Result<(), DkgError> {
        if vector.len() != self.threshold {
            return Err(DkgError::LengthMismatch {
                expected: self.threshold,
                found: vector.len(),
            });
        }
        Ok(())
    }

    /// Verify and store a contribution from another member.
    pub fn accept(
        &mut self,
        from: &MemberId<C>,
        vector: VerificationVector<C>,
        share: SecretShare<C>,
    ) -> Result<(), DkgError> {
        self.check_sender(from)?;
        self.check_length(&vector)?;
        if let Err(e) = check_contribution_share(from, &vector, &self.me, &share) {
            warn!(member = %self.me, sender = %from, "received share failed verification");
            return Err(e);
        }
        self.received.put(from, (vector, share));
        Ok(())
    }

    /// Drop a member from this round, along with anything it already sent.
    pub fn exclude(&mut self, member: &MemberId<C>) -> Result<(), DkgError> {
        if !self.members.contains(member) {
            return Err(DkgError::UnknownMember(member.fingerprint()));
        }
        if *member == self.me {
            return Err(DkgError::BadParameters(
                "a member cannot exclude itself".to_string(),
            ));
        }
        if !self.excluded.contains(member) {
            self.received.remove(member);
            self.excluded.push(*member);
            warn!(member = %self.me, excluded = %member, "excluded member from round");
        }
        Ok(())
    }

    /// How many members we are still waiting on.
    pub fn missing(&self) -> usize {
        self.received
            .missing()
            .filter(|id| !self.excluded.contains(id))
            .count()
    }

    pub fn received_count(&self) -> usize {
        self.received.count()
    }

    /// Everything received, in member order, once nobody is missing.
    pub fn collect(&self) -> Result<(Vec<VerificationVector<C>>, Vec<SecretShare<C>>), DkgError> {
        let missing = self.missing();
        if missing > 0 {
            return Err(DkgError::Incomplete { missing });
        }
        Ok(self
            .received
            .values()
            .map(|(v, s)| (v.clone(), s.clone()))
            .unzip())
    }
}
