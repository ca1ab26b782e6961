//! Static parameters of a group.
//!
//! Members are named by external labels, e.g. node names or addresses,
//! which are turned into ids by hashing. Loading the configuration from
//! wherever it lives is up to the caller.
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::compat::CurveGroup;
use crate::error::DkgError;
use crate::keyshare::KeygenSession;
use crate::participants::{MemberId, MemberList};

/// The configuration shared by every member of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    /// How many members are needed to sign or recover.
    pub threshold: usize,
    /// The label of each member, in a fixed order.
    pub members: Vec<String>,
}

impl GroupConfig {
    pub fn new(threshold: usize, members: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            threshold,
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Check these parameters describe a usable group.
    pub fn validate(&self) -> Result<(), DkgError> {
        if self.members.len() < 2 {
            return Err(DkgError::BadParameters(format!(
                "member count cannot be < 2, found: {}",
                self.members.len()
            )));
        }
        if self.threshold == 0 || self.threshold > self.members.len() {
            return Err(DkgError::BadParameters(format!(
                "threshold must be in 1..={}, found: {}",
                self.members.len(),
                self.threshold
            )));
        }
        let mut seen = HashSet::with_capacity(self.members.len());
        for label in &self.members {
            if !seen.insert(label.as_str()) {
                return Err(DkgError::DuplicateId(label.clone()));
            }
        }
        Ok(())
    }

    /// Derive the id of every member, in configuration order.
    pub fn member_ids<C: CurveGroup>(&self) -> Result<Vec<MemberId<C>>, DkgError> {
        self.validate()?;
        let ids: Vec<_> = self
            .members
            .iter()
            .map(|label| MemberId::derive(label.as_bytes()))
            .collect();
        MemberList::new(&ids)?;
        Ok(ids)
    }

    /// The id of one member, by label.
    pub fn id_of<C: CurveGroup>(&self, label: &str) -> Result<MemberId<C>, DkgError> {
        if !self.members.iter().any(|m| m == label) {
            return Err(DkgError::UnknownMember(label.to_string()));
        }
        Ok(MemberId::derive(label.as_bytes()))
    }

    /// Start a key generation round as the member with a given label.
    pub fn keygen_session<C: CurveGroup>(&self, me: &str) -> Result<KeygenSession<C>, DkgError> {
        let ids = self.member_ids::<C>()?;
        KeygenSession::new(&ids, self.id_of(me)?, self.threshold)
    }
}
