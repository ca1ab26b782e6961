//! This module holds some utilities for working with group members.
//!
//! Often you need to do things like, storing one item for each member,
//! or getting the interpolation coefficients for a set of members.
//! This module tries to provide useful data structures for doing that.

use std::fmt;

use elliptic_curve::{Field, PrimeField};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

use crate::compat::CurveGroup;
use crate::error::DkgError;
use crate::serde::{deserialize_scalar, serialize_scalar};

/// Represents a member of the group.
///
/// A member is identified by a non-zero scalar, which is both the point
/// its shares are evaluated at, and the key used to look it up.
/// Zero is reserved, since evaluating there yields the group secret.
pub struct MemberId<C: CurveGroup>(C::Scalar);

impl<C: CurveGroup> MemberId<C> {
    /// Derive an id deterministically from an external identifier.
    pub fn derive(label: &[u8]) -> Self {
        let mut input = label.to_vec();
        let mut counter = 0u8;
        loop {
            let x = C::hash_to_scalar(&input);
            if let Some(id) = Self::from_scalar(x) {
                return id;
            }
            input.push(counter);
            counter = counter.wrapping_add(1);
        }
    }

    /// Use a scalar as an id directly, as long as it isn't zero.
    pub fn from_scalar(x: C::Scalar) -> Option<Self> {
        if bool::from(x.is_zero()) {
            None
        } else {
            Some(Self(x))
        }
    }

    /// The id of the member at a given position, i.e. `index + 1`.
    pub fn from_index(index: u32) -> Self {
        Self(C::Scalar::from(u64::from(index) + 1))
    }

    /// Return the scalar associated with this member.
    pub fn scalar(&self) -> &C::Scalar {
        &self.0
    }

    /// A short hex string identifying this member in logs and errors.
    pub fn fingerprint(&self) -> String {
        self.0.to_repr().as_ref()[..4]
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}

impl<C: CurveGroup> Clone for MemberId<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: CurveGroup> Copy for MemberId<C> {}

impl<C: CurveGroup> PartialEq for MemberId<C> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<C: CurveGroup> Eq for MemberId<C> {}

impl<C: CurveGroup> fmt::Debug for MemberId<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MemberId").field(&self.fingerprint()).finish()
    }
}

impl<C: CurveGroup> fmt::Display for MemberId<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fingerprint())
    }
}

impl<C: CurveGroup> Serialize for MemberId<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_scalar::<C, S>(&self.0, serializer)
    }
}

impl<'de, C: CurveGroup> Deserialize<'de> for MemberId<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let x = deserialize_scalar::<C, D>(deserializer)?;
        Self::from_scalar(x).ok_or_else(|| D::Error::custom("member id cannot be zero"))
    }
}

/// Represents an ordered list of distinct members.
///
/// The order is the one given by the caller, and is preserved.
#[derive(Debug, Clone)]
pub struct MemberList<C: CurveGroup> {
    members: Vec<MemberId<C>>,
}

impl<C: CurveGroup> MemberList<C> {
    /// Create a member list from a slice of members.
    ///
    /// This fails if the members have duplicates.
    pub fn new(members: &[MemberId<C>]) -> Result<Self, DkgError> {
        for (i, id) in members.iter().enumerate() {
            if members[..i].contains(id) {
                return Err(DkgError::DuplicateId(id.fingerprint()));
            }
        }
        Ok(Self {
            members: members.to_owned(),
        })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Check if this list has a given member.
    pub fn contains(&self, id: &MemberId<C>) -> bool {
        self.members.contains(id)
    }

    /// Return the position of a given member.
    pub fn index(&self, id: &MemberId<C>) -> Option<usize> {
        self.members.iter().position(|x| x == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MemberId<C>> + '_ {
        self.members.iter()
    }

    pub fn as_slice(&self) -> &[MemberId<C>] {
        &self.members
    }

    /// Get the lagrange coefficient for a member, relative to this list.
    ///
    /// This is the weight of that member's share when interpolating at 0:
    /// `λ_j = Π_{k ≠ j} id_k / (id_k - id_j)`.
    pub fn lagrange(&self, id: &MemberId<C>) -> Result<C::Scalar, DkgError> {
        if !self.contains(id) {
            return Err(DkgError::UnknownMember(id.fingerprint()));
        }
        let x_j = id.0;

        let mut num = C::Scalar::ONE;
        let mut den = C::Scalar::ONE;
        for other in self.members.iter().filter(|x| *x != id) {
            num *= other.0;
            den *= other.0 - x_j;
        }

        let den_inv: Option<C::Scalar> = den.invert().into();
        den_inv
            .map(|inv| num * inv)
            .ok_or_else(|| DkgError::DuplicateId(id.fingerprint()))
    }

    /// Get the lagrange coefficients of every member, in list order.
    pub fn lagrange_coefficients(&self) -> Result<Vec<C::Scalar>, DkgError> {
        self.members.iter().map(|id| self.lagrange(id)).collect()
    }
}

/// A map from members to elements.
///
/// The idea is that you have one element for each member.
#[derive(Debug, Clone)]
pub struct MemberMap<C: CurveGroup, T> {
    members: MemberList<C>,
    data: Vec<Option<T>>,
    count: usize,
}

impl<C: CurveGroup, T> MemberMap<C, T> {
    /// Create a new, empty map from a list of members.
    pub fn new(members: &MemberList<C>) -> Self {
        let data = (0..members.len()).map(|_| None).collect();
        Self {
            members: members.clone(),
            data,
            count: 0,
        }
    }

    /// Check if this map is full, i.e. if every member has put something in.
    pub fn full(&self) -> bool {
        self.count == self.data.len()
    }

    /// How many members have put something in.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Check if this map contains data from a specific member.
    pub fn contains(&self, id: &MemberId<C>) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &MemberId<C>) -> Option<&T> {
        let i = self.members.index(id)?;
        self.data[i].as_ref()
    }

    /// Place the data for a member in this map.
    ///
    /// This returns false, leaving the map untouched, if the member is unknown
    /// or already has data.
    pub fn put(&mut self, id: &MemberId<C>, data: T) -> bool {
        let Some(i) = self.members.index(id) else {
            return false;
        };
        if self.data[i].is_some() {
            return false;
        }
        self.data[i] = Some(data);
        self.count += 1;
        true
    }

    /// Take the data for a member back out of the map.
    pub fn remove(&mut self, id: &MemberId<C>) -> Option<T> {
        let i = self.members.index(id)?;
        let out = self.data[i].take();
        if out.is_some() {
            self.count -= 1;
        }
        out
    }

    /// Iterate over the elements present, in member order.
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.data.iter().flatten()
    }

    /// Iterate over the members which haven't put anything in yet.
    pub fn missing(&self) -> impl Iterator<Item = MemberId<C>> + '_ {
        self.members
            .iter()
            .zip(self.data.iter())
            .filter(|(_, d)| d.is_none())
            .map(|(id, _)| *id)
    }

    /// Consume the map, returning the present elements in member order.
    pub fn into_values(self) -> Vec<T> {
        self.data.into_iter().flatten().collect()
    }
}
