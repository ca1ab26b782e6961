//! Distributed key generation for threshold BLS signatures.
//!
//! A group of `n` members jointly creates a key pair, such that each member
//! ends up with a share of the private key, but no member ever learns the
//! private key itself. Any `threshold` members can then produce a signature
//! which verifies under the group public key, or recover the public key of
//! any member's share. Fewer than `threshold` members learn nothing.
//!
//! # Warning
//!
//! This is experimental cryptographic software, it has not undergone any form of audit.
//!
//! # Design
//!
//! The protocol is Feldman's verifiable secret sharing, run by every member at once.
//!
//! Each member draws a random polynomial `f` of degree `threshold - 1`, and
//! publishes a *verification vector*, the commitment to each coefficient:
//! ```ignore
//! V = (c_0 * G, c_1 * G, ..., c_{t-1} * G)
//! ```
//! It then privately sends `f(id)` to every member. A recipient can check its
//! share against `V`, without learning anything about `f`, by evaluating the
//! vector at its id in the group.
//!
//! Adding every member's polynomial together gives the group polynomial:
//! each member's share is the sum of what it received, the group verification
//! vector is the sum of all vectors, and its first entry is the group public key.
//! The group secret, the constant term of the group polynomial, is never computed.
//!
//! Since both secret shares and BLS signatures are linear, Lagrange interpolation at 0
//! works the same way on secret shares, public key shares, and signature shares.
//! Any subset of `threshold` members recovers the exact same value.
//!
//! Shares can also be *renewed*: every member contributes a polynomial with a
//! zero constant term, re-randomizing all shares while keeping the group key.
//!
//! ## API Design
//!
//! Each member runs a [KeygenSession] (and later, a [RenewalSession]):
//! ```ignore
//! let mut session = KeygenSession::new(&members, me, threshold)?;
//! let contribution = session.contribute(&mut OsRng)?;
//! // broadcast contribution.verification_vector, send each share privately...
//! session.receive(&from, their_vector, my_share)?;
//! // ...once everyone delivered:
//! let output = session.finalize()?;
//! ```
//! Transport is up to you, though everything can be encoded using [encode].
//! The lower level operations those sessions are built on are also exposed.
//!
//! # Generic Curves
//!
//! The group arithmetic is abstracted behind the [CurveGroup] trait, and
//! signing behind [PairingCurve]. This crate provides implementations of some
//! existing curves behind features, as per the following table:
//!
//! | Curve | Feature | Signing |
//! |-------|---------|---------|
//! |BLS12-381|`bls12_381` (default)|yes|
//! |Secp256k1|`k256`|no|
//!
//! With BLS12-381, public keys live in G2 and signatures in G1.
pub mod compat;
mod aggregate;
mod config;
mod contribution;
mod error;
mod keyshare;
mod math;
mod participants;
mod recover;
mod renewal;
mod round;
mod serde;
mod sign;
mod verify;

pub use aggregate::{add_contribution_shares, add_verification_vectors};
pub use compat::{init, CurveGroup, PairingCurve};
pub use config::GroupConfig;
pub use contribution::{
    generate_contribution, generate_zero_contribution, Contribution, SecretShare,
};
pub use crate::serde::{decode, encode};
pub use error::DkgError;
pub use keyshare::{KeygenOutput, KeygenSession};
pub use math::{Polynomial, VerificationVector};
pub use participants::{MemberId, MemberList, MemberMap};
pub use recover::{recover, recover_public_key, recover_secret, LabeledShare};
pub use renewal::RenewalSession;
pub use sign::{
    combine_signatures, sign, signature_from_bytes, signature_to_bytes, verify, verify_share,
};
pub use verify::{check_contribution_share, verify_contribution_share};
