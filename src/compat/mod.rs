use std::fmt::Debug;

use elliptic_curve::{group::GroupEncoding, Group, PrimeField};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

#[cfg(any(feature = "bls12_381", test))]
pub mod bls12_381_impl;
#[cfg(any(feature = "k256", test))]
pub mod k256_impl;

#[cfg(any(feature = "bls12_381", test))]
pub use bls12_381_impl::Bls12;

/// Represents a curve suitable for distributed key generation.
///
/// This is the capability the protocol consumes: a prime order scalar field,
/// a group of public points over that field, and a way to hash arbitrary bytes
/// into the field. Everything else (polynomials, commitments, interpolation)
/// is built on top of these traits.
///
/// The crate provides feature-gated implementations for BLS12-381 and secp256k1,
/// beyond that you'll need to implement this trait yourself.
pub trait CurveGroup: Clone + Copy + Debug + Send + Sync + 'static {
    /// A name for the curve, used for domain separation.
    const NAME: &'static [u8];

    /// The scalar field, which secret shares live in.
    ///
    /// Scalars must be zeroizable, since shares are wiped on drop.
    type Scalar: PrimeField + Zeroize;

    /// The group public keys and commitments live in.
    type Point: Group<Scalar = Self::Scalar> + GroupEncoding + ConstantTimeEq;

    /// Perform any one-time setup this curve needs.
    ///
    /// Calling this more than once must be harmless.
    fn init() {}

    /// Hash an arbitrary message in order to produce a scalar.
    fn hash_to_scalar(msg: &[u8]) -> Self::Scalar;
}

/// A curve with a second group and a pairing, allowing BLS signatures.
///
/// Signatures are linear in the secret key, which is what lets shares of a
/// signature be interpolated exactly like shares of the key itself.
pub trait PairingCurve: CurveGroup {
    type Signature: Group<Scalar = Self::Scalar> + GroupEncoding + ConstantTimeEq;

    /// Hash a message onto the signature group.
    fn hash_to_signature_group(msg: &[u8]) -> Self::Signature;

    /// Check `signature` against `public_key` for a message.
    fn verify(public_key: &Self::Point, msg: &[u8], signature: &Self::Signature) -> bool;
}

/// Initialize process-wide state for a curve.
///
/// This is optional, since every operation initializes lazily, but it lets
/// callers pay the setup cost up front. Repeated calls are no-ops.
pub fn init<C: CurveGroup>() {
    C::init()
}

/// The public point for a scalar, i.e. `x * G`.
pub(crate) fn public_of<C: CurveGroup>(x: &C::Scalar) -> C::Point {
    C::Point::generator() * *x
}
