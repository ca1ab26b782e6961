//! BLS12-381 with public keys in G2 and signatures in G1.
use std::sync::OnceLock;

use bls12_381::{
    hash_to_curve::{ExpandMsgXmd, HashToCurve},
    multi_miller_loop, G1Affine, G1Projective, G2Affine, G2Prepared, G2Projective, Gt, Scalar,
};
use digest::Digest;
use sha2::Sha512;

use super::{CurveGroup, PairingCurve};

/// The ciphersuite tag for hashing messages onto G1.
pub const SIGNATURE_DST: &[u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_NUL_";

/// The prepared negated G2 generator, used by every pairing check.
static NEG_G2_GENERATOR: OnceLock<G2Prepared> = OnceLock::new();

fn neg_g2_generator() -> &'static G2Prepared {
    NEG_G2_GENERATOR.get_or_init(|| G2Prepared::from(-G2Affine::generator()))
}

/// Marker type selecting the BLS12-381 curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bls12;

impl CurveGroup for Bls12 {
    const NAME: &'static [u8] = b"BLS12-381-G2";

    type Scalar = Scalar;
    type Point = G2Projective;

    fn init() {
        neg_g2_generator();
    }

    fn hash_to_scalar(msg: &[u8]) -> Self::Scalar {
        let digest = Sha512::new()
            .chain_update(Self::NAME)
            .chain_update(msg)
            .finalize();
        let mut wide = [0u8; 64];
        wide.copy_from_slice(&digest);
        Scalar::from_bytes_wide(&wide)
    }
}

impl PairingCurve for Bls12 {
    type Signature = G1Projective;

    fn hash_to_signature_group(msg: &[u8]) -> Self::Signature {
        <G1Projective as HashToCurve<ExpandMsgXmd<sha2_09::Sha256>>>::hash_to_curve(
            msg,
            SIGNATURE_DST,
        )
    }

    fn verify(public_key: &Self::Point, msg: &[u8], signature: &Self::Signature) -> bool {
        // e(sig, -G2) * e(H(m), pk) == 1
        let h = G1Affine::from(Self::hash_to_signature_group(msg));
        let sig = G1Affine::from(*signature);
        let pk = G2Prepared::from(G2Affine::from(*public_key));
        let result = multi_miller_loop(&[(&sig, neg_g2_generator()), (&h, &pk)]);
        result.final_exponentiation() == Gt::identity()
    }
}

#[cfg(test)]
mod test {
    use elliptic_curve::Field;
    use rand_core::OsRng;

    use super::*;

    #[test]
    fn test_sign_and_verify() {
        Bls12::init();
        let sk = Scalar::random(&mut OsRng);
        let pk = G2Projective::generator() * sk;
        let sig = Bls12::hash_to_signature_group(b"hello world") * sk;

        assert!(Bls12::verify(&pk, b"hello world", &sig));
        assert!(!Bls12::verify(&pk, b"hello there", &sig));
        assert!(!Bls12::verify(&(pk + G2Projective::generator()), b"hello world", &sig));
    }

    #[test]
    fn test_init_is_idempotent() {
        Bls12::init();
        Bls12::init();
        super::super::init::<Bls12>();
        assert!(NEG_G2_GENERATOR.get().is_some());
    }

    #[test]
    fn test_hash_to_signature_group() {
        let h = Bls12::hash_to_signature_group(b"hello world");
        assert_eq!(h, Bls12::hash_to_signature_group(b"hello world"));
        assert_ne!(h, Bls12::hash_to_signature_group(b"hello there"));
        assert!(!bool::from(h.is_identity()));
        assert!(bool::from(G1Affine::from(h).is_torsion_free()));
    }

    #[test]
    fn test_hash_to_scalar_is_deterministic() {
        assert_eq!(Bls12::hash_to_scalar(&[1]), Bls12::hash_to_scalar(&[1]));
        assert_ne!(Bls12::hash_to_scalar(&[1]), Bls12::hash_to_scalar(&[2]));
    }
}
