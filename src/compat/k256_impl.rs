use digest::{Digest, FixedOutput};
use ecdsa::hazmat::DigestPrimitive;
use elliptic_curve::{ops::Reduce, Curve};
use k256::{FieldBytes, ProjectivePoint, Scalar, Secp256k1};

use super::CurveGroup;

impl CurveGroup for Secp256k1 {
    const NAME: &'static [u8] = b"Secp256k1-SHA-256";

    type Scalar = Scalar;
    type Point = ProjectivePoint;

    fn hash_to_scalar(msg: &[u8]) -> Self::Scalar {
        let digest = <Secp256k1 as DigestPrimitive>::Digest::new_with_prefix(Self::NAME)
            .chain_update(msg);
        let m_bytes: FieldBytes = digest.finalize_fixed();
        <Scalar as Reduce<<Secp256k1 as Curve>::Uint>>::reduce_bytes(&m_bytes)
    }
}

#[cfg(test)]
mod test {
    use k256::ProjectivePoint;

    use super::*;
    use crate::participants::MemberId;

    #[test]
    fn test_hash_to_scalar() {
        let x = Secp256k1::hash_to_scalar(b"hello world");
        assert_eq!(x, Secp256k1::hash_to_scalar(b"hello world"));
        assert_ne!(x, Secp256k1::hash_to_scalar(b"hello there"));

        let id = MemberId::<Secp256k1>::derive(b"alice");
        assert_eq!(*id.scalar(), Secp256k1::hash_to_scalar(b"alice"));
        assert_ne!(ProjectivePoint::GENERATOR * id.scalar(), ProjectivePoint::IDENTITY);
    }
}
