//! Wire encoding for everything that crosses between members.
//!
//! Scalars and points are written as their canonical fixed-length encodings,
//! sequences of them keep their order.
use std::fmt;

use elliptic_curve::{group::GroupEncoding, PrimeField};
use serde::{
    de::{self, DeserializeOwned, SeqAccess, Visitor},
    Deserializer, Serialize, Serializer,
};

use crate::compat::CurveGroup;
use crate::error::DkgError;

/// Encode an arbitrary serializable value into a vec.
pub fn encode<T: Serialize + ?Sized>(val: &T) -> Result<Vec<u8>, DkgError> {
    rmp_serde::encode::to_vec(val).map_err(|e| DkgError::CapabilityFailure(e.to_string()))
}

/// Decode a value previously produced by [encode].
pub fn decode<T: DeserializeOwned>(input: &[u8]) -> Result<T, DkgError> {
    rmp_serde::decode::from_slice(input).map_err(|e| DkgError::CapabilityFailure(e.to_string()))
}

struct BytesVisitor;

impl<'de> Visitor<'de> for BytesVisitor {
    type Value = Vec<u8>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a byte string")
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
        Ok(v.to_vec())
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(b) = seq.next_element()? {
            out.push(b);
        }
        Ok(out)
    }
}

/// Copy bytes into a fixed-size encoding, checking the length.
fn fill_repr<R: AsMut<[u8]> + Default, E: de::Error>(bytes: &[u8]) -> Result<R, E> {
    let mut repr = R::default();
    let expected = repr.as_mut().len();
    if bytes.len() != expected {
        return Err(E::invalid_length(bytes.len(), &"a canonical encoding"));
    }
    repr.as_mut().copy_from_slice(bytes);
    Ok(repr)
}

/// Serialize a scalar as its canonical bytes.
pub fn serialize_scalar<C: CurveGroup, S: Serializer>(
    data: &C::Scalar,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_bytes(data.to_repr().as_ref())
}

/// Deserialize a scalar, rejecting non-canonical encodings.
pub fn deserialize_scalar<'de, C: CurveGroup, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<C::Scalar, D::Error> {
    let bytes = deserializer.deserialize_bytes(BytesVisitor)?;
    let repr = fill_repr::<<C::Scalar as PrimeField>::Repr, D::Error>(&bytes)?;
    Option::from(C::Scalar::from_repr(repr)).ok_or_else(|| de::Error::custom("invalid scalar"))
}

fn point_from_bytes<C: CurveGroup, E: de::Error>(bytes: &[u8]) -> Result<C::Point, E> {
    let repr = fill_repr::<<C::Point as GroupEncoding>::Repr, E>(bytes)?;
    Option::from(C::Point::from_bytes(&repr)).ok_or_else(|| E::custom("invalid point"))
}

/// Serialize a list of points.
pub fn serialize_points<C: CurveGroup, S: Serializer>(
    data: &[C::Point],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(data.iter().map(|x| EncodedBytes(x.to_bytes().as_ref().to_vec())))
}

/// Deserialize a list of points.
pub fn deserialize_points<'de, C: CurveGroup, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<C::Point>, D::Error> {
    struct PointsVisitor<C>(std::marker::PhantomData<C>);

    impl<'de, C: CurveGroup> Visitor<'de> for PointsVisitor<C> {
        type Value = Vec<C::Point>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a sequence of encoded points")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(bytes) = seq.next_element::<EncodedBytes>()? {
                out.push(point_from_bytes::<C, A::Error>(&bytes.0)?);
            }
            Ok(out)
        }
    }

    deserializer.deserialize_seq(PointsVisitor::<C>(std::marker::PhantomData))
}

/// Owned bytes, serialized as a byte string rather than a sequence.
struct EncodedBytes(Vec<u8>);

impl Serialize for EncodedBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for EncodedBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_bytes(BytesVisitor).map(EncodedBytes)
    }
}
