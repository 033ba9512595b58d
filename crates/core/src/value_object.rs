//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. A risk score of
/// 72 is the same value wherever it appears; a SKU with id `SKU-1001` is an
/// entity, whatever its score.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct RiskScore(u8);
///
/// impl ValueObject for RiskScore {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
