//! The fixed-point type tag carried by every fixed-point-aware node.

use serde::{Deserialize, Serialize};

/// Width, binary point and signedness of a fixed-point value.
///
/// `point` is the number of fractional bits: the raw bit pattern `r` stands
/// for `r / 2^point`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixedSpec {
    /// Bit width, when known. Constants leave this unset; overlay results
    /// carry the inferred bit length of their node.
    pub width: Option<u32>,
    /// Number of fractional bits.
    pub point: u32,
    /// Whether the raw bits are two's complement.
    pub signed: bool,
    /// Array length, for memories.
    pub length: Option<u32>,
}

impl FixedSpec {
    /// A spec with the given point and signedness and no width.
    pub fn new(point: u32, signed: bool) -> Self {
        Self {
            width: None,
            point,
            signed,
            length: None,
        }
    }

    /// Sets the width.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }
}

/// Anything that has a binary point.
///
/// Plain literals and plain expressions report point `0`.
pub trait Pointed {
    /// Number of fractional bits.
    fn point(&self) -> u32;

    /// Whether the value is signed.
    fn signed(&self) -> bool;

    /// Bit width, when known.
    fn width(&self) -> Option<u32>;
}

impl Pointed for FixedSpec {
    fn point(&self) -> u32 {
        self.point
    }

    fn signed(&self) -> bool {
        self.signed
    }

    fn width(&self) -> Option<u32> {
        self.width
    }
}
