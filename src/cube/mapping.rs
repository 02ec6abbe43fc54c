//! Pure translation from logical voxel coordinates to physical LED positions.
//!
//! Panels are wired in a boustrophedon ("serpentine") pattern: alternating
//! rows run left-to-right then right-to-left to shorten wiring runs, and each
//! chain's `first_row_backwards` flag records which direction its row 0 runs.
//! Faces are numbered contiguously across chains in configuration order, so a
//! global face index resolves to one owning chain plus a local face on its
//! wire.
//!
//! Everything here is a pure function of the chain list; the functions neither
//! touch hardware nor hold state. The mapping must be exact: a wrong index
//! lights the wrong LED with no error from the transport.

use crate::cube::ChainConfig;

/// The chain that owns a face, plus how many faces precede that chain.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub struct FaceOwner {
    /// Index of the owning chain in configuration order.
    pub chain_index: usize,
    /// Total faces carried by chains before the owning one.
    pub faces_before: usize,
}

/// Physical target of one voxel: a chain and an LED offset on its wire.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub struct LedTarget {
    /// Index of the owning chain in configuration order.
    pub chain_index: usize,
    /// Offset of the LED on that chain's wire.
    pub led_index: usize,
}

/// Resolve which chain owns global face `face`.
///
/// Walks the chains in configuration order accumulating panel counts; the
/// first chain whose cumulative count exceeds `face` owns it. Returns `None`
/// when `face` is at or beyond the total face count.
#[must_use]
pub fn face_to_chain(chains: &[ChainConfig], face: usize) -> Option<FaceOwner> {
    let mut faces_before = 0_usize;
    for (chain_index, chain) in chains.iter().enumerate() {
        let next = faces_before + chain.panels as usize;
        if face < next {
            return Some(FaceOwner {
                chain_index,
                faces_before,
            });
        }
        faces_before = next;
    }
    None
}

/// Offset of `(x, y)` within one serpentine-wired face of `width` columns.
///
/// Even rows run in the direction given by `first_row_backwards`; odd rows run
/// the other way. A backwards row stores column `width - 1 - x`.
#[must_use]
pub fn serpentine_index(x: usize, y: usize, width: usize, first_row_backwards: bool) -> usize {
    let row_backwards = if y % 2 == 0 {
        first_row_backwards
    } else {
        !first_row_backwards
    };
    let column = if row_backwards { width - 1 - x } else { x };
    y * width + column
}

/// Map a voxel to the chain and physical LED index that display it.
///
/// Returns `None` when `z` is beyond the configured faces. `x` and `y` must
/// already be within the face (callers bound-check before mapping).
#[must_use]
pub fn voxel_to_led(
    chains: &[ChainConfig],
    x: usize,
    y: usize,
    z: usize,
    width: usize,
    height: usize,
) -> Option<LedTarget> {
    let owner = face_to_chain(chains, z)?;
    let chain = chains.get(owner.chain_index)?;
    let local_face = z - owner.faces_before;
    let led_index =
        local_face * width * height + serpentine_index(x, y, width, chain.first_row_backwards);
    Some(LedTarget {
        chain_index: owner.chain_index,
        led_index,
    })
}
