use derive_more::{Display, Error};

/// Error type for all fallible device operations in this crate.
///
/// Configuration mistakes and out-of-range voxel coordinates are *not*
/// represented here: those are caller contract breaches and fail fast with a
/// panic (see [`Cube::new`](crate::cube::Cube::new) and
/// [`Cube::read`](crate::cube::Cube::read)). `Error` covers the recoverable
/// category only: the hardware transport refusing an operation.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq, defmt::Format)]
#[non_exhaustive]
pub enum Error {
    /// A chain's transport device could not be created.
    #[display("chain transport failed to open")]
    ChainOpen,

    /// The transport rejected a staged pixel update.
    #[display("pixel update rejected by chain transport")]
    PixelWrite,

    /// A chain flush did not complete; the chain stays dirty and the next
    /// refresh retries it.
    #[display("chain flush failed")]
    Flush,

    /// A background task could not be spawned.
    #[display("task spawn failed")]
    TaskSpawn,
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
