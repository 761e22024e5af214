use core::fmt::{Debug, Display, Formatter};

/// Driver error type
///
/// `E` is the error of the [`DisplayInterface`](crate::interface::DisplayInterface).
/// Drawing never fails, only talking to the panel and setting it up can.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Error<E> {
    /// Encountered an error on the bus
    Bus(E),

    /// Width or height not supported by the controller (height must be a multiple of 8)
    InvalidDimensions,

    /// The provided framebuffer storage was too small for the panel
    BufferTooSmall,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Error::Bus(err)
    }
}

impl<E: Debug> Display for Error<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(err) => write!(f, "bus error: {err:?}"),
            Self::InvalidDimensions => write!(
                f,
                "unsupported panel dimensions (height must be a multiple of 8)"
            ),
            Self::BufferTooSmall => write!(f, "framebuffer storage is too small for the panel"),
        }
    }
}

impl<E: Debug> Debug for Error<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(err) => f.debug_tuple("Bus").field(err).finish(),
            Self::InvalidDimensions => write!(f, "InvalidDimensions"),
            Self::BufferTooSmall => write!(f, "BufferTooSmall"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: Debug> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Bus(_) => defmt::write!(f, "Bus"),
            Self::InvalidDimensions => defmt::write!(f, "InvalidDimensions"),
            Self::BufferTooSmall => defmt::write!(f, "BufferTooSmall"),
        }
    }
}
