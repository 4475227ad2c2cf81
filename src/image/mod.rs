pub mod io;
pub mod mask;

pub use self::mask::BinaryMask;
