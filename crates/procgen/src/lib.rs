//! Procedural generation of world chunks: ground patches, trees, and the
//! creatures and power-ups each chunk brings with it.

pub mod chunk;
pub mod decoration;
pub mod spawn;
pub mod terrain;

pub use chunk::*;
pub use decoration::*;
pub use spawn::*;
pub use terrain::*;
