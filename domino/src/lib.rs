pub use errors::*;
pub use generation::*;
pub use protocol_types::*;
pub use seat::*;
pub use selection::*;
pub use turn_sync::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod errors;
mod generation;
mod protocol_types;
mod seat;
mod selection;
mod turn_sync;
mod visualization;
