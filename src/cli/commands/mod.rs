//! CLI command implementations

pub mod pick;
pub mod refresh;

pub use pick::execute as pick;
pub use refresh::execute as refresh;
