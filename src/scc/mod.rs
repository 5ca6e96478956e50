pub mod common;
pub mod condensation;
pub mod digraph;
pub mod generate;
pub mod parse;
pub mod recursive;
pub mod tarjan;
pub mod verify;

pub use tarjan::strongly_connected_components;
