pub mod scc;
