pub mod controllers;

pub use controllers::{configure, configure_with_readiness};
