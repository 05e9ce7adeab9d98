//! Collection of pre-defined systems.

pub mod yb171;
