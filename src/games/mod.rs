//! Game implementations.

pub mod niya;
