//! Format-independent helpers shared by the format implementations.

pub mod emphasis;
