//! Internal helpers.

pub(crate) mod path;
