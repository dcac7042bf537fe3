//! Subcommands of the `catmouse` binary

pub mod train;
