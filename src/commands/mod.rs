//! Builtin command plugins.
//!
//! Each module exposes a `plugin` registration entry point and a `loader`
//! for the CLI discovery group, exactly like an external command plugin
//! would.

pub(crate) mod init;
pub(crate) mod run;
pub(crate) mod self_cmd;
