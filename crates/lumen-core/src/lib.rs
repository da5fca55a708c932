//! # Lumen Core
//!
//! The orchestration engine: a [`Core`] owns the component, command, and
//! hook-endpoint registries, the staged [`HookManager`], the parsed project
//! manifest, and the resolved interpreter identity, and drives one strictly
//! ordered bootstrap sequence per process invocation.
//!
//! ## Components
//!
//! - [`Core`] - the orchestrator
//! - [`HookManager`] / [`HookTarget`] - named targets with pre/core/post stages
//! - [`ComponentRegistry`] / [`CommandRegistry`] / [`HookEndpointRegistry`]
//! - [`LifecyclePhase`] - the bootstrap state machine
//! - [`PluginEntry`] - discovery entries for the two extension groups

pub mod core;
pub mod hooks;
pub mod lifecycle;
pub mod plugins;
pub mod registry;

pub use self::core::Core;
pub use hooks::{FnHook, Hook, HookFlow, HookFn, HookManager, HookStage, HookTarget};
pub use lifecycle::LifecyclePhase;
pub use plugins::{PluginEntry, PluginGroup, PluginInit};
pub use registry::{
    CliCommand, CommandRegistry, ComponentArgs, ComponentHandler, ComponentRegistry,
    HookEndpointRegistry,
};
