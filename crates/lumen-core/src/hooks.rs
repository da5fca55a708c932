//! Staged lifecycle hooks.
//!
//! A [`HookTarget`] is a named extension point with three ordered stages.
//! The manager only stores hooks; callers decide when and in what order the
//! stages run, which lets different commands interpret the same target
//! differently (the run command requires exactly one `core` entry, other
//! targets may have many).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use lumen_protocols::{CoreError, RuntimeContext};

use crate::core::Core;

/// Control-flow result of a hook invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookFlow {
    /// Keep executing the current stage.
    Continue,
    /// Terminate the orchestrator with this exit code (launcher only).
    Exit(i32),
}

/// A registered lifecycle hook.
#[async_trait]
pub trait Hook: Send + Sync {
    /// Diagnostic label, conventionally `module:function` style.
    fn id(&self) -> &str;

    async fn call(&self, core: &Core, ctx: &mut RuntimeContext)
        -> Result<HookFlow, CoreError>;
}

pub type HookFn = Arc<dyn Hook>;

/// Wrap a synchronous closure as a [`Hook`].
pub struct FnHook {
    id: String,
    #[allow(clippy::type_complexity)]
    f: Box<dyn Fn(&Core, &mut RuntimeContext) -> Result<HookFlow, CoreError> + Send + Sync>,
}

impl FnHook {
    pub fn new(
        id: impl Into<String>,
        f: impl Fn(&Core, &mut RuntimeContext) -> Result<HookFlow, CoreError>
            + Send
            + Sync
            + 'static,
    ) -> HookFn {
        Arc::new(Self {
            id: id.into(),
            f: Box::new(f),
        })
    }
}

#[async_trait]
impl Hook for FnHook {
    fn id(&self) -> &str {
        &self.id
    }

    async fn call(
        &self,
        core: &Core,
        ctx: &mut RuntimeContext,
    ) -> Result<HookFlow, CoreError> {
        (self.f)(core, ctx)
    }
}

/// One of a target's three ordered stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStage {
    Pre,
    Core,
    Post,
}

impl std::fmt::Display for HookStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HookStage::Pre => f.write_str("pre"),
            HookStage::Core => f.write_str("core"),
            HookStage::Post => f.write_str("post"),
        }
    }
}

/// Split a registration target into stage and target name.
///
/// A `pre_`/`post_` prefix selects the stage; anything else is `core`.
pub fn split_target(target: &str) -> (HookStage, &str) {
    if let Some(rest) = target.strip_prefix("pre_") {
        (HookStage::Pre, rest)
    } else if let Some(rest) = target.strip_prefix("post_") {
        (HookStage::Post, rest)
    } else {
        (HookStage::Core, target)
    }
}

/// A named extension point with three ordered stages.
#[derive(Default)]
pub struct HookTarget {
    pub name: String,
    pub pre: Vec<HookFn>,
    pub core: Vec<HookFn>,
    pub post: Vec<HookFn>,
}

impl HookTarget {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn stage(&self, stage: HookStage) -> &[HookFn] {
        match stage {
            HookStage::Pre => &self.pre,
            HookStage::Core => &self.core,
            HookStage::Post => &self.post,
        }
    }

    fn stage_mut(&mut self, stage: HookStage) -> &mut Vec<HookFn> {
        match stage {
            HookStage::Pre => &mut self.pre,
            HookStage::Core => &mut self.core,
            HookStage::Post => &mut self.post,
        }
    }
}

/// Owner of all hook targets. Pure in-memory state, no I/O.
#[derive(Default)]
pub struct HookManager {
    targets: HashMap<String, HookTarget>,
}

impl HookManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook, creating the target lazily.
    ///
    /// Never fails. With `exclusive`, registration is a no-op when the
    /// identical hook (same `Arc` allocation) is already in the stage;
    /// without it duplicates append and run once per registration.
    pub fn add_hook(&mut self, target: &str, hook: HookFn, exclusive: bool) {
        let (stage, name) = split_target(target);
        let hook_target = self
            .targets
            .entry(name.to_string())
            .or_insert_with(|| HookTarget::new(name));
        let list = hook_target.stage_mut(stage);
        if exclusive && list.iter().any(|h| Arc::ptr_eq(h, &hook)) {
            debug!("Skipping duplicate {} on {} of {}", hook.id(), stage, name);
            return;
        }
        debug!("Adding {} to {} of {}", hook.id(), stage, name);
        list.push(hook);
    }

    /// Look up a target. Absence is a valid, expected outcome.
    pub fn get(&self, target: &str) -> Option<&HookTarget> {
        self.targets.get(target)
    }

    /// Warn about every hook in a stage the caller declares it will not run.
    pub fn warn_unused(&self, target: &str, pre: bool, post: bool) {
        let Some(hook_target) = self.targets.get(target) else {
            return;
        };
        if pre {
            for hook in &hook_target.pre {
                warn!("pre hook {} on target {} will never run", hook.id(), target);
            }
        }
        if post {
            for hook in &hook_target.post {
                warn!("post hook {} on target {} will never run", hook.id(), target);
            }
        }
    }
}

#[cfg(test)]
#[path = "hooks_tests.rs"]
mod tests;
