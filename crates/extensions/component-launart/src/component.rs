//! The launart component handler.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::json;
use tracing::info;

use lumen_core::{Core, ComponentArgs, ComponentHandler, FnHook, HookFlow, HookFn};
use lumen_protocols::CoreError;

use crate::launch::LaunchHook;

/// Queues service endpoints and wires the run target.
///
/// All state is per-instance: dispatching the component twice within one
/// run appends to the same queue, and the hooks are registered exclusively
/// with the same allocations so they land exactly once.
pub struct LaunartComponent {
    pending: Arc<Mutex<Vec<String>>>,
    inject: HookFn,
    seed: HookFn,
    launch: HookFn,
}

impl LaunartComponent {
    pub fn new() -> Self {
        let pending: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

        let inject = {
            let pending = pending.clone();
            FnHook::new("component_launart:inject_services", move |_core, ctx| {
                for service in pending.lock().iter() {
                    info!("Adding launart component: {}", service);
                    ctx.launch.services.push(service.clone());
                }
                Ok(HookFlow::Continue)
            })
        };

        let seed = FnHook::new("component_launart:seed_manager", |_core, ctx| {
            ctx.set("launart", json!({ "manager": "launart:Launart" }));
            Ok(HookFlow::Continue)
        });

        Self {
            pending,
            inject,
            seed,
            launch: Arc::new(LaunchHook),
        }
    }

    /// Service endpoints queued so far.
    pub fn pending(&self) -> Vec<String> {
        self.pending.lock().clone()
    }
}

impl Default for LaunartComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentHandler for LaunartComponent {
    fn handle(&self, core: &mut Core, args: ComponentArgs) -> Result<(), CoreError> {
        let Some(service) = args.sub else {
            return Err(CoreError::Config(
                "launart requires a sub-component endpoint to add".into(),
            ));
        };
        core.hooks.add_hook("pre_run", self.inject.clone(), true);
        core.hooks.add_hook("run_config", self.seed.clone(), true);
        core.hooks.add_hook("run", self.launch.clone(), true);
        self.pending.lock().push(service);
        Ok(())
    }
}

#[cfg(test)]
#[path = "component_tests.rs"]
mod tests;
