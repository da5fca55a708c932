//! # Lumen component: graia-ariadne
//!
//! The bundled bot-adapter component. Dispatching it once installs the
//! Elizabeth service through the launart component and registers a
//! `pre_run` hook recording the adapter's credential source. The component
//! may appear at most once per run and takes no sub-endpoint.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use lumen_core::{Core, ComponentArgs, ComponentHandler, FnHook, HookFlow, HookFn, PluginInit};
use lumen_protocols::CoreError;

/// The service installed on the launart manager for this adapter.
pub const SERVICE_ENDPOINT: &str = "graia.ariadne.service:ElizabethService";

/// Where the launched program reads account credentials from.
const CREDENTIAL_DOMAIN: &str = "graia.ariadne.credential";

pub struct AriadneComponent {
    configure: HookFn,
}

impl AriadneComponent {
    pub fn new() -> Self {
        let configure = FnHook::new("component_ariadne:configure", |_core, ctx| {
            debug!("Recording ariadne credential source: {}", CREDENTIAL_DOMAIN);
            ctx.set("graia-ariadne", json!({ "credential": CREDENTIAL_DOMAIN }));
            Ok(HookFlow::Continue)
        });
        Self { configure }
    }
}

impl Default for AriadneComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentHandler for AriadneComponent {
    fn handle(&self, core: &mut Core, args: ComponentArgs) -> Result<(), CoreError> {
        if core.already_dispatched("graia-ariadne") {
            return Err(CoreError::Config(
                "graia-ariadne is specified multiple times".into(),
            ));
        }
        if args.sub.is_some() {
            return Err(CoreError::Config(
                "graia-ariadne does not take a sub-component".into(),
            ));
        }
        core.dispatch(&format!("launart:{SERVICE_ENDPOINT}"), args.args)?;
        core.hooks.add_hook("pre_run", self.configure.clone(), true);
        Ok(())
    }
}

/// Registration entry point.
pub fn plugin(core: &mut Core) -> Result<(), CoreError> {
    core.components
        .register("graia-ariadne", Arc::new(AriadneComponent::new()));
    Ok(())
}

/// Discovery loader for the component plugin group.
pub fn loader() -> PluginInit {
    plugin
}
