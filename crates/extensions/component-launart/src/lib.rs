//! # Lumen component: launart
//!
//! The bundled service-manager component. Each dispatch queues one service
//! endpoint (`launart:<module:Class>`), and the first dispatch installs the
//! component's hooks: a `pre_run` hook injecting queued services into the
//! launch plan, a `run_config` hook seeding the service-manager identity,
//! and the sole `run` core entry - the launcher that spawns the bot program
//! under the resolved interpreter and relays termination signals to it.

mod component;
mod launch;

pub use component::LaunartComponent;

use lumen_core::{Core, PluginInit};
use lumen_protocols::CoreError;

/// Registration entry point.
pub fn plugin(core: &mut Core) -> Result<(), CoreError> {
    core.components
        .register("launart", std::sync::Arc::new(LaunartComponent::new()));
    Ok(())
}

/// Discovery loader for the component plugin group.
pub fn loader() -> PluginInit {
    plugin
}
