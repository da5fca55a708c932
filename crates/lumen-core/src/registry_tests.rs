use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::*;
use crate::core::Core;
use crate::hooks::{FnHook, HookFlow};

struct CountingHandler {
    calls: Arc<AtomicUsize>,
}

impl ComponentHandler for CountingHandler {
    fn handle(&self, _core: &mut Core, _args: ComponentArgs) -> Result<(), CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct TaggingHandler {
    tag: &'static str,
}

impl ComponentHandler for TaggingHandler {
    fn handle(&self, core: &mut Core, _args: ComponentArgs) -> Result<(), CoreError> {
        core.hooks.add_hook(
            "pre_run",
            FnHook::new(self.tag, |_, _| Ok(HookFlow::Continue)),
            false,
        );
        Ok(())
    }
}

#[test]
fn test_component_registry_last_wins() {
    let mut core = Core::new(PathBuf::from("/srv/bot"), 0);
    core.components
        .register("launcher", Arc::new(TaggingHandler { tag: "first" }));
    core.components
        .register("launcher", Arc::new(TaggingHandler { tag: "second" }));
    assert_eq!(core.components.len(), 1);

    core.dispatch("launcher", Default::default()).unwrap();
    let pre = &core.hooks.get("run").unwrap().pre;
    assert_eq!(pre.len(), 1);
    assert_eq!(pre[0].id(), "second");
}

#[test]
fn test_component_registry_lookup() {
    let mut registry = ComponentRegistry::new();
    assert!(registry.is_empty());
    registry.register(
        "launart",
        Arc::new(CountingHandler {
            calls: Arc::new(AtomicUsize::new(0)),
        }),
    );
    assert!(registry.contains("launart"));
    assert!(registry.get("launart").is_some());
    assert!(registry.get("nope").is_none());
    assert_eq!(registry.list_names(), vec!["launart"]);
}

#[test]
fn test_dispatch_invokes_handler() {
    let mut core = Core::new(PathBuf::from("/srv/bot"), 0);
    let calls = Arc::new(AtomicUsize::new(0));
    core.components.register(
        "launart",
        Arc::new(CountingHandler {
            calls: calls.clone(),
        }),
    );
    core.dispatch("launart", Default::default()).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_dispatch_unknown_never_invokes_any_handler() {
    let mut core = Core::new(PathBuf::from("/srv/bot"), 0);
    let calls = Arc::new(AtomicUsize::new(0));
    core.components.register(
        "launart",
        Arc::new(CountingHandler {
            calls: calls.clone(),
        }),
    );
    let result = core.dispatch("missing", Default::default());
    assert!(matches!(result, Err(CoreError::UnknownComponent(n)) if n == "missing"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_hook_endpoint_registry_resolve() {
    let mut registry = HookEndpointRegistry::new();
    assert!(registry.is_empty());
    registry.register(
        "bot.hooks:announce",
        FnHook::new("bot.hooks:announce", |_, _| Ok(HookFlow::Continue)),
    );
    assert_eq!(registry.len(), 1);
    assert!(registry.resolve("bot.hooks:announce").is_some());
    assert!(registry.resolve("bot.hooks:missing").is_none());
}

#[test]
fn test_hook_endpoint_registry_last_wins() {
    let mut registry = HookEndpointRegistry::new();
    registry.register(
        "bot.hooks:announce",
        FnHook::new("old", |_, _| Ok(HookFlow::Continue)),
    );
    registry.register(
        "bot.hooks:announce",
        FnHook::new("new", |_, _| Ok(HookFlow::Continue)),
    );
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.resolve("bot.hooks:announce").unwrap().id(), "new");
}
