use super::*;

fn noop(id: &str) -> HookFn {
    FnHook::new(id, |_, _| Ok(HookFlow::Continue))
}

#[test]
fn test_split_target_core_by_default() {
    assert_eq!(split_target("run"), (HookStage::Core, "run"));
}

#[test]
fn test_split_target_prefixes() {
    assert_eq!(split_target("pre_run"), (HookStage::Pre, "run"));
    assert_eq!(split_target("post_run"), (HookStage::Post, "run"));
}

#[test]
fn test_add_hook_creates_target_lazily() {
    let mut hooks = HookManager::new();
    assert!(hooks.get("run").is_none());
    hooks.add_hook("run", noop("a"), false);
    let target = hooks.get("run").unwrap();
    assert_eq!(target.name, "run");
    assert_eq!(target.core.len(), 1);
}

#[test]
fn test_prefix_routes_to_stage() {
    let mut hooks = HookManager::new();
    hooks.add_hook("pre_run", noop("a"), false);
    hooks.add_hook("post_run", noop("b"), false);
    hooks.add_hook("run", noop("c"), false);
    let target = hooks.get("run").unwrap();
    assert_eq!(target.pre.len(), 1);
    assert_eq!(target.post.len(), 1);
    assert_eq!(target.core.len(), 1);
    assert_eq!(target.pre[0].id(), "a");
    assert_eq!(target.post[0].id(), "b");
}

#[test]
fn test_non_exclusive_duplicates_append_in_order() {
    let mut hooks = HookManager::new();
    let hook = noop("again");
    hooks.add_hook("pre_run", hook.clone(), false);
    hooks.add_hook("pre_run", noop("middle"), false);
    hooks.add_hook("pre_run", hook.clone(), false);
    let pre = &hooks.get("run").unwrap().pre;
    assert_eq!(pre.len(), 3);
    assert_eq!(pre[0].id(), "again");
    assert_eq!(pre[1].id(), "middle");
    assert_eq!(pre[2].id(), "again");
}

#[test]
fn test_exclusive_same_reference_registers_once() {
    let mut hooks = HookManager::new();
    let hook = noop("shared");
    // Two plugins registering the same callable reference.
    hooks.add_hook("pre_run", hook.clone(), true);
    hooks.add_hook("pre_run", hook.clone(), true);
    assert_eq!(hooks.get("run").unwrap().pre.len(), 1);
}

#[test]
fn test_exclusive_many_registrations_still_once() {
    let mut hooks = HookManager::new();
    let hook = noop("shared");
    for _ in 0..10 {
        hooks.add_hook("run", hook.clone(), true);
    }
    assert_eq!(hooks.get("run").unwrap().core.len(), 1);
}

#[test]
fn test_exclusive_distinct_allocations_both_register() {
    let mut hooks = HookManager::new();
    hooks.add_hook("pre_run", noop("x"), true);
    hooks.add_hook("pre_run", noop("x"), true);
    // Same label, different allocations: both kept.
    assert_eq!(hooks.get("run").unwrap().pre.len(), 2);
}

#[test]
fn test_exclusive_only_checks_selected_stage() {
    let mut hooks = HookManager::new();
    let hook = noop("shared");
    hooks.add_hook("pre_run", hook.clone(), true);
    hooks.add_hook("post_run", hook.clone(), true);
    let target = hooks.get("run").unwrap();
    assert_eq!(target.pre.len(), 1);
    assert_eq!(target.post.len(), 1);
}

#[test]
fn test_get_absent_target() {
    let hooks = HookManager::new();
    assert!(hooks.get("nope").is_none());
}

#[test]
fn test_warn_unused_absent_target_is_noop() {
    let hooks = HookManager::new();
    hooks.warn_unused("nope", true, true);
}

#[tokio::test]
async fn test_fn_hook_runs_and_mutates_context() {
    let core = Core::new(std::path::PathBuf::from("/srv/bot"), 0);
    let mut ctx = lumen_protocols::RuntimeContext::new();
    let hook = FnHook::new("test:mark", |_, ctx| {
        ctx.set("marked", true);
        Ok(HookFlow::Continue)
    });
    let flow = hook.call(&core, &mut ctx).await.unwrap();
    assert_eq!(flow, HookFlow::Continue);
    assert_eq!(ctx.get::<bool>("marked"), Some(true));
}

#[tokio::test]
async fn test_fn_hook_exit_flow() {
    let core = Core::new(std::path::PathBuf::from("/srv/bot"), 0);
    let mut ctx = lumen_protocols::RuntimeContext::new();
    let hook = FnHook::new("test:exit", |_, _| Ok(HookFlow::Exit(3)));
    assert_eq!(hook.call(&core, &mut ctx).await.unwrap(), HookFlow::Exit(3));
}
