//! Builtin plugin registration for Lumen.
//!
//! Installed third-party extensions would be discovered here too; builtin
//! entries go through the same two discovery groups and the same
//! isolation-preserving loading loop as external ones.

use lumen_core::{PluginEntry, PluginGroup};

use crate::commands;

/// Entries for both discovery groups, in load order.
pub(crate) fn builtin_plugins() -> Vec<PluginEntry> {
    vec![
        PluginEntry {
            id: "lumen.commands.run",
            group: PluginGroup::Cli,
            loader: commands::run::loader,
        },
        PluginEntry {
            id: "lumen.commands.init",
            group: PluginGroup::Cli,
            loader: commands::init::loader,
        },
        PluginEntry {
            id: "lumen.commands.self",
            group: PluginGroup::Cli,
            loader: commands::self_cmd::loader,
        },
        PluginEntry {
            id: "lumen.components.launart",
            group: PluginGroup::Component,
            loader: lumen_component_launart::loader,
        },
        PluginEntry {
            id: "lumen.components.graia-ariadne",
            group: PluginGroup::Component,
            loader: lumen_component_ariadne::loader,
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use lumen_core::Core;

    use super::*;

    #[test]
    fn test_builtin_plugins_all_load() {
        let mut core = Core::new(PathBuf::from("/srv/bot"), 0);
        let results = core.load_plugins(&builtin_plugins());
        assert!(results.iter().all(|(_, result)| result.is_ok()));
        assert!(core.commands.get("run").is_some());
        assert!(core.commands.get("init").is_some());
        assert!(core.commands.get("self").is_some());
        assert!(core.components.contains("launart"));
        assert!(core.components.contains("graia-ariadne"));
    }

    #[test]
    fn test_builtin_groups() {
        let entries = builtin_plugins();
        let cli = entries
            .iter()
            .filter(|e| e.group == PluginGroup::Cli)
            .count();
        let component = entries
            .iter()
            .filter(|e| e.group == PluginGroup::Component)
            .count();
        assert_eq!(cli, 3);
        assert_eq!(component, 2);
    }
}
