//! Command lookup by name, alias, or base plugin name.

use tracing::debug;

use crate::collection::Plugins;
use crate::filter::base_name;

use super::Commander;

/// Find the command that answers to `name` within `plugs`.
///
/// Each commander is checked in collection order: its declared `cmd_name`
/// first, then its aliases, then the base segment of its plugin name. The
/// first match wins; a miss returns `None`.
pub fn find<'a>(name: &str, plugs: &'a Plugins) -> Option<&'a dyn Commander> {
    for plugin in plugs.iter() {
        let Some(cmd) = plugin.as_commander() else {
            continue;
        };

        if let Some(declared) = cmd.cmd_name() {
            if declared == name {
                return Some(cmd);
            }
        }

        if cmd.aliases().iter().any(|a| a == name) {
            return Some(cmd);
        }

        if base_name(&cmd.plugin_name()) == name {
            return Some(cmd);
        }
    }

    debug!(name = %name, "no command matched");
    None
}

/// Find a command using the first argument that is not a flag.
pub fn find_from_args<'a>(args: &[String], plugs: &'a Plugins) -> Option<&'a dyn Commander> {
    args.iter()
        .find(|a| !a.starts_with('-'))
        .and_then(|name| find(name, plugs))
}
