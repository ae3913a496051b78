//! Flag namespacing for incorporating flags from other plugins.
//!
//! When a host command absorbs flags defined by other plugins, identically
//! named flags would collide. [`namespace`] prefixes each flag with the
//! owning plugin's command label so `--verbose` from `tools/fmt` becomes
//! `--fmt-verbose`.

use clap::{Arg, Command};

use crate::plugin::Plugin;

use super::cmd_label;

/// Snapshot the arguments of a clap command.
pub fn args_of(cmd: &Command) -> Vec<Arg> {
    cmd.get_arguments().cloned().collect()
}

/// Prefix every flag with the plugin's command label.
///
/// Usage text and defaults are preserved; only the identifier and long
/// name change.
pub fn namespace(p: &dyn Plugin, args: Vec<Arg>) -> Vec<Arg> {
    let prefix = cmd_label(p);

    args.into_iter()
        .map(|arg| {
            let renamed = format!("{}-{}", prefix, arg.get_id());
            arg.id(renamed.clone()).long(renamed)
        })
        .collect()
}
