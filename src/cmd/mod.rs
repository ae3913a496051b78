//! CLI command capabilities for Plugset
//!
//! A plugin that wants to act as a CLI command implements [`Commander`].
//! The optional methods cover the command-specific concerns: a display name
//! different from the plugin name, aliases, sub-commands, a usage block,
//! and a clap flag surface.
//!
//! This module consumes the dispatch engine's contracts; it contains no
//! dispatch logic of its own.

pub mod find;
pub mod flags;
pub mod print;

pub use find::{find, find_from_args};
pub use print::print;

use std::path::Path;

use crate::error::BoxError;
use crate::filter::base_name;
use crate::plugin::Plugin;

/// A plugin that is meant to be the beginning of a CLI application.
pub trait Commander: Plugin {
    /// Run the command at `root` with the remaining arguments.
    fn main(&self, root: &Path, args: &[String]) -> Result<(), BoxError>;

    /// A display name different from the plugin name.
    fn cmd_name(&self) -> Option<String> {
        None
    }

    /// Alternate names this command answers to.
    fn aliases(&self) -> Vec<String> {
        Vec::new()
    }

    /// Plugins that act as sub-commands of this command.
    fn sub_commands(&self) -> crate::collection::Plugins {
        crate::collection::Plugins::default()
    }

    /// A block of usage information printed after the description.
    fn usage(&self) -> Option<String> {
        None
    }

    /// The command's flag surface, used for help rendering and flag
    /// namespacing.
    fn flags(&self) -> Option<clap::Command> {
        None
    }
}

/// The name a command is addressed by: its declared `cmd_name`, falling
/// back to the base segment of its plugin name.
pub fn cmd_label(p: &dyn Plugin) -> String {
    if let Some(c) = p.as_commander() {
        if let Some(name) = c.cmd_name() {
            return name;
        }
    }
    base_name(&p.plugin_name()).to_string()
}
