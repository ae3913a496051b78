//! The plugin collection and dispatch engine
//!
//! [`Plugins`] is an ordered sequence of plugin handles plus the operations
//! that broadcast an action to every capable member. Broadcasts are
//! fail-fast: configuration is an all-or-nothing setup step, so the first
//! failing plugin aborts the broadcast and is reported with attribution.
//! Partial configuration is worse than no configuration.
//!
//! The collection itself is a plugin: it scopes to itself, feeds itself,
//! and forwards received I/O and filesystem handles to its members. That
//! recursion is what makes nested scoping work.

use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;

use tracing::error;

use crate::error::{BoxError, PluginError, PlugsetError, Result};
use crate::filter::{by_type, Findable};
use crate::fsys::FsRef;
use crate::io::Io;
use crate::plugin::{Feeder, FeederFn, FsReceiver, IoReceiver, Needer, Plugin, PluginRef, Scoper};

/// An ordered collection of plugins.
///
/// Order is caller-determined at construction and preserved by every
/// operation except the explicit [`Plugins::sort_by_name`]. Broadcast
/// operations read the collection and call into members; they never add,
/// remove, or reorder elements.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use plugset::{Plugins, PluginRef};
/// use plugset::plugtest::StringPlugin;
///
/// let plugs: Plugins = vec![
///     Arc::new(StringPlugin::new("tools/fmt")) as PluginRef,
///     Arc::new(StringPlugin::new("tools/lint")) as PluginRef,
/// ]
/// .into();
///
/// plugs.validate().unwrap();
/// assert_eq!(plugs.names(), vec!["tools/fmt", "tools/lint"]);
/// ```
#[derive(Clone, Default)]
pub struct Plugins(Vec<PluginRef>);

impl Plugins {
    pub fn new(plugs: Vec<PluginRef>) -> Self {
        Self(plugs)
    }

    /// Append a plugin, keeping existing order.
    pub fn push(&mut self, plugin: PluginRef) {
        self.0.push(plugin);
    }

    /// The names of every member, in order, duplicates included.
    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|p| p.plugin_name()).collect()
    }

    /// Check the collection for common issues.
    ///
    /// Fails if the collection is empty, if any member's name is empty, or
    /// on the first duplicate name encountered in scan order.
    pub fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(PlugsetError::NoPlugins);
        }

        let mut seen = HashSet::with_capacity(self.0.len());
        for (i, plugin) in self.0.iter().enumerate() {
            let name = plugin.plugin_name();
            if name.is_empty() {
                return Err(PlugsetError::EmptyName(i));
            }
            if !seen.insert(name.clone()) {
                return Err(PlugsetError::DuplicateName(name));
            }
        }

        Ok(())
    }

    /// Reorder members in place by ascending name. Broadcast operations
    /// never sort on their own.
    pub fn sort_by_name(&mut self) {
        self.0.sort_by_cached_key(|p| p.plugin_name());
    }

    /// The members available for use at `root`.
    ///
    /// Members that do not implement [`crate::plugin::AvailabilityChecker`]
    /// are always available; the rest are asked. Order is preserved and
    /// availability checks cannot fail.
    pub fn available(&self, root: &Path) -> Plugins {
        let mut res = Vec::new();

        for plugin in &self.0 {
            match plugin.as_availability_checker() {
                None => res.push(plugin.clone()),
                Some(ac) if ac.plugin_available(root) => res.push(plugin.clone()),
                Some(_) => {}
            }
        }

        Plugins(res)
    }

    /// Hand the I/O triple to every member that receives I/O.
    ///
    /// Stops at the first failure and returns it wrapped with the offending
    /// plugin's identity; remaining members are not invoked.
    pub fn set_stdio(&self, io: Io) -> Result<()> {
        let receivers = by_type(self, |p| p.as_io_receiver());

        for plugin in receivers {
            if let Err(err) = plugin.set_stdio(io.clone()) {
                error!(
                    plugin = %plugin.plugin_name(),
                    error = %err,
                    "failed to set stdio for plugin"
                );
                return Err(PluginError::new(plugin, err).into());
            }
        }

        Ok(())
    }

    /// Hand the filesystem to every member that receives one. Fail-fast
    /// with attribution, like [`Plugins::set_stdio`].
    pub fn set_file_system(&self, fs: FsRef) -> Result<()> {
        let receivers = by_type(self, |p| p.as_fs_receiver());

        for plugin in receivers {
            if let Err(err) = plugin.set_file_system(fs.clone()) {
                error!(
                    plugin = %plugin.plugin_name(),
                    error = %err,
                    "failed to set filesystem for plugin"
                );
                return Err(PluginError::new(plugin, err).into());
            }
        }

        Ok(())
    }

    /// Hand the feeder function to every member that needs the sibling
    /// plugins. Fail-fast with attribution.
    pub fn with_plugins(&self, feeder: FeederFn) -> Result<()> {
        let needers = by_type(self, |p| p.as_needer());

        for plugin in needers {
            if let Err(err) = plugin.with_plugins(feeder.clone()) {
                error!(
                    plugin = %plugin.plugin_name(),
                    error = %err,
                    "failed to set plugins for needer"
                );
                return Err(PluginError::new(plugin, err).into());
            }
        }

        Ok(())
    }

    /// Find plugins using the given finder.
    pub fn find(&self, finder: &dyn Findable) -> Result<Plugins> {
        finder.find(self)
    }
}

impl Deref for Plugins {
    type Target = [PluginRef];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<PluginRef>> for Plugins {
    fn from(plugs: Vec<PluginRef>) -> Self {
        Self(plugs)
    }
}

impl FromIterator<PluginRef> for Plugins {
    fn from_iter<I: IntoIterator<Item = PluginRef>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Plugins {
    type Item = PluginRef;
    type IntoIter = std::vec::IntoIter<PluginRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Plugins {
    type Item = &'a PluginRef;
    type IntoIter = std::slice::Iter<'a, PluginRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Debug for Plugins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

// The collection is itself a plugin, so a whole collection can be passed
// anywhere a single plugin is expected (nested scoping).
impl Plugin for Plugins {
    fn plugin_name(&self) -> String {
        self.type_label().to_string()
    }

    fn as_io_receiver(&self) -> Option<&dyn IoReceiver> {
        Some(self)
    }

    fn as_fs_receiver(&self) -> Option<&dyn FsReceiver> {
        Some(self)
    }

    fn as_needer(&self) -> Option<&dyn Needer> {
        Some(self)
    }

    fn as_feeder(&self) -> Option<&dyn Feeder> {
        Some(self)
    }

    fn as_scoper(&self) -> Option<&dyn Scoper> {
        Some(self)
    }
}

impl Scoper for Plugins {
    /// A collection scopes to itself.
    fn scoped_plugins(&self) -> Plugins {
        self.clone()
    }
}

impl Feeder for Plugins {
    /// A feeder yielding this collection.
    fn plugin_feeder(&self) -> FeederFn {
        let plugs = self.clone();
        Arc::new(move || plugs.clone())
    }
}

impl IoReceiver for Plugins {
    fn set_stdio(&self, io: Io) -> std::result::Result<(), BoxError> {
        Plugins::set_stdio(self, io).map_err(Into::into)
    }
}

impl FsReceiver for Plugins {
    fn set_file_system(&self, fs: FsRef) -> std::result::Result<(), BoxError> {
        Plugins::set_file_system(self, fs).map_err(Into::into)
    }
}

impl Needer for Plugins {
    fn with_plugins(&self, feeder: FeederFn) -> std::result::Result<(), BoxError> {
        Plugins::with_plugins(self, feeder).map_err(Into::into)
    }
}
