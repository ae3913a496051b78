//! Ready-made plugin doubles for testing
//!
//! Small plugins covering each capability, used by this crate's own tests
//! and exported for downstream test suites. Each double guards its mutable
//! state with its own lock, the discipline real plugins are expected to
//! follow.

use std::path::Path;
use std::sync::{Arc, Mutex, RwLock};

use crate::collection::Plugins;
use crate::error::{BoxError, PlugsetError};
use crate::fsys::FsRef;
use crate::io::Io;
use crate::plugin::{
    AvailabilityChecker, Feeder, FeederFn, FsProvider, FsReceiver, IoProvider, IoReceiver, Needer,
    Plugin, Scoper,
};

/// A plugin whose name is derived from its type label and an index.
pub struct Simple(pub usize);

impl Plugin for Simple {
    fn plugin_name(&self) -> String {
        format!("{}({})", self.type_label(), self.0)
    }
}

/// A plugin that is nothing but a name.
pub struct StringPlugin(pub String);

impl StringPlugin {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl Plugin for StringPlugin {
    fn plugin_name(&self) -> String {
        self.0.clone()
    }
}

/// An availability checker with a fixed answer.
pub struct Availability(pub bool);

impl Plugin for Availability {
    fn plugin_name(&self) -> String {
        format!("{}({})", self.type_label(), self.0)
    }

    fn as_availability_checker(&self) -> Option<&dyn AvailabilityChecker> {
        Some(self)
    }
}

impl AvailabilityChecker for Availability {
    fn plugin_available(&self, _root: &Path) -> bool {
        self.0
    }
}

/// An availability checker that answers true only under a fixed root.
pub struct RootedAvailability(pub std::path::PathBuf);

impl Plugin for RootedAvailability {
    fn plugin_name(&self) -> String {
        self.0.display().to_string()
    }

    fn as_availability_checker(&self) -> Option<&dyn AvailabilityChecker> {
        Some(self)
    }
}

impl AvailabilityChecker for RootedAvailability {
    fn plugin_available(&self, root: &Path) -> bool {
        self.0.starts_with(root)
    }
}

/// A feeder exposing a fixed collection.
#[derive(Default)]
pub struct FeederPlugin {
    pub plugins: Plugins,
}

impl Plugin for FeederPlugin {
    fn plugin_name(&self) -> String {
        self.type_label().to_string()
    }

    fn as_feeder(&self) -> Option<&dyn Feeder> {
        Some(self)
    }
}

impl Feeder for FeederPlugin {
    fn plugin_feeder(&self) -> FeederFn {
        let plugs = self.plugins.clone();
        Arc::new(move || plugs.clone())
    }
}

/// A needer that stores the feeder it receives.
#[derive(Default)]
pub struct NeederPlugin {
    feeder: Mutex<Option<FeederFn>>,
}

impl NeederPlugin {
    /// The collection the stored feeder yields, if one was received.
    pub fn fed(&self) -> Option<Plugins> {
        let guard = self.feeder.lock().ok()?;
        guard.as_ref().map(|f| f())
    }
}

impl Plugin for NeederPlugin {
    fn plugin_name(&self) -> String {
        self.type_label().to_string()
    }

    fn as_needer(&self) -> Option<&dyn Needer> {
        Some(self)
    }
}

impl Needer for NeederPlugin {
    fn with_plugins(&self, feeder: FeederFn) -> Result<(), BoxError> {
        let mut guard = self.feeder.lock().map_err(|_| "poisoned feeder lock")?;
        *guard = Some(feeder);
        Ok(())
    }
}

/// A filesystem receiver and provider.
#[derive(Default)]
pub struct FsPlugin {
    fs: Mutex<Option<FsRef>>,
}

impl Plugin for FsPlugin {
    fn plugin_name(&self) -> String {
        self.type_label().to_string()
    }

    fn as_fs_receiver(&self) -> Option<&dyn FsReceiver> {
        Some(self)
    }

    fn as_fs_provider(&self) -> Option<&dyn FsProvider> {
        Some(self)
    }
}

impl FsReceiver for FsPlugin {
    fn set_file_system(&self, fs: FsRef) -> Result<(), BoxError> {
        let mut guard = self.fs.lock().map_err(|_| "poisoned fs lock")?;
        *guard = Some(fs);
        Ok(())
    }
}

impl FsProvider for FsPlugin {
    fn file_system(&self) -> crate::error::Result<FsRef> {
        let guard = self.fs.lock().map_err(|_| PlugsetError::NoFileSystem)?;
        guard.clone().ok_or(PlugsetError::NoFileSystem)
    }
}

/// An I/O receiver and provider.
#[derive(Default)]
pub struct IoPlugin {
    io: Mutex<Io>,
}

impl Plugin for IoPlugin {
    fn plugin_name(&self) -> String {
        self.type_label().to_string()
    }

    fn as_io_receiver(&self) -> Option<&dyn IoReceiver> {
        Some(self)
    }

    fn as_io_provider(&self) -> Option<&dyn IoProvider> {
        Some(self)
    }
}

impl IoReceiver for IoPlugin {
    fn set_stdio(&self, io: Io) -> Result<(), BoxError> {
        let mut guard = self.io.lock().map_err(|_| "poisoned io lock")?;
        *guard = io;
        Ok(())
    }
}

impl IoProvider for IoPlugin {
    fn stdio(&self) -> Io {
        match self.io.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => Io::default(),
        }
    }
}

/// A plugin chaining the needer, feeder, and scoper capabilities through a
/// stored feeder: whatever collection it is fed, it scopes to.
#[derive(Default)]
pub struct Manager {
    feeder: RwLock<Option<FeederFn>>,
}

impl Plugin for Manager {
    fn plugin_name(&self) -> String {
        self.type_label().to_string()
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

impl Needer for Manager {
    fn with_plugins(&self, feeder: FeederFn) -> Result<(), BoxError> {
        let mut guard = self.feeder.write().map_err(|_| "poisoned feeder lock")?;
        *guard = Some(feeder);
        Ok(())
    }
}

impl Feeder for Manager {
    fn plugin_feeder(&self) -> FeederFn {
        let stored = match self.feeder.read() {
            Ok(guard) => guard.clone(),
            Err(_) => None,
        };

        match stored {
            Some(f) => f,
            None => Arc::new(Plugins::default),
        }
    }
}

impl Scoper for Manager {
    fn scoped_plugins(&self) -> Plugins {
        (self.plugin_feeder())()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::PluginRef;

    #[test]
    fn test_simple_name_carries_index() {
        let p = Simple(42);
        let name = p.plugin_name();
        assert!(name.contains("Simple"));
        assert!(name.ends_with("(42)"));
    }

    #[test]
    fn test_string_plugin_name() {
        let p = StringPlugin::new("test");
        assert_eq!(p.plugin_name(), "test");
    }

    #[test]
    fn test_availability_answers() {
        assert!(Availability(true).plugin_available(Path::new("")));
        assert!(!Availability(false).plugin_available(Path::new("")));
    }

    #[test]
    fn test_rooted_availability_prefix_match() {
        let p = RootedAvailability("a/b/c/d.md".into());
        assert!(p.plugin_available(Path::new("a/b")));
        assert!(!p.plugin_available(Path::new("x/y")));
    }

    #[test]
    fn test_feeder_plugin_yields_stored_collection() {
        let plugs: Plugins = vec![
            Arc::new(Simple(1)) as PluginRef,
            Arc::new(Simple(2)) as PluginRef,
        ]
        .into();

        let feeder = FeederPlugin {
            plugins: plugs.clone(),
        };
        let fed = (feeder.plugin_feeder())();
        assert_eq!(fed.names(), plugs.names());
    }

    #[test]
    fn test_needer_plugin_stores_feeder() {
        let needer = NeederPlugin::default();
        assert!(needer.fed().is_none());

        let plugs: Plugins = vec![Arc::new(Simple(1)) as PluginRef].into();
        needer.with_plugins(plugs.plugin_feeder()).expect("store");

        let fed = needer.fed().expect("fed");
        assert_eq!(fed.names(), plugs.names());
    }

    #[test]
    fn test_fs_plugin_unconfigured_reports_no_filesystem() {
        let p = FsPlugin::default();
        let err = p.file_system().expect_err("unconfigured");
        assert!(matches!(err, PlugsetError::NoFileSystem));
    }

    #[test]
    fn test_manager_unfed_feeder_yields_empty_collection() {
        let manager = Manager::default();
        let fed = (manager.plugin_feeder())();
        assert!(fed.is_empty());
    }

    #[test]
    fn test_manager_scopes_to_fed_collection() {
        let manager = Manager::default();
        assert!(manager.scoped_plugins().is_empty());

        let plugs: Plugins = vec![
            Arc::new(Simple(1)) as PluginRef,
            Arc::new(Simple(2)) as PluginRef,
        ]
        .into();

        manager.with_plugins(plugs.plugin_feeder()).expect("feed");
        assert_eq!(manager.scoped_plugins().names(), plugs.names());
    }
}
