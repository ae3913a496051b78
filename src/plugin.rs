//! Core plugin contracts for Plugset
//!
//! This module defines the [`Plugin`] trait that every plugin implements,
//! plus the optional capability traits a plugin may additionally support:
//! receiving an I/O triple, receiving a filesystem handle, receiving or
//! exposing a dependency feeder, availability checking, and nested scoping.
//!
//! Capability membership is declared explicitly: a plugin that supports a
//! capability overrides the matching `as_*` accessor on [`Plugin`] to return
//! `Some(self)`. The dispatch engine never guesses — it only invokes
//! capabilities a plugin has declared.

use std::any::type_name;
use std::path::Path;
use std::sync::Arc;

use crate::cmd::Commander;
use crate::collection::Plugins;
use crate::error::BoxError;
use crate::fsys::FsRef;
use crate::io::Io;

/// A shared, clonable handle to a plugin stored in a collection.
pub type PluginRef = Arc<dyn Plugin>;

/// A zero-argument closure yielding the full sibling plugin collection.
///
/// Handed to [`Needer`] plugins so they can lazily pull the plugins they
/// depend on without the caller passing the collection directly. This
/// breaks the otherwise circular construction dependency between a
/// collection and its members.
pub type FeederFn = Arc<dyn Fn() -> Plugins + Send + Sync>;

/// The most basic contract a plugin can implement.
///
/// A plugin has exactly one mandatory attribute: a non-empty name used for
/// identity, lookup, and diagnostics. Everything else is optional capability,
/// declared by overriding the `as_*` accessors.
///
/// # Example
///
/// ```rust
/// use plugset::plugin::Plugin;
///
/// struct MyPlugin;
///
/// impl Plugin for MyPlugin {
///     fn plugin_name(&self) -> String {
///         "my-plugin".to_string()
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// The plugin's name. Must be non-empty; names may be namespaced with
    /// `/` separators (e.g. `"group/tool"`).
    fn plugin_name(&self) -> String;

    /// A diagnostic label derived from the concrete type and its defining
    /// module path. Disambiguates same-named plugin types from different
    /// modules in error messages and usage output.
    fn type_label(&self) -> &'static str {
        type_name::<Self>()
    }

    /// A short, single-line description used by usage printing.
    fn description(&self) -> Option<String> {
        None
    }

    /// Hidden plugins are skipped by usage printing.
    fn hidden(&self) -> bool {
        false
    }

    /// Declare the [`IoReceiver`] capability.
    fn as_io_receiver(&self) -> Option<&dyn IoReceiver> {
        None
    }

    /// Declare the [`IoProvider`] capability.
    fn as_io_provider(&self) -> Option<&dyn IoProvider> {
        None
    }

    /// Declare the [`FsReceiver`] capability.
    fn as_fs_receiver(&self) -> Option<&dyn FsReceiver> {
        None
    }

    /// Declare the [`FsProvider`] capability.
    fn as_fs_provider(&self) -> Option<&dyn FsProvider> {
        None
    }

    /// Declare the [`Needer`] capability.
    fn as_needer(&self) -> Option<&dyn Needer> {
        None
    }

    /// Declare the [`Feeder`] capability.
    fn as_feeder(&self) -> Option<&dyn Feeder> {
        None
    }

    /// Declare the [`AvailabilityChecker`] capability.
    fn as_availability_checker(&self) -> Option<&dyn AvailabilityChecker> {
        None
    }

    /// Declare the [`Scoper`] capability.
    fn as_scoper(&self) -> Option<&dyn Scoper> {
        None
    }

    /// Declare the [`Commander`] capability.
    fn as_commander(&self) -> Option<&dyn Commander> {
        None
    }
}

/// Receives the standard input, output, and error streams.
///
/// Implementations store the triple behind their own synchronization; the
/// dispatch engine does not guard the stored value.
pub trait IoReceiver: Plugin {
    fn set_stdio(&self, io: Io) -> Result<(), BoxError>;
}

/// Exposes the I/O triple a plugin currently holds.
pub trait IoProvider: Plugin {
    fn stdio(&self) -> Io;
}

/// Receives a filesystem handle.
pub trait FsReceiver: Plugin {
    fn set_file_system(&self, fs: FsRef) -> Result<(), BoxError>;
}

/// Exposes the filesystem handle a plugin currently holds.
///
/// Returns [`crate::error::PlugsetError::NoFileSystem`] when no handle has
/// been configured yet.
pub trait FsProvider: Plugin {
    fn file_system(&self) -> crate::error::Result<FsRef>;
}

/// Receives a [`FeederFn`] granting access to the sibling plugins.
///
/// The stored feeder must be guarded by the plugin's own synchronization if
/// the host invokes broadcasts from multiple threads.
pub trait Needer: Plugin {
    fn with_plugins(&self, feeder: FeederFn) -> Result<(), BoxError>;
}

/// Exposes a [`FeederFn`] that yields a plugin collection.
pub trait Feeder: Plugin {
    fn plugin_feeder(&self) -> FeederFn;
}

/// Reports whether a plugin is available for use at a given root path.
///
/// Plugins that do not implement this capability are treated as always
/// available.
pub trait AvailabilityChecker: Plugin {
    fn plugin_available(&self, root: &Path) -> bool;
}

/// Exposes a nested collection of plugins important to the implementor.
pub trait Scoper: Plugin {
    fn scoped_plugins(&self) -> Plugins;
}
