//! Error types for Plugset
//!
//! Two kinds of failure exist in the dispatch engine. Precondition failures
//! (empty collection, empty or duplicate names) are reported synchronously
//! through [`PlugsetError`] before any plugin is invoked. Failures returned
//! by a plugin's capability implementation are wrapped in a [`PluginError`]
//! that attributes the failure to the offending plugin while preserving the
//! underlying cause for chain inspection.

use std::error::Error as StdError;

use thiserror::Error;

use crate::plugin::Plugin;

/// A boxed error returned by plugin capability implementations.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// A specialized `Result` type for Plugset operations.
pub type Result<T> = std::result::Result<T, PlugsetError>;

/// The primary error type for Plugset operations.
#[derive(Error, Debug)]
pub enum PlugsetError {
    /// Validation of an empty collection.
    #[error("no plugins provided")]
    NoPlugins,

    /// Validation found a plugin with an empty name at the given index.
    #[error("plugin at index {0} has empty name")]
    EmptyName(usize),

    /// Validation found a second plugin with an already-seen name.
    #[error("duplicate plugin name: {0}")]
    DuplicateName(String),

    /// A filesystem-providing plugin has no filesystem configured.
    #[error("no filesystem configured")]
    NoFileSystem,

    /// A capability invocation failed; attributed to the offending plugin.
    #[error(transparent)]
    Plugin(#[from] PluginError),
}

/// An error wrapped with the identity of the plugin that produced it.
///
/// Created only at the moment a capability invocation fails. The wrapper
/// renders as `<type-label> (<plugin-name>):` followed by the underlying
/// message, and exposes the cause through [`std::error::Error::source`] so
/// standard chain-walking applies.
#[derive(Error, Debug)]
#[error("{type_label} ({plugin}):\n\t{source}")]
pub struct PluginError {
    type_label: String,
    plugin: String,
    #[source]
    source: BoxError,
}

impl PluginError {
    /// Wrap `err` with the identity of `plugin`.
    pub fn new<P>(plugin: &P, err: impl Into<BoxError>) -> Self
    where
        P: Plugin + ?Sized,
    {
        Self {
            type_label: plugin.type_label().to_string(),
            plugin: plugin.plugin_name(),
            source: err.into(),
        }
    }

    /// The name of the plugin that produced the error.
    pub fn plugin_name(&self) -> &str {
        &self.plugin
    }

    /// The type-derived diagnostic label of the offending plugin.
    pub fn type_label(&self) -> &str {
        &self.type_label
    }

    /// The underlying cause.
    pub fn cause(&self) -> &(dyn StdError + 'static) {
        self.source.as_ref()
    }

    /// Consume the wrapper and return the underlying cause.
    pub fn into_cause(self) -> BoxError {
        self.source
    }

    /// Walk `err` and its source chain looking for a `PluginError`.
    ///
    /// Returns the first wrapper found, starting with `err` itself. This is
    /// how outer callers recover the plugin attribution from an error that
    /// has passed through other layers.
    pub fn find_in<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a PluginError> {
        let mut current: Option<&(dyn StdError + 'static)> = Some(err);
        while let Some(e) = current {
            if let Some(pe) = e.downcast_ref::<PluginError>() {
                return Some(pe);
            }
            current = e.source();
        }
        None
    }

    /// Report whether `err` or anything in its source chain is a
    /// plugin-attributed error.
    pub fn is_in(err: &(dyn StdError + 'static)) -> bool {
        Self::find_in(err).is_some()
    }

    /// Look for a typed cause of type `E` in this wrapper's source chain.
    ///
    /// Delegates through the wrapper so callers can extract a deeper typed
    /// cause without unwrapping manually.
    pub fn downcast_cause<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        let mut current: Option<&(dyn StdError + 'static)> = Some(self.cause());
        while let Some(e) = current {
            if let Some(typed) = e.downcast_ref::<E>() {
                return Some(typed);
            }
            current = e.source();
        }
        None
    }
}
