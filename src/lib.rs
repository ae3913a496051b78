//! Plugset - capability-based plugin composition for Rust applications
//!
//! The core concept revolves around the [`Plugin`] trait, which provides a
//! name for identification. Optional capability traits like [`Needer`],
//! [`Feeder`], [`AvailabilityChecker`], [`IoReceiver`], and [`FsReceiver`]
//! extend functionality; a plugin declares the capabilities it supports by
//! overriding the matching `as_*` accessors.
//!
//! # Basic Usage
//!
//! Create plugins by implementing [`Plugin`] and any capability traits:
//!
//! ```rust
//! use std::sync::Arc;
//! use plugset::{Plugins, Plugin, PluginRef};
//!
//! struct MyPlugin {
//!     name: String,
//! }
//!
//! impl Plugin for MyPlugin {
//!     fn plugin_name(&self) -> String {
//!         self.name.clone()
//!     }
//! }
//!
//! let plugs: Plugins = vec![
//!     Arc::new(MyPlugin { name: "plugin1".into() }) as PluginRef,
//!     Arc::new(MyPlugin { name: "plugin2".into() }) as PluginRef,
//! ]
//! .into();
//!
//! // Validate collection-wide invariants
//! plugs.validate().unwrap();
//!
//! // Check availability at a root path
//! let available = plugs.available(std::path::Path::new("/some/path"));
//!
//! // Configure I/O for every member that receives it
//! plugs.set_stdio(plugset::Io::default()).unwrap();
//! ```
//!
//! # Architecture
//!
//! - **plugin**: The [`Plugin`] trait and the optional capability traits
//! - **filter**: Generic capability filtering ([`by_type`]) and name lookup
//!   ([`background`])
//! - **collection**: The [`Plugins`] collection and its broadcast engine
//! - **error**: Precondition errors and plugin-attributed error wrapping
//! - **io** / **fsys**: The stream triple and filesystem handle plugins
//!   receive
//! - **cmd**: CLI command capabilities built on top of the engine
//! - **plugtest**: Ready-made plugin doubles for test suites
//!
//! Broadcast operations are fail-fast: configuration is all-or-nothing, so
//! the first failing plugin aborts the broadcast and the returned error
//! names it.

pub mod cmd;
pub mod collection;
pub mod error;
pub mod filter;
pub mod fsys;
pub mod io;
pub mod plugin;
pub mod plugtest;

pub use collection::Plugins;
pub use error::{BoxError, PluginError, PlugsetError, Result};
pub use filter::{background, by_type, Findable, FinderFn};
pub use fsys::{FileSystem, FsRef, MemoryFileSystem, OsFileSystem};
pub use io::{stderr_of, stdout_of, Io, MultiWriter, SharedReader, SharedWriter};
pub use plugin::{
    AvailabilityChecker, Feeder, FeederFn, FsProvider, FsReceiver, IoProvider, IoReceiver, Needer,
    Plugin, PluginRef, Scoper,
};
