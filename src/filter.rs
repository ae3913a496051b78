//! Capability filtering and name lookup
//!
//! [`by_type`] is the primitive everything else is built on: given a
//! collection and a capability accessor, it selects the members that declare
//! that capability, preserving order and leaving the input untouched.
//!
//! [`background`] builds a name locator matching either a plugin's full name
//! or the final `/`-separated segment of its name, so namespaced plugins
//! (`group/tool`) stay addressable by their short name.

use tracing::debug;

use crate::collection::Plugins;
use crate::error::Result;
use crate::plugin::{Plugin, PluginRef};

/// Select the members of `plugs` that declare capability `C`.
///
/// `cast` is the capability accessor, e.g. `|p| p.as_io_receiver()`. The
/// result is a subsequence of the input in original relative order; the
/// input is not modified.
pub fn by_type<'a, C, F>(plugs: &'a [PluginRef], cast: F) -> Vec<&'a C>
where
    C: ?Sized,
    F: Fn(&'a dyn Plugin) -> Option<&'a C>,
{
    plugs.iter().filter_map(|p| cast(p.as_ref())).collect()
}

/// The final `/`-separated segment of a plugin name.
pub(crate) fn base_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Finds plugins within a collection.
pub trait Findable {
    fn find(&self, plugs: &Plugins) -> Result<Plugins>;
}

/// A function that can be used to find plugins. Implements [`Findable`].
pub struct FinderFn(Box<dyn Fn(&Plugins) -> Result<Plugins> + Send + Sync>);

impl FinderFn {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Plugins) -> Result<Plugins> + Send + Sync + 'static,
    {
        Self(Box::new(f))
    }
}

impl Findable for FinderFn {
    fn find(&self, plugs: &Plugins) -> Result<Plugins> {
        (self.0)(plugs)
    }
}

/// A finder that searches for plugins by logical name.
///
/// A plugin matches when its full name equals `name`, or when the last
/// path segment of its name equals `name`. A miss is an empty result, not
/// an error. When several differently-named plugins share a last segment,
/// all of them are returned in input order.
pub fn background(name: impl Into<String>) -> FinderFn {
    let name = name.into();

    FinderFn::new(move |plugs: &Plugins| {
        let mut res = Plugins::default();

        for p in plugs.iter() {
            let pname = p.plugin_name();
            if pname == name || base_name(&pname) == name {
                res.push(p.clone());
            }
        }

        debug!(name = %name, matches = res.len(), "located plugins by name");
        Ok(res)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugtest::{Availability, StringPlugin};
    use std::sync::Arc;

    fn named(names: &[&str]) -> Plugins {
        names
            .iter()
            .map(|n| Arc::new(StringPlugin::new(*n)) as PluginRef)
            .collect()
    }

    #[test]
    fn test_by_type_preserves_order_and_input() {
        let plugs: Plugins = vec![
            Arc::new(StringPlugin::new("a")) as PluginRef,
            Arc::new(Availability(true)) as PluginRef,
            Arc::new(StringPlugin::new("b")) as PluginRef,
            Arc::new(Availability(false)) as PluginRef,
        ]
        .into();

        let checkers = by_type(&plugs, |p| p.as_availability_checker());
        assert_eq!(checkers.len(), 2);

        // Input collection is untouched.
        assert_eq!(plugs.len(), 4);
        assert_eq!(plugs.names()[0], "a");
        assert_eq!(plugs.names()[2], "b");
    }

    #[test]
    fn test_by_type_empty_when_no_capability() {
        let plugs = named(&["a", "b"]);
        let receivers = by_type(&plugs, |p| p.as_io_receiver());
        assert!(receivers.is_empty());
    }

    #[test]
    fn test_background_matches_full_name() {
        let plugs = named(&["a", "b", "c", "x/y/z"]);

        let found = background("b").find(&plugs).expect("find");
        assert_eq!(found.names(), vec!["b".to_string()]);
    }

    #[test]
    fn test_background_matches_last_segment() {
        let plugs = named(&["a", "b", "c", "x/y/z"]);

        let found = background("z").find(&plugs).expect("find");
        assert_eq!(found.names(), vec!["x/y/z".to_string()]);

        let found = background("x/y/z").find(&plugs).expect("find");
        assert_eq!(found.names(), vec!["x/y/z".to_string()]);
    }

    #[test]
    fn test_background_miss_is_empty_not_error() {
        let plugs = named(&["a", "b"]);

        let found = background("nope").find(&plugs).expect("find");
        assert!(found.is_empty());
    }

    #[test]
    fn test_background_returns_all_segment_matches_in_order() {
        let plugs = named(&["one/tool", "two/tool", "other"]);

        let found = background("tool").find(&plugs).expect("find");
        assert_eq!(
            found.names(),
            vec!["one/tool".to_string(), "two/tool".to_string()]
        );
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("a/b/c"), "c");
        assert_eq!(base_name("plain"), "plain");
        assert_eq!(base_name(""), "");
    }
}
