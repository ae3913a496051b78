//! Usage printing for command plugins.
//!
//! [`print`] renders a help page for a plugin: description, invocation
//! header, type label, aliases, usage block, flags, available sub-commands,
//! and the plugins the main plugin scopes over.
//!
//! ```text
//! $ host
//! ------
//!
//! Available Commands:
//!     Command  Description
//!     -------  -----------
//!     fix      Attempt to fix the application
//!     info     Print diagnostic information
//! ```

use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::plugin::{Plugin, PluginRef};

use super::{cmd_label, Commander};

/// Render a usage page for `main` to `w`.
pub fn print(w: &mut dyn Write, main: &dyn Plugin) -> io::Result<()> {
    if let Some(desc) = main.description() {
        writeln!(w, "{desc}")?;
        writeln!(w)?;
    }

    let header = format!("$ {}", cmd_label(main));
    writeln!(w, "{header}")?;
    writeln!(w, "{}", "-".repeat(header.len()))?;
    writeln!(w, "{}", main.type_label())?;

    if let Some(cmd) = main.as_commander() {
        let aliases = cmd.aliases();
        if !aliases.is_empty() {
            writeln!(w, "\nAliases:")?;
            writeln!(w, "{}", aliases.join(", "))?;
        }

        if let Some(usage) = cmd.usage() {
            writeln!(w)?;
            writeln!(w, "{usage}")?;
        }

        if let Some(mut flags) = cmd.flags() {
            writeln!(w)?;
            write!(w, "{}", flags.render_help())?;
        }

        print_commands(w, cmd)?;
    }

    print_plugins(w, main)?;

    Ok(())
}

fn print_commands(w: &mut dyn Write, cmd: &dyn Commander) -> io::Result<()> {
    let mut subs = cmd.sub_commands();
    if subs.is_empty() {
        return Ok(());
    }
    subs.sort_by_name();

    writeln!(w, "\nAvailable Commands:")?;

    let rows: Vec<Vec<String>> = subs
        .iter()
        .map(|p| {
            vec![
                cmd_label(p.as_ref()),
                p.description().unwrap_or_default(),
            ]
        })
        .collect();

    write_table(w, &["Command", "Description"], &rows)
}

fn print_plugins(w: &mut dyn Write, main: &dyn Plugin) -> io::Result<()> {
    let Some(scoper) = main.as_scoper() else {
        return Ok(());
    };

    // Dedupe by name; BTreeMap keeps the listing sorted.
    let mut by_name: BTreeMap<String, PluginRef> = BTreeMap::new();
    for p in scoper.scoped_plugins() {
        by_name.insert(p.plugin_name(), p);
    }

    if by_name.is_empty() {
        return Ok(());
    }

    writeln!(w, "\nUsing Plugins:")?;

    let rows: Vec<Vec<String>> = by_name
        .values()
        .filter(|p| !p.hidden())
        .map(|p| {
            vec![
                p.plugin_name(),
                p.description().unwrap_or_default(),
                p.type_label().to_string(),
            ]
        })
        .collect();

    write_table(w, &["Name", "Description", "Type"], &rows)
}

fn write_table(w: &mut dyn Write, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    let mut all: Vec<Vec<String>> = Vec::with_capacity(rows.len() + 2);
    all.push(headers.iter().map(|h| h.to_string()).collect());
    all.push(headers.iter().map(|h| "-".repeat(h.len())).collect());
    all.extend(rows.iter().cloned());

    let mut widths = vec![0usize; headers.len()];
    for row in &all {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    for row in &all {
        write!(w, "\t")?;
        for (i, cell) in row.iter().enumerate() {
            if i + 1 == row.len() {
                write!(w, "{cell}")?;
            } else {
                write!(w, "{:<width$}  ", cell, width = widths[i])?;
            }
        }
        writeln!(w)?;
    }

    Ok(())
}
