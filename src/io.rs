//! I/O wiring for Plugset
//!
//! [`Io`] bundles the standard input, output, and error streams handed to
//! plugins during a "configure I/O" broadcast. Streams are shared handles so
//! one triple can be distributed to many plugins; each stream defaults to
//! the process's own when unset.
//!
//! [`MultiWriter`] plus the [`stdout_of`]/[`stderr_of`] helpers fan a single
//! write out to every plugin in a collection that exposes its streams.

use std::fmt;
use std::io::{self, Read, Write};
use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::collection::Plugins;
use crate::filter::by_type;

/// A shared, lockable reader handle.
pub type SharedReader = Arc<Mutex<dyn Read + Send>>;

/// A shared, lockable writer handle.
pub type SharedWriter = Arc<Mutex<dyn Write + Send>>;

/// The standard input, output, and error streams.
///
/// Cloning an `Io` clones the handles, not the streams: every clone writes
/// to the same destination. Unset streams fall back to the process streams
/// via [`Io::stdin`], [`Io::stdout`], and [`Io::stderr`].
#[derive(Clone, Default)]
pub struct Io {
    /// Standard input. `None` means the process's stdin.
    pub input: Option<SharedReader>,
    /// Standard output. `None` means the process's stdout.
    pub output: Option<SharedWriter>,
    /// Standard error. `None` means the process's stderr.
    pub error: Option<SharedWriter>,
}

impl Io {
    /// An `Io` with all three streams set.
    pub fn new(input: SharedReader, output: SharedWriter, error: SharedWriter) -> Self {
        Self {
            input: Some(input),
            output: Some(output),
            error: Some(error),
        }
    }

    /// An `Io` that reads nothing and discards all writes. Useful in tests
    /// and benchmarks.
    pub fn discard() -> Self {
        Self {
            input: Some(Arc::new(Mutex::new(io::empty()))),
            output: Some(Arc::new(Mutex::new(io::sink()))),
            error: Some(Arc::new(Mutex::new(io::sink()))),
        }
    }

    /// An `Io` whose output and error streams append to in-memory buffers.
    ///
    /// Returns the `Io` along with the output and error buffers for later
    /// inspection.
    pub fn capture() -> (Self, Arc<Mutex<Vec<u8>>>, Arc<Mutex<Vec<u8>>>) {
        let out: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
        let err: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
        let io = Self {
            input: Some(Arc::new(Mutex::new(io::empty()))),
            output: Some(out.clone() as SharedWriter),
            error: Some(err.clone() as SharedWriter),
        };
        (io, out, err)
    }

    /// The input stream, defaulting to the process's stdin.
    pub fn stdin(&self) -> SharedReader {
        match &self.input {
            Some(r) => r.clone(),
            None => Arc::new(Mutex::new(io::stdin())),
        }
    }

    /// The output stream, defaulting to the process's stdout.
    pub fn stdout(&self) -> SharedWriter {
        match &self.output {
            Some(w) => w.clone(),
            None => Arc::new(Mutex::new(io::stdout())),
        }
    }

    /// The error stream, defaulting to the process's stderr.
    pub fn stderr(&self) -> SharedWriter {
        match &self.error {
            Some(w) => w.clone(),
            None => Arc::new(Mutex::new(io::stderr())),
        }
    }
}

#[derive(Serialize)]
struct IoDescription {
    stdin: &'static str,
    stdout: &'static str,
    stderr: &'static str,
}

fn stream_label(set: bool) -> &'static str {
    if set {
        "set"
    } else {
        "process"
    }
}

impl fmt::Display for Io {
    /// Renders a JSON object describing which streams are set, e.g.
    /// `{"stdin": "process", "stdout": "set", "stderr": "set"}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let desc = IoDescription {
            stdin: stream_label(self.input.is_some()),
            stdout: stream_label(self.output.is_some()),
            stderr: stream_label(self.error.is_some()),
        };
        let rendered = serde_json::to_string_pretty(&desc).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

impl fmt::Debug for Io {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// A writer that duplicates every write to all of its targets.
pub struct MultiWriter {
    targets: Vec<SharedWriter>,
}

impl MultiWriter {
    pub fn new(targets: Vec<SharedWriter>) -> Self {
        Self { targets }
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }
}

impl Write for MultiWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for target in &self.targets {
            let mut w = target
                .lock()
                .map_err(|_| io::Error::new(io::ErrorKind::Other, "poisoned writer lock"))?;
            w.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        for target in &self.targets {
            let mut w = target
                .lock()
                .map_err(|_| io::Error::new(io::ErrorKind::Other, "poisoned writer lock"))?;
            w.flush()?;
        }
        Ok(())
    }
}

/// A writer fanning out to the stdout of every plugin in `plugs` that
/// exposes its streams. Falls back to the process's stdout when none do.
pub fn stdout_of(plugs: &Plugins) -> MultiWriter {
    let mut targets: Vec<SharedWriter> = by_type(plugs, |p| p.as_io_provider())
        .into_iter()
        .map(|p| p.stdio().stdout())
        .collect();

    if targets.is_empty() {
        targets.push(Arc::new(Mutex::new(io::stdout())));
    }

    MultiWriter::new(targets)
}

/// A writer fanning out to the stderr of every plugin in `plugs` that
/// exposes its streams. Falls back to the process's stderr when none do.
pub fn stderr_of(plugs: &Plugins) -> MultiWriter {
    let mut targets: Vec<SharedWriter> = by_type(plugs, |p| p.as_io_provider())
        .into_iter()
        .map(|p| p.stdio().stderr())
        .collect();

    if targets.is_empty() {
        targets.push(Arc::new(Mutex::new(io::stderr())));
    }

    MultiWriter::new(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_io_uses_process_streams() {
        let io = Io::default();
        assert!(io.input.is_none());
        assert!(io.output.is_none());
        assert!(io.error.is_none());
        // Accessors still hand out usable streams.
        let _ = io.stdin();
        let _ = io.stdout();
        let _ = io.stderr();
    }

    #[test]
    fn test_capture_collects_writes() {
        let (io, out, err) = Io::capture();

        {
            let stdout = io.stdout();
            let mut w = stdout.lock().expect("stdout lock");
            w.write_all(b"to out").expect("write out");
        }
        {
            let stderr = io.stderr();
            let mut w = stderr.lock().expect("stderr lock");
            w.write_all(b"to err").expect("write err");
        }

        assert_eq!(&*out.lock().expect("out lock"), b"to out");
        assert_eq!(&*err.lock().expect("err lock"), b"to err");
    }

    #[test]
    fn test_clones_share_streams() {
        let (io, out, _) = Io::capture();
        let cloned = io.clone();

        let stdout = cloned.stdout();
        let mut w = stdout.lock().expect("lock");
        w.write_all(b"shared").expect("write");
        drop(w);

        assert_eq!(&*out.lock().expect("out lock"), b"shared");
    }

    #[test]
    fn test_display_reports_stream_state() {
        let io = Io::default();
        let rendered = io.to_string();
        assert!(rendered.contains("\"stdin\": \"process\""));
        assert!(rendered.contains("\"stdout\": \"process\""));

        let (io, _, _) = Io::capture();
        let rendered = io.to_string();
        assert!(rendered.contains("\"stdout\": \"set\""));
        assert!(rendered.contains("\"stderr\": \"set\""));
    }

    #[test]
    fn test_multi_writer_duplicates_writes() {
        let a: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
        let b: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));

        let mut mw = MultiWriter::new(vec![a.clone() as SharedWriter, b.clone() as SharedWriter]);
        mw.write_all(b"fan out").expect("write");
        mw.flush().expect("flush");

        assert_eq!(&*a.lock().expect("a lock"), b"fan out");
        assert_eq!(&*b.lock().expect("b lock"), b"fan out");
    }

    #[test]
    fn test_discard_swallows_writes() {
        let io = Io::discard();
        let stdout = io.stdout();
        let mut w = stdout.lock().expect("lock");
        w.write_all(b"gone").expect("write");
    }

    #[test]
    fn test_stdout_of_fans_out_to_every_provider() {
        use crate::plugin::{IoReceiver, PluginRef};
        use crate::plugtest::{IoPlugin, StringPlugin};

        let a = Arc::new(IoPlugin::default());
        let b = Arc::new(IoPlugin::default());

        let (io_a, out_a, _) = Io::capture();
        let (io_b, out_b, _) = Io::capture();
        a.set_stdio(io_a).expect("set a");
        b.set_stdio(io_b).expect("set b");

        let plugs: Plugins = vec![
            Arc::new(StringPlugin::new("no-streams")) as PluginRef,
            a as PluginRef,
            b as PluginRef,
        ]
        .into();

        let mut w = stdout_of(&plugs);
        assert_eq!(w.len(), 2);
        w.write_all(b"fan").expect("write");

        assert_eq!(&*out_a.lock().expect("a lock"), b"fan");
        assert_eq!(&*out_b.lock().expect("b lock"), b"fan");
    }

    #[test]
    fn test_stderr_of_fans_out_to_every_provider() {
        use crate::plugin::{IoReceiver, PluginRef};
        use crate::plugtest::IoPlugin;

        let a = Arc::new(IoPlugin::default());
        let b = Arc::new(IoPlugin::default());

        let (io_a, _, err_a) = Io::capture();
        let (io_b, _, err_b) = Io::capture();
        a.set_stdio(io_a).expect("set a");
        b.set_stdio(io_b).expect("set b");

        let plugs: Plugins = vec![a as PluginRef, b as PluginRef].into();

        let mut w = stderr_of(&plugs);
        assert_eq!(w.len(), 2);
        w.write_all(b"oops").expect("write");

        assert_eq!(&*err_a.lock().expect("a lock"), b"oops");
        assert_eq!(&*err_b.lock().expect("b lock"), b"oops");
    }

    #[test]
    fn test_fan_out_falls_back_to_process_streams() {
        use crate::plugin::PluginRef;
        use crate::plugtest::StringPlugin;

        // No member exposes its streams, so the single target is the
        // process stream.
        let plugs: Plugins = vec![Arc::new(StringPlugin::new("plain")) as PluginRef].into();
        assert_eq!(stdout_of(&plugs).len(), 1);
        assert_eq!(stderr_of(&plugs).len(), 1);

        let empty = Plugins::default();
        assert_eq!(stdout_of(&empty).len(), 1);
        assert_eq!(stderr_of(&empty).len(), 1);
    }
}
