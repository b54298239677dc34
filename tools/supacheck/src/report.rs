//! Renders the human readable console transcript.
//!
//! Progress lines go to the output writer and failures go to the error writer,
//! mirroring stdout and stderr when run from the command line.

use std::io::{self, Stderr, Stdout, Write};

use crate::config::{CREDENTIAL_VAR, DEFAULT_ENV_FILE, ENDPOINT_VAR};

const RULE_WIDTH: usize = 50;
const TITLE: &str = "Supabase Connection Test";

/// Writes the transcript of a check.
#[derive(Debug)]
pub struct Transcript<O, E> {
    out: O,
    err: E,
}

impl Transcript<Stdout, Stderr> {
    /// A transcript written to the process's stdout and stderr.
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Transcript<O, E> {
    /// A transcript written to the provided writers.
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Consume the transcript, returning the output and error writers.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    /// The title block printed at the start of every run.
    pub fn banner(&mut self) -> io::Result<()> {
        let rule = rule();
        writeln!(self.out, "{rule}")?;
        writeln!(self.out, "{TITLE}")?;
        writeln!(self.out, "{rule}")
    }

    /// Required values were absent.
    pub fn missing_config(&mut self) -> io::Result<()> {
        writeln!(self.err, "❌ ERROR: Missing environment variables")?;
        writeln!(
            self.err,
            "Please ensure {ENDPOINT_VAR} and {CREDENTIAL_VAR} are set in {DEFAULT_ENV_FILE} file"
        )
    }

    /// The endpoint about to be contacted.
    pub fn connecting(&mut self, endpoint: &str) -> io::Result<()> {
        writeln!(self.out, "\n📡 Connecting to: {endpoint}")
    }

    /// The client handle was built.
    pub fn client_created(&mut self) -> io::Result<()> {
        writeln!(self.out, "✅ Successfully created Supabase client")
    }

    /// The session lookup is about to be issued.
    pub fn probing(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n🔍 Testing API connectivity...")
    }

    /// The session lookup was answered.
    pub fn reachable(&mut self) -> io::Result<()> {
        writeln!(self.out, "✅ API is reachable and responding")
    }

    /// The closing block of a successful run.
    pub fn passed(&mut self) -> io::Result<()> {
        let rule = rule();
        writeln!(self.out, "\n{rule}")?;
        writeln!(self.out, "🎉 All tests passed! Supabase is ready to use.")?;
        writeln!(self.out, "{rule}")
    }

    /// The closing block of a failed run.
    pub fn failed(&mut self, error: &(dyn std::error::Error + 'static)) -> io::Result<()> {
        self.out.flush()?;
        writeln!(self.err, "\n❌ Connection failed: {}", render_chain(error))?;
        writeln!(self.err, "\nPlease check:")?;
        writeln!(self.err, "  1. Your internet connection")?;
        writeln!(self.err, "  2. The Supabase URL is correct")?;
        writeln!(self.err, "  3. The API key is valid")
    }
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Render an error and all of its sources on one line, separated by `: `.
pub fn render_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(err) = source {
        rendered.push_str(": ");
        rendered.push_str(&err.to_string());
        source = err.source();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("outer")]
    struct Outer(#[source] Inner);

    #[derive(Debug, thiserror::Error)]
    #[error("inner")]
    struct Inner;

    fn render(f: impl FnOnce(&mut Transcript<Vec<u8>, Vec<u8>>) -> io::Result<()>) -> (String, String) {
        let mut transcript = Transcript::new(Vec::new(), Vec::new());
        f(&mut transcript).expect("write transcript");
        let (out, err) = transcript.into_inner();
        (
            String::from_utf8(out).expect("utf8 output"),
            String::from_utf8(err).expect("utf8 error output"),
        )
    }

    #[test]
    fn renders_full_chain() {
        assert_eq!(render_chain(&Outer(Inner)), "outer: inner");
        assert_eq!(render_chain(&Inner), "inner");
    }

    #[test]
    fn banner_is_framed() {
        let (out, err) = render(|t| t.banner());
        let rule = "=".repeat(50);
        assert_eq!(out, format!("{rule}\nSupabase Connection Test\n{rule}\n"));
        assert!(err.is_empty());
    }

    #[test]
    fn failure_lists_hints() {
        let (out, err) = render(|t| t.failed(&Outer(Inner)));
        assert!(out.is_empty());
        assert!(err.contains("❌ Connection failed: outer: inner"));
        assert!(err.contains("  1. Your internet connection"));
        assert!(err.contains("  2. The Supabase URL is correct"));
        assert!(err.contains("  3. The API key is valid"));
    }

    #[test]
    fn endpoint_is_shown() {
        let (out, _) = render(|t| t.connecting("https://abc.supabase.co"));
        assert_eq!(out, "\n📡 Connecting to: https://abc.supabase.co\n");
    }
}
