//! External scraper program source
//!
//! Spawns a scraper program per query. The request is written to its stdin as
//! JSON and a JSON array of job rows is read back from stdout.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::job::RawJob;
use crate::{Error, Result};
use super::framework::{FetchRequest, JobSource};

/// Default scraper program name
pub const DEFAULT_SCRAPER_COMMAND: &str = "jobspy-scrape";

/// Source that delegates each search to an external program
#[derive(Debug, Clone)]
pub struct CommandSource {
    program: String,
    args: Vec<String>,
}

impl CommandSource {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Builder: extra arguments passed before the request is piped in
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for CommandSource {
    fn default() -> Self {
        Self::new(DEFAULT_SCRAPER_COMMAND)
    }
}

impl JobSource for CommandSource {
    fn name(&self) -> &str {
        &self.program
    }

    fn fetch(&self, request: &FetchRequest) -> Result<Vec<RawJob>> {
        let payload = serde_json::to_vec(request)
            .map_err(|e| Error::Source(format!("failed to encode request: {e}")))?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Source(format!("failed to start {}: {e}", self.program)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(&payload)
                .map_err(|e| Error::Source(format!("failed to write request: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| Error::Source(format!("{} did not finish: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Source(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| Error::Source(format!("malformed output from {}: {e}", self.program)))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn request() -> FetchRequest {
        FetchRequest {
            site_name: "indeed".into(),
            search_term: "rust".into(),
            google_search_term: None,
            location: Some("London".into()),
            country_indeed: Some("GB".into()),
            results_wanted: 20,
            hours_old: 24,
        }
    }

    fn shell(script: &str) -> CommandSource {
        CommandSource::new("sh").with_args(["-c", script])
    }

    #[test]
    fn test_parses_rows_from_stdout() {
        let source = shell(
            r#"cat > /dev/null; echo '[{"title":"Dev","company":"Acme","location":"NY","description":"x","job_url":"u"}]'"#,
        );
        let rows = source.fetch(&request()).unwrap();
        assert_eq!(rows, vec![RawJob::new("Dev", "Acme", "NY", "x")]);
    }

    #[test]
    fn test_request_reaches_stdin() {
        let source = shell(r#"grep -q '"location":"London"' && echo '[]'"#);
        assert!(source.fetch(&request()).unwrap().is_empty());
    }

    #[test]
    fn test_non_zero_exit_is_error() {
        let source = shell("cat > /dev/null; echo boom >&2; exit 3");
        let err = source.fetch(&request()).unwrap_err();
        assert!(matches!(err, Error::Source(ref msg) if msg.contains("boom")));
    }

    #[test]
    fn test_malformed_output_is_error() {
        let source = shell("cat > /dev/null; echo not-json");
        assert!(matches!(source.fetch(&request()), Err(Error::Source(_))));
    }

    #[test]
    fn test_missing_program_is_error() {
        let source = CommandSource::new("definitely-not-a-real-scraper-binary");
        assert!(matches!(source.fetch(&request()), Err(Error::Source(_))));
    }
}
