//! Fetcher backed by the `git` executable.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::fetcher::{Fetcher, remove_partial};
use crate::{Error, FetchOperation, Result};

/// Runs `git clone --depth 1` and `git ls-remote --tags`.
///
/// Uses whatever credentials the user's git is configured with (credential
/// helpers, SSH agent). Interactive prompts are disabled so a missing
/// credential fails fast instead of hanging.
#[derive(Debug, Clone)]
pub struct GitCliFetcher {
    program: PathBuf,
}

impl GitCliFetcher {
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("git"),
        }
    }

    /// Use a specific git executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        cmd
    }

    fn run(
        &self,
        mut cmd: Command,
        operation: FetchOperation,
        url: &str,
        reference: Option<&str>,
    ) -> Result<Output> {
        tracing::debug!(command = ?cmd, "Running git");
        let output = cmd
            .output()
            .map_err(|e| Error::fetch(operation, url, reference, format!("failed to run git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::fetch(operation, url, reference, stderr.trim()));
        }
        Ok(output)
    }
}

impl Default for GitCliFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for GitCliFetcher {
    fn clone_into(&self, url: &str, reference: Option<&str>, dest: &Path) -> Result<()> {
        let mut cmd = self.command();
        cmd.args(["clone", "--quiet", "--depth", "1"]);
        if let Some(reference) = reference {
            cmd.args(["--branch", reference]);
        }
        // `--` keeps a locator starting with '-' from being read as an option
        cmd.arg("--").arg(url).arg(dest);

        match self.run(cmd, FetchOperation::Clone, url, reference) {
            Ok(_) => Ok(()),
            Err(e) => {
                remove_partial(dest);
                Err(e)
            }
        }
    }

    fn list_tags(&self, url: &str) -> Result<Vec<String>> {
        let mut cmd = self.command();
        cmd.args(["ls-remote", "--tags", "--", url]);

        let output = self.run(cmd, FetchOperation::ListTags, url, None)?;
        let tags = parse_ls_remote(&String::from_utf8_lossy(&output.stdout));
        tracing::debug!(url = %url, count = tags.len(), "Listed remote tags");
        Ok(tags)
    }
}

/// Extract ref names from `git ls-remote` output (`<oid>\t<ref>` per line).
fn parse_ls_remote(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| line.split_once('\t'))
        .map(|(_, name)| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}
