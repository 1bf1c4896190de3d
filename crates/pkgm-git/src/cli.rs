//! Git subprocess implementation of [`Vcs`]

use std::ffi::OsString;
use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use crate::{CloneOptions, Error, Result, Vcs, VcsOutput};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Runs the configured git binary as a child process.
///
/// Stdout and stderr share one anonymous temporary file, so the captured
/// output interleaves the two streams the way a terminal would show them.
#[derive(Debug, Clone)]
pub struct GitCli {
    bin: PathBuf,
    timeout: Option<Duration>,
}

impl GitCli {
    /// Create an adapter for the git executable at `bin`, without a deadline.
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self {
            bin: bin.into(),
            timeout: None,
        }
    }

    /// Kill any invocation still running after `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn bin(&self) -> &Path {
        &self.bin
    }

    fn run(&self, cwd: &Path, args: Vec<OsString>) -> Result<VcsOutput> {
        if !cwd.is_dir() {
            return Err(Error::WorkDirMissing {
                path: cwd.to_path_buf(),
            });
        }

        let command = describe(&self.bin, &args);
        tracing::debug!(command = %command, cwd = %cwd.display(), "running vcs command");

        let mut capture = tempfile::tempfile()?;
        let stdout = capture.try_clone()?;
        let stderr = capture.try_clone()?;

        let mut child = Command::new(&self.bin)
            .args(&args)
            .current_dir(cwd)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => Error::BinaryNotFound {
                    path: self.bin.clone(),
                },
                _ => Error::Spawn {
                    command: command.clone(),
                    source: e,
                },
            })?;

        let status = match self.timeout {
            Some(limit) => match wait_with_deadline(&mut child, limit)? {
                Some(status) => status,
                None => {
                    tracing::warn!(command = %command, after = ?limit, "vcs command timed out");
                    return Err(Error::TimedOut {
                        command,
                        after: limit,
                    });
                }
            },
            None => child.wait()?,
        };

        let output = read_capture(&mut capture)?;
        let exit_code = status.code().unwrap_or(-1);
        if exit_code != 0 {
            tracing::warn!(command = %command, exit_code, "vcs command failed");
        }

        Ok(VcsOutput { exit_code, output })
    }
}

impl Vcs for GitCli {
    fn clone_repo(
        &self,
        work_dir: &Path,
        source: &str,
        dest: &Path,
        options: &CloneOptions,
    ) -> Result<VcsOutput> {
        let mut args: Vec<OsString> = vec!["clone".into()];
        if let Some(branch) = &options.branch {
            args.push("--branch".into());
            args.push(branch.into());
        }
        if options.recursive {
            args.push("--recursive".into());
        }
        args.push("--".into());
        args.push(source.into());
        args.push(dest.as_os_str().to_owned());

        self.run(work_dir, args)
    }

    fn pull(&self, repo_dir: &Path) -> Result<VcsOutput> {
        self.run(repo_dir, vec!["pull".into()])
    }

    fn reset(&self, repo_dir: &Path, hard: bool) -> Result<VcsOutput> {
        let mut args: Vec<OsString> = vec!["reset".into()];
        if hard {
            args.push("--hard".into());
        }
        self.run(repo_dir, args)
    }
}

/// Poll `child` until it exits or `limit` elapses. On expiry the child is
/// killed and reaped and `None` is returned.
fn wait_with_deadline(child: &mut Child, limit: Duration) -> Result<Option<ExitStatus>> {
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }

        let elapsed = start.elapsed();
        if elapsed >= limit {
            if let Err(e) = child.kill() {
                tracing::debug!(error = %e, "kill after timeout failed, child already exited");
            }
            child.wait()?;
            return Ok(None);
        }

        std::thread::sleep(POLL_INTERVAL.min(limit - elapsed));
    }
}

fn read_capture(capture: &mut File) -> Result<String> {
    capture.seek(SeekFrom::Start(0))?;
    let mut bytes = Vec::new();
    capture.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn describe(bin: &Path, args: &[OsString]) -> String {
    let mut command = bin.display().to_string();
    for arg in args {
        command.push(' ');
        command.push_str(&arg.to_string_lossy());
    }
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_joins_args() {
        let args: Vec<OsString> = vec!["reset".into(), "--hard".into()];
        assert_eq!(describe(Path::new("/usr/bin/git"), &args), "/usr/bin/git reset --hard");
    }

    #[test]
    fn test_missing_work_dir_is_distinct_error() {
        let git = GitCli::new("git");
        let err = git.pull(Path::new("/nonexistent/pkgm/checkout")).unwrap_err();
        assert!(matches!(err, Error::WorkDirMissing { .. }), "got: {err:?}");
    }
}
