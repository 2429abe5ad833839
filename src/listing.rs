//! Obtains the flat listing of a remote. The [`Lister`] trait is the seam
//! between the site builder and the outside world; [`SvnLister`] implements it
//! by running `svn ls -R`.

use log::{debug, error, info};
use std::fmt;
use std::io;
use std::process::{Command, Stdio};

/// Credentials passed through to the listing command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    /// Returns true if neither a username nor a password is set.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

/// Produces the flat listing for a remote URL: one path per line, directories
/// carrying a trailing separator.
pub trait Lister {
    fn list(&self, url: &str, credentials: &Credentials) -> Result<Vec<String>>;
}

/// Lists remotes by invoking the Subversion command line client.
pub struct SvnLister {
    /// The `svn` executable to run.
    pub executable: String,
}

impl Default for SvnLister {
    fn default() -> Self {
        SvnLister {
            executable: String::from("svn"),
        }
    }
}

impl SvnLister {
    pub fn new<S: Into<String>>(executable: S) -> SvnLister {
        SvnLister {
            executable: executable.into(),
        }
    }
}

/// Builds the argument list for a recursive listing of `url`. Credential flags
/// are only present when the corresponding credential is set.
pub fn arguments(url: &str, credentials: &Credentials) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "ls".to_owned(),
        "-R".to_owned(),
        "--non-interactive".to_owned(),
        url.to_owned(),
    ];
    if let Some(username) = &credentials.username {
        args.push("--username".to_owned());
        args.push(username.clone());
    }
    if let Some(password) = &credentials.password {
        args.push("--password".to_owned());
        args.push(password.clone());
    }
    args
}

impl Lister for SvnLister {
    fn list(&self, url: &str, credentials: &Credentials) -> Result<Vec<String>> {
        info!("Listing url: {}", url);
        let args = arguments(url, credentials);
        debug!(
            "Running `{} ls -R {}` (credentials: {})",
            self.executable,
            url,
            match credentials.is_empty() {
                true => "none",
                false => "provided",
            }
        );

        let output = Command::new(&self.executable)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|err| Error::Spawn {
                command: self.executable.clone(),
                err,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            error!("{}", stderr.trim_end());
            return Err(Error::Stderr(stderr.trim_end().to_owned()));
        }
        if !output.status.success() {
            return Err(Error::Status(output.status.code()));
        }

        let lines = parse_lines(&output.stdout);
        if lines.is_empty() {
            return Err(Error::Empty);
        }
        debug!("Listed {} paths under {}", lines.len(), url);
        Ok(lines)
    }
}

// Decodes the command output and splits it into lines, tolerating `\r\n`.
fn parse_lines(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(str::to_owned)
        .collect()
}

/// The result of a listing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a failed listing.
#[derive(Debug)]
pub enum Error {
    /// The listing command could not be started.
    Spawn { command: String, err: io::Error },

    /// The listing command wrote to stderr.
    Stderr(String),

    /// The listing command exited unsuccessfully without writing to stderr.
    Status(Option<i32>),

    /// The listing command produced no paths.
    Empty,
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Spawn { command, err } => write!(f, "Running `{}`: {}", command, err),
            Error::Stderr(stderr) => write!(f, "Listing command failed: {}", stderr),
            Error::Status(Some(code)) => write!(f, "Listing command exited with status {}", code),
            Error::Status(None) => write!(f, "Listing command was terminated by a signal"),
            Error::Empty => write!(f, "Listing command returned no paths"),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Spawn { command: _, err } => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_arguments_without_credentials() {
        assert_eq!(
            arguments("svn://example.org/repo", &Credentials::default()),
            vec!["ls", "-R", "--non-interactive", "svn://example.org/repo"]
        );
    }

    #[test]
    fn test_arguments_with_credentials() {
        let credentials = Credentials {
            username: Some("alice".to_owned()),
            password: Some("s3cret".to_owned()),
        };
        assert_eq!(
            arguments("https://example.org/svn", &credentials),
            vec![
                "ls",
                "-R",
                "--non-interactive",
                "https://example.org/svn",
                "--username",
                "alice",
                "--password",
                "s3cret",
            ]
        );
    }

    #[test]
    fn test_arguments_with_username_only() {
        let credentials = Credentials {
            username: Some("bob".to_owned()),
            password: None,
        };
        let args = arguments("file:///repo", &credentials);
        assert!(args.contains(&"--username".to_owned()));
        assert!(!args.contains(&"--password".to_owned()));
    }

    #[test]
    fn test_parse_lines() {
        assert_eq!(
            parse_lines(b"trunk/\r\ntrunk/a.txt\nbranches/\n"),
            vec!["trunk/", "trunk/a.txt", "branches/"]
        );
        assert!(parse_lines(b"").is_empty());
    }

    #[test]
    fn test_missing_executable_is_a_spawn_error() {
        let lister = SvnLister::new("svnquest-definitely-not-installed");
        match lister.list("svn://example.org/repo", &Credentials::default()) {
            Err(Error::Spawn { command, .. }) => {
                assert_eq!(command, "svnquest-definitely-not-installed")
            }
            other => panic!("expected spawn error, got {:?}", other),
        }
    }

    // The tests below stand standard Unix tools in for `svn`. The listing
    // arguments are passed to each of them unchanged.

    #[cfg(unix)]
    #[test]
    fn test_stdout_lines_are_returned() -> Result<()> {
        let lines = SvnLister::new("echo").list("svn://example.org/repo", &Credentials::default())?;
        assert_eq!(lines, vec!["ls -R --non-interactive svn://example.org/repo"]);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_stderr_output_is_a_failure() {
        // `sh` tries to run a script named `ls` and complains on stderr.
        match SvnLister::new("sh").list("svn://example.org/repo", &Credentials::default()) {
            Err(Error::Stderr(msg)) => assert!(!msg.is_empty()),
            other => panic!("expected stderr error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_no_output_is_a_failure() {
        match SvnLister::new("true").list("svn://example.org/repo", &Credentials::default()) {
            Err(Error::Empty) => {}
            other => panic!("expected empty error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_unsuccessful_exit_is_a_failure() {
        match SvnLister::new("false").list("svn://example.org/repo", &Credentials::default()) {
            Err(Error::Status(Some(code))) => assert_ne!(code, 0),
            other => panic!("expected status error, got {:?}", other),
        }
    }
}
