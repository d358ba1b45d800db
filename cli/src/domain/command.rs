//! Structured remote commands.
//!
//! Commands are built from typed words and rendered to a single shell line
//! only at the edge, so no caller ever formats user input into shell syntax.

use std::fmt;

/// A single shell word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Word {
    /// Literal argument, quoted when it contains anything outside the safe set.
    Arg(String),
    /// Path that may start with `~/`; the prefix stays unquoted so the remote
    /// shell expands it.
    Path(String),
    /// Every entry of a directory (`<dir>/*`); the `*` stays unquoted.
    DirEntries(String),
}

impl Word {
    /// Render this word as it must appear on a POSIX shell command line.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Arg(s) => quote(s),
            Self::Path(p) => render_path(p),
            Self::DirEntries(dir) => format!("{}/*", render_path(dir.trim_end_matches('/'))),
        }
    }
}

impl From<&str> for Word {
    fn from(s: &str) -> Self {
        Self::Arg(s.to_string())
    }
}

impl From<String> for Word {
    fn from(s: String) -> Self {
        Self::Arg(s)
    }
}

fn render_path(path: &str) -> String {
    if path == "~" {
        return "~".to_string();
    }
    match path.strip_prefix("~/") {
        Some("") => "~/".to_string(),
        Some(rest) => format!("~/{}", quote(rest)),
        None => quote(path),
    }
}

fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_-./=:,@+%".contains(c)
}

/// Quote `s` for a POSIX shell. Safe words pass through untouched.
#[must_use]
pub fn quote(s: &str) -> String {
    if !s.is_empty() && s.chars().all(is_safe) {
        return s.to_string();
    }
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// A command to run on the remote host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCommand {
    /// Executable name.
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<Word>,
    /// Directory to `cd` into before running.
    pub cwd: Option<Word>,
    /// Run under `sudo`, answering the prompt with the session password.
    pub privileged: bool,
    /// Command receiving this command's stdout.
    pub pipe_to: Option<Box<RemoteCommand>>,
}

impl RemoteCommand {
    /// Start a command for `program`.
    #[must_use]
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
            cwd: None,
            privileged: false,
            pipe_to: None,
        }
    }

    /// Append a literal argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<Word>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several literal arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Word>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append a path argument (may be home-relative).
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.args.push(Word::Path(path.into()));
        self
    }

    /// Append a `<dir>/*` argument.
    #[must_use]
    pub fn dir_entries(mut self, dir: impl Into<String>) -> Self {
        self.args.push(Word::DirEntries(dir.into()));
        self
    }

    /// Run inside `dir`.
    #[must_use]
    pub fn in_dir(mut self, dir: impl Into<String>) -> Self {
        self.cwd = Some(Word::Path(dir.into()));
        self
    }

    /// Elevate with `sudo`.
    #[must_use]
    pub fn privileged(mut self) -> Self {
        self.privileged = true;
        self
    }

    /// Pipe stdout into `next`.
    #[must_use]
    pub fn pipe(mut self, next: RemoteCommand) -> Self {
        self.pipe_to = Some(Box::new(next));
        self
    }

    /// The command without directory or privilege decoration.
    #[must_use]
    pub fn display_line(&self) -> String {
        let mut line = self.program_line();
        if let Some(next) = &self.pipe_to {
            line.push_str(" | ");
            line.push_str(&next.display_line());
        }
        line
    }

    /// The full shell line sent to the remote host.
    ///
    /// Privileged commands read the password from stdin (`sudo -S`) with an
    /// empty prompt so nothing leaks into the streamed output.
    #[must_use]
    pub fn shell_line(&self) -> String {
        let mut line = String::new();
        if let Some(cwd) = &self.cwd {
            line.push_str("cd ");
            line.push_str(&cwd.render());
            line.push_str(" && ");
        }
        if self.privileged {
            line.push_str("sudo -S -p '' ");
        }
        line.push_str(&self.display_line());
        line
    }

    fn program_line(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(quote(&self.program));
        parts.extend(self.args.iter().map(Word::render));
        parts.join(" ")
    }

    /// Whether the full pipeline mentions `program` anywhere.
    #[must_use]
    pub fn runs(&self, program: &str) -> bool {
        self.program == program || self.pipe_to.as_ref().is_some_and(|p| p.runs(program))
    }
}

impl fmt::Display for RemoteCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.shell_line())
    }
}
