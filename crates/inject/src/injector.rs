use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use crate::{
    error::{InjectError, Result},
    placeholder::{placeholder, substitute_first},
    policy::MissingPolicy,
    source::{ProcessEnv, VarSource},
};

/// Variable injected by default, as consumed by the web app's Maps loader.
pub const DEFAULT_VARIABLE: &str = "GOOGLE_MAPS_API_KEY";

/// File rewritten by default, relative to the working directory.
pub const DEFAULT_TARGET: &str = "web/environment.js";

/// Text written for an unset variable under [`MissingPolicy::Undefined`].
pub const UNDEFINED_TEXT: &str = "undefined";

/// One file and the variables whose placeholders it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub path: PathBuf,
    /// Applied in order; each replaces the first occurrence of its own token.
    pub variables: Vec<String>,
}

impl Target {
    pub fn new(path: impl Into<PathBuf>, variables: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            path: path.into(),
            variables: variables.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for Target {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET, [DEFAULT_VARIABLE])
    }
}

/// Outcome of rendering or injecting one target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjectReport {
    pub path: PathBuf,
    /// Variables whose placeholder was found and substituted.
    pub replaced: Vec<String>,
    /// Variables whose placeholder did not appear in the file.
    pub absent: Vec<String>,
    /// Variables that were unset in the source.
    pub unset: Vec<String>,
    /// Resulting file content.
    pub content: String,
    /// `false` for dry runs.
    pub written: bool,
}

impl InjectReport {
    pub fn changed(&self) -> bool {
        !self.replaced.is_empty()
    }
}

/// Apply every variable of `variables` to `content`.
///
/// This is the in-memory step of [`Injector::inject`]. `path` only feeds
/// error messages and the report.
pub fn render(
    path: &Path,
    content: &str,
    variables: &[String],
    source: &dyn VarSource,
    policy: MissingPolicy,
) -> Result<InjectReport> {
    let mut report = InjectReport {
        path: path.to_path_buf(),
        content: content.to_owned(),
        ..Default::default()
    };

    for name in variables {
        let value = match source.get(name) {
            Some(value) => value,
            None => {
                warn!(
                    variable = %name,
                    path = %path.display(),
                    policy = %policy,
                    "environment variable is not set"
                );
                report.unset.push(name.clone());
                match policy {
                    MissingPolicy::Undefined => UNDEFINED_TEXT.to_owned(),
                    MissingPolicy::Empty => String::new(),
                    MissingPolicy::Keep => placeholder(name),
                    MissingPolicy::Error => {
                        return Err(InjectError::MissingVariable {
                            name: name.clone(),
                            path: path.to_path_buf(),
                        });
                    },
                }
            },
        };

        let (next, found) = substitute_first(&report.content, name, &value);
        if found {
            debug!(variable = %name, path = %path.display(), "placeholder substituted");
            report.replaced.push(name.clone());
            report.content = next;
        } else {
            debug!(variable = %name, path = %path.display(), "placeholder not present");
            report.absent.push(name.clone());
        }
    }

    Ok(report)
}

/// Rewrites target files in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct Injector {
    pub policy: MissingPolicy,
    /// Render without writing.
    pub dry_run: bool,
}

impl Injector {
    pub fn new(policy: MissingPolicy) -> Self {
        Self {
            policy,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Read `target.path`, substitute its placeholders and overwrite it.
    ///
    /// The file is always rewritten, even when no placeholder matched.
    /// Nothing is written if reading or rendering fails.
    pub fn inject(&self, target: &Target, source: &dyn VarSource) -> Result<InjectReport> {
        let path = target.path.as_path();
        let content = fs::read_to_string(path).map_err(|source| InjectError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut report = render(path, &content, &target.variables, source, self.policy)?;

        if self.dry_run {
            debug!(path = %path.display(), "dry run, not writing");
            return Ok(report);
        }

        fs::write(path, &report.content).map_err(|source| InjectError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        report.written = true;

        info!(
            path = %path.display(),
            replaced = report.replaced.len(),
            absent = report.absent.len(),
            unset = report.unset.len(),
            "target rewritten"
        );
        Ok(report)
    }
}

/// Replace the first `%variable%` in `path` with the process environment
/// value of `variable`, writing `undefined` when it is unset.
pub fn inject(path: impl AsRef<Path>, variable: &str) -> Result<()> {
    let target = Target::new(path.as_ref(), [variable]);
    Injector::default().inject(&target, &ProcessEnv)?;
    Ok(())
}
