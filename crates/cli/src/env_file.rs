use std::{collections::HashMap, io, path::PathBuf};

use {
    anyhow::Context,
    tracing::{debug, warn},
};

/// A `.env`-style file to read before injecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvFile {
    pub path: PathBuf,
    /// Named on the command line, so it must be readable.
    pub required: bool,
}

impl EnvFile {
    pub fn new(path: impl Into<PathBuf>, required: bool) -> Self {
        Self {
            path: path.into(),
            required,
        }
    }

    /// Parse the file into key/value pairs.
    ///
    /// Lines that fail to parse are logged and skipped; the lines after
    /// them still load. A later duplicate key replaces an earlier one.
    /// When the file is optional, an unreadable file yields no values.
    pub fn load(&self) -> anyhow::Result<HashMap<String, String>> {
        let mut vars = HashMap::new();

        let iter = match dotenvy::from_path_iter(&self.path) {
            Ok(iter) => iter,
            Err(e) => return self.unreadable(e).map(|()| vars),
        };

        for (index, item) in iter.enumerate() {
            match item {
                Ok((key, value)) => {
                    vars.insert(key, value);
                },
                Err(e @ dotenvy::Error::Io(_)) => {
                    // Reads keep failing once the stream errors; stop here.
                    self.unreadable(e)?;
                    break;
                },
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        entry = index + 1,
                        error = %e,
                        "skipping malformed env file line"
                    );
                },
            }
        }

        debug!(path = %self.path.display(), count = vars.len(), "loaded env file");
        Ok(vars)
    }

    fn unreadable(&self, err: dotenvy::Error) -> anyhow::Result<()> {
        if self.required {
            return Err(err)
                .with_context(|| format!("failed to read env file {}", self.path.display()));
        }
        match &err {
            dotenvy::Error::Io(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no env file, skipping");
            },
            _ => {
                warn!(path = %self.path.display(), error = %err, "cannot read env file, skipping");
            },
        }
        Ok(())
    }
}
