use std::path::{Path, PathBuf};

use {anyhow::Context, tracing::debug};

use crate::schema::EnvstampConfig;

/// Standard config file names, checked in order.
pub const CONFIG_FILENAMES: &[&str] = &[
    "envstamp.toml",
    "envstamp.yaml",
    "envstamp.yml",
    "envstamp.json",
];

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> anyhow::Result<EnvstampConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_config(&raw, path).with_context(|| format!("failed to parse {}", path.display()))
}

/// Find the first config file in `dir`.
pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
}

/// Discover and load config from `dir`.
///
/// Returns `EnvstampConfig::default()` if no config file is found. A config
/// file that exists but cannot be parsed is an error.
pub fn discover_and_load(dir: &Path) -> anyhow::Result<EnvstampConfig> {
    match find_config_file(dir) {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            load_config(&path)
        },
        None => {
            debug!(dir = %dir.display(), "no config file found, using defaults");
            Ok(EnvstampConfig::default())
        },
    }
}

fn parse_config(raw: &str, path: &Path) -> anyhow::Result<EnvstampConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        _ => anyhow::bail!("unsupported config format: .{ext}"),
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use std::fs;

    use envstamp_inject::{MissingPolicy, Target};

    use super::*;

    #[test]
    fn defaults_when_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = discover_and_load(dir.path()).unwrap();
        assert_eq!(cfg, EnvstampConfig::default());
        assert_eq!(cfg.env_file, PathBuf::from(".env"));
        assert_eq!(cfg.missing, MissingPolicy::Undefined);
        assert_eq!(cfg.targets(), vec![Target::default()]);
    }

    #[test]
    fn loads_toml() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("envstamp.toml"),
            r#"
env_file = ".env.production"
missing = "error"

[[targets]]
path = "web/environment.js"
variables = ["GOOGLE_MAPS_API_KEY", "SENTRY_DSN"]

[[targets]]
path = "web/analytics.js"
variables = ["GA_ID"]
"#,
        )
        .unwrap();

        let cfg = discover_and_load(dir.path()).unwrap();
        assert_eq!(cfg.env_file, PathBuf::from(".env.production"));
        assert_eq!(cfg.missing, MissingPolicy::Error);
        assert_eq!(cfg.targets.len(), 2);
        assert_eq!(cfg.targets[0].variables, vec![
            "GOOGLE_MAPS_API_KEY".to_string(),
            "SENTRY_DSN".to_string()
        ]);
        assert_eq!(cfg.targets[1].path, PathBuf::from("web/analytics.js"));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("envstamp.toml"), "missing = \"empty\"\n").unwrap();

        let cfg = discover_and_load(dir.path()).unwrap();
        assert_eq!(cfg.missing, MissingPolicy::Empty);
        assert_eq!(cfg.env_file, PathBuf::from(".env"));
        assert_eq!(cfg.targets, vec![crate::TargetConfig::default()]);
    }

    #[test]
    fn loads_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("envstamp.yml");
        fs::write(&yaml, "targets:\n  - path: a.js\n    variables: [A]\n").unwrap();
        let cfg = load_config(&yaml).unwrap();
        assert_eq!(cfg.targets[0].path, PathBuf::from("a.js"));

        let json = dir.path().join("envstamp.json");
        fs::write(&json, r#"{"missing": "keep"}"#).unwrap();
        let cfg = load_config(&json).unwrap();
        assert_eq!(cfg.missing, MissingPolicy::Keep);
    }

    #[test]
    fn toml_takes_precedence() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("envstamp.json"), "{}").unwrap();
        fs::write(dir.path().join("envstamp.toml"), "").unwrap();
        assert_eq!(
            find_config_file(dir.path()),
            Some(dir.path().join("envstamp.toml"))
        );
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("envstamp.toml"), "missing = \"sometimes\"\n").unwrap();
        let err = discover_and_load(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse"), "{err:#}");
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("envstamp.ini");
        fs::write(&path, "").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("unsupported config format: .ini"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
