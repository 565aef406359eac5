use std::collections::HashMap;

/// Where placeholder values come from.
pub trait VarSource {
    /// Look up a variable. `None` means unset.
    fn get(&self, name: &str) -> Option<String>;
}

/// The current process environment.
///
/// Values that are not valid Unicode are treated as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl VarSource for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl VarSource for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

/// Looks up `primary` first and falls back to `fallback`.
///
/// Used to put `.env` values underneath the process environment.
#[derive(Debug, Clone, Default)]
pub struct Layered<P, F> {
    pub primary: P,
    pub fallback: F,
}

impl<P: VarSource, F: VarSource> Layered<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: VarSource, F: VarSource> VarSource for Layered<P, F> {
    fn get(&self, name: &str) -> Option<String> {
        self.primary.get(name).or_else(|| self.fallback.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_source_returns_values() {
        let mut vars = HashMap::new();
        vars.insert("A".to_string(), "1".to_string());
        assert_eq!(VarSource::get(&vars, "A").as_deref(), Some("1"));
        assert_eq!(VarSource::get(&vars, "B"), None);
    }

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn layered_prefers_primary() {
        let layered = Layered::new(map(&[("A", "top")]), map(&[("A", "bottom"), ("B", "b")]));
        assert_eq!(layered.get("A").as_deref(), Some("top"));
        assert_eq!(layered.get("B").as_deref(), Some("b"));
        assert_eq!(layered.get("C"), None);
    }

    #[test]
    fn layered_process_env_wins_over_fallback() {
        let layered = Layered::new(ProcessEnv, map(&[("PATH", "from-fallback")]));
        assert_ne!(layered.get("PATH").as_deref(), Some("from-fallback"));
    }

    #[test]
    fn process_env_misses_unknown_var() {
        assert_eq!(ProcessEnv.get("ENVSTAMP_NONEXISTENT_XYZ"), None);
    }

    #[test]
    fn process_env_sees_path() {
        // PATH is present in any environment the test runner uses.
        assert!(ProcessEnv.get("PATH").is_some());
    }
}
