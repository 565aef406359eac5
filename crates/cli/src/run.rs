use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use {
    anyhow::Context,
    clap::Args,
    envstamp_config::{EnvstampConfig, discover_and_load, load_config},
    envstamp_inject::{Injector, Layered, MissingPolicy, ProcessEnv, Target},
    tracing::info,
};

use crate::env_file::EnvFile;

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// File to rewrite. Repeat for several files. Overrides the config targets.
    #[arg(short, long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Variable whose %NAME% placeholder is replaced. Repeatable.
    #[arg(short, long = "var", value_name = "NAME")]
    pub vars: Vec<String>,

    /// Env file merged into the process environment before injecting.
    #[arg(long, value_name = "PATH", conflicts_with = "no_env_file")]
    pub env_file: Option<PathBuf>,

    /// Do not load any env file.
    #[arg(long)]
    pub no_env_file: bool,

    /// Config file (envstamp.toml, .yaml, .yml or .json).
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// What to write for unset variables: undefined, empty, keep or error.
    #[arg(long, value_name = "POLICY", env = "ENVSTAMP_MISSING")]
    pub missing: Option<MissingPolicy>,

    /// Print the rewritten content to stdout instead of writing it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Everything needed to run, after merging flags over config.
#[derive(Debug, PartialEq, Eq)]
pub struct Plan {
    /// `None` when env loading is disabled.
    pub env_file: Option<EnvFile>,
    pub policy: MissingPolicy,
    pub targets: Vec<Target>,
    pub dry_run: bool,
}

/// Merge command line flags over the loaded config.
pub fn plan(args: &RunArgs, config: &EnvstampConfig) -> Plan {
    let env_file = if args.no_env_file {
        None
    } else {
        match &args.env_file {
            Some(path) => Some(EnvFile::new(path.clone(), true)),
            None => Some(EnvFile::new(config.env_file.clone(), false)),
        }
    };

    let mut targets = config.targets();
    if !args.files.is_empty() {
        let variables = match (args.vars.is_empty(), targets.first()) {
            (false, _) => args.vars.clone(),
            (true, Some(first)) => first.variables.clone(),
            (true, None) => Target::default().variables,
        };
        targets = args
            .files
            .iter()
            .map(|path| Target::new(path.clone(), variables.iter().cloned()))
            .collect();
    } else if !args.vars.is_empty() {
        for target in &mut targets {
            target.variables = args.vars.clone();
        }
    }

    Plan {
        env_file,
        policy: args.missing.unwrap_or(config.missing),
        targets,
        dry_run: args.dry_run,
    }
}

fn resolve_config(args: &RunArgs) -> anyhow::Result<EnvstampConfig> {
    match &args.config {
        Some(path) => load_config(path),
        None => discover_and_load(Path::new(".")),
    }
}

pub fn run(args: RunArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    let plan = plan(&args, &config);

    let dotenv = match &plan.env_file {
        Some(env_file) => env_file.load()?,
        None => HashMap::new(),
    };
    let source = Layered::new(ProcessEnv, dotenv);

    let injector = Injector::new(plan.policy).dry_run(plan.dry_run);
    let several = plan.targets.len() > 1;
    for target in &plan.targets {
        let report = injector
            .inject(target, &source)
            .with_context(|| format!("failed to inject into {}", target.path.display()))?;

        if plan.dry_run {
            print!("{}", dry_run_output(&report.path, &report.content, several));
        }
        info!(
            path = %report.path.display(),
            replaced = ?report.replaced,
            written = report.written,
            "done"
        );
    }
    Ok(())
}

/// Stdout text for a dry run. With several targets each file gets a
/// `==> path <==` header line.
fn dry_run_output(path: &Path, content: &str, header: bool) -> String {
    if header {
        format!("==> {} <==\n{content}\n", path.display())
    } else {
        content.to_owned()
    }
}
