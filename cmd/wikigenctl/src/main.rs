mod starter;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pkg_constants::paths::{DEFAULT_CLUSTER_FILE, DEFAULT_CONFIG_FILE};
use pkg_generate::{ClusterProfile, DeploymentConfig, RenderedBundle};
use pkg_render::argocd::{self, ApplicationOptions};
use pkg_render::output::write_directory;
use pkg_types::bundle::Bundle;
use pkg_types::config::{load_config_file, read_config_file};
use pkg_types::meta::ObjectRef;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "wikigenctl",
    about = "Generate validated Kubernetes manifests for Wiki.js"
)]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the manifest bundle
    Generate {
        #[command(flatten)]
        input: InputArgs,

        /// Write one file per object here instead of streaming to stdout
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Build and validate without rendering
    Check {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// Generate several configs, each into <out-dir>/<namespace>/
    Batch {
        #[arg(required = true)]
        configs: Vec<String>,

        #[arg(long)]
        out_dir: PathBuf,

        #[command(flatten)]
        cluster: ClusterArgs,
    },
    /// Print an ArgoCD Application for the generated directory
    Argocd {
        /// Path to the deployment config
        #[arg(long, short, default_value = DEFAULT_CONFIG_FILE)]
        config: String,

        #[arg(long)]
        repo_url: String,

        /// Path inside the repository (defaults to the namespace)
        #[arg(long)]
        path: Option<String>,

        #[arg(long, default_value = argocd::DEFAULT_REVISION)]
        revision: String,

        #[arg(long, default_value = argocd::DEFAULT_PROJECT)]
        project: String,
    },
    /// Print a starter config
    Init,
}

#[derive(Args)]
struct InputArgs {
    /// Path to the deployment config
    #[arg(long, short, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    #[command(flatten)]
    cluster: ClusterArgs,
}

#[derive(Args)]
struct ClusterArgs {
    /// Cluster profile (returns defaults if file not found)
    #[arg(long, default_value = DEFAULT_CLUSTER_FILE)]
    cluster: String,

    /// Storage class known to exist in the cluster (repeatable)
    #[arg(long = "storage-class")]
    storage_classes: Vec<String>,

    /// Accept any storage class as provisioned outside the bundle
    #[arg(long = "assume-external-storage-class")]
    assume_external: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    objects: Vec<&'a ObjectRef>,
    externals: Vec<&'a ObjectRef>,
}

impl ClusterArgs {
    /// Merge: CLI args > cluster file > defaults
    fn profile(&self) -> anyhow::Result<ClusterProfile> {
        let mut profile: ClusterProfile = load_config_file(&self.cluster)
            .with_context(|| format!("failed to load cluster profile {}", self.cluster))?;
        for class in &self.storage_classes {
            if !profile.storage_classes.contains(class) {
                profile.storage_classes.push(class.clone());
            }
        }
        profile.assume_external |= self.assume_external;
        info!(
            "Cluster profile: storage classes [{}]{}",
            profile.storage_classes.join(", "),
            if profile.assume_external {
                ", assuming external"
            } else {
                ""
            }
        );
        Ok(profile)
    }
}

fn read_deployment(path: &str) -> anyhow::Result<DeploymentConfig> {
    let config: DeploymentConfig =
        read_config_file(path).with_context(|| format!("failed to read config {}", path))?;
    info!("Config file: {}", path);
    Ok(config)
}

fn print_table(bundle: &Bundle) {
    println!("{:<24} {:<16} {}", "KIND", "NAMESPACE", "NAME");
    for object in pkg_render::ordered(bundle) {
        println!(
            "{:<24} {:<16} {}",
            object.kind(),
            object.namespace().unwrap_or("-"),
            object.name()
        );
    }
    for external in &bundle.externals {
        println!(
            "{:<24} {:<16} {} (external)",
            external.kind,
            external.namespace.as_deref().unwrap_or("-"),
            external.name
        );
    }
}

fn emit(rendered: &RenderedBundle, out_dir: Option<&Path>) -> anyhow::Result<()> {
    match out_dir {
        Some(dir) => {
            write_directory(rendered, dir)?;
        }
        None => print!("{}", rendered.to_stream()),
    }
    Ok(())
}

async fn run_batch(configs: &[String], out_dir: &Path, profile: ClusterProfile) -> anyhow::Result<()> {
    let mut inputs = Vec::with_capacity(configs.len());
    let mut unreadable: BTreeMap<usize, anyhow::Error> = BTreeMap::new();
    let mut namespaces: BTreeMap<String, &str> = BTreeMap::new();
    for (index, path) in configs.iter().enumerate() {
        let config = match read_deployment(path) {
            Ok(config) => config,
            Err(e) => {
                unreadable.insert(index, e);
                continue;
            }
        };
        if let Some(other) = namespaces.insert(config.namespace.clone(), path) {
            bail!(
                "{} and {} both target namespace '{}'",
                other,
                path,
                config.namespace
            );
        }
        inputs.push((path.clone(), config));
    }
    let targets: Vec<PathBuf> = inputs
        .iter()
        .map(|(_, config)| out_dir.join(&config.namespace))
        .collect();

    let outcomes = pkg_generate::generate_batch(inputs, profile).await;
    let mut generated = outcomes.into_iter().zip(targets);
    let mut failed = 0;
    for (index, path) in configs.iter().enumerate() {
        let result = match unreadable.remove(&index) {
            Some(e) => Err(e),
            None => match generated.next() {
                Some((outcome, target)) => outcome
                    .result
                    .and_then(|rendered| write_directory(&rendered, &target).map(|_| rendered)),
                None => Err(anyhow!("{}: no generation result", path)),
            },
        };
        match result {
            Ok(rendered) => println!("{:<32} ok ({} objects)", path, rendered.len()),
            Err(e) => {
                failed += 1;
                error!("{:#}", e);
                println!("{:<32} FAILED", path);
            }
        }
    }
    if failed > 0 {
        bail!("{} of {} configs failed", failed, configs.len());
    }
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match &cli.command {
        Commands::Generate { input, out_dir } => {
            let config = read_deployment(&input.config)?;
            let profile = input.cluster.profile()?;
            let rendered = pkg_generate::generate(&config, &profile)
                .with_context(|| format!("failed to generate from {}", input.config))?;
            emit(&rendered, out_dir.as_deref())?;
        }
        Commands::Check { input, output } => {
            let config = read_deployment(&input.config)?;
            let profile = input.cluster.profile()?;
            let bundle = pkg_generate::check(&config, &profile)
                .with_context(|| format!("{} failed validation", input.config))?;
            match output {
                OutputFormat::Table => print_table(&bundle),
                OutputFormat::Json => {
                    let objects: Vec<ObjectRef> = pkg_render::ordered(&bundle)
                        .into_iter()
                        .map(|o| o.object_ref())
                        .collect();
                    let report = CheckReport {
                        objects: objects.iter().collect(),
                        externals: bundle.externals.iter().collect(),
                    };
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
            }
        }
        Commands::Batch {
            configs,
            out_dir,
            cluster,
        } => {
            let profile = cluster.profile()?;
            run_batch(configs, out_dir, profile).await?;
        }
        Commands::Argocd {
            config,
            repo_url,
            path,
            revision,
            project,
        } => {
            let config = read_deployment(config)?;
            let options = ApplicationOptions {
                repo_url: repo_url.clone(),
                path: path.clone(),
                target_revision: revision.clone(),
                project: project.clone(),
            };
            let app = argocd::application(&config, &options);
            print!("{}", argocd::render_application(&app)?);
        }
        Commands::Init => print!("{}", starter::STARTER_CONFIG),
    }

    Ok(())
}
