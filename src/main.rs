use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

mod complete;
mod config;
mod diagnostics;
mod host;
mod matrix;
mod render;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "dukkha")]
#[command(about = "dukkha build matrix expansion", long_about = None)]
struct Cli {
    /// Task file (.yaml/.yml or .json).
    #[arg(short = 'c', long, global = true, default_value = "dukkha.yaml")]
    config: String,

    /// Override the detected host kernel.
    #[arg(long, global = true)]
    host_kernel: Option<String>,

    /// Override the detected host arch.
    #[arg(long, global = true)]
    host_arch: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the matrix entries a task would run with.
    Entries {
        task: String,

        /// key=value to match, key!=value to ignore. Repeatable.
        #[arg(short = 'm', long = "matrix")]
        matrix: Vec<String>,

        #[arg(long, value_enum, default_value_t)]
        format: render::OutputFormat,
    },

    /// Print `-m` completion candidates for a task.
    Complete {
        task: String,

        #[arg(short = 'm', long = "matrix")]
        matrix: Vec<String>,

        #[arg(default_value = "")]
        prefix: String,
    },

    /// List tasks with their entry counts.
    Tasks,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dukkha=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let host = host::Host::detect(cli.host_kernel, cli.host_arch);
    debug!(kernel = %host.kernel, arch = %host.arch, "host platform");

    // 1) Parse + validate the task file.
    let cfg = config::load_config(&cli.config)?.validate_and_build()?;
    debug!(path = %cli.config, tasks = cfg.tasks.len(), "loaded config");

    match cli.cmd {
        Commands::Entries {
            task,
            matrix: tokens,
            format,
        } => {
            let task = cfg.task(&task)?;

            // 2) Expand with the -m filter.
            let filter = matrix::Filter::from_tokens(&tokens);
            let entries = matrix::generate_entries(
                task.matrix.as_ref(),
                Some(&filter),
                &host.kernel,
                &host.arch,
            );
            if entries.is_empty() {
                match filter.as_entry() {
                    Some(pinned) if !filter.is_empty() => {
                        warn!(task = %task.id, matrix = %pinned, "no matching matrix entries")
                    }
                    _ => warn!(task = %task.id, "no matching matrix entries"),
                }
            }
            for e in &entries {
                debug!("{}", render::log_prefix(&task.id, e));
            }

            // 3) Render.
            print!("{}", render::render_entries(&entries, format)?);
        }
        Commands::Complete {
            task,
            matrix: tokens,
            prefix,
        } => {
            let task = cfg.task(&task)?;
            for c in complete::matrix_candidates(task.matrix.as_ref(), &tokens, &prefix, &host) {
                println!("{}", c);
            }
        }
        Commands::Tasks => {
            for (id, task) in &cfg.tasks {
                let n = matrix::generate_entries(task.matrix.as_ref(), None, &host.kernel, &host.arch)
                    .len();
                println!("{}\t{}", id, n);
            }
        }
    }

    Ok(())
}
