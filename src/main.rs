use annotation_cluster::job::orchestrator;
use annotation_cluster::job::spec::JobSpec;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn usage(program: &str) -> ! {
    eprintln!(
        "Usage: {} <bundle-dir> <input>... [--output <dir>] [--workers <n>] \
         [--shared-root <dir>] [--scratch-root <dir>]",
        program
    );
    eprintln!("Example: {} ANNIE input/ --output output/", program);
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        usage(&args[0]);
    }

    // The first positional argument is the engine bundle; the rest are
    // input locations unless claimed by a flag.
    let bundle = PathBuf::from(&args[1]);
    let mut inputs: Vec<PathBuf> = Vec::new();
    let mut output: Option<PathBuf> = None;
    let mut worker_count = JobSpec::DEFAULT_WORKER_COUNT;
    let mut shared_root: Option<PathBuf> = None;
    let mut scratch_root: Option<PathBuf> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--output" => {
                output = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--workers" => {
                worker_count = args[i + 1].parse()?;
                i += 2;
            }
            "--shared-root" => {
                shared_root = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--scratch-root" => {
                scratch_root = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            flag if flag.starts_with("--") => {
                eprintln!("Unknown flag: {}", flag);
                usage(&args[0]);
            }
            input => {
                inputs.push(PathBuf::from(input));
                i += 1;
            }
        }
    }

    let mut spec = JobSpec::new(bundle, inputs);
    spec.output = output;
    spec.worker_count = worker_count;
    if let Some(shared_root) = shared_root {
        spec.shared_root = shared_root;
    }
    if let Some(scratch_root) = scratch_root {
        spec.scratch_root = scratch_root;
    }

    match orchestrator::run(spec).await {
        Ok(summary) => {
            tracing::info!(
                "Success: {} records annotated by {} workers",
                summary.records_out,
                summary.workers
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Job failed: {}", e);
            std::process::exit(1);
        }
    }
}
