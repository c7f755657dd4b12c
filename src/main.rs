use std::env;
use std::process;
use anyhow::Context;
use docfixer::config::{self, Command};
use docfixer::constants::USAGE;
use docfixer::coordinator;
use docfixer::logging;
use docfixer::metadata::MetadataIndex;
use log::{error, info};

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    process::exit(run(&args));
}

fn run(args: &[String]) -> i32 {
    let config = match config::parse_args(args, |key| env::var(key).ok()) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            println!("{}", USAGE);
            return 0;
        }
        Err(_) => {
            println!("{}", USAGE);
            return 1;
        }
    };

    if let Err(e) = logging::init_logger(config.log_level, config.log_file.clone()) {
        eprintln!("Failed to initialize logger: {}", e);
        return 1;
    }

    if let Err(e) = config::check_layout(&config.docs_root) {
        println!("{}", e);
        return 1;
    }

    match document(&config) {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

fn document(config: &config::RunConfig) -> anyhow::Result<()> {
    info!("Command line arguments: {:?}", config);

    let index = MetadataIndex::load(&config.metadata_path).with_context(|| {
        format!("Failed to load metadata source {}", config.metadata_path.display())
    })?;
    info!("Loaded {} types from {}", index.types().len(), config.metadata_path.display());

    let report = coordinator::run_with_config(config, &index)
        .context("Failed to write documentation")?;

    info!(
        "Processed {} types ({} skipped), saved {} documents: {} events documented, {} fields merged, {} stale members, {} missing external docs",
        report.types_processed,
        report.types_skipped,
        report.documents_saved,
        report.merge.events_documented,
        report.merge.fields_merged,
        report.merge.stale_members,
        report.merge.external_failures
    );
    Ok(())
}
