use anyhow::Result;
use clap::Parser;
use docflow_tasks::core::{Document, FieldMap, JobTask, MemoryDocument, TaskStatus};
use docflow_tasks::tasks::exec::{COMMAND_FIELD, DEFAULT_COMMAND};
use docflow_tasks::tasks::CommandExecTask;
use tracing::{error, info};

/// Drive the built-in command task against in-memory documents
#[derive(Parser, Debug)]
#[command(name = "docflow-task-runner", version, about)]
struct Args {
    /// Command the task is configured with
    #[arg(short, long, default_value = DEFAULT_COMMAND)]
    command: String,

    /// Number of documents to push through the task
    #[arg(short = 'n', long, default_value_t = 1)]
    documents: usize,

    /// Print each processed document as pretty JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with environment-based filtering
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let mut fields = FieldMap::new();
    fields.insert(COMMAND_FIELD.to_string(), args.command.clone());

    let mut task = CommandExecTask::new();

    // The same server-side check a migration manager would run on save.
    if let Some(message) = task.validate_form_fields(&fields) {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }

    task.init(fields)?;
    info!("task {} initialized with command {:?}", task.name(), args.command);

    let mut continued = 0usize;
    let mut failed = 0usize;

    for _ in 0..args.documents {
        let mut document = MemoryDocument::with_generated_id();
        let status = task.process(&mut document).await;

        match status {
            TaskStatus::Continue => continued += 1,
            other => {
                failed += 1;
                error!(
                    "document {} finished with status {:?}",
                    document.source_repository_id(),
                    other
                );
            }
        }

        if args.json {
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    task.close()?;
    info!(
        "processed {} document(s): {} continued, {} failed",
        args.documents, continued, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
