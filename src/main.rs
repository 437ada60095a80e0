use clap::{Parser, Subcommand};
use dotenv::dotenv;
use workbench_sync::workbench::api::http::HttpApi;
use workbench_sync::workbench::cells::{add_cell_edit, CellEdit};
use workbench_sync::workbench::config::ApiConfig;
use workbench_sync::workbench::scenario::Scenario;
use workbench_sync::workbench::share::{Role, ShareActions, ShareWorkflow};
use workbench_sync::workbench::util::generate_slug;
use workbench_sync::workbench::workflows::{WorkflowEdits, WorkflowId, WorkflowMenu};

use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a scenario file through the edit tracker and print the list
    Replay {
        /// Path to the scenario YAML
        #[arg(short, long)]
        file: String,
    },
    /// Delete a workflow
    Delete {
        #[arg(short, long)]
        workflow: i64,
    },
    /// Duplicate a workflow
    Duplicate {
        #[arg(short, long)]
        workflow: i64,
    },
    /// Change who can see a workflow
    Share {
        #[arg(short, long)]
        workflow: i64,

        /// The owner's email; grants to this address are ignored
        #[arg(short, long)]
        owner: String,

        #[command(subcommand)]
        action: ShareCommand,
    },
    /// Route a table cell edit to an Edit Cells step and print the result
    CellEdit {
        /// Module ids of the tab's steps, in order, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        modules: Vec<String>,

        /// Index of the step whose output was edited
        #[arg(long)]
        index: usize,

        /// Current celledits value of the Edit Cells step, if there is one
        #[arg(long, default_value = "")]
        celledits: String,

        #[arg(long)]
        row: u64,

        #[arg(long)]
        col: String,

        #[arg(long)]
        value: String,
    },
    /// Print a fresh slug
    Slug {
        #[arg(short, long, default_value = "")]
        prefix: String,
    },
}

#[derive(Subcommand, Debug)]
enum ShareCommand {
    /// Give an email viewer access
    Grant { email: String },
    /// Set the role of an email
    Role {
        email: String,
        /// editor, viewer or report-viewer
        role: Role,
    },
    /// Remove an email's access
    Revoke { email: String },
    /// Make the workflow public or private
    Public {
        /// Make it private instead
        #[arg(long)]
        off: bool,
        /// Keep a secret link
        #[arg(long)]
        secret: bool,
    },
}

fn api() -> anyhow::Result<Arc<HttpApi>> {
    Ok(Arc::new(HttpApi::new(ApiConfig::from_env()?)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Replay { file } => {
            log::info!("Replaying scenario: {}", file);
            let scenario = Scenario::load(&file)?;
            let workflows = scenario.replay().await?;
            println!("{}", serde_json::to_string_pretty(&workflows)?);
        }
        Commands::Delete { workflow } => {
            let menu = WorkflowMenu::new(api()?, WorkflowEdits::new());
            menu.delete_workflow(WorkflowId(workflow)).await?;
            println!("Deleted workflow {}", workflow);
        }
        Commands::Duplicate { workflow } => {
            let menu = WorkflowMenu::new(api()?, WorkflowEdits::new());
            let copy = menu.duplicate_workflow(WorkflowId(workflow)).await?;
            println!("{}", serde_json::to_string_pretty(&copy)?);
        }
        Commands::Share {
            workflow,
            owner,
            action,
        } => {
            // Only the server's answers are printed: the current ACL is not
            // fetched, so local share state starts empty.
            let actions = ShareActions::new(
                api()?,
                ShareWorkflow {
                    id: WorkflowId(workflow),
                    public: false,
                    secret_id: String::new(),
                    owner_email: owner,
                    acl: vec![],
                },
            );

            match action {
                ShareCommand::Grant { email } => {
                    if actions.submit_new_acl_entry(&email).await? {
                        println!("Granted viewer access on workflow {} to {}", workflow, email);
                    } else {
                        log::warn!("{} owns workflow {}; nothing to grant", email, workflow);
                    }
                }
                ShareCommand::Role { email, role } => {
                    actions.update_acl_entry(&email, role).await?;
                    println!("Set {} to {:?} on workflow {}", email, role, workflow);
                }
                ShareCommand::Revoke { email } => {
                    actions.delete_acl_entry(&email).await?;
                    println!("Revoked access on workflow {} from {}", workflow, email);
                }
                ShareCommand::Public { off, secret } => {
                    let access = actions.set_workflow_public_access(!off, secret).await?;
                    println!("{}", serde_json::to_string_pretty(&access)?);
                }
            }
        }
        Commands::CellEdit {
            modules,
            index,
            celledits,
            row,
            col,
            value,
        } => {
            let modules: Vec<&str> = modules.iter().map(String::as_str).collect();
            let plan = add_cell_edit(&modules, index, &celledits, CellEdit { row, col, value })?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        Commands::Slug { prefix } => {
            println!("{}", generate_slug(&prefix));
        }
    }

    Ok(())
}
