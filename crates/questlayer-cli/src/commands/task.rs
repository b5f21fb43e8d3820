use clap::Subcommand;
use questlayer_core::{Task, TaskId};
use std::path::Path;

use super::{load_config, save_config};

#[derive(Subcommand)]
pub enum TaskAction {
    /// List configured reward tasks
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a reward task
    Add {
        /// Task ID (generated when omitted)
        #[arg(long)]
        id: Option<String>,
        /// Task title
        #[arg(long)]
        title: String,
        /// Short description
        #[arg(long, default_value = "")]
        desc: String,
        /// Target URL, or "share" for the share hub
        #[arg(long)]
        link: String,
        /// XP reward
        #[arg(long)]
        xp: u64,
    },
    /// Remove a reward task
    Remove {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction, file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TaskAction::List { json } => {
            let config = load_config(file)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config.tasks)?);
                return Ok(());
            }
            if config.tasks.is_empty() {
                println!("No tasks configured.");
                return Ok(());
            }
            for task in &config.tasks {
                let id = task.id.to_string();
                println!("{id:<14} {:>6} XP  {}  ({})", task.xp, task.title, task.link);
            }
        }
        TaskAction::Add {
            id,
            title,
            desc,
            link,
            xp,
        } => {
            let mut config = load_config(file)?;
            let id = id.as_deref().map(TaskId::parse).unwrap_or_else(TaskId::generate);
            let task = Task::new(id, title, desc, link, xp);
            let created = task.id.clone();
            config.add_task(task)?;
            save_config(&config, file)?;
            println!("Task added: {created}");
        }
        TaskAction::Remove { id } => {
            let mut config = load_config(file)?;
            let found = config.find_task_by_str(&id).map(|t| t.id.clone());
            match found.and_then(|task_id| config.remove_task(&task_id)) {
                Some(task) => {
                    save_config(&config, file)?;
                    println!("Task removed: {} ({})", task.id, task.title);
                }
                None => return Err(format!("task not found: {id}").into()),
            }
        }
    }
    Ok(())
}
