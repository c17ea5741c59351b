// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for milepost

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "milepost")]
#[command(about = "Track tasks through their execution stages with role-gated, audited overrides")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a task assigned to an actor, starting at not_started
    Create {
        #[arg(help = "Task identifier")]
        id: String,

        #[arg(short, long, help = "Actor the task is assigned to")]
        assignee: String,
    },

    /// Request a stage transition for a task
    SetStage {
        #[arg(help = "Task identifier")]
        id: String,

        #[arg(
            help = "Target stage (not_started, started, local_done, live_done, review, completed)"
        )]
        stage: String,

        #[arg(long, help = "Acting identity (defaults to configuration)")]
        actor: Option<String>,

        #[arg(long, help = "Acting role: user, manager, admin, or owner")]
        role: Option<String>,

        #[arg(
            short,
            long,
            help = "Justification; mandatory for supervisor overrides, optional note otherwise"
        )]
        reason: Option<String>,
    },

    /// Show a task with its timeline and available moves
    Show {
        #[arg(help = "Task identifier")]
        id: String,

        #[arg(long, default_value = "text", help = "Output format: text, json, or yaml")]
        format: String,
    },

    /// List all tasks with stage, status, and progress
    List {
        #[arg(long, default_value = "text", help = "Output format: text, json, or yaml")]
        format: String,
    },

    /// Show the transition history of a task from the audit log
    History {
        #[arg(help = "Task identifier")]
        id: String,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
