//
//  gocd-client
//  cli/pipeline.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pipeline runtime commands.
//!
//! These act on running pipelines, not on their configuration; see
//! `pipeline-config` for that.

use anyhow::Result;
use clap::{Args, Subcommand};
use tokio_util::sync::CancellationToken;

use super::GlobalOptions;

/// Inspect and control pipelines
#[derive(Args, Debug)]
pub struct PipelineCommand {
    #[command(subcommand)]
    pub command: PipelineSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PipelineSubcommand {
    /// Show whether a pipeline is paused, locked or schedulable
    Status(NameArgs),

    /// Show one run of a pipeline
    Instance {
        /// Pipeline name
        name: String,

        /// Run counter
        counter: u64,
    },

    /// Pause scheduling
    Pause {
        /// Pipeline name
        name: String,

        /// Reason recorded with the pause
        #[arg(long, short = 'c')]
        cause: Option<String>,
    },

    /// Resume scheduling
    Unpause(NameArgs),

    /// Release the lock of a locked pipeline
    Unlock(NameArgs),

    /// Trigger a run with the default materials
    Schedule(NameArgs),
}

#[derive(Args, Debug)]
pub struct NameArgs {
    /// Pipeline name
    pub name: String,
}

impl PipelineCommand {
    pub async fn run(&self, global: &GlobalOptions, cancel: &CancellationToken) -> Result<()> {
        let client = global.client()?;
        let writer = global.writer();
        let pipelines = client.pipelines();

        match &self.command {
            PipelineSubcommand::Status(args) => {
                writer.write(&pipelines.status(cancel, &args.name).await?)?;
            }
            PipelineSubcommand::Instance { name, counter } => {
                writer.write(&pipelines.instance(cancel, name, *counter).await?)?;
            }
            PipelineSubcommand::Pause { name, cause } => {
                pipelines.pause(cancel, name, cause.as_deref()).await?;
                writer.write_success(&format!("Paused pipeline {name}"));
            }
            PipelineSubcommand::Unpause(args) => {
                pipelines.unpause(cancel, &args.name).await?;
                writer.write_success(&format!("Unpaused pipeline {}", args.name));
            }
            PipelineSubcommand::Unlock(args) => {
                pipelines.release_lock(cancel, &args.name).await?;
                writer.write_success(&format!("Unlocked pipeline {}", args.name));
            }
            PipelineSubcommand::Schedule(args) => {
                pipelines.schedule(cancel, &args.name, None).await?;
                writer.write_success(&format!("Scheduled pipeline {}", args.name));
            }
        }

        Ok(())
    }
}
