//
//  gocd-client
//  cli/jobs.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Job queue commands

use anyhow::Result;
use clap::{Args, Subcommand};
use tokio_util::sync::CancellationToken;

use super::GlobalOptions;

/// Inspect the job queue
#[derive(Args, Debug)]
pub struct JobsCommand {
    #[command(subcommand)]
    pub command: JobsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum JobsSubcommand {
    /// List jobs waiting for an agent
    Scheduled,
}

impl JobsCommand {
    pub async fn run(&self, global: &GlobalOptions, cancel: &CancellationToken) -> Result<()> {
        let client = global.client()?;

        match &self.command {
            JobsSubcommand::Scheduled => global
                .writer()
                .write(&client.jobs().list_scheduled(cancel).await?),
        }
    }
}
