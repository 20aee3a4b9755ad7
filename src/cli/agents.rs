//
//  gocd-client
//  cli/agents.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Agent commands

use anyhow::Result;
use clap::{Args, Subcommand};
use tokio_util::sync::CancellationToken;

use super::GlobalOptions;

/// Manage build agents
#[derive(Args, Debug)]
pub struct AgentsCommand {
    #[command(subcommand)]
    pub command: AgentsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AgentsSubcommand {
    /// List all agents
    #[command(visible_alias = "ls")]
    List,

    /// Show one agent
    Get {
        /// Agent UUID
        uuid: String,
    },

    /// Show the jobs an agent has run
    History {
        /// Agent UUID
        uuid: String,
    },
}

impl AgentsCommand {
    pub async fn run(&self, global: &GlobalOptions, cancel: &CancellationToken) -> Result<()> {
        let client = global.client()?;
        let writer = global.writer();

        match &self.command {
            AgentsSubcommand::List => writer.write(&client.agents().list(cancel).await?),
            AgentsSubcommand::Get { uuid } => writer.write(&client.agents().get(cancel, uuid).await?),
            AgentsSubcommand::History { uuid } => {
                writer.write(&client.agents().job_run_history(cancel, uuid).await?)
            }
        }
    }
}
