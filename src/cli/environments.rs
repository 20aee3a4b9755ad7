//
//  gocd-client
//  cli/environments.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Environment commands

use anyhow::Result;
use clap::{Args, Subcommand};
use tokio_util::sync::CancellationToken;

use super::GlobalOptions;

/// Read environments
#[derive(Args, Debug)]
pub struct EnvironmentsCommand {
    #[command(subcommand)]
    pub command: EnvironmentsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum EnvironmentsSubcommand {
    /// List all environments
    #[command(visible_alias = "ls")]
    List,

    /// Show one environment
    Get {
        /// Environment name
        name: String,
    },
}

impl EnvironmentsCommand {
    pub async fn run(&self, global: &GlobalOptions, cancel: &CancellationToken) -> Result<()> {
        let client = global.client()?;
        let writer = global.writer();

        match &self.command {
            EnvironmentsSubcommand::List => writer.write(&client.environments().list(cancel).await?),
            EnvironmentsSubcommand::Get { name } => {
                writer.write(&client.environments().get(cancel, name).await?)
            }
        }
    }
}
