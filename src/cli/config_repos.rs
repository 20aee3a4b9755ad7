//
//  gocd-client
//  cli/config_repos.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Config repository commands

use anyhow::Result;
use clap::{Args, Subcommand};
use tokio_util::sync::CancellationToken;

use super::GlobalOptions;

/// Read config repositories
#[derive(Args, Debug)]
pub struct ConfigReposCommand {
    #[command(subcommand)]
    pub command: ConfigReposSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigReposSubcommand {
    /// List all config repositories
    #[command(visible_alias = "ls")]
    List,

    /// Show one config repository
    Get {
        /// Config repository id
        id: String,
    },
}

impl ConfigReposCommand {
    pub async fn run(&self, global: &GlobalOptions, cancel: &CancellationToken) -> Result<()> {
        let client = global.client()?;
        let writer = global.writer();

        match &self.command {
            ConfigReposSubcommand::List => writer.write(&client.config_repos().list(cancel).await?),
            ConfigReposSubcommand::Get { id } => {
                writer.write(&client.config_repos().get(cancel, id).await?)
            }
        }
    }
}
