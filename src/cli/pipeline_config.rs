//
//  gocd-client
//  cli/pipeline_config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pipeline configuration commands

use anyhow::Result;
use clap::{Args, Subcommand};
use tokio_util::sync::CancellationToken;

use super::GlobalOptions;

/// Read pipeline configurations
#[derive(Args, Debug)]
pub struct PipelineConfigCommand {
    #[command(subcommand)]
    pub command: PipelineConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PipelineConfigSubcommand {
    /// Show the configuration of a pipeline
    Get {
        /// Pipeline name
        name: String,
    },

    /// List pipeline groups and their pipelines
    Groups {
        /// Only the group with this name
        #[arg(long, short = 'g')]
        group: Option<String>,
    },
}

impl PipelineConfigCommand {
    pub async fn run(&self, global: &GlobalOptions, cancel: &CancellationToken) -> Result<()> {
        let client = global.client()?;
        let writer = global.writer();

        match &self.command {
            PipelineConfigSubcommand::Get { name } => {
                writer.write(&client.pipeline_configs().get(cancel, name).await?)
            }
            PipelineConfigSubcommand::Groups { group } => writer.write(
                &client
                    .pipeline_groups()
                    .list(cancel, group.as_deref().unwrap_or_default())
                    .await?,
            ),
        }
    }
}
