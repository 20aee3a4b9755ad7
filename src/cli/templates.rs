//
//  gocd-client
//  cli/templates.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Template commands

use anyhow::Result;
use clap::{Args, Subcommand};
use tokio_util::sync::CancellationToken;

use super::GlobalOptions;

/// Read pipeline templates
#[derive(Args, Debug)]
pub struct TemplatesCommand {
    #[command(subcommand)]
    pub command: TemplatesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TemplatesSubcommand {
    /// List templates and the pipelines using them
    #[command(visible_alias = "ls")]
    List,

    /// Show the stages of one template
    Get {
        /// Template name
        name: String,
    },
}

impl TemplatesCommand {
    pub async fn run(&self, global: &GlobalOptions, cancel: &CancellationToken) -> Result<()> {
        let client = global.client()?;
        let writer = global.writer();

        match &self.command {
            TemplatesSubcommand::List => writer.write(&client.templates().list(cancel).await?),
            TemplatesSubcommand::Get { name } => {
                writer.write(&client.templates().get(cancel, name).await?)
            }
        }
    }
}
