//
//  gocd-client
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod agents;
mod completion;
mod config_repos;
mod encrypt;
mod environments;
mod jobs;
mod pipeline;
mod pipeline_config;
mod templates;

pub use agents::AgentsCommand;
pub use completion::CompletionCommand;
pub use config_repos::ConfigReposCommand;
pub use encrypt::EncryptCommand;
pub use environments::EnvironmentsCommand;
pub use jobs::JobsCommand;
pub use pipeline::PipelineCommand;
pub use pipeline_config::PipelineConfigCommand;
pub use templates::TemplatesCommand;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use crate::api::GocdClient;
use crate::config::{Configuration, DEFAULT_PROFILE};
use crate::output::{OutputFormat, OutputWriter};

/// GoCD CLI - Work with a GoCD server from the command line
#[derive(Parser, Debug)]
#[command(
    name = "gocd",
    version,
    about = "Work with a GoCD server from the command line",
    long_about = "gocd talks to the GoCD REST API.\n\n\
                  It picks the API revision the connected server understands.",
    propagate_version = true,
    after_help = "Use 'gocd <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalOptions {
    /// Profile from the configuration file
    #[arg(long, short = 'p', global = true, env = "GOCD_PROFILE", default_value = DEFAULT_PROFILE)]
    pub profile: String,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    /// Log requests at debug level
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            profile: DEFAULT_PROFILE.to_string(),
            output: OutputFormat::default(),
            verbose: false,
        }
    }
}

impl GlobalOptions {
    /// Client for the selected profile.
    pub fn client(&self) -> Result<GocdClient> {
        Configuration::load(&self.profile)?.client()
    }

    pub fn writer(&self) -> OutputWriter {
        OutputWriter::new(self.output)
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage build agents
    Agents(AgentsCommand),

    /// Inspect and control pipelines
    #[command(visible_alias = "pl")]
    Pipeline(PipelineCommand),

    /// Read pipeline configurations
    #[command(name = "pipeline-config")]
    PipelineConfig(PipelineConfigCommand),

    /// Read environments
    #[command(visible_alias = "env")]
    Environments(EnvironmentsCommand),

    /// Inspect the job queue
    Jobs(JobsCommand),

    /// Read config repositories
    #[command(name = "config-repos")]
    ConfigRepos(ConfigReposCommand),

    /// Read pipeline templates
    Templates(TemplatesCommand),

    /// Encrypt a value with the server's cipher
    Encrypt(EncryptCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version(VersionArgs),
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Also query the server's version
    #[arg(long)]
    pub server: bool,
}

impl VersionArgs {
    pub async fn run(&self, global: &GlobalOptions, cancel: &CancellationToken) -> Result<()> {
        println!("{} version {}", crate::APP_NAME, crate::VERSION);
        if self.server {
            let client = global.client()?;
            let version = client.server().version(cancel).await?;
            global.writer().write(&*version)?;
        }
        Ok(())
    }
}
