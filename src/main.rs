//
//  gocd-client
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;

use gocd_client::cli::{Cli, Commands};
use gocd_client::{exit_codes, logging};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    logging::init(cli.global.verbose);

    // Ctrl+C cancels the in-flight request
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    // Execute command
    let result = run(cli, &cancel).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::for_error(&e));
        }
    }
}

/// Main command dispatcher
async fn run(cli: Cli, cancel: &CancellationToken) -> Result<()> {
    let global = &cli.global;
    match &cli.command {
        Commands::Agents(cmd) => cmd.run(global, cancel).await,
        Commands::Pipeline(cmd) => cmd.run(global, cancel).await,
        Commands::PipelineConfig(cmd) => cmd.run(global, cancel).await,
        Commands::Environments(cmd) => cmd.run(global, cancel).await,
        Commands::Jobs(cmd) => cmd.run(global, cancel).await,
        Commands::ConfigRepos(cmd) => cmd.run(global, cancel).await,
        Commands::Templates(cmd) => cmd.run(global, cancel).await,
        Commands::Encrypt(cmd) => cmd.run(global, cancel).await,
        Commands::Completion(cmd) => cmd.run(),
        Commands::Version(args) => args.run(global, cancel).await,
    }
}
