//
//  gocd-client
//  cli/encrypt.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Args;
use tokio_util::sync::CancellationToken;

use super::GlobalOptions;

/// Encrypt a value with the server's cipher
#[derive(Args, Debug)]
pub struct EncryptCommand {
    /// Plain text to encrypt
    pub value: String,
}

impl EncryptCommand {
    pub async fn run(&self, global: &GlobalOptions, cancel: &CancellationToken) -> Result<()> {
        let client = global.client()?;
        let cipher = client.encryption().encrypt(cancel, &self.value).await?;
        global.writer().write(&cipher)
    }
}
