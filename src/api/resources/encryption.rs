//
//  gocd-client
//  api/resources/encryption.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use serde::{Deserialize, Serialize};

use super::impl_hal_container;
use crate::api::common::HalLinks;

/// Body of `POST /api/admin/encrypt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncryptRequest<'a> {
    pub value: &'a str,
}

/// A value encrypted with the server's cipher, usable as `encrypted_value`
/// or `encrypted_password` anywhere in the config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherText {
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<HalLinks>,
    pub encrypted_value: String,
}

impl_hal_container!(CipherText);
