// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Worker protocol messages.
//!
//! Both directions use the same envelope, `{ "type": ..., "payload": ... }`,
//! with `payload` omitted for messages that carry nothing:
//!
//! | Direction | Message   | Wire shape                                              |
//! |-----------|-----------|---------------------------------------------------------|
//! | in        | `init`    | `{"type":"init","payload":{"origin":"https://…"}}`      |
//! | in        | `query`   | `{"type":"query","payload":"load function"}`            |
//! | in        | `recents` | `{"type":"recents"}`                                    |
//! | out       | `ready`   | `{"type":"ready"}`                                      |
//! | out       | `results` | `{"type":"results","payload":{"results":[…],"query":"…"}}` |
//! | out       | `recents` | `{"type":"recents","payload":[]}`                       |
//! | out       | `error`   | `{"type":"error","payload":{"message":"…"}}`            |
//!
//! The browser UI already speaks this protocol, so renaming a variant or field
//! here is a breaking change.

use crate::types::TreeNode;
use serde::{Deserialize, Serialize};

/// A request to the search worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum Inbound {
    /// Load the dataset from `{origin}/content.json`, if not loaded yet.
    Init { origin: String },
    /// Search for this text.
    Query(String),
    /// Ask for recent searches.
    Recents,
}

/// A reply from the search worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum Outbound {
    /// The index is loaded and queries will be answered.
    Ready,
    /// Results for `query`. Callers drop replies whose `query` is stale.
    Results {
        results: Vec<TreeNode>,
        query: String,
    },
    /// Recent searches. Not tracked, so always empty.
    Recents(Vec<String>),
    /// Loading the dataset failed. The worker keeps running and a later
    /// `init` may retry.
    Error { message: String },
}

impl Outbound {
    /// The echoed query, for `results` replies.
    pub fn query(&self) -> Option<&str> {
        match self {
            Outbound::Results { query, .. } => Some(query),
            _ => None,
        }
    }
}
