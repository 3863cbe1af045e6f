// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! WebAssembly bindings.
//!
//! The browser build is single-threaded: a JS worker shim fetches
//! `content.json`, calls [`SearchWorker::init`], and forwards `postMessage`
//! traffic through [`SearchWorker::handle`]. Replies use the same
//! `{type, payload}` envelope as the native worker.
//!
//! `std::time::Instant` panics on `wasm32-unknown-unknown`, so timing here
//! goes through `js_sys::Date`.

use crate::config::SearchConfig;
use crate::gateway::{answer, Inbound};
use crate::index::HierarchicalIndex;
use crate::text::AnyTextIndex;
use crate::types::Dataset;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

/// A search index owned by a browser worker.
#[wasm_bindgen]
pub struct SearchWorker {
    index: HierarchicalIndex<AnyTextIndex>,
}

#[wasm_bindgen]
impl SearchWorker {
    /// Build an empty index. `config` is an optional `SearchConfig` object;
    /// `undefined` or `null` means defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<SearchWorker, JsValue> {
        let config: SearchConfig = if config.is_undefined() || config.is_null() {
            SearchConfig::default()
        } else {
            from_value(config).map_err(|e| e.to_string())?
        };
        config.validate().map_err(|e| e.to_string())?;
        Ok(SearchWorker {
            index: HierarchicalIndex::from_config(&config),
        })
    }

    /// Load a parsed `{ blocks: [...] }` dataset. Returns `true` if this call
    /// loaded the index, `false` if it was already loaded.
    #[wasm_bindgen]
    pub fn init(&mut self, dataset: JsValue) -> Result<bool, JsValue> {
        let dataset: Dataset = from_value(dataset).map_err(|e| e.to_string())?;
        let outcome = self.index.init(dataset.blocks).map_err(|e| e.to_string())?;
        Ok(outcome.loaded())
    }

    /// Is the index loaded?
    #[wasm_bindgen(getter)]
    pub fn ready(&self) -> bool {
        self.index.is_initialized()
    }

    /// Search and return `TreeNode[]`.
    #[wasm_bindgen]
    pub fn search(&self, query: &str) -> Result<JsValue, JsValue> {
        let started = js_sys::Date::now();
        let results = self.index.search(query);
        tracing::debug!(
            query,
            roots = results.len(),
            elapsed_ms = js_sys::Date::now() - started,
            "search"
        );
        to_value(&results).map_err(|e| e.to_string().into())
    }

    /// Answer a protocol message. `query` and `recents` get a reply object;
    /// `init` returns `null` because the shim owns the fetch.
    #[wasm_bindgen]
    pub fn handle(&self, message: JsValue) -> Result<JsValue, JsValue> {
        let message: Inbound = from_value(message).map_err(|e| e.to_string())?;
        match answer(&self.index, &message) {
            Some(reply) => to_value(&reply).map_err(|e| e.to_string().into()),
            None => Ok(JsValue::NULL),
        }
    }
}
