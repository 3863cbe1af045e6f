// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Helpers that don't belong to a single component.

pub mod normalize;

pub use normalize::{normalize, tokenize};
