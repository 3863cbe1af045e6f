// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the crumbtree command-line interface.
//!
//! Three subcommands: `search` to run one query against a dataset, `stats` to
//! summarize a dataset's hierarchy, and `worker` to drive the message-passing
//! worker from stdin the way a browser UI would.

pub mod display;

use clap::{Parser, Subcommand, ValueEnum};
use crumbtree::{Backend, RankingPolicy};

#[derive(Parser)]
#[command(
    name = "crumbtree",
    about = "Hierarchical search over breadcrumb-addressed docs",
    version
)]
pub struct Cli {
    /// Log crumbtree internals at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search a dataset once and print the result tree
    Search {
        /// Dataset origin: a content.json file, a directory holding one, or an
        /// http(s) URL it is served under
        dataset: String,

        /// Search query
        query: String,

        /// Text index backend (overrides the config file)
        #[arg(long, value_enum)]
        backend: Option<BackendArg>,

        /// Ranking policy (overrides the config file)
        #[arg(long, value_enum)]
        ranking: Option<RankingArg>,

        /// JSON search configuration file
        #[arg(short, long)]
        config: Option<String>,

        /// Print the result tree as JSON
        #[arg(long, conflicts_with = "flat")]
        json: bool,

        /// Print the flat ranked list instead of the tree
        #[arg(long)]
        flat: bool,
    },

    /// Summarize a dataset: block count, duplicates, depth, top-level sections
    Stats {
        /// Dataset origin (file, directory or URL)
        dataset: String,
    },

    /// Run the search worker, reading one query per line from stdin
    Worker {
        /// Dataset origin sent with the init message
        origin: String,

        /// JSON search configuration file
        #[arg(short, long)]
        config: Option<String>,

        /// Print raw protocol messages instead of rendered trees
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Fuzzy,
    Boolean,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Fuzzy => Backend::Fuzzy,
            BackendArg::Boolean => Backend::Boolean,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RankingArg {
    SquaredPenalty,
    RankFirst,
}

impl From<RankingArg> for RankingPolicy {
    fn from(arg: RankingArg) -> Self {
        match arg {
            RankingArg::SquaredPenalty => RankingPolicy::SquaredPenalty,
            RankingArg::RankFirst => RankingPolicy::RankFirst,
        }
    }
}
