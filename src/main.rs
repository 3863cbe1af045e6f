// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::collections::HashMap;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crumbtree::{
    AnySource, Dataset, DatasetSource, FuzzyIndex, HierarchicalIndex, Inbound, InitOutcome,
    Outbound, RankingPolicy, SearchConfig, SearchService, Worker,
};

mod cli;
use cli::display::{self, themed, BOLD, CYAN, GRAY, GREEN, YELLOW};
use cli::{BackendArg, Cli, Commands, RankingArg};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Search {
            dataset,
            query,
            backend,
            ranking,
            config,
            json,
            flat,
        } => {
            let config = load_config(config.as_deref(), backend, ranking)?;
            run_search(&dataset, &query, &config, json, flat)
        }
        Commands::Stats { dataset } => run_stats(&dataset),
        Commands::Worker {
            origin,
            config,
            json,
        } => {
            let config = load_config(config.as_deref(), None, None)?;
            run_worker(origin, &config, json)
        }
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or crumbtree at debug with `-v`.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("warn,crumbtree=debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file first, then CLI overrides on top.
fn load_config(
    path: Option<&str>,
    backend: Option<BackendArg>,
    ranking: Option<RankingArg>,
) -> Result<SearchConfig> {
    let mut config = match (path, backend) {
        (Some(path), _) => SearchConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path))?,
        (None, Some(backend)) => SearchConfig::for_backend(backend.into()),
        (None, None) => SearchConfig::default(),
    };
    if let Some(backend) = backend {
        config.backend = backend.into();
    }
    if let Some(ranking) = ranking {
        config.ranking = ranking.into();
    }
    config.validate()?;
    Ok(config)
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting async runtime")
}

fn load_dataset(origin: &str) -> Result<Dataset> {
    runtime()?
        .block_on(AnySource::new().fetch(origin))
        .with_context(|| format!("loading dataset from {}", origin))
}

// ═══════════════════════════════════════════════════════════════════════════
// SEARCH
// ═══════════════════════════════════════════════════════════════════════════

fn run_search(origin: &str, query: &str, config: &SearchConfig, json: bool, flat: bool) -> Result<()> {
    let dataset = load_dataset(origin)?;
    let mut index = HierarchicalIndex::from_config(config);
    index.init(dataset.blocks).context("indexing dataset")?;

    let started = Instant::now();
    if flat {
        let ranked = index.search_ranked(query);
        let elapsed = started.elapsed();
        print!("{}", display::render_flat(&ranked));
        eprintln!("{}", display::summary(ranked.len(), ranked.len(), elapsed));
        return Ok(());
    }

    let forest = index.search(query);
    let elapsed = started.elapsed();
    if json {
        println!("{}", serde_json::to_string_pretty(&forest)?);
        return Ok(());
    }

    if forest.is_empty() {
        println!("{}", themed(GRAY, &[], &format!("no matches for {:?}", query)));
        return Ok(());
    }
    let matches: usize = forest.iter().map(|root| root.blocks().count()).sum();
    print!("{}", display::render_forest(&forest));
    eprintln!("{}", display::summary(matches, forest.len(), elapsed));
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// STATS
// ═══════════════════════════════════════════════════════════════════════════

fn run_stats(origin: &str) -> Result<()> {
    let dataset = load_dataset(origin)?;
    let mut index = HierarchicalIndex::new(FuzzyIndex::default(), RankingPolicy::default());
    let report = match index.init(dataset.blocks).context("indexing dataset")? {
        InitOutcome::Loaded(report) => report,
        InitOutcome::AlreadyInitialized => bail!("index was already initialized"),
    };

    let store = index.store();
    let mut sections: Vec<(&str, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for block in store.iter() {
        let Some(top) = block.breadcrumbs.first() else {
            continue;
        };
        match positions.get(top.as_str()).copied() {
            Some(i) => sections[i].1 += 1,
            None => {
                positions.insert(top.as_str(), sections.len());
                sections.push((top.as_str(), 1));
            }
        }
    }
    let ranked = store.iter().filter(|block| block.rank.is_some()).count();

    println!("{}", display::section_top("DATASET"));
    println!("{}", display::row(&format!(" origin      {}", themed(CYAN, &[], origin))));
    println!(
        "{}",
        display::row(&format!(" blocks      {}", themed(GREEN, &[BOLD], &report.ingested.to_string())))
    );
    println!(
        "{}",
        display::row(&format!(" duplicates  {}", themed(YELLOW, &[], &report.duplicates.to_string())))
    );
    println!("{}", display::row(&format!(" ranked      {}", ranked)));
    println!("{}", display::row(&format!(" max depth   {}", store.max_depth())));
    println!("{}", display::section_bot());

    println!("{}", display::section_top("TOP-LEVEL SECTIONS"));
    for (name, count) in &sections {
        println!(
            "{}",
            display::row(&format!(" {:<40} {:>6} blocks", display::excerpt(name, 40), count))
        );
    }
    println!("{}", display::section_bot());
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// WORKER
// ═══════════════════════════════════════════════════════════════════════════

fn run_worker(origin: String, config: &SearchConfig, json: bool) -> Result<()> {
    let service = SearchService::new(HierarchicalIndex::from_config(config), AnySource::new());
    let mut handle = Worker::spawn(service);
    handle.send(Inbound::Init { origin })?;

    runtime()?.block_on(async {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdin_open = true;
        let mut latest: Option<String> = None;

        loop {
            tokio::select! {
                line = lines.next_line(), if stdin_open => match line? {
                    Some(line) => {
                        let query = line.trim().to_string();
                        if !query.is_empty() {
                            latest = Some(query.clone());
                            handle.send(Inbound::Query(query))?;
                        }
                    }
                    None => {
                        stdin_open = false;
                        handle.close();
                    }
                },
                reply = handle.recv() => match reply {
                    Some(reply) => print_reply(reply, latest.as_deref(), json)?,
                    None => break,
                },
            }
        }
        Ok::<_, anyhow::Error>(())
    })?;

    handle.shutdown();
    Ok(())
}

fn print_reply(reply: Outbound, latest: Option<&str>, json: bool) -> Result<()> {
    if let Some(query) = reply.query() {
        if Some(query) != latest {
            tracing::debug!(query, "dropping stale results");
            return Ok(());
        }
    }
    if json {
        println!("{}", serde_json::to_string(&reply)?);
        return Ok(());
    }
    match reply {
        Outbound::Ready => eprintln!("{}", themed(GREEN, &[], "ready")),
        Outbound::Error { message } => eprintln!("error: {}", message),
        Outbound::Recents(recents) => print!("{}", display::render_recents(&recents)),
        Outbound::Results { results, query } => {
            println!("{}", themed(CYAN, &[BOLD], &format!("» {}", query)));
            if results.is_empty() {
                println!("{}", themed(GRAY, &[], "no matches"));
            } else {
                print!("{}", display::render_forest(&results));
            }
        }
    }
    Ok(())
}
