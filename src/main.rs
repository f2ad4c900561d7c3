// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::json;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use skillsearch::config::{Config, DEFAULT_BUNDLE_PATH};
use skillsearch::loader::{generate_bundle, read_bundle, write_bundle, BundleOptions};
use skillsearch::persist::{deserialize_index_value, SerializedIndex};
use skillsearch::tools::{self, clamp_limit};
use skillsearch::{build_catalog, SearchOptions, SkillSource, SkillType};

mod cli;
use cli::display::{self, format_size};
use cli::{Cli, Commands, GlobalArgs};

/// Logs go to stderr so stdout stays clean for results. `RUST_LOG` wins over
/// `--log-level` when set.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(atty::is(atty::Stream::Stderr)),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.global.log_level);

    if let Err(e) = run(cli) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let global = cli.global;
    match cli.command {
        Commands::Bundle {
            plugin,
            output,
            annotations,
        } => run_bundle(&global, &plugin, &output, annotations),
        Commands::Inspect { file } => {
            let path = file
                .or_else(|| global.bundle.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BUNDLE_PATH));
            inspect_bundle(&path)
        }
        Commands::Search {
            query,
            limit,
            skill_type,
            category,
            source,
            json,
        } => {
            let state = open(&global)?;
            if json {
                let options = search_options(limit, skill_type, category, source)?;
                let results = state.search(&query, &options);
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print_search(&state, &query, limit, skill_type, category, source)?;
            }
            Ok(())
        }
        Commands::Catalog {
            category,
            descriptions,
            json,
        } => {
            let state = open(&global)?;
            if json {
                let label = category
                    .as_deref()
                    .map(|c| skillsearch::category_label(c).unwrap_or(c));
                let catalog = build_catalog(state.skills(), &state.contents.agents, label);
                println!("{}", serde_json::to_string_pretty(&catalog)?);
            } else {
                let args = json!({"category": category, "includeDescriptions": descriptions});
                print!("{}", tools::get_catalog(&state, &args)?);
            }
            Ok(())
        }
        Commands::Read {
            names,
            sections,
            list_sections,
        } => {
            let state = open(&global)?;
            let sections = (!sections.is_empty()).then_some(sections);
            let skills: Vec<_> = names
                .iter()
                .map(|name| json!({"name": name, "sections": sections}))
                .collect();
            let args = json!({"skills": skills, "listSections": list_sections});
            print!("{}", tools::read_skill(&state, &args)?);
            Ok(())
        }
        Commands::Agent { name } => {
            let state = open(&global)?;
            println!("{}", tools::get_agent(&state, &json!({ "agent": name }))?);
            Ok(())
        }
    }
}

fn open(global: &GlobalArgs) -> Result<std::sync::Arc<skillsearch::loader::LibraryState>> {
    let config = Config::resolve(global.settings())?;
    let library = config
        .open_library()
        .with_context(|| format!("loading skills ({} mode)", config.mode))?;
    Ok(library.snapshot())
}

fn search_options(
    limit: usize,
    skill_type: Option<String>,
    category: Option<String>,
    source: Option<String>,
) -> Result<SearchOptions> {
    let skill_type = match skill_type {
        Some(s) => Some(s.parse::<SkillType>().map_err(anyhow::Error::msg)?),
        None => None,
    };
    let source = match source {
        Some(s) => Some(s.parse::<SkillSource>().map_err(anyhow::Error::msg)?),
        None => None,
    };
    Ok(SearchOptions {
        limit: clamp_limit(Some(limit as f64)),
        skill_type,
        category,
        source,
    })
}

fn print_search(
    state: &skillsearch::loader::LibraryState,
    query: &str,
    limit: usize,
    skill_type: Option<String>,
    category: Option<String>,
    source: Option<String>,
) -> Result<()> {
    // Validation is shared with the tool handler.
    let args = json!({
        "query": query,
        "limit": limit,
        "skillType": skill_type,
        "category": category,
        "source": source,
    });
    let text = tools::search_skills(state, &args)?;
    if !display::use_colors() {
        print!("{}", text);
        return Ok(());
    }

    let options = search_options(limit, skill_type, category, source)?;
    let results = state.search(query, &options);
    if results.is_empty() {
        println!("{}", display::muted(&format!("No skills found for \"{}\"", query)));
        return Ok(());
    }

    for (rank, result) in results.iter().enumerate() {
        let badges: Vec<String> = [
            display::type_badge(result.skill_type),
            display::source_badge(result.source),
        ]
        .into_iter()
        .filter(|b| !b.is_empty())
        .collect();
        println!(
            "{:>3}. {} {} {}",
            rank + 1,
            display::score_value(result.score),
            display::title(&result.name),
            badges.join(" ")
        );
        println!("     {}", result.description);
        if !result.matching_sections.is_empty() {
            println!(
                "     {}",
                display::muted(&format!("sections: {}", result.matching_sections.join(", ")))
            );
        }
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn spinner(prefix: &'static str) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {prefix:<10} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_prefix(prefix);
    bar.enable_steady_tick(std::time::Duration::from_millis(80));
    bar
}

fn run_bundle(global: &GlobalArgs, plugin: &Path, output: &Path, annotations: PathBuf) -> Result<()> {
    if !plugin.is_dir() {
        bail!("plugin directory not found: {}", plugin.display());
    }
    let options = BundleOptions {
        annotations: Some(annotations),
        vendor_docs: global.vendor_docs(),
    };

    #[cfg(feature = "parallel")]
    let bar = spinner("Bundling");
    #[cfg(feature = "parallel")]
    bar.set_message(plugin.display().to_string());

    let bundle = generate_bundle(plugin, &options)
        .with_context(|| format!("bundling {}", plugin.display()))?;

    #[cfg(feature = "parallel")]
    bar.set_message(format!("writing {}", output.display()));

    let (path, stats) = write_bundle(&bundle, output)?;

    #[cfg(feature = "parallel")]
    bar.finish_and_clear();

    let categories = bundle.catalog.as_ref().map_or(0, |c| c.categories.len());
    eprintln!("✅ Bundle written to {}", path.display());
    eprintln!(
        "   {} skills │ {} commands │ {} agents │ {} categories",
        stats.skills.count,
        stats.commands.count,
        stats.agents.count,
        categories
    );
    eprintln!(
        "   skills {} │ commands {} │ agents {} │ index {} │ total {}",
        format_size(stats.skills.bytes),
        format_size(stats.commands.bytes),
        format_size(stats.agents.bytes),
        format_size(stats.search_index.bytes),
        format_size(stats.total_bytes)
    );
    Ok(())
}

fn inspect_bundle(path: &Path) -> Result<()> {
    let bundle = read_bundle(path)?;
    let file_size = std::fs::metadata(path).map(|m| m.len() as usize).unwrap_or(0);
    let stats = bundle.stats()?;

    display::section_top("BUNDLE");
    display::field("path", &path.display().to_string());
    display::field("version", &bundle.version);
    display::field("generated", &bundle.generated_at);
    display::field("file size", &format_size(file_size));
    display::section_bot();

    display::section_top("CONTENTS");
    display::field(
        "skills",
        &format!("{} ({})", stats.skills.count, format_size(stats.skills.bytes)),
    );
    for skill_type in SkillType::ALL {
        let count = bundle
            .skills
            .values()
            .filter(|s| s.skill_type == skill_type)
            .count();
        if count > 0 {
            display::field(&format!("  {}", skill_type), &count.to_string());
        }
    }
    display::field(
        "commands",
        &format!("{} ({})", stats.commands.count, format_size(stats.commands.bytes)),
    );
    display::field(
        "agents",
        &format!("{} ({})", stats.agents.count, format_size(stats.agents.bytes)),
    );
    display::section_bot();

    display::section_top("SEARCH INDEX");
    match &bundle.search_index {
        Some(value) => {
            let version = serde_json::from_value::<SerializedIndex>(value.clone())
                .ok()
                .and_then(|s| s.engine.serialization_version)
                .map_or_else(|| "none".to_string(), |v| v.to_string());
            let restored = deserialize_index_value(value.clone());
            display::field("format version", &version);
            display::field("size", &format_size(stats.search_index.bytes));
            if let Some(index) = &restored {
                display::field("documents", &index.doc_count().to_string());
                display::field("terms", &index.term_count().to_string());
                display::field("avg length", &format!("{:.1}", index.avg_doc_length()));
            }
            display::field("status", &display::status(restored.is_some()));
        }
        None => display::field("status", &display::status(false)),
    }
    display::section_bot();

    let catalog = match bundle.catalog.clone() {
        Some(catalog) => catalog,
        None => build_catalog(&bundle.skills, &bundle.agents, None),
    };
    display::section_top("CATEGORIES");
    for category in catalog.categories.values() {
        display::field(&category.label, &category.skills.len().to_string());
    }
    display::section_bot();
    Ok(())
}
