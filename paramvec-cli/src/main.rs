//! paramvec CLI: list, export, and sample the registered strategies.
//!
//! Commands:
//! - `list`: registered strategy names and descriptions
//! - `export`: registry metadata as JSON
//! - `sample`: resolve one strategy to vectors (table, JSON or CSV)
//! - `sample-all`: resolve every strategy from one master seed and summarize
//!
//! Set `RUST_LOG=paramvec_runner=debug` to trace resolution.

mod demo;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use paramvec_core::{SampleCount, SeededSource, VectorMode};
use paramvec_runner::{
    export_strategies, export_vectors_csv, export_vectors_json, resolve, resolve_all,
    write_export, ResolvedStrategy, RunnerConfig, StrategyRegistry,
};

#[derive(Parser)]
#[command(
    name = "paramvec",
    about = "paramvec: parameter vectors for parameterized tests"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered strategies.
    List,
    /// Export the metadata of every strategy as JSON.
    Export {
        /// Write to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Resolve one strategy to concrete vectors.
    Sample {
        /// Strategy name (see `list`).
        name: String,

        /// Runner config TOML. Flags given here override its values.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of random vectors, or "auto" for the exhaustive product.
        #[arg(long)]
        nsamples: Option<SampleCount>,

        /// Seed for the random source. Defaults to a time-based seed.
        #[arg(long)]
        seed: Option<u64>,

        /// all | mixed | random_only | directed_only | test
        #[arg(long)]
        vector_mode: Option<VectorMode>,

        /// Select one directed vector by name.
        #[arg(long, conflicts_with = "vector_index")]
        vector_name: Option<String>,

        /// Select one directed vector by position in insertion order.
        #[arg(long)]
        vector_index: Option<usize>,

        /// Attempts allowed per predicate or constraint before giving up.
        #[arg(long)]
        max_retries: Option<u32>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// Write to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Resolve every strategy from one master seed and print a summary.
    SampleAll {
        /// Master seed. Each strategy is seeded from it by name.
        #[arg(long)]
        seed: Option<u64>,

        /// Number of random vectors per strategy, or "auto".
        #[arg(long, default_value = "10")]
        nsamples: SampleCount,

        /// Vector mode applied to every strategy.
        #[arg(long, default_value = "all")]
        vector_mode: VectorMode,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = demo::registry();

    match cli.command {
        Commands::List => run_list(&registry),
        Commands::Export { output } => {
            let json = export_strategies(&registry)?;
            emit(&json, output)
        }
        Commands::Sample {
            name,
            config,
            nsamples,
            seed,
            vector_mode,
            vector_name,
            vector_index,
            max_retries,
            format,
            output,
        } => {
            let overrides = Overrides {
                nsamples,
                seed,
                vector_mode,
                vector_name,
                vector_index,
                max_retries,
            };
            run_sample(&registry, &name, config, overrides, format, output)
        }
        Commands::SampleAll {
            seed,
            nsamples,
            vector_mode,
        } => run_sample_all(&registry, seed, nsamples, vector_mode),
    }
}

fn run_list(registry: &StrategyRegistry) -> Result<()> {
    if registry.is_empty() {
        println!("No strategies registered.");
        return Ok(());
    }
    for strategy in registry.iter() {
        println!("{:<16} {}", strategy.name(), strategy.description());
    }
    Ok(())
}

/// Command-line values that take precedence over the config file.
struct Overrides {
    nsamples: Option<SampleCount>,
    seed: Option<u64>,
    vector_mode: Option<VectorMode>,
    vector_name: Option<String>,
    vector_index: Option<usize>,
    max_retries: Option<u32>,
}

impl Overrides {
    fn apply(self, config: &mut RunnerConfig) {
        if let Some(n) = self.nsamples {
            config.nsamples = n;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(mode) = self.vector_mode {
            config.vector_mode = mode;
        }
        // A filter on the command line replaces whichever filter the file set.
        if self.vector_name.is_some() || self.vector_index.is_some() {
            config.vector_name = self.vector_name;
            config.vector_index = self.vector_index;
        }
        if self.max_retries.is_some() {
            config.max_retries = self.max_retries;
        }
    }
}

fn run_sample(
    registry: &StrategyRegistry,
    name: &str,
    config_path: Option<PathBuf>,
    overrides: Overrides,
    format: Format,
    output: Option<PathBuf>,
) -> Result<()> {
    if !registry.contains(name) {
        bail!(
            "unknown strategy '{name}'. Valid: {}",
            registry.names().join(", ")
        );
    }

    let mut config = match config_path {
        Some(path) => RunnerConfig::from_file(&path)?,
        None => RunnerConfig::default(),
    };
    overrides.apply(&mut config);
    let invocation = config.invocation()?;

    let mut src = SeededSource::from_time();
    let resolved = resolve(registry, name, &invocation, &mut src)?;

    let rendered = match format {
        Format::Table => render_table(&resolved),
        Format::Json => export_vectors_json(&resolved)?,
        Format::Csv => export_vectors_csv(&resolved)?,
    };
    emit(&rendered, output)
}

fn run_sample_all(
    registry: &StrategyRegistry,
    seed: Option<u64>,
    nsamples: SampleCount,
    vector_mode: VectorMode,
) -> Result<()> {
    let master_seed = seed.unwrap_or_else(|| SeededSource::from_time().current_seed());
    let invocation = paramvec_runner::Invocation::new(nsamples, vector_mode);
    let results = resolve_all(registry, &invocation, master_seed);

    println!("Master seed: {master_seed}");
    println!();
    println!("{:<16} {:>8} {:>22}  {}", "Strategy", "Vectors", "Seed", "Status");
    println!("{}", "-".repeat(60));
    for entry in &results.entries {
        match &entry.outcome {
            Ok(resolved) => println!(
                "{:<16} {:>8} {:>22}  {}",
                entry.name,
                resolved.len(),
                resolved.seed,
                if resolved.legacy { "ok (legacy)" } else { "ok" }
            ),
            Err(err) => println!("{:<16} {:>8} {:>22}  error: {err}", entry.name, "-", "-"),
        }
    }
    println!();
    println!("Total vectors: {}", results.total_vectors());

    let failed = results.failures().count();
    if failed > 0 {
        bail!("{failed} strategy(ies) failed to resolve");
    }
    Ok(())
}

fn render_table(resolved: &ResolvedStrategy) -> String {
    let header: Vec<String> = std::iter::once("#".to_string())
        .chain(resolved.arg_names.iter().cloned())
        .collect();
    let rows: Vec<Vec<String>> = resolved
        .vectors
        .iter()
        .enumerate()
        .map(|(i, v)| {
            std::iter::once(i.to_string())
                .chain(v.iter().map(demo::cell))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            rows.iter()
                .map(|r| r[col].chars().count())
                .chain(std::iter::once(header[col].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = format!(
        "Strategy: {}  seed: {}  vectors: {}\n\n",
        resolved.name,
        resolved.seed,
        resolved.len()
    );
    out.push_str(&line(&header));
    out.push('\n');
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));
    out.push('\n');
    for row in &rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}

fn emit(content: &str, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            write_export(&path, content)?;
            eprintln!("Written to: {}", path.display());
            Ok(())
        }
        None => {
            use std::io::Write;
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .context("failed to write to stdout")?;
            if !content.ends_with('\n') {
                writeln!(stdout).context("failed to write to stdout")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use paramvec_core::{vector, VectorFilter};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn sample_flags_parse() {
        let cli = Cli::try_parse_from([
            "paramvec", "sample", "grid", "--nsamples", "auto", "--vector-mode", "random_only",
            "--format", "csv",
        ])
        .unwrap();
        match cli.command {
            Commands::Sample {
                nsamples,
                vector_mode,
                format,
                ..
            } => {
                assert_eq!(nsamples, Some(SampleCount::Auto));
                assert_eq!(vector_mode, Some(VectorMode::RandomOnly));
                assert_eq!(format, Format::Csv);
            }
            _ => panic!("expected sample"),
        }
    }

    #[test]
    fn filter_flags_describe_directed_vectors() {
        let cli = Cli::command();
        let sample = cli.find_subcommand("sample").unwrap();
        for id in ["vector_name", "vector_index"] {
            let arg = sample.get_arguments().find(|a| a.get_id() == id).unwrap();
            let help = arg.get_help().unwrap().to_string();
            assert!(help.contains("directed vector"), "{id}: {help}");
            assert!(!help.contains("test"), "{id}: {help}");
        }
    }

    #[test]
    fn name_and_index_conflict() {
        let err = Cli::try_parse_from([
            "paramvec", "sample", "addition", "--vector-name", "zeros", "--vector-index", "0",
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn overrides_replace_config_values() {
        let mut config =
            RunnerConfig::from_toml("nsamples = 3\nseed = 1\nvector_index = 2").unwrap();
        Overrides {
            nsamples: None,
            seed: Some(9),
            vector_mode: Some(VectorMode::Test),
            vector_name: Some("issue_17".into()),
            vector_index: None,
            max_retries: None,
        }
        .apply(&mut config);
        let inv = config.invocation().unwrap();
        assert_eq!(inv.count, SampleCount::Count(3));
        assert_eq!(inv.seed, Some(9));
        assert_eq!(inv.mode, VectorMode::Test);
        assert_eq!(inv.filter, Some(VectorFilter::ByName("issue_17".into())));
    }

    #[test]
    fn table_lists_every_vector() {
        let resolved = ResolvedStrategy {
            name: "pair".into(),
            arg_names: vec!["a".into(), "label".into()],
            vectors: vec![vector![1, "x"], vector![200, "longer"]],
            seed: 5,
            legacy: false,
        };
        let table = render_table(&resolved);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Strategy: pair  seed: 5  vectors: 2");
        assert_eq!(lines[2], "#  a    label");
        assert_eq!(lines[4], "0  1    x");
        assert_eq!(lines[5], "1  200  longer");
    }
}
