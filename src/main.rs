use anyhow::{Context, Result};
use canonsql::*;
use clap::{Parser, Subcommand};
use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "canonsql", version, about = "Rewrite SQL into structural templates")]
struct Cli {
    /// TOML settings file; environment variables still take precedence.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Canonicalize one query, or every record of a JSON-lines file.
    Canonicalize {
        #[arg(long, value_enum)]
        mode: Option<Mode>,
        /// Schema rows (JSON array or JSON lines).
        #[arg(long)]
        schema: Option<PathBuf>,
        /// JSON-lines records; stdin when omitted.
        #[arg(long, conflicts_with = "query")]
        input: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        /// A single SQL statement instead of a batch.
        #[arg(long)]
        query: Option<String>,
        /// Database of `--query`, looked up in `--schema`.
        #[arg(long, requires = "query")]
        db: Option<String>,
    },
    /// Rank the distinct templates of canonicalized records.
    Templates {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        /// Record field holding the template; defaults to the configured output field.
        #[arg(long)]
        field: Option<String>,
    },
    /// Enumerate table/column fillings of ranked templates.
    Combinations {
        #[arg(long)]
        schema: PathBuf,
        /// Ranked templates as written by `templates`.
        #[arg(long)]
        templates: PathBuf,
        /// Only the first N templates.
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(serde::Serialize)]
struct CombinationRow<'a> {
    template_id: usize,
    #[serde(flatten)]
    combination: Combination<'a>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("canonsql=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Command::Canonicalize {
            mode,
            schema,
            input,
            output,
            query,
            db,
        } => {
            let mode = match mode {
                Some(mode) => mode,
                None => config.mode()?,
            };
            let catalog = schema
                .as_deref()
                .map(Catalog::load)
                .transpose()
                .context("loading schema")?;

            if let Some(query) = query {
                let schema = catalog
                    .as_ref()
                    .zip(db.as_deref())
                    .and_then(|(catalog, db)| catalog.get(db));
                let template = Canonicalizer::new(mode.into())
                    .with_schema(schema)
                    .canonicalize(&query)
                    .template;
                let mut out = writer(output.as_deref())?;
                writeln!(out, "{template}")?;
                out.flush()?;
                return Ok(());
            }

            info!("Canonicalizing records in {mode} mode");
            BatchProcessor::new(mode.into(), config.record_fields())
                .with_catalog(catalog.as_ref())
                .run(reader(input.as_deref())?, writer(output.as_deref())?)?;
        }
        Command::Templates {
            input,
            output,
            field,
        } => {
            let field = field.unwrap_or_else(|| config.output_field.clone());
            let mut counter = TemplateCounter::new();
            let records = counter.observe_records(reader(input.as_deref())?, &field)?;

            let mut out = writer(output.as_deref())?;
            for ranked in counter.ranked() {
                serde_json::to_writer(&mut out, &ranked)?;
                writeln!(out)?;
            }
            out.flush()?;
            info!(
                "{} distinct templates across {records} records",
                counter.distinct()
            );
        }
        Command::Combinations {
            schema,
            templates,
            limit,
            output,
        } => {
            let catalog = Catalog::load(&schema).context("loading schema")?;
            let ranked = serde_json::Deserializer::from_reader(reader(Some(&templates))?)
                .into_iter::<RankedTemplate>()
                .take(limit.unwrap_or(usize::MAX))
                .collect::<std::result::Result<Vec<_>, _>>()
                .context("reading templates")?;

            let mut out = writer(output.as_deref())?;
            let mut written = 0usize;
            for template in ranked.iter().filter(|t| !t.canonical_sql.trim().is_empty()) {
                let slots = TemplateSlots::parse(&template.canonical_sql);
                for combination in combinations(&slots, &catalog) {
                    let row = CombinationRow {
                        template_id: template.template_id,
                        combination,
                    };
                    serde_json::to_writer(&mut out, &row)?;
                    writeln!(out)?;
                    written += 1;
                }
            }
            out.flush()?;
            info!("Wrote {written} combinations for {} templates", ranked.len());
        }
    }
    Ok(())
}

fn reader(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    Ok(match path {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    })
}

fn writer(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}
