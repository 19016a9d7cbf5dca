use anyhow::{anyhow, Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use keyword_engine::{ClusterOptions, ClusterReport, ClusteringEngine, Intent, Keyword};
use keyword_exchange::{
    export_csv, export_json, read_keywords, render_table, render_tree, CsvOptions,
    HierarchyNode, KeywordSource,
};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

const NO_KEYWORDS: &str = "Please enter some keywords or upload a file";

#[derive(Parser)]
#[command(name = "keyword-cluster")]
#[command(about = "Group keywords into clusters of related terms", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (includes every merge step)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Cluster keywords and render or export the result
    Cluster(ClusterArgs),

    /// Print the search intent of each keyword
    Classify(ClassifyArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Keyword file (.csv upload with header, or newline/comma separated text); `-` for stdin
    #[arg(short, long, conflicts_with = "keywords")]
    input: Option<String>,

    /// Keywords inline, newline- or comma-separated
    #[arg(short, long)]
    keywords: Option<String>,
}

impl InputArgs {
    fn source(&self) -> Result<KeywordSource> {
        match (&self.input, &self.keywords) {
            (Some(path), _) => Ok(KeywordSource::from_arg(path)),
            (None, Some(text)) => Ok(KeywordSource::Inline(text.clone())),
            (None, None) => Err(anyhow!(NO_KEYWORDS)),
        }
    }

    fn load(&self) -> Result<Vec<String>> {
        let source = self.source()?;
        let keywords = read_keywords(&source).context("Failed to read keywords")?;
        if keywords.is_empty() {
            return Err(anyhow!(NO_KEYWORDS));
        }
        Ok(keywords)
    }
}

#[derive(Args)]
struct ClusterArgs {
    #[command(flatten)]
    input: InputArgs,

    /// TOML file with clustering options; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minimum mean similarity for two clusters to merge (0..=1)
    #[arg(short, long, env = "KEYWORD_CLUSTER_THRESHOLD")]
    threshold: Option<f64>,

    /// Maximum number of clusters
    #[arg(short, long, env = "KEYWORD_CLUSTER_MAX")]
    max_clusters: Option<usize>,

    /// Blend in the mock SERP overlap signal
    #[arg(long)]
    serp: bool,

    /// Blend in the intent match signal
    #[arg(long)]
    intent: bool,

    /// Same as --intent
    #[arg(long)]
    group_by_intent: bool,

    /// Seed for the mock SERP signal
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fill the CSV Intent column with the rule-based intent
    #[arg(long)]
    label_intent: bool,
}

impl ClusterArgs {
    fn options(&self) -> Result<ClusterOptions> {
        let mut options = match &self.config {
            Some(path) => ClusterOptions::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ClusterOptions::default(),
        };

        if let Some(threshold) = self.threshold {
            options.threshold = threshold;
        }
        if let Some(max_clusters) = self.max_clusters {
            options.max_clusters = max_clusters;
        }
        options.use_serp |= self.serp;
        options.use_intent |= self.intent;
        options.group_by_intent |= self.group_by_intent;
        if self.seed.is_some() {
            options.serp_seed = self.seed;
        }

        options.validate().context("Invalid clustering options")?;
        Ok(options)
    }
}

#[derive(Args)]
struct ClassifyArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output JSON instead of tab-separated lines
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Fixed-width table, one row per cluster
    Table,
    /// Indented hierarchy: clusters under a root, secondary keywords under primaries
    Tree,
    /// Hierarchy as JSON (`name` / `children`)
    Mindmap,
    /// Cluster results as a JSON array
    Json,
    /// Cluster results plus merge trace as JSON
    Report,
    /// Cluster,Intent,Keyword Type,Keyword,Branded
    Csv,
}

#[derive(Serialize)]
struct IntentRow<'a> {
    keyword: &'a str,
    intent: Intent,
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Cluster(args) => run_cluster(args),
        Commands::Classify(args) => run_classify(args),
    }
}

fn run_cluster(args: ClusterArgs) -> Result<()> {
    let options = args.options()?;
    let keywords = Keyword::from_texts(args.input.load()?);

    let engine = ClusteringEngine::new(options);
    let report = engine
        .generate(&keywords)
        .context("Error generating clusters")?;

    log::info!(
        "{} keywords -> {} clusters (stop: {:?})",
        keywords.len(),
        report.clusters.len(),
        report.trace.stop
    );

    let rendered = render_report(&report, args.format, args.label_intent)?;
    write_output(args.output.as_ref(), &rendered)
}

fn render_report(
    report: &ClusterReport,
    format: OutputFormat,
    label_intent: bool,
) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    match format {
        OutputFormat::Table => buf.extend_from_slice(render_table(&report.clusters).as_bytes()),
        OutputFormat::Tree => buf.extend_from_slice(render_tree(&report.clusters).as_bytes()),
        OutputFormat::Mindmap => {
            let root = HierarchyNode::from_clusters(&report.clusters);
            serde_json::to_writer_pretty(&mut buf, &root)?;
            buf.push(b'\n');
        }
        OutputFormat::Json => export_json(&report.clusters, &mut buf)?,
        OutputFormat::Report => {
            serde_json::to_writer_pretty(&mut buf, report)?;
            buf.push(b'\n');
        }
        OutputFormat::Csv => {
            export_csv(&report.clusters, CsvOptions { label_intent }, &mut buf)?
        }
    }
    Ok(buf)
}

fn write_output(path: Option<&PathBuf>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn run_classify(args: ClassifyArgs) -> Result<()> {
    let keywords = args.input.load()?;
    let rows: Vec<IntentRow<'_>> = keywords
        .iter()
        .map(|keyword| IntentRow {
            keyword,
            intent: Intent::classify(keyword),
        })
        .collect();

    let mut stdout = io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &rows)?;
        writeln!(stdout)?;
    } else {
        for row in &rows {
            writeln!(stdout, "{}\t{}", row.keyword, row.intent)?;
        }
    }
    Ok(())
}
