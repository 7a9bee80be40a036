use camino::Utf8PathBuf;
use clap::Parser as _;
use color_eyre::{eyre::Context as _, Result};
use declare::{analyze, AnalysisOptions, AnalysisResult, DeclareModel, Template};
use itertools::Itertools;
use ltlf::EventSemantics;
use tracing_subscriber::prelude::*;

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::Registry::default()
        .with(tracing_error::ErrorLayer::default())
        .with(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    run()
}

#[derive(Debug, clap::Parser)]
#[command(version)]
struct Cli {
    #[clap(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, clap::Subcommand)]
enum Cmd {
    /// Check a model for satisfiability and redundant constraints
    ///
    /// Exits with status 1 if the analysis could not be completed.
    Analyze {
        /// The .decl file to analyze
        model: Utf8PathBuf,
        /// A .toml file with analysis options
        ///
        /// Flags given on the command line take precedence over the file.
        #[clap(long)]
        config: Option<Utf8PathBuf>,
        #[clap(long)]
        semantics: Option<EventSemantics>,
        /// Upper bound on the number of states of every compiled automaton
        #[clap(long)]
        max_states: Option<usize>,
        #[clap(long, short, default_value = "human")]
        format: OutputFormat,
    },

    /// Compile an LTLf formula and print the automaton description
    Compile {
        formula: String,
        /// Extra propositions to include in the alphabet
        #[clap(long, value_delimiter = ',')]
        activities: Vec<String>,
        /// Defaults to every valuation of the propositions
        #[clap(long)]
        semantics: Option<EventSemantics>,
        #[clap(long)]
        max_states: Option<usize>,
    },

    /// List the supported constraint templates
    Templates,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Analyze {
            model,
            config,
            semantics,
            max_states,
            format,
        } => {
            let mut options = match &config {
                Some(path) => AnalysisOptions::load(path)
                    .with_context(|| format!("failed to load options from {path}"))?,
                None => AnalysisOptions::default(),
            };
            if let Some(semantics) = semantics {
                options.semantics = semantics;
            }
            if let Some(max_states) = max_states {
                options.max_states = max_states;
            }
            tracing::debug!(?options, "resolved analysis options");

            let src = std::fs::read_to_string(&model)
                .with_context(|| format!("failed to read {model}"))?;
            let parsed: DeclareModel = src
                .parse()
                .with_context(|| format!("failed to parse {model}"))?;

            let result = analyze(&parsed, &options);
            match format {
                OutputFormat::Human => print_human(&result),
                OutputFormat::Json => {
                    serde_json::to_writer_pretty(std::io::stdout(), &result)?;
                    println!();
                }
            }
            if !result.success {
                std::process::exit(1);
            }
        }
        Cmd::Compile {
            formula,
            activities,
            semantics,
            max_states,
        } => {
            let mut compiler = ltlf::Compiler::new(&activities)
                .with_semantics(semantics.unwrap_or_default());
            if let Some(max_states) = max_states {
                compiler = compiler.with_max_states(max_states);
            }
            match compiler.compile(&formula) {
                Ok(description) => print!("{description}"),
                Err(err) => {
                    println!("{:?}", miette::Report::new(err));
                    std::process::exit(1);
                }
            }
        }
        Cmd::Templates => {
            for template in Template::catalog() {
                let example = declare::build_formula(
                    template.name(),
                    &["A", "B"][..template.arity()],
                )
                .with_context(|| format!("failed to expand {template}"))?;
                println!(
                    "{:<24} {}  {}",
                    template.name(),
                    template.arity(),
                    example.formula
                );
            }
        }
    }

    Ok(())
}

fn print_human(result: &AnalysisResult) {
    if let Some(error) = &result.error {
        println!("error: {error}");
        return;
    }
    println!(
        "satisfiable: {}",
        if result.satisfiable { "yes" } else { "no" }
    );
    if result.redundant_constraints.is_empty() {
        println!("no redundant constraints");
        return;
    }
    println!(
        "redundant constraints ({}):",
        result.redundant_constraints.len()
    );
    for r in &result.redundant_constraints {
        println!(
            "  {}[{}]  {}",
            r.template,
            r.activities.iter().format(", "),
            r.formula
        );
    }
}

#[derive(Debug, Default, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Human,
    Json,
}
