use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use redline::{
    CitationStyle, DocumentType, EngineConfig, FixMode, KindSelector, ScoringMode, Session,
};

#[derive(Parser)]
#[command(
    name = "redline",
    about = "Annotate prose with writing issues and apply corrections",
    version
)]
struct Cli {
    /// File paths to analyze (reads stdin if none provided)
    files: Vec<String>,

    /// YAML or JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Document type
    #[arg(long = "type", value_enum)]
    document_type: Option<DocumentType>,

    /// Citation style
    #[arg(long, value_enum)]
    style: Option<CitationStyle>,

    #[arg(long)]
    no_grammar: bool,

    #[arg(long)]
    no_spelling: bool,

    #[arg(long)]
    no_style: bool,

    #[arg(long)]
    no_citations: bool,

    /// Enable the similarity check
    #[arg(long)]
    plagiarism: bool,

    /// Seed for reproducible sampling and scores
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum)]
    scoring: Option<ScoringMode>,

    /// Apply fixes of one kind ("all" for every kind) and print the result
    #[arg(long, value_name = "KIND")]
    fix: Option<KindSelector>,

    /// With --fix, skip advisory suggestions
    #[arg(long)]
    literal_only: bool,
}

impl Cli {
    fn engine_config(&self) -> Result<EngineConfig, String> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load(path).map_err(|e| format!("{}: {e}", path.display()))?,
            None => EngineConfig::default(),
        };
        let options = &mut config.options;
        if let Some(t) = self.document_type {
            options.document_type = t;
        }
        if let Some(s) = self.style {
            options.citation_style = s;
        }
        options.check_grammar &= !self.no_grammar;
        options.check_spelling &= !self.no_spelling;
        options.check_style &= !self.no_style;
        options.check_citations &= !self.no_citations;
        options.check_plagiarism |= self.plagiarism;
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(mode) = self.scoring {
            config.scoring = mode;
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = match cli.engine_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let inputs: Vec<(String, String)> = if cli.files.is_empty() {
        let mut input = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut input) {
            eprintln!("Error reading stdin: {e}");
            return ExitCode::FAILURE;
        }
        vec![("<stdin>".to_string(), input)]
    } else {
        let mut inputs = Vec::new();
        for path in &cli.files {
            match std::fs::read_to_string(path) {
                Ok(text) => inputs.push((path.clone(), text)),
                Err(e) => {
                    eprintln!("Error reading {path}: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
        inputs
    };

    let mut session = Session::from_config(&config);
    let mode = if cli.literal_only {
        FixMode::LiteralOnly
    } else {
        FixMode::All
    };

    for (name, text) in &inputs {
        if let Err(e) = run(&mut session, &config, text, cli.fix, mode) {
            eprintln!("Error in {name}: {e}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

fn run(
    session: &mut Session,
    config: &EngineConfig,
    text: &str,
    fix: Option<KindSelector>,
    mode: FixMode,
) -> Result<(), Box<dyn std::error::Error>> {
    let analysis = session.analyze(text, &config.options)?;
    let json = match fix {
        Some(selector) => serde_json::to_string_pretty(&session.apply_fixes_with(selector, mode)?)?,
        None => serde_json::to_string_pretty(&analysis)?,
    };
    println!("{json}");
    Ok(())
}
