//! PromptGuard CLI - command-line front end for the screening pipeline

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use guard_core::{Action, GuardConfig, MitigationEngine};
use guard_intent::ChatClient;

#[derive(Parser)]
#[command(name = "promptguard")]
#[command(about = "PromptGuard - Hybrid screening for LLM-bound prompts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Analyze a prompt and print the full decision as JSON
    Analyze {
        /// The prompt to screen
        prompt: String,
        /// Optional configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a configuration file
    Check {
        /// Configuration file path (JSON)
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show a direct model response next to the protected response
    Compare {
        /// The prompt to compare
        prompt: String,
        /// Optional configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<GuardConfig> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => GuardConfig::default(),
    };

    // The API key comes from the environment unless the file pins one.
    if config.intent.api_key.is_none() {
        config.intent.api_key = guard_intent::IntentConfig::from_env().api_key;
    }

    Ok(config)
}

async fn run_analyze(prompt: &str, config_path: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let engine = MitigationEngine::new(config)?;

    let decision = engine.analyze(prompt).await?;
    println!("{}", serde_json::to_string_pretty(&decision)?);
    Ok(())
}

fn run_check(config_path: &PathBuf) -> anyhow::Result<()> {
    let config = load_config(Some(config_path))?;
    let rules = config.detector.rules.len();
    let keywords = config.policy.denylist.len();

    // Constructing the engine runs every load-time validation.
    MitigationEngine::new(config)?;
    println!(
        "Configuration OK: {} pattern rules, {} denylist keywords",
        rules, keywords
    );
    Ok(())
}

async fn run_compare(prompt: &str, config_path: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let chat = ChatClient::from_config(&config.intent);
    let engine = MitigationEngine::new(config)?;

    let direct_response = match &chat {
        Some(client) => client
            .complete_chat(prompt)
            .await
            .unwrap_or_else(|e| format!("Error calling model API: {e}")),
        None => "Model API key not configured. Set GROQ_API_KEY to enable comparison.".to_string(),
    };

    let decision = engine.analyze(prompt).await?;
    let protected_response = match decision.action {
        Action::Block => format!(
            "SECURITY BLOCK\n\nThreat Detected: {}\n\nMitigation Mode: {}\nRisk Level: {}\nConfidence: {}%",
            decision.explanation,
            decision.mitigation_mode,
            decision.risk_level,
            (decision.confidence * 100.0).round() as u8
        ),
        Action::Sanitize | Action::Rewrite => {
            let answer = match &chat {
                Some(client) => client
                    .complete_chat(&decision.sanitized_prompt)
                    .await
                    .unwrap_or_else(|e| format!("Error calling model API: {e}")),
                None => "(model unavailable)".to_string(),
            };
            format!(
                "{} & FORWARDED\n\nSafe Prompt: {}\n\nAnswer: {}",
                decision.mitigation_mode.to_uppercase(),
                decision.sanitized_prompt,
                answer
            )
        }
        Action::Allow => direct_response.clone(),
    };

    println!("=== Direct response ===\n{direct_response}\n");
    println!("=== Protected response ===\n{protected_response}\n");
    println!("=== Analysis ===\n{}", serde_json::to_string_pretty(&decision)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Analyze { prompt, config }) => run_analyze(&prompt, config.as_ref()).await,
        Some(Commands::Check { config }) => run_check(&config),
        Some(Commands::Compare { prompt, config }) => run_compare(&prompt, config.as_ref()).await,
        None => {
            println!("PromptGuard v0.1.0 - Use --help for commands");
            Ok(())
        }
    }
}
