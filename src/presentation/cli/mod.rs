pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process::exit;

use crate::application::use_cases::{
    Action, ProjectOutcome, RunActionConfig, RunActionUseCase,
};
use crate::common::config::AppConfig;
use crate::common::result::OctoResult;
use crate::domain::declaration::ParseMode;
use crate::domain::entities::{ProjectTriple, Universe};
use crate::domain::value_objects::VirtualPath;
use crate::infrastructure::vcs::{GitVcs, VcsOperations};
use crate::presentation::ui::{ConsoleErrorSink, DisplayHelper};

/// Output format options for the list command
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// One `<workspace path>/<project>` per line (default)
    Text,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("OCTO_GIT_HASH"),
    ", built ",
    env!("OCTO_BUILD_DATE"),
    " for ",
    env!("OCTO_BUILD_TARGET"),
    ")"
);

/// octo - run git over every project of your declared workspaces
#[derive(Parser)]
#[command(name = "octo")]
#[command(about = "Run git over every project of your declared workspaces")]
#[command(version, long_version = LONG_VERSION)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Only visit the workspace with this alias
    #[arg(short, long, global = true)]
    pub workspace: Option<String>,

    /// Declaration file (defaults to ~/.octo/workspaces)
    #[arg(long = "def", global = true, env = "OCTO_DEF")]
    pub definition_file: Option<String>,

    /// Print the output of every git command
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, visible_alias = "no-colour")]
    pub no_color: bool,

    /// Stop at the first grammar violation in the declaration file
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pull every project
    Pull,

    /// Push every project
    Push,

    /// Check out a branch in every project
    Checkout {
        /// Branch to check out
        branch: String,
    },

    /// Clone every declared project that is not on disk yet
    Clone {
        /// Repository prefix; the project name is appended to it
        repository: String,
    },

    /// Show branch and change state of every project
    Status,

    /// List every declared project directory
    List {
        /// Output format (text, json, yaml)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the directory addressed by `alias[/project]`
    Path {
        /// Virtual path such as `w1/reader`
        virtual_path: String,
    },

    /// Write a starter declaration file
    Init {
        /// Force overwrite existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub fn from_cli(cli: Cli) -> Self {
        Self { cli }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        colored::control::set_override(!self.cli.no_color);

        match self.handle_command().await {
            Ok(true) => Ok(()),
            Ok(false) => exit(1),
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                exit(1);
            }
        }
    }

    /// Settings from the global flags.
    fn app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.cli.definition_file {
            Some(path) => AppConfig::new(PathBuf::from(path)),
            None => AppConfig::from_home()?,
        };
        if let Some(alias) = &self.cli.workspace {
            config = config.with_workspace_filter(alias.clone());
        }
        let parse_mode = if self.cli.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        };
        let config = config
            .with_verbose(self.cli.verbose)
            .with_colour(!self.cli.no_color)
            .with_parse_mode(parse_mode);

        config.validate()?;
        Ok(config)
    }

    /// Returns whether the command finished without reporting errors.
    async fn handle_command(&self) -> anyhow::Result<bool> {
        let config = self.app_config()?;

        let mut format = OutputFormat::Text;
        let action = match &self.cli.command {
            Commands::Init { force } => {
                self.handle_init_command(&config, *force).await?;
                return Ok(true);
            }
            Commands::List { format: requested } => {
                format = requested.clone();
                Action::List
            }
            Commands::Pull => Action::Pull,
            Commands::Push => Action::Push,
            Commands::Checkout { branch } => Action::Checkout {
                branch: branch.clone(),
            },
            Commands::Clone { repository } => Action::Clone {
                repository: repository.clone(),
            },
            Commands::Status => Action::Status,
            Commands::Path { virtual_path } => Action::Path {
                virtual_path: VirtualPath::new(virtual_path)?,
            },
        };

        self.handle_action_command(&config, action, &format).await
    }

    async fn handle_init_command(&self, config: &AppConfig, force: bool) -> anyhow::Result<()> {
        use crate::presentation::cli::commands::init::InitCommand;

        let display = DisplayHelper::new(config.colour);
        let init_cmd = InitCommand::new(config.definition_file.clone(), force);
        init_cmd.execute(&display).await
    }

    async fn handle_action_command(
        &self,
        config: &AppConfig,
        action: Action,
        format: &OutputFormat,
    ) -> anyhow::Result<bool> {
        let vcs = GitVcs::new();
        if action.requires_vcs() && !vcs.is_installed().await {
            return Err(anyhow::anyhow!("Git is not installed!"));
        }

        let mut sink = ConsoleErrorSink::new(config.colour);
        let universe = Universe::open(&config.definition_file, config.parse_mode, &mut sink)?;

        let run_config = RunActionConfig::new(action.clone())
            .with_workspace_filter(config.workspace_filter.clone())
            .with_verbose(config.verbose);
        let use_case = RunActionUseCase::new(run_config, vcs);

        if !action.is_repetitive() {
            let Action::Path { virtual_path } = &action else {
                return Ok(true);
            };
            if sink.published() > 0 {
                return Ok(false);
            }
            return match use_case.resolve_path(&universe, virtual_path, &mut sink) {
                Ok(path) => {
                    println!("{}", path.display());
                    Ok(true)
                }
                Err(_) => Ok(false),
            };
        }

        let display = DisplayHelper::new(config.colour);
        let verb = action.verb();
        let mut current_workspace: Option<String> = None;
        let mut listed: Vec<ProjectTriple> = Vec::new();

        let report = use_case
            .execute(&universe, &mut sink, |outcome: &ProjectOutcome| {
                let Some(verb) = verb else {
                    listed.push(outcome.triple.clone());
                    return;
                };
                let triple = &outcome.triple;
                if current_workspace.as_deref() != Some(triple.workspace_name.as_str()) {
                    println!(
                        "{}",
                        display.workspace_header(&triple.workspace_name, &triple.workspace_path)
                    );
                    current_workspace = Some(triple.workspace_name.clone());
                }
                println!("{}", display.format_outcome(verb, outcome));
                if let Some(output) = &outcome.output {
                    for line in output.lines() {
                        println!("   {}", line);
                    }
                }
            })
            .await?;

        if action.is_silent() {
            print!("{}", render_triples(&listed, format)?);
        } else if config.verbose {
            display.info(&format!(
                "{} processed, {} skipped, {} failed",
                report.processed, report.skipped, report.failed
            ));
        }

        Ok(report.is_success() && sink.published() == 0)
    }
}

/// Listing output: one path per line, or the triples as JSON or YAML.
pub fn render_triples(triples: &[ProjectTriple], format: &OutputFormat) -> OctoResult<String> {
    let rendered = match format {
        OutputFormat::Text => triples
            .iter()
            .map(|triple| format!("{}\n", triple.display_path()))
            .collect(),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(triples)?),
        OutputFormat::Yaml => serde_yaml::to_string(triples)?,
    };
    Ok(rendered)
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}
