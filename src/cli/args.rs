// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for crashplate

use clap::{Parser, Subcommand, ValueEnum};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::template::tokens::delimit;

#[derive(Parser)]
#[command(name = "crashplate")]
#[command(about = "Render crash report templates with application, machine and exception details")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a template file against a report
    Render {
        #[arg(help = "Path to the template file")]
        template: PathBuf,

        #[arg(
            short,
            long,
            help = "Report file (YAML or JSON); defaults to a report of this process"
        )]
        report: Option<PathBuf>,

        #[arg(short = 't', long = "token", help = "Custom token (name=value)")]
        tokens: Vec<String>,

        #[arg(short, long, help = "Write the rendered report to this file")]
        output: Option<PathBuf>,
    },

    /// Print the collected application and machine metadata
    Info {
        #[arg(long, value_enum, default_value = "text", help = "Output format")]
        format: InfoFormat,
    },

    /// List the built-in tokens
    Tokens,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InfoFormat {
    Text,
    Json,
    Yaml,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse custom tokens from name=value format
    pub fn parse_tokens(tokens: &[String]) -> anyhow::Result<HashMap<String, String>> {
        let mut parsed = HashMap::new();

        for token in tokens {
            if let Some((name, value)) = token.split_once('=') {
                parsed.insert(delimit(name)?, value.to_string());
            } else {
                return Err(anyhow::anyhow!(
                    "Invalid token format '{}'. Expected 'name=value'",
                    token
                ));
            }
        }

        Ok(parsed)
    }
}
