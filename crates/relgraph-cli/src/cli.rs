use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "relgraph")]
#[command(about = "relgraph: GraphQL schemas induced from relational models")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ./relgraph.toml when present)
    #[arg(short, long, global = true, env = "RELGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the generated schema in SDL
    Sdl(ModelArgs),
    /// List root query fields and their types
    Fields(ModelArgs),
    /// Execute a query against an in-memory store
    Query(QueryArgs),
}

#[derive(clap::Args)]
pub struct ModelArgs {
    /// Model file (TOML, or JSON with a .json extension)
    #[arg(short, long)]
    pub model: PathBuf,
}

#[derive(clap::Args)]
pub struct QueryArgs {
    /// Model file (TOML, or JSON with a .json extension)
    #[arg(short, long)]
    pub model: PathBuf,
    /// JSON seed data mapping entity names to rows
    #[arg(short, long)]
    pub data: Option<PathBuf>,
    /// GraphQL query document
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_command() {
        let cli = Cli::try_parse_from([
            "relgraph",
            "query",
            "--model",
            "model.toml",
            "--data",
            "seed.json",
            "{ Users { Id } }",
        ])
        .unwrap();

        assert_eq!(cli.log_level, "warn");
        match cli.command {
            Commands::Query(args) => {
                assert_eq!(args.model, PathBuf::from("model.toml"));
                assert_eq!(args.data, Some(PathBuf::from("seed.json")));
                assert_eq!(args.query, "{ Users { Id } }");
            }
            _ => panic!("expected query command"),
        }
    }

    #[test]
    fn test_model_is_required() {
        assert!(Cli::try_parse_from(["relgraph", "sdl"]).is_err());
    }
}
