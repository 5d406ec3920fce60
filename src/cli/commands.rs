use std::fmt::Display;
use std::path::PathBuf;
use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::engine::{Executor, Matrix, TreeNode};
use crate::input;
use crate::units;

const SAMPLE_TREE: &str = r#"{
    "value": 10,
    "left": {"value": 5, "left": null, "right": null},
    "right": {"value": 20, "left": null, "right": null}
}"#;

const SAMPLE_MATRIX_A: &str = "[[1, 2, 3], [4, 5, 6]]";
const SAMPLE_MATRIX_B: &str = "[[7, 8], [9, 10], [11, 12]]";

#[derive(Parser)]
#[command(name = "fanjoin")]
#[command(about = "Run batches of async task units concurrently and join their results in order")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(long, short, global = true, help = "Path to a configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Print results as JSON")]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Wait VALUE time units per value and collect the values in input order
    Delays {
        #[arg(help = "Delays in time units; read from stdin when omitted")]
        values: Vec<String>,
    },

    /// Count the words of every file and print the total
    Words {
        #[arg(help = "Files to count; read from stdin (whitespace separated) when omitted")]
        files: Vec<String>,
    },

    /// Keep the prime numbers, in input order
    Primes {
        #[arg(help = "Numbers to test; read from stdin when omitted")]
        numbers: Vec<String>,
    },

    /// Minimum of the numbers, computed over two concurrent halves
    Min {
        #[arg(help = "Numbers; read from stdin when omitted")]
        numbers: Vec<String>,
    },

    /// Sum of the squares of the numbers
    Squares {
        #[arg(help = "Numbers; read from stdin when omitted")]
        numbers: Vec<String>,
    },

    /// Sum every value of a JSON binary tree
    Tree {
        #[arg(short, long, help = "JSON tree file (\"-\" for stdin); sample tree when omitted")]
        file: Option<PathBuf>,
    },

    /// Multiply two JSON matrices row by row
    Matrix {
        #[arg(long, help = "Left matrix as JSON rows")]
        a: Option<String>,

        #[arg(long, help = "Right matrix as JSON rows")]
        b: Option<String>,
    },

    /// Write the effective configuration to the user config file
    Init {
        #[arg(short, long, help = "Force overwrite existing configuration")]
        force: bool,
    },
}

pub async fn execute_command(
    command: &Commands,
    executor: &Executor,
    config: &Config,
    json: bool,
) -> Result<()> {
    match command {
        Commands::Delays { values } => {
            let values: Vec<u32> = input::tokens_or_stdin(values).await?;
            let collected = units::collect_delays(executor, values).await?;
            emit_list(&collected, json)
        },
        Commands::Words { files } => {
            let paths = input::paths_or_stdin(files).await?;
            let total = units::total_word_count(executor, paths).await?;
            emit(&total, json)
        },
        Commands::Primes { numbers } => {
            let numbers: Vec<i64> = input::tokens_or_stdin(numbers).await?;
            let primes = units::filter_primes(executor, numbers).await?;
            emit_list(&primes, json)
        },
        Commands::Min { numbers } => {
            let numbers: Vec<i64> = input::tokens_or_stdin(numbers).await?;
            let min = units::min_of_partitions(executor, &numbers).await?;
            emit(&min, json)
        },
        Commands::Squares { numbers } => {
            let numbers: Vec<i64> = input::tokens_or_stdin(numbers).await?;
            let total = units::sum_of_squares(executor, numbers).await?;
            emit(&total, json)
        },
        Commands::Tree { file } => {
            handle_tree_command(file.as_ref(), executor, json).await
        },
        Commands::Matrix { a, b } => {
            handle_matrix_command(a.as_deref(), b.as_deref(), executor, json).await
        },
        Commands::Init { force } => {
            handle_init_command(*force, config)
        },
    }
}

async fn handle_tree_command(file: Option<&PathBuf>, executor: &Executor, json: bool) -> Result<()> {
    // `null` is a valid document: the absent tree
    let tree: Option<TreeNode> = match file {
        Some(path) if path.as_os_str() == "-" => input::parse_json(&input::read_all().await?)?,
        Some(path) => input::load_json(path).await?,
        None => input::parse_json(SAMPLE_TREE)?,
    };

    let total = executor.reduce_tree(tree.as_ref()).await?;

    if json {
        emit(&total, true)
    } else {
        println!("Total sum: {}", total);
        Ok(())
    }
}

async fn handle_matrix_command(
    a: Option<&str>,
    b: Option<&str>,
    executor: &Executor,
    json: bool,
) -> Result<()> {
    let a: Matrix<i64> = input::parse_json(a.unwrap_or(SAMPLE_MATRIX_A))?;
    let b: Matrix<i64> = input::parse_json(b.unwrap_or(SAMPLE_MATRIX_B))?;

    let product = executor.multiply(&a, &b).await?;
    emit(&product, json)
}

fn handle_init_command(force: bool, config: &Config) -> Result<()> {
    let config_path = Config::get_default_config_path();

    if config_path.exists() && !force {
        anyhow::bail!(
            "Configuration already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    config.save(&config_path)?;
    info!("Wrote configuration to {}", config_path.display());
    println!("Configuration initialized at {}", config_path.display());

    Ok(())
}

fn emit<T: Serialize + Display>(value: &T, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(value)?);
    } else {
        println!("{}", value);
    }
    Ok(())
}

fn emit_list<T: Serialize + std::fmt::Debug>(values: &[T], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(values)?);
    } else {
        println!("{:?}", values);
    }
    Ok(())
}
