//! kvbridge command-line interface.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use kvbridge::{Store, StoreConfig, TaggedValue, ValueTag, codec};

#[derive(Parser)]
#[command(name = "kvbridge")]
#[command(about = "Inspect and edit a kvbridge typed key-value store")]
struct Cli {
    /// Store path
    #[arg(long, default_value = ".kvbridge", env = "KVBRIDGE_PATH", global = true)]
    path: PathBuf,

    /// Store configuration file (TOML)
    #[arg(long, env = "KVBRIDGE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "kvbridge=debug" (defaults to RUST_LOG, then "warn")
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every key in engine order
    Keys,

    /// Print the value stored under a key
    Get {
        /// Key to read
        key: String,

        /// Type the value was written with
        #[arg(short = 't', long = "type", value_enum, default_value = "string")]
        tag: TypeArg,
    },

    /// Store a value under a key
    Set {
        /// Key to write
        key: String,

        /// Value as text (bools accept true/false/1/0)
        value: String,

        /// Type to store the value as
        #[arg(short = 't', long = "type", value_enum, default_value = "string")]
        tag: TypeArg,
    },

    /// Remove one or more keys in a single batch
    Rm {
        /// Keys to remove
        #[arg(required = true)]
        keys: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TypeArg {
    Double,
    Float,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Bool,
    String,
}

impl TypeArg {
    /// The codec tag for signed and non-numeric types.
    fn tag(self) -> Option<ValueTag> {
        match self {
            TypeArg::Double => Some(ValueTag::Double),
            TypeArg::Float => Some(ValueTag::Float),
            TypeArg::Int32 => Some(ValueTag::Int32),
            TypeArg::Int64 => Some(ValueTag::Int64),
            TypeArg::Bool => Some(ValueTag::Bool),
            TypeArg::String => Some(ValueTag::String),
            TypeArg::Uint32 | TypeArg::Uint64 => None,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.log_level.as_deref())?;

    let config = match &cli.config {
        Some(path) => StoreConfig::from_file(path)?,
        None => StoreConfig::default(),
    };
    let mut store = Store::open_with(&cli.path, &config)
        .with_context(|| format!("opening store at {}", cli.path.display()))?;

    match cli.command {
        Commands::Keys => {
            for key in store.all_keys()? {
                println!("{}", String::from_utf8_lossy(&key));
            }
        }
        Commands::Get { key, tag } => {
            let value = match tag {
                TypeArg::Uint32 => store.get_u32(&key)?.map(|v| v.to_string()),
                TypeArg::Uint64 => store.get_u64(&key)?.map(|v| v.to_string()),
                other => match other.tag() {
                    Some(tag) => store.get(&key, tag)?.map(|v| v.to_string()),
                    None => None,
                },
            };
            match value {
                Some(value) => println!("{value}"),
                None => bail!("key '{key}' not found"),
            }
        }
        Commands::Set { key, value, tag } => match tag {
            TypeArg::Uint32 => store.put_u32(&key, value.parse::<u32>().context("invalid uint32")?)?,
            TypeArg::Uint64 => store.put_u64(&key, value.parse::<u64>().context("invalid uint64")?)?,
            other => {
                let parsed = parse_value(&value, other.tag().unwrap_or(ValueTag::String))?;
                store.put(&key, &parsed)?;
            }
        },
        Commands::Rm { keys } => {
            store.delete_many(&keys)?;
        }
    }

    store.close();
    Ok(())
}

fn parse_value(text: &str, tag: ValueTag) -> anyhow::Result<TaggedValue> {
    let text = match (tag, text) {
        (ValueTag::Bool, "true") => "1",
        (ValueTag::Bool, "false") => "0",
        _ => text,
    };
    Ok(codec::decode(text.as_bytes(), tag)?)
}

fn init_logging(level: Option<&str>) -> anyhow::Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).context("invalid log filter")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
