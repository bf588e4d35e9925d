use anyhow::Result;
use bodymap::commands::{
    generate_command, inspect_command, lookup_command, names_command, DEFAULT_INPUT,
    DEFAULT_OUTPUT,
};
use clap::{Parser, Subcommand};

/// Body-map path table generator.
///
/// This CLI is a thin wrapper around `bodymap-core` (exposed in code as `bodymap_core`).
/// All labeling logic lives in the library so it can be tested thoroughly.
#[derive(Parser, Debug)]
#[command(
    name = "bodymap",
    version,
    about = "Generate the side-labeled body-map path table",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert the authored asset file into the path table.
    ///
    /// This will:
    /// - Extract the front and back blocks from the input.
    /// - Label every polygon with a side-suffixed id and localized name.
    /// - Write the table atomically (nothing is written on error).
    Generate {
        /// Project root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Authored asset file, relative to the root.
        #[arg(long, default_value = DEFAULT_INPUT)]
        input: String,

        /// Generated table, relative to the root.
        #[arg(long, default_value = DEFAULT_OUTPUT)]
        output: String,

        /// Optional generator config (.json, .yaml or .yml).
        #[arg(long)]
        config: Option<String>,

        /// Output format: ts or json.
        #[arg(long, default_value = "ts")]
        format: String,

        /// Keep colliding ids instead of failing.
        #[arg(long, default_value_t = false)]
        allow_duplicate_ids: bool,

        /// Emit the build report as JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show the entries, centroids and sides found in the input without writing anything.
    Inspect {
        /// Project root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Authored asset file, relative to the root.
        #[arg(long, default_value = DEFAULT_INPUT)]
        input: String,

        /// Optional generator config (.json, .yaml or .yml).
        #[arg(long)]
        config: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Look up an id in a generated table; fails and lists near matches when absent.
    Lookup {
        /// Id to look for (e.g., `upper_back_l`).
        #[arg(long)]
        id: String,

        /// Project root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Generated table, relative to the root.
        #[arg(long, default_value = DEFAULT_OUTPUT)]
        table: String,

        /// Name of the exported array in the table.
        #[arg(long, default_value = "BODY_PATHS")]
        const_name: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List the localized region names in effect.
    Names {
        /// Project root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Optional generator config (.json, .yaml or .yml).
        #[arg(long)]
        config: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // A bare invocation is the one-shot conversion with default paths.
    let command = cli.command.unwrap_or(Command::Generate {
        root: ".".to_string(),
        input: DEFAULT_INPUT.to_string(),
        output: DEFAULT_OUTPUT.to_string(),
        config: None,
        format: "ts".to_string(),
        allow_duplicate_ids: false,
        json: false,
    });

    match command {
        Command::Generate { root, input, output, config, format, allow_duplicate_ids, json } => {
            generate_command(
                &root,
                &input,
                &output,
                config.as_deref(),
                &format,
                allow_duplicate_ids,
                json,
            )?
        }
        Command::Inspect { root, input, config, json } => {
            inspect_command(&root, &input, config.as_deref(), json)?
        }
        Command::Lookup { id, root, table, const_name, json } => {
            lookup_command(&root, &table, &const_name, &id, json)?
        }
        Command::Names { root, config, json } => names_command(&root, config.as_deref(), json)?,
    }

    Ok(())
}
