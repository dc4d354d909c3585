use std::io;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;

use ini::{ParseOptions, RedeclaredSections};

/// Inspect and edit INI configuration files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the INI file
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Allow `#` comments and let repeated keys overwrite earlier ones
    #[arg(long)]
    permissive: bool,

    /// What to do when a section header repeats an earlier one
    #[arg(long, value_enum, default_value_t = Redeclared::Merge)]
    redeclared: Redeclared,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Redeclared {
    Merge,
    Replace,
}

impl From<Redeclared> for RedeclaredSections {
    fn from(value: Redeclared) -> Self {
        match value {
            Redeclared::Merge => RedeclaredSections::Merge,
            Redeclared::Replace => RedeclaredSections::Replace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every section name
    Sections,
    /// Print the value stored under KEY in SECTION
    Get { section: String, key: String },
    /// Store VALUE under KEY in SECTION and save the file
    Set {
        section: String,
        key: String,
        value: String,

        /// Where to save the result (defaults to FILE)
        #[arg(short, long, value_name = "OUTPUT_FILE")]
        output: Option<PathBuf>,
    },
    /// Print the whole document
    Dump,
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("warn"));

    let args = Args::parse();

    let options = if args.permissive {
        ParseOptions::permissive()
    } else {
        ParseOptions::new()
    }
    .redeclared_sections(args.redeclared.into());

    let mut ini = options
        .load(&args.path)
        .with_context(|| format!("failed to load {}", args.path.display()))?;

    match args.command {
        Command::Sections => {
            for name in ini.section_names() {
                println!("{name}");
            }
        }
        Command::Get { section, key } => {
            println!("{}", ini.get(&section, &key)?);
        }
        Command::Set {
            section,
            key,
            value,
            output,
        } => {
            ini.set(&section, &key, &value);

            let output = output.unwrap_or(args.path);
            ini.save(&output)
                .with_context(|| format!("failed to save {}", output.display()))?;
            log::info!("saved [{section}] {key} to {}", output.display());
        }
        Command::Dump => {
            ini.write_to(&mut io::stdout().lock())?;
        }
    }

    Ok(())
}
