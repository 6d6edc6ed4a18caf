mod view;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use localization_converter::{
    ConvertOptions, Converter, DryRunFileSystem, FileSystem, LocalFileSystem,
};

use crate::view::{print_json, print_view, read_map};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,

    /// Write plurals to Localizable.strings as references to the stringsdict entry
    #[arg(long, global = true)]
    include_plurals: bool,

    /// Parse and format everything but do not write any file
    #[arg(long, global = true)]
    dry_run: bool,

    /// Log debug events (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert one strings.xml into an output folder.
    File {
        /// The strings.xml file to convert
        #[arg(short, long)]
        input: PathBuf,
        /// The folder receiving Localizable.strings and Localizable.stringsdict
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Convert every values* folder of an Android res directory.
    Tree {
        /// The Android res directory
        #[arg(short, long)]
        input: PathBuf,
        /// The folder receiving the *.lproj folders
        #[arg(short, long)]
        output: PathBuf,
    },

    /// View the entries of a strings.xml.
    View {
        /// The strings.xml file to view
        #[arg(short, long)]
        input: PathBuf,

        /// Display full value without truncation
        #[arg(long)]
        full: bool,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_file<F: FileSystem>(fs: F, options: ConvertOptions, input: &Path, output: &Path) -> bool {
    if let Err(e) = fs.create_directory(output) {
        tracing::error!(output = %output.display(), error = %e, "Failed to create output folder");
        return false;
    }
    Converter::new(fs, options).convert_file(input, output)
}

fn run_tree<F: FileSystem>(fs: F, options: ConvertOptions, input: &Path, output: &Path) -> bool {
    Converter::new(fs, options).convert_tree(input, output)
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let options = ConvertOptions {
        include_plurals: args.include_plurals,
    };

    let ok = match args.commands {
        Commands::File { input, output } => {
            if args.dry_run {
                run_file(DryRunFileSystem::new(LocalFileSystem), options, &input, &output)
            } else {
                run_file(LocalFileSystem, options, &input, &output)
            }
        }
        Commands::Tree { input, output } => {
            if args.dry_run {
                run_tree(DryRunFileSystem::new(LocalFileSystem), options, &input, &output)
            } else {
                run_tree(LocalFileSystem, options, &input, &output)
            }
        }
        Commands::View { input, full, json } => match read_map(&LocalFileSystem, &input) {
            Ok(map) if json => match print_json(&map) {
                Ok(()) => true,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize entries");
                    false
                }
            },
            Ok(map) => {
                print_view(&map, full);
                true
            }
            Err(e) => {
                tracing::error!(input = %input.display(), error = %e, "Failed to read file");
                false
            }
        },
    };

    if !ok {
        process::exit(1);
    }
}
