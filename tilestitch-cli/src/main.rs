//! tilestitch CLI - Command-line interface
//!
//! This binary provides a command-line interface to the tilestitch library.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};
use tilestitch::job::JobId;

use commands::common::GlobalArgs;
use commands::job::Geometry;

#[derive(Parser)]
#[command(name = "tilestitch")]
#[command(version = tilestitch::VERSION)]
#[command(about = "Download and stitch tiled gigapixel images", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve an image and download all of its tiles
    Download {
        /// Image id
        id: JobId,
    },

    /// Assemble previously downloaded tiles into one image
    Assemble {
        /// Image id
        id: JobId,

        /// Full image width in pixels
        #[arg(long)]
        width: u32,

        /// Full image height in pixels
        #[arg(long)]
        height: u32,

        /// Tile edge length in pixels
        #[arg(long)]
        tile_size: u32,
    },

    /// Download and assemble an image
    All {
        /// Image id
        id: JobId,
    },

    /// Add image ids to the queue (comma- or space-separated)
    AddQueue {
        /// Image ids
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Show the queued image ids
    ViewQueue,

    /// Download and assemble every queued image in order
    ProcessQueue,

    /// Create the configuration file with default values
    Init,
}

fn main() {
    let cli = Cli::parse();
    let global = &cli.global;

    let result = match cli.command {
        Commands::Download { id } => commands::job::download(global, id),
        Commands::Assemble {
            id,
            width,
            height,
            tile_size,
        } => commands::job::assemble(
            global,
            id,
            Geometry {
                width,
                height,
                tile_size,
            },
        ),
        Commands::All { id } => commands::job::all(global, id),
        Commands::AddQueue { ids } => commands::queue::add(global, &ids),
        Commands::ViewQueue => commands::queue::view(global),
        Commands::ProcessQueue => commands::queue::process(global),
        Commands::Init => commands::init::run(global),
    };

    if let Err(e) = result {
        e.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_assemble_with_global_flags() {
        let cli = Cli::try_parse_from([
            "tilestitch",
            "assemble",
            "42",
            "--width",
            "1000",
            "--height",
            "800",
            "--tile-size",
            "256",
            "--output-dir",
            "/tmp/out",
            "--debug",
        ])
        .unwrap();

        assert!(cli.global.debug);
        assert_eq!(cli.global.output_dir.as_deref(), Some(std::path::Path::new("/tmp/out")));
        match cli.command {
            Commands::Assemble { id, width, .. } => {
                assert_eq!(id.get(), 42);
                assert_eq!(width, 1000);
            }
            _ => panic!("expected assemble"),
        }
    }

    #[test]
    fn test_invalid_job_id_is_rejected() {
        assert!(Cli::try_parse_from(["tilestitch", "download", "abc"]).is_err());
        assert!(Cli::try_parse_from(["tilestitch", "download", "0"]).is_err());
    }

    #[test]
    fn test_add_queue_collects_ids() {
        let cli = Cli::try_parse_from(["tilestitch", "add-queue", "1,2", "3"]).unwrap();
        match cli.command {
            Commands::AddQueue { ids } => assert_eq!(ids, vec!["1,2", "3"]),
            _ => panic!("expected add-queue"),
        }
    }
}
