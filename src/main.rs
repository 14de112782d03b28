//! twig CLI - minimal version control command line interface

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use twig::ops::{
    cat_file, checkout, commit, create_tag, format_tree, graph, hash_object, log, read_tree,
    write_tree,
};
use twig::{iter_all_refs, ObjectKind, Repo};

#[derive(Parser)]
#[command(name = "twig")]
#[command(about = "minimal version control - content-addressed objects, commits and refs")]
#[command(version)]
struct Cli {
    /// working directory of the repository
    #[arg(short = 'C', long, default_value = ".", env = "TWIG_WORK_TREE")]
    repo: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// initialize a new repository
    Init,

    /// store a file as a blob and print its id
    HashObject {
        /// file to hash
        file: PathBuf,
    },

    /// print an object's content
    CatFile {
        /// expected object type: blob, tree, commit
        object_type: String,

        /// object id or ref name
        object: String,
    },

    /// snapshot the working tree and print the tree id
    WriteTree,

    /// write a tree's content into the working tree
    ReadTree {
        /// tree id or ref name
        tree: String,
    },

    /// snapshot the working tree as a new commit on top of HEAD
    Commit {
        /// commit message
        #[arg(short, long)]
        message: String,
    },

    /// show commit history
    Log {
        /// commit to start from (default HEAD)
        name: Option<String>,

        /// maximum number of commits to show
        #[arg(short = 'n', long)]
        max_count: Option<usize>,
    },

    /// restore a commit into the working tree and move HEAD to it
    Checkout {
        /// commit id or ref name
        name: String,
    },

    /// create or move a tag
    Tag {
        /// tag name
        name: String,

        /// object to tag
        #[arg(default_value = "@")]
        target: String,
    },

    /// list all refs
    ShowRef,

    /// print the commit graph in graphviz dot format
    Graph,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("TWIG_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(cli: Cli) -> twig::Result<()> {
    match cli.command {
        Commands::Init => {
            let repo = Repo::init(&cli.repo)?;
            println!(
                "initialized empty twig repository in {}",
                repo.git_dir().display()
            );
        }

        Commands::HashObject { file } => {
            let repo = Repo::open(&cli.repo)?;
            let oid = hash_object(&repo, &file)?;
            println!("{}", oid);
        }

        Commands::CatFile {
            object_type,
            object,
        } => {
            let repo = Repo::open(&cli.repo)?;
            let kind: ObjectKind = object_type.parse()?;
            let payload = cat_file(&repo, kind, &object)?;

            match kind {
                ObjectKind::Tree => print!("{}", format_tree(&payload)?),
                ObjectKind::Blob | ObjectKind::Commit => write_stdout(&payload)?,
            }
        }

        Commands::WriteTree => {
            let repo = Repo::open(&cli.repo)?;
            let oid = write_tree(&repo)?;
            println!("{}", oid);
        }

        Commands::ReadTree { tree } => {
            let repo = Repo::open(&cli.repo)?;
            let files = read_tree(&repo, &tree)?;
            println!("wrote {} files", files);
        }

        Commands::Commit { message } => {
            let repo = Repo::open(&cli.repo)?;
            let oid = commit(&repo, &message)?;
            println!("{}", oid);
        }

        Commands::Log { name, max_count } => {
            let repo = Repo::open(&cli.repo)?;
            let entries = log(&repo, name.as_deref(), max_count)?;

            for entry in entries {
                println!("{}", entry);
            }
        }

        Commands::Checkout { name } => {
            let repo = Repo::open(&cli.repo)?;
            let oid = checkout(&repo, &name)?;
            println!("HEAD is now at {}", oid.short());
        }

        Commands::Tag { name, target } => {
            let repo = Repo::open(&cli.repo)?;
            let oid = create_tag(&repo, &name, &target)?;
            println!("{} {}", oid, name);
        }

        Commands::ShowRef => {
            let repo = Repo::open(&cli.repo)?;
            for item in iter_all_refs(&repo) {
                let (name, oid) = item?;
                println!("{} {}", oid, name);
            }
        }

        Commands::Graph => {
            let repo = Repo::open(&cli.repo)?;
            print!("{}", graph(&repo)?);
        }
    }

    Ok(())
}

fn write_stdout(data: &[u8]) -> twig::Result<()> {
    io::stdout()
        .write_all(data)
        .map_err(|e| twig::Error::Io {
            path: "stdout".into(),
            source: e,
        })
}
