//! CLI entry point for postmatter

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postmatter::commands::list::ListKind;
use postmatter::commands::new::NewPost;

#[derive(Parser)]
#[command(name = "postmatter")]
#[command(author = "Yukang Chen")]
#[command(version)]
#[command(about = "Checks the front-matter of Markdown blog posts", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every post and report all problems
    #[command(alias = "c")]
    Check {
        /// Re-check when files change
        #[arg(short, long)]
        watch: bool,
    },

    /// List site information
    List {
        /// Type of content to list (post, draft, featured, tag)
        #[arg(default_value = "post")]
        r#type: String,

        /// Include drafts and scheduled posts
        #[arg(short, long)]
        all: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Slug to use instead of the slugified title
        #[arg(short, long)]
        slug: Option<String>,

        /// Tag for the post (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Description (defaults to the title)
        #[arg(long)]
        description: Option<String>,

        /// Mark the post as a draft
        #[arg(long)]
        draft: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "postmatter=debug,info"
    } else {
        "postmatter=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Check { watch } => {
            let site = postmatter::Site::new(&base_dir)?;
            tracing::debug!("Checking posts in {:?}", site.content_dir);
            let summary = site.check()?;

            if watch {
                postmatter::commands::check::watch(&site).await?;
            } else if !summary.is_ok() {
                anyhow::bail!("Front-matter check failed");
            }
        }

        Commands::List { r#type, all, json } => {
            let site = postmatter::Site::new(&base_dir)?;
            let kind: ListKind = r#type.parse()?;
            postmatter::commands::list::run(&site, kind, all, json)?;
        }

        Commands::New {
            title,
            slug,
            tags,
            description,
            draft,
        } => {
            let site = postmatter::Site::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            let post = NewPost {
                title,
                slug,
                tags,
                description,
                draft,
            };
            let path = postmatter::commands::new::create_post(&site, &post)?;
            println!("Created: {}", path.display());
        }

        Commands::Version => {
            println!("postmatter version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
