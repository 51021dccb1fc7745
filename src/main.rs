use chrono::NaiveDate;
use clap::{Parser, Subcommand};

mod api;
mod model;
mod render;
mod session;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "pedigree-organizer")]
#[command(about = "Dog records and pedigree trees over a remote API", long_about = None)]
struct Cli {
    /// Base URL of the pedigree service.
    #[arg(long, env = "PEDIGREE_API_URL", default_value = api::DEFAULT_API_BASE, global = true)]
    api: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List dogs, optionally filtered by a name search.
    Dogs {
        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// Create a dog record.
    Add {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "unknown")]
        sex: model::Sex,

        #[arg(long)]
        color: Option<String>,

        /// Birth date, YYYY-MM-DD.
        #[arg(long)]
        birth_date: Option<NaiveDate>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Print a dog's pedigree tree (or write it as a standalone HTML page).
    Pedigree {
        #[arg(long)]
        id: u64,

        /// Write a self-contained HTML page instead of printing.
        #[arg(short = 'o', long)]
        out: Option<String>,
    },

    /// Interactive directory + pedigree session.
    Browse,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pedigree_organizer=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let client = api::ApiClient::new(&cli.api)?;

    match cli.cmd {
        Commands::Dogs { query } => {
            let dogs = client.list_dogs(&query).await?;
            if dogs.is_empty() {
                println!("No dogs found.");
            }
            for dog in &dogs {
                println!("{:>5}  {}  ({})", dog.id, dog.name, dog.summary());
            }
        }

        Commands::Add {
            name,
            sex,
            color,
            birth_date,
            notes,
        } => {
            let draft = model::DogDraft {
                name,
                sex,
                color,
                birth_date,
                notes,
            };
            draft.validate()?;
            let dog = client.create_dog(&draft).await?;
            println!("Created {} (id {})", dog.name, dog.id);
        }

        Commands::Pedigree { id, out } => {
            let tree = client.pedigree(id, render::PEDIGREE_DEPTH).await?;
            let boxes = render::layout(Some(&tree), render::PEDIGREE_DEPTH);
            match out {
                Some(path) => {
                    let html = render::render_pedigree_page(&tree.name, boxes.as_ref())?;
                    std::fs::write(&path, html)?;
                    println!("Wrote {}", path);
                }
                None => print!("{}", render::render_text(boxes.as_ref())),
            }
        }

        Commands::Browse => session::browse::run(client).await?,
    }

    Ok(())
}
