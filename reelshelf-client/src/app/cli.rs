use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use reelshelf_model::{MediaKind, QuerySignature, SortColumn, SortSpec};

#[derive(Parser, Debug)]
#[command(name = "reelshelf", version, about = "Browse and edit a Reelshelf media catalog")]
pub struct Cli {
    /// Backend base URL (overrides config and REELSHELF_SERVER_URL)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Only print warnings and errors from the client itself
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the saved session
    Logout,
    /// List records page by page
    List {
        #[command(flatten)]
        filters: FilterArgs,
        /// Number of pages to load (each page is 20 records)
        #[arg(long, default_value_t = 1)]
        pages: u32,
        /// Keep loading until the server runs out
        #[arg(long, conflicts_with = "pages")]
        all: bool,
        /// Sort column: id, title, director, year, type
        #[arg(long)]
        sort: Option<SortColumn>,
        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
    },
    /// Years and directors available among loaded records
    Facets {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Show one record in detail
    Show { id: i64 },
    /// Add a record
    Add(AddArgs),
    /// Edit fields of an existing record
    Edit(EditArgs),
    /// Delete a record
    Delete { id: i64 },
    /// Print the effective configuration
    Config {
        /// Write the effective configuration to config.json
        #[arg(long)]
        save: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Free-text title search
    #[arg(long)]
    pub search: Option<String>,
    /// MOVIE or TV_SHOW
    #[arg(long = "type")]
    pub media_type: Option<MediaKind>,
    #[arg(long)]
    pub year: Option<i32>,
    #[arg(long)]
    pub director: Option<String>,
}

impl FilterArgs {
    pub fn signature(&self) -> QuerySignature {
        QuerySignature::new()
            .with_search(self.search.clone().unwrap_or_default())
            .with_type(self.media_type)
            .with_year(self.year)
            .with_director(self.director.clone())
    }
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub director: String,
    #[arg(long)]
    pub year: i32,
    #[arg(long = "type", default_value = "MOVIE")]
    pub media_type: MediaKind,
    /// Poster image file
    #[arg(long)]
    pub poster: PathBuf,
    /// Gallery image file, repeatable
    #[arg(long = "image")]
    pub images: Vec<PathBuf>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub budget: Option<f64>,
    #[arg(long)]
    pub location: Option<String>,
    /// Running time in minutes
    #[arg(long)]
    pub duration: Option<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    pub id: i64,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub director: Option<String>,
    #[arg(long)]
    pub year: Option<i32>,
    #[arg(long = "type")]
    pub media_type: Option<MediaKind>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub budget: Option<f64>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub duration: Option<u32>,
    /// Replace the poster with this file
    #[arg(long)]
    pub poster: Option<PathBuf>,
    /// Append a gallery image; existing images are kept
    #[arg(long = "image")]
    pub images: Vec<PathBuf>,
}

/// Sort flags as the view expects them
pub fn sort_spec(column: Option<SortColumn>, desc: bool) -> Option<SortSpec> {
    column.map(|column| {
        if desc {
            SortSpec::descending(column)
        } else {
            SortSpec::ascending(column)
        }
    })
}
