use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use linkvault_core::LinkType;

#[derive(Parser)]
#[command(name = "linkvault")]
#[command(about = "Save, organize and share links from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// CLI profile name (selects backend URLs and stored session)
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,

    /// Override the backend API base URL for this invocation
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account, sign in or out
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Manage saved links
    Links {
        #[command(subcommand)]
        command: LinkCommands,
    },
    /// Manage folders
    Folders {
        #[command(subcommand)]
        command: FolderCommands,
    },
    /// Share your links publicly
    Share {
        #[command(subcommand)]
        command: ShareCommands,
    },
    /// Show the links behind a share token or share URL
    Shared {
        /// Share token, `/shared/<token>` path or full share URL
        target: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum LinkKind {
    #[value(name = "youtube")]
    YouTube,
    Tweet,
    Article,
    #[default]
    Other,
}

impl From<LinkKind> for LinkType {
    fn from(kind: LinkKind) -> Self {
        match kind {
            LinkKind::YouTube => Self::YouTube,
            LinkKind::Tweet => Self::Tweet,
            LinkKind::Article => Self::Article,
            LinkKind::Other => Self::Other,
        }
    }
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Create an account
    Signup {
        #[arg(long, value_name = "EMAIL")]
        email: String,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
        /// Optional display name
        #[arg(long, value_name = "NAME")]
        name: Option<String>,
    },
    /// Sign in and store the session token for the profile
    Signin {
        #[arg(long, value_name = "EMAIL")]
        email: String,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Forget the stored session token
    Signout,
    /// Show whether the profile holds a session
    Status,
}

#[derive(Subcommand)]
pub enum LinkCommands {
    /// List saved links, newest additions first
    List {
        /// Only show links in this folder
        #[arg(long, value_name = "FOLDER_ID")]
        folder: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Save a new link
    Add {
        #[arg(long)]
        url: String,
        #[arg(long)]
        title: String,
        #[arg(long = "type", value_enum, default_value_t = LinkKind::Other)]
        kind: LinkKind,
        #[arg(long)]
        description: Option<String>,
        /// Tag to attach (repeatable)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,
        #[arg(long, value_name = "FOLDER_ID")]
        folder: Option<String>,
    },
    /// Delete a link by ID
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum FolderCommands {
    /// Show the folder tree
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a folder
    Create {
        name: String,
        #[arg(long, value_name = "FOLDER_ID")]
        parent: Option<String>,
    },
    /// Rename a folder
    Rename { id: String, name: String },
    /// Move a folder under another one, or to the top level when --parent is omitted
    Move {
        id: String,
        #[arg(long, value_name = "FOLDER_ID")]
        parent: Option<String>,
    },
    /// Delete a folder
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum ShareCommands {
    /// Mint a new public share link
    Generate,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update a profile
    Init {
        /// Profile name to initialize
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Backend API base URL (e.g. <http://localhost:8000/api>)
        #[arg(long, value_name = "URL")]
        api_base_url: Option<String>,
        /// Origin of the web app, used to resolve relative share links
        #[arg(long, value_name = "URL")]
        app_origin: Option<String>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Print the resolved configuration for a profile
    Show,
}
