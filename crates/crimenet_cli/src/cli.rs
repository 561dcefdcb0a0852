//! Command-line interface definition using clap.

use clap::{Args, Parser, Subcommand};
use crimenet_core::{ArticlePatch, StaffPatch};
use std::path::PathBuf;

/// Crime Network content desk.
#[derive(Parser, Debug)]
#[command(name = "crimenet", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the database and logs
    #[arg(long, env = "CRIMENET_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "CRIMENET_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Answer "yes" to every confirmation prompt
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List articles, optionally filtered
    Articles {
        /// Category name, or "All"
        #[arg(short, long, default_value = "All")]
        category: String,

        /// Case-insensitive text to find in title, excerpt or content
        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// Show one article
    Article { id: String },

    /// List staff profiles
    Staff,

    /// Show one staff profile
    Profile { id: String },

    /// Show article and staff counts
    Stats,

    /// List browsable categories
    Categories,

    /// Sign in
    Login { username: String, password: String },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Create an article
    NewArticle(ArticleFields),

    /// Edit an article
    EditArticle {
        id: String,
        #[command(flatten)]
        fields: ArticleFields,
    },

    /// Delete an article
    DeleteArticle { id: String },

    /// Create a staff profile
    NewStaff(StaffFields),

    /// Edit a staff profile
    EditStaff {
        id: String,
        #[command(flatten)]
        fields: StaffFields,
    },

    /// Remove a staff profile
    DeleteStaff { id: String },

    /// Write a full export file
    Export {
        /// Output directory (defaults to the current directory)
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Replace collections from an export file
    Import { file: PathBuf },
}

#[derive(Args, Debug, Default)]
pub struct ArticleFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub excerpt: Option<String>,
    /// Markdown body
    #[arg(long)]
    pub content: Option<String>,
    /// Publication date, YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,
}

impl From<ArticleFields> for ArticlePatch {
    fn from(fields: ArticleFields) -> Self {
        ArticlePatch {
            title: fields.title,
            category: fields.category,
            excerpt: fields.excerpt,
            content: fields.content,
            date: fields.date,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct StaffFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub role: Option<String>,
    /// Avatar image URL
    #[arg(long)]
    pub avatar: Option<String>,
    /// Banner image URL
    #[arg(long)]
    pub banner: Option<String>,
    #[arg(long)]
    pub bio: Option<String>,
    #[arg(long)]
    pub contact: Option<String>,
}

impl From<StaffFields> for StaffPatch {
    fn from(fields: StaffFields) -> Self {
        StaffPatch {
            name: fields.name,
            role: fields.role,
            avatar: fields.avatar,
            banner: fields.banner,
            bio: fields.bio,
            contact: fields.contact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::{CommandFactory, Parser};
    use crimenet_core::ArticlePatch;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn edit_article_collects_only_given_fields() {
        let cli = Cli::parse_from(["crimenet", "edit-article", "gang-101", "--title", "New"]);
        let Command::EditArticle { id, fields } = cli.command else {
            panic!("expected edit-article");
        };
        assert_eq!(id, "gang-101");
        assert_eq!(ArticlePatch::from(fields), ArticlePatch::titled("New"));
    }
}
