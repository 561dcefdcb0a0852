//! Command execution against the entity store.

use crate::cli::{Cli, Command};
use crate::prompt::TerminalPrompt;
use crimenet_core::{
    Article, CoreConfig, EntityStore, RemoveOutcome, SqliteKeyValueStore, StaffProfile,
    StorageError, StoreError, UpdateOutcome,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type Result<T> = std::result::Result<T, CommandError>;

/// Failure reported to the terminal user.
#[derive(Debug)]
pub enum CommandError {
    DataDir(std::io::Error),
    Storage(StorageError),
    Store(StoreError),
    NotFound { kind: &'static str, id: String },
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DataDir(err) => write!(f, "cannot prepare data directory: {err}"),
            Self::Storage(err) => write!(f, "cannot open storage: {err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} `{id}` not found"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DataDir(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<StoreError> for CommandError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

type Store = EntityStore<SqliteKeyValueStore>;

pub fn execute(cli: Cli, config: &CoreConfig) -> Result<()> {
    let mut store = open_store(config, cli.yes)?;
    info!("event=cli_command module=cli status=start command={}", command_name(&cli.command));

    match cli.command {
        Command::Articles { category, query } => {
            let visible = store.visible_articles(&category, &query);
            if visible.is_empty() {
                println!("No articles found.");
            }
            for article in visible {
                println!("{}", article_line(article));
            }
        }
        Command::Article { id } => {
            let article = store.article(&id).ok_or_else(|| not_found("article", &id))?;
            print_article(article);
        }
        Command::Staff => {
            for profile in store.staff() {
                println!("{}", staff_line(profile));
            }
        }
        Command::Profile { id } => {
            let profile = store
                .staff_profile(&id)
                .ok_or_else(|| not_found("staff profile", &id))?;
            print_profile(profile);
        }
        Command::Stats => {
            let stats = store.stats();
            println!("Articles: {}", stats.articles);
            println!("Staff:    {}", stats.staff);
        }
        Command::Categories => {
            for category in store.category_options() {
                println!("{category}");
            }
        }
        Command::Login { username, password } => {
            store.login(&username, &password)?;
            println!("Login successful");
        }
        Command::Logout => {
            store.logout();
            println!("Logged out");
        }
        Command::Whoami => match store.current_user() {
            Some(user) => println!("{}", user.name),
            None => println!("(not logged in)"),
        },
        Command::NewArticle(fields) => {
            let created = store.create_article(fields.into())?;
            println!("Created {} ({})", created.id, created.navigate_to);
        }
        Command::EditArticle { id, fields } => {
            report_update(store.update_article(&id, fields.into())?, "article", &id)?;
        }
        Command::DeleteArticle { id } => {
            report_removal(store.remove_article(&id)?, "article", &id)?;
        }
        Command::NewStaff(fields) => {
            let created = store.create_staff(fields.into())?;
            println!("Created {} ({})", created.id, created.navigate_to);
        }
        Command::EditStaff { id, fields } => {
            report_update(store.update_staff(&id, fields.into())?, "staff profile", &id)?;
        }
        Command::DeleteStaff { id } => {
            report_removal(store.remove_staff(&id)?, "staff profile", &id)?;
        }
        Command::Export { dir } => {
            let path = store.export_to_dir(&dir)?;
            println!("Exported to {}", path.display());
        }
        Command::Import { file } => {
            let summary = store.import_from_file(&file)?;
            println!(
                "Import successful. articles={} staff={}",
                count_or_kept(summary.articles),
                count_or_kept(summary.staff)
            );
        }
    }
    Ok(())
}

fn open_store(config: &CoreConfig, assume_yes: bool) -> Result<Store> {
    std::fs::create_dir_all(&config.data_dir).map_err(CommandError::DataDir)?;
    let storage = SqliteKeyValueStore::open(config.db_path()).map_err(CommandError::Storage)?;
    Ok(EntityStore::open(
        storage,
        config.credentials.clone(),
        TerminalPrompt { assume_yes },
    ))
}

fn report_update(outcome: UpdateOutcome, kind: &'static str, id: &str) -> Result<()> {
    match outcome {
        UpdateOutcome::Updated => {
            println!("Updated {id}");
            Ok(())
        }
        UpdateOutcome::NotFound => Err(not_found(kind, id)),
    }
}

fn report_removal(outcome: RemoveOutcome, kind: &'static str, id: &str) -> Result<()> {
    match outcome {
        RemoveOutcome::Removed { navigate_to } => {
            println!("Removed {id} ({navigate_to})");
            Ok(())
        }
        RemoveOutcome::Declined => {
            println!("Cancelled");
            Ok(())
        }
        RemoveOutcome::NotFound => Err(not_found(kind, id)),
    }
}

fn not_found(kind: &'static str, id: &str) -> CommandError {
    CommandError::NotFound {
        kind,
        id: id.to_string(),
    }
}

fn count_or_kept(count: Option<usize>) -> String {
    count.map_or_else(|| "kept".to_string(), |n| n.to_string())
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Articles { .. } => "articles",
        Command::Article { .. } => "article",
        Command::Staff => "staff",
        Command::Profile { .. } => "profile",
        Command::Stats => "stats",
        Command::Categories => "categories",
        Command::Login { .. } => "login",
        Command::Logout => "logout",
        Command::Whoami => "whoami",
        Command::NewArticle(_) => "new-article",
        Command::EditArticle { .. } => "edit-article",
        Command::DeleteArticle { .. } => "delete-article",
        Command::NewStaff(_) => "new-staff",
        Command::EditStaff { .. } => "edit-staff",
        Command::DeleteStaff { .. } => "delete-staff",
        Command::Export { .. } => "export",
        Command::Import { .. } => "import",
    }
}

fn article_line(article: &Article) -> String {
    format!(
        "{}  {}  [{}]  {}",
        article.date, article.id, article.category, article.title
    )
}

fn staff_line(profile: &StaffProfile) -> String {
    format!("{}  {}  ({})", profile.id, profile.name, profile.role)
}

fn print_article(article: &Article) {
    println!("{}", article.title);
    println!("{} | {}", article.category, article.date);
    if !article.excerpt.is_empty() {
        println!();
        println!("{}", article.excerpt);
    }
    println!();
    println!("{}", article.content);
}

fn print_profile(profile: &StaffProfile) {
    println!("{} | {}", profile.name, profile.role);
    println!("avatar:  {}", profile.avatar);
    println!("banner:  {}", profile.banner);
    if !profile.contact.is_empty() {
        println!("contact: {}", profile.contact);
    }
    if !profile.bio.is_empty() {
        println!();
        println!("{}", profile.bio);
    }
}

#[cfg(test)]
mod tests {
    use super::{article_line, count_or_kept};
    use crimenet_core::store::seed::seed_articles;

    #[test]
    fn article_line_leads_with_date_and_id() {
        let line = article_line(&seed_articles()[2]);
        assert!(line.starts_with("2023-11-05  gang-101"));
    }

    #[test]
    fn kept_collections_are_labelled() {
        assert_eq!(count_or_kept(None), "kept");
        assert_eq!(count_or_kept(Some(3)), "3");
    }
}
