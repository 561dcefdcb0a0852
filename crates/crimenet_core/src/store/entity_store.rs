//! Entity store implementation.

use super::ids::fresh_id;
use super::seed::{seed_articles, seed_staff};
use crate::kv::{KeyValueStore, PersistentBridge};
use crate::model::article::{Article, ArticlePatch};
use crate::model::session::SessionUser;
use crate::model::staff::{StaffPatch, StaffProfile};
use crate::model::{validate_collection, Record, ValidationError};
use crate::prompt::ConfirmPrompt;
use crate::route::Route;
use crate::search::filter::{category_options, filter_articles};
use crate::session::gate::{
    AuthorizationError, Credentials, GatedAction, InvalidCredentialsError, SessionGate,
};
use crate::transfer::{
    export_all, parse_import, read_import_file, write_export, ExportDocument, ImportDocument,
    ImportError,
};
use chrono::Utc;
use log::{info, warn};
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

/// Storage key for the article collection.
pub const ARTICLES_KEY: &str = "cn_articles";
/// Storage key for the staff collection.
pub const STAFF_KEY: &str = "cn_staff";
/// Storage key for the signed-in user (`null` when signed out).
pub const USER_KEY: &str = "cn_user";

const DELETE_ARTICLE_PROMPT: &str = "Delete article? This cannot be undone.";
const REMOVE_STAFF_PROMPT: &str = "Remove staff member?";

/// User-visible rejection of a store operation.
///
/// Every variant leaves the store unchanged.
#[derive(Debug)]
pub enum StoreError {
    Unauthorized(AuthorizationError),
    InvalidCredentials(InvalidCredentialsError),
    Validation(ValidationError),
    Import(ImportError),
    Export(io::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized(err) => write!(f, "{err}"),
            Self::InvalidCredentials(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Import(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "Failed to export: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unauthorized(err) => Some(err),
            Self::InvalidCredentials(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Import(err) => Some(err),
            Self::Export(err) => Some(err),
        }
    }
}

impl From<AuthorizationError> for StoreError {
    fn from(value: AuthorizationError) -> Self {
        Self::Unauthorized(value)
    }
}

impl From<InvalidCredentialsError> for StoreError {
    fn from(value: InvalidCredentialsError) -> Self {
        Self::InvalidCredentials(value)
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ImportError> for StoreError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

/// Result of a successful create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created {
    pub id: String,
    /// Detail view of the new record.
    pub navigate_to: Route,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    /// No record had the id; nothing changed.
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Record dropped; the caller should leave its detail view.
    Removed { navigate_to: Route },
    /// The confirmation prompt was declined.
    Declined,
    /// No record had the id; nothing changed and no prompt was shown.
    NotFound,
}

/// Collection sizes after a successful import. `None` means kept as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub articles: Option<usize>,
    pub staff: Option<usize>,
}

/// Headline counts for overview screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub articles: usize,
    pub staff: usize,
}

/// Articles, staff profiles and session, mirrored to a key-value medium.
///
/// Views borrow collections read-only; every change goes through the
/// methods below, which check the session first and persist afterwards.
pub struct EntityStore<S: KeyValueStore> {
    articles: Vec<Article>,
    staff: Vec<StaffProfile>,
    session: SessionGate,
    bridge: PersistentBridge<S>,
    prompt: Box<dyn ConfirmPrompt>,
}

impl<S: KeyValueStore> EntityStore<S> {
    /// Loads state from `storage`, falling back to the seed dataset and an
    /// anonymous session for anything missing or unreadable.
    pub fn open(
        storage: S,
        credentials: Credentials,
        prompt: impl ConfirmPrompt + 'static,
    ) -> Self {
        let bridge = PersistentBridge::new(storage);
        let articles = load_collection(&bridge, ARTICLES_KEY, seed_articles);
        let staff = load_collection(&bridge, STAFF_KEY, seed_staff);
        let user: Option<SessionUser> = bridge.load(USER_KEY, None);

        info!(
            "event=store_open module=store status=ok articles={} staff={} authenticated={}",
            articles.len(),
            staff.len(),
            user.is_some()
        );

        Self {
            articles,
            staff,
            session: SessionGate::restore(credentials, user),
            bridge,
            prompt: Box::new(prompt),
        }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn staff(&self) -> &[StaffProfile] {
        &self.staff
    }

    pub fn article(&self, id: &str) -> Option<&Article> {
        self.articles.iter().find(|article| article.id == id)
    }

    pub fn staff_profile(&self, id: &str) -> Option<&StaffProfile> {
        self.staff.iter().find(|profile| profile.id == id)
    }

    pub fn current_user(&self) -> Option<&SessionUser> {
        self.session.current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Articles passing the category and text filters, in store order.
    pub fn visible_articles(&self, category: &str, query: &str) -> Vec<&Article> {
        filter_articles(&self.articles, category, query)
    }

    pub fn category_options(&self) -> Vec<&'static str> {
        category_options()
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            articles: self.articles.len(),
            staff: self.staff.len(),
        }
    }

    /// Read access to the underlying medium.
    pub fn storage(&self) -> &S {
        self.bridge.store()
    }

    /// Creates an article from `patch` and prepends it.
    pub fn create_article(&mut self, patch: ArticlePatch) -> Result<Created, StoreError> {
        self.authorize(GatedAction::CreateArticle)?;
        let today = Utc::now().date_naive();
        let id = prepend_new(&mut self.articles, |id| Article::from_patch(id, patch, today))
            .inspect_err(|err| {
                warn!("event=article_create module=store status=rejected error={err}");
            })?;
        self.persist_articles();
        info!("event=article_create module=store status=ok id={id}");
        Ok(Created {
            navigate_to: Route::Article(id.clone()),
            id,
        })
    }

    /// Merges `patch` into the article with `id`.
    pub fn update_article(
        &mut self,
        id: &str,
        patch: ArticlePatch,
    ) -> Result<UpdateOutcome, StoreError> {
        self.authorize(GatedAction::EditArticle)?;
        let outcome = merge_into(&mut self.articles, id, patch)?;
        if outcome == UpdateOutcome::Updated {
            self.persist_articles();
        }
        info!("event=article_update module=store status=ok id={id} outcome={outcome:?}");
        Ok(outcome)
    }

    /// Deletes the article with `id` after confirmation.
    pub fn remove_article(&mut self, id: &str) -> Result<RemoveOutcome, StoreError> {
        self.authorize(GatedAction::DeleteArticle)?;
        let outcome = remove_confirmed(
            &mut self.articles,
            id,
            self.prompt.as_mut(),
            DELETE_ARTICLE_PROMPT,
            Route::Docs,
        );
        if matches!(outcome, RemoveOutcome::Removed { .. }) {
            self.persist_articles();
        }
        info!("event=article_remove module=store status=ok id={id} outcome={outcome:?}");
        Ok(outcome)
    }

    /// Creates a staff profile from `patch` and prepends it.
    pub fn create_staff(&mut self, patch: StaffPatch) -> Result<Created, StoreError> {
        self.authorize(GatedAction::CreateStaff)?;
        let id = prepend_new(&mut self.staff, |id| StaffProfile::from_patch(id, patch))
            .inspect_err(|err| {
                warn!("event=staff_create module=store status=rejected error={err}");
            })?;
        self.persist_staff();
        info!("event=staff_create module=store status=ok id={id}");
        Ok(Created {
            navigate_to: Route::Profile(id.clone()),
            id,
        })
    }

    /// Merges `patch` into the staff profile with `id`.
    pub fn update_staff(&mut self, id: &str, patch: StaffPatch) -> Result<UpdateOutcome, StoreError> {
        self.authorize(GatedAction::EditStaff)?;
        let outcome = merge_into(&mut self.staff, id, patch)?;
        if outcome == UpdateOutcome::Updated {
            self.persist_staff();
        }
        info!("event=staff_update module=store status=ok id={id} outcome={outcome:?}");
        Ok(outcome)
    }

    /// Deletes the staff profile with `id` after confirmation.
    pub fn remove_staff(&mut self, id: &str) -> Result<RemoveOutcome, StoreError> {
        self.authorize(GatedAction::RemoveStaff)?;
        let outcome = remove_confirmed(
            &mut self.staff,
            id,
            self.prompt.as_mut(),
            REMOVE_STAFF_PROMPT,
            Route::Staff,
        );
        if matches!(outcome, RemoveOutcome::Removed { .. }) {
            self.persist_staff();
        }
        info!("event=staff_remove module=store status=ok id={id} outcome={outcome:?}");
        Ok(outcome)
    }

    /// Signs in and persists the session. Navigates home on success.
    pub fn login(&mut self, username: &str, password: &str) -> Result<Route, StoreError> {
        if let Err(err) = self.session.login(username, password) {
            warn!("event=login module=store status=rejected");
            return Err(err.into());
        }
        self.persist_user();
        info!("event=login module=store status=ok");
        Ok(Route::Home)
    }

    /// Signs out unconditionally and persists the empty session.
    pub fn logout(&mut self) -> Route {
        self.session.logout();
        self.persist_user();
        info!("event=logout module=store status=ok");
        Route::Home
    }

    /// Snapshot of both collections stamped with the current time.
    pub fn export_all(&self) -> ExportDocument {
        export_all(&self.articles, &self.staff)
    }

    /// Writes [`Self::export_all`] to `dir` and returns the file path.
    pub fn export_to_dir(&self, dir: &Path) -> Result<PathBuf, StoreError> {
        let path = write_export(dir, &self.export_all()).map_err(|err| {
            warn!("event=export module=store status=error error={err}");
            StoreError::Export(err)
        })?;
        info!("event=export module=store status=ok path={}", path.display());
        Ok(path)
    }

    /// Replaces collections present in the JSON document `contents`.
    pub fn import_all(&mut self, contents: &str) -> Result<ImportSummary, StoreError> {
        let document = parse_import(contents).inspect_err(log_import_rejection)?;
        Ok(self.apply_import(document))
    }

    /// Reads `path` and imports it like [`Self::import_all`].
    pub fn import_from_file(&mut self, path: &Path) -> Result<ImportSummary, StoreError> {
        let document = read_import_file(path).inspect_err(log_import_rejection)?;
        Ok(self.apply_import(document))
    }

    fn apply_import(&mut self, document: ImportDocument) -> ImportSummary {
        let mut summary = ImportSummary::default();
        if let Some(articles) = document.articles {
            summary.articles = Some(articles.len());
            self.articles = articles;
            self.persist_articles();
        }
        if let Some(staff) = document.staff {
            summary.staff = Some(staff.len());
            self.staff = staff;
            self.persist_staff();
        }
        info!(
            "event=import module=store status=ok articles={:?} staff={:?}",
            summary.articles, summary.staff
        );
        summary
    }

    fn authorize(&self, action: GatedAction) -> Result<(), StoreError> {
        self.session.authorize(action).map(|_| ()).map_err(|err| {
            warn!(
                "event=authorize module=store status=rejected action={:?}",
                err.action
            );
            err.into()
        })
    }

    fn persist_articles(&mut self) {
        self.bridge.save(ARTICLES_KEY, &self.articles);
    }

    fn persist_staff(&mut self) {
        self.bridge.save(STAFF_KEY, &self.staff);
    }

    fn persist_user(&mut self) {
        self.bridge.save(USER_KEY, &self.session.current_user());
    }
}

fn log_import_rejection(err: &ImportError) {
    warn!("event=import module=store status=rejected error={err}");
}

/// Loads the collection at `key`, or `seed()` when it is missing, unreadable
/// or fails validation.
fn load_collection<S, R>(bridge: &PersistentBridge<S>, key: &str, seed: fn() -> Vec<R>) -> Vec<R>
where
    S: KeyValueStore,
    R: Record + DeserializeOwned,
{
    let Some(records) = bridge.load::<Option<Vec<R>>>(key, None) else {
        return seed();
    };
    match validate_collection(&records) {
        Ok(()) => records,
        Err(err) => {
            warn!("event=store_open module=store status=fallback key={key} error={err}");
            seed()
        }
    }
}

/// Builds a record under a fresh id and prepends it once it validates.
fn prepend_new<R: Record>(
    collection: &mut Vec<R>,
    build: impl FnOnce(String) -> R,
) -> Result<String, ValidationError> {
    let id = fresh_id(collection.as_slice());
    let record = build(id.clone());
    record.validate()?;
    collection.insert(0, record);
    Ok(id)
}

fn merge_into<R: Record>(
    collection: &mut [R],
    id: &str,
    patch: R::Patch,
) -> Result<UpdateOutcome, ValidationError> {
    let Some(slot) = collection.iter_mut().find(|record| record.id() == id) else {
        return Ok(UpdateOutcome::NotFound);
    };
    let mut merged = slot.clone();
    merged.apply_patch(patch);
    merged.validate()?;
    *slot = merged;
    Ok(UpdateOutcome::Updated)
}

fn remove_confirmed<R: Record>(
    collection: &mut Vec<R>,
    id: &str,
    prompt: &mut dyn ConfirmPrompt,
    question: &str,
    navigate_to: Route,
) -> RemoveOutcome {
    let Some(index) = collection.iter().position(|record| record.id() == id) else {
        return RemoveOutcome::NotFound;
    };
    if !prompt.confirm(question) {
        return RemoveOutcome::Declined;
    }
    collection.remove(index);
    RemoveOutcome::Removed { navigate_to }
}

#[cfg(test)]
mod tests {
    use super::{merge_into, remove_confirmed, RemoveOutcome, UpdateOutcome};
    use crate::model::article::ArticlePatch;
    use crate::model::ValidationError;
    use crate::prompt::FixedAnswer;
    use crate::route::Route;
    use crate::store::seed::seed_articles;

    #[test]
    fn merge_rejects_patch_producing_invalid_record() {
        let mut articles = seed_articles();
        let before = articles.clone();
        let err = merge_into(
            &mut articles,
            "gang-101",
            ArticlePatch {
                date: Some("soon".to_string()),
                ..ArticlePatch::default()
            },
        )
        .unwrap_err();

        assert!(matches!(err, ValidationError::InvalidDate { .. }));
        assert_eq!(articles, before);
    }

    #[test]
    fn merge_reports_missing_ids() {
        let mut articles = seed_articles();
        let outcome = merge_into(&mut articles, "nope", ArticlePatch::titled("x")).unwrap();
        assert_eq!(outcome, UpdateOutcome::NotFound);
    }

    #[test]
    fn removal_honors_declined_prompt() {
        let mut articles = seed_articles();
        let mut decline = FixedAnswer(false);
        let outcome = remove_confirmed(&mut articles, "gang-101", &mut decline, "?", Route::Docs);
        assert_eq!(outcome, RemoveOutcome::Declined);
        assert_eq!(articles.len(), 3);
    }
}
