//! The application state container shared by every view.

use appshelf_schema::{CatalogItem, Session};
use chrono::NaiveDate;
use serde::Serialize;

use crate::auth::{AuthGate, CredentialVerifier};
use crate::config::MainConfig;
use crate::error::CoreResult;
use crate::form::{FormErrors, ItemForm};
use crate::navigation::{DashboardView, Navigation, Navigator, View, HOME_PATH};
use crate::query::CatalogQuery;
use crate::seed::SeedEntry;
use crate::splash::Splash;
use crate::store::{CatalogStore, IdGenerator, UuidIds};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginOutcome {
    pub success: bool,
    pub error: Option<String>,
    pub redirect_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeleteOutcome {
    ConfirmationRequired { prompt: String },
    Deleted { id: String },
    NotFound { id: String },
}

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("admin session required")]
    Unauthorized,
    #[error(transparent)]
    Invalid(#[from] FormErrors),
    #[error(transparent)]
    Core(#[from] crate::error::CoreError),
}

pub struct AppContext {
    store: CatalogStore,
    gate: AuthGate,
    navigator: Navigator,
    splash: Splash,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("store", &self.store)
            .field("gate", &self.gate)
            .field("navigator", &self.navigator)
            .finish()
    }
}

impl AppContext {
    pub fn new(store: CatalogStore, gate: AuthGate, splash: Splash) -> Self {
        Self {
            store,
            gate,
            navigator: Navigator::new(),
            splash,
        }
    }

    /// Assemble a context from configuration and seed data. Starts the splash
    /// timer, so it must run inside a tokio runtime when the duration is non-zero.
    pub fn from_config(config: &MainConfig, seed: Vec<SeedEntry>) -> CoreResult<Self> {
        Self::from_parts(
            config,
            seed,
            Box::new(config.auth.credential()),
            Box::new(UuidIds),
        )
    }

    pub fn from_parts(
        config: &MainConfig,
        seed: Vec<SeedEntry>,
        verifier: Box<dyn CredentialVerifier>,
        ids: Box<dyn IdGenerator>,
    ) -> CoreResult<Self> {
        let store = crate::seed::build_store(seed, ids)?;
        let gate = AuthGate::new(verifier, config.auth.profile.clone());
        let splash = Splash::start(config.splash.duration());
        tracing::info!(items = store.len(), "catalog ready");
        Ok(Self::new(store, gate, splash))
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn session(&self) -> Session {
        self.gate.session()
    }

    pub fn is_logged_in(&self) -> bool {
        self.gate.is_logged_in()
    }

    pub fn splash_visible(&self) -> bool {
        self.splash.is_visible()
    }

    /// Stop the splash timer (teardown).
    pub fn shutdown(&self) {
        self.splash.cancel();
    }

    pub fn navigate(&mut self, path: &str, listing: &CatalogQuery) -> Navigation {
        self.navigate_on(path, listing, today())
    }

    pub fn navigate_on(&mut self, path: &str, listing: &CatalogQuery, today: NaiveDate) -> Navigation {
        if self.splash.is_visible() {
            return Navigation::Render(View::Welcome);
        }
        self.navigator
            .resolve(path, listing, &self.store, &self.gate, today)
    }

    pub fn login(&mut self, username: &str, password: &str) -> LoginOutcome {
        if self.gate.login(username, password) {
            LoginOutcome {
                success: true,
                error: None,
                redirect_to: Some(self.navigator.after_login()),
            }
        } else {
            LoginOutcome {
                success: false,
                error: self.gate.last_error().map(str::to_string),
                redirect_to: None,
            }
        }
    }

    pub fn logout(&mut self) -> Navigation {
        self.gate.logout();
        Navigation::redirect(HOME_PATH)
    }

    pub fn browse(&self, query: &CatalogQuery) -> Vec<CatalogItem> {
        query.apply(self.store.list())
    }

    pub fn item(&self, id: &str) -> Option<&CatalogItem> {
        self.store.get_by_id(id)
    }

    pub fn dashboard(&self) -> Option<DashboardView> {
        self.gate.user().map(|user| DashboardView {
            user: user.clone(),
            total_items: self.store.len(),
        })
    }

    pub fn manage_items(&self) -> Result<&[CatalogItem], AdminError> {
        self.require_admin()?;
        Ok(self.store.list())
    }

    pub fn create_item(&mut self, form: &ItemForm) -> Result<CatalogItem, AdminError> {
        self.require_admin()?;
        let draft = form.validate()?;
        Ok(self.store.add(draft)?)
    }

    /// Update `id` from `form`. `Ok(false)` when the id no longer exists.
    pub fn edit_item(&mut self, id: &str, form: &ItemForm) -> Result<bool, AdminError> {
        self.require_admin()?;
        let draft = form.validate()?;
        Ok(self.store.update(CatalogItem::from_draft(id, draft)))
    }

    /// Delete `id` once the caller has confirmed.
    pub fn delete_item(&mut self, id: &str, confirmed: bool) -> Result<DeleteOutcome, AdminError> {
        self.require_admin()?;
        let Some(item) = self.store.get_by_id(id) else {
            return Ok(DeleteOutcome::NotFound { id: id.to_string() });
        };
        if !confirmed {
            return Ok(DeleteOutcome::ConfirmationRequired {
                prompt: format!(
                    "هل أنت متأكد من حذف \"{}\"؟ لا يمكن التراجع عن هذا الإجراء.",
                    item.name
                ),
            });
        }
        self.store.delete(id);
        Ok(DeleteOutcome::Deleted { id: id.to_string() })
    }

    fn require_admin(&self) -> Result<(), AdminError> {
        if self.gate.is_logged_in() {
            Ok(())
        } else {
            Err(AdminError::Unauthorized)
        }
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
