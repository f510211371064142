//! Path → view resolution with access control.
//!
//! Public routes render directly. Admin routes require a logged-in
//! [`AuthGate`]; while logged out they redirect to `/login` and the
//! requested path is remembered so a successful login can return there.

use appshelf_schema::{CatalogItem, CategoryFilter, UserProfile};
use serde::Serialize;

use crate::auth::AuthGate;
use crate::form::ItemForm;
use crate::query::CatalogQuery;
use crate::store::CatalogStore;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const ADMIN_PATH: &str = "/admin";
pub const ADMIN_ITEMS_PATH: &str = "/admin/apps";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Catalog(CategoryFilter),
    Details(String),
    Login,
    AdminDashboard,
    AdminItems,
    AdminNewItem,
    AdminEditItem(String),
    Unknown(String),
}

impl Route {
    /// Parse a path. Keywords match case-insensitively; ids keep their case.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let lowered: Vec<String> = segments.iter().map(|s| s.to_ascii_lowercase()).collect();
        let keys: Vec<&str> = lowered.iter().map(String::as_str).collect();

        match keys.as_slice() {
            [] => Route::Catalog(CategoryFilter::All),
            ["details", _] => Route::Details(segments[1].to_string()),
            ["login"] => Route::Login,
            ["admin"] => Route::AdminDashboard,
            ["admin", "apps"] => Route::AdminItems,
            ["admin", "apps", "new"] => Route::AdminNewItem,
            ["admin", "apps", "edit", _] => Route::AdminEditItem(segments[3].to_string()),
            [segment] => match appshelf_schema::Category::from_nav_segment(segment) {
                Some(category) => Route::Catalog(CategoryFilter::Only(category)),
                None => Route::Unknown(path.to_string()),
            },
            _ => Route::Unknown(path.to_string()),
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::AdminDashboard | Route::AdminItems | Route::AdminNewItem | Route::AdminEditItem(_)
        )
    }

    /// Canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Route::Catalog(CategoryFilter::All) => HOME_PATH.to_string(),
            Route::Catalog(CategoryFilter::Only(category)) => {
                format!("/{}", category.nav_segment())
            }
            Route::Details(id) => format!("/details/{id}"),
            Route::Login => LOGIN_PATH.to_string(),
            Route::AdminDashboard => ADMIN_PATH.to_string(),
            Route::AdminItems => ADMIN_ITEMS_PATH.to_string(),
            Route::AdminNewItem => format!("{ADMIN_ITEMS_PATH}/new"),
            Route::AdminEditItem(id) => format!("{ADMIN_ITEMS_PATH}/edit/{id}"),
            Route::Unknown(path) => path.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub user: UserProfile,
    pub total_items: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// What the front-end should render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Welcome,
    Catalog {
        category: CategoryFilter,
        items: Vec<CatalogItem>,
    },
    Details {
        item: CatalogItem,
    },
    NotFound {
        back_to: String,
    },
    Login {
        error: Option<String>,
    },
    Dashboard(DashboardView),
    ManageItems {
        items: Vec<CatalogItem>,
    },
    ItemForm {
        #[serde(flatten)]
        mode: FormMode,
        form: ItemForm,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Navigation {
    Render(View),
    Redirect { to: String },
}

impl Navigation {
    pub fn redirect(to: impl Into<String>) -> Self {
        Navigation::Redirect { to: to.into() }
    }

    pub fn view(&self) -> Option<&View> {
        match self {
            Navigation::Render(view) => Some(view),
            Navigation::Redirect { .. } => None,
        }
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Navigation::Redirect { to } => Some(to.as_str()),
            Navigation::Render(_) => None,
        }
    }
}

/// Routing state: the path a logged-out visitor was bounced from.
#[derive(Debug, Default)]
pub struct Navigator {
    return_to: Option<String>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn return_to(&self) -> Option<&str> {
        self.return_to.as_deref()
    }

    /// Resolve `path`. `listing` supplies the search text and sort order of
    /// catalog views; its category is taken from the path.
    pub fn resolve(
        &mut self,
        path: &str,
        listing: &CatalogQuery,
        store: &CatalogStore,
        gate: &AuthGate,
        today: chrono::NaiveDate,
    ) -> Navigation {
        let route = Route::parse(path);

        if route.is_protected() && !gate.is_logged_in() {
            let requested = route.path();
            tracing::debug!(path = %requested, "protected route while logged out");
            self.return_to = Some(requested);
            return Navigation::redirect(LOGIN_PATH);
        }

        if matches!(route, Route::Catalog(_) | Route::Details(_)) {
            self.return_to = None;
        }

        let view = match route {
            Route::Catalog(category) => {
                let query = CatalogQuery {
                    category,
                    ..listing.clone()
                };
                View::Catalog {
                    category,
                    items: query.apply(store.list()),
                }
            }
            Route::Details(id) => match store.get_by_id(&id) {
                Some(item) => View::Details { item: item.clone() },
                None => View::NotFound {
                    back_to: HOME_PATH.to_string(),
                },
            },
            Route::Login => {
                if gate.is_logged_in() {
                    return Navigation::redirect(ADMIN_PATH);
                }
                View::Login {
                    error: gate.last_error().map(str::to_string),
                }
            }
            Route::AdminDashboard => match gate.user() {
                Some(user) => View::Dashboard(DashboardView {
                    user: user.clone(),
                    total_items: store.len(),
                }),
                None => return Navigation::redirect(LOGIN_PATH),
            },
            Route::AdminItems => View::ManageItems {
                items: store.list().to_vec(),
            },
            Route::AdminNewItem => View::ItemForm {
                mode: FormMode::Create,
                form: ItemForm::blank(today),
            },
            Route::AdminEditItem(id) => match store.get_by_id(&id) {
                Some(item) => View::ItemForm {
                    form: ItemForm::from_item(item),
                    mode: FormMode::Edit { id },
                },
                None => return Navigation::redirect(ADMIN_ITEMS_PATH),
            },
            Route::Unknown(_) => View::NotFound {
                back_to: HOME_PATH.to_string(),
            },
        };

        Navigation::Render(view)
    }

    /// Where to go after a successful login. Consumes the remembered path.
    pub fn after_login(&mut self) -> String {
        self.return_to
            .take()
            .unwrap_or_else(|| HOME_PATH.to_string())
    }
}
