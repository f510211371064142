use std::time::Duration;

use appshelf_core::*;
use appshelf_schema::{Category, CategoryFilter, SortOption};
use chrono::NaiveDate;

fn quiet_config() -> MainConfig {
    let mut config = MainConfig::default();
    config.splash.duration_ms = 0;
    config
}

fn context() -> AppContext {
    let config = quiet_config();
    AppContext::from_parts(
        &config,
        demo_catalog(),
        Box::new(config.auth.credential()),
        Box::new(SequentialIds::new()),
    )
    .expect("build context")
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn go(ctx: &mut AppContext, path: &str) -> Navigation {
    ctx.navigate_on(path, &CatalogQuery::default(), today())
}

fn filled_form(name: &str) -> ItemForm {
    ItemForm {
        name: name.into(),
        category: "software".into(),
        version: "0.9".into(),
        downloads: "7".into(),
        upload_date: "2024-05-31".into(),
        icon_url: DEFAULT_ICON_URL.into(),
        description: "A new tool".into(),
    }
}

#[test]
fn protected_route_round_trip_through_login() {
    let mut ctx = context();

    let nav = go(&mut ctx, "/admin/apps");
    assert_eq!(nav.redirect_target(), Some("/login"));

    let failed = ctx.login("admin", "wrong");
    assert!(!failed.success);
    assert!(failed.error.as_deref().is_some_and(|e| !e.is_empty()));
    assert!(!ctx.is_logged_in());

    let outcome = ctx.login("admin", "password123");
    assert!(outcome.success);
    assert_eq!(outcome.redirect_to.as_deref(), Some("/admin/apps"));
    assert!(ctx.session().is_logged_in);

    match go(&mut ctx, "/admin/apps").view() {
        Some(View::ManageItems { items }) => assert_eq!(items.len(), 8),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn login_without_remembered_path_goes_home() {
    let mut ctx = context();
    let outcome = ctx.login("admin", "password123");
    assert_eq!(outcome.redirect_to.as_deref(), Some("/"));
}

#[test]
fn delete_from_management_view_removes_item_everywhere() {
    let mut ctx = context();
    ctx.login("admin", "password123");

    let victim = ctx.store().list()[0].id.clone();

    let outcome = ctx.delete_item(&victim, false).unwrap();
    assert!(matches!(outcome, DeleteOutcome::ConfirmationRequired { .. }));
    assert!(ctx.item(&victim).is_some());

    let outcome = ctx.delete_item(&victim, true).unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted { id: victim.clone() });
    assert!(ctx.item(&victim).is_none());
    assert!(ctx
        .browse(&CatalogQuery::default())
        .iter()
        .all(|item| item.id != victim));

    let detail = go(&mut ctx, &format!("/details/{victim}"));
    assert!(matches!(detail.view(), Some(View::NotFound { .. })));
}

#[test]
fn created_item_is_listed_first_and_searchable() {
    let mut ctx = context();
    ctx.login("admin", "password123");

    let created = ctx.create_item(&filled_form("Zeta Tool")).unwrap();
    assert_eq!(ctx.store().list()[0], created);

    let found = ctx.browse(
        &CatalogQuery::new(CategoryFilter::Only(Category::Software)).search("zeta"),
    );
    assert_eq!(found, vec![created.clone()]);

    let dashboard = ctx.dashboard().unwrap();
    assert_eq!(dashboard.total_items, 9);
}

#[test]
fn invalid_form_does_not_touch_store() {
    let mut ctx = context();
    ctx.login("admin", "password123");
    let before = ctx.store().len();

    let mut form = filled_form("");
    form.downloads = "-1".into();
    match ctx.create_item(&form) {
        Err(AdminError::Invalid(errors)) => {
            assert!(errors.get("name").is_some());
            assert!(errors.get("downloads").is_some());
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(ctx.store().len(), before);
}

#[test]
fn edit_preserves_id_and_ignores_unknown() {
    let mut ctx = context();
    ctx.login("admin", "password123");

    let id = ctx.store().list()[1].id.clone();
    assert!(ctx.edit_item(&id, &filled_form("Renamed")).unwrap());
    let item = ctx.item(&id).unwrap();
    assert_eq!(item.name, "Renamed");
    assert_eq!(item.category, Category::Software);

    let before: Vec<_> = ctx.store().list().to_vec();
    assert!(!ctx.edit_item("ghost", &filled_form("Ghost")).unwrap());
    assert_eq!(ctx.store().list(), before.as_slice());
}

#[test]
fn admin_operations_require_login() {
    let mut ctx = context();
    assert!(matches!(
        ctx.create_item(&filled_form("X")),
        Err(AdminError::Unauthorized)
    ));
    assert!(matches!(
        ctx.delete_item("1", true),
        Err(AdminError::Unauthorized)
    ));
    assert!(ctx.manage_items().is_err());
    assert!(ctx.dashboard().is_none());
    assert_eq!(ctx.store().len(), 8);
}

#[test]
fn logout_closes_admin_routes() {
    let mut ctx = context();
    ctx.login("admin", "password123");
    assert_eq!(ctx.logout().redirect_target(), Some("/"));
    assert_eq!(go(&mut ctx, "/admin").redirect_target(), Some("/login"));
}

#[test]
fn catalog_route_applies_listing_options() {
    let mut ctx = context();
    let listing = CatalogQuery::default().sort(SortOption::Name);
    let nav = ctx.navigate_on("/games", &listing, today());
    match nav.view() {
        Some(View::Catalog { category, items }) => {
            assert_eq!(*category, CategoryFilter::Only(Category::Game));
            let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
            assert_eq!(names, vec!["ببجي موبايل", "كاندي كراش", "Minecraft"]);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn new_item_form_starts_blank() {
    let mut ctx = context();
    ctx.login("admin", "password123");
    match go(&mut ctx, "/admin/apps/new").view() {
        Some(View::ItemForm { mode, form }) => {
            assert_eq!(mode, &FormMode::Create);
            assert_eq!(form, &ItemForm::blank(today()));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn splash_shows_welcome_then_routes() {
    let mut config = MainConfig::default();
    config.splash.duration_ms = 2500;
    let mut ctx = AppContext::from_config(&config, demo_catalog()).unwrap();

    assert_eq!(go(&mut ctx, "/games"), Navigation::Render(View::Welcome));

    tokio::time::sleep(Duration::from_millis(2600)).await;
    assert!(!ctx.splash_visible());
    assert!(matches!(go(&mut ctx, "/games").view(), Some(View::Catalog { .. })));
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_splash() {
    let mut config = MainConfig::default();
    config.splash.duration_ms = 60_000;
    let ctx = AppContext::from_config(&config, demo_catalog()).unwrap();
    assert!(ctx.splash_visible());
    ctx.shutdown();
    assert!(!ctx.splash_visible());
}
