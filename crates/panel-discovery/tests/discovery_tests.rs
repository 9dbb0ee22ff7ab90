//! Integration tests for entity discovery

use panel_discovery::{DiscoveryRoot, EntityDiscovery, EntityKind, TypeCatalog, TypeDescriptor};
use panel_test_utils::AppFixture;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn catalog() -> TypeCatalog {
    let mut catalog = TypeCatalog::new();
    catalog.register_all([
        TypeDescriptor::new("Panel::Resource").abstract_type(),
        TypeDescriptor::new("Panel::Card").abstract_type(),
        TypeDescriptor::new("App::Panel::Resources::BaseResource")
            .abstract_type()
            .extends("Panel::Resource"),
        TypeDescriptor::new("App::Panel::Resources::Users").extends("App::Panel::Resources::BaseResource"),
        TypeDescriptor::new("App::Panel::Resources::Orders").implements("Panel::Resource"),
        TypeDescriptor::new("App::Panel::Resources::Billing::Invoices").implements("Panel::Resource"),
        TypeDescriptor::new("App::Panel::Resources::Formatter"),
        TypeDescriptor::new("App::Panel::Resources::Revenue").implements("Panel::Card"),
        TypeDescriptor::new("App::Panel::Cards::Revenue").implements("Panel::Card"),
    ]);
    catalog
}

fn discovery() -> EntityDiscovery {
    EntityDiscovery::new(Arc::new(catalog()))
}

#[test]
fn test_returns_only_concrete_matching_types() {
    let app = AppFixture::new();
    app.touch_all(&[
        "app/Panel/Resources/BaseResource.rs",
        "app/Panel/Resources/Orders.rs",
        "app/Panel/Resources/Users.rs",
        "app/Panel/Resources/Formatter.rs",
        "app/Panel/Resources/Revenue.rs",
        "app/Panel/Resources/Unregistered.rs",
        "app/Panel/Resources/README.md",
    ]);

    let root = DiscoveryRoot::new(app.root(), EntityKind::resource());
    let found = discovery().discover(&root);

    assert_eq!(
        found,
        vec!["App::Panel::Resources::Orders", "App::Panel::Resources::Users"]
    );
}

#[test]
fn test_nested_directories_are_scanned() {
    let app = AppFixture::new();
    app.touch_all(&["app/Panel/Resources/Billing/Invoices.rs"]);

    let root = DiscoveryRoot::new(app.root(), EntityKind::resource());
    assert_eq!(
        discovery().discover(&root),
        vec!["App::Panel::Resources::Billing::Invoices"]
    );
}

#[test]
fn test_missing_directory_yields_empty() {
    let app = AppFixture::new();
    let root = DiscoveryRoot::new(app.root(), EntityKind::page());

    assert!(discovery().discover(&root).is_empty());
}

#[test]
fn test_kinds_share_one_algorithm() {
    let app = AppFixture::new();
    app.touch_all(&["app/Panel/Cards/Revenue.rs", "app/Panel/Resources/Orders.rs"]);

    let discovery = discovery();
    let cards = discovery.discover(&DiscoveryRoot::new(app.root(), EntityKind::card()));
    let resources = discovery.discover(&DiscoveryRoot::new(app.root(), EntityKind::resource()));

    assert_eq!(cards, vec!["App::Panel::Cards::Revenue"]);
    assert_eq!(resources, vec!["App::Panel::Resources::Orders"]);
}

#[test]
fn test_custom_extension_and_namespace() {
    let app = AppFixture::new();
    app.touch_all(&["src/widgets/Revenue.card", "src/widgets/Ignored.rs"]);

    let mut catalog = TypeCatalog::new();
    catalog.register(TypeDescriptor::new("Acme::widgets::Revenue").implements("Panel::Card"));
    catalog.register(TypeDescriptor::new("Acme::widgets::Ignored").implements("Panel::Card"));

    let kind = EntityKind::card()
        .with_directory("src/widgets")
        .with_extension("card")
        .with_namespace("Acme");
    let found = EntityDiscovery::new(Arc::new(catalog)).discover(&DiscoveryRoot::new(app.root(), kind));

    assert_eq!(found, vec!["Acme::widgets::Revenue"]);
}

#[test]
fn test_results_are_distinct() {
    let app = AppFixture::new();
    // Same stem, different case of extension: both translate to one identifier
    app.touch_all(&["app/Panel/Resources/Orders.rs", "app/Panel/Resources/Orders.RS"]);

    let root = DiscoveryRoot::new(app.root(), EntityKind::resource());
    assert_eq!(discovery().discover(&root), vec!["App::Panel::Resources::Orders"]);
}

#[test]
fn test_files_directly_in_the_application_root() {
    let app = AppFixture::new();
    app.touch_all(&["Users.rs", "Orders.rs"]);

    let mut catalog = TypeCatalog::new();
    catalog.register_all([
        TypeDescriptor::new("App::Users").implements("Panel::Resource"),
        TypeDescriptor::new("App::Orders").implements("Panel::Resource"),
    ]);

    let kind = EntityKind::resource().with_directory(".");
    let found = EntityDiscovery::new(Arc::new(catalog)).discover(&DiscoveryRoot::new(app.root(), kind));

    assert_eq!(found, vec!["App::Orders", "App::Users"]);
}
