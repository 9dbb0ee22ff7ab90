//! End-to-end boot of the fixture application
//!
//! Exercises the complete flow: layered config -> discovery -> manifest
//! registration -> aggregated component table.

use panel_core::{ConfigLoader, Panel, TypeCatalog, TypeDescriptor};
use panel_fs::NormalizedPath;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

fn fixture_root() -> NormalizedPath {
    NormalizedPath::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../../test-fixtures/apps/admin-demo"))
}

/// Types the host application registers at startup.
fn catalog() -> Arc<TypeCatalog> {
    let mut catalog = TypeCatalog::new();
    catalog.register_all([
        TypeDescriptor::new("Panel::Resource").abstract_type(),
        TypeDescriptor::new("Panel::Page").abstract_type(),
        TypeDescriptor::new("Panel::Card").abstract_type(),
        TypeDescriptor::new("App::Panel::Resources::Users")
            .implements("Panel::Resource")
            .with_group("Accounts"),
        TypeDescriptor::new("App::Panel::Resources::Orders")
            .implements("Panel::Resource")
            .with_group("Sales"),
        TypeDescriptor::new("App::Panel::Resources::Billing::Invoices")
            .implements("Panel::Resource")
            .with_group("Sales")
            .with_label("Billing Invoices"),
        TypeDescriptor::new("App::Panel::Resources::Helpers"),
        TypeDescriptor::new("App::Panel::Pages::Reports").implements("Panel::Page"),
        TypeDescriptor::new("App::Panel::Cards::Revenue").implements("Panel::Card"),
    ]);
    Arc::new(catalog)
}

/// Boot with an empty global config layer so the host machine's settings
/// cannot leak into the test.
fn boot() -> (Panel, TempDir) {
    let global = TempDir::new().unwrap();
    let config = ConfigLoader::with_global_config_dir(fixture_root(), global.path().to_path_buf())
        .load()
        .unwrap();
    let panel = Panel::new(config, catalog()).unwrap();
    (panel, global)
}

#[test]
fn test_config_layer_applied() {
    let (panel, _global) = boot();
    assert_eq!(panel.config().discovery.cache_ttl_secs, 600);
    assert_eq!(panel.config().manifests.len(), 2);
    assert_eq!(panel.config().discovery.resource_kind().extension, "entity");
    assert_eq!(panel.config().discovery.card_kind().extension, "entity");
}

#[test]
fn test_discovery_finds_valid_types_only() {
    let (panel, _global) = boot();

    assert_eq!(
        panel.resources().identifiers(),
        vec![
            "App::Panel::Resources::Billing::Invoices",
            "App::Panel::Resources::Orders",
            "App::Panel::Resources::Users",
        ]
    );
    assert_eq!(panel.pages().identifiers(), vec!["App::Panel::Pages::Reports"]);
    assert_eq!(panel.cards().identifiers(), vec!["App::Panel::Cards::Revenue"]);
}

#[test]
fn test_navigation_groups() {
    let (panel, _global) = boot();

    let groups = panel.grouped_resources();
    let sales: Vec<&str> = groups["Sales"].iter().map(|e| e.label.as_str()).collect();
    assert_eq!(sales, vec!["Billing Invoices", "Orders"]);
    assert_eq!(groups["Accounts"][0].key, "users");
}

#[test]
fn test_manifests_ordered_by_priority() {
    let (panel, _global) = boot();

    let packages: Vec<String> = panel.manifests().into_iter().map(|m| m.package).collect();
    assert_eq!(packages, vec!["acme/charts", "acme/legacy"]);
}

#[test]
fn test_aggregated_table_for_the_frontend() {
    let (panel, _global) = boot();

    assert_eq!(
        panel.aggregated_manifest().to_json(),
        json!({
            "acme/charts": {
                "base_url": "/vendor/acme-charts",
                "priority": 50,
                "components": {
                    "Cards/LineChart": "line-chart.js",
                    "Pages/Reports": { "useFallback": true },
                    "Pages/Forecast": { "file": "forecast.js", "preload": true }
                }
            },
            "acme/legacy": {
                "base_url": "",
                "priority": 100,
                "components": {}
            }
        })
    );
}
