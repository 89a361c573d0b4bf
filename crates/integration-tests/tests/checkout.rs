//! Integration tests for cart translation and draft order creation.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use catalog_bridge::checkout::CheckoutError;
use catalog_bridge::shopify::Stores;
use catalog_bridge_core::{CartLine, LineItem, VariantId};
use catalog_bridge_integration_tests::{
    FakeStore, SOURCE_DOMAIN, TARGET_DOMAIN, app_state, product, stores,
};

fn by_sku(sku: &str, quantity: u32) -> CartLine {
    CartLine::by_sku(sku, quantity)
}

fn by_variant(id: i64, quantity: u32) -> CartLine {
    CartLine::by_variant(VariantId::new(id), quantity)
}

#[tokio::test]
async fn test_empty_cart_makes_no_calls() {
    let state = app_state(stores(vec![], vec![]));

    let err = state.translator().create_checkout(&[]).await.unwrap_err();

    assert!(matches!(err, CheckoutError::EmptyCart));
    assert_eq!(state.stores().target.list_calls(), 0);
    assert!(state.stores().target.orders().await.is_empty());
}

#[tokio::test]
async fn test_source_variant_becomes_target_line_item() {
    let state = app_state(stores(
        vec![product(1, "Tee", &[(10, Some("X"))])],
        vec![product(5, "Tee", &[(555, Some("X"))])],
    ));

    let outcome = state
        .translator()
        .create_checkout(&[by_variant(10, 2)])
        .await
        .unwrap();

    assert_eq!(outcome.items_processed, 1);
    assert!(outcome.warnings.is_none());
    assert_eq!(
        outcome.checkout_url.as_deref(),
        Some("https://target-shop.myshopify.com/invoices/1001")
    );

    let orders = state.stores().target.orders().await;
    assert_eq!(
        orders,
        vec![vec![LineItem {
            variant_id: VariantId::new(555),
            quantity: 2,
        }]]
    );
    // Orders only ever go to the target store
    assert!(state.stores().source.orders().await.is_empty());
}

#[tokio::test]
async fn test_partial_cart_creates_one_order() {
    let state = app_state(stores(
        vec![],
        vec![product(5, "Tee", &[(501, Some("A")), (502, Some("B"))])],
    ));
    let cart = [
        by_sku("A", 1),
        by_sku("MISSING", 1),
        by_sku("B", 3),
        CartLine {
            variant_id: None,
            sku: None,
            quantity: 1,
        },
    ];

    let outcome = state.translator().create_checkout(&cart).await.unwrap();

    assert_eq!(outcome.items_processed, 2);
    let warnings = outcome.warnings.unwrap();
    assert_eq!(
        warnings,
        vec![
            "Line 2 (SKU: MISSING): no matching variant in target store".to_string(),
            "Line 4 (SKU: N/A): no SKU or variant ID provided".to_string(),
        ]
    );

    let orders = state.stores().target.orders().await;
    assert_eq!(orders.len(), 1);
    let ids: Vec<i64> = orders[0].iter().map(|item| item.variant_id.as_i64()).collect();
    assert_eq!(ids, vec![501, 502]);
    assert_eq!(orders[0][1].quantity, 3);
}

#[tokio::test]
async fn test_no_items_mapped_creates_no_order() {
    let state = app_state(stores(
        vec![product(1, "Tee", &[(10, Some(""))])],
        vec![product(5, "Tee", &[(555, Some("X"))])],
    ));

    let err = state
        .translator()
        .create_checkout(&[by_variant(10, 1)])
        .await
        .unwrap_err();

    match err {
        CheckoutError::NoItemsMapped { warnings } => {
            assert_eq!(warnings, vec!["Line 1 (SKU: N/A): source variant 10 has no SKU"]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(state.stores().target.orders().await.is_empty());
}

#[tokio::test]
async fn test_lookup_failure_on_one_line_does_not_abort_others() {
    let stores = Stores::new(
        FakeStore::new(SOURCE_DOMAIN)
            .with_products(vec![product(1, "Tee", &[(10, Some("A")), (11, Some("B"))])])
            .failing_variant(11, 500),
        FakeStore::new(TARGET_DOMAIN)
            .with_products(vec![product(5, "Tee", &[(501, Some("A")), (502, Some("C"))])]),
    );
    let state = app_state(stores);
    let cart = [by_variant(10, 1), by_variant(11, 1), by_sku("C", 1)];

    let outcome = state.translator().create_checkout(&cart).await.unwrap();

    assert_eq!(outcome.items_processed, 2);
    let warnings = outcome.warnings.unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("Line 2 (SKU: N/A): lookup failed: Shopify API returned 500"));
}

#[tokio::test]
async fn test_unknown_source_variant_warning() {
    let state = app_state(stores(vec![], vec![product(5, "Tee", &[(501, Some("A"))])]));
    let cart = [by_variant(99, 1), by_sku("A", 1)];

    let outcome = state.translator().create_checkout(&cart).await.unwrap();

    assert_eq!(
        outcome.warnings.unwrap(),
        vec!["Line 1 (SKU: N/A): source variant 99 not found"]
    );
}

#[tokio::test]
async fn test_sku_takes_precedence_over_variant_id() {
    let state = app_state(stores(
        vec![product(1, "Tee", &[(10, Some("OTHER"))])],
        vec![product(5, "Tee", &[(501, Some("A")), (502, Some("OTHER"))])],
    ));
    let line = CartLine {
        variant_id: Some(VariantId::new(10)),
        sku: Some("A".to_string()),
        quantity: 1,
    };

    let outcome = state.translator().create_checkout(&[line]).await.unwrap();

    assert_eq!(outcome.items_processed, 1);
    assert_eq!(state.stores().source.variant_calls(), 0);
    let orders = state.stores().target.orders().await;
    assert_eq!(orders[0][0].variant_id, VariantId::new(501));
}

#[tokio::test]
async fn test_unmatched_sku_falls_back_to_variant_id() {
    let state = app_state(stores(
        vec![product(1, "Tee", &[(10, Some("B"))])],
        vec![product(5, "Tee", &[(502, Some("B"))])],
    ));
    let line = CartLine {
        variant_id: Some(VariantId::new(10)),
        sku: Some("STALE".to_string()),
        quantity: 4,
    };

    let outcome = state.translator().create_checkout(&[line]).await.unwrap();

    assert_eq!(outcome.items_processed, 1);
    let orders = state.stores().target.orders().await;
    assert_eq!(orders[0][0].variant_id, VariantId::new(502));
    assert_eq!(orders[0][0].quantity, 4);
}

#[tokio::test]
async fn test_zero_quantity_is_a_warning() {
    let state = app_state(stores(vec![], vec![product(5, "Tee", &[(501, Some("A"))])]));
    let cart = [by_sku("A", 0), by_sku("A", 1)];

    let outcome = state.translator().create_checkout(&cart).await.unwrap();

    assert_eq!(outcome.items_processed, 1);
    assert_eq!(
        outcome.warnings.unwrap(),
        vec!["Line 1 (SKU: A): quantity must be at least 1"]
    );
}

#[tokio::test]
async fn test_repeated_sku_uses_cache() {
    let state = app_state(stores(vec![], vec![product(5, "Tee", &[(501, Some("A"))])]));
    let cart = [by_sku("A", 1), by_sku("A", 2)];

    let outcome = state.translator().create_checkout(&cart).await.unwrap();

    assert_eq!(outcome.items_processed, 2);
    assert_eq!(state.stores().target.list_calls(), 1);
}

#[tokio::test]
async fn test_draft_order_failure_is_remote_error() {
    let stores = Stores::new(
        FakeStore::new(SOURCE_DOMAIN),
        FakeStore::new(TARGET_DOMAIN)
            .with_products(vec![product(5, "Tee", &[(501, Some("A"))])])
            .failing_orders(422),
    );
    let state = app_state(stores);

    let err = state
        .translator()
        .create_checkout(&[by_sku("A", 1)])
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::Remote(ref e) if e.status() == Some(422)));
    assert_eq!(state.stores().target.orders().await.len(), 1);
}

#[tokio::test]
async fn test_translate_without_order() {
    let state = app_state(stores(vec![], vec![product(5, "Tee", &[(501, Some("A"))])]));

    let translation = state
        .translator()
        .translate(&[by_sku("A", 2), by_sku("Z", 1)])
        .await
        .unwrap();

    assert_eq!(translation.line_items.len(), 1);
    assert_eq!(translation.warnings.len(), 1);
    assert!(state.stores().target.orders().await.is_empty());
}
