use marcenaria::{Store, models::NewOrderItem};

async fn open_store() -> anyhow::Result<Store> {
    Ok(Store::open("sqlite::memory:").await?)
}

#[tokio::test]
async fn added_product_appears_once_with_fresh_id() -> anyhow::Result<()> {
    let store = open_store().await?;

    assert!(store.add_product("Banco", Some("Banco de carvalho"), 120.0).await);
    let before = store.list_products().await;
    assert_eq!(before.len(), 1);

    assert!(store.add_product("Cômoda", None, 899.9).await);
    let after = store.list_products().await;
    assert_eq!(after.len(), 2);

    let new: Vec<_> = after
        .iter()
        .filter(|p| !before.iter().any(|b| b.id == p.id))
        .collect();
    assert_eq!(new.len(), 1);
    assert_eq!(new[0].name, "Cômoda");
    assert_eq!(new[0].description, None);
    assert_eq!(new[0].price, 899.9);
    assert_ne!(new[0].id, before[0].id);

    Ok(())
}

#[tokio::test]
async fn products_are_listed_in_id_order() -> anyhow::Result<()> {
    let store = open_store().await?;
    for (name, price) in [("Cadeira", 300.0), ("Armário", 1500.0), ("Banqueta", 90.0)] {
        assert!(store.add_product(name, None, price).await);
    }

    let products = store.list_products().await;
    let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Cadeira", "Armário", "Banqueta"]);
    assert!(products.windows(2).all(|w| w[0].id < w[1].id));

    Ok(())
}

#[tokio::test]
async fn invalid_product_input_is_rejected() -> anyhow::Result<()> {
    let store = open_store().await?;

    assert!(!store.add_product("", None, 10.0).await);
    assert!(!store.add_product("Prateleira", None, -1.0).await);
    assert!(!store.add_product("Prateleira", None, f64::NAN).await);
    assert!(store.list_products().await.is_empty());

    Ok(())
}

#[tokio::test]
async fn update_rewrites_every_field() -> anyhow::Result<()> {
    let store = open_store().await?;
    assert!(store.add_product("Mesa", Some("Mesa de centro"), 400.0).await);
    let id = store.list_products().await[0].id;

    assert!(store.update_product(id, "Mesa Lateral", None, 250.0).await);

    let product = store.get_product(id).await.expect("product");
    assert_eq!(product.name, "Mesa Lateral");
    assert_eq!(product.description, None);
    assert_eq!(product.price, 250.0);

    Ok(())
}

#[tokio::test]
async fn update_of_missing_or_invalid_product_fails() -> anyhow::Result<()> {
    let store = open_store().await?;
    assert!(store.add_product("Mesa", None, 400.0).await);
    let id = store.list_products().await[0].id;

    assert!(!store.update_product(id + 100, "Mesa", None, 10.0).await);
    assert!(!store.update_product(id, "Mesa", None, -5.0).await);
    assert!(!store.update_product(id, "  ", None, 5.0).await);

    let product = store.get_product(id).await.expect("product");
    assert_eq!(product.price, 400.0);

    Ok(())
}

#[tokio::test]
async fn get_missing_product_is_none() -> anyhow::Result<()> {
    let store = open_store().await?;
    assert!(store.get_product(42).await.is_none());
    Ok(())
}

#[tokio::test]
async fn delete_missing_product_returns_false() -> anyhow::Result<()> {
    let store = open_store().await?;
    assert!(!store.delete_product(42).await);
    Ok(())
}

#[tokio::test]
async fn delete_unreferenced_product_succeeds() -> anyhow::Result<()> {
    let store = open_store().await?;
    assert!(store.add_product("Gaveteiro", None, 600.0).await);
    let id = store.list_products().await[0].id;

    assert!(store.delete_product(id).await);
    assert!(store.get_product(id).await.is_none());
    assert!(!store.delete_product(id).await);

    Ok(())
}

#[tokio::test]
async fn delete_referenced_product_is_refused() -> anyhow::Result<()> {
    let store = open_store().await?;
    assert!(store.add_product("Cadeira", None, 50.0).await);
    let id = store.list_products().await[0].id;

    let order_id = store
        .create_order(
            "Maria",
            100.0,
            &[NewOrderItem {
                product_id: id,
                quantity: 2,
            }],
        )
        .await
        .expect("order created");

    assert!(!store.delete_product(id).await);
    assert!(store.get_product(id).await.is_some());

    // the historical line is still resolvable in the report
    let report = store.full_report().await;
    let entry = report.iter().find(|e| e.order.id == order_id).expect("entry");
    assert_eq!(entry.items.len(), 1);
    assert_eq!(entry.items[0].product_name, "Cadeira");

    Ok(())
}
