use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;

use crate::{
    entity::{
        order_items::{Column as OrderItemCol, Entity as OrderItems},
        products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    },
    error::{StoreError, StoreResult},
    models::{Product, ProductId},
};

pub async fn list_products(conn: &DatabaseConnection) -> StoreResult<Vec<Product>> {
    let items = Products::find()
        .order_by_asc(Column::Id)
        .all(conn)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();
    Ok(items)
}

pub async fn get_product(conn: &DatabaseConnection, id: ProductId) -> StoreResult<Option<Product>> {
    let result = Products::find_by_id(id)
        .one(conn)
        .await?
        .map(product_from_entity);
    Ok(result)
}

pub async fn create_product(
    conn: &DatabaseConnection,
    name: &str,
    description: Option<&str>,
    price: f64,
) -> StoreResult<Product> {
    let name = validate_name(name)?;
    validate_price(price)?;

    let active = ActiveModel {
        id: NotSet,
        name: Set(name),
        description: Set(normalize_description(description)),
        price: Set(price),
    };
    let product = active.insert(conn).await?;

    tracing::debug!(product_id = product.id, "product created");
    Ok(product_from_entity(product))
}

/// Rewrites every field; there are no partial updates.
pub async fn update_product(
    conn: &DatabaseConnection,
    id: ProductId,
    name: &str,
    description: Option<&str>,
    price: f64,
) -> StoreResult<Product> {
    let name = validate_name(name)?;
    validate_price(price)?;

    let existing = Products::find_by_id(id).one(conn).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(StoreError::NotFound),
    };

    let mut active: ActiveModel = existing.into();
    active.name = Set(name);
    active.description = Set(normalize_description(description));
    active.price = Set(price);
    let product = active.update(conn).await?;

    tracing::debug!(product_id = product.id, "product updated");
    Ok(product_from_entity(product))
}

/// Refuses while any order item still points at the product, so the
/// report never loses historical lines.
pub async fn delete_product(conn: &DatabaseConnection, id: ProductId) -> StoreResult<()> {
    let txn = conn.begin().await?;

    let references = OrderItems::find()
        .filter(OrderItemCol::ProductId.eq(id))
        .count(&txn)
        .await?;
    if references > 0 {
        return Err(StoreError::Integrity(format!(
            "product {id} is referenced by {references} order item(s)"
        )));
    }

    let result = Products::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(StoreError::NotFound);
    }

    txn.commit().await?;

    tracing::debug!(product_id = id, "product deleted");
    Ok(())
}

fn validate_name(name: &str) -> StoreResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::validation("product name is required"));
    }
    Ok(name.to_string())
}

fn validate_price(price: f64) -> StoreResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(StoreError::validation(format!(
            "price must be a non-negative number, got {price}"
        )));
    }
    Ok(())
}

fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        name: model.name,
        description: model.description,
        price: model.price,
    }
}
