use chrono::Local;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;

use crate::{
    entity::{
        order_items::{
            ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems,
            Model as OrderItemModel,
        },
        orders::{
            ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel,
        },
        products::Entity as Products,
    },
    error::{StoreError, StoreResult},
    models::{NewOrderItem, Order, OrderId, OrderItem, OrderStatus, OrderWithItems},
};

/// Largest accepted gap between the caller's total and the sum of the
/// item subtotals: half a centavo.
const TOTAL_TOLERANCE: f64 = 0.005;

/// Insert the order and all of its items in one transaction.
///
/// Prices are read inside the transaction and captured on each item; the
/// stored total is their sum and is never recomputed afterwards.
pub async fn create_order(
    conn: &DatabaseConnection,
    client_name: &str,
    total: f64,
    items: &[NewOrderItem],
) -> StoreResult<OrderId> {
    let client_name = client_name.trim();
    if client_name.is_empty() {
        return Err(StoreError::validation("client name is required"));
    }
    if items.is_empty() {
        return Err(StoreError::validation("an order needs at least one item"));
    }
    if let Some(item) = items.iter().find(|item| item.quantity <= 0) {
        return Err(StoreError::validation(format!(
            "quantity for product {} must be positive, got {}",
            item.product_id, item.quantity
        )));
    }

    let txn = conn.begin().await?;

    let mut priced: Vec<(NewOrderItem, f64)> = Vec::with_capacity(items.len());
    let mut computed_total = 0.0;
    for item in items {
        let product = Products::find_by_id(item.product_id).one(&txn).await?;
        let product = match product {
            Some(p) => p,
            None => {
                return Err(StoreError::Integrity(format!(
                    "order item references missing product {}",
                    item.product_id
                )));
            }
        };
        computed_total += product.price * f64::from(item.quantity);
        priced.push((*item, product.price));
    }

    if !total.is_finite() || (computed_total - total).abs() > TOTAL_TOLERANCE {
        return Err(StoreError::validation(format!(
            "order total {total:.2} does not match item subtotals {computed_total:.2}"
        )));
    }

    let order = OrderActive {
        id: NotSet,
        client_name: Set(client_name.to_string()),
        order_date: Set(Local::now().date_naive()),
        status: Set(OrderStatus::Pendente.as_str().to_string()),
        total: Set(computed_total),
    }
    .insert(&txn)
    .await?;

    for (item, unit_price) in priced {
        OrderItemActive {
            id: NotSet,
            order_id: Set(order.id),
            product_id: Set(item.product_id),
            quantity: Set(item.quantity),
            unit_price: Set(unit_price),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    tracing::info!(order_id = order.id, total = order.total, "order created");
    Ok(order.id)
}

pub async fn get_order(
    conn: &DatabaseConnection,
    id: OrderId,
) -> StoreResult<Option<OrderWithItems>> {
    let order = Orders::find_by_id(id).one(conn).await?;
    let order = match order {
        Some(o) => order_from_entity(o)?,
        None => return Ok(None),
    };

    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .order_by_asc(OrderItemCol::Id)
        .all(conn)
        .await?
        .into_iter()
        .map(order_item_from_entity)
        .collect();

    Ok(Some(OrderWithItems { order, items }))
}

pub async fn get_order_status(
    conn: &DatabaseConnection,
    id: OrderId,
) -> StoreResult<Option<OrderStatus>> {
    let order = Orders::find_by_id(id).one(conn).await?;
    order.map(|o| o.status.parse::<OrderStatus>()).transpose()
}

/// Status is the only column that changes after creation.
pub async fn update_order_status(
    conn: &DatabaseConnection,
    id: OrderId,
    status: OrderStatus,
) -> StoreResult<()> {
    let result = Orders::update_many()
        .col_expr(OrderCol::Status, Expr::value(status.as_str()))
        .filter(OrderCol::Id.eq(id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(StoreError::NotFound);
    }

    tracing::info!(order_id = id, status = %status, "order status updated");
    Ok(())
}

pub(crate) fn order_from_entity(model: OrderModel) -> StoreResult<Order> {
    let status = model.status.parse::<OrderStatus>().map_err(|_| {
        StoreError::Integrity(format!(
            "order {} has unknown status {:?}",
            model.id, model.status
        ))
    })?;

    Ok(Order {
        id: model.id,
        client_name: model.client_name,
        order_date: model.order_date,
        status,
        total: model.total,
    })
}

fn order_item_from_entity(model: OrderItemModel) -> OrderItem {
    OrderItem {
        id: model.id,
        order_id: model.order_id,
        product_id: model.product_id,
        quantity: model.quantity,
        unit_price: model.unit_price,
    }
}
