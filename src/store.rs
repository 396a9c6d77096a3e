use sea_orm::DatabaseConnection;

use crate::{
    db::{create_orm_conn, ensure_schema},
    error::StoreResult,
    models::{
        NewOrderItem, OrderId, OrderStatus, OrderWithItems, Product, ProductId, ReportEntry, User,
    },
    services::{auth_service, order_service, product_service, report_service},
};

/// Owned handle to the shop database.
///
/// Every operation reports failure as `false`, `None` or an empty list;
/// the cause is logged through `tracing` and never returned.
pub struct Store {
    orm: DatabaseConnection,
}

impl Store {
    /// Connect and make sure the schema exists.
    pub async fn open(database_url: &str) -> StoreResult<Self> {
        let orm = create_orm_conn(database_url).await?;
        ensure_schema(&orm).await?;
        Ok(Self { orm })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.orm
    }

    /// Release the connection. Dropping the store also releases it.
    pub async fn close(self) -> StoreResult<()> {
        self.orm.close().await?;
        tracing::debug!("store closed");
        Ok(())
    }

    pub async fn ensure_schema(&self) -> bool {
        settle("ensure_schema", ensure_schema(&self.orm).await).is_some()
    }

    pub async fn user_exists(&self, username: &str) -> bool {
        settle("user_exists", auth_service::user_exists(&self.orm, username).await)
            .unwrap_or(false)
    }

    pub async fn add_user(&self, username: &str, password: &str) -> bool {
        settle(
            "add_user",
            auth_service::register_user(&self.orm, username, password).await,
        )
        .is_some()
    }

    pub async fn verify_user(&self, username: &str, password: &str) -> Option<User> {
        settle(
            "verify_user",
            auth_service::login_user(&self.orm, username, password).await,
        )
        .flatten()
    }

    pub async fn add_product(&self, name: &str, description: Option<&str>, price: f64) -> bool {
        settle(
            "add_product",
            product_service::create_product(&self.orm, name, description, price).await,
        )
        .is_some()
    }

    pub async fn list_products(&self) -> Vec<Product> {
        settle("list_products", product_service::list_products(&self.orm).await)
            .unwrap_or_default()
    }

    pub async fn get_product(&self, id: ProductId) -> Option<Product> {
        settle("get_product", product_service::get_product(&self.orm, id).await).flatten()
    }

    pub async fn update_product(
        &self,
        id: ProductId,
        name: &str,
        description: Option<&str>,
        price: f64,
    ) -> bool {
        settle(
            "update_product",
            product_service::update_product(&self.orm, id, name, description, price).await,
        )
        .is_some()
    }

    /// `false` when the product is missing or still referenced by an order.
    pub async fn delete_product(&self, id: ProductId) -> bool {
        settle(
            "delete_product",
            product_service::delete_product(&self.orm, id).await,
        )
        .is_some()
    }

    pub async fn create_order(
        &self,
        client_name: &str,
        total: f64,
        items: &[NewOrderItem],
    ) -> Option<OrderId> {
        settle(
            "create_order",
            order_service::create_order(&self.orm, client_name, total, items).await,
        )
    }

    pub async fn get_order(&self, id: OrderId) -> Option<OrderWithItems> {
        settle("get_order", order_service::get_order(&self.orm, id).await).flatten()
    }

    pub async fn get_order_status(&self, id: OrderId) -> Option<OrderStatus> {
        settle(
            "get_order_status",
            order_service::get_order_status(&self.orm, id).await,
        )
        .flatten()
    }

    pub async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> bool {
        settle(
            "update_order_status",
            order_service::update_order_status(&self.orm, id, status).await,
        )
        .is_some()
    }

    pub async fn full_report(&self) -> Vec<ReportEntry> {
        settle("full_report", report_service::full_report(&self.orm).await).unwrap_or_default()
    }
}

fn settle<T>(operation: &'static str, result: StoreResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(operation, kind = err.kind(), error = %err, "store operation failed");
            None
        }
    }
}
