use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub type ProductId = i32;
pub type OrderId = i32;

/// A registered operator. The credential hash never leaves the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "Pendente")]
    Pendente,
    #[serde(rename = "Em Produção")]
    EmProducao,
    #[serde(rename = "Concluído")]
    Concluido,
    #[serde(rename = "Entregue")]
    Entregue,
    #[serde(rename = "Cancelado")]
    Cancelado,
}

impl OrderStatus {
    /// Workflow order, as offered to the operator.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pendente,
        OrderStatus::EmProducao,
        OrderStatus::Concluido,
        OrderStatus::Entregue,
        OrderStatus::Cancelado,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pendente => "Pendente",
            OrderStatus::EmProducao => "Em Produção",
            OrderStatus::Concluido => "Concluído",
            OrderStatus::Entregue => "Entregue",
            OrderStatus::Cancelado => "Cancelado",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| StoreError::validation(format!("unknown order status {s:?}")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub client_name: String,
    pub order_date: NaiveDate,
    pub status: OrderStatus,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_price: f64,
}

/// One requested line of a new order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    pub product_name: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub order: Order,
    pub items: Vec<ReportLine>,
}
