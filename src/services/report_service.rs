use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};

use crate::{
    entity::{
        order_items::{Column as OrderItemCol, Entity as OrderItems, Relation as OrderItemRelation},
        orders::{Column as OrderCol, Entity as Orders},
        products::Column as ProdCol,
    },
    error::StoreResult,
    models::{ReportEntry, ReportLine},
    services::order_service::order_from_entity,
};

/// Every order, newest first, with its lines resolved against the current
/// catalog.
pub async fn full_report(conn: &DatabaseConnection) -> StoreResult<Vec<ReportEntry>> {
    #[derive(Debug, FromQueryResult)]
    struct LineRow {
        product_name: String,
        quantity: i32,
    }

    let orders = Orders::find()
        .order_by_desc(OrderCol::Id)
        .all(conn)
        .await?;

    let mut report = Vec::with_capacity(orders.len());
    for order in orders {
        let items = OrderItems::find()
            .select_only()
            .column_as(ProdCol::Name, "product_name")
            .column_as(OrderItemCol::Quantity, "quantity")
            .join(JoinType::InnerJoin, OrderItemRelation::Products.def())
            .filter(OrderItemCol::OrderId.eq(order.id))
            .order_by_asc(OrderItemCol::Id)
            .into_model::<LineRow>()
            .all(conn)
            .await?
            .into_iter()
            .map(|row| ReportLine {
                product_name: row.product_name,
                quantity: row.quantity,
            })
            .collect();

        report.push(ReportEntry {
            order: order_from_entity(order)?,
            items,
        });
    }

    Ok(report)
}

/// Plain-text layout used by the shop's report screen.
pub fn render_text(report: &[ReportEntry]) -> String {
    if report.is_empty() {
        return "Nenhuma encomenda registrada.\n".to_string();
    }

    let mut out = String::new();
    for entry in report {
        let order = &entry.order;
        out.push_str(&format!(
            "--- Encomenda ID: {} | Cliente: {} | Data: {} ---\n",
            order.id, order.client_name, order.order_date
        ));
        out.push_str(&format!("    Status: {}\n", order.status));
        out.push_str(&format!("    Total: R$ {:.2}\n", order.total));
        out.push_str("    Itens:\n");
        if entry.items.is_empty() {
            out.push_str("        (Nenhum item encontrado)\n");
        }
        for item in &entry.items {
            out.push_str(&format!(
                "        - {}: {} unidade(s)\n",
                item.product_name, item.quantity
            ));
        }
        out.push_str(&"-".repeat(60));
        out.push_str("\n\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::{Order, OrderStatus};

    #[test]
    fn empty_report_has_placeholder() {
        assert_eq!(render_text(&[]), "Nenhuma encomenda registrada.\n");
    }

    #[test]
    fn renders_order_header_and_lines() {
        let entry = ReportEntry {
            order: Order {
                id: 7,
                client_name: "Maria".into(),
                order_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
                status: OrderStatus::EmProducao,
                total: 150.0,
            },
            items: vec![ReportLine {
                product_name: "Mesa de Jantar".into(),
                quantity: 3,
            }],
        };

        let text = render_text(&[entry]);
        assert!(text.starts_with("--- Encomenda ID: 7 | Cliente: Maria | Data: 2024-05-02 ---\n"));
        assert!(text.contains("    Status: Em Produção\n"));
        assert!(text.contains("    Total: R$ 150.00\n"));
        assert!(text.contains("        - Mesa de Jantar: 3 unidade(s)\n"));
        assert!(!text.contains("Nenhum item encontrado"));
        assert!(text.ends_with(&format!("unidade(s)\n{}\n\n", "-".repeat(60))));
    }

    #[test]
    fn order_without_lines_is_marked() {
        let entry = ReportEntry {
            order: Order {
                id: 1,
                client_name: "João".into(),
                order_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                status: OrderStatus::Pendente,
                total: 0.0,
            },
            items: Vec::new(),
        };

        assert!(render_text(&[entry]).contains("        (Nenhum item encontrado)\n"));
    }
}
