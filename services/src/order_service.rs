//! Checkout and order administration.

use crate::service::{AppError, ServiceResult};
use chrono::Utc;
use db::models::json::{Address, CartData};
use db::models::order::{self, OrderStatus, PaymentMethod};
use db::models::{order_item, product, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: i64,
    pub quantity: i32,
    #[serde(default)]
    pub size: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrder {
    pub items: Vec<OrderLine>,
    pub address: Address,
    pub payment_method: PaymentMethod,
}

/// An order together with its line items.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: order::Model,
    pub items: Vec<order_item::Model>,
}

fn check_address(address: &Address) -> ServiceResult<()> {
    let required = [
        ("firstName", &address.first_name),
        ("street", &address.street),
        ("city", &address.city),
        ("country", &address.country),
        ("phone", &address.phone),
    ];
    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| *k)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Delivery address is missing: {}",
            missing.join(", ")
        )))
    }
}

/// Sum of `price * quantity`, rounded to cents.
pub fn order_total(lines: &[(f64, i32)]) -> f64 {
    let total: f64 = lines.iter().map(|(p, q)| p * f64::from(*q)).sum();
    (total * 100.0).round() / 100.0
}

async fn attach_items(
    db: &DatabaseConnection,
    orders: Vec<order::Model>,
) -> ServiceResult<Vec<OrderWithItems>> {
    let ids = orders.iter().map(|o| o.id).collect();
    let mut by_order: HashMap<i64, Vec<order_item::Model>> = HashMap::new();
    for item in order_item::Model::for_orders(db, ids).await? {
        by_order.entry(item.order_id).or_default().push(item);
    }

    Ok(orders
        .into_iter()
        .map(|order| {
            let items = by_order.remove(&order.id).unwrap_or_default();
            OrderWithItems { order, items }
        })
        .collect())
}

pub struct OrderService;

impl OrderService {
    /// Places a cash-on-delivery order for `user_id` and empties their cart.
    ///
    /// Prices come from the catalogue, not from the request. Order, lines and
    /// cart reset are written in one transaction.
    pub async fn place(
        db: &DatabaseConnection,
        user_id: i64,
        req: PlaceOrder,
    ) -> ServiceResult<OrderWithItems> {
        if req.payment_method != PaymentMethod::Cod {
            return Err(AppError::validation(format!(
                "Payment method '{}' is not available; use cod",
                req.payment_method
            )));
        }
        if req.items.is_empty() {
            return Err(AppError::validation("Order must contain at least one item"));
        }
        if let Some(line) = req.items.iter().find(|l| l.quantity < 1) {
            return Err(AppError::validation(format!(
                "Quantity for product {} must be at least 1",
                line.product_id
            )));
        }
        check_address(&req.address)?;

        let ids: Vec<i64> = req.items.iter().map(|l| l.product_id).collect();
        let products: BTreeMap<i64, product::Model> = product::Entity::find()
            .filter(product::Column::Id.is_in(ids))
            .all(db)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let mut priced = Vec::with_capacity(req.items.len());
        for line in &req.items {
            let product = products
                .get(&line.product_id)
                .ok_or_else(|| AppError::not_found(format!("Product {} not found", line.product_id)))?;
            priced.push((product, line));
        }
        let amount = order_total(
            &priced
                .iter()
                .map(|(p, l)| (p.price, l.quantity))
                .collect::<Vec<_>>(),
        );

        let txn = db.begin().await?;
        let now = Utc::now();

        let order = order::ActiveModel {
            user_id: Set(user_id),
            address: Set(req.address),
            payment_method: Set(PaymentMethod::Cod),
            payment: Set(false),
            amount: Set(amount),
            status: Set(OrderStatus::OrderPlaced),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut items = Vec::with_capacity(priced.len());
        for (product, line) in priced {
            let item = order_item::ActiveModel {
                order_id: Set(order.id),
                product_id: Set(product.id),
                name: Set(product.name.clone()),
                price: Set(product.price),
                quantity: Set(line.quantity),
                size: Set(line.size.clone()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            items.push(item);
        }

        user::ActiveModel {
            id: Set(user_id),
            cart_data: Set(CartData::default()),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(|e| AppError::from_db_missing(e, "User not found"))?;

        txn.commit().await?;

        tracing::info!(order_id = order.id, user_id, amount, "Order placed");
        Ok(OrderWithItems { order, items })
    }

    pub async fn list_all(db: &DatabaseConnection) -> ServiceResult<Vec<OrderWithItems>> {
        let orders = order::Model::list(db).await?;
        attach_items(db, orders).await
    }

    pub async fn list_for_user(
        db: &DatabaseConnection,
        user_id: i64,
    ) -> ServiceResult<Vec<OrderWithItems>> {
        let orders = order::Model::list_for_user(db, user_id).await?;
        attach_items(db, orders).await
    }

    /// Any status may follow any other.
    pub async fn update_status(
        db: &DatabaseConnection,
        order_id: i64,
        status: OrderStatus,
    ) -> ServiceResult<order::Model> {
        order::Model::set_status(db, order_id, status)
            .await
            .map_err(|e| AppError::from_db_missing(e, format!("Order {order_id} not found")))
    }
}
