use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionError,
    TransactionTrait,
};

use crate::entity::{order, order_item, payment};
use crate::error::{OrderError, OrderResult};
use crate::models::{
    CreatePayment, NewOrder, Order, OrderItem, Payment, UpdateOrder, UpdatePayment,
};
use crate::repository::OrderRepository;

/// PostgreSQL implementation of OrderRepository using SeaORM.
///
/// Order creation and payment recording each run inside a single
/// transaction; a failure on any row rolls back everything.
#[derive(Debug, Clone)]
pub struct PgOrderRepository {
    db: DatabaseConnection,
}

impl PgOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn unwrap_txn_error(err: TransactionError<OrderError>) -> OrderError {
    match err {
        TransactionError::Connection(e) => OrderError::Database(e),
        TransactionError::Transaction(e) => e,
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create_order(&self, new_order: NewOrder) -> OrderResult<Order> {
        let model = self
            .db
            .transaction::<_, order::Model, OrderError>(|txn| {
                Box::pin(async move {
                    let header = order::ActiveModel {
                        id: NotSet,
                        customer_id: Set(new_order.customer_id),
                        payment_method: Set(new_order.payment_method),
                        total: Set(new_order.total),
                        status: Set("pending".to_string()),
                        created_at: Set(Utc::now()),
                    }
                    .insert(txn)
                    .await?;

                    for line in new_order.items {
                        order_item::ActiveModel {
                            id: NotSet,
                            order_id: Set(header.id),
                            menu_id: Set(line.menu_id),
                            quantity: Set(line.quantity),
                            subtotal: Set(line.subtotal),
                        }
                        .insert(txn)
                        .await?;
                    }

                    Ok(header)
                })
            })
            .await
            .map_err(unwrap_txn_error)?;

        tracing::info!(order_id = model.id, total = model.total, "Created order");
        Ok(model.into())
    }

    async fn get_order(&self, id: i32) -> OrderResult<Option<Order>> {
        let row = order::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Order::from))
    }

    async fn get_order_items(&self, order_id: i32) -> OrderResult<Vec<OrderItem>> {
        let rows = order_item::Entity::find()
            .filter(order_item::Column::OrderId.eq(order_id))
            .order_by_asc(order_item::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(OrderItem::from).collect())
    }

    async fn update_order(&self, id: i32, input: UpdateOrder) -> OrderResult<Order> {
        let row = order::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(OrderError::NotFound(id))?;

        let mut active: order::ActiveModel = row.into();
        if let Some(customer_id) = input.customer_id {
            active.customer_id = Set(Some(customer_id));
        }
        if let Some(payment_method) = input.payment_method {
            active.payment_method = Set(payment_method);
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }

        let updated = active.update(&self.db).await?;
        Ok(updated.into())
    }

    async fn delete_order(&self, id: i32) -> OrderResult<bool> {
        let result = order::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn create_payment(&self, input: CreatePayment) -> OrderResult<Payment> {
        let model = self
            .db
            .transaction::<_, payment::Model, OrderError>(|txn| {
                Box::pin(async move {
                    let header = order::Entity::find_by_id(input.order_id)
                        .one(txn)
                        .await?
                        .ok_or(OrderError::NotFound(input.order_id))?;

                    let row = payment::ActiveModel {
                        id: NotSet,
                        order_id: Set(input.order_id),
                        amount: Set(input.amount),
                        payment_method: Set(input.payment_method),
                        payment_status: Set(input.payment_status),
                        paid_at: Set(Some(Utc::now())),
                    }
                    .insert(txn)
                    .await?;

                    let mut active: order::ActiveModel = header.into();
                    active.status = Set("completed".to_string());
                    active.update(txn).await?;

                    Ok(row)
                })
            })
            .await
            .map_err(unwrap_txn_error)?;

        tracing::info!(
            payment_id = model.id,
            order_id = model.order_id,
            "Recorded payment"
        );
        Ok(model.into())
    }

    async fn get_payment(&self, id: i32) -> OrderResult<Option<Payment>> {
        let row = payment::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Payment::from))
    }

    async fn update_payment(&self, id: i32, input: UpdatePayment) -> OrderResult<Payment> {
        let row = payment::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(OrderError::PaymentNotFound(id))?;

        let mut active: payment::ActiveModel = row.into();
        if let Some(amount) = input.amount {
            active.amount = Set(amount);
        }
        if let Some(payment_method) = input.payment_method {
            active.payment_method = Set(payment_method);
        }
        if let Some(payment_status) = input.payment_status {
            active.payment_status = Set(payment_status);
        }

        let updated = active.update(&self.db).await?;
        Ok(updated.into())
    }

    async fn delete_payment(&self, id: i32) -> OrderResult<bool> {
        let result = payment::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewOrderItem;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, RuntimeErr};

    fn espresso_order() -> NewOrder {
        NewOrder {
            customer_id: Some(1),
            payment_method: "cash".to_string(),
            total: 6.0,
            items: vec![NewOrderItem {
                menu_id: 1,
                quantity: 2,
                subtotal: 6.0,
            }],
        }
    }

    fn header_row() -> order::Model {
        order::Model {
            id: 10,
            customer_id: Some(1),
            payment_method: "cash".to_string(),
            total: 6.0,
            status: "pending".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_order_commits_header_and_items_together() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![header_row()]])
            .append_query_results([vec![order_item::Model {
                id: 1,
                order_id: 10,
                menu_id: 1,
                quantity: 2,
                subtotal: 6.0,
            }]])
            .into_connection();

        let repo = PgOrderRepository::new(db.clone());
        let order = repo.create_order(espresso_order()).await.unwrap();
        assert_eq!(order.id, 10);
        assert_eq!(order.status, "pending");

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("COMMIT"));
        assert!(!log.contains("ROLLBACK"));
    }

    #[tokio::test]
    async fn test_create_order_rolls_back_when_item_insert_fails() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![header_row()]])
            .append_query_errors([DbErr::Exec(RuntimeErr::Internal(
                "order_items insert failed".to_string(),
            ))])
            .into_connection();

        let repo = PgOrderRepository::new(db.clone());
        let result = repo.create_order(espresso_order()).await;
        assert!(matches!(result, Err(OrderError::Database(_))));

        // The header insert succeeded inside the transaction, so the failed
        // item insert must end in a rollback, never a commit.
        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("ROLLBACK"));
        assert!(!log.contains("COMMIT"));
    }
}
