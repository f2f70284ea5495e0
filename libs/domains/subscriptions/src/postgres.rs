use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QuerySelect, Select,
};
use uuid::Uuid;

use crate::{
    entity,
    error::SubscriptionResult,
    models::{Subscription, SubscriptionFilter, SummaryQuery},
    repository::SubscriptionRepository,
};

pub struct PgSubscriptionRepository {
    db: DatabaseConnection,
}

impl PgSubscriptionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn list_select(filter: SubscriptionFilter) -> Select<entity::Entity> {
    entity::Entity::find().filter(
        Condition::all()
            .add_option(filter.user_id.map(|id| entity::Column::UserId.eq(id)))
            .add_option(
                filter
                    .service_name
                    .map(|name| entity::Column::ServiceName.eq(name)),
            ),
    )
}

/// `SELECT COALESCE(SUM(price), 0)` over the subscriptions overlapping the window.
///
/// Month strings are compared as text.
fn summary_select(query: SummaryQuery) -> Select<entity::Entity> {
    let condition = Condition::all()
        .add_option(query.to.map(|to| entity::Column::StartDate.lte(to)))
        .add_option(query.from.map(|from| {
            Condition::any()
                .add(entity::Column::EndDate.gte(from))
                .add(entity::Column::EndDate.is_null())
        }))
        .add_option(query.user_id.map(|id| entity::Column::UserId.eq(id)))
        .add_option(
            query
                .service_name
                .map(|name| entity::Column::ServiceName.eq(name)),
        );

    entity::Entity::find()
        .select_only()
        .column_as(Expr::cust("COALESCE(SUM(price), 0)"), "total")
        .filter(condition)
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    async fn create(&self, subscription: Subscription) -> SubscriptionResult<()> {
        let active_model: entity::ActiveModel = subscription.into();
        let model = active_model.insert(&self.db).await?;

        tracing::debug!(subscription_id = %model.id, "Created subscription");
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> SubscriptionResult<Option<Subscription>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn update(&self, id: Uuid, subscription: Subscription) -> SubscriptionResult<()> {
        let result = entity::Entity::update_many()
            .col_expr(
                entity::Column::ServiceName,
                Expr::value(subscription.service_name),
            )
            .col_expr(entity::Column::Price, Expr::value(subscription.price))
            .col_expr(
                entity::Column::StartDate,
                Expr::value(subscription.start_date),
            )
            .col_expr(entity::Column::EndDate, Expr::value(subscription.end_date))
            .filter(entity::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        tracing::debug!(subscription_id = %id, rows = result.rows_affected, "Updated subscription");
        Ok(())
    }

    async fn exists(&self, id: Uuid) -> SubscriptionResult<bool> {
        let count = entity::Entity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn delete(&self, id: Uuid) -> SubscriptionResult<()> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        tracing::debug!(subscription_id = %id, rows = result.rows_affected, "Deleted subscription");
        Ok(())
    }

    async fn list(&self, filter: SubscriptionFilter) -> SubscriptionResult<Vec<Subscription>> {
        let models = list_select(filter).all(&self.db).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn summary(&self, query: SummaryQuery) -> SubscriptionResult<i64> {
        let total = summary_select(query)
            .into_tuple::<i64>()
            .one(&self.db)
            .await?;

        Ok(total.unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubscriptionError;
    use sea_orm::{DatabaseBackend, DbBackend, MockDatabase, QueryTrait};

    fn model(user_id: Uuid) -> entity::Model {
        entity::Model {
            id: Uuid::new_v4(),
            service_name: "Yandex Plus".to_string(),
            price: 400,
            user_id,
            start_date: "07-2025".to_string(),
            end_date: None,
        }
    }

    #[test]
    fn test_summary_sql_without_filters() {
        let sql = summary_select(SummaryQuery::default())
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains("COALESCE(SUM(price), 0)"), "{sql}");
        assert!(sql.contains(r#"AS "total""#), "{sql}");
        assert!(sql.ends_with("WHERE TRUE"), "{sql}");
        for column in ["start_date", "end_date", "user_id", "service_name"] {
            assert!(!sql.contains(column), "unexpected {column} predicate: {sql}");
        }
    }

    #[test]
    fn test_summary_sql_with_window() {
        let user_id = Uuid::new_v4();
        let sql = summary_select(SummaryQuery {
            from: Some("02-2025".into()),
            to: Some("01-2026".into()),
            user_id: Some(user_id),
            service_name: Some("Netflix".into()),
        })
        .build(DbBackend::Postgres)
        .to_string();

        assert!(sql.contains(r#""start_date" <= '01-2026'"#), "{sql}");
        assert!(sql.contains(r#""end_date" >= '02-2025'"#), "{sql}");
        assert!(sql.contains(r#""end_date" IS NULL"#), "{sql}");
        assert!(sql.contains(&user_id.to_string()), "{sql}");
        assert!(sql.contains("'Netflix'"), "{sql}");
    }

    #[test]
    fn test_list_sql_only_applies_present_filters() {
        let sql = list_select(SubscriptionFilter {
            user_id: None,
            service_name: Some("Spotify".into()),
        })
        .build(DbBackend::Postgres)
        .to_string();

        assert!(sql.contains(r#""service_name" = 'Spotify'"#), "{sql}");
        assert!(!sql.contains("user_id\" ="), "{sql}");
    }

    #[tokio::test]
    async fn test_get_by_id_maps_model() {
        let row = model(Uuid::new_v4());
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row.clone()]])
            .into_connection();
        let repo = PgSubscriptionRepository::new(db);

        let found = repo.get_by_id(row.id).await.unwrap().unwrap();
        assert_eq!(found, Subscription::from(row));
    }

    #[tokio::test]
    async fn test_list_maps_models() {
        let user_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(user_id), model(user_id)]])
            .into_connection();
        let repo = PgSubscriptionRepository::new(db);

        let found = repo
            .list(SubscriptionFilter {
                user_id: Some(user_id),
                service_name: None,
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|s| s.user_id == user_id));
    }

    #[tokio::test]
    async fn test_storage_errors_surface_as_database_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = PgSubscriptionRepository::new(db);

        let err = repo.get_by_id(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, SubscriptionError::Database(_)));
    }
}
