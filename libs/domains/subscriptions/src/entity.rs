use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::Subscription;

/// Sea-ORM Entity for the subscriptions table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    pub start_date: String,
    pub end_date: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub const TAG: &'static str = "subscriptions";
}

impl From<Model> for Subscription {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            service_name: model.service_name,
            price: model.price,
            user_id: model.user_id,
            start_date: model.start_date,
            end_date: model.end_date,
        }
    }
}

impl From<Subscription> for ActiveModel {
    fn from(sub: Subscription) -> Self {
        ActiveModel {
            id: Set(sub.id),
            service_name: Set(sub.service_name),
            price: Set(sub.price),
            user_id: Set(sub.user_id),
            start_date: Set(sub.start_date),
            end_date: Set(sub.end_date),
        }
    }
}
