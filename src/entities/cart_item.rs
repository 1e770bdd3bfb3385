use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Cart item entity: one product quantity within one user's cart.
///
/// `user_id` is set at creation and never changed; it is the only
/// authorization anchor for mutations. `quantity` is the only field
/// updated after creation.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "cart_items")]
#[serde(rename_all = "camelCase")]
#[schema(as = CartItem)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_serializes_camel_case() {
        let item = Model {
            id: 7,
            user_id: 1,
            product_id: 42,
            quantity: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&item).expect("serialize cart item");
        assert_eq!(json["id"], 7);
        assert_eq!(json["userId"], 1);
        assert_eq!(json["productId"], 42);
        assert_eq!(json["quantity"], 3);
        assert!(json.get("user_id").is_none());
    }
}
