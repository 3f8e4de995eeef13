use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202501010004_create_order_items"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("order_items"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("order_id")).integer().not_null())
                    // No foreign key: removing a product must not touch past orders.
                    .col(ColumnDef::new(Alias::new("product_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("price")).double().not_null())
                    .col(ColumnDef::new(Alias::new("quantity")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("size")).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("order_items"), Alias::new("order_id"))
                            .to(Alias::new("orders"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_order_items_order_id")
                    .if_not_exists()
                    .table(Alias::new("order_items"))
                    .col(Alias::new("order_id"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("order_items")).to_owned())
            .await
    }
}
