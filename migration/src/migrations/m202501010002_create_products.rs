use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202501010002_create_products"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("products"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("name")).string().not_null())
                    // Unique index backs the retry-on-conflict slug allocation.
                    .col(ColumnDef::new(Alias::new("slug")).string().not_null().unique_key())
                    .col(ColumnDef::new(Alias::new("description")).text().not_null())
                    .col(ColumnDef::new(Alias::new("price")).double().not_null())
                    .col(ColumnDef::new(Alias::new("images")).json().not_null())
                    .col(ColumnDef::new(Alias::new("category")).string().not_null())
                    .col(ColumnDef::new(Alias::new("stock")).integer().not_null().default(0))
                    .col(ColumnDef::new(Alias::new("model")).string().not_null().default(""))
                    .col(ColumnDef::new(Alias::new("company")).string().not_null().default(""))
                    .col(ColumnDef::new(Alias::new("specifications")).json().not_null())
                    .col(ColumnDef::new(Alias::new("features")).json().not_null())
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Alias::new("updated_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("products")).to_owned())
            .await
    }
}
