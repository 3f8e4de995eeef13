use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202501010001_create_users::Migration),
            Box::new(migrations::m202501010002_create_products::Migration),
            Box::new(migrations::m202501010003_create_orders::Migration),
            Box::new(migrations::m202501010004_create_order_items::Migration),
            Box::new(migrations::m202501010005_create_enquiries::Migration),
            Box::new(migrations::m202501010006_create_careers::Migration),
            Box::new(migrations::m202501010007_create_applications::Migration),
            Box::new(migrations::m202501010008_create_testimonials::Migration),
            Box::new(migrations::m202501010009_create_news::Migration),
        ]
    }
}
