pub mod m202501010001_create_users;
pub mod m202501010002_create_products;
pub mod m202501010003_create_orders;
pub mod m202501010004_create_order_items;
pub mod m202501010005_create_enquiries;
pub mod m202501010006_create_careers;
pub mod m202501010007_create_applications;
pub mod m202501010008_create_testimonials;
pub mod m202501010009_create_news;
