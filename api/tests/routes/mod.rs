mod auth_test;
mod cart_order_test;
mod careers_test;
mod contact_test;
mod content_test;
mod dashboard_test;
mod enquiry_test;
mod health_test;
mod product_test;
mod sitemap_test;
mod user_test;
