pub mod application;
pub mod career;
pub mod enquiry;
pub mod json;
pub mod news;
pub mod order;
pub mod order_item;
pub mod product;
pub mod testimonial;
pub mod user;

pub use application::Entity as Application;
pub use career::Entity as Career;
pub use enquiry::Entity as Enquiry;
pub use news::Entity as News;
pub use order::Entity as Order;
pub use order_item::Entity as OrderItem;
pub use product::Entity as Product;
pub use testimonial::Entity as Testimonial;
pub use user::Entity as User;
