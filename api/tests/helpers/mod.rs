pub mod app;
pub mod multipart;

pub use app::{
    TestApp, admin_token, empty_request, json_request, make_test_app, register_user, seed_product,
    user_token,
};
pub use multipart::MultipartBody;
