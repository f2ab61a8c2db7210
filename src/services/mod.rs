pub mod post_service;
pub mod post_service_impl;
pub use post_service::{PostError, PostService};
pub use post_service_impl::SeaOrmPostService;

pub mod user_service;
pub mod user_service_impl;
pub use user_service::{UserError, UserService, UserSummary};
pub use user_service_impl::SeaOrmUserService;
