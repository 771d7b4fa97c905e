pub mod category_handlers;
pub mod post_handlers;
pub mod topic_handlers;
pub mod user_handlers;
