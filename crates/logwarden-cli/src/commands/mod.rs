//! Command implementations.

pub mod apply;
pub mod cron;
pub mod rewrite;
pub mod validate;

pub use self::apply::execute_apply;
pub use self::cron::execute_cron;
pub use self::rewrite::execute_rewrite;
pub use self::validate::execute_validate;
