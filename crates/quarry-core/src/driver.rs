mod response;
pub use response::{Response, Row, RowSet};

use crate::{async_trait, stmt::Value};

use std::fmt::Debug;

/// Runs compiled SQL against a database.
///
/// Implementations own transport, authentication and retries. The compiler
/// only hands over SQL text and its positional arguments.
#[async_trait]
pub trait Executor: Debug + Send + Sync + 'static {
    /// Execute one statement, binding `args` to its `?` placeholders in
    /// order.
    async fn execute(&self, sql: &str, args: &[Value]) -> crate::Result<Response>;
}
