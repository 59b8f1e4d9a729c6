mod builder;
pub use builder::Builder;

mod exec;
pub(crate) mod planner;

use crate::{CompiledPlan, Result};

use quarry_core::{driver::RowSet, request::QueryRequest, Executor, Schema};

use std::sync::Arc;

/// Compiles collection queries and runs them on an executor.
///
/// Cloning is cheap; clones share the schema and the executor.
#[derive(Debug, Clone)]
pub struct Engine {
    schema: Arc<Schema>,
    executor: Arc<dyn Executor>,
}

impl Engine {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Compiles `request` into one plan per variable set, in input order.
    /// A request without variable sets yields exactly one plan.
    pub fn compile(&self, request: &QueryRequest) -> Result<Vec<CompiledPlan>> {
        planner::plan(&self.schema, request)
    }

    /// Compiles and runs every plan of `request` concurrently.
    ///
    /// Row sets are returned in plan order. The first failing plan fails
    /// the whole batch.
    pub async fn execute_and_collect(&self, request: &QueryRequest) -> Result<Vec<RowSet>> {
        let plans = self.compile(request)?;
        exec::exec(&*self.executor, &plans).await
    }
}
