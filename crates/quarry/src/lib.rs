mod engine;
pub use engine::{Builder, Engine};

pub use quarry_core::{
    async_trait, driver, request, schema, stmt, Error, Executor, Result, Schema,
};
pub use quarry_sql::CompiledPlan;

use quarry_core::request::QueryRequest;

/// Compiles `request` against `schema` without executing it, one plan per
/// variable set.
pub fn compile(schema: &Schema, request: &QueryRequest) -> Result<Vec<CompiledPlan>> {
    engine::planner::plan(schema, request)
}
