use crate::{CompiledPlan, Result};

use futures::future::try_join_all;
use quarry_core::{driver::RowSet, Executor};

pub(super) async fn exec(executor: &dyn Executor, plans: &[CompiledPlan]) -> Result<Vec<RowSet>> {
    let pending = plans
        .iter()
        .enumerate()
        .map(|(index, plan)| exec_plan(executor, index, plan));

    try_join_all(pending).await
}

async fn exec_plan(executor: &dyn Executor, index: usize, plan: &CompiledPlan) -> Result<RowSet> {
    tracing::debug!(plan = index, args = plan.args.len(), "executing plan");

    let response = executor.execute(&plan.sql, &plan.args).await?;

    match response.into_row_set() {
        Ok(row_set) => Ok(row_set),
        Err(err) => {
            tracing::warn!(plan = index, error = %err, "executor returned an invalid result");
            Err(err)
        }
    }
}
