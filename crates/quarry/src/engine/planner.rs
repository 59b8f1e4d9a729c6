use crate::{CompiledPlan, Result};

use quarry_core::{
    request::QueryRequest,
    stmt::{Statement, VariableSet},
    Schema,
};

pub(crate) fn plan(schema: &Schema, request: &QueryRequest) -> Result<Vec<CompiledPlan>> {
    let stmt = Statement::from_request(request)?;

    let Some(variable_sets) = &stmt.variable_sets else {
        return Ok(vec![compile(schema, &stmt, &VariableSet::new(), 0)?]);
    };

    variable_sets
        .iter()
        .enumerate()
        .map(|(index, variables)| compile(schema, &stmt, variables, index))
        .collect()
}

fn compile(
    schema: &Schema,
    stmt: &Statement,
    variables: &VariableSet,
    index: usize,
) -> Result<CompiledPlan> {
    let plan = quarry_sql::compile(schema, stmt, variables)?;

    tracing::debug!(
        plan = index,
        collection = %stmt.collection,
        sql = %plan.sql,
        args = plan.args.len(),
        "compiled plan"
    );

    Ok(plan)
}
