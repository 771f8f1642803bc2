//! Given steps for tool lifecycle BDD scenarios.

use super::world::{ToolLifecycleWorld, run_async};
use eyre::WrapErr;
use mcp_portal::tool_registry::services::RegisterToolRequest;
use rstest_bdd_macros::given;

#[given(r#"a tool named "{name}" described as "{description}""#)]
fn tool_definition(world: &mut ToolLifecycleWorld, name: String, description: String) {
    world.pending_request = Some(RegisterToolRequest::new(name, description));
}

#[given(r#"a registered tool named "{name}" described as "{description}""#)]
fn registered_tool(
    world: &mut ToolLifecycleWorld,
    name: String,
    description: String,
) -> Result<(), eyre::Report> {
    let tool = run_async(
        world
            .service
            .register(RegisterToolRequest::new(name, description)),
    )
    .wrap_err("register tool for scenario setup")?;
    world.tool_id = Some(tool.id());
    Ok(())
}

#[given("the tool has been tested")]
fn tool_has_been_tested(world: &mut ToolLifecycleWorld) -> Result<(), eyre::Report> {
    let tool_id = world.tool_id()?;
    let run = run_async(world.service.test_tool(tool_id)).wrap_err("schedule test run")?;
    let outcome = run_async(run.outcome());
    if !outcome.is_completed() {
        return Err(eyre::eyre!("expected completed test run, got {outcome:?}"));
    }
    Ok(())
}

#[given("the tool has been published")]
fn tool_has_been_published(world: &mut ToolLifecycleWorld) -> Result<(), eyre::Report> {
    let tool_id = world.tool_id()?;
    run_async(world.service.publish(tool_id)).wrap_err("publish tool in scenario setup")?;
    Ok(())
}
