use crate::cli::SchemaArgs;
use crate::config::Config;
use crate::planner::{SectionPlan, PLAN_SCHEMA_NAME};
use crate::provider::OutputSchema;
use schemars::schema_for;

pub fn execute(args: SchemaArgs) -> anyhow::Result<()> {
    let json = if args.plan {
        let schema = OutputSchema::of::<SectionPlan>(PLAN_SCHEMA_NAME, "");
        serde_json::to_string_pretty(&schema.parameters)?
    } else {
        serde_json::to_string_pretty(&schema_for!(Config))?
    };
    println!("{}", json);
    Ok(())
}
