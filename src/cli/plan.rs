use crate::cli::{GlobalArgs, PlanArgs};
use crate::pipeline::Topic;

pub async fn execute(global: &GlobalArgs, args: PlanArgs) -> anyhow::Result<()> {
    let topic = Topic::parse(&args.topic)?;

    let config = global.load_config()?;
    let pipeline = global.build_pipeline(&config)?;

    let plan = pipeline.plan(&topic).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!("\n=== Section Plan: {} ===\n", topic.as_str().trim());
    for (idx, section) in plan.iter().enumerate() {
        println!("  {}. {}", idx + 1, section);
    }
    println!();

    Ok(())
}
