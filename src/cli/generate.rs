use crate::cli::{GenerateArgs, GlobalArgs};
use crate::output::write_report;
use crate::pipeline::Topic;
use tracing::info;

pub async fn execute(global: &GlobalArgs, args: GenerateArgs) -> anyhow::Result<()> {
    // Blank input never reaches the provider
    let topic = Topic::parse(&args.topic)?;

    let config = global.load_config()?;
    let pipeline = global.build_pipeline(&config)?;

    let result = pipeline.run(&topic).await;
    pipeline.flush_traces().await;
    let report = result?;

    if let Some(path) = &args.output {
        write_report(path, &report)?;
        info!("Wrote report to {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.text);
    }

    Ok(())
}
