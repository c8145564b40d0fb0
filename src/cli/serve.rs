use crate::cli::{GlobalArgs, ServeArgs};
use crate::server::{serve, AppState};

pub async fn execute(global: &GlobalArgs, args: ServeArgs) -> anyhow::Result<()> {
    let config = global.load_config()?;
    let addr = match args.bind {
        Some(addr) => addr,
        None => config.bind_addr()?,
    };

    let pipeline = global.build_pipeline(&config)?;
    serve(addr, AppState::new(pipeline)).await?;
    Ok(())
}
