use alistore_kernel::settings::Settings;
use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load AliStore settings")?;

    alistore_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        address = %settings.server.bind_address(),
        "alistore-app bootstrap starting"
    );

    alistore_app::run(&settings).await?;

    tracing::info!("alistore-app shut down");
    Ok(())
}
