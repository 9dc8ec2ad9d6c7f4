use std::sync::Arc;

use tracing::{error, info};

use salonbook_app::startup;
use salonbook_app::{Settings, SettingsSource};
use salonbook_core::{Clock, SystemClock, UuidV7Generator};

fn main() -> anyhow::Result<()> {
    // Non-fatal; variables may come from the environment instead.
    dotenvy::dotenv().ok();

    let (settings, source) = Settings::load_from(Settings::config_path())?;
    salonbook_observability::tracing::init(&settings.logging);

    match &source {
        SettingsSource::File(path) => info!(path = %path.display(), "settings loaded"),
        SettingsSource::Defaults(path) => {
            tracing::warn!(path = %path.display(), "settings file not found; using defaults")
        }
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let services = startup::build(&settings, clock.clone(), Arc::new(UuidV7Generator))
        .inspect_err(|e| error!(error = %e, "startup failed"))?;

    startup::report(&services, clock.now().date_naive())?;
    Ok(())
}
