//! Environment variable source: TREEPIX__* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// `TREEPIX__READER__MAX_DEPTH=8` sets `reader.max_depth`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("TREEPIX")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
