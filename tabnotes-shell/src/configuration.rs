#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    /// Path of the JSON file that stores notes and preferences.
    pub storagepath: String,
    pub debug: bool,
}

lazy_static! {
    pub static ref CONFIGURATION: Settings =
        get_configuration().expect("Failed to read configuration.yml.");
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let config = config::Config::builder()
        .set_default("debug", false)?
        .set_default("storagepath", "tabnotes.json")?
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(
            config::Environment::default()
                .prefix("tabnotes")
                .separator("_"),
        )
        .build()?;
    config.try_deserialize()
}
