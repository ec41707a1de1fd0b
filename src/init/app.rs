use std::path::Path;

use super::json;
use crate::{error::Result, App};

impl App {
    pub fn try_from_files<P: AsRef<Path>, Q: AsRef<Path>>(
        sim_file_path: P,
        settings_file_path: Q,
    ) -> Result<Self> {
        let scenario = json::parse_scenario(sim_file_path)?;
        let settings = json::parse_settings(settings_file_path)?;
        Self::try_new(scenario, settings)
    }
}
