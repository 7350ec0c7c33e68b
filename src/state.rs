use crate::config::AppConfig;
use crate::controller::FormController;
use crate::fetcher::ActivityFetcher;

#[derive(Clone)]
pub struct AppState {
    pub controller: FormController,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let fetcher = ActivityFetcher::new(config)?;
        Ok(Self {
            controller: FormController::new(fetcher),
        })
    }
}
