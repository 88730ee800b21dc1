use anyhow::{Context, Result};
use colored::*;
use tracing::{debug, error, info, warn};

use crate::app_deps::{
    ConfluenceApi, ConfluenceApiFactory, PromptInterface, RealConfluenceApiFactory, RealPrompt,
};
use crate::checks;
use crate::config::Settings;
use crate::error::{find_confluence_error, format_error_chain};
use crate::errors::FolderError;
use crate::folders::{self, AppFolder};
use crate::menu::{self, Action, Page};
use crate::paths;

/// Role shown in front of the Confluence check result.
const ROLE_TITLE: &str = "Main Developer";

/// Result of a Confluence check for one app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Found(String),
    NotFound,
    /// The folder name carries no numeric app id.
    MissingAppId,
    /// Confluence could not be reached; holds the formatted error chain.
    Unreachable(String),
    /// Any other failure; holds the formatted error chain.
    Failed(String),
}

impl CheckOutcome {
    pub fn from_result(result: &Result<Option<String>>) -> Self {
        match result {
            Ok(Some(username)) => Self::Found(username.clone()),
            Ok(None) => Self::NotFound,
            Err(e) => {
                let chain = format_error_chain(e);
                if find_confluence_error(e).is_some_and(|ce| ce.is_network()) {
                    Self::Unreachable(chain)
                } else {
                    Self::Failed(chain)
                }
            }
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::MissingAppId | Self::Unreachable(_) | Self::Failed(_)
        )
    }

    /// User-facing line for this outcome.
    pub fn message(&self) -> String {
        match self {
            Self::Found(username) => format!("{ROLE_TITLE}: {username}"),
            Self::NotFound => format!("{ROLE_TITLE}: Not found"),
            Self::MissingAppId => "Error: Could not extract app ID from folder name.".to_string(),
            Self::Unreachable(_) => {
                "Error: Could not connect to Confluence. Check your network connection."
                    .to_string()
            }
            Self::Failed(_) => {
                "Error: Confluence Page cannot be checked. Check logs for details.".to_string()
            }
        }
    }
}

pub struct App;

impl App {
    /// Load `.env`, the optional config file, and the environment into settings.
    pub fn load_settings() -> Result<Settings> {
        if let Some(env_file) = paths::load_env_file() {
            debug!(path = %env_file.display(), "loaded env file");
        }
        let config_file = paths::find_config_file();
        if let Some(path) = &config_file {
            debug!(path = %path.display(), "using config file");
        }
        let settings =
            Settings::load(config_file.as_deref()).context("Failed to load configuration")?;
        info!(apps_folder = %settings.apps_folder.display(), "configuration loaded");
        Ok(settings)
    }

    pub async fn run() -> Result<()> {
        let settings = Self::load_settings()?;
        Self::run_with_deps(&RealConfluenceApiFactory, &RealPrompt, &settings).await
    }

    /// Drive the interactive menu until the user exits or input ends.
    pub async fn run_with_deps(
        factory: &dyn ConfluenceApiFactory,
        prompt: &dyn PromptInterface,
        settings: &Settings,
    ) -> Result<()> {
        let api = factory.create(settings)?;
        let mut page = Page::Home;
        Self::render(prompt, &page)?;

        loop {
            let Some(line) = prompt.read_command()? else {
                prompt.show("See you again! Goodbye.");
                return Ok(());
            };

            let (next, action) = menu::handle_input(page, &line);
            page = next;
            let mut pending = Some(action);

            while let Some(action) = pending.take() {
                debug!(?action, "menu action");
                match action {
                    Action::Exit => {
                        prompt.show("See you again! Goodbye.");
                        return Ok(());
                    }
                    Action::Render => Self::render(prompt, &page)?,
                    Action::Show(message) => prompt.show(&message),
                    Action::ScanFolders(query) => {
                        match folders::scan_apps_folder(&settings.apps_folder, &query) {
                            Ok(matches) => {
                                let (next, follow_up) = menu::apply_scan(page, &query, matches);
                                page = next;
                                pending = Some(follow_up);
                            }
                            Err(e) => {
                                error!(error = %e, "apps folder scan failed");
                                prompt.show_error(&Self::folder_error_message(&e));
                            }
                        }
                    }
                    Action::ConfluenceCheck(app) => {
                        prompt.show("\nFetching Confluence Page Info...\n");
                        if let Some(app_id) = &app.app_id {
                            prompt.show(&format!("Checking Confluence page for app ID: {app_id}"));
                        }
                        let outcome =
                            Self::check_confluence(api.as_ref(), &app, &settings.role_keywords)
                                .await;
                        if outcome.is_error() {
                            prompt.show_error(&outcome.message());
                        } else {
                            prompt.show(&outcome.message());
                        }
                    }
                    Action::ValidateConfig(app) => {
                        prompt.show("\nValidating configuration file...\n");
                        let outcome = checks::validate_app_config(&app);
                        if let checks::ConfigValidation::Failed(reason) = &outcome {
                            warn!(app = %app.name, %reason, "config validation failed");
                        }
                        prompt.show(&outcome.message());
                    }
                }
            }
        }
    }

    /// Look up the responsible person for one app folder.
    pub async fn check_confluence(
        api: &dyn ConfluenceApi,
        app: &AppFolder,
        keywords: &[String],
    ) -> CheckOutcome {
        let Some(page_id) = app.page_id() else {
            warn!(folder = %app.name, "no app id in folder name");
            return CheckOutcome::MissingAppId;
        };

        let result = api.person_responsible(&page_id, keywords).await;
        if let Err(e) = &result {
            error!(%page_id, error = %format_error_chain(e), "Confluence check failed");
        }
        CheckOutcome::from_result(&result)
    }

    /// Non-interactive check of every app folder matching `query`.
    pub async fn check(query: &str, roles: Vec<String>) -> Result<()> {
        let settings = Self::load_settings()?;
        let outcomes =
            Self::check_with_deps(&RealConfluenceApiFactory, &settings, query, roles).await?;

        let mut failures = 0;
        for (app, outcome) in &outcomes {
            let line = format!("{}: {}", app.name.bright_cyan(), outcome.message());
            if outcome.is_error() {
                failures += 1;
                println!("{}", line.red());
            } else {
                println!("{}", line);
            }
        }

        if failures > 0 {
            anyhow::bail!("{} of {} checks failed", failures, outcomes.len());
        }
        Ok(())
    }

    pub async fn check_with_deps(
        factory: &dyn ConfluenceApiFactory,
        settings: &Settings,
        query: &str,
        roles: Vec<String>,
    ) -> Result<Vec<(AppFolder, CheckOutcome)>> {
        let keywords = if roles.is_empty() {
            settings.role_keywords.clone()
        } else {
            crate::validation::validate_role_keywords(&roles)?;
            roles
        };

        let matches = folders::scan_apps_folder(&settings.apps_folder, query)?;
        if matches.is_empty() {
            anyhow::bail!("No folders found with app number ({})", query);
        }

        let api = factory.create(settings)?;
        let mut outcomes = Vec::with_capacity(matches.len());
        for app in matches {
            let outcome = Self::check_confluence(api.as_ref(), &app, &keywords).await;
            outcomes.push((app, outcome));
        }
        Ok(outcomes)
    }

    /// Print the resolved configuration with the API key masked.
    pub fn config() -> Result<()> {
        let settings = Self::load_settings()?;
        match paths::find_config_file() {
            Some(path) => println!("{} {}", "Config file:".cyan(), path.display()),
            None => println!(
                "{} none (create one at {})",
                "Config file:".cyan(),
                paths::get_config_creation_path().display()
            ),
        }
        println!("{}", Self::describe_settings(&settings));
        Ok(())
    }

    pub fn describe_settings(settings: &Settings) -> String {
        [
            format!("Apps folder:     {}", settings.apps_folder.display()),
            format!("Confluence URL:  {}", settings.confluence_url),
            format!("API key:         {}", settings.masked_api_key()),
            format!("Timeout:         {}s", settings.request_timeout.as_secs()),
            format!("Role keywords:   {}", settings.role_keywords.join(", ")),
        ]
        .join("\n")
    }

    fn render(prompt: &dyn PromptInterface, page: &Page) -> Result<()> {
        prompt.clear_screen()?;
        prompt.show(&menu::render(page));
        Ok(())
    }

    fn folder_error_message(err: &FolderError) -> String {
        match err {
            FolderError::NotFound(path) => format!("Error: Apps folder not found: {path}"),
            FolderError::Unreadable { .. } => "Error: Could not read apps folder.".to_string(),
        }
    }
}
