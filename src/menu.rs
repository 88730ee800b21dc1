//! Menu navigation as a pure state machine.
//!
//! [`handle_input`] maps the current page and one line of user input to the
//! next page and an [`Action`] the caller must carry out. Rendering is a pure
//! function of the page as well, so the whole navigation can be tested
//! without a terminal.

use crate::folders::AppFolder;

/// Lines shown at the top of every page.
pub const APP_HEADER: &str = "Write 'exit' to exit application.\nWrite 'home' to return to Home Page.";

/// Option numbers on the test automation page.
pub const CONFLUENCE_CHECK: &str = "1";
pub const CONFIG_VALIDATION: &str = "2";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    InputApp,
    ChooseApp { matches: Vec<AppFolder> },
    TestAutomation { app: AppFolder },
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Clear the screen and render the new page.
    Render,
    /// Print a message below the current page.
    Show(String),
    /// Scan the apps folder for names containing the query.
    ScanFolders(String),
    ConfluenceCheck(AppFolder),
    ValidateConfig(AppFolder),
    Exit,
}

/// Compute the next page and action for one line of input.
pub fn handle_input(page: Page, input: &str) -> (Page, Action) {
    let command = input.trim();
    let lowered = command.to_lowercase();

    if lowered == "exit" {
        return (page, Action::Exit);
    }
    if lowered == "home" || lowered == "restart" {
        return (Page::Home, Action::Render);
    }
    if command.is_empty() || !command.chars().all(|c| c.is_ascii_digit()) {
        return (
            page,
            Action::Show("Sorry, this function is not supported yet.".to_string()),
        );
    }

    match page {
        Page::Home => {
            if command == "1" {
                (Page::InputApp, Action::Render)
            } else {
                (Page::Home, Action::Show(format!("Unknown command: {command}")))
            }
        }
        Page::InputApp => (Page::InputApp, Action::ScanFolders(command.to_string())),
        Page::ChooseApp { matches } => {
            let chosen = command
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|idx| matches.get(idx))
                .cloned();
            match chosen {
                Some(app) => (Page::TestAutomation { app }, Action::Render),
                None => (
                    Page::ChooseApp { matches },
                    Action::Show(format!("Invalid selection: {command}")),
                ),
            }
        }
        Page::TestAutomation { app } => {
            let action = match command {
                CONFLUENCE_CHECK => Action::ConfluenceCheck(app.clone()),
                CONFIG_VALIDATION => Action::ValidateConfig(app.clone()),
                _ => Action::Show(format!("Unknown command: {command}")),
            };
            (Page::TestAutomation { app }, action)
        }
    }
}

/// Apply the result of a folder scan requested by [`Action::ScanFolders`].
pub fn apply_scan(page: Page, query: &str, matches: Vec<AppFolder>) -> (Page, Action) {
    if matches.is_empty() {
        (
            page,
            Action::Show(format!("No folders found with app number ({query})")),
        )
    } else {
        (Page::ChooseApp { matches }, Action::Render)
    }
}

/// Render the full text of a page.
pub fn render(page: &Page) -> String {
    let mut out = String::from(APP_HEADER);
    out.push('\n');

    match page {
        Page::Home => {
            out.push_str("\nHello, this is your app.\n\n");
            out.push_str("1 - Automated Test\n");
        }
        Page::InputApp => {
            out.push_str("\nWhich app would you like to test? Input the app number (id)\n");
        }
        Page::ChooseApp { matches } => {
            out.push_str("\nChoose the app from the list:\n\n");
            for (idx, app) in matches.iter().enumerate() {
                out.push_str(&format!("{}: {}\n", idx + 1, app.path.display()));
            }
        }
        Page::TestAutomation { app } => {
            out.push_str(&format!(
                "App-ID: {}\n",
                app.app_id.as_deref().unwrap_or("unknown")
            ));
            out.push_str(&format!("App Folder: {}\n", app.path.display()));
            out.push_str("\nAvailable options:\n");
            out.push_str(&format!("{CONFLUENCE_CHECK} - Check Confluence Page\n"));
            out.push_str(&format!("{CONFIG_VALIDATION} - Validate Config File\n"));
        }
    }

    out
}
