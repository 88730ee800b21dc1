use anyhow::Result;
use async_trait::async_trait;
use colored::*;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, BufRead, Write};

use crate::config::Settings;
use crate::confluence::{ConfluenceClient, PageHandle};

#[async_trait]
pub trait ConfluenceApi: Send + Sync {
    /// Resolve the first of `keywords` found on `page_id` to a username.
    async fn person_responsible(&self, page_id: &str, keywords: &[String]) -> Result<Option<String>>;
}

pub trait ConfluenceApiFactory: Send + Sync {
    fn create(&self, settings: &Settings) -> Result<Box<dyn ConfluenceApi>>;
}

pub struct RealConfluenceApi {
    inner: ConfluenceClient,
}

#[async_trait]
impl ConfluenceApi for RealConfluenceApi {
    async fn person_responsible(&self, page_id: &str, keywords: &[String]) -> Result<Option<String>> {
        let page: PageHandle = self.inner.fetch_page(page_id).await?;
        Ok(self.inner.resolve_role(&page, keywords).await?)
    }
}

pub struct RealConfluenceApiFactory;

impl ConfluenceApiFactory for RealConfluenceApiFactory {
    fn create(&self, settings: &Settings) -> Result<Box<dyn ConfluenceApi>> {
        let client = ConfluenceClient::new(settings.confluence())?;
        Ok(Box::new(RealConfluenceApi { inner: client }))
    }
}

pub trait PromptInterface: Send + Sync {
    /// Read one command line. Returns `None` at end of input.
    fn read_command(&self) -> Result<Option<String>>;
    fn clear_screen(&self) -> Result<()>;
    fn show(&self, text: &str);
    fn show_error(&self, text: &str);
}

pub struct RealPrompt;

impl PromptInterface for RealPrompt {
    fn read_command(&self) -> Result<Option<String>> {
        print!("{}", "Enter command: ".cyan());
        io::stdout().flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn clear_screen(&self) -> Result<()> {
        // Without TERM there is nothing reliable to clear; just push old output up.
        if cfg!(unix) && std::env::var_os("TERM").is_none() {
            println!("{}", "\n".repeat(5));
            return Ok(());
        }
        let mut stdout = io::stdout();
        execute!(stdout, Clear(ClearType::All), crossterm::cursor::MoveTo(0, 0))?;
        Ok(())
    }

    fn show(&self, text: &str) {
        println!("{}", text);
    }

    fn show_error(&self, text: &str) {
        println!("{}", text.red());
    }
}
