use anyhow::Result;
use magic_link_api::prelude::*;

/// Hands links to the desktop's default browser.
pub struct SystemBrowser;

impl BrowserOpener for SystemBrowser {
    fn open_external(&self, url: &str) -> Result<()> {
        open::that(url)?;
        Ok(())
    }
}
