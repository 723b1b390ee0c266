use std::io;

/// Opens the authorization URL for the user
pub trait BrowserOpener {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// The platform's default browser
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl BrowserOpener for SystemBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        open::that(url)
    }
}
