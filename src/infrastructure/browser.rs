//! Opening coupon pages in an external browser.
//!
//! A configured `browser` is handed to the `open` crate as the application to
//! launch; otherwise the system default handler is used. Launches are detached
//! and their exit status ignored.

use crate::domain::{GourmetError, Result};

/// Application used to open coupon pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launcher {
    /// The system default URL handler.
    SystemDefault,
    /// A named application or executable path.
    App(String),
}

impl Launcher {
    /// Resolves the configured browser setting.
    ///
    /// The value is an application name or path and is never split, so paths
    /// with spaces survive. One pair of surrounding quotes is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`GourmetError::Config`] for a blank browser setting.
    ///
    /// # Examples
    ///
    /// ```
    /// use gourmet::infrastructure::browser::Launcher;
    ///
    /// let launcher = Launcher::from_config(Some("/opt/Google Chrome/chrome")).unwrap();
    /// assert_eq!(launcher, Launcher::App("/opt/Google Chrome/chrome".to_string()));
    /// ```
    pub fn from_config(browser: Option<&str>) -> Result<Self> {
        let Some(browser) = browser else {
            return Ok(Self::SystemDefault);
        };

        let trimmed = browser.trim();
        let app = trimmed
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(trimmed)
            .trim();

        if app.is_empty() {
            return Err(GourmetError::Config("browser setting is empty".to_string()));
        }
        Ok(Self::App(app.to_string()))
    }

    /// Opens `url` without waiting for the browser to exit.
    pub fn launch(&self, url: &str) -> Result<()> {
        match self {
            Self::SystemDefault => {
                tracing::debug!("opening coupon page with system handler");
                open::that_detached(url)?;
            }
            Self::App(app) => {
                tracing::debug!(app = %app, "opening coupon page");
                open::with_detached(url, app)?;
            }
        }
        Ok(())
    }
}

/// Opens `url` with the configured browser, or the system handler.
///
/// # Errors
///
/// Returns an error if the setting is blank or the launch fails.
pub fn open_url(browser: Option<&str>, url: &str) -> Result<()> {
    Launcher::from_config(browser)?.launch(url)
}
