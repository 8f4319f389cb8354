//! HTTP Cookies

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use http::HeaderValue;
use url::Url;

use crate::error::{self, Result};

/// Cookies for a single transaction
#[derive(Debug, Default)]
pub struct Jar(cookie_store::CookieStore);

impl Jar {
    /// Load cookies from a cookie file.
    ///
    /// A missing or unreadable file yields an empty jar: a cookie file that
    /// does not exist yet is normal on the first request.
    pub fn load(path: &Path) -> Jar {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                log::debug!("cookie file {} not loaded: {e}", path.display());
                return Jar::default();
            }
        };

        match cookie_store::serde::json::load(BufReader::new(file)) {
            Ok(store) => Jar(store),
            Err(e) => {
                log::warn!("cookie file {} is not a cookie store: {e}", path.display());
                Jar::default()
            }
        }
    }

    /// `Cookie` header value for `url`, if any cookie matches
    #[must_use]
    pub fn header_for(&self, url: &Url) -> Option<HeaderValue> {
        let value = self
            .0
            .get_request_values(url)
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");

        if value.is_empty() {
            return None;
        }

        HeaderValue::from_str(&value).ok()
    }

    /// Store the `Set-Cookie` values received from `url`
    pub fn store_response<'a>(&mut self, set_cookie: impl Iterator<Item = &'a HeaderValue>, url: &Url) {
        let cookies: Vec<_> = set_cookie
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| cookie::Cookie::parse(value.to_string()).ok())
            .collect();

        self.0.store_response_cookies(cookies.into_iter(), url);
    }

    /// Add a single `Set-Cookie` style string as if `url` had sent it
    pub fn add_cookie_str(&mut self, cookie: &str, url: &Url) {
        let cookies = cookie::Cookie::parse(cookie.to_string()).ok().into_iter();
        self.0.store_response_cookies(cookies, url);
    }

    /// Write every cookie, session cookies included, to the jar file (truncating it)
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| error::io(e, path))?;
        let mut writer = BufWriter::new(file);

        cookie_store::serde::json::save_incl_expired_and_nonpersistent(&self.0, &mut writer)
            .map_err(|e| error::io(e, path))?;

        writer.flush().map_err(|e| error::io(e, path))
    }
}
