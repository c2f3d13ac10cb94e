//! Terminal presentation of search responses and suggestions

use crate::locales::Messages;
use crate::results::SearchResponse;
use crate::theme::ResolvedTheme;
use std::fmt::Write;

/// ANSI styles for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub title: &'static str,
    pub host: &'static str,
    pub snippet: &'static str,
    pub error: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn for_theme(theme: ResolvedTheme) -> Self {
        match theme {
            ResolvedTheme::Dark => Self {
                title: "\x1b[1;94m",
                host: "\x1b[92m",
                snippet: "\x1b[37m",
                error: "\x1b[91m",
                reset: "\x1b[0m",
            },
            ResolvedTheme::Light => Self {
                title: "\x1b[1;34m",
                host: "\x1b[32m",
                snippet: "\x1b[90m",
                error: "\x1b[31m",
                reset: "\x1b[0m",
            },
        }
    }

    /// No escape sequences at all
    pub fn plain() -> Self {
        Self {
            title: "",
            host: "",
            snippet: "",
            error: "",
            reset: "",
        }
    }
}

/// Formats responses for display
pub struct Renderer {
    palette: Palette,
    messages: Messages,
    max_results: usize,
}

impl Renderer {
    pub fn new(palette: Palette, messages: Messages, max_results: usize) -> Self {
        Self {
            palette,
            messages,
            max_results,
        }
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Result list, the "no results" message, or the error message
    pub fn response(&self, response: &SearchResponse) -> String {
        let p = &self.palette;
        let mut out = String::new();

        if let Some(ref error) = response.error {
            let _ = writeln!(out, "{}{}{}", p.error, self.messages.get("searchError"), p.reset);
            let _ = writeln!(out, "  {}", error);
            return out;
        }

        for answer in &response.answers {
            let _ = writeln!(out, "{}{}{}\n", p.title, answer, p.reset);
        }

        if response.results.is_empty() {
            let _ = writeln!(out, "{}", self.messages.get("noResults"));
            return out;
        }

        for result in response.results.iter().take(self.max_results) {
            let _ = writeln!(out, "{}{}{}", p.host, result.display_host(), p.reset);
            let _ = writeln!(out, "{}{}{}", p.title, result.title, p.reset);
            let _ = writeln!(out, "  {}", result.url);
            if !result.snippet.is_empty() {
                let _ = writeln!(out, "  {}{}{}", p.snippet, result.snippet, p.reset);
            }
            out.push('\n');
        }

        if !response.suggestions.is_empty() {
            let _ = writeln!(out, "{}", response.suggestions.join(" · "));
        }
        out
    }

    /// One suggestion per line
    pub fn suggestions(&self, suggestions: &[String]) -> String {
        suggestions
            .iter()
            .map(|s| format!("  {}\n", s))
            .collect()
    }
}
