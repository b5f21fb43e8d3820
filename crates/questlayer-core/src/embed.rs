//! Embeddable snippet export.
//!
//! The snippet carries only the builder configuration. Each embedded widget
//! starts a fresh session, so no progression is exported.

use indoc::formatdoc;
use serde::Serialize;

use crate::error::Result;
use crate::storage::Config;
use crate::task::Task;
use crate::theme::{Position, Theme};

pub const FONTS_URL: &str = "https://fonts.googleapis.com/css2?family=Plus+Jakarta+Sans:wght@400;600;800&family=Space+Mono&family=Inter:wght@400;700;900&display=swap";
pub const TAILWIND_URL: &str = "https://cdn.tailwindcss.com";

/// Payload handed to `QuestLayer.init` by the runtime script.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedConfig<'a> {
    pub project_name: &'a str,
    pub accent_color: &'a str,
    pub position: Position,
    pub active_theme: Theme,
    pub tasks: &'a [Task],
}

impl<'a> From<&'a Config> for EmbedConfig<'a> {
    fn from(config: &'a Config) -> Self {
        Self {
            project_name: &config.project_name,
            accent_color: &config.accent_color,
            position: config.position,
            active_theme: config.theme,
            tasks: &config.tasks,
        }
    }
}

/// Render the `<script>` snippet that boots the widget on a host page.
///
/// `runtime_origin` is where `widget-runtime.js` is served from; a trailing
/// slash is ignored.
pub fn render_snippet(config: &Config, runtime_origin: &str) -> Result<String> {
    // `<` only occurs inside JSON strings; escaping it keeps a title like
    // "</script>" from closing the script element.
    let payload =
        serde_json::to_string_pretty(&EmbedConfig::from(config))?.replace('<', "\\u003c");
    let origin = runtime_origin.trim_end_matches('/');
    Ok(formatdoc!(
        r#"
        <!-- QuestLayer Widget Embed -->
        <script>
        (function() {{
          const config = {};

          // 1. Inject Tailwind and Fonts
          const link = document.createElement('link');
          link.rel = 'stylesheet';
          link.href = '{}';
          document.head.appendChild(link);

          const tw = document.createElement('script');
          tw.src = '{}';
          document.head.appendChild(tw);

          // 2. Load Widget Script
          const s = document.createElement('script');
          s.type = 'module';
          s.src = '{}/widget-runtime.js';
          s.onload = () => window.QuestLayer?.init(config);
          document.body.appendChild(s);
        }})();
        </script>
        "#,
        payload,
        FONTS_URL,
        TAILWIND_URL,
        origin,
    ))
}
