//! Social share intents.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

pub const DEFAULT_SHARE_BONUS_XP: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SharePlatform {
    #[serde(rename = "x")]
    X,
    #[serde(rename = "tg")]
    Telegram,
    #[serde(rename = "wa")]
    WhatsApp,
    #[serde(rename = "fb")]
    Facebook,
    #[serde(rename = "li")]
    LinkedIn,
}

impl SharePlatform {
    pub const ALL: [SharePlatform; 5] = [
        SharePlatform::X,
        SharePlatform::Telegram,
        SharePlatform::WhatsApp,
        SharePlatform::Facebook,
        SharePlatform::LinkedIn,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            SharePlatform::X => "x",
            SharePlatform::Telegram => "tg",
            SharePlatform::WhatsApp => "wa",
            SharePlatform::Facebook => "fb",
            SharePlatform::LinkedIn => "li",
        }
    }

    /// Prebuilt share-intent URL for `page_url`, promoting `project_name`.
    ///
    /// Facebook and LinkedIn only accept the page URL; the text is dropped.
    pub fn share_url(&self, project_name: &str, page_url: &str) -> String {
        let text = share_text(project_name);
        let text_enc = urlencoding::encode(&text);
        let url_enc = urlencoding::encode(page_url);
        match self {
            SharePlatform::X => {
                format!("https://twitter.com/intent/tweet?text={text_enc}&url={url_enc}")
            }
            SharePlatform::Telegram => {
                format!("https://t.me/share/url?url={url_enc}&text={text_enc}")
            }
            SharePlatform::WhatsApp => {
                let combined = format!("{text} {page_url}");
                format!(
                    "https://api.whatsapp.com/send?text={}",
                    urlencoding::encode(&combined)
                )
            }
            SharePlatform::Facebook => {
                format!("https://www.facebook.com/sharer/sharer.php?u={url_enc}")
            }
            SharePlatform::LinkedIn => {
                format!("https://www.linkedin.com/sharing/share-offsite/?url={url_enc}")
            }
        }
    }
}

pub fn share_text(project_name: &str) -> String {
    format!("Engage with {project_name} on QuestLayer and earn rewards!")
}

impl fmt::Display for SharePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SharePlatform {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SharePlatform::ALL
            .into_iter()
            .find(|p| p.id() == s)
            .ok_or_else(|| ValidationError::UnknownVariant {
                kind: "share platform",
                value: s.to_string(),
            })
    }
}
