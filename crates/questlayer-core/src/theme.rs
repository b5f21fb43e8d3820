//! Widget themes and placement.
//!
//! Each theme maps to an immutable bundle of utility-class strings consumed
//! by the widget runtime. The engine treats themes as opaque.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Sleek,
    Cyber,
    Minimal,
    Gaming,
    Brutal,
    Glass,
}

/// Style descriptor for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeStyle {
    pub card: &'static str,
    pub trigger: &'static str,
    pub header: &'static str,
    pub button: &'static str,
    pub item_card: &'static str,
    pub icon_box: &'static str,
    pub font: &'static str,
}

impl Theme {
    pub const ALL: [Theme; 6] = [
        Theme::Sleek,
        Theme::Cyber,
        Theme::Minimal,
        Theme::Gaming,
        Theme::Brutal,
        Theme::Glass,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Sleek => "sleek",
            Theme::Cyber => "cyber",
            Theme::Minimal => "minimal",
            Theme::Gaming => "gaming",
            Theme::Brutal => "brutal",
            Theme::Glass => "glass",
        }
    }

    /// Light themes render dark text on a white card.
    pub fn is_light(&self) -> bool {
        matches!(self, Theme::Minimal | Theme::Brutal)
    }

    /// Transparent themes ignore the accent color for the trigger background.
    pub fn is_transparent(&self) -> bool {
        matches!(self, Theme::Glass)
    }

    pub fn style(&self) -> ThemeStyle {
        match self {
            Theme::Sleek => ThemeStyle {
                card: "bg-slate-900/80 backdrop-blur-xl rounded-t-[40px] md:rounded-3xl border-white/10",
                trigger: "rounded-2xl",
                header: "bg-white/5 border-b border-white/5",
                button: "rounded-2xl",
                item_card: "bg-white/5 border-white/5 rounded-3xl",
                icon_box: "rounded-xl",
                font: "font-[\"Plus_Jakarta_Sans\"]",
            },
            Theme::Cyber => ThemeStyle {
                card: "bg-black rounded-none border-2 shadow-[0_0_20px_rgba(255,255,255,0.1)]",
                trigger: "rounded-none skew-x-[-12deg]",
                header: "bg-slate-900 border-b-2 border-dashed",
                button: "rounded-none skew-x-[-6deg]",
                item_card: "bg-slate-900 border border-slate-700",
                icon_box: "rounded-none",
                font: "font-[\"Space_Mono\"]",
            },
            Theme::Minimal => ThemeStyle {
                card: "bg-white rounded-none border-slate-200",
                trigger: "rounded-full text-white bg-black border-black",
                header: "bg-slate-50 border-b border-slate-200",
                button: "rounded-none border-2 border-black bg-black text-white hover:bg-white hover:text-black transition-colors",
                item_card: "bg-white border-slate-200",
                icon_box: "rounded-none border border-slate-200 shadow-sm",
                font: "font-[\"Inter\"]",
            },
            Theme::Gaming => ThemeStyle {
                card: "bg-indigo-950 rounded-t-3xl md:rounded-3xl border-[#fbbf24]",
                trigger: "rounded-lg border-2 border-[#fbbf24] bg-indigo-900 italic shadow-[4px_4px_0px_#fbbf24]",
                header: "bg-black/40 border-b-2 border-[#fbbf24]",
                button: "rounded-lg border-b-4 border-amber-800 bg-amber-500 text-black active:border-b-0 active:translate-y-1",
                item_card: "bg-indigo-900 rounded-xl border-indigo-400/20",
                icon_box: "rounded-lg",
                font: "font-[\"Plus_Jakarta_Sans\"]",
            },
            Theme::Brutal => ThemeStyle {
                card: "bg-white rounded-none border-4 border-black shadow-[8px_8px_0px_0px_rgba(0,0,0,1)]",
                trigger: "rounded-none border-4 border-black bg-white text-black font-black shadow-[4px_4px_0px_0px_rgba(0,0,0,1)]",
                header: "bg-yellow-400 border-b-4 border-black",
                button: "rounded-none border-2 border-black bg-black text-white font-black hover:bg-white hover:text-black shadow-[4px_4px_0px_0px_rgba(0,0,0,1)] active:shadow-none active:translate-x-1 active:translate-y-1 transition-all",
                item_card: "bg-white border-2 border-black rounded-none",
                icon_box: "rounded-none border-2 border-black",
                font: "font-[\"Inter\"]",
            },
            Theme::Glass => ThemeStyle {
                card: "bg-white/5 backdrop-blur-3xl rounded-[40px] border border-white/20 shadow-[0_0_40px_rgba(0,0,0,0.3)]",
                trigger: "rounded-full bg-white/10 backdrop-blur-xl border border-white/30 text-white shadow-xl",
                header: "bg-white/5 border-b border-white/10 backdrop-blur-md",
                button: "rounded-full bg-white/10 hover:bg-white/20 border border-white/20 text-white backdrop-blur-md transition-all active:scale-95 shadow-lg",
                item_card: "bg-white/5 border border-white/10 rounded-[32px] backdrop-blur-sm",
                icon_box: "rounded-2xl bg-white/10 border border-white/20 shadow-inner",
                font: "font-[\"Plus_Jakarta_Sans\"]",
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownVariant {
                kind: "theme",
                value: s.to_string(),
            })
    }
}

/// Screen corner the widget trigger is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

impl Position {
    pub fn anchor_classes(&self) -> &'static str {
        match self {
            Position::BottomRight => "bottom-6 right-6 md:bottom-8 md:right-8",
            Position::BottomLeft => "bottom-6 left-6 md:bottom-8 md:left-8",
            Position::TopRight => "top-6 right-6 md:top-8 md:right-8",
            Position::TopLeft => "top-6 left-6 md:top-8 md:left-8",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_names_roundtrip() {
        for theme in Theme::ALL {
            assert_eq!(theme.as_str().parse::<Theme>().unwrap(), theme);
            assert!(!theme.style().card.is_empty());
        }
        assert!("neon".parse::<Theme>().is_err());
    }

    #[test]
    fn light_and_transparent_flags() {
        assert!(Theme::Minimal.is_light());
        assert!(Theme::Brutal.is_light());
        assert!(!Theme::Cyber.is_light());
        assert!(Theme::Glass.is_transparent());
        assert!(!Theme::Sleek.is_transparent());
    }

    #[test]
    fn position_serializes_kebab_case() {
        let json = serde_json::to_string(&Position::TopLeft).unwrap();
        assert_eq!(json, "\"top-left\"");
        assert!(Position::TopLeft.anchor_classes().starts_with("top-6 left-6"));
    }
}
