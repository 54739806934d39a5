use clap::{Args, Subcommand};
use serde_json::{json, Value};

use grossup_core::presentation::{Language, PreferenceStore, Theme};

/// Arguments for the preference store
#[derive(Args, Debug)]
pub struct PrefsArgs {
    #[command(subcommand)]
    pub action: Option<PrefsAction>,
}

#[derive(Subcommand, Debug)]
pub enum PrefsAction {
    /// Print the saved preferences
    Show,
    /// Update one or both preferences
    Set {
        /// Display language (ar, en)
        #[arg(long)]
        lang: Option<Language>,
        /// Colour theme (light, dark)
        #[arg(long)]
        theme: Option<Theme>,
    },
    /// Switch to the other language
    ToggleLang,
    /// Switch to the other theme
    ToggleTheme,
}

pub fn run_prefs(
    args: PrefsArgs,
    store: &impl PreferenceStore,
) -> Result<Value, Box<dyn std::error::Error>> {
    let prefs = match args.action.unwrap_or(PrefsAction::Show) {
        PrefsAction::Show => store.load()?,
        PrefsAction::Set { lang, theme } => {
            if lang.is_none() && theme.is_none() {
                return Err("prefs set needs --lang and/or --theme".into());
            }
            store.update(|p| {
                if let Some(lang) = lang {
                    p.language = lang;
                }
                if let Some(theme) = theme {
                    p.theme = theme;
                }
            })?
        }
        PrefsAction::ToggleLang => store.update(|p| p.language = p.language.toggled())?,
        PrefsAction::ToggleTheme => store.update(|p| p.theme = p.theme.toggled())?,
    };

    Ok(json!({
        "result": {
            "language": prefs.language,
            "theme": prefs.theme,
            "rtl": prefs.language.is_rtl(),
        }
    }))
}
