//! Card script layering: defaults -> optional `card.toml` -> `CARD__*`
//! environment overrides -> CLI flags.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use shared::script::CardScript;

use crate::Args;

pub fn load_script(args: &Args) -> Result<CardScript> {
    load_script_with(args, |name| std::env::var(name).ok())
}

/// Environment access is injected so precedence can be tested without
/// touching process globals.
pub fn load_script_with(
    args: &Args,
    env: impl Fn(&str) -> Option<String>,
) -> Result<CardScript> {
    let mut script = match read_overlay_file(args.config.as_deref())? {
        Some(parsed) => parsed,
        None => CardScript::default(),
    };

    if let Some(v) = env("CARD__RECIPIENT") {
        script.recipient = v;
    }
    if let Some(v) = env("CARD__IMAGE_PATH") {
        script.image_path = PathBuf::from(v);
    }

    if let Some(recipient) = &args.recipient {
        script.recipient = recipient.clone();
    }
    if let Some(image) = &args.image {
        script.image_path = image.clone();
    }

    script.validate()?;
    Ok(script)
}

fn read_overlay_file(path: Option<&Path>) -> Result<Option<CardScript>> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (PathBuf::from("card.toml"), false),
    };

    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if !explicit => {
            tracing::debug!("no card.toml overlay: {err}");
            return Ok(None);
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read {}", path.display()));
        }
    };

    let script = CardScript::from_toml_str(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(Some(script))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_apply_when_nothing_overrides_them() {
        let script = load_script_with(&Args::default(), no_env).expect("script");
        assert_eq!(script, CardScript::default());
    }

    #[test]
    fn env_overrides_beat_defaults() {
        let env = |name: &str| match name {
            "CARD__RECIPIENT" => Some("Noor".to_string()),
            "CARD__IMAGE_PATH" => Some("/tmp/us.png".to_string()),
            _ => None,
        };
        let script = load_script_with(&Args::default(), env).expect("script");
        assert_eq!(script.recipient, "Noor");
        assert_eq!(script.image_path, PathBuf::from("/tmp/us.png"));
    }

    #[test]
    fn cli_flags_beat_env_overrides() {
        let env = |name: &str| {
            (name == "CARD__RECIPIENT").then(|| "FromEnv".to_string())
        };
        let args = Args {
            recipient: Some("FromCli".to_string()),
            image: Some(PathBuf::from("cli.jpeg")),
            ..Args::default()
        };
        let script = load_script_with(&args, env).expect("script");
        assert_eq!(script.recipient, "FromCli");
        assert_eq!(script.image_path, PathBuf::from("cli.jpeg"));
    }

    #[test]
    fn invalid_final_script_is_rejected() {
        let args = Args {
            recipient: Some("   ".to_string()),
            ..Args::default()
        };
        assert!(load_script_with(&args, no_env).is_err());
    }

    #[test]
    fn explicit_missing_overlay_file_is_an_error() {
        let args = Args {
            config: Some(PathBuf::from("/definitely/not/here/card.toml")),
            ..Args::default()
        };
        assert!(load_script_with(&args, no_env).is_err());
    }
}
