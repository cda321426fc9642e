//! Native chooser dialogs via zenity.
//!
//! Dismissal is not an error: zenity exits with code 1 when the user closes
//! a dialog without choosing, and that maps to `Dismissed` so callers can
//! treat it as a non-event.

use std::path::PathBuf;

use tokio::process::Command;

use crate::error::{PortalError, PortalResult};

/// What the user did with a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogChoice<T> {
    Selected(T),
    Dismissed,
}

const DISMISSED_EXIT_CODE: i32 = 1;

async fn run_zenity(args: &[&str]) -> PortalResult<DialogChoice<String>> {
    let output = Command::new("zenity").args(args).output().await?;
    if output.status.success() {
        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        return Ok(DialogChoice::Selected(text));
    }
    match output.status.code() {
        Some(DISMISSED_EXIT_CODE) => Ok(DialogChoice::Dismissed),
        _ => Err(PortalError::OperationFailed(
            String::from_utf8_lossy(&output.stderr).to_string(),
        )),
    }
}

fn into_path(choice: DialogChoice<String>) -> DialogChoice<PathBuf> {
    match choice {
        DialogChoice::Selected(path) => DialogChoice::Selected(PathBuf::from(path)),
        DialogChoice::Dismissed => DialogChoice::Dismissed,
    }
}

pub async fn pick_file() -> PortalResult<DialogChoice<PathBuf>> {
    Ok(into_path(run_zenity(&["--file-selection"]).await?))
}

pub async fn pick_directory() -> PortalResult<DialogChoice<PathBuf>> {
    Ok(into_path(
        run_zenity(&["--file-selection", "--directory"]).await?,
    ))
}

pub async fn pick_save_target() -> PortalResult<DialogChoice<PathBuf>> {
    Ok(into_path(
        run_zenity(&["--file-selection", "--save"]).await?,
    ))
}

pub async fn pick_color() -> PortalResult<DialogChoice<String>> {
    run_zenity(&["--color-selection"]).await
}

/// Single-select list dialog over pre-built rows.
pub async fn pick_from_list(
    title: &str,
    column: &str,
    rows: &[String],
) -> PortalResult<DialogChoice<String>> {
    let title_arg = format!("--title={title}");
    let column_arg = format!("--column={column}");
    let mut args = vec!["--list", title_arg.as_str(), column_arg.as_str()];
    args.extend(rows.iter().map(String::as_str));
    run_zenity(&args).await
}

/// Convert zenity's `rgb(r,g,b)` color notation to `#rrggbb`. Returns None
/// for notations that are already hex or otherwise unrecognized.
pub fn rgb_to_hex(color: &str) -> Option<String> {
    let inner = color.trim().strip_prefix("rgb(")?.strip_suffix(')')?;
    let mut channels = inner.split(',').map(|part| part.trim().parse::<u8>());
    let red = channels.next()?.ok()?;
    let green = channels.next()?.ok()?;
    let blue = channels.next()?.ok()?;
    if channels.next().is_some() {
        return None;
    }
    Some(format!("#{red:02x}{green:02x}{blue:02x}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_notation_converts_to_hex() {
        assert_eq!(rgb_to_hex("rgb(255,0,128)").unwrap(), "#ff0080");
        assert_eq!(rgb_to_hex("rgb( 16 , 32 , 48 )").unwrap(), "#102030");
    }

    #[test]
    fn unrecognized_notation_is_rejected() {
        assert_eq!(rgb_to_hex("#ff0080"), None);
        assert_eq!(rgb_to_hex("rgb(1,2)"), None);
        assert_eq!(rgb_to_hex("rgb(1,2,3,4)"), None);
        assert_eq!(rgb_to_hex("rgb(300,0,0)"), None);
    }
}
