//! freedesktop.org desktop entry generation

use crate::layout::{APP_DISPLAY_NAME, APP_NAME};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Application menu descriptor written to `~/.local/share/applications`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopEntry {
    pub name: String,
    pub comment: String,
    pub exec: PathBuf,
    pub icon: String,
    pub terminal: bool,
    pub categories: Vec<String>,
    pub startup_wm_class: String,
}

impl DesktopEntry {
    /// Entry for the launcher installed at `exec`
    pub fn for_executable(exec: &Path) -> Self {
        Self {
            name: APP_DISPLAY_NAME.to_string(),
            comment: "Modern Minecraft Modpack Launcher".to_string(),
            exec: exec.to_path_buf(),
            icon: APP_NAME.to_string(),
            terminal: false,
            categories: vec!["Game".to_string(), "Utility".to_string()],
            startup_wm_class: APP_DISPLAY_NAME.to_string(),
        }
    }

    /// Render the `[Desktop Entry]` group
    pub fn render(&self) -> String {
        let mut out = String::from("[Desktop Entry]\n");
        // Writing into a String cannot fail
        let _ = writeln!(out, "Version=1.0");
        let _ = writeln!(out, "Type=Application");
        let _ = writeln!(out, "Name={}", self.name);
        let _ = writeln!(out, "Comment={}", self.comment);
        let _ = writeln!(out, "Exec={}", exec_value(&self.exec));
        let _ = writeln!(out, "Icon={}", self.icon);
        let _ = writeln!(out, "Terminal={}", self.terminal);
        let mut categories = String::new();
        for category in &self.categories {
            categories.push_str(category);
            categories.push(';');
        }
        let _ = writeln!(out, "Categories={categories}");
        let _ = writeln!(out, "StartupWMClass={}", self.startup_wm_class);
        out
    }
}

/// Characters that force an `Exec` argument to be quoted
const RESERVED: &[char] = &[
    ' ', '\t', '\n', '"', '\'', '\\', '>', '<', '~', '|', '&', ';', '$', '*', '?', '#', '(',
    ')', '`',
];

/// Encode `path` as the single program argument of an `Exec` key.
///
/// `%` is doubled so it is not read as a field code. Paths with reserved
/// characters are double-quoted with `"`, `` ` ``, `$` and `\` backslash
/// escaped; the value is then string-escaped, so a backslash ends up as `\\\\`.
fn exec_value(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('%', "%%");
    if !raw.contains(RESERVED) {
        return raw;
    }

    let mut quoted = String::with_capacity(raw.len() + 2);
    quoted.push('"');
    for c in raw.chars() {
        if matches!(c, '"' | '`' | '$' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted.replace('\\', "\\\\")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_all_keys_in_order() {
        let entry = DesktopEntry::for_executable(Path::new("/opt/theboys-launcher/theboys-launcher"));
        let rendered = entry.render();
        let keys: Vec<&str> = rendered
            .lines()
            .skip(1)
            .filter_map(|l| l.split_once('=').map(|(k, _)| k))
            .collect();
        assert_eq!(
            keys,
            [
                "Version",
                "Type",
                "Name",
                "Comment",
                "Exec",
                "Icon",
                "Terminal",
                "Categories",
                "StartupWMClass"
            ]
        );
        assert!(rendered.starts_with("[Desktop Entry]\n"));
    }

    #[test]
    fn exec_and_categories_are_formatted() {
        let entry = DesktopEntry::for_executable(Path::new("/home/u/customdir/theboys-launcher"));
        let rendered = entry.render();
        assert!(rendered.contains("Exec=/home/u/customdir/theboys-launcher\n"));
        assert!(rendered.contains("Categories=Game;Utility;\n"));
        assert!(rendered.contains("Terminal=false\n"));
    }

    #[test]
    fn exec_quotes_paths_with_spaces() {
        let entry = DesktopEntry::for_executable(Path::new("/home/u/My Apps/theboys-launcher"));
        assert!(
            entry
                .render()
                .contains("Exec=\"/home/u/My Apps/theboys-launcher\"\n")
        );
    }

    #[test]
    fn exec_escapes_field_codes_and_shell_characters() {
        assert_eq!(exec_value(Path::new("/opt/100%/app")), "/opt/100%%/app");
        assert_eq!(
            exec_value(Path::new("/opt/$HOME dir/app")),
            "\"/opt/\\\\$HOME dir/app\""
        );
        assert_eq!(
            exec_value(Path::new("/opt/a\"b/app")),
            "\"/opt/a\\\\\"b/app\""
        );
        assert_eq!(
            exec_value(Path::new("/opt/back\\slash/app")),
            "\"/opt/back\\\\\\\\slash/app\""
        );
    }
}
