/// Generates the default `config.toml` contents with explanatory comments.
///
/// This is used by `deskicons init` to create a starter config file that
/// users can immediately edit.
pub fn generate_config() -> String {
    r##"# Deskicons configuration
# Location: ~/.config/deskicons/config.toml

[layout]
# Quick-save file used by `deskicons save` and `deskicons load`.
# Relative paths are resolved against ~/.config/deskicons/.
file = "icon_layout.json"

[listview]
# Size of the text buffer allocated in the shell process, in UTF-16
# units including the terminator. Icon names longer than this are cut.
# Clamped to 2..4096.
text_capacity = 260

[logging]
# Enable file logging to ~/.config/deskicons/logs/deskicons.log.
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation.
max_file_mb = 10
"##
    .to_string()
}
