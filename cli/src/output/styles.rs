//! Terminal stylesheet.

use owo_colors::Style;

/// Styles for every kind of line `orc-deploy` prints. Plain by default.
#[derive(Default, Clone)]
pub struct Styles {
    pub success: Style,
    pub warning: Style,
    /// `######## ...` section banners.
    pub banner: Style,
    /// The `$` prompt in front of a dry-run command line.
    pub prompt: Style,
    /// Config keys in `config show`.
    pub key: Style,
    pub header: Style,
}

impl Styles {
    /// Switch every style to its colored form.
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.warning = Style::new().yellow();
        self.banner = Style::new().bold().magenta();
        self.prompt = Style::new().dimmed();
        self.key = Style::new().dimmed();
        self.header = Style::new().bold().cyan();
    }
}
