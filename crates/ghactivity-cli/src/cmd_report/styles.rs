pub use console::{Style, StyledObject};

pub struct Styles {
    pub style_title: Style,
    pub style_heading: Style,
    pub style_contributor: Style,
    pub style_login: Style,
    pub style_additions: Style,
    pub style_deletions: Style,
}

impl Styles {
    pub fn new(styles_enabled: bool) -> Self {
        let style_title = Style::new()
            .bold()
            .bright()
            .white()
            .force_styling(styles_enabled);
        let style_heading = Style::new().bold().force_styling(styles_enabled);
        let style_contributor = Style::new()
            .bright()
            .bold()
            .blue()
            .force_styling(styles_enabled);
        let style_login = Style::new().bright().cyan().force_styling(styles_enabled);
        let style_additions = Style::new().green().force_styling(styles_enabled);
        let style_deletions = Style::new().red().force_styling(styles_enabled);

        Self {
            style_title,
            style_heading,
            style_contributor,
            style_login,
            style_additions,
            style_deletions,
        }
    }
}
