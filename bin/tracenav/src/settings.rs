use termcolor::ColorChoice;

/// How steps get printed
pub struct RenderSettings {
    /// Print the pending branch worklist with every step
    pub show_worklist: bool,

    /// Also print the steps of subroutine sub-traces when dumping
    pub show_nested: bool,

    /// When to color output
    pub color: ColorChoice,

    /// Maximum number of values printed for variables, stack, and worklist entries
    ///
    /// Longer lists are cut off with a count of how many values were left out.
    pub value_limit: Option<usize>,
}

impl RenderSettings {
    pub fn new() -> RenderSettings {
        RenderSettings {
            show_worklist: true,
            show_nested: false,
            color: ColorChoice::Auto,
            value_limit: None,
        }
    }

    /// Parse a `--color` argument
    pub fn parse_color(choice: &str) -> Option<ColorChoice> {
        match choice {
            "auto" => Some(ColorChoice::Auto),
            "always" => Some(ColorChoice::Always),
            "never" => Some(ColorChoice::Never),
            _ => None,
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings::new()
    }
}
