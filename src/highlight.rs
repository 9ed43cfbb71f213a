use inksac::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct Highlighter {
    color_support: ColorSupport,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    pub fn plain() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return text.to_string();
        }
        text.style(style).to_string()
    }

    /// Signal name in cyan, repeat count in yellow.
    pub fn signal(&self, name: &str, count: u32) -> String {
        let name = self.paint(
            name,
            Style::builder().foreground(Color::Cyan).bold().build(),
        );
        if count > 1 {
            let times = self.paint(
                &format!("x{}", count),
                Style::builder().foreground(Color::Yellow).build(),
            );
            format!("{} {}", name, times)
        } else {
            name
        }
    }

    pub fn error(&self, error: &str) -> String {
        self.paint(error, Style::builder().foreground(Color::Red).bold().build())
    }

    pub fn success(&self, message: &str) -> String {
        self.paint(message, Style::builder().foreground(Color::Green).build())
    }

    pub fn hint(&self, hint: &str) -> String {
        self.paint(
            hint,
            Style::builder().foreground(Color::RGB(128, 128, 128)).build(),
        )
    }
}
