use widget_core::{DisplayField, LaunchAction, SurfaceError, WidgetSurface};

/// Widget surface that renders into a framed text box for the terminal.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    city: String,
    temperature: String,
    description: String,
    details: String,
    last_update: String,
    tap_hint: Option<String>,
}

impl TerminalSurface {
    /// The completed frame, ready to print.
    pub fn into_frame(self) -> String {
        let mut lines = vec![
            format!("{}  {}", self.city, self.temperature),
            self.description,
            self.details,
            self.last_update,
        ];
        // Empty slots (the error state leaves details and last-update blank)
        // collapse instead of rendering blank rows.
        lines.retain(|line| !line.trim().is_empty());

        let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);

        let mut out = String::new();
        out.push_str(&format!("+{}+\n", "-".repeat(width + 2)));
        for line in &lines {
            out.push_str(&format!("| {line:width$} |\n"));
        }
        out.push_str(&format!("+{}+\n", "-".repeat(width + 2)));

        if let Some(hint) = self.tap_hint {
            out.push_str(&hint);
            out.push('\n');
        }

        out
    }
}

impl WidgetSurface for TerminalSurface {
    fn set_text(&mut self, field: DisplayField, text: &str) -> Result<(), SurfaceError> {
        let slot = match field {
            DisplayField::City => &mut self.city,
            DisplayField::Temperature => &mut self.temperature,
            DisplayField::Description => &mut self.description,
            DisplayField::Details => &mut self.details,
            DisplayField::LastUpdate => &mut self.last_update,
        };
        *slot = text.to_string();

        Ok(())
    }

    fn set_tap_action(&mut self, action: &LaunchAction) -> Result<(), SurfaceError> {
        self.tap_hint = Some(format!("Tap opens {} (from {})", action.target, action.source));
        Ok(())
    }
}
