use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

enum Status {
    Success,
    Warning,
    Error,
    Plain,
}

impl Status {
    fn tag(&self) -> &'static str {
        match self {
            Status::Success => "ok",
            Status::Warning => "warning",
            Status::Error => "error",
            Status::Plain => "info",
        }
    }
}

/// Routes command output to the terminal or to line-delimited JSON.
/// Status lines funnel through one dispatcher; structured payloads go out
/// via `json` as-is.
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.status(Status::Success, msg.as_ref());
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.status(Status::Warning, msg.as_ref());
    }

    /// Errors go to stderr and ignore quiet mode.
    pub fn error(&self, msg: impl AsRef<str>) {
        self.status(Status::Error, msg.as_ref());
    }

    pub fn println(&self, msg: impl AsRef<str>) {
        self.status(Status::Plain, msg.as_ref());
    }

    /// Emit a structured payload, pretty-printed when the format asks for it.
    pub fn json(&self, data: &serde_json::Value) {
        let rendered = match self.format {
            OutputFormat::JsonPretty => serde_json::to_string_pretty(data),
            _ => serde_json::to_string(data),
        };
        println!("{}", rendered.unwrap_or_default());
    }

    fn status(&self, status: Status, msg: &str) {
        if self.quiet && !matches!(status, Status::Error) {
            return;
        }

        match self.format {
            OutputFormat::Human => match status {
                Status::Success => println!("{} {}", "✓".green(), msg),
                Status::Warning => println!("{} {}", "⚠".yellow(), msg),
                Status::Error => eprintln!("{} {}", "✗".red(), msg),
                Status::Plain => println!("{}", msg),
            },
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.json(&json!({
                    "status": status.tag(),
                    "message": msg,
                }));
            }
        }
    }
}
