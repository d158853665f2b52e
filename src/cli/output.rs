//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the ROC Weather CLI.

use crate::utils::toml_config::RocConfig;
use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the ROC Weather banner
    pub fn banner(&self) {
        if self.colored {
            println!(
                r#"
   {}
   {}
   {}
   {}
"#,
                " ____   ___   ____ ".bright_cyan().bold(),
                "|  _ \\ / _ \\ / ___|".cyan().bold(),
                "| |_) | (_) | |___ ".blue().bold(),
                "|_| \\_\\\\___/ \\____|".blue().bold(),
            );
            println!(
                "   {} {}\n",
                "Return-of-Control Weather".bright_white().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
        } else {
            println!(
                r#"
 ____   ___   ____
|  _ \ / _ \ / ___|
| |_) | (_) | |___
|_| \_\\___/ \____|

   Return-of-Control Weather v{}
"#,
                env!("CARGO_PKG_VERSION")
            );
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print a header for a section
    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Print a listening service line
    pub fn listening(&self, service: &str, addr: &str) {
        if self.colored {
            println!(
                "  {} {:<9} {}",
                "▶".green().bold(),
                service.bright_white().bold(),
                format!("http://{}", addr).bright_cyan()
            );
        } else {
            println!("  [LISTEN] {:<9} http://{}", service, addr);
        }
    }

    /// Print the resolved services, weather sources and agent settings
    pub fn config_summary(&self, config: &RocConfig) {
        let host = &config.server.host;

        self.header("Services");
        self.kv("weather", &format!("{}:{}", host, config.weather.port));
        self.kv(
            "bridge",
            &format!("{}:{} -> {}", host, config.bridge.port, config.bridge.weather_url),
        );
        self.kv(
            "frontend",
            &format!("{}:{} -> {}", host, config.frontend.port, config.frontend.bridge_url),
        );

        self.header("Weather sources");
        self.info("mock (built-in)");
        for (id, source) in &config.weather.sources {
            self.kv(&format!("source {}", id), &source.kind);
        }

        self.header("Agent");
        self.kv("region", &config.agent.region);
        self.kv("agent id env", &config.agent.agent_id_env);
        self.kv("alias id env", &config.agent.agent_alias_id_env);
    }

    /// Print a hint/tip message
    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  {} {}", "💡".dimmed(), message.dimmed().italic());
        } else {
            println!("\n  [TIP] {}", message);
        }
    }
}
