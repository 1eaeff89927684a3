use owo_colors::OwoColorize;
use serialist_core::{PipelineConfig, RunSummary};

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Serialist".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Archive and translate serialized web fiction\n".dimmed());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

/// Print the effective run settings
pub fn print_config(config: &PipelineConfig) {
    eprintln!("  {} {}", "Index:".dimmed(), config.index_url.as_str().bright_white().underline());
    eprintln!("  {} {}", "Output:".dimmed(), config.output_dir.display().bright_white());
    match &config.translation {
        Some(t) => eprintln!(
            "  {} {} → {}",
            "Translate:".dimmed(),
            t.source.bright_white(),
            t.dest.bright_white()
        ),
        None => eprintln!("  {} {}", "Translate:".dimmed(), "off".bright_white()),
    }
    eprintln!();
}

/// Print the end-of-run summary
pub fn print_summary(summary: &RunSummary) {
    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Run Summary".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());
    eprintln!(
        "  {} {}",
        "Discovered:".dimmed(),
        summary.discovered.to_string().bright_white()
    );

    if summary.window.is_empty() {
        print_info("No chapters in the selected window");
        return;
    }

    eprintln!(
        "  {} {}..{}",
        "Window:".dimmed(),
        (summary.window.start + 1).to_string().bright_white(),
        summary.window.end.to_string().bright_white()
    );
    eprintln!(
        "  {} {}\n",
        "Written:".dimmed(),
        summary.written.len().to_string().bright_white()
    );

    for failure in &summary.failures {
        print_warning(&format!(
            "Chapter {} ({}) skipped at {}: {}",
            failure.index + 1,
            failure.chapter.title,
            failure.stage,
            failure.reason
        ));
    }

    if summary.has_failures() {
        print_error(&format!("{} chapter(s) failed", summary.failures.len()));
    } else {
        print_success(&format!("All {} chapter(s) written", summary.written.len()));
    }
}
