//! convgen CLI UI primitives.

use console::style;

use convgen::GenerationPlan;

/// Color palette
mod colors {
    use console::Color;

    pub const CYAN: Color = Color::Color256(51);
    pub const VIOLET: Color = Color::Color256(135);
    pub const NEON_GREEN: Color = Color::Color256(82);
}

mod symbols {
    pub const DIAMOND: &str = "\u{25C6}"; // ◆
    pub const DIAMOND_OUTLINE: &str = "\u{25C7}"; // ◇
    pub const TARGET_FILLED: &str = "\u{25C9}"; // ◉
    pub const ARROW: &str = "\u{2500}\u{25B8}"; // ─▸
}

/// Print compact version header
pub fn print_compact_header(version: &str) {
    println!(
        "  {} {} {}",
        style(symbols::DIAMOND).fg(colors::CYAN),
        style("convgen").fg(colors::CYAN).bold(),
        style(version).dim()
    );
}

/// Print every package and its converters
pub fn print_plan(plan: &GenerationPlan) {
    for (package, converters) in &plan.packages {
        println!();
        println!("  {}", style(package).fg(colors::VIOLET).bold());
        for converter in converters {
            let label = if converter.config.name.is_empty() {
                converter.id_string()
            } else {
                converter.config.name.clone()
            };
            println!(
                "    {} {} {} {} {}",
                symbols::DIAMOND_OUTLINE,
                label,
                style(converter.config.output_format).dim(),
                symbols::ARROW,
                converter.config.output_file
            );
        }
    }
    println!();
}

/// Print a success message
pub fn success(msg: &str) {
    println!(
        "  {} {}",
        style(symbols::TARGET_FILLED).fg(colors::NEON_GREEN),
        msg
    );
}
