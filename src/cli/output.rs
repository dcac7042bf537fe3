//! Output formatting for CLI

use crate::pipeline::TrainingResult;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print the counts and rates of a training or evaluation run
pub fn print_result(result: &TrainingResult) {
    print_kv("Episodes", &result.total_episodes.to_string());
    print_kv(
        "Fed",
        &format!("{} ({:.1}%)", result.fed, result.fed_rate * 100.0),
    );
    print_kv(
        "Caught",
        &format!("{} ({:.1}%)", result.caught, result.caught_rate * 100.0),
    );
    print_kv(
        "Timed out",
        &format!("{} ({:.1}%)", result.timed_out, result.timeout_rate * 100.0),
    );
    print_kv("Mean steps", &format!("{:.2}", result.mean_steps));
    print_kv("Mean return", &format!("{:.3}", result.mean_return));
}
