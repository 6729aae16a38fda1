//! Examples command

use colored::*;

const EXAMPLES: &[(&str, &str)] = &[
    ("Send a simple prompt:", r#"podcall send "Hello GPU!""#),
    (
        "Send a prompt with longer wait time:",
        r#"podcall send "Complex task" --wait 120"#,
    ),
    (
        "Get full JSON response:",
        r#"podcall send "My prompt" --json-output"#,
    ),
    ("Check configuration status:", "podcall status"),
    ("Show this help:", "podcall --help"),
];

/// Print example invocations
pub fn print_examples() {
    println!("{}", "Podcall - Example Commands".cyan().bold());
    println!("{}", "=".repeat(60));
    for (i, (label, command)) in EXAMPLES.iter().enumerate() {
        println!("\n{}. {}", i + 1, label);
        println!("   {}", command.yellow());
    }
    println!(
        "\n{}",
        "Credentials come from --api-key/--endpoint-id or PODCALL_API_KEY/PODCALL_ENDPOINT_ID."
            .dimmed()
    );
    println!("{}", "=".repeat(60));
}
