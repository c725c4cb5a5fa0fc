//! Basic usage example for the 3-crate redaction pipeline

use redactum_api::{redact_text, Config, CustomPatternMatcher, PiiCategory, Redactor};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Method 1: Simplest usage with convenience function
    println!("=== Method 1: Convenience Function ===");
    let output = redact_text("Email: john@example.com, Phone: (555) 123-4567, SSN: 123-45-6789")?;

    println!("Redacted: {}", output.redacted_text);
    println!("Found {} tokens:", output.tokens.len());
    for token in &output.tokens {
        println!("  {} covers [{}, {})", token.id, token.start, token.end);
    }
    println!("Processing took {}ms\n", output.metadata.processing_time_ms);

    // Method 2: Custom configuration with a category subset
    println!("=== Method 2: Custom Configuration ===");
    let redactor = Config::builder()
        .categories(&[PiiCategory::Email, PiiCategory::Ssn])
        .chunk_size(1024)
        .max_workers(Some(2))
        .build_redactor()?;

    let output = redactor.redact(
        "Reach ops@example.com or fall back to 555-867-5309 after hours.",
        true,
    )?;
    println!("Email redacted, phone left alone: {}", output.redacted_text);

    // Method 3: Custom matcher plus unmask round trip
    println!("\n=== Method 3: Custom Matcher and Unmask ===");
    let employee_ids = CustomPatternMatcher::new("employee_id", r"\bEMP-\d{6}\b")?;
    let redactor = Config::builder()
        .matcher(Arc::new(employee_ids))
        .build_redactor()?;

    let output = redactor.redact("Badge EMP-204817 belongs to sam@example.com.", true)?;
    println!("Redacted: {}", output.redacted_text);

    let restored = redactor.unmask(&output.redacted_text, None);
    println!("Restored: {restored}");

    // Method 4: Inspecting the token map
    println!("\n=== Method 4: Token Map ===");
    let redactor = Redactor::new()?;
    redactor.redact("Card 4532015112830366 was charged twice.", true)?;

    let map = redactor.get_token_map();
    println!("{}", serde_json::to_string_pretty(&map)?);

    Ok(())
}
