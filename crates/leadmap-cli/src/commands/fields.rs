//! Fields command - list the canonical CRM field catalog.

use colored::Colorize;
use leadmap::ObjectType;

pub fn run(object: ObjectType) -> Result<(), Box<dyn std::error::Error>> {
    let schema = object.schema();

    println!(
        "{} fields ({} total, {} required)",
        object.to_string().cyan().bold(),
        schema.fields.len(),
        schema.required.len()
    );
    println!();

    for field in &schema.fields {
        let marker = if schema.is_required(*field) {
            "*".red().bold().to_string()
        } else {
            " ".to_string()
        };
        println!("  {} {:20} {}", marker, field.api_name().white(), field.label().dimmed());
    }

    println!();
    println!("{} required field", "*".red().bold());

    Ok(())
}
