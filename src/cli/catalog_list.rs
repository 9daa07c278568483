use std::fmt::Write;

use crate::core::catalog::{BACKGROUNDS, TEMPLATES};

pub fn list_backgrounds() -> String {
    let mut out = String::from("Available backgrounds:\n\n");
    for option in BACKGROUNDS.iter() {
        let kind = if option.is_gradient() {
            "gradient"
        } else {
            "image"
        };
        let _ = writeln!(out, "  {} {:<10} ({kind}) {}", option.id, option.name, option.url);
    }
    out
}

pub fn list_templates() -> String {
    let mut out = String::from("Quick-reply templates:\n\n");
    for template in TEMPLATES.iter() {
        let _ = writeln!(out, "  {} {}: {}", template.id, template.title, template.prompt);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_listing_marks_the_gradient() {
        let listing = list_backgrounds();
        assert_eq!(listing.lines().filter(|l| l.contains("(image)")).count(), 5);
        assert!(listing.contains("Gradient   (gradient) linear-gradient("));
    }

    #[test]
    fn template_listing_shows_prompts() {
        let listing = list_templates();
        assert!(listing.contains("3 Code generation: Write Python code for..."));
    }
}
