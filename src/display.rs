use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;

use crate::matching::{Flotilla, Rule};
use crate::model::{Boat, Crew};

fn display_name(key: &str, name: &str) -> String {
    if name.is_empty() || name == key {
        key.to_string()
    } else {
        format!("{} ({})", name, key)
    }
}

/// Formats a crew member with a skill marker, e.g. "Ana (ana) [high]"
pub fn format_crew(crew: &Crew) -> String {
    format!("{} [{}]", display_name(&crew.key, &crew.name), crew.skill.label())
}

pub fn format_boat(boat: &Boat) -> String {
    let mut label = display_name(&boat.key, &boat.name);
    if boat.assistance {
        label.push_str(" *assist*");
    }
    label
}

/// Renders a flotilla as plain text, one boat per block
pub fn render_flotilla(flotilla: &Flotilla) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "** {} **", flotilla.event_id);

    for crewed in &flotilla.crewed_boats {
        let _ = writeln!(out, "{} ({} aboard)", format_boat(&crewed.boat), crewed.crews.len());
        for crew in &crewed.crews {
            let _ = writeln!(out, "  - {}", format_crew(crew));
        }
    }

    if !flotilla.waitlist_boats.is_empty() {
        let _ = writeln!(out, "Wait-listed boats:");
        for boat in &flotilla.waitlist_boats {
            let _ = writeln!(out, "  - {}", format_boat(boat));
        }
    }

    if !flotilla.waitlist_crews.is_empty() {
        let _ = writeln!(out, "Wait-listed crews:");
        for crew in &flotilla.waitlist_crews {
            let _ = writeln!(out, "  - {}", format_crew(crew));
        }
    }

    out
}

/// Prints the flotilla along with what's left of each placement rule
pub fn print_flotilla(flotilla: &Flotilla) {
    println!("\n=== Flotilla for {} ===", flotilla.event_id);
    print!("{}", render_flotilla(flotilla));

    println!("\nRemaining rule violations:");
    for rule in Rule::PRIORITY {
        println!("  {:<10} {}", rule.to_string(), flotilla.total_loss(rule));
    }
}

/// Writes the text rendering to a file
pub fn write_flotilla_to_file(flotilla: &Flotilla, filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(filename)?;
    file.write_all(render_flotilla(flotilla).as_bytes())?;
    Ok(())
}
