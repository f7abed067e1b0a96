use std::io::Write;

use csv::WriterBuilder;

use crate::matching::Flotilla;

/// Writes one row per placement: crewed berths first, then the wait-lists
pub fn write_flotilla_csv<W: Write>(flotilla: &Flotilla, out: W) -> Result<(), csv::Error> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(out);

    wtr.write_record(["event", "status", "boat", "crew", "skill"])?;

    for crewed in &flotilla.crewed_boats {
        for crew in &crewed.crews {
            wtr.write_record([
                flotilla.event_id.as_str(),
                "crewed",
                crewed.boat.key.as_str(),
                crew.key.as_str(),
                crew.skill.label(),
            ])?;
        }
    }

    for boat in &flotilla.waitlist_boats {
        wtr.write_record([flotilla.event_id.as_str(), "waitlist", boat.key.as_str(), "", ""])?;
    }

    for crew in &flotilla.waitlist_crews {
        wtr.write_record([
            flotilla.event_id.as_str(),
            "waitlist",
            "",
            crew.key.as_str(),
            crew.skill.label(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Renders the CSV roster into a string
pub fn flotilla_csv(flotilla: &Flotilla) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_flotilla_csv(flotilla, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
