use flotilla_match::display::{print_flotilla, write_flotilla_to_file};
use flotilla_match::export::write_flotilla_csv;
use flotilla_match::parser::load_season;
use flotilla_match::web;

fn usage() {
    println!("Usage:");
    println!("  flotilla-match <season.json> [event id]   plan one event (default: first on the calendar)");
    println!("  flotilla-match web [port] [season.json]   serve the JSON API");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        usage();
        return Ok(());
    }

    // Check if we should run in web mode
    if args[1] == "web" {
        let port = args
            .get(2)
            .and_then(|p| p.parse::<u16>().ok())
            .or_else(|| std::env::var("FLOTILLA_PORT").ok().and_then(|p| p.parse().ok()))
            .unwrap_or(8080);
        let season = match args.get(3) {
            Some(path) => Some(load_season(path)?),
            None => None,
        };

        println!("Starting web server on port {}...", port);
        println!("POST a season to http://localhost:{}/api/season", port);

        web::start_server(port, season).await?;
        return Ok(());
    }

    // CLI mode
    let season_path = &args[1];
    println!("Loading season from {}...", season_path);
    let season = load_season(season_path)?;
    println!(
        "Loaded {} events, {} boats, {} crews",
        season.events.len(),
        season.boats.len(),
        season.crews.len()
    );

    let event_id = match args.get(2) {
        Some(id) => id.clone(),
        None => season.first_event()?,
    };

    let flotilla = season.plan(&event_id)?;
    print_flotilla(&flotilla);

    println!("\n=== Writing Flotilla to Files ===");
    write_flotilla_to_file(&flotilla, "flotilla.txt")?;
    write_flotilla_csv(&flotilla, std::fs::File::create("flotilla.csv")?)?;
    println!("Flotilla saved to:");
    println!("  - flotilla.txt");
    println!("  - flotilla.csv");

    Ok(())
}
