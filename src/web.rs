use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use log::info;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::export::flotilla_csv;
use crate::matching::{Flotilla, Rule};
use crate::model::{Season, SeasonError};
use crate::parser::parse_season;

// In-memory season, replaced wholesale on upload
pub struct AppState {
    pub season: Mutex<Option<Season>>,
}

impl AppState {
    pub fn new(season: Option<Season>) -> Self {
        AppState {
            season: Mutex::new(season),
        }
    }
}

#[derive(Serialize)]
pub struct CrewedBoatResponse {
    boat: String,
    assistance: bool,
    crews: Vec<String>,
}

#[derive(Serialize)]
pub struct FlotillaResponse {
    event_id: String,
    boats: Vec<CrewedBoatResponse>,
    waitlist_boats: Vec<String>,
    waitlist_crews: Vec<String>,
    violations: BTreeMap<String, u32>,
}

impl From<&Flotilla> for FlotillaResponse {
    fn from(flotilla: &Flotilla) -> Self {
        FlotillaResponse {
            event_id: flotilla.event_id.clone(),
            boats: flotilla
                .crewed_boats
                .iter()
                .map(|crewed| CrewedBoatResponse {
                    boat: crewed.boat.key.clone(),
                    assistance: crewed.boat.assistance,
                    crews: crewed.crews.iter().map(|c| c.key.clone()).collect(),
                })
                .collect(),
            waitlist_boats: flotilla.waitlist_boats.iter().map(|b| b.key.clone()).collect(),
            waitlist_crews: flotilla.waitlist_crews.iter().map(|c| c.key.clone()).collect(),
            violations: Rule::PRIORITY
                .iter()
                .map(|rule| (rule.to_string(), flotilla.total_loss(*rule)))
                .collect(),
        }
    }
}

fn error_response(err: &SeasonError) -> HttpResponse {
    let body = serde_json::json!({"success": false, "error": err.to_string()});
    match err {
        SeasonError::UnknownEvent(_) => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

/// Plans an event against a snapshot of the current season
fn plan(state: &AppState, event: &str) -> std::result::Result<Flotilla, HttpResponse> {
    // Clone so a run never holds the lock or touches shared entities
    let season = state.season.lock().unwrap().clone();
    let Some(season) = season else {
        return Err(HttpResponse::NotFound().json(serde_json::json!({"error": "No season loaded"})));
    };
    season.plan(event).map_err(|e| error_response(&e))
}

// Season upload endpoint
async fn upload_season(body: web::Bytes, state: web::Data<AppState>) -> Result<HttpResponse> {
    let Ok(text) = std::str::from_utf8(&body) else {
        return Ok(HttpResponse::BadRequest()
            .json(serde_json::json!({"success": false, "error": "Season upload is not valid UTF-8"})));
    };
    match parse_season(text) {
        Ok(season) => {
            let events = season.event_ids();
            info!("season loaded: {} events, {} boats, {} crews", events.len(), season.boats.len(), season.crews.len());
            *state.season.lock().unwrap() = Some(season);
            Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "events": events})))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

// Event list endpoint
async fn get_events(state: web::Data<AppState>) -> Result<HttpResponse> {
    let season = state.season.lock().unwrap();
    if let Some(ref season) = *season {
        Ok(HttpResponse::Ok().json(season.event_ids()))
    } else {
        Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No season loaded"})))
    }
}

// Flotilla endpoint
async fn get_flotilla(event: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse> {
    match plan(&state, event.as_str()) {
        Ok(flotilla) => Ok(HttpResponse::Ok().json(FlotillaResponse::from(&flotilla))),
        Err(response) => Ok(response),
    }
}

// CSV roster endpoint
async fn get_flotilla_csv(event: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let flotilla = match plan(&state, event.as_str()) {
        Ok(flotilla) => flotilla,
        Err(response) => return Ok(response),
    };
    let csv = flotilla_csv(&flotilla)
        .map_err(|e| actix_web::error::ErrorInternalServerError(format!("Failed to write CSV: {}", e)))?;
    Ok(HttpResponse::Ok().content_type("text/csv").body(csv))
}

/// Registers the API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/season", web::post().to(upload_season))
        .route("/api/events", web::get().to(get_events))
        .service(web::resource("/api/flotilla/{event}").route(web::get().to(get_flotilla)))
        .service(web::resource("/api/flotilla/{event}/csv").route(web::get().to(get_flotilla_csv)));
}

pub async fn start_server(port: u16, season: Option<Season>) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(season));

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
