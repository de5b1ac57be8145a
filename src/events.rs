//! Event commands: list, show, create, update, cancel.
//!
//! Times entered by the user are wall-clock values in the selected
//! timezone; they are converted to UTC instants before transmission, so
//! the service only ever sees canonical instants.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use rsvp_api::{CreateEventRequest, EventsApi, UpdateEventRequest};
use tracing::info;

use crate::cli::{CreateArgs, UpdateArgs};
use crate::error::RsvpError;
use crate::output;
use crate::timezone::{convert_wall_clock_to_utc, utc_string};

/// Longest accepted name/location, matching the service limit.
const MAX_TEXT_LEN: usize = 255;

/// Largest accepted capacity, matching the service limit.
const MAX_CAPACITY: u32 = 1000;

pub async fn list(api: &EventsApi, tz: Tz) -> Result<(), RsvpError> {
    let events = api.list_events().await?;
    output::print_events(&events, tz);
    Ok(())
}

pub async fn show(api: &EventsApi, event_id: i64, tz: Tz) -> Result<(), RsvpError> {
    let event = api.get_event(event_id).await?;
    output::print_event(&event, tz);
    Ok(())
}

pub async fn create(api: &EventsApi, args: &CreateArgs, tz: Tz) -> Result<(), RsvpError> {
    let req = build_create_request(args, tz)?;
    let event = api.create_event(&req).await?;
    info!(event_id = event.id, "event created");
    output::print_event(&event, tz);
    Ok(())
}

pub async fn update(api: &EventsApi, args: &UpdateArgs, tz: Tz) -> Result<(), RsvpError> {
    let req = build_update_request(args, tz)?;
    let event = api.update_event(args.event_id, &req).await?;
    info!(event_id = event.id, "event updated");
    output::print_event(&event, tz);
    Ok(())
}

pub async fn cancel(api: &EventsApi, event_id: i64) -> Result<(), RsvpError> {
    api.delete_event(event_id).await?;
    info!(event_id, "event cancelled");
    println!("Event {event_id} cancelled.");
    Ok(())
}

fn build_create_request(args: &CreateArgs, tz: Tz) -> Result<CreateEventRequest, RsvpError> {
    validate_text("name", &args.name)?;
    validate_text("location", &args.location)?;
    validate_capacity(args.capacity)?;

    let start = to_utc_instant(&args.start, tz)?;
    let end = to_utc_instant(&args.end, tz)?;
    if end <= start {
        return Err(RsvpError::Validation(
            "end time must be after start time".to_string(),
        ));
    }

    Ok(CreateEventRequest {
        name: args.name.clone(),
        location: args.location.clone(),
        start_time: utc_string(start),
        end_time: utc_string(end),
        max_capacity: args.capacity,
    })
}

fn build_update_request(args: &UpdateArgs, tz: Tz) -> Result<UpdateEventRequest, RsvpError> {
    if args.name.is_none()
        && args.location.is_none()
        && args.start.is_none()
        && args.end.is_none()
        && args.capacity.is_none()
    {
        return Err(RsvpError::Validation("nothing to update".to_string()));
    }

    if let Some(name) = &args.name {
        validate_text("name", name)?;
    }
    if let Some(location) = &args.location {
        validate_text("location", location)?;
    }
    if let Some(capacity) = args.capacity {
        validate_capacity(capacity)?;
    }

    let start = args
        .start
        .as_deref()
        .map(|s| to_utc_instant(s, tz))
        .transpose()?;
    let end = args
        .end
        .as_deref()
        .map(|s| to_utc_instant(s, tz))
        .transpose()?;
    if let (Some(start), Some(end)) = (start, end) {
        if end <= start {
            return Err(RsvpError::Validation(
                "end time must be after start time".to_string(),
            ));
        }
    }

    Ok(UpdateEventRequest {
        name: args.name.clone(),
        location: args.location.clone(),
        start_time: start.map(utc_string),
        end_time: end.map(utc_string),
        max_capacity: args.capacity,
    })
}

fn to_utc_instant(wall: &str, tz: Tz) -> Result<DateTime<Utc>, RsvpError> {
    let naive = parse_wall_clock(wall)?;
    Ok(convert_wall_clock_to_utc(naive, tz)?)
}

fn parse_wall_clock(s: &str) -> Result<NaiveDateTime, RsvpError> {
    for fmt in [
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive);
        }
    }
    Err(RsvpError::Validation(format!(
        "unrecognized date/time: {s} (expected \"YYYY-MM-DD HH:MM\")"
    )))
}

fn validate_text(field: &str, value: &str) -> Result<(), RsvpError> {
    if value.trim().is_empty() {
        return Err(RsvpError::Validation(format!("{field} is required")));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(RsvpError::Validation(format!(
            "{field} must be at most {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_capacity(capacity: u32) -> Result<(), RsvpError> {
    if capacity == 0 || capacity > MAX_CAPACITY {
        return Err(RsvpError::Validation(format!(
            "capacity must be between 1 and {MAX_CAPACITY}"
        )));
    }
    Ok(())
}
