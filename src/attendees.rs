//! Attendee commands: roster listing, registration, removal.

use chrono_tz::Tz;
use rsvp_api::{EventsApi, RegisterAttendeeRequest};
use tracing::info;

use crate::cli::{AttendeesArgs, RegisterArgs};
use crate::error::RsvpError;
use crate::output;
use crate::pager::Pager;

/// Largest accepted page size, matching the service limit.
const MAX_PAGE_SIZE: u32 = 100;

const MAX_TEXT_LEN: usize = 255;

/// Print an event's roster. Fetches the first page, or drives the loader
/// to exhaustion with `--all`.
pub async fn list(api: &EventsApi, args: &AttendeesArgs, tz: Tz) -> Result<(), RsvpError> {
    validate_page_size(args.page_size)?;

    let mut pager = Pager::new(args.page_size);
    pager.load_first(api, args.event_id).await?;
    if args.all {
        while pager.load_more(api).await? {}
    }

    if pager.items().is_empty() {
        println!("No attendees registered yet.");
        return Ok(());
    }

    println!(
        "{} of {} attendees (through page {})\n",
        pager.items().len(),
        pager.total(),
        pager.current_page()
    );
    output::print_attendees(pager.items(), tz);

    if pager.has_next() {
        let remaining = pager.total().saturating_sub(pager.items().len() as u64);
        println!("\n{remaining} more not shown; pass --all to fetch every page.");
    }
    Ok(())
}

pub async fn register(api: &EventsApi, args: &RegisterArgs) -> Result<(), RsvpError> {
    let req = build_register_request(&args.name, &args.email)?;
    let attendee = api.register_attendee(args.event_id, &req).await?;
    info!(
        attendee_id = attendee.id,
        event_id = args.event_id,
        "attendee registered"
    );
    println!(
        "Registered {} <{}> for event {} (attendee #{}).",
        attendee.name, attendee.email, args.event_id, attendee.id
    );
    Ok(())
}

pub async fn unregister(
    api: &EventsApi,
    event_id: i64,
    attendee_id: i64,
) -> Result<(), RsvpError> {
    api.remove_attendee(event_id, attendee_id).await?;
    info!(attendee_id, event_id, "attendee removed");
    println!("Removed attendee {attendee_id} from event {event_id}.");
    Ok(())
}

fn build_register_request(name: &str, email: &str) -> Result<RegisterAttendeeRequest, RsvpError> {
    if name.trim().is_empty() {
        return Err(RsvpError::Validation("name is required".to_string()));
    }
    if name.chars().count() > MAX_TEXT_LEN {
        return Err(RsvpError::Validation(format!(
            "name must be at most {MAX_TEXT_LEN} characters"
        )));
    }
    validate_email(email)?;
    Ok(RegisterAttendeeRequest {
        name: name.to_string(),
        email: email.to_string(),
    })
}

fn validate_email(email: &str) -> Result<(), RsvpError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(RsvpError::Validation(format!("invalid email: {email}")));
    }
    Ok(())
}

fn validate_page_size(size: u32) -> Result<(), RsvpError> {
    if size == 0 || size > MAX_PAGE_SIZE {
        return Err(RsvpError::Validation(format!(
            "page size must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    Ok(())
}
