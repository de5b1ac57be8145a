//! Stdout rendering for command output.

use chrono_tz::Tz;
use rsvp_api::{Attendee, Event};

use crate::timezone::{self, DEFAULT_PATTERN};

/// Placeholder for timestamps that fail to format. A broken field degrades
/// to this; it never aborts the surrounding view.
const INVALID_DATE: &str = "Invalid date";

/// Render a stored instant for display in `tz`, degrading on error.
pub fn display_instant(instant: &str, tz: Tz) -> String {
    timezone::format_instant(instant, tz, DEFAULT_PATTERN)
        .unwrap_or_else(|_| INVALID_DATE.to_string())
}

/// "3/100 (3%)", with a FULL marker once capacity is reached.
pub fn capacity_summary(event: &Event) -> String {
    let mut summary = format!(
        "{}/{} ({:.0}%)",
        event.current_attendees, event.max_capacity, event.capacity_percentage
    );
    if event.is_full {
        summary.push_str(" FULL");
    }
    summary
}

pub fn print_events(events: &[Event], tz: Tz) {
    if events.is_empty() {
        println!("No upcoming events.");
        return;
    }
    println!(
        "Dates shown in {} ({})\n",
        tz.name(),
        timezone::offset_label(tz)
    );
    println!(
        "{:<6} {:<28} {:<20} {:<30} {:<16}",
        "ID", "NAME", "LOCATION", "STARTS", "CAPACITY"
    );
    for event in events {
        println!(
            "{:<6} {:<28} {:<20} {:<30} {:<16}",
            event.id,
            clip(&event.name, 28),
            clip(&event.location, 20),
            display_instant(&event.start_time, tz),
            capacity_summary(event)
        );
    }
}

pub fn print_event(event: &Event, tz: Tz) {
    let label = timezone::offset_label(tz);
    println!("#{} {}", event.id, event.name);
    println!("  Location:  {}", event.location);
    println!(
        "  Starts:    {} {}",
        display_instant(&event.start_time, tz),
        label
    );
    println!(
        "  Ends:      {} {}",
        display_instant(&event.end_time, tz),
        label
    );
    println!("  Capacity:  {}", capacity_summary(event));
    println!("  Spots:     {}", event.available_spots);
    println!(
        "  Created:   {} {}",
        display_instant(&event.created_at, tz),
        label
    );
}

pub fn print_attendees(attendees: &[Attendee], tz: Tz) {
    println!(
        "{:<6} {:<24} {:<30} {:<30}",
        "ID", "NAME", "EMAIL", "REGISTERED"
    );
    for attendee in attendees {
        println!(
            "{:<6} {:<24} {:<30} {:<30}",
            attendee.id,
            clip(&attendee.name, 24),
            clip(&attendee.email, 30),
            display_instant(&attendee.registered_at, tz)
        );
    }
}

pub fn print_timezones() {
    println!("{:<22} {:<22} {}", "ZONE", "LABEL", "CURRENT OFFSET");
    for (tz, label) in timezone::COMMON_TIMEZONES {
        println!(
            "{:<22} {:<22} {}",
            tz.name(),
            label,
            timezone::offset_label(*tz)
        );
    }
}

fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut clipped: String = s.chars().take(max.saturating_sub(1)).collect();
        clipped.push('…');
        clipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(current: u32, max: u32, full: bool) -> Event {
        Event {
            id: 1,
            name: "Launch party".to_string(),
            location: "HQ".to_string(),
            start_time: "2026-09-01T18:00:00".to_string(),
            end_time: "2026-09-01T21:00:00".to_string(),
            max_capacity: max,
            current_attendees: current,
            created_at: "2026-08-01T00:00:00".to_string(),
            updated_at: "2026-08-01T00:00:00".to_string(),
            is_full: full,
            available_spots: max - current,
            capacity_percentage: current as f64 / max as f64 * 100.0,
        }
    }

    #[test]
    fn test_capacity_summary() {
        assert_eq!(capacity_summary(&event(3, 100, false)), "3/100 (3%)");
        assert_eq!(capacity_summary(&event(10, 10, true)), "10/10 (100%) FULL");
    }

    #[test]
    fn test_display_instant_degrades_per_field() {
        assert_eq!(display_instant("garbage", Tz::UTC), "Invalid date");
        assert_eq!(
            display_instant("2026-09-01T18:00:00", Tz::UTC),
            "September 1, 2026 at 6:00 PM"
        );
    }

    #[test]
    fn test_clip() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("a very long event name", 10), "a very lo…");
    }
}
