//! Terminal rendering for the agenda view.

use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;
use mantel_core::EventInstance;
use owo_colors::OwoColorize;

/// Print instances grouped by day, oldest first.
pub fn print_agenda(instances: &[&EventInstance], timezone: Option<Tz>) {
    if instances.is_empty() {
        println!("No events in this window.");
        return;
    }

    let mut current_day = String::new();
    for instance in instances {
        let (day, time) = labels(instance.date, timezone);
        if day != current_day {
            println!("\n{}", day.bold());
            current_day = day;
        }

        let mark = if instance.is_completed {
            "✓".green().to_string()
        } else {
            "·".to_string()
        };

        let mut line = format!("  {} {} {}", mark, time.dimmed(), paint(&instance.color, &instance.title));
        if let Some(location) = &instance.additional {
            line.push_str(&format!(" {}", format!("({location})").dimmed()));
        }
        println!("{line}");
    }
}

fn labels(date: DateTime<Utc>, timezone: Option<Tz>) -> (String, String) {
    match timezone {
        Some(tz) => {
            let local = date.with_timezone(&tz);
            (
                local.format("%a %b %-d").to_string(),
                local.format("%H:%M").to_string(),
            )
        }
        None => {
            let local = date.with_timezone(&Local);
            (
                local.format("%a %b %-d").to_string(),
                local.format("%H:%M").to_string(),
            )
        }
    }
}

/// Map a feed's palette name onto a terminal color.
fn paint(color: &str, text: &str) -> String {
    match color {
        "red" | "rose" => text.red().to_string(),
        "orange" | "amber" | "yellow" => text.yellow().to_string(),
        "green" | "emerald" | "lime" => text.green().to_string(),
        "teal" | "cyan" => text.cyan().to_string(),
        "blue" | "sky" | "indigo" => text.blue().to_string(),
        "purple" | "violet" | "fuchsia" | "pink" => text.magenta().to_string(),
        _ => text.to_string(),
    }
}
