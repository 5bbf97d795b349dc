//! Plain-text rendering of server responses

use std::fmt::Write;

use serde_json::Value;

fn text<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("-")
}

/// Snapshot metrics, one per line
pub fn snapshot(body: &Value) -> String {
    let display = &body["display"];
    let hours = body["hour_offset"].as_u64().unwrap_or(0);
    let heading = if hours == 0 {
        "Now".to_string()
    } else {
        format!("+{hours}h")
    };

    let mut out = format!("🌤️  Snapshot ({heading})\n");
    for (label, key) in [
        ("Temperature", "temperature"),
        ("Humidity", "humidity"),
        ("Pressure", "pressure"),
        ("Clouds", "clouds"),
        ("Wind", "wind"),
        ("Dew point", "dew_point"),
        ("Visibility", "visibility"),
    ] {
        let _ = writeln!(out, "   {label:<12} {}", text(display, key));
    }
    out
}

/// Daily forecast table
pub fn daily(body: &Value) -> String {
    let Some(days) = body["days"].as_array().filter(|days| !days.is_empty()) else {
        return "No forecast available\n".to_string();
    };

    let mut out = String::from("📅 Daily forecast\n");
    for day in days {
        let _ = write!(
            out,
            "   {:<9} {:<7} {:>4} / {:<4} {:<14} {}",
            text(day, "label"),
            text(day, "date_label"),
            text(day, "temp_min"),
            text(day, "temp_max"),
            text(day, "humidity"),
            text(day, "description"),
        );
        for key in ["wind", "rain"] {
            if let Some(extra) = day.get(key).and_then(Value::as_str) {
                let _ = write!(out, " · {extra}");
            }
        }
        out.push('\n');
    }
    out
}

/// Advisory panel
pub fn advisory(body: &Value) -> String {
    let label = text(body, "label");
    let panel = &body["panel"];

    match panel["state"].as_str() {
        Some("ready") => {
            let mut out = format!("🌱 {label}\n\n");
            out.push_str(text(&panel["result"], "text"));
            out.push('\n');
            out
        },
        Some("unavailable") => format!("⚠️  {label}: {}\n", text(panel, "message")),
        Some("loading") => format!("⏳ {label}: generating...\n"),
        _ => format!("💤 {label}: no advisory requested yet\n"),
    }
}

/// Numbered search hits
pub fn places(body: &Value) -> String {
    let Some(results) = body["results"].as_array().filter(|r| !r.is_empty()) else {
        return "No places found\n".to_string();
    };

    let mut out = String::new();
    for (index, place) in results.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} ({:.4}, {:.4})",
            index + 1,
            text(place, "display_name"),
            place["latitude"].as_f64().unwrap_or_default(),
            place["longitude"].as_f64().unwrap_or_default(),
        );
    }
    out
}

/// Dashboard summary by view state
pub fn dashboard(body: &Value) -> String {
    match body["state"].as_str() {
        Some("ready") => {
            let mut out = format!(
                "📍 {} ({})\n",
                body["place_name"].as_str().unwrap_or("Unknown place"),
                text(&body["location"], "origin"),
            );
            let current = &body["current"];
            let _ = writeln!(
                out,
                "   {} · {} · feels like {}",
                text(current, "temperature"),
                text(current, "description"),
                text(current, "feels_like"),
            );
            let _ = writeln!(
                out,
                "   Humidity {} · Pressure {} · Wind {}",
                text(current, "humidity"),
                text(current, "pressure"),
                text(current, "wind"),
            );
            if let Some(hourly) = body["hourly"].as_array() {
                let strip: Vec<String> = hourly
                    .iter()
                    .map(|point| format!("{} {}", text(point, "time"), text(point, "temperature")))
                    .collect();
                let _ = writeln!(out, "   Next hours: {}", strip.join(" | "));
            }
            if let Some(error) = body["location_status"]["error"].as_object() {
                let _ = writeln!(
                    out,
                    "   ⚠️  Location: {}",
                    error
                        .get("reason")
                        .and_then(Value::as_str)
                        .unwrap_or("unavailable")
                );
            }
            let _ = writeln!(out, "   🚨 Alerts: {}", text(body, "disaster_alert_url"));
            out
        },
        Some("failed") => format!("❌ {}\n", text(body, "message")),
        _ => "⏳ Loading weather data...\n".to_string(),
    }
}
