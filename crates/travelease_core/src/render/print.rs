//! Printable itinerary document.

use crate::dates::format_long_date;
use crate::model::trip::{ItineraryDay, Trip};
use crate::render::{escape_html, format_money};

/// Standalone HTML document handed to the platform for printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintDocument {
    pub title: String,
    pub html: String,
}

/// Builds the print view of `trip` and its itinerary.
pub fn render_print_document(trip: &Trip, days: &[ItineraryDay]) -> PrintDocument {
    let title = format!("{} - Itinerary", trip.name);
    let mut body = format!(
        r#"<h1>{title}</h1>
<p><strong>Destination:</strong> {destination}</p>
<p><strong>Dates:</strong> {start} to {end}</p>
<p><strong>Travelers:</strong> {travelers}</p>
<hr>
"#,
        title = escape_html(&title),
        destination = escape_html(&trip.destination),
        start = format_long_date(trip.start_date),
        end = format_long_date(trip.end_date),
        travelers = escape_html(&trip.companions()),
    );

    for day in days {
        body.push_str(&format!(
            "<div style=\"margin-bottom: 20px;\">\n<h2>Day {} - {}: {}</h2>\n",
            day.day,
            format_long_date(day.date),
            escape_html(&day.title)
        ));
        for activity in &day.activities {
            body.push_str(
                "<div style=\"margin: 10px 0; padding: 10px; border-left: 3px solid #007bff;\">\n",
            );
            body.push_str(&format!(
                "<h3 style=\"margin: 0;\">{}</h3>\n",
                escape_html(&activity.title)
            ));
            if !activity.description.is_empty() {
                body.push_str(&format!(
                    "<p style=\"margin: 5px 0;\">{}</p>\n",
                    escape_html(&activity.description)
                ));
            }
            if !activity.location.is_empty() {
                body.push_str(&format!(
                    "<p style=\"margin: 5px 0;\"><strong>Location:</strong> {}</p>\n",
                    escape_html(&activity.location)
                ));
            }
            if activity.cost > 0.0 {
                body.push_str(&format!(
                    "<p style=\"margin: 5px 0;\"><strong>Cost:</strong> {}</p>\n",
                    format_money(activity.cost)
                ));
            }
            body.push_str("</div>\n");
        }
        body.push_str("</div>\n");
    }

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{head_title}</title>
<style>
body {{ font-family: Arial, sans-serif; padding: 20px; }}
h1 {{ color: #007bff; }}
h2 {{ color: #333; border-bottom: 1px solid #eee; padding-bottom: 5px; }}
</style>
</head>
<body onload="window.print()">
{body}</body>
</html>
"#,
        head_title = escape_html(&title),
    );

    PrintDocument { title, html }
}

#[cfg(test)]
mod tests {
    use super::render_print_document;
    use crate::model::trip::{Activity, ItineraryDay, Trip};
    use chrono::NaiveDate;

    #[test]
    fn print_document_lists_days_and_optional_activity_details() {
        let trip = Trip {
            name: "Porto & Douro".to_string(),
            destination: "Portugal".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            travelers: Some(3),
            traveler_names: String::new(),
        };
        let mut first = ItineraryDay::new(1, trip.start_date);
        first
            .activities
            .push(Activity::new("Wine cellar", "", "Gaia", 25.0));
        let second = ItineraryDay::new(2, trip.end_date);

        let document = render_print_document(&trip, &[first, second]);
        assert_eq!(document.title, "Porto & Douro - Itinerary");
        assert!(document.html.contains("<title>Porto &amp; Douro - Itinerary</title>"));
        assert!(document.html.contains("<strong>Travelers:</strong> 3"));
        assert!(document.html.contains("Day 2 - June 2, 2024: Day 2 Activities"));
        assert!(document.html.contains("<strong>Location:</strong> Gaia"));
        assert!(document.html.contains("<strong>Cost:</strong> $25.00"));
        assert!(!document.html.contains("<p style=\"margin: 5px 0;\"></p>"));
    }
}
