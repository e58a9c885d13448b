//! Trip story renderer.

use crate::dates::format_long_date;
use crate::render::memories::photo_markup;
use crate::render::{escape_html, Fragment};
use crate::service::memories::Story;

/// Trip header followed by memories in the story's chronological order.
pub fn render_story(story: &Story<'_>) -> Fragment {
    let trip = story.trip;
    let mut markup = format!(
        r#"<h2>{name}</h2>
<p><strong>Destination:</strong> {destination}</p>
<p><strong>Travel Dates:</strong> {start} to {end}</p>
<p><strong>Travel Companions:</strong> {companions}</p>
<hr>
"#,
        name = escape_html(&trip.name),
        destination = escape_html(&trip.destination),
        start = format_long_date(trip.start_date),
        end = format_long_date(trip.end_date),
        companions = escape_html(&trip.companions()),
    );

    for memory in &story.memories {
        markup.push_str(&format!(
            r#"<div class="memory-story">
<h3>{date}: {title}</h3>
<p>{content}</p>
{photo}</div>
"#,
            date = format_long_date(memory.date),
            title = escape_html(&memory.title),
            content = escape_html(&memory.content),
            photo = photo_markup(memory),
        ));
    }

    Fragment::static_markup(markup)
}
