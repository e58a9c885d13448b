//! Itinerary section renderer.

use crate::dates::format_long_date;
use crate::forms::fields;
use crate::model::trip::{Activity, ItineraryDay};
use crate::render::{escape_html, format_money, BoundAction, Fragment};

/// Renders every day with its activities and its add-activity inputs.
pub fn render_itinerary(days: &[ItineraryDay]) -> Fragment {
    let mut fragment = Fragment::default();
    for day in days {
        render_day(&mut fragment, day);
    }
    fragment
}

fn render_day(fragment: &mut Fragment, day: &ItineraryDay) {
    let number = day.day;
    let delete_id = format!("delete-day-{number}");
    let save_title_id = format!("save-title-{number}");
    let add_activity_id = format!("add-activity-{number}");

    fragment.markup.push_str(&format!(
        r#"<div class="itinerary-day" data-day="{number}">
<div class="day-header">
<h3>Day {number} - {date}</h3>
<button class="btn-small delete-day" id="{delete_id}" data-day="{number}"><i class="fas fa-trash"></i></button>
</div>
<div class="day-title-section">
<input type="text" class="day-title-input" name="{title_field}" value="{title}" placeholder="Day title" data-day="{number}">
<button class="btn-small save-title-btn" id="{save_title_id}" data-day="{number}">Save Title</button>
</div>
<div class="activities">
"#,
        date = format_long_date(day.date),
        title_field = fields::day_title(number),
        title = escape_html(&day.title),
    ));
    fragment.bind(delete_id, BoundAction::DeleteDay(number));
    fragment.bind(save_title_id, BoundAction::SaveDayTitle(number));

    for activity in &day.activities {
        render_activity(fragment, number, activity);
    }

    fragment.markup.push_str(&format!(
        r#"</div>
<div class="add-activity">
<input type="text" class="activity-title-input" name="{title_field}" placeholder="Activity title" data-day="{number}">
<textarea class="activity-desc-input" name="{desc_field}" placeholder="Description" data-day="{number}" rows="2"></textarea>
<input type="text" class="activity-location-input" name="{location_field}" placeholder="Location" data-day="{number}">
<input type="number" class="activity-cost-input" name="{cost_field}" placeholder="Cost ($)" data-day="{number}" step="0.01">
<button class="btn-primary add-activity-btn" id="{add_activity_id}" data-day="{number}">Add Activity</button>
</div>
</div>
"#,
        title_field = fields::activity_title(number),
        desc_field = fields::activity_description(number),
        location_field = fields::activity_location(number),
        cost_field = fields::activity_cost(number),
    ));
    fragment.bind(add_activity_id, BoundAction::AddActivity(number));
}

fn render_activity(fragment: &mut Fragment, day: u32, activity: &Activity) {
    let delete_id = format!("delete-activity-{}", activity.id);
    let location = if activity.location.is_empty() {
        String::new()
    } else {
        format!(
            r#"<p class="activity-location"><i class="fas fa-map-marker-alt"></i> {}</p>"#,
            escape_html(&activity.location)
        )
    };
    let cost = if activity.cost > 0.0 {
        format!(
            r#"<p class="activity-cost"><i class="fas fa-dollar-sign"></i> {}</p>"#,
            format_money(activity.cost)
        )
    } else {
        String::new()
    };

    fragment.markup.push_str(&format!(
        r#"<div class="activity">
<div class="activity-details">
<h4>{title}</h4>
<p>{description}</p>
{location}{cost}
</div>
<button class="btn-icon delete-activity" id="{delete_id}" data-day="{day}" data-activity="{id}"><i class="fas fa-times"></i></button>
</div>
"#,
        title = escape_html(&activity.title),
        description = escape_html(&activity.description),
        id = activity.id,
    ));
    fragment.bind(
        delete_id,
        BoundAction::DeleteActivity {
            day,
            activity: activity.id,
        },
    );
}
