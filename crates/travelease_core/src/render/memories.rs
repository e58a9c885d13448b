//! Memories list renderer.

use crate::dates::format_long_date;
use crate::model::memory::Memory;
use crate::render::{escape_html, BoundAction, Fragment};

/// Memory cards in insertion order, photo included while its handle is live.
pub fn render_memories(memories: &[Memory]) -> Fragment {
    let mut fragment = Fragment::default();
    for memory in memories {
        let delete_id = format!("delete-memory-{}", memory.id);
        fragment.markup.push_str(&format!(
            r#"<div class="memory-item">
<div class="memory-date">{date}</div>
<h4>{title}</h4>
<p>{content}</p>
{photo}<button class="btn-icon delete-memory" id="{delete_id}" data-id="{id}"><i class="fas fa-trash"></i></button>
</div>
"#,
            date = format_long_date(memory.date),
            title = escape_html(&memory.title),
            content = escape_html(&memory.content),
            photo = photo_markup(memory),
            id = memory.id,
        ));
        fragment.bind(delete_id, BoundAction::DeleteMemory(memory.id));
    }
    fragment
}

/// `<img>` tag for the memory's photo, or nothing.
pub(crate) fn photo_markup(memory: &Memory) -> String {
    memory
        .photo
        .as_ref()
        .map(|photo| {
            format!(
                "<img src=\"{}\" alt=\"{}\">\n",
                escape_html(photo.as_str()),
                escape_html(&memory.title)
            )
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::render_memories;
    use crate::model::memory::{Memory, PhotoRef};
    use crate::render::BoundAction;
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn memory_card_includes_photo_only_when_present() {
        let with_photo = Memory {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            title: "Fado night".to_string(),
            content: "Alfama, late.".to_string(),
            photo: Some(PhotoRef::new("blob:travelease/1".to_string())),
        };
        let mut without_photo = with_photo.clone();
        without_photo.id = Uuid::new_v4();
        without_photo.photo = None;

        let fragment = render_memories(&[with_photo.clone(), without_photo]);
        assert_eq!(fragment.markup.matches("<img ").count(), 1);
        assert!(fragment
            .markup
            .contains(r#"<img src="blob:travelease/1" alt="Fado night">"#));
        assert_eq!(
            fragment.action_for(&format!("delete-memory-{}", with_photo.id)),
            Some(&BoundAction::DeleteMemory(with_photo.id))
        );
    }
}
