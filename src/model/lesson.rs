use super::LessonId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A bookable lesson in the catalog.
///
/// Only `spaces`, the remaining capacity, is interpreted by the service.
/// Everything else in the document (`subject`, `location`, `price`, `icon`
/// and whatever a catalog file adds) rides along in `attributes` and is
/// written back out exactly as it came in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    #[serde(rename = "_id")]
    pub id: LessonId,
    pub spaces: u32,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// A catalog entry as read from a file, before the store has settled its id.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LessonCreate {
    pub spaces: u32,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl LessonCreate {
    /// The usual catalog shape. Any other attributes can be added to
    /// `attributes` afterwards.
    pub fn new(
        subject: impl Into<String>,
        location: impl Into<String>,
        price: f64,
        spaces: u32,
    ) -> Self {
        let mut attributes = Map::new();
        attributes.insert("subject".into(), Value::String(subject.into()));
        attributes.insert("location".into(), Value::String(location.into()));
        attributes.insert("price".into(), Value::from(price));
        Self { spaces, attributes }
    }

    /// The `_id` the entry was stored under, if it carries a valid one.
    pub fn stored_id(&self) -> Option<LessonId> {
        self.attributes.get("_id")?.as_str()?.parse().ok()
    }
}

/// Body of `PUT /lessons/:id`: the new absolute capacity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LessonUpdate {
    pub spaces: u32,
}

impl Lesson {
    pub fn new(id: LessonId, params: LessonCreate) -> Self {
        let mut attributes = params.attributes;
        // the store assigns ids; a seed's own `_id` would collide on output
        attributes.remove("_id");
        Self {
            id,
            spaces: params.spaces,
            attributes,
        }
    }

    /// A text attribute such as `subject` or `location`, if present and a string.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.attributes.get(field)?.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extra_seed_attributes_survive_to_the_wire() {
        let params: LessonCreate = serde_json::from_value(json!({
            "_id": "64b0c0ffee",
            "subject": "Music",
            "location": "Hendon",
            "price": 100,
            "spaces": 5,
            "icon": "fa-music",
            "tutor": "Ms Ray"
        }))
        .unwrap();

        let lesson = Lesson::new(LessonId(1), params);
        let wire = serde_json::to_value(&lesson).unwrap();
        assert_eq!(
            wire,
            json!({
                "_id": "lesson_1",
                "subject": "Music",
                "location": "Hendon",
                "price": 100,
                "spaces": 5,
                "icon": "fa-music",
                "tutor": "Ms Ray"
            })
        );
    }

    #[test]
    fn descriptive_fields_are_passed_through_untyped() {
        // no location, a price written as text, a subject that is not a string
        let params: LessonCreate = serde_json::from_value(json!({
            "subject": 42,
            "price": "£100",
            "spaces": 3
        }))
        .unwrap();

        let lesson = Lesson::new(LessonId(2), params);
        assert_eq!(lesson.text("subject"), None);
        assert_eq!(lesson.text("location"), None);
        assert_eq!(lesson.text("price"), Some("£100"));
        assert_eq!(
            serde_json::to_value(&lesson).unwrap(),
            json!({ "_id": "lesson_2", "subject": 42, "price": "£100", "spaces": 3 })
        );
    }

    #[test]
    fn capacity_is_the_only_required_field() {
        assert!(serde_json::from_value::<LessonCreate>(json!({ "subject": "Art" })).is_err());
        assert!(serde_json::from_value::<LessonCreate>(json!({ "spaces": -2 })).is_err());
        assert!(serde_json::from_value::<LessonCreate>(json!({ "spaces": 0 })).is_ok());
    }

    #[test]
    fn stored_id_must_name_a_lesson() {
        let with = |id: Value| LessonCreate {
            spaces: 1,
            attributes: [("_id".to_string(), id)].into_iter().collect(),
        };
        assert_eq!(with(json!("lesson_9")).stored_id(), Some(LessonId(9)));
        assert_eq!(with(json!("order_9")).stored_id(), None);
        assert_eq!(with(json!(9)).stored_id(), None);
        assert_eq!(LessonCreate::new("Art", "Brent", 80.0, 2).stored_id(), None);
    }

    #[test]
    fn negative_capacity_is_not_a_valid_update() {
        assert!(serde_json::from_value::<LessonUpdate>(json!({ "spaces": -1 })).is_err());
        assert!(serde_json::from_value::<LessonUpdate>(json!({ "spaces": 2.5 })).is_err());
        assert_eq!(
            serde_json::from_value::<LessonUpdate>(json!({ "spaces": 10 })).unwrap(),
            LessonUpdate { spaces: 10 }
        );
    }
}
