use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    pub k: i64,
}

/// Body returned by `POST /ask`.
///
/// Every field is optional on the wire: a missing key or an explicit `null`
/// decodes to the empty value so presentation never has to special-case it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerPayload {
    #[serde(rename = "response", default, deserialize_with = "null_as_default")]
    pub narrative: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sources: Vec<SourceRecord>,
}

impl AnswerPayload {
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }
}

/// One retrieved image offered as evidence, in relevance order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_id: String,
    /// Server-relative path; only the final segment is meaningful to clients.
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub caption: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_uses_question_and_k_field_names() {
        let body = serde_json::to_value(AskRequest {
            question: "Where is trash piling up?".to_string(),
            k: 5,
        })
        .expect("serialize");
        assert_eq!(body, json!({ "question": "Where is trash piling up?", "k": 5 }));
    }

    #[test]
    fn decodes_well_formed_answer_in_received_order() {
        let payload: AnswerPayload = serde_json::from_value(json!({
            "response": "## Findings\nBroken sidewalks.",
            "sources": [
                {
                    "image_id": "img-2",
                    "image_path": "data/images/sidewalk.jpg",
                    "caption": "A cracked sidewalk",
                    "tags": ["sidewalk", "damage", "sidewalk"],
                    "location": "Quezon City"
                },
                {
                    "image_id": "img-1",
                    "image_path": "data/images/road.jpg",
                    "caption": "A flooded road",
                    "tags": ["flood"],
                    "location": "Manila"
                }
            ]
        }))
        .expect("decode");

        assert_eq!(payload.narrative, "## Findings\nBroken sidewalks.");
        assert_eq!(payload.source_count(), 2);
        assert_eq!(payload.sources[0].image_id, "img-2");
        assert_eq!(payload.sources[0].tags, vec!["sidewalk", "damage", "sidewalk"]);
        assert_eq!(payload.sources[1].location, "Manila");
    }

    #[test]
    fn missing_and_null_fields_become_empty() {
        let payload: AnswerPayload = serde_json::from_value(json!({
            "sources": [
                { "image_id": "img-9", "tags": null, "caption": null },
                {}
            ],
            "extra": true
        }))
        .expect("decode");

        assert_eq!(payload.narrative, "");
        assert_eq!(payload.source_count(), 2);
        assert_eq!(payload.sources[0].caption, "");
        assert!(payload.sources[0].tags.is_empty());
        assert_eq!(payload.sources[1], SourceRecord::default());
    }

    #[test]
    fn null_sources_decode_to_empty_list() {
        let payload: AnswerPayload =
            serde_json::from_value(json!({ "response": "nothing", "sources": null }))
                .expect("decode");
        assert!(payload.sources.is_empty());
    }

    #[test]
    fn plain_text_body_is_rejected() {
        assert!(serde_json::from_str::<AnswerPayload>("Hello, World!").is_err());
        assert!(serde_json::from_str::<AnswerPayload>("\"just a string\"").is_err());
    }
}
