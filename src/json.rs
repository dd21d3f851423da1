use crate::index::VideoIndex;

impl VideoIndex {
    /// Load an index from the JSON document the external indexing step produced.
    ///
    /// # Errors
    ///
    /// Errors when the document is not valid JSON, misses fields or contains
    /// malformed or reversed time spans.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize the index back into its JSON document form.
    ///
    /// # Errors
    ///
    /// Errors when serialization fails.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
const EXAMPLE_JSON: &str = r#"{
    "video_title": "Rust in Production",
    "overview": "Conference talk about shipping Rust services",
    "children": [
        {
            "node_type": "Chapter",
            "title": "Introduction",
            "summary": "Speaker and agenda",
            "children": [
                {
                    "title": "Opening hook",
                    "description": "War story about an outage",
                    "time_span": {"start_time": "00:00", "end_time": "00:45"}
                },
                {
                    "title": "Agenda",
                    "description": "The three main topics",
                    "time_span": {"start_time": "00:45", "end_time": "01:30"}
                }
            ]
        },
        {
            "node_type": "Segment",
            "title": "Q&A",
            "description": "Audience questions",
            "time_span": {"start_time": "25:00", "end_time": "29:30"}
        }
    ]
}"#;

#[test]
fn loads_an_indexer_document() {
    let index = VideoIndex::from_json_str(EXAMPLE_JSON).unwrap();
    assert_eq!(index.video_title, "Rust in Production");
    assert_eq!(index.children.len(), 2);
    assert_eq!(index.id(), "Video_0000_2930");
}

#[test]
fn round_trip_preserves_the_document() {
    let index = VideoIndex::from_json_str(EXAMPLE_JSON).unwrap();
    let json = index.to_json_string().unwrap();
    let again = VideoIndex::from_json_str(&json).unwrap();
    assert_eq!(index, again);
}

#[test]
fn children_are_optional() {
    let index = VideoIndex::from_json_str(
        r#"{"video_title": "Empty", "overview": "Nothing indexed yet"}"#,
    )
    .unwrap();
    assert!(index.children.is_empty());
    assert_eq!(index.time_span(), crate::TimeSpan::EMPTY);
}

#[test]
fn rejects_a_reversed_time_span() {
    let json = r#"{
        "video_title": "Broken",
        "overview": "",
        "children": [{
            "node_type": "Segment",
            "title": "Reversed",
            "description": "",
            "time_span": {"start_time": "02:00", "end_time": "01:00"}
        }]
    }"#;
    let error = VideoIndex::from_json_str(json).unwrap_err();
    assert!(error.to_string().contains("before"));
}

#[test]
fn rejects_a_malformed_timestamp() {
    let json = r#"{
        "video_title": "Broken",
        "overview": "",
        "children": [{
            "node_type": "Segment",
            "title": "Sloppy",
            "description": "",
            "time_span": {"start_time": "0:00", "end_time": "01:00"}
        }]
    }"#;
    assert!(VideoIndex::from_json_str(json).is_err());
}

#[test]
fn rejects_an_unknown_node_type() {
    let json = r#"{
        "video_title": "Broken",
        "overview": "",
        "children": [{"node_type": "Section", "title": "", "summary": ""}]
    }"#;
    assert!(VideoIndex::from_json_str(json).is_err());
}
