//! Layout writers

use crate::graph::LayoutDocument;
use crate::io::{IoError, IoResult, Writer};

/// Pretty-printed JSON output
pub struct JsonWriter;

impl JsonWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for JsonWriter {
    fn render(&self, layout: &LayoutDocument) -> IoResult<String> {
        let mut out =
            serde_json::to_string_pretty(layout).map_err(|e| IoError::Write(e.to_string()))?;
        out.push('\n');
        Ok(out)
    }

    fn format_id(&self) -> &str {
        "json"
    }
}

/// YAML output
pub struct YamlWriter;

impl YamlWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for YamlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for YamlWriter {
    fn render(&self, layout: &LayoutDocument) -> IoResult<String> {
        serde_yaml::to_string(layout).map_err(|e| IoError::Write(e.to_string()))
    }

    fn format_id(&self) -> &str {
        "yaml"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PositionedNode;
    use crate::model::Direction;

    fn layout() -> LayoutDocument {
        LayoutDocument {
            margin: 0.05,
            direction: Direction::TopBottom,
            steps: 69,
            converged: true,
            nodes: vec![PositionedNode {
                id: "a".to_string(),
                label: Some("Alpha".to_string()),
                x: 0.25,
                y: 0.75,
            }],
        }
    }

    #[test]
    fn json_writer_output() {
        let out = JsonWriter::new().render(&layout()).unwrap();
        insta::assert_snapshot!(out.trim_end(), @r#"
        {
          "margin": 0.05,
          "direction": "top-bottom",
          "steps": 69,
          "converged": true,
          "nodes": [
            {
              "id": "a",
              "label": "Alpha",
              "x": 0.25,
              "y": 0.75
            }
          ]
        }
        "#);
    }

    #[test]
    fn yaml_writer_round_trips_through_serde() {
        let out = YamlWriter::new().render(&layout()).unwrap();
        let parsed: LayoutDocument = serde_yaml::from_str(&out).unwrap();
        assert_eq!(parsed, layout());
        assert!(out.contains("direction: top-bottom"));
    }
}
