// tokens-data: Serde structs for design variable snapshots
pub mod model;

#[cfg(test)]
mod tests {
    use super::model::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_minimal() {
        let data = json!({});
        let snapshot: VariableSnapshot = serde_json::from_value(data).unwrap();
        assert!(snapshot.collections.is_empty());
        assert!(snapshot.variables.is_empty());
        assert!(snapshot.paint_styles.is_empty());
    }

    #[test]
    fn test_deserialize_value_slots() {
        let data = json!({
            "id": "VariableID:1",
            "name": "Colors/Brand/Primary",
            "resolvedType": "COLOR",
            "valuesByMode": {
                "1:0": { "r": 1, "g": 0, "b": 0, "a": 1 },
                "1:1": { "type": "VARIABLE_ALIAS", "id": "VariableID:2" },
                "1:2": { "r": 0, "g": 0, "b": 1 }
            }
        });
        let v: Variable = serde_json::from_value(data).unwrap();
        assert_eq!(v.resolved_type, ResolvedType::Color);
        assert_eq!(v.description, "");
        assert_eq!(
            v.value_for_mode("1:0"),
            Some(&ValueSlot::Color(Rgba { r: 1.0, g: 0.0, b: 0.0, a: 1.0 }))
        );
        assert_eq!(v.value_for_mode("1:1").and_then(|s| s.as_alias()), Some("VariableID:2"));
        // Missing alpha defaults to opaque.
        if let Some(ValueSlot::Color(c)) = v.value_for_mode("1:2") {
            assert_eq!(c.a, 1.0);
        } else {
            panic!("Expected color slot");
        }
        assert_eq!(v.alias_path(), "Colors.Brand.Primary");
    }

    #[test]
    fn test_deserialize_scalar_slots() {
        let data = json!({
            "id": "v", "name": "Misc", "resolvedType": "FLOAT",
            "valuesByMode": { "a": 8, "b": true, "c": "Inter" }
        });
        let v: Variable = serde_json::from_value(data).unwrap();
        assert_eq!(v.value_for_mode("a"), Some(&ValueSlot::Number(8.0)));
        assert_eq!(v.value_for_mode("b"), Some(&ValueSlot::Boolean(true)));
        assert_eq!(v.value_for_mode("c"), Some(&ValueSlot::String("Inter".into())));
        assert_eq!(v.value_for_mode("missing"), None);
    }

    #[test]
    fn test_unknown_types_do_not_fail() {
        let data = json!({
            "id": "v", "name": "Shadow", "resolvedType": "EFFECT", "valuesByMode": {}
        });
        let v: Variable = serde_json::from_value(data).unwrap();
        assert_eq!(v.resolved_type, ResolvedType::Unknown);

        let paint: Paint = serde_json::from_value(json!({ "type": "VIDEO" })).unwrap();
        assert_eq!(paint.kind, PaintKind::Other);
        assert!(paint.visible);
    }

    #[test]
    fn test_collection_lookup() {
        let snapshot: VariableSnapshot = serde_json::from_value(json!({
            "collections": [
                { "id": "c1", "name": "Colors", "modes": [{ "modeId": "m1", "name": "Light" }], "variableIds": ["v1"] },
                { "id": "c2", "name": "Spacing", "modes": [], "variableIds": [] }
            ],
            "variables": [
                { "id": "v1", "name": "Brand/Primary", "resolvedType": "COLOR", "valuesByMode": {} },
                { "id": "v2", "name": "Base", "resolvedType": "FLOAT", "variableCollectionId": "c2", "valuesByMode": {} },
                { "id": "v3", "name": "Orphan", "resolvedType": "FLOAT", "valuesByMode": {} }
            ]
        }))
        .unwrap();

        let by_id = snapshot.variables_by_id();
        assert_eq!(by_id.len(), 3);
        assert_eq!(snapshot.collection_of(by_id["v1"]).map(|c| c.name.as_str()), Some("Colors"));
        assert_eq!(snapshot.collection_of(by_id["v2"]).map(|c| c.name.as_str()), Some("Spacing"));
        assert!(snapshot.collection_of(by_id["v3"]).is_none());
    }

    #[test]
    fn test_text_style_line_height() {
        let style: TextStyle = serde_json::from_value(json!({
            "id": "S:1",
            "name": "Body/Regular line-height",
            "fontSize": 16,
            "lineHeight": { "unit": "PIXELS", "value": 24 },
            "fontName": { "family": "Inter", "style": "Regular" }
        }))
        .unwrap();
        assert_eq!(style.line_height.unit, LineHeightUnit::Pixels);
        assert_eq!(style.line_height.value, Some(24.0));

        let auto: TextStyle = serde_json::from_value(json!({
            "id": "S:2", "name": "Body", "lineHeight": { "unit": "AUTO" }
        }))
        .unwrap();
        assert_eq!(auto.line_height.unit, LineHeightUnit::Auto);
        assert_eq!(auto.font_size, None);
    }
}
