//! Integration Tests for the Feature Layout + Validator
//!
//! Checks that payload validation and the layout agree with each other.

#[cfg(test)]
mod integration_tests {
    use serde_json::{json, Map, Value};

    use crate::logic::features::{
        layout::{feature_index, FEATURE_COUNT, FEATURE_LAYOUT},
        vector::{FeatureVector, ValidationError},
    };

    fn full_payload() -> Map<String, Value> {
        FEATURE_LAYOUT
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), json!(i as f64 + 0.5)))
            .collect()
    }

    /// Every attribute lands at its layout index
    #[test]
    fn test_every_attribute_lands_at_layout_index() {
        let vector = FeatureVector::from_payload(&full_payload()).unwrap();

        for name in FEATURE_LAYOUT {
            let index = feature_index(name).unwrap();
            assert_eq!(vector.get(index), Some(index as f64 + 0.5), "attribute {name}");
        }
        assert_eq!(vector.as_slice().len(), FEATURE_COUNT);
    }

    /// Removing any single attribute reports exactly that attribute
    #[test]
    fn test_each_missing_attribute_is_reported() {
        for name in FEATURE_LAYOUT {
            let mut payload = full_payload();
            payload.remove(*name);

            match FeatureVector::from_payload(&payload) {
                Err(ValidationError::MissingField { field }) => assert_eq!(field, *name),
                other => panic!("expected MissingField for {name}, got {other:?}"),
            }
        }
    }

    /// Payload key order never affects the vector
    #[test]
    fn test_key_order_irrelevant() {
        let forward = full_payload();
        let reversed: Map<String, Value> = forward
            .iter()
            .rev()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        assert_eq!(
            FeatureVector::from_payload(&forward).unwrap(),
            FeatureVector::from_payload(&reversed).unwrap()
        );
    }
}
