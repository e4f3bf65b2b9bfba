//! The build-wide permutation map consumed by client-side selection.

use permlink_common::SelectionDescriptor;

use crate::emit::EmittedFile;
use crate::error::LinkError;

/// Boxed error returned by a permutation map codec.
pub type CodecError = Box<dyn std::error::Error + Send + Sync>;

/// Converts reduced signatures to and from the permutation map document.
///
/// `deserialize(serialize(d))` must yield `d`.
pub trait PermutationMapCodec {
    /// Renders the descriptors into the document text.
    fn serialize(&self, descriptors: &[SelectionDescriptor]) -> Result<String, CodecError>;

    /// Reads descriptors back from the document text.
    fn deserialize(&self, content: &str) -> Result<Vec<SelectionDescriptor>, CodecError>;
}

/// JSON codec: an array of `{"permutation": ..., "selectors": [{"name", "value"}]}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPermutationMapCodec;

impl PermutationMapCodec for JsonPermutationMapCodec {
    fn serialize(&self, descriptors: &[SelectionDescriptor]) -> Result<String, CodecError> {
        Ok(serde_json::to_string_pretty(descriptors)?)
    }

    fn deserialize(&self, content: &str) -> Result<Vec<SelectionDescriptor>, CodecError> {
        Ok(serde_json::from_str(content)?)
    }
}

/// Serializes the descriptors into the permutation map document `file_name`.
pub fn create_permutation_map(
    codec: &dyn PermutationMapCodec,
    descriptors: &[SelectionDescriptor],
    file_name: &str,
) -> Result<EmittedFile, LinkError> {
    let contents = codec
        .serialize(descriptors)
        .map_err(|e| LinkError::Serialization {
            artifact: file_name.to_string(),
            reason: e.to_string(),
        })?;
    Ok(EmittedFile::new(file_name, contents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use permlink_common::BindingProperty;

    struct FailingCodec;

    impl PermutationMapCodec for FailingCodec {
        fn serialize(&self, _: &[SelectionDescriptor]) -> Result<String, CodecError> {
            Err("codec unavailable".into())
        }

        fn deserialize(&self, _: &str) -> Result<Vec<SelectionDescriptor>, CodecError> {
            Err("codec unavailable".into())
        }
    }

    fn descriptors() -> Vec<SelectionDescriptor> {
        vec![
            SelectionDescriptor::new(
                "P1",
                vec![
                    BindingProperty::new("locale", "en,fr"),
                    BindingProperty::new("user.agent", "safari"),
                ],
            ),
            SelectionDescriptor::new("P2", vec![]),
        ]
    }

    #[test]
    fn json_codec_is_invertible() {
        let codec = JsonPermutationMapCodec;
        let text = codec.serialize(&descriptors()).unwrap();
        assert_eq!(codec.deserialize(&text).unwrap(), descriptors());
    }

    #[test]
    fn json_shape() {
        let text = JsonPermutationMapCodec.serialize(&descriptors()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["permutation"], "P1");
        assert_eq!(value[0]["selectors"][0]["name"], "locale");
        assert_eq!(value[0]["selectors"][0]["value"], "en,fr");
        assert_eq!(value[1]["selectors"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn json_codec_rejects_garbage() {
        assert!(JsonPermutationMapCodec.deserialize("{not json").is_err());
    }

    #[test]
    fn map_document_uses_file_name() {
        let file = create_permutation_map(&JsonPermutationMapCodec, &descriptors(), "permutations.json")
            .unwrap();
        assert_eq!(file.path, "permutations.json");
        assert!(file.contents.contains("\"P2\""));
    }

    #[test]
    fn codec_failure_becomes_serialization_error() {
        match create_permutation_map(&FailingCodec, &descriptors(), "permutations.json").unwrap_err() {
            LinkError::Serialization { artifact, reason } => {
                assert_eq!(artifact, "permutations.json");
                assert_eq!(reason, "codec unavailable");
            }
            other => panic!("expected Serialization, got {other:?}"),
        }
    }
}
