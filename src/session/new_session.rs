use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Why an incoming session was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("request body is not a JSON object")]
    NotAnObject,

    #[error("missing or empty field: {0}")]
    MissingField(&'static str),

    #[error("field {0} has the wrong type")]
    WrongType(&'static str),

    #[error("confidence is not a finite number")]
    ConfidenceNotFinite,

    #[error("confidence {0} is outside 0.0..=1.0")]
    ConfidenceOutOfRange(f64),
}

/// Session payload as submitted by the voice client
///
/// Fields are kept as raw JSON so that a missing or wrong-typed field is
/// reported as a validation error instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewSession {
    pub transcript: Option<Value>,
    pub emotion: Option<Value>,
    /// A JSON number, or a string holding one
    pub confidence: Option<Value>,
    pub reply: Option<Value>,
}

/// A session that passed validation and is safe to store and aggregate
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSession {
    pub transcript: String,
    pub emotion: String,
    pub confidence: f64,
    pub reply: String,
}

impl NewSession {
    /// Decode an already-parsed JSON body
    ///
    /// Only the top-level shape can fail here; field problems surface in
    /// `validate`.
    pub fn from_json(body: Value) -> Result<Self, ValidationError> {
        if !body.is_object() {
            return Err(ValidationError::NotAnObject);
        }
        serde_json::from_value(body).map_err(|_| ValidationError::NotAnObject)
    }

    pub fn validate(self) -> Result<ValidSession, ValidationError> {
        let transcript = required_text(self.transcript, "transcript")?;
        let emotion = required_text(self.emotion, "emotion")?.trim().to_lowercase();
        let reply = required_text(self.reply, "reply")?;
        let confidence = required_confidence(self.confidence)?;

        Ok(ValidSession {
            transcript,
            emotion,
            confidence,
            reply,
        })
    }
}

fn required_text(value: Option<Value>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::MissingField(field)),
        Some(Value::String(s)) if s.trim().is_empty() => Err(ValidationError::MissingField(field)),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ValidationError::WrongType(field)),
    }
}

fn required_confidence(value: Option<Value>) -> Result<f64, ValidationError> {
    let confidence = match value {
        None | Some(Value::Null) => return Err(ValidationError::MissingField("confidence")),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or(ValidationError::WrongType("confidence"))?,
        Some(Value::String(s)) if s.trim().is_empty() => {
            return Err(ValidationError::MissingField("confidence"))
        }
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::WrongType("confidence"))?,
        Some(_) => return Err(ValidationError::WrongType("confidence")),
    };

    if !confidence.is_finite() {
        return Err(ValidationError::ConfidenceNotFinite);
    }
    if !(0.0..=1.0).contains(&confidence) {
        return Err(ValidationError::ConfidenceOutOfRange(confidence));
    }
    Ok(confidence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> NewSession {
        NewSession {
            transcript: Some(json!("I had a long day")),
            emotion: Some(json!(" Sadness ")),
            confidence: Some(json!(0.82)),
            reply: Some(json!("That sounds tiring.")),
        }
    }

    #[test]
    fn test_valid_payload_normalizes_emotion() {
        let session = payload().validate().unwrap();
        assert_eq!(session.emotion, "sadness");
        assert_eq!(session.confidence, 0.82);
    }

    #[test]
    fn test_missing_fields_are_named() {
        let mut p = payload();
        p.reply = None;
        assert_eq!(p.validate(), Err(ValidationError::MissingField("reply")));

        let mut p = payload();
        p.transcript = Some(json!("   "));
        assert_eq!(p.validate(), Err(ValidationError::MissingField("transcript")));

        let mut p = payload();
        p.confidence = Some(Value::Null);
        assert_eq!(p.validate(), Err(ValidationError::MissingField("confidence")));
    }

    #[test]
    fn test_wrong_types_are_named() {
        let mut p = payload();
        p.transcript = Some(json!(5));
        assert_eq!(p.validate(), Err(ValidationError::WrongType("transcript")));

        let mut p = payload();
        p.emotion = Some(json!(["joy"]));
        assert_eq!(p.validate(), Err(ValidationError::WrongType("emotion")));

        let mut p = payload();
        p.confidence = Some(json!(true));
        assert_eq!(p.validate(), Err(ValidationError::WrongType("confidence")));

        let mut p = payload();
        p.confidence = Some(json!("very"));
        assert_eq!(p.validate(), Err(ValidationError::WrongType("confidence")));
    }

    #[test]
    fn test_numeric_string_confidence_is_coerced() {
        let mut p = payload();
        p.confidence = Some(json!(" 0.8 "));
        assert_eq!(p.validate().unwrap().confidence, 0.8);
    }

    #[test]
    fn test_confidence_bounds() {
        let mut p = payload();
        p.confidence = Some(json!(1.5));
        assert_eq!(p.validate(), Err(ValidationError::ConfidenceOutOfRange(1.5)));

        let mut p = payload();
        p.confidence = Some(json!("NaN"));
        assert_eq!(p.validate(), Err(ValidationError::ConfidenceNotFinite));

        let mut p = payload();
        p.confidence = Some(json!(0));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_unknown_emotion_labels_are_accepted() {
        let mut p = payload();
        p.emotion = Some(json!("nostalgia"));
        assert_eq!(p.validate().unwrap().emotion, "nostalgia");
    }

    #[test]
    fn test_from_json_requires_an_object() {
        assert_eq!(
            NewSession::from_json(json!([1, 2])).unwrap_err(),
            ValidationError::NotAnObject
        );
        assert!(NewSession::from_json(json!({})).is_ok());
    }
}
