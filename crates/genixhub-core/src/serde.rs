//! Normalizing string deserializers used by request DTOs.

use serde::{Deserialize, Deserializer};

pub fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

pub fn deserialize_lowercase<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_lowercase())
}

pub fn deserialize_uppercase<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_uppercase())
}

pub fn deserialize_optional_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "deserialize_trimmed")]
        name: String,
        #[serde(deserialize_with = "deserialize_lowercase")]
        email: String,
        #[serde(deserialize_with = "deserialize_uppercase")]
        section: String,
        #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
        school_id: Option<String>,
    }

    #[test]
    fn test_normalizes_fields() {
        let sample: Sample = serde_json::from_str(
            r#"{"name":"  Delhi Public School ","email":" Admin@DPS.in","section":"a","school_id":"  "}"#,
        )
        .unwrap();
        assert_eq!(sample.name, "Delhi Public School");
        assert_eq!(sample.email, "admin@dps.in");
        assert_eq!(sample.section, "A");
        assert_eq!(sample.school_id, None);
    }

    #[test]
    fn test_optional_missing() {
        let sample: Sample =
            serde_json::from_str(r#"{"name":"x","email":"y","section":"b"}"#).unwrap();
        assert_eq!(sample.school_id, None);
    }
}
