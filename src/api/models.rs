use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};

struct DeserializeScoreVisitor;

impl<'de> de::Visitor<'de> for DeserializeScoreVisitor {
    type Value = Option<i64>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer score")
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Some(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(i64::try_from(v).ok())
    }

    #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        // 5.0 is a fine score, 5.5 is not
        let whole = v.trunc();
        if whole == v && whole.abs() < 9.0e15 {
            Ok(Some(whole as i64))
        } else {
            Ok(None)
        }
    }

    fn visit_str<E>(self, _: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_bool<E>(self, _: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
    where
        A: de::SeqAccess<'de>,
    {
        skip_seq(seq).map(|()| None)
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: de::MapAccess<'de>,
    {
        skip_map(map).map(|()| None)
    }
}

struct DeserializeNicknameVisitor;

impl<'de> de::Visitor<'de> for DeserializeNicknameVisitor {
    type Value = Option<String>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a nickname")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Some(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Some(v))
    }

    fn visit_i64<E>(self, _: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_u64<E>(self, _: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_f64<E>(self, _: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_bool<E>(self, _: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
    where
        A: de::SeqAccess<'de>,
    {
        skip_seq(seq).map(|()| None)
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: de::MapAccess<'de>,
    {
        skip_map(map).map(|()| None)
    }
}

// the rest of the body still has to parse after a rejected value
fn skip_seq<'de, A>(mut seq: A) -> Result<(), A::Error>
where
    A: de::SeqAccess<'de>,
{
    while seq.next_element::<de::IgnoredAny>()?.is_some() {}
    Ok(())
}

fn skip_map<'de, A>(mut map: A) -> Result<(), A::Error>
where
    A: de::MapAccess<'de>,
{
    while map
        .next_entry::<de::IgnoredAny, de::IgnoredAny>()?
        .is_some()
    {}
    Ok(())
}

/// Anything that isn't an integer becomes `None`, so the handler can answer
/// with a validation message instead of a parse error.
fn lenient_score<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(DeserializeScoreVisitor)
}

/// Same idea for nicknames: a non-string is treated as missing.
fn lenient_nickname<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(DeserializeNicknameVisitor)
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Status {
    pub name:      String,
    pub version:   String,
    pub author:    String,
    pub grid_size: i64,
    pub tick_ms:   u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RegisterNickname {
    #[serde(default, deserialize_with = "lenient_nickname")]
    pub nickname: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RecordScore {
    #[serde(default, deserialize_with = "lenient_nickname")]
    pub nickname: Option<String>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub score:    Option<i64>,
}

/// Body of every non-leaderboard response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub message:    String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message:    message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            message:    message.into(),
            suggestion: Some(suggestion.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_of(json: &str) -> Option<i64> {
        serde_json::from_str::<RecordScore>(json).unwrap().score
    }

    #[test]
    fn test_score_parsing() {
        assert_eq!(score_of(r#"{"nickname": "fox", "score": 5}"#), Some(5));
        assert_eq!(score_of(r#"{"score": -2}"#), Some(-2));
        assert_eq!(score_of(r#"{"score": 7.0}"#), Some(7));
        assert_eq!(score_of(r#"{"score": 7.5}"#), None);
        assert_eq!(score_of(r#"{"score": "7"}"#), None);
        assert_eq!(score_of(r#"{"score": null}"#), None);
        assert_eq!(score_of(r#"{"nickname": "fox"}"#), None);
    }

    #[test]
    fn test_structured_score_is_missing() {
        assert_eq!(score_of(r#"{"nickname": "fox", "score": {"n": 1}}"#), None);
        assert_eq!(score_of(r#"{"nickname": "fox", "score": [1, [2]]}"#), None);
        assert_eq!(score_of(r#"{"score": [], "nickname": "fox"}"#), None);
    }

    #[test]
    fn test_nickname_parsing() {
        let nickname_of = |json: &str| {
            serde_json::from_str::<RegisterNickname>(json)
                .unwrap()
                .nickname
        };

        assert_eq!(nickname_of(r#"{"nickname": "fox"}"#).as_deref(), Some("fox"));
        assert_eq!(nickname_of(r#"{"nickname": 7}"#), None);
        assert_eq!(nickname_of(r#"{"nickname": true}"#), None);
        assert_eq!(nickname_of(r#"{"nickname": {"first": "fox"}}"#), None);
        assert_eq!(nickname_of(r#"{"nickname": ["fox"]}"#), None);
        assert_eq!(nickname_of(r#"{"nickname": null}"#), None);

        let record: RecordScore =
            serde_json::from_str(r#"{"nickname": 7, "score": 1}"#).unwrap();
        assert_eq!(record.nickname, None);
        assert_eq!(record.score, Some(1));
    }

    #[test]
    fn test_message_omits_missing_suggestion() {
        let plain = serde_json::to_string(&Message::new("ok")).unwrap();
        assert_eq!(plain, r#"{"message":"ok"}"#);

        let taken = Message::with_suggestion("taken", "fox1");
        let json = serde_json::to_string(&taken).unwrap();
        assert!(json.contains(r#""suggestion":"fox1""#));
    }
}
