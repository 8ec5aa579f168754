//! serde adapters for the `http` types used in the wire shapes.

use serde::{Deserialize, Deserializer};

/// Deserializes `null` the same way as a missing field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) mod method {
    use super::{Deserialize, Deserializer};
    use http::Method;
    use serde::de::Error as _;
    use serde::Serializer;

    pub(crate) fn serialize<S: Serializer>(method: &Method, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(method.as_str())
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Method, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Err(D::Error::custom("http method must not be empty"));
        }
        Method::from_bytes(raw.as_bytes()).map_err(D::Error::custom)
    }
}

pub(crate) mod headers {
    use super::Deserializer;
    use http::{HeaderMap, HeaderName, HeaderValue};
    use serde::de::{Error as _, MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::Serializer;
    use std::fmt;

    /// Writes one value per header name; the wire format is single valued.
    ///
    /// Values are written as UTF-8, replacing invalid sequences, so any map accepted on input
    /// can be encoded again.
    pub(crate) fn serialize<S: Serializer>(headers: &HeaderMap, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(headers.keys_len()))?;
        for name in headers.keys() {
            if let Some(value) = headers.get(name) {
                map.serialize_entry(name.as_str(), &String::from_utf8_lossy(value.as_bytes()))?;
            }
        }
        map.end()
    }

    /// Header names are normalized to lower case, `null` reads as no headers.
    ///
    /// Entries are applied in document order, so when two spellings of one name appear the
    /// later value wins.
    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<HeaderMap, D::Error> {
        deserializer.deserialize_option(HeadersVisitor)
    }

    struct HeadersVisitor;

    impl<'de> Visitor<'de> for HeadersVisitor {
        type Value = HeaderMap;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a map of header names to string values, or null")
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(HeaderMap::new())
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(HeaderMap::new())
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_map(self)
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut headers = HeaderMap::new();
            while let Some((name, value)) = access.next_entry::<String, String>()? {
                let name = HeaderName::from_bytes(name.as_bytes()).map_err(A::Error::custom)?;
                let value = HeaderValue::from_str(&value).map_err(A::Error::custom)?;
                headers.insert(name, value);
            }
            Ok(headers)
        }
    }
}

pub(crate) mod status_code {
    use super::{Deserialize, Deserializer};
    use http::StatusCode;
    use serde::de::Error as _;
    use serde::Serializer;

    pub(crate) fn serialize<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(status.as_u16())
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<StatusCode, D::Error> {
        let code = u16::deserialize(deserializer)?;
        StatusCode::from_u16(code).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use http::HeaderMap;
    use serde::{Deserialize, Serialize};

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "super::nullable")]
        value: String,
    }

    #[test]
    fn test_nullable_reads_null_as_default() {
        let holder: Holder = serde_json::from_str(r#"{"value":null}"#).unwrap();
        assert_eq!(holder.value, "");

        let holder: Holder = serde_json::from_str("{}").unwrap();
        assert_eq!(holder.value, "");

        let holder: Holder = serde_json::from_str(r#"{"value":"abc"}"#).unwrap();
        assert_eq!(holder.value, "abc");
    }

    #[derive(Serialize, Deserialize)]
    struct Headers {
        #[serde(default, with = "super::headers")]
        headers: HeaderMap,
    }

    #[test]
    fn test_headers_later_spelling_wins() {
        let json = r#"{"headers":{"Content-Type":"application/json","content-type":"application/xml"}}"#;

        for _ in 0..64 {
            let parsed: Headers = serde_json::from_str(json).unwrap();
            assert_eq!(parsed.headers.len(), 1);
            assert_eq!(parsed.headers.get("content-type").unwrap(), "application/xml");
        }
    }

    #[test]
    fn test_headers_null_missing_and_invalid() {
        let parsed: Headers = serde_json::from_str(r#"{"headers":null}"#).unwrap();
        assert!(parsed.headers.is_empty());

        let parsed: Headers = serde_json::from_str("{}").unwrap();
        assert!(parsed.headers.is_empty());

        assert!(serde_json::from_str::<Headers>(r#"{"headers":{"bad name":"x"}}"#).is_err());
        assert!(serde_json::from_str::<Headers>(r#"{"headers":["x"]}"#).is_err());
    }
}
