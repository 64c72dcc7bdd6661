use ::serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::Suid;

impl Serialize for Suid {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Suid {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SuidVisitor;

        impl de::Visitor<'_> for SuidVisitor {
            type Value = Suid;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a sortable unique id string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                v.parse().map_err(de::Error::custom)
            }
        }

        d.deserialize_str(SuidVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suid_roundtrip() {
        #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
        struct Row {
            event_id: Suid,
        }
        let row = Row {
            event_id: "zzrmn7utjrkbfp5s7mwpz6bc".parse().expect("valid id"),
        };

        let json = serde_json::to_string(&row).expect("serialize");
        assert_eq!(json, r#"{"event_id":"zzrmn7utjrkbfp5s7mwpz6bc"}"#);
        let back: Row = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, row);
    }

    #[test]
    fn invalid_id_fails_deserialization() {
        let res: Result<Suid, _> = serde_json::from_str(r#""ZZRMN7UTJRKBFP5S7MWPZ6BC""#);
        assert!(res.is_err());
    }
}
