use steamid_ng::SteamID;
use serde::Serializer;

pub mod string {
    use std::fmt::Display;
    use std::str::FromStr;
    use serde::{de, Serializer, Deserialize, Deserializer};

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>
    {
        String::deserialize(deserializer)?.parse().map_err(de::Error::custom)
    }
}

pub fn steamid_as_string<S>(steamid: &SteamID, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer
{
    s.serialize_str(&u64::from(*steamid).to_string())
}

/// Serializes a bool as the literal string `"1"` or `"0"`.
pub fn bool_as_numeric_string<S>(value: &bool, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer
{
    s.serialize_str(if *value { "1" } else { "0" })
}
