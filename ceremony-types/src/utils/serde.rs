//! Utilities to be used in serde derives for more robust (de)serializations.

use serde::{de::IgnoredAny, Deserialize, Deserializer};

#[cfg(test)]
mod tests;

/// Many fields in the webauthn spec have the following wording.
///
/// > The values SHOULD be members of `T` but client platforms MUST ignore unknown values.
///
/// This method is a simple way of ignoring unknown values without failing deserialization.
pub(crate) fn ignore_unknown<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(match T::deserialize(de) {
        Ok(val) => val,
        Err(_) => T::default(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeKnown<T> {
    Known(T),
    Unknown(IgnoredAny),
}

/// Deserialize a list while dropping the entries that are not understood, rather than failing the
/// entire list.
pub(crate) fn ignore_unknown_vec<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let entries = Vec::<MaybeKnown<T>>::deserialize(de)?;
    Ok(entries
        .into_iter()
        .filter_map(|entry| match entry {
            MaybeKnown::Known(val) => Some(val),
            MaybeKnown::Unknown(_) => None,
        })
        .collect())
}

/// Same as [`ignore_unknown_vec`] for an optional list, a `null` stays `None`.
pub(crate) fn ignore_unknown_opt_vec<'de, D, T>(de: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let entries = Option::<Vec<MaybeKnown<T>>>::deserialize(de)?;
    Ok(entries.map(|entries| {
        entries
            .into_iter()
            .filter_map(|entry| match entry {
                MaybeKnown::Known(val) => Some(val),
                MaybeKnown::Unknown(_) => None,
            })
            .collect()
    }))
}

/// Same as [`ignore_unknown_opt_vec`] where `null` and a missing list both mean an empty list.
pub(crate) fn ignore_unknown_vec_or_null<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    ignore_unknown_opt_vec(de).map(Option::unwrap_or_default)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrNum {
    Num(f64),
    Str(String),
}

/// Timeouts are specified as numbers but some Relying Parties send them as strings or floats.
/// Anything that cannot be read as a positive number of milliseconds is treated as absent, and a
/// warning is logged since the Relying Party's setting is lost.
pub(crate) fn maybe_stringified<'de, D>(de: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<StringOrNum>::deserialize(de) {
        Ok(Some(value)) => value,
        Ok(None) => return Ok(None),
        Err(err) => {
            log::warn!("Ignoring a timeout that is neither a number nor a string: {err}");
            return Ok(None);
        }
    };

    match timeout_millis(&value) {
        Ok(millis) => Ok(Some(millis)),
        Err(reason) => {
            log::warn!("Ignoring timeout {value:?}: {reason}");
            Ok(None)
        }
    }
}

fn timeout_millis(value: &StringOrNum) -> Result<u32, &'static str> {
    let num = match value {
        StringOrNum::Num(num) => *num,
        StringOrNum::Str(s) => s.trim().parse::<f64>().map_err(|_| "not a number")?,
    };
    float_to_millis(num).ok_or("not a non-negative number of milliseconds within 32 bits")
}

fn float_to_millis(num: f64) -> Option<u32> {
    if !num.is_finite() || num < 0.0 {
        return None;
    }
    // truncate toward zero without an `as` cast
    format!("{:.0}", num.trunc()).parse::<u32>().ok()
}
