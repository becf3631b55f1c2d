use serde::{Deserialize, Deserializer};

/// A field of a partial update.
///
/// `Absent` means the key was not in the request body, `Null` means it was
/// sent as JSON `null`, `Value` carries the new value. Fields using this type
/// must be marked `#[serde(default)]` so that a missing key becomes `Absent`.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Overwrites a required attribute. `Null` is ignored here; payload
    /// validation rejects it before an update is applied.
    pub fn apply_to(self, target: &mut T) {
        if let Patch::Value(v) = self {
            *target = v;
        }
    }

    /// Overwrites a nullable attribute, clearing it on `Null`.
    pub fn apply_to_option(self, target: &mut Option<T>) {
        match self {
            Patch::Absent => {}
            Patch::Null => *target = None,
            Patch::Value(v) => *target = Some(v),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        })
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Patch::Value(value)
    }
}
