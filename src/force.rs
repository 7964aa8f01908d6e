use serde::{Deserialize, Serialize};
use strum::EnumIter;


// Serialized the way the server spells it: "w" or "b".
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, EnumIter, Serialize, Deserialize,
)]
pub enum Force {
    #[serde(rename = "w")]
    White,
    #[serde(rename = "b")]
    Black,
}

impl Force {
    pub fn opponent(self) -> Force {
        match self {
            Force::White => Force::Black,
            Force::Black => Force::White,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format() {
        assert_eq!(serde_json::to_string(&Force::White).unwrap(), r#""w""#);
        assert_eq!(serde_json::from_str::<Force>(r#""b""#).unwrap(), Force::Black);
        assert!(serde_json::from_str::<Force>(r#""white""#).is_err());
    }
}
