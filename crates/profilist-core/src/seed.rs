// Seed record: the personal facts a wordlist is derived from

use std::collections::BTreeSet;

/// Personal facts about the target of an audit.
///
/// Every field is optional. Blank values (empty or whitespace-only) are
/// treated exactly like absent ones by the token extractor, so a record
/// collected from prompts can keep whatever the operator typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SeedRecord {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub nickname: Option<String>,
    pub pet: Option<String>,
    pub partner: Option<String>,
    pub birthplace: Option<String>,
    /// Expected as `D/M/YYYY` (one or two digit day and month).
    pub birthdate: Option<String>,
    pub relatives: BTreeSet<String>,
    pub hobbies: BTreeSet<String>,
    pub events: BTreeSet<String>,
}

impl SeedRecord {
    /// The record used when no input is supplied.
    pub fn example() -> Self {
        Self {
            name: Some("Juan".to_string()),
            surname: Some("Perez".to_string()),
            nickname: Some("JP".to_string()),
            pet: Some("Max".to_string()),
            birthdate: Some("01/01/1990".to_string()),
            relatives: ["Ana", "Luis"].into_iter().map(String::from).collect(),
            hobbies: ["futbol", "correr"].into_iter().map(String::from).collect(),
            ..Self::default()
        }
    }

    /// The single-valued word fields with their labels, in a fixed order.
    ///
    /// The birthdate is not included; it is parsed separately.
    pub fn scalar_fields(&self) -> [(&'static str, Option<&str>); 6] {
        [
            ("name", self.name.as_deref()),
            ("surname", self.surname.as_deref()),
            ("nickname", self.nickname.as_deref()),
            ("partner", self.partner.as_deref()),
            ("pet", self.pet.as_deref()),
            ("birthplace", self.birthplace.as_deref()),
        ]
    }

    /// All multi-valued entries, flattened.
    pub fn list_entries(&self) -> impl Iterator<Item = &str> {
        self.relatives
            .iter()
            .chain(&self.hobbies)
            .chain(&self.events)
            .map(String::as_str)
    }

    /// Returns `true` if the record holds no non-blank value at all.
    pub fn is_blank(&self) -> bool {
        self.scalar_fields()
            .iter()
            .all(|(_, v)| v.is_none_or(is_blank))
            && self.birthdate.as_deref().is_none_or(is_blank)
            && self.list_entries().all(is_blank)
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_blank() {
        assert!(SeedRecord::default().is_blank());
    }

    #[test]
    fn whitespace_only_record_is_blank() {
        let record = SeedRecord {
            name: Some("   ".to_string()),
            hobbies: [String::from(" ")].into_iter().collect(),
            ..SeedRecord::default()
        };
        assert!(record.is_blank());
    }

    #[test]
    fn example_record_contents() {
        let record = SeedRecord::example();
        assert!(!record.is_blank());
        assert_eq!(record.name.as_deref(), Some("Juan"));
        assert_eq!(record.list_entries().count(), 4);
    }

    #[test]
    fn scalar_fields_order() {
        let labels: Vec<_> = SeedRecord::default()
            .scalar_fields()
            .iter()
            .map(|(label, _)| *label)
            .collect();
        assert_eq!(
            labels,
            ["name", "surname", "nickname", "partner", "pet", "birthplace"]
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_partial_json() {
        let record: SeedRecord =
            serde_json::from_str(r#"{"name": "Ana", "hobbies": ["chess", "chess"]}"#).unwrap();
        assert_eq!(record.name.as_deref(), Some("Ana"));
        assert_eq!(record.hobbies.len(), 1);
        assert!(record.surname.is_none());
    }
}
