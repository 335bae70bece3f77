//! Team member directory entries used for task assignee lookup.

use crate::model::task::TeamMemberId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: TeamMemberId,
    pub name: String,
    pub role: String,
    pub avatar: String,
}

impl TeamMember {
    /// First letter of every name part, e.g. `Anna Lundberg` -> `AL`.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::TeamMember;

    #[test]
    fn initials_take_first_char_of_each_part() {
        let member = TeamMember {
            id: "3".to_string(),
            name: "Maria  Bergström".to_string(),
            role: "Project Engineer".to_string(),
            avatar: String::new(),
        };
        assert_eq!(member.initials(), "MB");
    }
}
